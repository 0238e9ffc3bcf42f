use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::parse::Parser;
use syn::{
    Attribute, Data, DeriveInput, Fields, FieldsNamed, GenericArgument, Ident, PathArguments,
    PathSegment, Type, Variant,
};

const INTERNAL_VARIANT: &str = "Internal";

#[derive(Default)]
struct ErrorArgs {
    result_alias: bool,
}

struct VariantMeta<'a> {
    ident: &'a Ident,
    source: Option<(&'a Ident, &'a Type)>,
    has_context: bool,
    cfg_attrs: Vec<Attribute>,
}

pub fn expand(args: TokenStream, input: DeriveInput) -> TokenStream {
    match try_expand(args, &input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn try_expand(args: TokenStream, input: &DeriveInput) -> syn::Result<TokenStream> {
    let args = parse_args(args)?;
    let name = &input.ident;
    let trait_name = format_ident!("{}Ext", name);

    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(name, "persona_error can only be applied to enums"));
    };

    let variants = data.variants.iter().map(parse_variant).collect::<syn::Result<Vec<_>>>()?;
    if let Some(v) = variants.iter().find(|v| v.source.is_some() && !v.has_context) {
        return Err(syn::Error::new_spanned(
            v.ident,
            "persona_error requires `context: Option<Cow<'static, str>>` for variants with a source",
        ));
    }

    let extra_derives = missing_derives(input);
    let context_trait = context_trait(name, &trait_name, &variants);
    let source_impls = variants.iter().filter_map(|v| source_impls(name, &trait_name, v));
    let internal_impls = internal_impls(name, &variants);
    let result_alias = args.result_alias.then(|| {
        quote! {
            /// Result alias defaulting to this crate's error type.
            pub type Result<T, E = #name> = ::std::result::Result<T, E>;
        }
    });

    Ok(quote! {
        #[allow(non_shorthand_field_patterns)]
        #extra_derives
        #input

        #context_trait
        #(#source_impls)*
        #internal_impls
        #result_alias

        #[allow(dead_code)]
        fn format_context(context: &Option<std::borrow::Cow<'static, str>>) -> std::borrow::Cow<'static, str> {
            context.as_ref().map_or(std::borrow::Cow::Borrowed(""), |c| std::borrow::Cow::Owned(format!(" ({c})")))
        }
    })
}

fn parse_args(args: TokenStream) -> syn::Result<ErrorArgs> {
    let mut parsed = ErrorArgs::default();
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("result") {
            parsed.result_alias = true;
            Ok(())
        } else {
            Err(meta.error("unsupported persona_error argument, expected `result`"))
        }
    });
    parser.parse2(args)?;
    Ok(parsed)
}

fn parse_variant(v: &Variant) -> syn::Result<VariantMeta<'_>> {
    let Fields::Named(fields) = &v.fields else {
        return Err(syn::Error::new_spanned(
            v,
            "persona_error requires named fields for source/context handling",
        ));
    };

    let has_context = check_context_field(fields)?;
    let source = fields
        .named
        .iter()
        .find(|field| {
            field.ident.as_ref().is_some_and(|ident| ident == "source")
                || has_attr(&field.attrs, "source")
                || has_attr(&field.attrs, "from")
        })
        .and_then(|field| field.ident.as_ref().map(|ident| (ident, &field.ty)));

    Ok(VariantMeta {
        ident: &v.ident,
        source,
        has_context,
        cfg_attrs: v.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).cloned().collect(),
    })
}

/// Returns whether a well-typed `context` field exists; a mistyped one is an error.
fn check_context_field(fields: &FieldsNamed) -> syn::Result<bool> {
    let Some(field) =
        fields.named.iter().find(|f| f.ident.as_ref().is_some_and(|ident| ident == "context"))
    else {
        return Ok(false);
    };

    if is_context_type(&field.ty) {
        Ok(true)
    } else {
        Err(syn::Error::new_spanned(&field.ty, "context field must be Option<Cow<'static, str>>"))
    }
}

fn missing_derives(input: &DeriveInput) -> TokenStream {
    let derived = derived_trait_names(&input.attrs);
    let mut tokens = Vec::new();
    if !derived.contains("Debug") {
        tokens.push(quote! { Debug });
    }
    if !derived.contains("Error") {
        tokens.push(quote! { ::thiserror::Error });
    }
    if tokens.is_empty() { quote! {} } else { quote! { #[derive(#(#tokens),*)] } }
}

fn context_trait(name: &Ident, trait_name: &Ident, variants: &[VariantMeta<'_>]) -> TokenStream {
    let arms = variants.iter().filter(|v| v.has_context).map(|v| {
        let cfg_attrs = &v.cfg_attrs;
        let ident = v.ident;
        quote! { #(#cfg_attrs)* #name::#ident { context: c, .. } => *c = Some(context.into()), }
    });

    quote! {
        pub trait #trait_name<T> {
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> ::std::result::Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #trait_name<T> for ::std::result::Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut e| {
                    match &mut e {
                        #( #arms )*
                        _ => {}
                    }
                    e
                })
            }
        }
    }
}

fn source_impls(name: &Ident, trait_name: &Ident, v: &VariantMeta<'_>) -> Option<TokenStream> {
    if v.ident == INTERNAL_VARIANT {
        return None;
    }
    let (field, ty) = v.source?;
    let ident = v.ident;
    let cfg_attrs = &v.cfg_attrs;

    Some(quote! {
        #(#cfg_attrs)*
        #[automatically_derived]
        impl From<#ty> for #name {
            #[inline]
            fn from(#field: #ty) -> Self { Self::#ident { #field, context: None } }
        }

        #(#cfg_attrs)*
        impl<T> #trait_name<T> for ::std::result::Result<T, #ty> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> ::std::result::Result<T, #name> {
                self.map_err(|#field| #name::#ident { #field, context: Some(context.into()) })
            }
        }
    })
}

fn internal_impls(name: &Ident, variants: &[VariantMeta<'_>]) -> TokenStream {
    let Some(internal) = variants.iter().find(|v| v.ident == INTERNAL_VARIANT) else {
        return quote!();
    };
    let cfg_attrs = &internal.cfg_attrs;

    quote! {
        #(#cfg_attrs)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(s: &'static str) -> Self { Self::Internal { message: std::borrow::Cow::Borrowed(s), context: None } }
        }
        #(#cfg_attrs)*
        impl From<String> for #name {
            #[inline]
            fn from(s: String) -> Self { Self::Internal { message: std::borrow::Cow::Owned(s), context: None } }
        }
    }
}

fn has_attr(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

fn derived_trait_names(attrs: &[Attribute]) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(seg) = meta.path.segments.last() {
                traits.insert(seg.ident.to_string());
            }
            Ok(())
        });
    }

    traits
}

fn last_segment(ty: &Type) -> Option<&PathSegment> {
    let Type::Path(path) = ty else { return None };
    path.path.segments.last()
}

/// Matches `Option<Cow<'static, str>>`, with any path prefix on each segment.
fn is_context_type(ty: &Type) -> bool {
    let Some(option) = last_segment(ty).filter(|seg| seg.ident == "Option") else {
        return false;
    };
    let PathArguments::AngleBracketed(option_args) = &option.arguments else {
        return false;
    };
    let Some(GenericArgument::Type(inner)) = option_args.args.first() else {
        return false;
    };
    let Some(cow) = last_segment(inner).filter(|seg| seg.ident == "Cow") else {
        return false;
    };
    let PathArguments::AngleBracketed(cow_args) = &cow.arguments else {
        return false;
    };

    let mut args = cow_args.args.iter();
    let lifetime_ok =
        matches!(args.next(), Some(GenericArgument::Lifetime(lt)) if lt.ident == "static");
    let str_ok = matches!(
        args.next(),
        Some(GenericArgument::Type(str_ty)) if last_segment(str_ty).is_some_and(|seg| seg.ident == "str")
    );

    lifetime_ok && str_ok
}
