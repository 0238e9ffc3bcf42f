use std::borrow::Cow;

/// Errors raised while starting or querying a [`crate::ProcessScope`].
#[persona_derive::persona_error(result)]
pub enum RuntimeError {
    /// Two entries were installed under the same name.
    #[error("Duplicate scope entry{}: {message}", format_context(.context))]
    Duplicate { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// No entry of the requested name and type is installed.
    #[error("Scope entry not installed{}: {message}", format_context(.context))]
    NotInstalled { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A factory failed; entries started before it were torn down.
    #[error("Failed to initialize scope entry{}: {source}", format_context(.context))]
    Init { source: anyhow::Error, context: Option<Cow<'static, str>> },

    #[error("Internal runtime error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
