use persona_derive::persona_error;
use std::borrow::Cow;

#[persona_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Invalid argument{}: {message} ({value})", format_context(.context))]
    InvalidArgument { message: Cow<'static, str>, value: u32, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err::<(), _>(std::io::Error::other("disk gone")).context("reading demo file")?;
    Ok(())
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.to_string(), "IO error (reading demo file): disk gone");

    let internal: DemoError = "boom".into();
    assert!(matches!(internal, DemoError::Internal { .. }));

    let annotated: Result<(), DemoError> = Err(DemoError::InvalidArgument {
        message: "year must be >= 1900".into(),
        value: 1800,
        context: None,
    });
    let err = annotated.context("set_year_of_birth").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid argument (set_year_of_birth): year must be >= 1900 (1800)"
    );
}
