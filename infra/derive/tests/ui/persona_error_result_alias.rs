use persona_derive::persona_error;
use std::borrow::Cow;

#[persona_error(result)]
pub enum DemoError {
    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn fails() -> Result<u8> {
    Err("nope".into())
}

fn main() {
    let err: DemoError = fails().unwrap_err();
    assert_eq!(err.to_string(), "Internal error: nope");
}
