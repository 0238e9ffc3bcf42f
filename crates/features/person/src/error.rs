use std::borrow::Cow;

/// Error types specific to the person feature.
#[persona_derive::persona_error]
pub enum PersonError {
    /// A setter rejected its argument; the record was left untouched.
    #[error("Invalid argument{}: {message} ({value})", format_context(.context))]
    InvalidArgument { message: Cow<'static, str>, value: u32, context: Option<Cow<'static, str>> },
}
