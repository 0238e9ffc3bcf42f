use std::borrow::Cow;

/// Errors that can occur during event bus operations.
#[persona_derive::persona_error]
pub enum EventBusError {
    /// An internal dynamic cast failed.
    /// This indicates an invariant violation in the type registry.
    #[error("Type mismatch{}: {message}", format_context(.context))]
    TypeMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The subscription id is unknown or was already removed.
    #[error("Subscription not found{}: {message}", format_context(.context))]
    SubscriptionNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Recorder capacity must be greater than zero.
    #[error("Invalid capacity{}: {message}", format_context(.context))]
    InvalidCapacity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
