use crate::constants::UNKNOWN_YEAR_OF_BIRTH;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A first/last name pair. Either half may be empty.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonName {
    pub first: String,
    pub last: String,
}

impl PersonName {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self { first: first.into(), last: last.into() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.last.is_empty()
    }
}

/// Renders as `first last`, joined by exactly one space even when a half is empty.
impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.last)
    }
}

/// Point-in-time copy of a record's fields, carried by lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonSnapshot {
    pub name: PersonName,
    pub year_of_birth: u32,
}

impl PersonSnapshot {
    pub const fn new(name: PersonName, year_of_birth: u32) -> Self {
        Self { name, year_of_birth }
    }
}

impl Default for PersonSnapshot {
    fn default() -> Self {
        Self { name: PersonName::default(), year_of_birth: UNKNOWN_YEAR_OF_BIRTH }
    }
}
