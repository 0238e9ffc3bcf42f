use crate::error::PersonError;
use crate::observer::{PersonObserver, TracingObserver};
use persona_domain::constants::{MIN_YEAR_OF_BIRTH, UNKNOWN_YEAR_OF_BIRTH};
use persona_domain::events::PersonEvent;
use persona_domain::person::{PersonName, PersonSnapshot};
use std::fmt;
use std::sync::Arc;

/// A person with a validated year of birth and an observable lifecycle.
///
/// Every construction, mutation and drop is reported to the record's observer. The only
/// fallible operation is [`PersonRecord::set_year_of_birth`], which is all-or-nothing:
/// on failure the year is untouched and nothing is reported.
///
/// Records drop in reverse declaration order, so the last record created in a scope is
/// the first to report going out of it.
///
/// # Examples
/// ```rust
/// use persona_person::{EventJournal, PersonRecord};
/// use std::sync::Arc;
///
/// let journal = Arc::new(EventJournal::new());
/// let mut one = PersonRecord::new(journal.clone());
/// one.set_name("Mickey", "Mouse");
/// one.set_year_of_birth(1928).unwrap();
/// assert!(one.set_year_of_birth(1800).is_err());
/// assert_eq!(one.year_of_birth(), 1928);
/// ```
pub struct PersonRecord {
    name: PersonName,
    year_of_birth: u32,
    observer: Arc<dyn PersonObserver>,
}

impl PersonRecord {
    /// Creates a record with empty names and an unknown (zero) year of birth.
    pub fn new(observer: Arc<dyn PersonObserver>) -> Self {
        observer.notify(&PersonEvent::Instantiated);
        Self { name: PersonName::default(), year_of_birth: UNKNOWN_YEAR_OF_BIRTH, observer }
    }

    /// Creates a record with the given fields.
    ///
    /// The year is stored as given. Only [`Self::set_year_of_birth`] enforces the lower bound.
    pub fn with_details(
        first: impl Into<String>,
        last: impl Into<String>,
        year_of_birth: u32,
        observer: Arc<dyn PersonObserver>,
    ) -> Self {
        let record = Self { name: PersonName::new(first, last), year_of_birth, observer };
        record.observer.notify(&PersonEvent::Created { snapshot: record.snapshot() });
        record
    }

    /// Overwrites both names. Never fails.
    pub fn set_name(&mut self, first: impl Into<String>, last: impl Into<String>) {
        let current = PersonName::new(first, last);
        let previous = std::mem::replace(&mut self.name, current);
        self.observer.notify(&PersonEvent::Renamed { previous, current: self.name.clone() });
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.name.first
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.name.last
    }

    #[must_use]
    pub const fn name(&self) -> &PersonName {
        &self.name
    }

    /// Sets the year of birth.
    ///
    /// # Errors
    /// Returns [`PersonError::InvalidArgument`] if `year_of_birth` is below
    /// [`MIN_YEAR_OF_BIRTH`]. The record is unchanged and no event is emitted.
    pub fn set_year_of_birth(&mut self, year_of_birth: u32) -> Result<(), PersonError> {
        let current = validate_year_of_birth(year_of_birth)?;
        let previous = std::mem::replace(&mut self.year_of_birth, current);
        self.observer.notify(&PersonEvent::YearOfBirthChanged {
            name: self.name.clone(),
            previous,
            current,
        });
        Ok(())
    }

    #[must_use]
    pub const fn year_of_birth(&self) -> u32 {
        self.year_of_birth
    }

    #[must_use]
    pub fn snapshot(&self) -> PersonSnapshot {
        PersonSnapshot::new(self.name.clone(), self.year_of_birth)
    }
}

/// Checks the lower bound enforced by [`PersonRecord::set_year_of_birth`].
///
/// # Errors
/// Returns [`PersonError::InvalidArgument`] for years before [`MIN_YEAR_OF_BIRTH`].
pub fn validate_year_of_birth(year_of_birth: u32) -> Result<u32, PersonError> {
    if year_of_birth < MIN_YEAR_OF_BIRTH {
        return Err(PersonError::InvalidArgument {
            message: format!("year must be >= {MIN_YEAR_OF_BIRTH}").into(),
            value: year_of_birth,
            context: Some("set_year_of_birth".into()),
        });
    }
    Ok(year_of_birth)
}

/// Reports to [`TracingObserver`].
impl Default for PersonRecord {
    fn default() -> Self {
        Self::new(Arc::new(TracingObserver))
    }
}

impl Drop for PersonRecord {
    fn drop(&mut self) {
        let snapshot =
            PersonSnapshot::new(std::mem::take(&mut self.name), self.year_of_birth);
        self.observer.notify(&PersonEvent::OutOfScope { snapshot });
    }
}

impl fmt::Debug for PersonRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonRecord")
            .field("name", &self.name)
            .field("year_of_birth", &self.year_of_birth)
            .finish_non_exhaustive()
    }
}
