use crate::constants::{CREATED, DROPPED, RENAMED, YEAR_CHANGED};
use crate::person::{PersonName, PersonSnapshot};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// A set of person event kinds, used to filter what observers render.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct EventMask: u32 {
        const CREATED = 1 << 0;
        const RENAMED = 1 << 1;
        const YEAR_CHANGED = 1 << 2;
        const DROPPED = 1 << 3;

        const ALL = Self::CREATED.bits()
            | Self::RENAMED.bits()
            | Self::YEAR_CHANGED.bits()
            | Self::DROPPED.bits();
    }
}

impl From<&str> for EventMask {
    fn from(s: &str) -> Self {
        match s.trim() {
            CREATED => Self::CREATED,
            RENAMED => Self::RENAMED,
            YEAR_CHANGED => Self::YEAR_CHANGED,
            DROPPED => Self::DROPPED,
            "all" | "*" => Self::ALL,
            _ => Self::empty(),
        }
    }
}

impl From<u32> for EventMask {
    fn from(bits: u32) -> Self {
        Self::from_bits_truncate(bits)
    }
}

impl Default for EventMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl EventMask {
    /// Parses a comma-separated list such as `"created,dropped"`. Unknown names are ignored.
    #[must_use]
    pub fn parse_list(list: &str) -> Self {
        list.split(',').map(Self::from).fold(Self::empty(), |acc, kind| acc | kind)
    }

    /// Kind names contained in this mask, in declaration order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        [
            (Self::CREATED, CREATED),
            (Self::RENAMED, RENAMED),
            (Self::YEAR_CHANGED, YEAR_CHANGED),
            (Self::DROPPED, DROPPED),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect()
    }
}

// Config files spell masks as name lists; a bare integer is accepted as raw bits.
impl Serialize for EventMask {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.names().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EventMask {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Bits(u32),
            One(String),
            Many(Vec<String>),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Bits(bits) => Self::from_bits_truncate(bits),
            Repr::One(list) => Self::parse_list(&list),
            Repr::Many(names) => {
                names.iter().map(|n| Self::from(n.as_str())).fold(Self::empty(), |a, k| a | k)
            },
        })
    }
}

/// A lifecycle or mutation notification emitted by a person record.
///
/// The `Display` form is the human-readable log line for the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PersonEvent {
    /// A record was default-constructed: empty names, unknown year.
    Instantiated,
    /// A record was constructed with explicit values.
    Created { snapshot: PersonSnapshot },
    /// Both names were overwritten.
    Renamed { previous: PersonName, current: PersonName },
    /// The year of birth passed validation and was overwritten.
    YearOfBirthChanged { name: PersonName, previous: u32, current: u32 },
    /// The record's owning scope ended.
    OutOfScope { snapshot: PersonSnapshot },
}

impl PersonEvent {
    #[must_use]
    pub const fn kind(&self) -> EventMask {
        match self {
            Self::Instantiated | Self::Created { .. } => EventMask::CREATED,
            Self::Renamed { .. } => EventMask::RENAMED,
            Self::YearOfBirthChanged { .. } => EventMask::YEAR_CHANGED,
            Self::OutOfScope { .. } => EventMask::DROPPED,
        }
    }

    /// Stable kind name, as used in config files and on the command line.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Instantiated | Self::Created { .. } => CREATED,
            Self::Renamed { .. } => RENAMED,
            Self::YearOfBirthChanged { .. } => YEAR_CHANGED,
            Self::OutOfScope { .. } => DROPPED,
        }
    }

    /// Whether this event passes the given filter.
    #[must_use]
    pub const fn is_in(&self, mask: EventMask) -> bool {
        mask.contains(self.kind())
    }
}

impl fmt::Display for PersonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instantiated => {
                f.write_str("Person object instantiated without names or birth year")
            },
            Self::Created { snapshot } => write!(
                f,
                "Person object instantiated: {}, year of birth {}",
                snapshot.name, snapshot.year_of_birth
            ),
            Self::Renamed { previous, current } => {
                write!(f, "Person previously known as {previous} is now {current}")
            },
            Self::YearOfBirthChanged { name, previous, current } => {
                write!(f, "Person {name}, born in {previous} is now born in {current}")
            },
            Self::OutOfScope { snapshot } => write!(
                f,
                "Person {} born in {} goes out of scope",
                snapshot.name, snapshot.year_of_birth
            ),
        }
    }
}
