/// Earliest year accepted by the validated year-of-birth setter.
pub const MIN_YEAR_OF_BIRTH: u32 = 1900;

/// Year of birth of a record that has not been told one yet.
pub const UNKNOWN_YEAR_OF_BIRTH: u32 = 0;

// Event kind names, shared by config files and the CLI.
pub const CREATED: &str = "created";
pub const RENAMED: &str = "renamed";
pub const YEAR_CHANGED: &str = "year_changed";
pub const DROPPED: &str = "dropped";
