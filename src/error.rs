//! Request-level errors.
//!
//! Only input validation can fail an analysis. Configuration and dictionary
//! problems surface when those objects are built, see
//! [`crate::config::SettingsError`] and [`crate::dictionary::DictionaryError`].

/// Input rejected before analysis begins.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Requirement text is empty")]
    Empty,

    #[error("Requirement text is too long: {len} characters (max {max})")]
    TooLong { len: usize, max: usize },
}
