//! Display Name Value Object
//!
//! Free-form human name shown next to content ("Lê Hoàng Thắng").
//! Unicode is NFKC-normalized and trimmed; length is counted in characters.
//!
//! Two length policies exist:
//! - self-registration: at least 2 characters
//! - accounts created by an administrator: 6 to 30 characters

use derive_more::Display;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for self-registered names
pub const DISPLAY_NAME_MIN_LENGTH: usize = 2;

/// Upper bound for any name (column width)
pub const DISPLAY_NAME_MAX_LENGTH: usize = 100;

/// Minimum length for administrator-created names
pub const MANAGED_NAME_MIN_LENGTH: usize = 6;

/// Maximum length for administrator-created names
pub const MANAGED_NAME_MAX_LENGTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayNameError {
    #[error("Name cannot be empty")]
    Empty,

    #[error("Name must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Name must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{_0}")]
pub struct DisplayName(String);

impl DisplayName {
    /// Name chosen at self-registration
    pub fn new(raw: impl AsRef<str>) -> Result<Self, DisplayNameError> {
        Self::with_bounds(raw.as_ref(), DISPLAY_NAME_MIN_LENGTH, DISPLAY_NAME_MAX_LENGTH)
    }

    /// Name set by an administrator
    pub fn managed(raw: impl AsRef<str>) -> Result<Self, DisplayNameError> {
        Self::with_bounds(raw.as_ref(), MANAGED_NAME_MIN_LENGTH, MANAGED_NAME_MAX_LENGTH)
    }

    fn with_bounds(raw: &str, min: usize, max: usize) -> Result<Self, DisplayNameError> {
        let normalized: String = raw.nfkc().collect();
        let trimmed = normalized.trim();

        if trimmed.is_empty() {
            return Err(DisplayNameError::Empty);
        }

        let actual = trimmed.chars().count();
        if actual < min {
            return Err(DisplayNameError::TooShort { min, actual });
        }
        if actual > max {
            return Err(DisplayNameError::TooLong { max, actual });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Restore from the database without re-validating
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
