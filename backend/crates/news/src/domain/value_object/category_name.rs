//! Category Name Value Object
//!
//! Trimmed and non-blank; `categories.name` carries no length limit.

use derive_more::Display;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryNameError {
    #[error("Category name cannot be empty")]
    Empty,
}

/// Non-blank, trimmed category name
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{_0}")]
pub struct CategoryName(String);

impl CategoryName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, CategoryNameError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CategoryNameError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
