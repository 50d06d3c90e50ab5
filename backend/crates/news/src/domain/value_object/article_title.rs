//! Article Title Value Object
//!
//! Trimmed, non-blank, at most [`ARTICLE_TITLE_MAX_LENGTH`] characters
//! (`news.title` is `VARCHAR(100)`).

use derive_more::Display;
use thiserror::Error;

pub const ARTICLE_TITLE_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArticleTitleError {
    #[error("Title cannot be empty")]
    Empty,

    #[error("Title must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{_0}")]
pub struct ArticleTitle(String);

impl ArticleTitle {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ArticleTitleError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ArticleTitleError::Empty);
        }

        let actual = trimmed.chars().count();
        if actual > ARTICLE_TITLE_MAX_LENGTH {
            return Err(ArticleTitleError::TooLong {
                max: ARTICLE_TITLE_MAX_LENGTH,
                actual,
            });
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
