//! Category Entity

use chrono::{DateTime, Utc};
use kernel::id::CategoryId;

use crate::domain::value_object::category_name::CategoryName;

#[derive(Debug, Clone)]
pub struct Category {
    pub category_id: CategoryId,
    pub name: CategoryName,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Writable fields, used for both create and full update
#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub name: CategoryName,
    pub description: Option<String>,
}
