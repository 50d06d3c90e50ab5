//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::{DbFailure, classify_db_error};
use kernel::pagination::{PageSource, SearchSpec, to_sql_bigint};
use sqlx::PgPool;

use crate::domain::entity::user::{NewUser, User, UserChanges};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName, phone_number::PhoneNumber, user_id::UserId,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = "id, phone, name, password, created_at, updated_at";

/// Search by name or phone, newest first
const USER_LISTING: SearchSpec = SearchSpec {
    from: "users",
    columns: &["name", "phone"],
    order_by: "created_at DESC, id DESC",
};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn find_by_phone(&self, phone: &PhoneNumber) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE phone = $1"
        ))
        .bind(phone.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn insert(&self, user: &NewUser) -> AuthResult<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (phone, name, password)
            VALUES ($1, $2, $3)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.phone.as_str())
        .bind(user.name.as_str())
        .bind(user.password.as_phc_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match classify_db_error(&e) {
            DbFailure::UniqueViolation => AuthError::DuplicatePhone,
            _ => AuthError::Storage(e),
        })?;

        row.into_user()
    }

    async fn find_all(&self) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn update(&self, user_id: UserId, changes: &UserChanges) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                password = COALESCE($3, password),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id.value())
        .bind(changes.name.as_ref().map(DisplayName::as_str))
        .bind(changes.password.as_ref().map(UserPassword::as_phc_string))
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn delete(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "DELETE FROM users WHERE id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match classify_db_error(&e) {
            // Still referenced by news rows
            DbFailure::ForeignKeyViolation => {
                AuthError::Validation("User still owns news articles".to_string())
            }
            _ => AuthError::Storage(e),
        })?;

        row.map(UserRow::into_user).transpose()
    }
}

// ============================================================================
// Listing
// ============================================================================

impl PageSource<User> for PgAuthRepository {
    type Error = AuthError;

    async fn count_matching(&self, search: &str) -> AuthResult<u64> {
        let total = sqlx::query_scalar::<_, i64>(&USER_LISTING.count_sql())
            .bind(search)
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn fetch_page(&self, search: &str, offset: u64, limit: u64) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&USER_LISTING.page_sql(USER_COLUMNS))
            .bind(search)
            .bind(to_sql_bigint(limit))
            .bind(to_sql_bigint(offset))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    phone: String,
    name: String,
    password: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        Ok(User {
            user_id: UserId::new(self.id),
            phone: PhoneNumber::from_db(self.phone),
            name: DisplayName::from_db(self.name),
            password: UserPassword::from_phc_string(self.password)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_sql() {
        assert_eq!(
            USER_LISTING.count_sql(),
            "SELECT COUNT(*) FROM users WHERE (strpos(name, $1) > 0 OR strpos(phone, $1) > 0)"
        );
        assert!(
            USER_LISTING
                .page_sql(USER_COLUMNS)
                .ends_with("ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3")
        );
    }
}
