//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use patel_yarn_core::{Phone, PhoneError, UserId};

use super::RepositoryError;
use crate::models::User;

/// Database row for a user.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    name: String,
    address: String,
    pincode: i32,
    phone: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let phone = Phone::parse(&r.phone).map_err(|e: PhoneError| {
            RepositoryError::DataCorruption(format!("invalid phone in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(r.id),
            name: r.name,
            address: r.address,
            pincode: r.pincode,
            phone,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

const USER_COLUMNS: &str = "id, name, address, pincode, phone, created_at, updated_at";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a user by their phone number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored phone is invalid.
    pub async fn get_by_phone(&self, phone: &Phone) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE phone = $1"))
                .bind(phone.as_str())
                .fetch_optional(self.pool)
                .await?;

        row.map(User::try_from).transpose()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored phone is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id.as_i32())
                .fetch_optional(self.pool)
                .await?;

        row.map(User::try_from).transpose()
    }

    /// Create or update the user record for a phone number.
    ///
    /// The checkout delivery form is the only writer; the phone number is the
    /// conflict key, so repeated submissions update in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(
        &self,
        phone: &Phone,
        name: &str,
        address: &str,
        pincode: i32,
    ) -> Result<User, RepositoryError> {
        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users (phone, name, address, pincode) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (phone) DO UPDATE \
             SET name = EXCLUDED.name, address = EXCLUDED.address, \
                 pincode = EXCLUDED.pincode, updated_at = NOW() \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(phone.as_str())
        .bind(name)
        .bind(address)
        .bind(pincode)
        .fetch_one(self.pool)
        .await?;

        User::try_from(row)
    }
}
