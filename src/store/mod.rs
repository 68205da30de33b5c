//! Persistence seams.
//!
//! `CredentialStore` owns user identity and password checks, `MoodStore` owns
//! mood entries. Both enforce their uniqueness rules atomically: a duplicate
//! is reported as a typed `StoreError`, never as a raw database error.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::auth::password;
use crate::models::mood_entry::{MoodEntry, NewMoodEntry, SortOrder};
use crate::models::user::User;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("a mood entry already exists for this date")]
    DuplicateEntryDate,

    #[error("email '{0}' is already taken")]
    DuplicateEmail(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Hashes `password` and persists a new user. Fails with
    /// `DuplicateEmail` if the normalized email is already registered.
    async fn create_user(&self, email: &str, password: &str) -> StoreResult<User>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    fn verify_password(&self, user: &User, password: &str) -> anyhow::Result<bool> {
        password::verify_password(password, &user.password_hash)
    }
}

#[async_trait]
pub trait MoodStore: Send + Sync {
    async fn list_for_user(&self, user_id: Uuid, order: SortOrder) -> StoreResult<Vec<MoodEntry>>;

    async fn find_on_day(&self, user_id: Uuid, day: NaiveDate) -> StoreResult<Option<MoodEntry>>;

    /// Inserts the entry unless the user already has one on the same UTC
    /// day, in which case `DuplicateEntryDate` is returned and nothing is
    /// written.
    async fn insert(&self, entry: NewMoodEntry) -> StoreResult<MoodEntry>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> StoreResult<()>;
}

/// Unique-constraint violations surface as `sqlx::Error::Database`.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
