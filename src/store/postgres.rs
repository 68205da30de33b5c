use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use super::{is_unique_violation, CredentialStore, MoodStore, StoreError, StoreResult};
use crate::auth::password::hash_password;
use crate::models::mood_entry::{MoodEntry, NewMoodEntry, SortOrder};
use crate::models::user::{normalize_email, User};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn create_user(&self, email: &str, password: &str) -> StoreResult<User> {
        let email = email.trim();
        let pwd_hash = hash_password(password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, normalized_email, password_hash)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT ON CONSTRAINT users_normalized_email_key DO NOTHING
            RETURNING id, email, normalized_email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(normalize_email(email))
        .bind(&pwd_hash)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::DuplicateEmail(email.to_string()))?;

        tracing::debug!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, normalized_email, password_hash, created_at
            FROM users WHERE normalized_email = $1
            "#,
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, normalized_email, password_hash, created_at
            FROM users WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl MoodStore for PgStore {
    async fn list_for_user(&self, user_id: Uuid, order: SortOrder) -> StoreResult<Vec<MoodEntry>> {
        let sql = match order {
            SortOrder::Ascending => {
                r#"
                SELECT id, user_id, mood_rating, notes, entry_date
                FROM mood_entries
                WHERE user_id = $1
                ORDER BY entry_date ASC, id ASC
                "#
            }
            SortOrder::Descending => {
                r#"
                SELECT id, user_id, mood_rating, notes, entry_date
                FROM mood_entries
                WHERE user_id = $1
                ORDER BY entry_date DESC, id DESC
                "#
            }
        };

        let entries = sqlx::query_as::<_, MoodEntry>(sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(entries)
    }

    async fn find_on_day(&self, user_id: Uuid, day: NaiveDate) -> StoreResult<Option<MoodEntry>> {
        let entry = sqlx::query_as::<_, MoodEntry>(
            r#"
            SELECT id, user_id, mood_rating, notes, entry_date
            FROM mood_entries
            WHERE user_id = $1 AND entry_day = $2
            "#,
        )
        .bind(user_id)
        .bind(day)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn insert(&self, entry: NewMoodEntry) -> StoreResult<MoodEntry> {
        // The (user_id, entry_day) constraint is the authoritative guard; a
        // concurrent insert for the same day lands in DO NOTHING.
        let inserted = sqlx::query_as::<_, MoodEntry>(
            r#"
            INSERT INTO mood_entries (user_id, mood_rating, notes, entry_date)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT ON CONSTRAINT mood_entries_user_day_key DO NOTHING
            RETURNING id, user_id, mood_rating, notes, entry_date
            "#,
        )
        .bind(entry.user_id)
        .bind(entry.mood_rating)
        .bind(&entry.notes)
        .bind(entry.entry_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::DuplicateEntryDate
            } else {
                StoreError::Database(e)
            }
        })?;

        inserted.ok_or(StoreError::DuplicateEntryDate)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
