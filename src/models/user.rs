use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Lowercased email; the uniqueness and login key.
    #[serde(skip_serializing)]
    pub normalized_email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Canonical form used to compare emails.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
