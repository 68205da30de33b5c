//! Process-local store with the same uniqueness rules as the Postgres
//! schema. Backs the router tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CredentialStore, MoodStore, StoreError, StoreResult};
use crate::auth::password::hash_password;
use crate::models::mood_entry::{MoodEntry, NewMoodEntry, SortOrder};
use crate::models::user::{normalize_email, User};

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    entries: Vec<MoodEntry>,
    next_entry_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes a user and, like the foreign key cascade, all of their entries.
    pub async fn delete_user(&self, id: Uuid) -> bool {
        let mut inner = self.inner.write().await;
        inner.entries.retain(|e| e.user_id != id);
        inner.users.remove(&id).is_some()
    }

    pub async fn user_count(&self) -> usize {
        self.inner.read().await.users.len()
    }

    pub async fn entry_count(&self, user_id: Uuid) -> usize {
        let inner = self.inner.read().await;
        inner.entries.iter().filter(|e| e.user_id == user_id).count()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn create_user(&self, email: &str, password: &str) -> StoreResult<User> {
        let email = email.trim();
        let normalized = normalize_email(email);
        let pwd_hash = hash_password(password)?;

        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.normalized_email == normalized) {
            return Err(StoreError::DuplicateEmail(email.to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            normalized_email: normalized,
            password_hash: pwd_hash,
            created_at: Utc::now(),
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let normalized = normalize_email(email);
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.normalized_email == normalized)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }
}

#[async_trait]
impl MoodStore for MemoryStore {
    async fn list_for_user(&self, user_id: Uuid, order: SortOrder) -> StoreResult<Vec<MoodEntry>> {
        let inner = self.inner.read().await;
        let mut entries: Vec<MoodEntry> = inner
            .entries
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();

        entries.sort_by(|a, b| (a.entry_date, a.id).cmp(&(b.entry_date, b.id)));
        if order == SortOrder::Descending {
            entries.reverse();
        }
        Ok(entries)
    }

    async fn find_on_day(&self, user_id: Uuid, day: NaiveDate) -> StoreResult<Option<MoodEntry>> {
        let inner = self.inner.read().await;
        Ok(inner
            .entries
            .iter()
            .find(|e| e.user_id == user_id && e.entry_day() == day)
            .cloned())
    }

    async fn insert(&self, entry: NewMoodEntry) -> StoreResult<MoodEntry> {
        // Check and insert under one write lock, mirroring the unique constraint.
        let mut inner = self.inner.write().await;
        let day = entry.entry_day();
        if inner
            .entries
            .iter()
            .any(|e| e.user_id == entry.user_id && e.entry_day() == day)
        {
            return Err(StoreError::DuplicateEntryDate);
        }

        inner.next_entry_id += 1;
        let stored = MoodEntry {
            id: inner.next_entry_id,
            user_id: entry.user_id,
            mood_rating: entry.mood_rating,
            notes: entry.notes,
            entry_date: entry.entry_date,
        };
        inner.entries.push(stored.clone());
        Ok(stored)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
