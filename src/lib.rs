//! Mood tracking service: daily 1-5 mood entries per user, history and
//! trend/distribution analysis behind a bearer-token REST API, plus the
//! `moodctl` command-line client.

use std::sync::Arc;

pub mod analysis;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod store;

use config::Config;
use store::{CredentialStore, MoodStore};

#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialStore>,
    pub moods: Arc<dyn MoodStore>,
    pub config: Arc<Config>,
}

impl AppState {
    /// State backed by one store that serves both users and mood entries.
    pub fn new<S>(store: Arc<S>, config: Config) -> Self
    where
        S: CredentialStore + MoodStore + 'static,
    {
        Self {
            credentials: store.clone(),
            moods: store,
            config: Arc::new(config),
        }
    }
}
