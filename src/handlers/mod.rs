pub mod auth;
pub mod health;
pub mod moods;
pub mod users;
