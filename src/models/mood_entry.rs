use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MoodEntry {
    pub id: i64,
    pub user_id: Uuid,
    pub mood_rating: i32,
    pub notes: Option<String>,
    pub entry_date: DateTime<Utc>,
}

impl MoodEntry {
    /// Calendar day (UTC) the entry counts for.
    pub fn entry_day(&self) -> NaiveDate {
        self.entry_date.date_naive()
    }
}

#[derive(Debug, Clone)]
pub struct NewMoodEntry {
    pub user_id: Uuid,
    pub mood_rating: i32,
    pub notes: Option<String>,
    pub entry_date: DateTime<Utc>,
}

impl NewMoodEntry {
    pub fn entry_day(&self) -> NaiveDate {
        self.entry_date.date_naive()
    }
}

/// Ordering of a user's entries by `entry_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_entry_day_ignores_time_of_day() {
        let morning = NewMoodEntry {
            user_id: Uuid::new_v4(),
            mood_rating: 3,
            notes: None,
            entry_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 5, 0).unwrap(),
        };
        let night = NewMoodEntry {
            entry_date: Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap(),
            ..morning.clone()
        };
        assert_eq!(morning.entry_day(), night.entry_day());
    }
}
