//! # Moodtrack request/response DTOs
//!
//! API contract types shared by the server and the `moodctl` client.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body
//! - `*Response` → serialized to client JSON
//! - JSON field names are camelCase
//! - Validation is expressed via `validator`; fields carrying rules get an
//!   explicit `serde(rename)` so reported field names match the wire names

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::auth::password;
use crate::models::mood_entry::MoodEntry;
use crate::models::user::User;

pub const MAX_EMAIL_LENGTH: u64 = 256;

// ============================================================================
// Common
// ============================================================================

/// Error envelope shared by every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<crate::error::FieldErrors>,
}

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth/register
///
/// `Validate` is implemented by hand so every password-policy violation is
/// reported at once, alongside any email problems.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let email = self.email.trim();

        if email.is_empty() {
            errors.add("email", with_message("required", "The Email field is required."));
        } else {
            if !validator::validate_email(email) {
                errors.add(
                    "email",
                    with_message("email", "The Email field is not a valid e-mail address."),
                );
            }
            if email.chars().count() as u64 > MAX_EMAIL_LENGTH {
                errors.add(
                    "email",
                    with_message("length", "The Email field must be at most 256 characters."),
                );
            }
        }

        if self.password.is_empty() {
            errors.add(
                "password",
                with_message("required", "The Password field is required."),
            );
        } else {
            for violation in password::policy_violations(&self.password) {
                errors.add("password", with_message(violation.code(), violation.message()));
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// POST /api/auth/login
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "The Email field is required."))]
    pub email: String,

    #[validate(length(min = 1, message = "The Password field is required."))]
    pub password: String,
}

/// Response for register and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

/// Minimal user view, also the body of GET /api/users/profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
}

impl From<User> for UserSummary {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
        }
    }
}

// ============================================================================
// Moods
// ============================================================================

/// POST /api/moods
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMoodEntryRequest {
    #[serde(rename = "moodRating")]
    #[validate(range(min = 1, max = 5, message = "Mood rating must be between 1 and 5"))]
    pub mood_rating: i32,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,

    #[serde(deserialize_with = "deserialize_entry_date")]
    pub entry_date: DateTime<Utc>,
}

impl CreateMoodEntryRequest {
    /// Notes with surrounding whitespace removed; blank notes count as absent.
    pub fn cleaned_notes(&self) -> Option<String> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from)
    }
}

/// One mood entry as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntryResponse {
    pub id: i64,
    pub mood_rating: i32,
    pub notes: Option<String>,
    pub entry_date: DateTime<Utc>,
}

impl From<MoodEntry> for MoodEntryResponse {
    fn from(e: MoodEntry) -> Self {
        Self {
            id: e.id,
            mood_rating: e.mood_rating,
            notes: e.notes,
            entry_date: e.entry_date,
        }
    }
}

/// GET /api/moods/analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodAnalysisResponse {
    pub total_entries: usize,
    pub average_mood_rating: f64,
    pub trends: Vec<MoodTrend>,
    /// Rating -> occurrences; ratings that never occur are absent.
    pub mood_distribution: BTreeMap<i32, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodTrend {
    pub date: DateTime<Utc>,
    pub mood_rating: i32,
    pub notes: Option<String>,
}

// ============================================================================
// Entry dates
// ============================================================================

/// Accepts RFC 3339 timestamps, offset-less timestamps (taken as UTC) and
/// bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_entry_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn deserialize_entry_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_entry_date(&raw).ok_or_else(|| {
        de::Error::custom(format!(
            "invalid entryDate '{}': expected a date (YYYY-MM-DD) or ISO 8601 timestamp",
            raw
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_entry_date_formats() {
        let rfc = parse_entry_date("2024-01-02T08:30:00Z").unwrap();
        assert_eq!(rfc.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(rfc.hour(), 8);

        let offset = parse_entry_date("2024-01-02T01:00:00+02:00").unwrap();
        assert_eq!(offset.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(offset.hour(), 23);

        let naive = parse_entry_date("2024-01-02T10:15:00.250").unwrap();
        assert_eq!(naive.hour(), 10);

        let bare = parse_entry_date("2024-01-02").unwrap();
        assert_eq!(bare.hour(), 0);
        assert_eq!(bare.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());

        assert!(parse_entry_date("yesterday").is_none());
        assert!(parse_entry_date("2024-13-01").is_none());
    }

    #[test]
    fn test_create_request_uses_wire_names() {
        let req: CreateMoodEntryRequest = serde_json::from_str(
            r#"{"moodRating": 4, "notes": "ok", "entryDate": "2024-03-05"}"#,
        )
        .unwrap();
        assert_eq!(req.mood_rating, 4);
        assert_eq!(req.notes.as_deref(), Some("ok"));

        let without_notes: CreateMoodEntryRequest =
            serde_json::from_str(r#"{"moodRating": 2, "entryDate": "2024-03-05"}"#).unwrap();
        assert!(without_notes.notes.is_none());

        let missing_date =
            serde_json::from_str::<CreateMoodEntryRequest>(r#"{"moodRating": 2}"#);
        assert!(missing_date.is_err());
    }

    #[test]
    fn test_rating_range_validation() {
        for rating in [-1, 0, 6, 100] {
            let req = CreateMoodEntryRequest {
                mood_rating: rating,
                notes: None,
                entry_date: Utc::now(),
            };
            let errors = req.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("moodRating"));
        }
        for rating in 1..=5 {
            let req = CreateMoodEntryRequest {
                mood_rating: rating,
                notes: None,
                entry_date: Utc::now(),
            };
            assert!(req.validate().is_ok());
        }
    }

    #[test]
    fn test_notes_length_limit() {
        let mut req = CreateMoodEntryRequest {
            mood_rating: 3,
            notes: Some("x".repeat(1000)),
            entry_date: Utc::now(),
        };
        assert!(req.validate().is_ok());

        req.notes = Some("x".repeat(1001));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_cleaned_notes_drops_blank() {
        let mut req = CreateMoodEntryRequest {
            mood_rating: 3,
            notes: Some("   ".into()),
            entry_date: Utc::now(),
        };
        assert_eq!(req.cleaned_notes(), None);

        req.notes = Some("  slept well \n".into());
        assert_eq!(req.cleaned_notes().as_deref(), Some("slept well"));
    }

    #[test]
    fn test_register_collects_every_violation() {
        let req = RegisterRequest {
            email: "not-an-email".into(),
            password: "abc".into(),
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();

        assert_eq!(fields["email"].len(), 1);
        // too short, no digit, no uppercase, no symbol
        assert_eq!(fields["password"].len(), 4);
    }

    #[test]
    fn test_register_accepts_policy_compliant_input() {
        let req = RegisterRequest {
            email: "user@example.com".into(),
            password: "Passw0rd!".into(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_distribution_serializes_with_string_keys() {
        let mut analysis = MoodAnalysisResponse::default();
        analysis.mood_distribution.insert(3, 1);
        analysis.mood_distribution.insert(5, 1);

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["moodDistribution"]["3"], 1);
        assert_eq!(json["totalEntries"], 0);

        let back: MoodAnalysisResponse = serde_json::from_value(json).unwrap();
        assert_eq!(back.mood_distribution.get(&5), Some(&1));
    }
}
