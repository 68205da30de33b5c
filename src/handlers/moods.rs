use axum::{
    extract::State,
    http::{header, StatusCode},
    Extension, Json,
};

use crate::analysis::analyze;
use crate::auth::middleware::AuthUser;
use crate::dto::{CreateMoodEntryRequest, MoodAnalysisResponse, MoodEntryResponse};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::models::mood_entry::{NewMoodEntry, SortOrder};
use crate::AppState;

pub async fn list_mood_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<MoodEntryResponse>>> {
    let entries = state
        .moods
        .list_for_user(auth_user.id, SortOrder::Descending)
        .await?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

pub async fn create_mood_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<CreateMoodEntryRequest>,
) -> AppResult<(StatusCode, [(header::HeaderName, &'static str); 1], Json<MoodEntryResponse>)> {
    let new_entry = NewMoodEntry {
        user_id: auth_user.id,
        mood_rating: body.mood_rating,
        notes: body.cleaned_notes(),
        entry_date: body.entry_date,
    };

    // Early check for a clear error; the store's insert is still the
    // authoritative guard against a concurrent request for the same day.
    if state
        .moods
        .find_on_day(auth_user.id, new_entry.entry_day())
        .await?
        .is_some()
    {
        return Err(AppError::DuplicateEntryDate);
    }

    let entry = state.moods.insert(new_entry).await.map_err(|e| {
        tracing::debug!(user_id = %auth_user.id, error = %e, "Mood entry insert rejected");
        AppError::from(e)
    })?;

    tracing::info!(
        user_id = %auth_user.id,
        entry_id = entry.id,
        entry_day = %entry.entry_day(),
        "Mood entry created"
    );

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, "/api/moods")],
        Json(entry.into()),
    ))
}

pub async fn get_mood_analysis(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<MoodAnalysisResponse>> {
    let entries = state
        .moods
        .list_for_user(auth_user.id, SortOrder::Ascending)
        .await?;

    Ok(Json(analyze(&entries)))
}
