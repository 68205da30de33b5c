use axum::{extract::State, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::dto::UserSummary;
use crate::error::{AppError, AppResult};
use crate::AppState;

pub async fn profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserSummary>> {
    // A valid token can outlive its user.
    let user = state
        .credentials
        .find_by_id(auth_user.id)
        .await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(user.into()))
}
