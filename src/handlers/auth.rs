use axum::{extract::State, Json};

use crate::auth::jwt::create_access_token;
use crate::dto::{AuthResponse, LoginRequest, RegisterRequest, UserSummary};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::models::user::User;
use crate::AppState;

fn issue_auth_response(user: User, state: &AppState) -> AppResult<AuthResponse> {
    let token = create_access_token(user.id, &user.email, &state.config)?;
    Ok(AuthResponse {
        token,
        user: UserSummary::from(user),
    })
}

pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    // Duplicate emails are caught by the store's unique key, so a racing
    // registration cannot produce a second account.
    let user = state
        .credentials
        .create_user(&body.email, &body.password)
        .await?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok(Json(issue_auth_response(user, &state)?))
}

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // Unknown email and wrong password are indistinguishable to the caller.
    let user = state
        .credentials
        .find_by_email(&body.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !state.credentials.verify_password(&user, &body.password)? {
        tracing::debug!(user_id = %user.id, "Password verification failed");
        return Err(AppError::InvalidCredentials);
    }

    Ok(Json(issue_auth_response(user, &state)?))
}
