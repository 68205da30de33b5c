//! HTTP client for the mood API, used by `moodctl`.

use serde::{de::DeserializeOwned, Serialize};

use crate::dto::{
    AuthResponse, CreateMoodEntryRequest, ErrorResponse, LoginRequest, MoodAnalysisResponse,
    MoodEntryResponse, RegisterRequest, UserSummary,
};
use crate::error::FieldErrors;

pub mod render;
pub mod session;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{}", describe_api_error(.message, .fields.as_ref()))]
    Api {
        status: u16,
        message: String,
        fields: Option<FieldErrors>,
    },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not logged in. Run `moodctl login <email>` first.")]
    NotLoggedIn,
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Server message followed by one indented line per field message.
fn describe_api_error(message: &str, fields: Option<&FieldErrors>) -> String {
    let mut out = message.to_string();
    if let Some(fields) = fields {
        for (field, messages) in fields.iter() {
            for m in messages {
                out.push_str(&format!("\n  {}: {}", field, m));
            }
        }
    }
    out
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn register(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let body = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/api/auth/register", &body, false).await
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/api/auth/login", &body, false).await
    }

    pub async fn profile(&self) -> ClientResult<UserSummary> {
        self.get("/api/users/profile").await
    }

    pub async fn list_moods(&self) -> ClientResult<Vec<MoodEntryResponse>> {
        self.get("/api/moods").await
    }

    pub async fn create_mood(&self, entry: &CreateMoodEntryRequest) -> ClientResult<MoodEntryResponse> {
        self.post("/api/moods", entry, true).await
    }

    pub async fn analysis(&self) -> ClientResult<MoodAnalysisResponse> {
        self.get("/api/moods/analysis").await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> ClientResult<&str> {
        self.token.as_deref().ok_or(ClientError::NotLoggedIn)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        decode(response).await
    }

    async fn post<B, T>(&self, path: &str, body: &B, authenticated: bool) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http.post(self.url(path)).json(body);
        if authenticated {
            request = request.bearer_auth(self.bearer()?);
        }
        decode(request.send().await?).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await?;
    let (message, fields) = match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(envelope) => (envelope.error.message, envelope.error.fields),
        Err(_) if !text.trim().is_empty() => (text, None),
        Err(_) => (
            status.canonical_reason().unwrap_or("Request failed").to_string(),
            None,
        ),
    };

    tracing::debug!(status = status.as_u16(), message = %message, "API request failed");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
        fields,
    })
}
