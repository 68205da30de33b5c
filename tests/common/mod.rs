#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use moodtrack_api::{config::Config, routes, store::MemoryStore, AppState};

pub const PASSWORD: &str = "Passw0rd!";

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        db_max_connections: 1,
        host: "127.0.0.1".into(),
        port: 0,
        frontend_url: "http://localhost:3000".into(),
        cors_extra_origins: vec![],
        jwt_secret: "integration-test-secret".into(),
        jwt_issuer: "moodtrack-api".into(),
        jwt_audience: "moodtrack-client".into(),
        jwt_ttl_secs: 3600,
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub config: Config,
}

pub fn spawn_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let config = test_config();
    let router = routes::router(AppState::new(store.clone(), config.clone()));
    TestApp {
        router,
        store,
        config,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    /// Registers `email` with the default password; returns (token, user id).
    pub async fn register(&self, email: &str) -> (String, Uuid) {
        let res = self
            .post(
                "/api/auth/register",
                None,
                json!({ "email": email, "password": PASSWORD }),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "register failed: {}", res.body);

        let token = res.body["token"].as_str().unwrap().to_string();
        let id = res.body["user"]["id"].as_str().unwrap().parse().unwrap();
        (token, id)
    }

    pub async fn create_mood(&self, token: &str, rating: i64, date: &str) -> TestResponse {
        self.post(
            "/api/moods",
            Some(token),
            json!({ "moodRating": rating, "entryDate": date }),
        )
        .await
    }
}
