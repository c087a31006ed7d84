#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header, request};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use habitual::config::ServerConfig;
use habitual::server::{AppState, create_router};
use habitual::store::{SqliteStore, Store};

pub const EMAIL: &str = "ann@example.com";

/// A router over a fresh database in a temp directory.
pub struct TestApp {
    pub temp_dir: TempDir,
    pub state: Arc<AppState>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let config = ServerConfig {
            data_dir: temp_dir.path().to_path_buf(),
            expose_otp: true,
            ..Default::default()
        };

        let store = SqliteStore::new(config.db_path()).expect("open store");
        store.initialize().expect("initialize store");

        let state = Arc::new(AppState::new(Arc::new(store), config));
        let router = create_router(state.clone());

        Self {
            temp_dir,
            state,
            router,
        }
    }

    pub fn store(&self) -> &dyn Store {
        self.state.store.as_ref()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// Runs the two-step sign-in and returns the session token.
    pub async fn sign_in(&self, email: &str) -> String {
        let issued = self
            .send(json_request(
                "POST",
                "/signin",
                None,
                serde_json::json!({ "email": email }),
            ))
            .await;
        let issued = body_json(issued).await;
        let otp = issued["otp"].as_str().expect("otp echoed").to_string();

        let verified = self
            .send(json_request(
                "POST",
                "/signin",
                None,
                serde_json::json!({ "email": email, "otp": otp, "action": "verify" }),
            ))
            .await;
        let verified = body_json(verified).await;
        verified["token"].as_str().expect("session token").to_string()
    }

    /// Creates a habit through the form route and returns its id.
    pub async fn create_habit(&self, token: &str, form: &str) -> i64 {
        let response = self.send(form_request("/habit-tracker", Some(token), form)).await;
        assert_eq!(response.status(), 303, "create habit");

        let habits = self.store().list_habits(EMAIL).expect("list habits");
        habits.iter().map(|h| h.id).max().expect("habit created")
    }
}

fn with_auth(builder: request::Builder, token: Option<&str>) -> request::Builder {
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    with_auth(Request::builder().method("GET").uri(uri), token)
        .body(Body::empty())
        .expect("build request")
}

pub fn post(uri: &str, token: Option<&str>) -> Request<Body> {
    with_auth(Request::builder().method("POST").uri(uri), token)
        .body(Body::empty())
        .expect("build request")
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    with_auth(Request::builder().method(method).uri(uri), token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

pub fn form_request(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    with_auth(Request::builder().method("POST").uri(uri), token)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json body")
}

pub fn location(response: &Response<Body>) -> &str {
    response.headers()[header::LOCATION]
        .to_str()
        .expect("location header")
}
