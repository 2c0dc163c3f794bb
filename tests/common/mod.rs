use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use dashboard_shell::config::AppConfig;
use dashboard_shell::storage::Persistence;
use serde_json::{json, Value};

pub const VALID_PASSWORD: &str = "pw";
pub const TOKEN: &str = "T1";
/// Signing in as this account returns a token with a line break in it
pub const BROKEN_TOKEN_EMAIL: &str = "broken@b.com";

/// In-process stand-in for the dashboard API
pub struct MockApi {
    pub base_url: String,
}

impl MockApi {
    /// Serve the mock API at the server root
    pub async fn spawn() -> Result<Self> {
        Self::spawn_under("").await
    }

    /// Serve the mock API under a path prefix such as "/api"
    pub async fn spawn_under(prefix: &str) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind mock API")?;

        let app = if prefix.is_empty() {
            routes()
        } else {
            Router::new().nest(prefix, routes())
        };

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        // give the accept loop a moment to start
        tokio::time::sleep(Duration::from_millis(20)).await;

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}{}", port, prefix),
        })
    }

    /// Shell config pointing at this server, with nothing written to disk
    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::default();
        config.api_url = self.base_url.clone();
        config.application_storage = Persistence::Session;
        config
    }
}

fn routes() -> Router {
    Router::new()
        .route("/auth", post(auth))
        .route("/echo-auth", get(echo_auth))
        .route("/platforms", get(platforms))
}

async fn auth(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if password != VALID_PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": true, "message": "Invalid credentials" })),
        );
    }

    let name = match email {
        "a@b.com" => "Ann",
        _ => "Someone Else",
    };
    let token = match email {
        BROKEN_TOKEN_EMAIL => "T1\nX",
        _ => TOKEN,
    };

    (
        StatusCode::OK,
        Json(json!({ "email": email, "name": name, "token": token })),
    )
}

/// Reports the Authorization header the client sent, or null
async fn echo_auth(headers: HeaderMap) -> Json<Value> {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({ "authorization": authorization }))
}

async fn platforms(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let expected = format!("Bearer {}", TOKEN);
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == expected)
        .unwrap_or(false);

    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": true, "message": "Missing or invalid token" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!([{
            "id": "p-1",
            "name": "Hauler 7",
            "fleet": "north",
            "img": "/img/hauler.png",
            "lastReport": "2024-05-01T10:00:00Z",
            "sensors": [
                { "id": "s-1", "ts": "2024-05-01T09:00:00Z", "value": 12.5 }
            ]
        }])),
    )
}
