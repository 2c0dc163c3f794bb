use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{Result, ShellError};
use crate::models::{AuthResponse, Credentials};
use crate::session::Session;

/// HTTP client bound to one snapshot of the session.
///
/// Built fresh for every call site so the Authorization header always
/// reflects the session at that moment; never cache one across a login or
/// logout.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client for `api_url`, carrying the session's bearer token if any
    pub fn for_session(api_url: &str, session: &Session) -> Result<Self> {
        let base_url = parse_base_url(api_url)?;
        let http = reqwest::Client::builder()
            .default_headers(auth_headers(session)?)
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` under the base URL, keeping any base path prefix
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// POST /auth - exchange credentials for a session token
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<AuthResponse> {
        tracing::debug!("POST /auth for {}", credentials.email);
        self.post_json("/auth", credentials).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        let response = self.http.get(url).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let response = self.http.post(url).json(body).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

/// Default headers for a session: `Authorization: Bearer <token>` iff a token is set
pub fn auth_headers(session: &Session) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    if let Some(token) = session.token() {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ShellError::InvalidToken)?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;

    // Url::join replaces the last segment unless the path ends with a slash
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Turn a non-2xx response into `ShellError::Rejected`, preferring the server's message
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "request failed".to_string());

    tracing::debug!("HTTP {} from API: {}", status.as_u16(), message);
    Err(ShellError::rejected(status.as_u16(), message))
}

fn error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(body) {
        Ok(json) => ["message", "error"]
            .iter()
            .find_map(|key| json.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        Err(_) => Some(body.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in(token: &str) -> Session {
        Session::from_auth(AuthResponse {
            email: "a@b.com".into(),
            name: "Ann".into(),
            token: token.into(),
        })
    }

    #[test]
    fn test_no_header_without_token() {
        let headers = auth_headers(&Session::new()).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_bearer_header_with_token() {
        let headers = auth_headers(&logged_in("T1")).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer T1");
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let err = auth_headers(&logged_in("T1\nX-Evil: 1")).unwrap_err();
        assert!(matches!(err, ShellError::InvalidToken));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = ApiClient::for_session("https://api.example.com/v1", &Session::new()).unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.example.com/v1/");
        assert_eq!(
            client.endpoint("/auth").unwrap().as_str(),
            "https://api.example.com/v1/auth"
        );
        assert_eq!(
            client.endpoint("platforms/7").unwrap().as_str(),
            "https://api.example.com/v1/platforms/7"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ApiClient::for_session("not a url", &Session::new()).unwrap_err();
        assert!(matches!(err, ShellError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"message":"Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(error_message(r#"{"error":"nope"}"#).as_deref(), Some("nope"));
        assert_eq!(error_message("plain failure\n").as_deref(), Some("plain failure"));
        assert_eq!(error_message("  "), None);
        assert_eq!(error_message(r#"{"code":7}"#), None);
    }
}
