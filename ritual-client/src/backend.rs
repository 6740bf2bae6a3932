//! HTTP client for the backend's account and document surface.

use crate::config::BackendConfig;
use crate::query::Query;
use crate::token::TokenStore;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use ritual_core::Identity;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::warn;

/// Document id value that asks the backend to mint one server-side.
pub const SERVER_ASSIGNED_ID: &str = "unique()";

const PROJECT_HEADER: &str = "x-ritual-project";
const SESSION_HEADER: &str = "x-ritual-session";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("WebSocket error: {0}")]
    WebSocket(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Structured failure reported by the backend. `Display` is the
    /// server's message verbatim; that is what reaches the user.
    #[error("{message}")]
    Backend {
        code: u16,
        kind: String,
        message: String,
    },
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

impl From<tokio_tungstenite::tungstenite::Error> for ClientError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::WebSocket(Box::new(err))
    }
}

impl ClientError {
    /// True when the backend reported the target document as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Backend { code: 404, .. })
    }
}

/// Failure body shape shared by every backend endpoint.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: u16,
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

/// Envelope around document list responses.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList<T> {
    pub total: u64,
    pub documents: Vec<T>,
}

#[derive(Debug, Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SessionCreated {
    token: String,
}

#[derive(Debug, Serialize)]
struct CreateDocumentBody<'a, D> {
    document_id: &'a str,
    data: &'a D,
}

#[derive(Debug, Serialize)]
struct UpdateDocumentBody<'a, D> {
    data: &'a D,
}

/// Typed wrapper around the backend's REST surface.
///
/// Holds the current session token behind a shared lock so every clone
/// (repository, realtime) observes sign-in and sign-out immediately. The
/// token doubles as transport state persisted through [`TokenStore`].
#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    ws_url: String,
    project_id: String,
    session: Arc<RwLock<Option<String>>>,
    tokens: TokenStore,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        let tokens = TokenStore::new(config.session_path.clone());
        let stored = match tokens.load() {
            Ok(token) => token,
            Err(err) => {
                warn!(
                    error = %err,
                    path = %tokens.path().display(),
                    "could not read the session token file, starting signed out"
                );
                None
            }
        };
        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            ws_url: config.ws_endpoint.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            session: Arc::new(RwLock::new(stored)),
            tokens,
        })
    }

    pub fn has_session(&self) -> bool {
        self.session_token().is_some()
    }

    pub(crate) fn session_token(&self) -> Option<String> {
        match self.session.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Drops the in-memory token and the persisted copy. Never fails; a
    /// file that cannot be removed is logged and left behind.
    pub fn clear_session(&self) {
        self.set_session_token(None);
    }

    fn set_session_token(&self, token: Option<String>) {
        match self.session.write() {
            Ok(mut guard) => *guard = token.clone(),
            Err(poisoned) => *poisoned.into_inner() = token.clone(),
        }
        let persisted = match &token {
            Some(token) => self.tokens.save(token),
            None => self.tokens.clear(),
        };
        if let Err(err) = persisted {
            warn!(
                error = %err,
                path = %self.tokens.path().display(),
                "could not persist the session token"
            );
        }
    }

    // ------------------------------------------------------------------
    // Account surface
    // ------------------------------------------------------------------

    pub async fn create_account(&self, email: &str, password: &str) -> Result<Identity, ClientError> {
        self.post_json("/account", &CredentialsBody { email, password })
            .await
    }

    /// Opens a session and stores its token for all subsequent calls.
    pub async fn create_session(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let session: SessionCreated = self
            .post_json("/account/sessions", &CredentialsBody { email, password })
            .await?;
        self.set_session_token(Some(session.token));
        Ok(())
    }

    pub async fn current_account(&self) -> Result<Identity, ClientError> {
        let url = format!("{}/account", self.base_url);
        let response = self.client.get(url).headers(self.headers()).send().await?;
        parse_response(response).await
    }

    /// Revokes the current session server-side. Does not clear the local
    /// token; callers decide what a failed revocation means.
    pub async fn delete_session(&self) -> Result<(), ClientError> {
        let url = format!("{}/account/sessions/current", self.base_url);
        let response = self.client.delete(url).headers(self.headers()).send().await?;
        expect_no_content(response).await
    }

    // ------------------------------------------------------------------
    // Document surface
    // ------------------------------------------------------------------

    pub async fn list_documents<T>(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<DocumentList<T>, ClientError>
    where
        T: DeserializeOwned,
    {
        let url = format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url, database_id, collection_id
        );
        let mut request = self.client.get(url).headers(self.headers());
        for query in queries {
            request = request.query(&[("queries[]", query.encode()?)]);
        }
        let response = request.send().await?;
        parse_response(response).await
    }

    pub async fn create_document<T, D>(
        &self,
        database_id: &str,
        collection_id: &str,
        data: &D,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        D: Serialize,
    {
        let path = format!(
            "/databases/{}/collections/{}/documents",
            database_id, collection_id
        );
        self.post_json(
            &path,
            &CreateDocumentBody {
                document_id: SERVER_ASSIGNED_ID,
                data,
            },
        )
        .await
    }

    pub async fn update_document<T, D>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &D,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        D: Serialize,
    {
        let url = format!(
            "{}/databases/{}/collections/{}/documents/{}",
            self.base_url, database_id, collection_id, document_id
        );
        let response = self
            .client
            .patch(url)
            .headers(self.headers())
            .json(&UpdateDocumentBody { data })
            .send()
            .await?;
        parse_response(response).await
    }

    pub async fn delete_document(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<(), ClientError> {
        let url = format!(
            "{}/databases/{}/collections/{}/documents/{}",
            self.base_url, database_id, collection_id, document_id
        );
        let response = self.client.delete(url).headers(self.headers()).send().await?;
        expect_no_content(response).await
    }

    // ------------------------------------------------------------------
    // Realtime surface
    // ------------------------------------------------------------------

    /// URL for the realtime socket carrying project, session, and channel
    /// selection as query parameters.
    pub(crate) fn realtime_url(&self, channels: &[String]) -> String {
        let mut url = format!("{}?project={}", self.ws_url, self.project_id);
        if let Some(token) = self.session_token() {
            url.push_str("&session=");
            url.push_str(&token);
        }
        for channel in channels {
            url.push_str("&channels[]=");
            url.push_str(channel);
        }
        url
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(PROJECT_HEADER),
            HeaderValue::from_str(&self.project_id)
                .unwrap_or_else(|_| HeaderValue::from_static("")),
        );
        if let Some(token) = self.session_token() {
            headers.insert(
                HeaderName::from_static(SESSION_HEADER),
                HeaderValue::from_str(&token).unwrap_or_else(|_| HeaderValue::from_static("")),
            );
        }
        headers
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(url)
            .headers(self.headers())
            .json(body)
            .send()
            .await?;
        parse_response(response).await
    }
}

async fn parse_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json::<T>().await?)
    } else {
        Err(error_from_failure(status, response.text().await?))
    }
}

async fn expect_no_content(response: reqwest::Response) -> Result<(), ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    Err(error_from_failure(status, response.text().await?))
}

fn error_from_failure(status: reqwest::StatusCode, text: String) -> ClientError {
    if let Ok(body) = serde_json::from_str::<ErrorBody>(&text) {
        return ClientError::Backend {
            code: body.code,
            kind: body.kind,
            message: body.message,
        };
    }
    ClientError::InvalidResponse(format!("HTTP {}: {}", status.as_u16(), text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;
    use std::path::Path;

    fn test_config(dir: &Path) -> BackendConfig {
        BackendConfig {
            endpoint: "https://backend.example.com/v1/".to_string(),
            ws_endpoint: "wss://backend.example.com/v1/realtime/".to_string(),
            project_id: "ritual".to_string(),
            database_id: "db".to_string(),
            habits_collection_id: "habits".to_string(),
            completions_collection_id: "completions".to_string(),
            session_path: dir.join("session.json"),
            request_timeout_ms: 2_000,
        }
    }

    #[test]
    fn trailing_slash_is_trimmed_from_endpoints() {
        let dir = tempfile::tempdir().unwrap();
        let client = BackendClient::new(&test_config(dir.path())).unwrap();
        let url = client.realtime_url(&[]);
        assert!(url.starts_with("wss://backend.example.com/v1/realtime?project=ritual"));
    }

    #[test]
    fn realtime_url_carries_session_and_channels() {
        let dir = tempfile::tempdir().unwrap();
        let client = BackendClient::new(&test_config(dir.path())).unwrap();
        client.set_session_token(Some("tok-1".to_string()));
        let channels = vec![
            "databases.db.collections.habits.documents".to_string(),
            "databases.db.collections.completions.documents".to_string(),
        ];
        let url = client.realtime_url(&channels);
        assert!(url.contains("session=tok-1"));
        assert!(url.contains("&channels[]=databases.db.collections.habits.documents"));
        assert!(url.contains("&channels[]=databases.db.collections.completions.documents"));
    }

    #[test]
    fn stored_token_is_picked_up_on_construction() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        TokenStore::new(config.session_path.clone())
            .save("tok-persisted")
            .unwrap();
        let client = BackendClient::new(&config).unwrap();
        assert!(client.has_session());
        assert_eq!(client.session_token().as_deref(), Some("tok-persisted"));
    }

    #[test]
    fn clear_session_removes_memory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let client = BackendClient::new(&config).unwrap();
        client.set_session_token(Some("tok-1".to_string()));
        assert!(config.session_path.exists());
        client.clear_session();
        assert!(!client.has_session());
        assert!(!config.session_path.exists());
    }

    #[test]
    fn failure_body_decodes_into_backend_error() {
        let err = error_from_failure(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"code":401,"type":"user_invalid_credentials","message":"Invalid credentials. Please check the email and password."}"#
                .to_string(),
        );
        assert_eq!(
            err.to_string(),
            "Invalid credentials. Please check the email and password."
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn undecodable_failure_falls_back_to_status_and_text() {
        let err = error_from_failure(reqwest::StatusCode::BAD_GATEWAY, "<html>".to_string());
        assert_eq!(err.to_string(), "Unexpected response: HTTP 502: <html>");
    }

    #[test]
    fn not_found_predicate_matches_backend_404_only() {
        let missing = error_from_failure(
            reqwest::StatusCode::NOT_FOUND,
            r#"{"code":404,"type":"document_not_found","message":"Document with the requested ID could not be found."}"#
                .to_string(),
        );
        assert!(missing.is_not_found());
    }
}
