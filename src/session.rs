//! One-shot realtime session creation against the service's HTTP surface.

use crate::config::Config;
use serde::Deserialize;

/// API version pinned for the session-creation call.
pub const API_VERSION: &str = "2024-10-01-preview";

/// A failure while creating the realtime session. All variants are fatal to
/// the process; there is no retry.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The service answered with a non-2xx status.
    #[error("session request failed: {status} {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    /// The request never produced a usable response (connect, timeout, or a
    /// body that is not valid JSON).
    #[error("session request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// A 2xx response that carries neither a session token nor a streaming
    /// URI, leaving no way to open the stream.
    #[error("session response carried neither sessionToken nor websocketUri")]
    Incomplete,
}

/// Response body of the session-creation call. Both fields are optional on
/// the wire; at least one must be present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    session_token: Option<String>,
    websocket_uri: Option<String>,
}

/// Where the relay should connect, resolved exactly once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamTarget {
    /// The service named the streaming URI explicitly; used verbatim.
    Provided(String),
    /// No URI in the response; derived from the base endpoint and token.
    Derived(String),
}

impl StreamTarget {
    pub fn uri(&self) -> &str {
        match self {
            Self::Provided(uri) | Self::Derived(uri) => uri,
        }
    }
}

/// The session obtained at startup. Read-only for the process lifetime and
/// never refreshed.
#[derive(Debug, Clone)]
pub struct SessionDescriptor {
    pub session_token: Option<String>,
    pub target: StreamTarget,
}

/// Creates the realtime session with a single POST.
///
/// Issues `POST {endpoint}/openai/realtime/chat/sessions` with the deployment
/// in both the query string and the JSON body, authenticated via the
/// `api-key` header. Any non-2xx answer is returned as [`SessionError::Status`]
/// carrying the status and body text.
pub async fn create_session(
    http: &reqwest::Client,
    config: &Config,
) -> Result<SessionDescriptor, SessionError> {
    let url = format!(
        "{}/openai/realtime/chat/sessions?api-version={}&deployment={}",
        config.endpoint, API_VERSION, config.deployment
    );
    let response = http
        .post(&url)
        .header("api-key", &config.api_key)
        .json(&serde_json::json!({ "model": config.deployment }))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SessionError::Status { status, body });
    }

    let SessionResponse {
        session_token,
        websocket_uri,
    } = response.json().await?;

    let target = match (websocket_uri, session_token.as_deref()) {
        (Some(uri), _) => StreamTarget::Provided(uri),
        (None, Some(token)) => StreamTarget::Derived(derive_stream_uri(
            &config.endpoint,
            token,
            &config.deployment,
        )),
        (None, None) => return Err(SessionError::Incomplete),
    };

    Ok(SessionDescriptor {
        session_token,
        target,
    })
}

/// Derives the streaming URI when the session response omits one.
///
/// The leading `http` of the base endpoint is rewritten to `ws`, so `https`
/// becomes `wss`; an endpoint with any other scheme is left untouched.
pub fn derive_stream_uri(endpoint: &str, token: &str, deployment: &str) -> String {
    let base = match endpoint.strip_prefix("http") {
        Some(rest) => format!("ws{rest}"),
        None => endpoint.to_string(),
    };
    format!("{base}/openai/realtime?sessionToken={token}&deployment={deployment}")
}
