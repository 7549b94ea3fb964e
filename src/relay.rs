//! Handles the persistent WebSocket connection and webhook forwarding.

use crate::{config::Config, session::SessionDescriptor};
use anyhow::{Context, Result};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use tokio_tungstenite::{
    connect_async,
    tungstenite::{client::IntoClientRequest, protocol::Message},
};
use tracing::{debug, error, info, warn};

/// One parsed message from the stream. Only the conversational item kind is
/// acted upon; everything else is discarded.
#[derive(Deserialize, Debug)]
#[serde(tag = "type")]
pub enum InboundEvent {
    #[serde(rename = "conversation.item")]
    ConversationItem { text: Option<String> },
    #[serde(other)]
    Other,
}

/// The payload posted to the callback URL, one per conversational item.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ForwardedRecord {
    pub text: String,
    /// Wall-clock receipt time, milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Runs the relay loop until the connection closes.
///
/// Connects to the session's streaming URI, then reads frames sequentially.
/// Each matching frame dispatches an independent forwarding task, so forwards
/// overlap with reading and with each other; their failures never touch the
/// connection. The loop ends on a close frame or a transport error, and the
/// connection is never reestablished.
pub async fn run(
    config: &Config,
    descriptor: &SessionDescriptor,
    http: reqwest::Client,
) -> Result<()> {
    let mut request = descriptor.target.uri().into_client_request()?;
    request.headers_mut().insert(
        "api-key",
        config
            .api_key
            .parse()
            .context("API key is not a valid header value")?,
    );

    let (mut stream, _) = connect_async(request)
        .await
        .context("Failed to open the realtime WebSocket")?;
    info!(uri = %descriptor.target.uri(), "WebSocket connected");
    // Extension point: an initial conversation.item.create could be sent here
    // to open the dialogue; the relay is currently listen-only.

    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Text(text)) => handle_frame(&text, config, &http),
            Ok(Message::Binary(bytes)) => {
                if let Ok(text) = std::str::from_utf8(&bytes) {
                    handle_frame(text, config, &http);
                }
            }
            Ok(Message::Close(close)) => {
                match close {
                    Some(frame) => {
                        info!(code = u16::from(frame.code), reason = %frame.reason, "WebSocket closed")
                    }
                    None => info!("WebSocket closed"),
                }
                break;
            }
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, "WebSocket transport error");
                break;
            }
        }
    }

    Ok(())
}

/// Classifies one raw frame and dispatches forwarding for conversation items.
/// Frames that are not JSON, or not a known event, are dropped without
/// surfacing an error.
fn handle_frame(raw: &str, config: &Config, http: &reqwest::Client) {
    let Ok(event) = serde_json::from_str::<InboundEvent>(raw) else {
        return;
    };
    match event {
        InboundEvent::ConversationItem { text: Some(text) } => {
            let record = ForwardedRecord {
                text,
                timestamp: chrono::Utc::now().timestamp_millis(),
            };
            info!(text = %record.text, "conversation item received");
            let http = http.clone();
            let callback_url = config.callback_url.clone();
            tokio::spawn(forward(http, callback_url, record));
        }
        InboundEvent::ConversationItem { text: None } => {
            debug!("conversation item without text; dropped");
        }
        InboundEvent::Other => {}
    }
}

/// Posts one record to the callback URL. Best-effort: failures are logged and
/// never retried.
async fn forward(http: reqwest::Client, callback_url: String, record: ForwardedRecord) {
    match http.post(&callback_url).json(&record).send().await {
        Ok(response) if !response.status().is_success() => {
            warn!(status = %response.status(), "callback rejected the forwarded record");
        }
        Ok(_) => {}
        Err(e) => {
            warn!(error = %e, "callback POST failed");
        }
    }
}
