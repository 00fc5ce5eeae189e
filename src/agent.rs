//! Agent backend gateway
//!
//! Thin request/response client for the remote content builder agent. One
//! user submission maps to exactly one `POST /run_agent` call: no retries,
//! no deduplication, no idempotency guarantee. The remote service owns all
//! file writes; this client only carries text and metadata back.

use crate::config::BackendConfig;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Upper bound on a single agent round trip. Content generation is slow,
/// so this is generous; exceeding it is reported like any other failure.
pub const AGENT_TIMEOUT: Duration = Duration::from_secs(300);

/// Request body for `POST /run_agent`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRequest {
    /// Opaque conversation identifier
    pub thread_id: String,
    /// The user's task text
    pub user_input: String,
}

/// Structured response from the agent backend.
///
/// Every field is optional by contract; the backend may omit any of them
/// and may include fields this console does not know about (kept in
/// `extra`). Nothing here may be assumed present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentReply {
    /// Primary reply text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_text: Option<String>,

    /// Alternate reply text used by older backend builds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,

    /// Output platform tag, e.g. "linkedin", "blogs", "tweets"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// Slug the agent used when writing artifact files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Explicit relative paths per artifact kind, overriding the naming
    /// convention when present. The backend may send `null` here; that
    /// counts as empty, like every other absent field.
    #[serde(
        default,
        deserialize_with = "null_as_empty_map",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub files: HashMap<String, String>,

    /// Any backend fields this console does not model
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn null_as_empty_map<'de, D>(deserializer: D) -> std::result::Result<HashMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let map = Option::<HashMap<String, String>>::deserialize(deserializer)?;
    Ok(map.unwrap_or_default())
}

impl AgentReply {
    /// Displayable reply text: first non-empty of `final_text` and
    /// `response`, defaulting to the empty string.
    pub fn assistant_text(&self) -> String {
        self.final_text
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.response.as_deref().filter(|t| !t.is_empty()))
            .unwrap_or("")
            .to_string()
    }
}

/// Client for the agent backend
#[derive(Clone)]
pub struct AgentClient {
    http: reqwest::Client,
    backend: BackendConfig,
}

impl AgentClient {
    /// Create a new client against the given backend
    pub fn new(backend: BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            backend,
        }
    }

    /// Submit a task to the agent and block until it replies.
    ///
    /// Transport failures, non-success statuses, and timeouts all collapse
    /// into [`Error::Agent`]; callers surface the description as the
    /// assistant turn's content and do not distinguish between them.
    pub async fn submit(&self, thread_id: &str, user_input: &str) -> Result<AgentReply> {
        let url = self.backend.endpoint_url("/run_agent");
        let request = AgentRequest {
            thread_id: thread_id.to_string(),
            user_input: user_input.to_string(),
        };

        tracing::info!(%url, thread_id, "Submitting task to agent backend");

        let response = self
            .http
            .post(&url)
            .timeout(AGENT_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Agent(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::Agent(e.to_string()))?;

        let reply: AgentReply = response
            .json()
            .await
            .map_err(|e| Error::Agent(e.to_string()))?;

        tracing::debug!(
            platform = ?reply.platform,
            slug = ?reply.slug,
            files = reply.files.len(),
            "Agent reply received"
        );

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};

    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> AgentClient {
        AgentClient::new(BackendConfig {
            base_url,
            root_path: String::new(),
        })
    }

    #[test]
    fn test_assistant_text_prefers_final_text() {
        let reply = AgentReply {
            final_text: Some("primary".to_string()),
            response: Some("secondary".to_string()),
            ..AgentReply::default()
        };
        assert_eq!(reply.assistant_text(), "primary");
    }

    #[test]
    fn test_assistant_text_falls_back_past_empty_final_text() {
        let reply = AgentReply {
            final_text: Some(String::new()),
            response: Some("secondary".to_string()),
            ..AgentReply::default()
        };
        assert_eq!(reply.assistant_text(), "secondary");
    }

    #[test]
    fn test_assistant_text_defaults_to_empty() {
        assert_eq!(AgentReply::default().assistant_text(), "");
    }

    #[test]
    fn test_reply_tolerates_unknown_fields() {
        let reply: AgentReply = serde_json::from_str(
            r#"{"final_text": "Done", "run_id": 42, "platform": "linkedin"}"#,
        )
        .unwrap();
        assert_eq!(reply.assistant_text(), "Done");
        assert_eq!(reply.platform.as_deref(), Some("linkedin"));
        assert_eq!(reply.extra.get("run_id"), Some(&serde_json::json!(42)));
    }

    #[test]
    fn test_reply_tolerates_null_files() {
        let reply: AgentReply = serde_json::from_str(
            r#"{"final_text": "Done", "platform": "linkedin", "slug": "ai-agents", "files": null}"#,
        )
        .unwrap();
        assert_eq!(reply.assistant_text(), "Done");
        assert_eq!(reply.slug.as_deref(), Some("ai-agents"));
        assert!(reply.files.is_empty());
    }

    #[tokio::test]
    async fn test_submit_success() {
        let router = Router::new().route(
            "/run_agent",
            post(|Json(req): Json<AgentRequest>| async move {
                assert_eq!(req.user_input, "Write a blog post about AI agents");
                Json(serde_json::json!({
                    "final_text": "Done",
                    "platform": "blogs",
                    "slug": "ai-agents",
                    "files": {"markdown": "blogs/ai-agents/post.md"}
                }))
            }),
        );
        let base = spawn_stub(router).await;

        let reply = client_for(base)
            .submit("thread-1", "Write a blog post about AI agents")
            .await
            .unwrap();

        assert_eq!(reply.assistant_text(), "Done");
        assert_eq!(reply.platform.as_deref(), Some("blogs"));
        assert_eq!(
            reply.files.get("markdown").map(String::as_str),
            Some("blogs/ai-agents/post.md")
        );
    }

    #[tokio::test]
    async fn test_submit_non_success_status_is_agent_error() {
        let router = Router::new().route(
            "/run_agent",
            post(|| async { axum::http::StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = spawn_stub(router).await;

        let err = client_for(base).submit("thread-1", "task").await.unwrap_err();
        assert!(matches!(err, Error::Agent(_)));
    }

    #[tokio::test]
    async fn test_submit_transport_failure_is_agent_error() {
        // Nothing listens on this port.
        let err = client_for("http://127.0.0.1:1".to_string())
            .submit("thread-1", "task")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Agent(_)));
    }
}
