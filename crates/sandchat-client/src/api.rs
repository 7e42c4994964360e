//! HTTP implementation of the conversational backend port.
//!
//! Speaks the backend's JSON envelope over four endpoints: `POST /chat`
//! (which also carries the reserved `/clear` control message),
//! `POST /chat/approve`, `POST /chat/reject`, and `GET /summary`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use sandchat_core::envelope::{ChatRequest, ChatResponse, SessionRequest, SummaryReport};
use sandchat_core::view::ChatBackend;
use sandchat_core::{Result, SandchatError};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::session::SessionIdentity;

/// Reqwest-backed client for the assistant backend.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    session_id: String,
    timeout: Duration,
}

impl BackendClient {
    /// Creates a client bound to one session identity.
    pub fn new(config: &ClientConfig, session: &SessionIdentity) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session_id: session.token().to_string(),
            timeout: config.request_timeout(),
        }
    }

    /// The session token this client sends on every request.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(target: "backend", "POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SandchatError::transport(format!("POST {path} failed: {e}")))?;

        Self::read_json(response).await
    }

    async fn get_json<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(target: "backend", "GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SandchatError::transport(format!("GET {path} failed: {e}")))?;

        Self::read_json(response).await
    }

    async fn read_json<R>(response: reqwest::Response) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SandchatError::http(status.as_u16(), body));
        }

        response.json::<R>().await.map_err(|e| {
            SandchatError::Serialization {
                format: "JSON".to_string(),
                message: format!("Failed to parse backend response: {e}"),
            }
        })
    }
}

#[async_trait]
impl ChatBackend for BackendClient {
    async fn chat(&self, message: &str) -> Result<ChatResponse> {
        let body = ChatRequest {
            session_id: self.session_id.clone(),
            message: message.to_string(),
        };
        self.post_json("/chat", &body).await
    }

    async fn approve(&self) -> Result<ChatResponse> {
        let body = SessionRequest {
            session_id: self.session_id.clone(),
        };
        self.post_json("/chat/approve", &body).await
    }

    async fn reject(&self) -> Result<ChatResponse> {
        let body = SessionRequest {
            session_id: self.session_id.clone(),
        };
        self.post_json("/chat/reject", &body).await
    }

    async fn summary(&self) -> Result<SummaryReport> {
        self.get_json("/summary").await
    }
}
