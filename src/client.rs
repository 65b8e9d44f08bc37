//! Debate API client for backend communication.
//!
//! Submits a debate with `POST /start-debate` and exposes the response body
//! as a stream of typed [`DebateEvent`]s, decoded incrementally as chunks
//! arrive.

use std::pin::Pin;
use std::sync::Arc;

use futures_util::stream::Stream;
use futures_util::StreamExt;
use tracing::debug;

use crate::adapters::ReqwestHttpClient;
use crate::config::{DebateConfig, DEFAULT_BASE_URL};
use crate::error::{DebateError, DebateResult};
use crate::models::DebateRequest;
use crate::sse::{self, DebateEvent};
use crate::traits::{Headers, HttpClient};

/// Events of one debate, in arrival order. The first error ends it.
pub type DebateEventStream = Pin<Box<dyn Stream<Item = DebateResult<DebateEvent>> + Send>>;

/// Client for the debate backend.
#[derive(Clone)]
pub struct DebateClient {
    /// Base URL for the debate API
    pub base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for DebateClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebateClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl DebateClient {
    /// Create a client for the default local backend.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client for a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_http_client(base_url, Arc::new(ReqwestHttpClient::new()))
    }

    /// Create a client over any [`HttpClient`], typically a mock in tests.
    pub fn with_http_client(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn from_config(config: &DebateConfig) -> Self {
        Self::with_base_url(config.base_url.clone())
    }

    /// Submit a debate and stream its events.
    ///
    /// Fails before any event when the backend is unreachable or answers
    /// with a non-success status. Malformed frames are skipped; a body read
    /// failure is yielded as the last item.
    pub async fn start_debate(&self, request: &DebateRequest) -> DebateResult<DebateEventStream> {
        let url = format!("{}/start-debate", self.base_url);
        let body = serde_json::to_string(request)
            .map_err(|e| DebateError::InvalidRequest(e.to_string()))?;

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "text/event-stream".to_string());

        debug!(
            url = %url,
            confidence_target = request.confidence_target(),
            max_rounds = ?request.max_rounds(),
            "submitting debate"
        );
        let chunks = self.http.post_stream(&url, &body, &headers).await?;

        let chunks = chunks.map(|chunk| chunk.map_err(DebateError::from));
        let events = sse::events(sse::frames(chunks));

        Ok(Box::pin(events))
    }

    /// Check if the debate API is reachable.
    ///
    /// Returns `true` on a 2xx answer from `/health`.
    pub async fn health_check(&self) -> DebateResult<bool> {
        let url = format!("{}/health", self.base_url);
        let response = self.http.get(&url, &Headers::new()).await?;
        Ok(response.is_success())
    }
}

impl Default for DebateClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::sse::{Agent, EventType};
    use crate::traits::{HttpError, Response};
    use bytes::Bytes;

    const BASE: &str = "http://debate.test";
    const START: &str = "http://debate.test/start-debate";

    fn client(mock: &MockHttpClient) -> DebateClient {
        DebateClient::with_http_client(format!("{}/", BASE), Arc::new(mock.clone()))
    }

    fn request() -> DebateRequest {
        DebateRequest::new("Should remote work be the default?", 85).unwrap()
    }

    fn body(events: &[DebateEvent]) -> String {
        events.iter().map(|e| e.to_frame().unwrap()).collect()
    }

    #[tokio::test]
    async fn test_start_debate_sends_json_request() {
        let mock = MockHttpClient::new();
        mock.set_response(START, MockResponse::Stream(vec![]));

        let events: Vec<_> = client(&mock)
            .start_debate(&request().with_max_rounds(3).unwrap())
            .await
            .unwrap()
            .collect()
            .await;
        assert!(events.is_empty());

        let requests = mock.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].url, START);
        assert_eq!(
            requests[0].headers.get("Accept").map(String::as_str),
            Some("text/event-stream")
        );
        let sent: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(
            sent,
            serde_json::json!({
                "prompt": "Should remote work be the default?",
                "confidence_target": 85,
                "max_rounds": 3
            })
        );
    }

    #[tokio::test]
    async fn test_events_survive_arbitrary_chunking() {
        let text = body(&[
            DebateEvent::round_start(1),
            DebateEvent::agent_thinking(1, Agent::CentreLeft),
            DebateEvent::agent_response(1, Agent::CentreLeft, "Invest in transit."),
        ]);
        let mock = MockHttpClient::new();
        mock.set_response(START, MockResponse::chunked(&text, &[3, 17, 40, 41, 90]));

        let events: Vec<DebateEvent> = client(&mock)
            .start_debate(&request())
            .await
            .unwrap()
            .map(|event| event.unwrap())
            .collect()
            .await;

        let kinds: Vec<EventType> = events.iter().map(|e| e.event_type).collect();
        assert_eq!(
            kinds,
            vec![
                EventType::RoundStart,
                EventType::AgentThinking,
                EventType::AgentResponse
            ]
        );
        assert_eq!(events[2].content.as_deref(), Some("Invest in transit."));
    }

    #[tokio::test]
    async fn test_malformed_frames_are_skipped() {
        let text = format!(
            "data: {{not json\n\n: keep-alive\n\n{}",
            DebateEvent::round_start(2).to_frame().unwrap()
        );
        let mock = MockHttpClient::new();
        mock.set_response(START, MockResponse::chunked(&text, &[]));

        let events: Vec<_> = client(&mock)
            .start_debate(&request())
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].as_ref().unwrap().round_number, Some(2));
    }

    #[tokio::test]
    async fn test_non_success_status_fails_before_events() {
        let mock = MockHttpClient::new();
        mock.set_response(
            START,
            MockResponse::Success(Response::new(503, Bytes::from("overloaded"))),
        );

        let result = client(&mock).start_debate(&request()).await;
        match result {
            Err(err) => {
                assert_eq!(err.status(), Some(503));
                assert_eq!(err.user_message(), "Request failed (503)");
            }
            Ok(_) => panic!("Expected transport error"),
        }
    }

    #[tokio::test]
    async fn test_mid_stream_failure_is_last_item() {
        let mock = MockHttpClient::new();
        mock.set_response(
            START,
            MockResponse::StreamThenError(
                vec![Bytes::from(DebateEvent::round_start(1).to_frame().unwrap())],
                HttpError::Io("connection reset".to_string()),
            ),
        );

        let events: Vec<_> = client(&mock)
            .start_debate(&request())
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(events.len(), 2);
        assert!(events[0].is_ok());
        assert_eq!(
            events[1],
            Err(DebateError::Stream("connection reset".to_string()))
        );
    }

    #[tokio::test]
    async fn test_connection_failure() {
        let mock = MockHttpClient::new();
        mock.set_response(
            START,
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );

        let result = client(&mock).start_debate(&request()).await;
        assert!(matches!(result, Err(DebateError::Connection(_))));
    }

    #[tokio::test]
    async fn test_health_check() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://debate.test/health",
            MockResponse::Success(Response::new(200, Bytes::from(r#"{"status":"healthy"}"#))),
        );
        assert!(client(&mock).health_check().await.unwrap());

        mock.set_response(
            "http://debate.test/health",
            MockResponse::Success(Response::new(500, Bytes::new())),
        );
        assert!(!client(&mock).health_check().await.unwrap());
    }
}
