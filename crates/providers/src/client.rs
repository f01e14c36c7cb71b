//! Bounded client for the OpenAI `/responses` endpoint.
//!
//! One call, one outcome: every [`ResponsesClient::invoke`] yields exactly
//! one [`InvocationOutcome`]. The request is raced against a [`Deadline`];
//! the body is read inside the race so a stalled body still times out.
//! No retries.

use crate::deadline::{Deadline, Raced};
use crate::request::RequestPayload;
use second_opinion_core::error::ProviderError;
use second_opinion_core::provider::InvocationOutcome;
use std::time::Duration;
use tracing::{debug, warn};

/// Sends [`RequestPayload`]s to `{base_url}/responses` with bearer auth.
pub struct ResponsesClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl ResponsesClient {
    /// Create a client for an OpenAI-compatible base URL.
    ///
    /// The HTTP client carries no timeout of its own; deadlines are applied
    /// per call by [`invoke`](Self::invoke).
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ProviderError::ClientBuild(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/responses", self.base_url)
    }

    /// Perform one call bounded by `timeout`.
    pub async fn invoke(&self, payload: &RequestPayload, timeout: Duration) -> InvocationOutcome {
        self.invoke_within(payload, Deadline::arm(timeout)).await
    }

    async fn invoke_within(
        &self,
        payload: &RequestPayload,
        deadline: Deadline,
    ) -> InvocationOutcome {
        let after_ms = deadline.after().as_millis() as u64;
        debug!(model = %payload.model, timeout_ms = after_ms, "Sending responses request");

        match deadline.race(self.send(payload)).await {
            Raced::Completed(outcome) => outcome,
            Raced::Expired => {
                warn!(timeout_ms = after_ms, "Responses request timed out");
                InvocationOutcome::Timeout { after_ms }
            }
        }
    }

    async fn send(&self, payload: &RequestPayload) -> InvocationOutcome {
        let response = match self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return transport_error(&e),
        };

        let status = response.status();

        // Read the whole body before reporting, success or not.
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return transport_error(&e),
        };

        if status.is_success() {
            debug!(status = status.as_u16(), bytes = body.len(), "Responses request succeeded");
            InvocationOutcome::Success(body)
        } else {
            warn!(status = status.as_u16(), body = %body, "Provider returned error");
            InvocationOutcome::HttpFailure {
                status: status.as_u16(),
                body,
            }
        }
    }
}

impl std::fmt::Debug for ResponsesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponsesClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Flatten a reqwest error and its sources into one message.
fn transport_error(err: &reqwest::Error) -> InvocationOutcome {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    warn!(error = %message, "Responses request failed");
    InvocationOutcome::TransportError(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LONG: Duration = Duration::from_secs(30);

    fn client_for(server: &MockServer) -> ResponsesClient {
        ResponsesClient::new(format!("{}/v1", server.uri()), "sk-test").unwrap()
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = ResponsesClient::new("http://localhost:8080/v1/", "k").unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/responses");
    }

    #[test]
    fn debug_redacts_api_key() {
        let client = ResponsesClient::new("http://localhost", "sk-secret").unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("sk-secret"));
    }

    #[tokio::test]
    async fn success_returns_raw_body() {
        let server = MockServer::start().await;
        let payload = RequestPayload::build("gpt-test", "hello");

        Mock::given(method("POST"))
            .and(path("/v1/responses"))
            .and(header("authorization", "Bearer sk-test"))
            .and(header("content-type", "application/json"))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"output_text":"hi"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server).invoke(&payload, LONG).await;
        assert_eq!(outcome, InvocationOutcome::Success(r#"{"output_text":"hi"}"#.into()));
    }

    #[tokio::test]
    async fn non_2xx_reports_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/responses"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"error":{"message":"bad key"}}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .invoke(&RequestPayload::build("m", "p"), LONG)
            .await;
        assert_eq!(
            outcome,
            InvocationOutcome::HttpFailure {
                status: 401,
                body: r#"{"error":{"message":"bad key"}}"#.into(),
            }
        );
    }

    #[tokio::test]
    async fn server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .invoke(&RequestPayload::build("m", "p"), LONG)
            .await;
        assert!(matches!(outcome, InvocationOutcome::HttpFailure { status: 503, .. }));
    }

    #[tokio::test]
    async fn slow_service_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"output_text":"too late"}"#)
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let outcome = client_for(&server)
            .invoke(&RequestPayload::build("m", "p"), Duration::from_millis(100))
            .await;
        assert_eq!(outcome, InvocationOutcome::Timeout { after_ms: 100 });
    }

    #[tokio::test]
    async fn http_failure_disarms_the_deadline() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let deadline = Deadline::arm(Duration::from_millis(200));
        let token = deadline.token().clone();

        let outcome = client_for(&server)
            .invoke_within(&RequestPayload::build("m", "p"), deadline)
            .await;
        assert!(matches!(outcome, InvocationOutcome::HttpFailure { status: 500, .. }));

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(!token.is_cancelled());
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let client = ResponsesClient::new("http://127.0.0.1:1/v1", "sk-test").unwrap();
        let outcome = client
            .invoke(&RequestPayload::build("m", "p"), Duration::from_secs(10))
            .await;
        match outcome {
            InvocationOutcome::TransportError(message) => assert!(!message.is_empty()),
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}
