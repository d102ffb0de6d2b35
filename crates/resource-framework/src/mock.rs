//! # Mock Transport & Testing Guide
//!
//! `MockTransport` implements [`Transport`] entirely in memory. Tests register the
//! requests they expect and the JSON (or error) each one returns, then run a real
//! [`CollectionController`](crate::CollectionController) against it. Nothing touches the
//! network, so list reconciliation, statistics and notice timing can be asserted exactly.
//!
//! ## When to use the Mock vs the HTTP Transport
//!
//! | Feature | MockTransport | HttpTransport |
//! |---------|---------------|---------------|
//! | **Speed** | Instant (in-memory) | Network bound |
//! | **Determinism** | Deterministic, optional per-request delay | Subject to the server |
//! | **Error Injection** | Easy (`return_err`, error bodies) | Requires a misbehaving server |
//! | **Use Case** | Controller and screen logic | End-to-end against a real backend |
//!
//! ## Matching
//!
//! A request consumes the first registered expectation with the same method and path
//! (and the same query, when the expectation names one). Expectations may therefore be
//! registered in any order, which matters when several requests are in flight at once.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mock = MockTransport::new();
//! mock.expect(Method::Get, "syndic/charges/")
//!     .return_json(json!({ "success": true, "data": [] }));
//!
//! let (controller, client) = CollectionController::<Charge>::new(ControllerConfig::default());
//! tokio::spawn(controller.run(mock.transport()));
//! client.fetch(None).await?;
//!
//! mock.verify(); // every expectation used, no unexpected requests
//! ```
//!
//! ## Simulating Slow Responses
//!
//! `delay` holds a response back for the given duration. Combined with
//! `#[tokio::test(start_paused = true)]` this reproduces out-of-order arrivals (a slow
//! fetch answering after a fast one) without real waiting.

use crate::error::ApiError;
use crate::transport::{ApiRequest, Method, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct Expectation {
    method: Method,
    path: String,
    query: Option<Vec<(String, String)>>,
    delay: Option<Duration>,
    response: Result<Value, ApiError>,
}

impl Expectation {
    fn matches(&self, request: &ApiRequest) -> bool {
        self.method == request.method
            && self.path == request.path
            && self
                .query
                .as_ref()
                .map_or(true, |query| query == &request.query)
    }
}

#[derive(Default)]
struct MockState {
    expectations: Vec<Expectation>,
    received: Vec<ApiRequest>,
    unexpected: Vec<ApiRequest>,
}

/// An in-memory transport with expectation tracking.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A shared handle suitable for [`CollectionController::run`](crate::CollectionController::run).
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::new(self.clone())
    }

    /// Expects one request with `method` on `path`.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            state: self.state.clone(),
            method,
            path: path.into(),
            query: None,
            delay: None,
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().received.clone()
    }

    /// Verifies that all expectations were met and nothing unexpected was requested.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.unexpected.is_empty() {
            let unexpected: Vec<String> = state
                .unexpected
                .iter()
                .map(|r| format!("{} {}", r.method, r.path))
                .collect();
            panic!("Unexpected requests: {}", unexpected.join(", "));
        }
        if !state.expectations.is_empty() {
            let remaining: Vec<String> = state
                .expectations
                .iter()
                .map(|e| format!("{} {}", e.method, e.path))
                .collect();
            panic!(
                "Not all expectations were met. {} remaining: {}",
                remaining.len(),
                remaining.join(", ")
            );
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let expectation = {
            let mut state = self.state.lock().unwrap();
            state.received.push(request.clone());
            match state.expectations.iter().position(|e| e.matches(&request)) {
                Some(index) => Some(state.expectations.remove(index)),
                None => {
                    state.unexpected.push(request.clone());
                    None
                }
            }
        };

        let Some(expectation) = expectation else {
            return Err(ApiError::Transport(format!(
                "unexpected request: {} {}",
                request.method, request.path
            )));
        };
        if let Some(delay) = expectation.delay {
            tokio::time::sleep(delay).await;
        }
        expectation.response
    }
}

/// Builder for a single expected request.
pub struct ExpectationBuilder {
    state: Arc<Mutex<MockState>>,
    method: Method,
    path: String,
    query: Option<Vec<(String, String)>>,
    delay: Option<Duration>,
}

impl ExpectationBuilder {
    /// Only match requests with exactly these query parameters.
    pub fn with_query(mut self, query: &[(&str, &str)]) -> Self {
        self.query = Some(
            query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self
    }

    /// Hold the response back for `delay`.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the expectation to return a successful JSON body.
    pub fn return_json(self, body: Value) {
        self.push(Ok(body));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Value, ApiError>) {
        let mut state = self.state.lock().unwrap();
        state.expectations.push(Expectation {
            method: self.method,
            path: self.path,
            query: self.query,
            delay: self.delay,
            response,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_matches_by_method_path_and_query() {
        let mock = MockTransport::new();
        mock.expect(Method::Get, "items/")
            .with_query(&[("status", "PAID")])
            .return_json(json!(["paid"]));
        mock.expect(Method::Get, "items/").return_json(json!(["any"]));

        let any = mock.send(ApiRequest::get("items/")).await.unwrap();
        assert_eq!(any, json!(["any"]));

        let paid = mock
            .send(ApiRequest::get("items/").with_query(vec![("status".into(), "PAID".into())]))
            .await
            .unwrap();
        assert_eq!(paid, json!(["paid"]));

        assert_eq!(mock.requests().len(), 2);
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected requests")]
    async fn test_unexpected_request_fails_verify() {
        let mock = MockTransport::new();
        let result = mock.send(ApiRequest::delete("items/1/")).await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_unused_expectation_fails_verify() {
        let mock = MockTransport::new();
        mock.expect(Method::Post, "items/").return_json(json!({}));
        mock.verify();
    }
}
