//! Request client for the brief backend
//!
//! Every call resolves the backend address, sends JSON with shared headers and
//! maps non-success statuses to [`ClientError::Api`]. A transport failure is
//! treated as a stale connection: the cached address is dropped, resolved
//! again, and the call is retried exactly once.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::connection::ConnectionResolver;
use crate::error::ClientError;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::types::{BriefResponse, ErrorBody, StreakResponse};

const CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// A call against an API endpoint, relative to the resolved base address
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: String,
    pub body: Option<serde_json::Value>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            endpoint: endpoint.into(),
            body: None,
            headers: Vec::new(),
        }
    }

    /// POST with an empty JSON object body
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            endpoint: endpoint.into(),
            body: Some(serde_json::json!({})),
            headers: Vec::new(),
        }
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Shared headers merged with the caller's; the caller wins on a name clash
    fn merged_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![(CONTENT_TYPE.0.to_string(), CONTENT_TYPE.1.to_string())];
        for (name, value) in &self.headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            headers.push((name.clone(), value.clone()));
        }
        headers
    }

    fn to_http(&self, base_address: &str) -> HttpRequest {
        HttpRequest {
            method: self.method,
            url: format!("{}{}", base_address, self.endpoint),
            headers: self.merged_headers(),
            body: self.body.clone(),
            timeout: None,
        }
    }
}

/// Outcome of a connection check, for operator-facing settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionReport {
    pub success: bool,
    pub url: Option<String>,
    pub error: Option<String>,
}

impl ConnectionReport {
    fn from_result(result: Result<String, ClientError>) -> Self {
        match result {
            Ok(url) => Self {
                success: true,
                url: Some(url),
                error: None,
            },
            Err(e) => Self {
                success: false,
                url: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Client for the brief backend
#[derive(Clone)]
pub struct RequestClient {
    resolver: Arc<ConnectionResolver>,
    transport: Arc<dyn Transport>,
}

impl RequestClient {
    pub fn new(resolver: Arc<ConnectionResolver>, transport: Arc<dyn Transport>) -> Self {
        debug!("RequestClient::new: called");
        Self { resolver, transport }
    }

    pub fn resolver(&self) -> &Arc<ConnectionResolver> {
        &self.resolver
    }

    /// Send a request and return the decoded JSON body
    pub async fn call(&self, request: ApiRequest) -> Result<serde_json::Value, ClientError> {
        debug!(method = %request.method, endpoint = %request.endpoint, "call: called");
        let base = self.resolver.resolve().await?;

        match self.transport.send(request.to_http(&base)).await {
            Ok(response) => Self::decode(response),
            Err(e) if e.is_transport() => {
                warn!(endpoint = %request.endpoint, error = %e, "Connection lost, trying to reconnect");
                self.retry(&request).await
            }
            Err(e) => Err(e),
        }
    }

    /// Re-resolve once and resend once
    async fn retry(&self, request: &ApiRequest) -> Result<serde_json::Value, ClientError> {
        debug!(endpoint = %request.endpoint, "retry: called");
        self.resolver.invalidate().await;
        let base = self.resolver.resolve().await?;

        match self.transport.send(request.to_http(&base)).await {
            Ok(response) => {
                info!(endpoint = %request.endpoint, "Reconnected to backend");
                Self::decode(response)
            }
            Err(e) => {
                warn!(endpoint = %request.endpoint, error = %e, "retry: failed");
                if e.is_transport() {
                    self.resolver.invalidate().await;
                }
                Err(e)
            }
        }
    }

    fn decode(response: HttpResponse) -> Result<serde_json::Value, ClientError> {
        if !response.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| format!("HTTP error! status: {}", response.status));
            debug!(status = response.status, %message, "decode: API error");
            return Err(ClientError::Api {
                status: response.status,
                message,
            });
        }

        serde_json::from_str(&response.body)
            .map_err(|e| ClientError::InvalidResponse(format!("Response body is not JSON: {}", e)))
    }

    async fn call_typed<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let value = self.call(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// `GET /brief`
    pub async fn get_brief(&self) -> Result<BriefResponse, ClientError> {
        self.call_typed(ApiRequest::get("/brief")).await
    }

    /// `POST /action/done`
    pub async fn mark_done(&self) -> Result<StreakResponse, ClientError> {
        self.call_typed(ApiRequest::post("/action/done")).await
    }

    /// `POST /action/skip`
    pub async fn skip(&self) -> Result<StreakResponse, ClientError> {
        self.call_typed(ApiRequest::post("/action/skip")).await
    }

    /// Resolve (using the cache if present) and report the outcome
    pub async fn test_connection(&self) -> ConnectionReport {
        debug!("test_connection: called");
        ConnectionReport::from_result(self.resolver.resolve().await)
    }

    /// Forget the cached address and run discovery again
    pub async fn auto_detect(&self) -> ConnectionReport {
        debug!("auto_detect: called");
        self.resolver.invalidate().await;
        self.test_connection().await
    }

    /// Switch to a local port after verifying it answers
    pub async fn connect_port(&self, port: u16) -> ConnectionReport {
        debug!(port, "connect_port: called");
        ConnectionReport::from_result(self.resolver.set_override_port(port).await)
    }
}
