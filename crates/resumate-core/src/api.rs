//! Backend API request descriptions and the transport seam.
//!
//! Components describe *what* to send as an [`ApiRequest`]; an
//! [`ApiTransport`] implementation performs the HTTP exchange and attaches the
//! bearer credential when one is supplied.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ResumateError, Result};

/// HTTP method used by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Backend endpoints consumed by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Register,
    RefreshToken,
    Analyze,
    AnalyzeFile,
    Health,
    Skills,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Login => "/api/auth/login",
            Endpoint::Register => "/api/auth/register",
            Endpoint::RefreshToken => "/api/auth/refresh-token",
            Endpoint::Analyze => "/api/analyze",
            Endpoint::AnalyzeFile => "/api/analyze-file",
            Endpoint::Health => "/api/v1/health",
            Endpoint::Skills => "/api/v1/skills",
        }
    }

    pub fn method(self) -> HttpMethod {
        match self {
            Endpoint::Health | Endpoint::Skills => HttpMethod::Get,
            _ => HttpMethod::Post,
        }
    }
}

/// Content of a multipart form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File {
        file_name: String,
        mime_type: String,
        bytes: Vec<u8>,
    },
}

/// A named multipart form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub value: FormValue,
}

impl FormPart {
    pub fn text(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: FormValue::Text(value.into()),
        }
    }
}

/// Body encoding of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(Vec<FormPart>),
}

/// A fully formed request description.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub endpoint: Endpoint,
    pub method: HttpMethod,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(endpoint: Endpoint, body: RequestBody) -> Self {
        Self {
            endpoint,
            method: endpoint.method(),
            query: Vec::new(),
            body,
        }
    }

    pub fn json(endpoint: Endpoint, body: Value) -> Self {
        Self::new(endpoint, RequestBody::Json(body))
    }

    pub fn get(endpoint: Endpoint) -> Self {
        Self::new(endpoint, RequestBody::Empty)
    }

    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }
}

/// Raw response: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

impl ApiReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Best-effort error message from a server error body.
    pub fn error_message(&self) -> Option<String> {
        let body: ServerErrorBody = serde_json::from_str(&self.body).ok()?;
        body.message
            .or(body.error)
            .or(body.details)
            .filter(|m| !m.trim().is_empty())
    }

    /// Converts a non-success reply into an error.
    ///
    /// 401/403 mean the stored credentials were rejected.
    pub fn into_error(self) -> ResumateError {
        let message = self
            .error_message()
            .unwrap_or_else(|| format!("request failed with status {}", self.status));
        match self.status {
            401 | 403 => ResumateError::auth(
                "Your session has expired or is not authorized. Please log in again.",
            ),
            status => ResumateError::api(status, message),
        }
    }
}

/// Error body shape produced by the server's exception handler.
#[derive(Debug, Deserialize)]
struct ServerErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// Executes request descriptions against the backend.
///
/// Implementations must apply a timeout to every call and report transport
/// failures as [`ResumateError::Network`]. Non-success statuses are returned
/// as replies, not errors.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn execute(&self, request: &ApiRequest, bearer: Option<&str>) -> Result<ApiReply>;
}
