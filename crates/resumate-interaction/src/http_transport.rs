//! HttpTransport - reqwest implementation of [`ApiTransport`].
//!
//! Every request carries the configured timeout. Transport failures are
//! reported as network errors; HTTP error statuses are handed back as replies
//! so callers can interpret the server's message.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use resumate_core::api::{ApiReply, ApiRequest, ApiTransport, FormValue, HttpMethod, RequestBody};
use resumate_core::error::{ResumateError, Result};

/// Transport that talks to the backend over HTTP.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base_url, request.endpoint.path())
    }

    fn multipart_form(parts: &[resumate_core::api::FormPart]) -> Result<Form> {
        let mut form = Form::new();
        for part in parts {
            form = match &part.value {
                FormValue::Text(text) => form.text(part.name.clone(), text.clone()),
                FormValue::File {
                    file_name,
                    mime_type,
                    bytes,
                } => {
                    let file_part = Part::bytes(bytes.clone())
                        .file_name(file_name.clone())
                        .mime_str(mime_type)
                        .map_err(|e| {
                            ResumateError::internal(format!(
                                "Invalid MIME type '{}' for upload: {}",
                                mime_type, e
                            ))
                        })?;
                    form.part(part.name.clone(), file_part)
                }
            };
        }
        Ok(form)
    }

    fn transport_error(&self, request: &ApiRequest, e: reqwest::Error) -> ResumateError {
        let detail = if e.is_timeout() {
            format!("request timed out after {:?}", self.timeout)
        } else if e.is_connect() {
            format!("could not connect to {}: {}", self.base_url, e)
        } else {
            e.to_string()
        };
        tracing::warn!("{} failed: {}", request.endpoint.path(), detail);
        ResumateError::network(detail)
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn execute(&self, request: &ApiRequest, bearer: Option<&str>) -> Result<ApiReply> {
        let url = self.url_for(request);

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        }
        .timeout(self.timeout);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(body),
            RequestBody::Multipart(parts) => builder.multipart(Self::multipart_form(parts)?),
        };

        tracing::debug!(
            "{:?} {} (authenticated: {})",
            request.method,
            request.endpoint.path(),
            bearer.is_some()
        );

        let response = builder
            .send()
            .await
            .map_err(|e| self.transport_error(request, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(request, e))?;

        tracing::debug!("{} -> {}", request.endpoint.path(), status);
        Ok(ApiReply::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumate_core::api::{Endpoint, FormPart};
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves one canned response and returns the raw request it received.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (base_url, handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let headers = text[..header_end].to_lowercase();
                if headers.contains("transfer-encoding: chunked") {
                    if text.ends_with("0\r\n\r\n") {
                        break;
                    }
                    continue;
                }
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[tokio::test]
    async fn test_json_post_with_bearer() {
        let (base_url, server) = serve_once("200 OK", r#"{"matchPercentage":70}"#).await;
        let transport = HttpTransport::new(format!("{}/", base_url), Duration::from_secs(5));

        let request = ApiRequest::json(Endpoint::Analyze, json!({"resumeText": "Rust"}));
        let reply = transport.execute(&request, Some("tok123")).await.unwrap();

        assert!(reply.is_success());
        assert_eq!(reply.body, r#"{"matchPercentage":70}"#);

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /api/analyze HTTP/1.1"));
        assert!(raw.to_lowercase().contains("authorization: bearer tok123"));
        assert!(raw.contains(r#"{"resumeText":"Rust"}"#));
    }

    #[tokio::test]
    async fn test_query_and_no_bearer() {
        let (base_url, server) = serve_once("200 OK", "{}").await;
        let transport = HttpTransport::new(base_url, Duration::from_secs(5));

        let request = ApiRequest::json(Endpoint::RefreshToken, json!({}))
            .with_query("refreshToken", "r1");
        transport.execute(&request, None).await.unwrap();

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /api/auth/refresh-token?refreshToken=r1 HTTP/1.1"));
        assert!(!raw.to_lowercase().contains("authorization:"));
    }

    #[tokio::test]
    async fn test_multipart_upload() {
        let (base_url, server) = serve_once("200 OK", "{}").await;
        let transport = HttpTransport::new(base_url, Duration::from_secs(5));

        let request = ApiRequest::new(
            Endpoint::AnalyzeFile,
            RequestBody::Multipart(vec![
                FormPart {
                    name: "resumeFile".to_string(),
                    value: FormValue::File {
                        file_name: "cv.txt".to_string(),
                        mime_type: "text/plain".to_string(),
                        bytes: b"Rust and SQL".to_vec(),
                    },
                },
                FormPart::text("jobDescriptionUrl", "https://example.com/job"),
            ]),
        );
        transport.execute(&request, Some("tok")).await.unwrap();

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /api/analyze-file HTTP/1.1"));
        assert!(raw.contains("multipart/form-data"));
        assert!(raw.contains(r#"name="resumeFile"; filename="cv.txt""#));
        assert!(raw.contains("Rust and SQL"));
        assert!(raw.contains("https://example.com/job"));
    }

    #[tokio::test]
    async fn test_error_status_is_a_reply() {
        let (base_url, _server) = serve_once("401 Unauthorized", r#"{"message":"expired"}"#).await;
        let transport = HttpTransport::new(base_url, Duration::from_secs(5));

        let reply = transport
            .execute(&ApiRequest::get(Endpoint::Health), None)
            .await
            .unwrap();

        assert_eq!(reply.status, 401);
        assert!(reply.into_error().is_auth());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let transport = HttpTransport::new(base_url, Duration::from_secs(5));
        let err = transport
            .execute(&ApiRequest::get(Endpoint::Skills), None)
            .await
            .unwrap_err();

        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_timeout_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let transport = HttpTransport::new(base_url, Duration::from_millis(200));
        let err = transport
            .execute(&ApiRequest::get(Endpoint::Health), None)
            .await
            .unwrap_err();

        assert!(err.is_network());
        assert!(err.to_string().contains("timed out"));
    }
}
