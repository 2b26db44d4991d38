//! HTTP client for the platform's project endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::data::project::{ApplicationRequest, ApplicationStatus, Project};
use crate::error::{Error, Result};
use crate::session::Credentials;
use crate::settings::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

/// Shown when a rejected application carries no explanation.
pub const DEFAULT_REJECTION: &str = "Failed to submit application";

/// The calls the project detail view needs from the platform.
#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// `GET /api/projects/{id}`
    async fn get_project(&self, id: u64) -> Result<Project>;

    /// `GET /api/projects?category={category}`
    async fn projects_by_category(&self, category: &str) -> Result<Vec<Project>>;

    /// `GET /api/projects/{id}/application-status`
    async fn application_status(
        &self,
        project_id: u64,
        creds: &Credentials,
    ) -> Result<ApplicationStatus>;

    /// `POST /api/project-applications`. A refusal is [`Error::Rejected`].
    async fn submit_application(
        &self,
        request: &ApplicationRequest,
        creds: &Credentials,
    ) -> Result<()>;
}

/// reqwest-backed [`ProjectApi`].
#[derive(Clone)]
pub struct HttpClient {
    http: ReqwestClient,
    base_url: String,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Builder for [`HttpClient`]
#[derive(Default)]
pub struct HttpClientBuilder {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl HttpClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "API URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }

        let timeout = Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let http = ReqwestClient::builder().timeout(timeout).build()?;

        Ok(HttpClient { http, base_url })
    }
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let response = ensure_success(response)?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ProjectApi for HttpClient {
    async fn get_project(&self, id: u64) -> Result<Project> {
        let url = self.url(&format!("/api/projects/{}", id));
        debug!(%url, "fetching project");
        self.send_json(self.http.get(url)).await
    }

    async fn projects_by_category(&self, category: &str) -> Result<Vec<Project>> {
        let url = self.url("/api/projects");
        debug!(%url, category, "fetching related projects");
        self.send_json(self.http.get(url).query(&[("category", category)]))
            .await
    }

    async fn application_status(
        &self,
        project_id: u64,
        creds: &Credentials,
    ) -> Result<ApplicationStatus> {
        let url = self.url(&format!("/api/projects/{}/application-status", project_id));
        debug!(%url, "fetching application status");
        self.send_json(self.http.get(url).bearer_auth(&creds.token))
            .await
    }

    async fn submit_application(
        &self,
        request: &ApplicationRequest,
        creds: &Credentials,
    ) -> Result<()> {
        let url = self.url("/api/project-applications");
        debug!(%url, project_id = request.project_id, "submitting application");
        let response = self
            .http
            .post(url)
            .bearer_auth(&creds.token)
            .json(request)
            .send()
            .await?;
        if response.status().is_success() {
            return Ok(());
        }
        let body = response.bytes().await?;
        Err(Error::Rejected(rejection_message(&body)))
    }
}

fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::Status(status.as_u16()))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// The server's `{"error": "..."}` message, or a generic fallback.
fn rejection_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_REJECTION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_uses_server_message() {
        assert_eq!(
            rejection_message(br#"{"error": "Already applied"}"#),
            "Already applied"
        );
    }

    #[test]
    fn test_rejection_falls_back() {
        assert_eq!(rejection_message(b"<html>502</html>"), DEFAULT_REJECTION);
        assert_eq!(rejection_message(br#"{"error": ""}"#), DEFAULT_REJECTION);
        assert_eq!(rejection_message(br#"{"message": "x"}"#), DEFAULT_REJECTION);
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = HttpClient::builder()
            .base_url("http://localhost:5000/")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/api/projects/4"), "http://localhost:5000/api/projects/4");
    }

    #[test]
    fn test_builder_rejects_non_http_url() {
        let err = HttpClient::builder().base_url("localhost:5000").build();
        assert!(matches!(err, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_defaults_to_platform_url() {
        let client = HttpClient::builder().build().unwrap();
        assert_eq!(client.base_url(), DEFAULT_API_URL);
    }

    mod wire {
        use crate::api::{HttpClient, ProjectApi};
        use crate::data::project::ApplicationRequest;
        use crate::error::Error;
        use crate::session::{Credentials, SessionUser};
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;
        use tokio::sync::oneshot;

        /// What the stub server saw: request line plus headers, and the body.
        struct Captured {
            head: String,
            body: String,
        }

        impl Captured {
            fn request_line(&self) -> &str {
                self.head.lines().next().unwrap_or_default()
            }

            fn has_header(&self, line: &str) -> bool {
                self.head
                    .lines()
                    .any(|l| l.eq_ignore_ascii_case(line))
            }
        }

        /// Accepts one connection, records it and answers with `status` and `body`.
        async fn serve_once(status: u16, body: &'static str) -> (String, oneshot::Receiver<Captured>) {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let (tx, rx) = oneshot::channel();

            tokio::spawn(async move {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                let head_end = loop {
                    let n = socket.read(&mut chunk).await.unwrap();
                    assert!(n > 0, "connection closed before headers");
                    buf.extend_from_slice(&chunk[..n]);
                    if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                        break pos + 4;
                    }
                };
                let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
                let content_length = head
                    .lines()
                    .find_map(|l| {
                        l.to_ascii_lowercase()
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap())
                    })
                    .unwrap_or(0);
                while buf.len() < head_end + content_length {
                    let n = socket.read(&mut chunk).await.unwrap();
                    assert!(n > 0, "connection closed before body");
                    buf.extend_from_slice(&chunk[..n]);
                }
                let request_body = String::from_utf8_lossy(&buf[head_end..]).to_string();

                let response = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
                let _ = tx.send(Captured {
                    head,
                    body: request_body,
                });
            });

            (format!("http://{}", addr), rx)
        }

        fn client(base_url: &str) -> HttpClient {
            HttpClient::builder()
                .base_url(base_url)
                .timeout_secs(5)
                .build()
                .unwrap()
        }

        fn creds() -> Credentials {
            Credentials {
                token: "tok123".into(),
                user: SessionUser {
                    id: 8,
                    name: "Nisha".into(),
                    email: "nisha@uni.edu".into(),
                    role: "student".into(),
                },
            }
        }

        #[tokio::test]
        async fn test_get_project_path_and_decode() {
            let (base, seen) = serve_once(200, r#"{"id": 4, "title": "Rover", "category": "AI"}"#).await;
            let project = client(&base).get_project(4).await.unwrap();
            assert_eq!(project.title, "Rover");

            let seen = seen.await.unwrap();
            assert_eq!(seen.request_line(), "GET /api/projects/4 HTTP/1.1");
            assert!(!seen.head.to_ascii_lowercase().contains("authorization:"));
        }

        #[tokio::test]
        async fn test_missing_project_is_status_404() {
            let (base, _seen) = serve_once(404, r#"{"error": "Project not found"}"#).await;
            let err = client(&base).get_project(99).await.unwrap_err();
            assert!(matches!(err, Error::Status(404)));
            assert!(err.is_not_found());
        }

        #[tokio::test]
        async fn test_category_sent_as_query() {
            let (base, seen) = serve_once(200, r#"[{"id": 1}, {"id": 2}]"#).await;
            let projects = client(&base).projects_by_category("AI").await.unwrap();
            assert_eq!(projects.len(), 2);

            let seen = seen.await.unwrap();
            assert_eq!(seen.request_line(), "GET /api/projects?category=AI HTTP/1.1");
        }

        #[tokio::test]
        async fn test_status_check_sends_bearer_token() {
            let (base, seen) = serve_once(200, r#"{"has_applied": true, "status": "pending"}"#).await;
            let status = client(&base).application_status(4, &creds()).await.unwrap();
            assert!(status.has_applied);
            assert_eq!(status.status.as_deref(), Some("pending"));

            let seen = seen.await.unwrap();
            assert_eq!(
                seen.request_line(),
                "GET /api/projects/4/application-status HTTP/1.1"
            );
            assert!(seen.has_header("authorization: Bearer tok123"));
        }

        #[tokio::test]
        async fn test_submit_posts_json_with_bearer() {
            let (base, seen) = serve_once(201, r#"{"message": "ok"}"#).await;
            let request = ApplicationRequest {
                project_id: 4,
                position_id: Some(40),
                message: "I can help with firmware".into(),
            };
            client(&base)
                .submit_application(&request, &creds())
                .await
                .unwrap();

            let seen = seen.await.unwrap();
            assert_eq!(seen.request_line(), "POST /api/project-applications HTTP/1.1");
            assert!(seen.has_header("authorization: Bearer tok123"));
            assert!(seen.has_header("content-type: application/json"));
            let body: serde_json::Value = serde_json::from_str(&seen.body).unwrap();
            assert_eq!(
                body,
                serde_json::json!({
                    "project_id": 4,
                    "position_id": 40,
                    "message": "I can help with firmware"
                })
            );
        }

        #[tokio::test]
        async fn test_rejected_submit_carries_server_error() {
            let (base, _seen) = serve_once(400, r#"{"error": "Already applied"}"#).await;
            let request = ApplicationRequest {
                project_id: 4,
                position_id: None,
                message: "hello".into(),
            };
            let err = client(&base)
                .submit_application(&request, &creds())
                .await
                .unwrap_err();
            assert!(matches!(err, Error::Rejected(ref m) if m == "Already applied"));
        }
    }
}
