//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use hub_api::{create_app, create_app_state};
use hub_common::AppConfig;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{LoginBody, SessionBody};

/// Admin password every test server is configured with
pub const ADMIN_PASSWORD: &str = "integration-admin";

const JWT_SECRET: &str = "integration-test-secret-with-enough-length";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on the memory backend
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("/health") {
            format!("{}{}", self.base_url(), path)
        } else {
            format!("{}/api/v1{}", self.base_url(), path)
        }
    }

    /// Start a request; paths other than `/health*` are under `/api/v1`
    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.request(reqwest::Method::GET, path).send().await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?)
    }

    /// POST with an admin bearer token
    pub async fn post_admin<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::POST, path)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn patch_admin<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::PATCH, path)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    pub async fn delete_admin(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::DELETE, path)
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// PUT a reaction as the given viewer
    pub async fn put_as_viewer<T: Serialize>(
        &self,
        path: &str,
        viewer_id: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::PUT, path)
            .header("x-viewer-id", viewer_id)
            .json(body)
            .send()
            .await?)
    }

    pub async fn get_as_viewer(&self, path: &str, viewer_id: &str) -> Result<Response> {
        Ok(self
            .request(reqwest::Method::GET, path)
            .header("x-viewer-id", viewer_id)
            .send()
            .await?)
    }

    /// Log in as the configured admin and return the bearer token
    pub async fn admin_token(&self) -> Result<String> {
        let body = LoginBody {
            username: "admin".to_string(),
            password: ADMIN_PASSWORD.to_string(),
        };
        let response = self.post("/auth/login", &body).await?;
        let session: SessionBody = assert_json(response, StatusCode::OK).await?;
        Ok(session.access_token)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Memory-backed configuration with a known admin password
pub fn test_config() -> AppConfig {
    AppConfig::local(JWT_SECRET, ADMIN_PASSWORD)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error envelope with the given status and code
pub async fn assert_error(
    response: Response,
    expected_status: StatusCode,
    expected_code: &str,
) -> Result<()> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    let code = body["error"]["code"].as_str().unwrap_or_default();
    if code != expected_code {
        anyhow::bail!("Expected error code {expected_code}, got {code}. Body: {body}");
    }
    Ok(())
}
