//! HTTP client for the DeskShare daemon

use anyhow::{Context, Result};
use deskshare_common::ShareMode;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Response of `POST /api/start-share`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareInfo {
    pub ip: String,
    pub ips: Vec<String>,
    pub password: String,
}

/// Response of `GET /api/novnc-connect/{token}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionParams {
    pub host: String,
    pub port: String,
    pub password: String,
    pub encrypt: String,
    pub path: String,
    pub autoconnect: String,
}

#[derive(Debug, Deserialize)]
struct UrlResponse {
    url: String,
}

#[derive(Debug, Deserialize)]
struct LinkResponse {
    link: String,
}

#[derive(Debug, Deserialize)]
struct IpResponse {
    ip: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the daemon's JSON API
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if the daemon is healthy
    pub async fn health_check(&self) -> bool {
        match self.http.get(self.url("/api/health")).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    pub async fn get_ip(&self) -> Result<String> {
        let resp: IpResponse = self.get("/api/get-ip").await?;
        Ok(resp.ip)
    }

    pub async fn start_share(&self) -> Result<ShareInfo> {
        self.post("/api/start-share", &serde_json::json!({})).await
    }

    /// Launch a bridge and get a token URL for it
    pub async fn start_novnc(&self, ip: &str, password: &str) -> Result<String> {
        let body = serde_json::json!({ "ip": ip, "password": password });
        let resp: UrlResponse = self.post("/api/start-novnc", &body).await?;
        Ok(resp.url)
    }

    pub async fn connect(&self, token: &str) -> Result<ConnectionParams> {
        self.get(&format!("/api/novnc-connect/{}", urlencoding::encode(token)))
            .await
    }

    pub async fn generate_link(&self, mode: ShareMode) -> Result<String> {
        let body = serde_json::json!({ "mode": mode });
        let resp: LinkResponse = self.post("/api/generate-link", &body).await?;
        Ok(resp.link)
    }

    pub async fn use_link(&self, link: &str) -> Result<String> {
        let body = serde_json::json!({ "link": link });
        let resp: UrlResponse = self.post("/api/use-link", &body).await?;
        Ok(resp.url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!("GET {}", self.url(path));
        let resp = self
            .http
            .get(self.url(path))
            .send()
            .await
            .with_context(|| format!("GET {} failed", path))?;
        Self::decode(resp).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: &serde_json::Value) -> Result<T> {
        debug!("POST {}", self.url(path));
        let resp = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {} failed", path))?;
        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }

        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|b| b.error)
            .unwrap_or(text);
        anyhow::bail!("{} ({})", message, status)
    }
}
