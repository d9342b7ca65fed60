//! Web server implementation
//!
//! JSON API used by the share page and the noVNC viewer. All state is built
//! once by the caller and injected through [`WebServer::new`].

use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Duration, Utc};
use deskshare_common::{
    crypto::VNC_PASSWORD_LEN, generate_password, netinfo, token::expiry_after, BridgeSettings,
    Clock, Error, LaunchHandle, LaunchSpec, LinkCodec, ProcessLauncher, ShareConfig, ShareMode,
    SystemClock, TokenStore, VncServerSettings,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Host used in generated URLs when the request carries no Host header
const FALLBACK_HOST: &str = "127.0.0.1";

#[derive(Clone, Debug)]
pub struct WebServerConfig {
    /// VNC server launched by start-share
    pub vnc: VncServerSettings,
    /// websockify bridge launched per viewer
    pub bridge: BridgeSettings,
    /// Port of the site serving the noVNC page
    pub viewer_port: u16,
    /// Path of the noVNC page on that site
    pub viewer_path: String,
    /// How long a published share config is kept
    pub share_config_ttl: Duration,
}

impl Default for WebServerConfig {
    fn default() -> Self {
        Self {
            vnc: VncServerSettings::default(),
            bridge: BridgeSettings::default(),
            viewer_port: 3000,
            viewer_path: "/novnc/vnc.html".to_string(),
            share_config_ttl: Duration::hours(1),
        }
    }
}

/// Web server state
#[derive(Clone)]
pub struct WebServer {
    state: Arc<WebServerState>,
}

struct WebServerState {
    cfg: WebServerConfig,
    tokens: Arc<dyn TokenStore>,
    launcher: Arc<dyn ProcessLauncher>,
    links: LinkCodec,
    clock: Arc<dyn Clock>,
    share_config: Mutex<Option<PublishedShareConfig>>,
}

struct PublishedShareConfig {
    config: ShareConfig,
    expires_at: DateTime<Utc>,
}

impl WebServerState {
    fn launch_bridge(&self, target_ip: &str) -> Result<LaunchHandle, Error> {
        let spec = LaunchSpec::bridge(&self.cfg.bridge, target_ip, self.cfg.vnc.port)?;
        self.launcher.launch(&spec)
    }

    fn viewer_base(&self, host: &str) -> String {
        format!("http://{}:{}{}", host, self.cfg.viewer_port, self.cfg.viewer_path)
    }

    fn encrypt_flag(&self) -> &'static str {
        if self.cfg.bridge.cert.is_some() {
            "1"
        } else {
            "0"
        }
    }
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct IpResponse {
    pub ip: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartShareResponse {
    pub ip: String,
    pub ips: Vec<String>,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
struct StartNovncRequest {
    #[serde(default)]
    ip: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UrlResponse {
    pub url: String,
}

/// What the noVNC page needs to open its WebSocket
#[derive(Debug, Serialize, Deserialize)]
pub struct ConnectionParams {
    pub host: String,
    pub port: String,
    pub password: String,
    pub encrypt: String,
    pub path: String,
    pub autoconnect: String,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateLinkRequest {
    #[serde(default)]
    mode: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LinkResponse {
    pub link: String,
}

#[derive(Debug, Default, Deserialize)]
struct UseLinkRequest {
    #[serde(default)]
    link: Option<String>,
}

/// Non-blank string field or a `MissingParameter` naming it
fn required(value: Option<String>, name: &str) -> Result<String, Error> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::MissingParameter(name.to_string()))
}

/// Host part of the request's Host header, without the port.
fn request_host(headers: &HeaderMap) -> String {
    let Some(host) = headers.get(header::HOST).and_then(|v| v.to_str().ok()) else {
        return FALLBACK_HOST.to_string();
    };
    let host = if host.starts_with('[') {
        // [v6]:port
        host.split_inclusive(']').next().unwrap_or(host)
    } else {
        host.split(':').next().unwrap_or(host)
    };
    if host.is_empty() {
        FALLBACK_HOST.to_string()
    } else {
        host.to_string()
    }
}

impl WebServer {
    /// Create a new web server
    pub fn new(
        cfg: WebServerConfig,
        tokens: Arc<dyn TokenStore>,
        launcher: Arc<dyn ProcessLauncher>,
        links: LinkCodec,
    ) -> Self {
        Self::with_clock(cfg, tokens, launcher, links, Arc::new(SystemClock))
    }

    /// Like [`WebServer::new`], reading time for the share-config slot from `clock`
    pub fn with_clock(
        cfg: WebServerConfig,
        tokens: Arc<dyn TokenStore>,
        launcher: Arc<dyn ProcessLauncher>,
        links: LinkCodec,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state: Arc::new(WebServerState {
                cfg,
                tokens,
                launcher,
                links,
                clock,
                share_config: Mutex::new(None),
            }),
        }
    }

    /// Create router
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/health", get(health_handler))
            .route("/api/get-ip", get(get_ip_handler))
            .route("/api/start-share", post(start_share_handler))
            .route("/api/start-novnc", post(start_novnc_handler))
            .route("/api/novnc-connect/:token", get(novnc_connect_handler))
            .route("/api/generate-link", post(generate_link_handler))
            .route("/api/use-link", post(use_link_handler))
            .route(
                "/api/share-config",
                get(get_share_config_handler).post(set_share_config_handler),
            )
            .fallback(not_found_handler)
            .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the web server
    pub async fn serve(self, addr: SocketAddr) -> anyhow::Result<()> {
        info!("DeskShare API listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": deskshare_common::VERSION,
    }))
}

async fn get_ip_handler() -> Json<IpResponse> {
    let ip = netinfo::primary_ipv4().await;
    Json(IpResponse { ip: ip.to_string() })
}

async fn start_share_handler(
    State(state): State<Arc<WebServerState>>,
) -> ApiResult<Json<StartShareResponse>> {
    let password = generate_password(VNC_PASSWORD_LEN);
    let ips: Vec<String> = netinfo::local_ipv4s()
        .await
        .into_iter()
        .map(|ip| ip.to_string())
        .collect();
    let ip = ips
        .first()
        .cloned()
        .unwrap_or_else(|| netinfo::FALLBACK_IPV4.to_string());

    state
        .launcher
        .launch(&LaunchSpec::vnc_server(&state.cfg.vnc))?;
    info!("Share started on {} ({} addresses)", ip, ips.len());

    Ok(Json(StartShareResponse { ip, ips, password }))
}

async fn start_novnc_handler(
    State(state): State<Arc<WebServerState>>,
    headers: HeaderMap,
    payload: Option<Json<StartNovncRequest>>,
) -> ApiResult<Json<UrlResponse>> {
    let req = payload.map(|Json(req)| req).unwrap_or_default();
    let ip = required(req.ip, "ip")?;
    let password = required(req.password, "password")?;

    state.launch_bridge(&ip)?;
    let token = state.tokens.issue(&ip, &password);
    info!("Issued token for {} (expires {})", ip, token.expires_at);

    let url = format!(
        "{}?token={}",
        state.viewer_base(&request_host(&headers)),
        token.id
    );
    Ok(Json(UrlResponse { url }))
}

async fn novnc_connect_handler(
    State(state): State<Arc<WebServerState>>,
    Path(token): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<ConnectionParams>> {
    let creds = state.tokens.redeem(&token)?;

    Ok(Json(ConnectionParams {
        host: request_host(&headers),
        port: state.cfg.bridge.listen_port.to_string(),
        password: creds.password,
        encrypt: state.encrypt_flag().to_string(),
        path: "/".to_string(),
        autoconnect: "1".to_string(),
    }))
}

async fn generate_link_handler(
    State(state): State<Arc<WebServerState>>,
    payload: Option<Json<GenerateLinkRequest>>,
) -> ApiResult<Json<LinkResponse>> {
    let req = payload.map(|Json(req)| req).unwrap_or_default();
    let mode = match req.mode {
        None | Some(serde_json::Value::Null) => ShareMode::default(),
        Some(value) => ShareMode::from_json(&value)?,
    };

    let ip = netinfo::primary_ipv4().await;
    info!("Generated {} link for {}", mode, ip);

    Ok(Json(LinkResponse {
        link: state.links.encode(&ip.to_string(), mode),
    }))
}

async fn use_link_handler(
    State(state): State<Arc<WebServerState>>,
    headers: HeaderMap,
    payload: Option<Json<UseLinkRequest>>,
) -> ApiResult<Json<UrlResponse>> {
    let req = payload.map(|Json(req)| req).unwrap_or_default();
    let link = required(req.link, "link")?;
    let decoded = state.links.decode(&link)?;

    state.launch_bridge(&decoded.target_address)?;
    info!("Bridging {} link to {}", decoded.mode, decoded.target_address);

    let host = request_host(&headers);
    let mut url = format!(
        "{}?host={}&port={}&encrypt={}&path=/&password={}&autoconnect=1",
        state.viewer_base(&host),
        host,
        state.cfg.bridge.listen_port,
        state.encrypt_flag(),
        urlencoding::encode(&decoded.password),
    );
    if decoded.mode.is_view_only() {
        url.push_str("&view_only=1");
    }

    Ok(Json(UrlResponse { url }))
}

async fn set_share_config_handler(
    State(state): State<Arc<WebServerState>>,
    payload: Option<Json<StartNovncRequest>>,
) -> ApiResult<impl IntoResponse> {
    let req = payload.map(|Json(req)| req).unwrap_or_default();
    let config = ShareConfig {
        ip: required(req.ip, "ip")?,
        password: required(req.password, "password")?,
    };

    *state.share_config.lock() = Some(PublishedShareConfig {
        config,
        expires_at: expiry_after(state.clock.now(), state.cfg.share_config_ttl),
    });

    Ok(Json(serde_json::json!({ "success": true })))
}

async fn get_share_config_handler(
    State(state): State<Arc<WebServerState>>,
) -> ApiResult<Json<ShareConfig>> {
    let now = state.clock.now();
    let mut slot = state.share_config.lock();
    if slot.as_ref().is_some_and(|p| p.expires_at < now) {
        *slot = None;
    }
    slot.as_ref()
        .map(|p| Json(p.config.clone()))
        .ok_or_else(|| ApiError(Error::NotFound("no share configuration".to_string())))
}

async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not found" })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use deskshare_common::token::ManualClock;
    use deskshare_common::InMemoryTokenStore;
    use tower::ServiceExt;

    /// Records launches instead of spawning anything
    #[derive(Default)]
    struct RecordingLauncher {
        launches: Mutex<Vec<LaunchSpec>>,
        fail: bool,
    }

    impl RecordingLauncher {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn launched(&self) -> Vec<LaunchSpec> {
            self.launches.lock().clone()
        }
    }

    impl ProcessLauncher for RecordingLauncher {
        fn launch(&self, spec: &LaunchSpec) -> deskshare_common::Result<LaunchHandle> {
            if self.fail {
                return Err(Error::ProcessLaunch {
                    program: spec.program.clone(),
                    message: "No such file or directory".to_string(),
                });
            }
            self.launches.lock().push(spec.clone());
            Ok(LaunchHandle {
                program: spec.program.clone(),
                pid: Some(4242),
            })
        }
    }

    struct Harness {
        router: Router,
        launcher: Arc<RecordingLauncher>,
        store: Arc<InMemoryTokenStore<Arc<ManualClock>>>,
        clock: Arc<ManualClock>,
    }

    fn harness_with(launcher: RecordingLauncher) -> Harness {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = Arc::new(InMemoryTokenStore::with_clock(
            Duration::hours(24),
            clock.clone(),
        ));
        let launcher = Arc::new(launcher);
        let server = WebServer::with_clock(
            WebServerConfig::default(),
            store.clone(),
            launcher.clone(),
            LinkCodec::default(),
            clock.clone(),
        );
        Harness {
            router: server.router(),
            launcher,
            store,
            clock,
        }
    }

    fn harness() -> Harness {
        harness_with(RecordingLauncher::default())
    }

    async fn send(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::HOST, "192.168.1.20:5000");
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn token_from_url(url: &str) -> String {
        url.split("token=").nth(1).unwrap().to_string()
    }

    #[test]
    fn test_request_host() {
        let mut headers = HeaderMap::new();
        assert_eq!(request_host(&headers), "127.0.0.1");

        headers.insert(header::HOST, "10.0.0.4:5000".parse().unwrap());
        assert_eq!(request_host(&headers), "10.0.0.4");

        headers.insert(header::HOST, "desk.local".parse().unwrap());
        assert_eq!(request_host(&headers), "desk.local");

        headers.insert(header::HOST, "[::1]:5000".parse().unwrap());
        assert_eq!(request_host(&headers), "[::1]");
    }

    #[tokio::test]
    async fn test_health() {
        let h = harness();
        let (status, body) = send(&h.router, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_get_ip() {
        let h = harness();
        let (status, body) = send(&h.router, "GET", "/api/get-ip", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["ip"].as_str().unwrap().parse::<std::net::Ipv4Addr>().is_ok());
    }

    #[tokio::test]
    async fn test_start_share_launches_vnc_server() {
        let h = harness();
        let (status, body) = send(&h.router, "POST", "/api/start-share", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["password"].as_str().unwrap().len(), VNC_PASSWORD_LEN);
        assert!(!body["ip"].as_str().unwrap().is_empty());
        assert!(body["ips"].is_array());

        let launched = h.launcher.launched();
        assert_eq!(launched.len(), 1);
        assert_eq!(launched[0].command_line(), "tvnserver -run");
    }

    #[tokio::test]
    async fn test_start_share_surfaces_launch_failure() {
        let h = harness_with(RecordingLauncher::failing());
        let (status, body) = send(&h.router, "POST", "/api/start-share", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("tvnserver"));
    }

    #[tokio::test]
    async fn test_start_novnc_requires_ip_and_password() {
        let h = harness();

        let (status, body) = send(
            &h.router,
            "POST",
            "/api/start-novnc",
            Some(serde_json::json!({ "password": "pw" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("ip"));

        let (status, _) = send(
            &h.router,
            "POST",
            "/api/start-novnc",
            Some(serde_json::json!({ "ip": "10.0.0.2", "password": "  " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&h.router, "POST", "/api/start-novnc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert!(h.launcher.launched().is_empty());
        assert!(h.store.is_empty());
    }

    #[tokio::test]
    async fn test_start_novnc_then_connect() {
        let h = harness();
        let (status, body) = send(
            &h.router,
            "POST",
            "/api/start-novnc",
            Some(serde_json::json!({ "ip": "192.168.1.5", "password": "s3cret" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let url = body["url"].as_str().unwrap();
        assert!(url.starts_with("http://192.168.1.20:3000/novnc/vnc.html?token="));
        assert!(!url.contains("s3cret"));

        let launched = h.launcher.launched();
        assert_eq!(launched.len(), 1);
        assert_eq!(launched[0].args.last().unwrap(), "192.168.1.5:5900");

        let token = token_from_url(url);
        let (status, params) = send(
            &h.router,
            "GET",
            &format!("/api/novnc-connect/{}", token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(params["host"], "192.168.1.20");
        assert_eq!(params["port"], "8085");
        assert_eq!(params["password"], "s3cret");
        assert_eq!(params["encrypt"], "1");
        assert_eq!(params["path"], "/");
        assert_eq!(params["autoconnect"], "1");
    }

    #[tokio::test]
    async fn test_start_novnc_launch_failure_issues_no_token() {
        let h = harness_with(RecordingLauncher::failing());
        let (status, body) = send(
            &h.router,
            "POST",
            "/api/start-novnc",
            Some(serde_json::json!({ "ip": "192.168.1.5", "password": "pw" })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("websockify"));
        assert!(h.store.is_empty());
    }

    #[tokio::test]
    async fn test_connect_unknown_token() {
        let h = harness();
        let (status, body) = send(
            &h.router,
            "GET",
            "/api/novnc-connect/3f2b8c1e-0d7a-4c55-9a43-6f1d2e9b7c10",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_connect_expired_token() {
        let h = harness();
        let (_, body) = send(
            &h.router,
            "POST",
            "/api/start-novnc",
            Some(serde_json::json!({ "ip": "192.168.1.5", "password": "pw" })),
        )
        .await;
        let token = token_from_url(body["url"].as_str().unwrap());

        h.clock.advance(Duration::hours(24) + Duration::seconds(1));
        let (status, _) = send(
            &h.router,
            "GET",
            &format!("/api/novnc-connect/{}", token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_generate_link_modes() {
        let h = harness();
        let codec = LinkCodec::default();

        let (status, body) = send(
            &h.router,
            "POST",
            "/api/generate-link",
            Some(serde_json::json!({ "mode": "1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let decoded = codec.decode(body["link"].as_str().unwrap()).unwrap();
        assert_eq!(decoded.mode, ShareMode::Control);

        let (status, body) = send(&h.router, "POST", "/api/generate-link", None).await;
        assert_eq!(status, StatusCode::OK);
        let decoded = codec.decode(body["link"].as_str().unwrap()).unwrap();
        assert_eq!(decoded.mode, ShareMode::View);

        let (status, _) = send(
            &h.router,
            "POST",
            "/api/generate-link",
            Some(serde_json::json!({ "mode": "7" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_use_link_view_only() {
        let h = harness();
        let link = LinkCodec::default().encode("192.168.1.5", ShareMode::View);

        let (status, body) = send(
            &h.router,
            "POST",
            "/api/use-link",
            Some(serde_json::json!({ "link": link })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["url"],
            "http://192.168.1.20:3000/novnc/vnc.html?host=192.168.1.20&port=8085&encrypt=1&path=/&password=achour&autoconnect=1&view_only=1"
        );

        let launched = h.launcher.launched();
        assert_eq!(launched.len(), 1);
        assert_eq!(launched[0].args.last().unwrap(), "192.168.1.5:5900");
    }

    #[tokio::test]
    async fn test_use_link_control() {
        let h = harness();
        let link = LinkCodec::default().encode("10.0.0.9", ShareMode::Control);

        let (status, body) = send(
            &h.router,
            "POST",
            "/api/use-link",
            Some(serde_json::json!({ "link": link })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body["url"].as_str().unwrap().contains("view_only"));
    }

    #[tokio::test]
    async fn test_use_link_rejects_bad_input() {
        let h = harness();

        let (status, _) = send(&h.router, "POST", "/api/use-link", Some(serde_json::json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &h.router,
            "POST",
            "/api/use-link",
            Some(serde_json::json!({ "link": "not-a-link" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid link"));

        assert!(h.launcher.launched().is_empty());
    }

    #[tokio::test]
    async fn test_share_config() {
        let h = harness();

        let (status, _) = send(&h.router, "GET", "/api/share-config", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            &h.router,
            "POST",
            "/api/share-config",
            Some(serde_json::json!({ "ip": "192.168.1.5", "password": "pw" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (status, body) = send(&h.router, "GET", "/api/share-config", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ip"], "192.168.1.5");
        assert_eq!(body["password"], "pw");
    }

    #[tokio::test]
    async fn test_share_config_expires() {
        let h = harness();
        let (status, _) = send(
            &h.router,
            "POST",
            "/api/share-config",
            Some(serde_json::json!({ "ip": "192.168.1.5", "password": "pw" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        h.clock.advance(Duration::minutes(59));
        let (status, _) = send(&h.router, "GET", "/api/share-config", None).await;
        assert_eq!(status, StatusCode::OK);

        h.clock.advance(Duration::minutes(1) + Duration::seconds(1));
        let (status, body) = send(&h.router, "GET", "/api/share-config", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_start_novnc_rejects_option_like_ip() {
        let h = harness();
        let (status, body) = send(
            &h.router,
            "POST",
            "/api/start-novnc",
            Some(serde_json::json!({ "ip": "--web=/tmp", "password": "pw" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("ip"));
        assert!(h.launcher.launched().is_empty());
        assert!(h.store.is_empty());
    }

    #[tokio::test]
    async fn test_use_link_rejects_option_like_address() {
        let h = harness();
        let link = LinkCodec::default().encode("-v", ShareMode::Control);
        let (status, _) = send(
            &h.router,
            "POST",
            "/api/use-link",
            Some(serde_json::json!({ "link": link })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(h.launcher.launched().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let h = harness();
        let (status, body) = send(&h.router, "GET", "/api/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");
    }
}
