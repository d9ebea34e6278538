//! MES REST Client
//!
//! Column reads and order state transitions against the MES backend.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{self, Either};
use serde::Deserialize;

use crate::config::{DashboardConfig, MAX_TRANSITION_TIMEOUT_MS};
use crate::models::{CardId, CardRecord, Column, Order};

const KANBAN_PATH: &str = "/rest/dashboardKanban";
const LOGIN_TIMEOUT_PAGE: &str = "/login.html?timeout=true";

/// Result type for backend calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Transport-level failures
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    Network(String),
    Status(u16),
    Decode(String),
    Timeout(Duration),
    SessionExpired,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Status(code) => write!(f, "Unexpected HTTP status {}", code),
            ApiError::Decode(msg) => write!(f, "Invalid response: {}", msg),
            ApiError::Timeout(after) => write!(f, "No response after {} ms", after.as_millis()),
            ApiError::SessionExpired => write!(f, "Session expired"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Answer to a state change request
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionResponse {
    /// Canonical order after the change
    Updated(Order),
    /// Business rule rejection with the server's message
    Rejected(String),
}

#[derive(Deserialize)]
struct RawTransitionResponse {
    #[serde(default)]
    order: Option<Order>,
    #[serde(default)]
    message: Option<String>,
}

impl TransitionResponse {
    /// A non-empty `message` wins over `order`
    pub fn from_json(body: &str) -> ApiResult<Self> {
        let raw: RawTransitionResponse = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        match (raw.message, raw.order) {
            (Some(message), _) if !message.is_empty() => Ok(TransitionResponse::Rejected(message)),
            (_, Some(order)) => Ok(TransitionResponse::Updated(order)),
            _ => Err(ApiError::Decode("response carries neither order nor message".to_string())),
        }
    }
}

/// Backend operations the kanban needs
#[async_trait(?Send)]
pub trait MesApi {
    async fn fetch_column<C: CardRecord>(&self, column: Column) -> ApiResult<Vec<C>>;

    async fn update_order_state(&self, id: CardId) -> ApiResult<TransitionResponse>;
}

/// Bodies the MES serves instead of data once the session is gone
pub fn is_session_expired(body: &str) -> bool {
    let body = body.trim();
    body == "sessionExpired" || body.starts_with("<![CDATA[ERROR PAGE:")
}

/// HTTP implementation over reqwest (fetch on wasm)
#[derive(Clone)]
pub struct HttpMesApi {
    client: reqwest::Client,
    base_url: String,
    transition_timeout: Duration,
}

impl HttpMesApi {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            transition_timeout: config.transition_timeout(),
        }
    }

    fn url(&self, path: &str) -> String {
        kanban_url(&self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ApiResult<String> {
        let response = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;

        if is_session_expired(&body) {
            redirect_to_login();
            return Err(ApiError::SessionExpired);
        }
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(body)
    }
}

#[async_trait(?Send)]
impl MesApi for HttpMesApi {
    async fn fetch_column<C: CardRecord>(&self, column: Column) -> ApiResult<Vec<C>> {
        let url = self.url(&C::KIND.column_path(column));
        log::debug!("GET {}", url);
        let body = self.send(self.client.get(&url)).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn update_order_state(&self, id: CardId) -> ApiResult<TransitionResponse> {
        let url = self.url(&format!("updateOrderState/{}", id));
        log::debug!("PUT {}", url);
        let body = with_timeout(self.send(self.client.put(&url)), self.transition_timeout).await?;
        TransitionResponse::from_json(&body)
    }
}

fn kanban_url(base_url: &str, path: &str) -> String {
    format!("{}{}/{}", base_url.trim_end_matches('/'), KANBAN_PATH, path)
}

/// Race `request` against a browser timer
async fn with_timeout<T, F>(request: F, timeout: Duration) -> ApiResult<T>
where
    F: Future<Output = ApiResult<T>>,
{
    let timer = gloo_timers::future::TimeoutFuture::new(timer_millis(timeout));
    race_timeout(request, timer, timeout).await
}

fn timer_millis(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis())
        .unwrap_or(u32::MAX)
        .min(MAX_TRANSITION_TIMEOUT_MS)
}

/// `Timeout` once `timer` completes before `request`
async fn race_timeout<T, F, D>(request: F, timer: D, timeout: Duration) -> ApiResult<T>
where
    F: Future<Output = ApiResult<T>>,
    D: Future<Output = ()>,
{
    futures::pin_mut!(request);
    futures::pin_mut!(timer);

    match future::select(request, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(_) => Err(ApiError::Timeout(timeout)),
    }
}

fn redirect_to_login() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(LOGIN_TIMEOUT_PAGE) {
            log::error!("redirect to login failed: {:?}", e);
        }
    }
}
