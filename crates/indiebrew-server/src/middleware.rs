use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use indiebrew_core::RateLimitConfig;
use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Newtype wrapping a request ID string, stored as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Expired windows are swept once the map grows past this many clients,
/// at most once per window length.
const PRUNE_THRESHOLD: usize = 4_096;

#[derive(Debug, Clone)]
struct RateLimitWindow {
    started_at: Instant,
    count: usize,
}

#[derive(Debug)]
struct ClientWindows {
    clients: HashMap<String, RateLimitWindow>,
    last_swept: Instant,
}

impl ClientWindows {
    fn sweep_if_due(&mut self, window: Duration) {
        if self.clients.len() < PRUNE_THRESHOLD || self.last_swept.elapsed() < window {
            return;
        }
        self.clients.retain(|_, w| w.started_at.elapsed() < window);
        self.last_swept = Instant::now();
    }
}

/// Fixed-window limiter keyed by client.
#[derive(Debug, Clone)]
pub struct RateLimitState {
    max_requests: usize,
    window: Duration,
    windows: Arc<Mutex<ClientWindows>>,
}

impl RateLimitState {
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Arc::new(Mutex::new(ClientWindows {
                clients: HashMap::new(),
                last_swept: Instant::now(),
            })),
        }
    }

    #[must_use]
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, Duration::from_secs(config.window_secs))
    }

    /// Counts one request for `client` and reports whether it is allowed.
    async fn admit(&self, client: &str) -> bool {
        let mut windows = self.windows.lock().await;
        windows.sweep_if_due(self.window);

        let entry = windows
            .clients
            .entry(client.to_owned())
            .or_insert_with(|| RateLimitWindow {
                started_at: Instant::now(),
                count: 0,
            });

        if entry.started_at.elapsed() >= self.window {
            entry.started_at = Instant::now();
            entry.count = 0;
        }

        if entry.count >= self.max_requests {
            return false;
        }

        entry.count += 1;
        true
    }
}

#[derive(Debug, Serialize)]
struct MiddlewareErrorBody {
    error: MiddlewareError,
}

#[derive(Debug, Serialize)]
struct MiddlewareError {
    code: &'static str,
    message: &'static str,
}

/// Axum middleware that extracts or generates a request ID.
///
/// If the incoming request has an `x-request-id` header, that value is used.
/// Otherwise a new `UUIDv4` is generated. The ID is:
/// - Inserted into request extensions as [`RequestId`]
/// - Set on the response as the `x-request-id` header
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;

    if let Ok(val) = HeaderValue::from_str(&id) {
        res.headers_mut().insert("x-request-id", val);
    }

    res
}

/// Middleware enforcing a fixed request-per-window limit per client.
pub async fn enforce_rate_limit(
    State(rate_limit): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Response {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_key(peer, req.headers());

    if !rate_limit.admit(&client).await {
        tracing::warn!(client = %client, "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(MiddlewareErrorBody {
                error: MiddlewareError {
                    code: "rate_limited",
                    message: "rate limit exceeded",
                },
            }),
        )
            .into_response();
    }

    next.run(req).await
}

/// Peer IP, else the first `x-forwarded-for` hop, else `"unknown"`.
fn client_key(peer: Option<SocketAddr>, headers: &HeaderMap) -> String {
    if let Some(addr) = peer {
        return addr.ip().to_string();
    }

    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| "unknown".to_string(), ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_key_prefers_peer_address() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.9"));
        let peer: SocketAddr = "192.0.2.7:51000".parse().expect("addr");
        assert_eq!(client_key(Some(peer), &headers), "192.0.2.7");
    }

    #[test]
    fn client_key_uses_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static(" 203.0.113.5 , 10.0.0.1"),
        );
        assert_eq!(client_key(None, &headers), "203.0.113.5");
    }

    #[test]
    fn client_key_falls_back_to_unknown() {
        assert_eq!(client_key(None, &HeaderMap::new()), "unknown");
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));
        assert_eq!(client_key(None, &headers), "unknown");
    }

    #[tokio::test]
    async fn admit_counts_per_client() {
        let limiter = RateLimitState::new(2, Duration::from_secs(60));
        assert!(limiter.admit("a").await);
        assert!(limiter.admit("a").await);
        assert!(!limiter.admit("a").await);
        assert!(limiter.admit("b").await);
    }

    #[tokio::test]
    async fn admit_resets_after_window() {
        let limiter = RateLimitState::new(1, Duration::ZERO);
        assert!(limiter.admit("a").await);
        // A zero-length window has always elapsed.
        assert!(limiter.admit("a").await);
    }

    fn fill_expired(windows: &mut ClientWindows, age: Duration) {
        let started_at = Instant::now()
            .checked_sub(age)
            .expect("instant in the past");
        for i in 0..PRUNE_THRESHOLD {
            windows.clients.insert(
                format!("client-{i}"),
                RateLimitWindow {
                    started_at,
                    count: 1,
                },
            );
        }
    }

    #[tokio::test]
    async fn sweep_runs_at_most_once_per_window() {
        let limiter = RateLimitState::new(5, Duration::from_secs(60));
        let hour = Duration::from_secs(3_600);
        fill_expired(&mut *limiter.windows.lock().await, hour);

        // Swept recently: the full map is left alone.
        assert!(limiter.admit("fresh").await);
        assert_eq!(limiter.windows.lock().await.clients.len(), PRUNE_THRESHOLD + 1);

        limiter.windows.lock().await.last_swept = Instant::now()
            .checked_sub(hour)
            .expect("instant in the past");
        assert!(limiter.admit("another").await);

        let windows = limiter.windows.lock().await;
        assert_eq!(windows.clients.len(), 2);
        assert!(windows.clients.contains_key("fresh"));
        assert!(windows.last_swept.elapsed() < Duration::from_secs(60));
    }

    #[test]
    fn from_config_copies_limits() {
        let limiter = RateLimitState::from_config(&RateLimitConfig {
            max_requests: 7,
            window_secs: 30,
        });
        assert_eq!(limiter.max_requests, 7);
        assert_eq!(limiter.window, Duration::from_secs(30));
    }
}
