//! Per-client rate limiting middleware.
//!
//! Two sliding windows:
//! - every route: 100 requests per 15 minutes (configurable)
//! - symptom analysis: 20 analyses per hour (configurable)

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::ConnectInfo;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, RateLimiter};

/// Extract a rate-limit key from the request: the peer IP, or the first
/// `X-Forwarded-For` hop when running behind a trusted proxy.
///
/// Requests without connection info (served without
/// `into_make_service_with_connect_info`) share one bucket.
pub fn rate_key(req: &Request<axum::body::Body>, trust_proxy: bool) -> String {
    if trust_proxy {
        if let Some(ip) = forwarded_for(req) {
            return format!("ip:{ip}");
        }
    }

    match req.extensions().get::<ConnectInfo<SocketAddr>>() {
        Some(ConnectInfo(addr)) => format!("ip:{}", addr.ip()),
        None => "unknown".to_string(),
    }
}

fn forwarded_for(req: &Request<axum::body::Body>) -> Option<&str> {
    req.headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
}

/// General limit applied to every route. Returns 429 if exceeded.
pub async fn limit(req: Request<axum::body::Body>, next: Next) -> Response {
    match limit_inner(req, next, |ctx| &ctx.request_limiter).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Stricter limit for the analysis route.
pub async fn limit_analysis(req: Request<axum::body::Body>, next: Next) -> Response {
    match limit_inner(req, next, |ctx| &ctx.analysis_limiter).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn limit_inner(
    req: Request<axum::body::Body>,
    next: Next,
    pick: fn(&ApiContext) -> &Arc<Mutex<RateLimiter>>,
) -> Result<Response, ApiError> {
    let ctx: ApiContext = req
        .extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or(ApiError::Internal("missing API context".into()))?;

    let key = rate_key(&req, ctx.trust_proxy);

    // MutexGuard is !Send: must drop before .await via block scope
    {
        let mut limiter = pick(&ctx)
            .lock()
            .map_err(|_| ApiError::Internal("rate limiter lock".into()))?;

        limiter.check(&key).map_err(|retry_after| {
            tracing::warn!(key = %key, retry_after, "Rate limit exceeded");
            ApiError::RateLimited { retry_after }
        })?;
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_from(peer: &str, forwarded: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder();
        if let Some(value) = forwarded {
            builder = builder.header("X-Forwarded-For", value);
        }
        let mut req = builder.body(Body::empty()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(peer.parse::<SocketAddr>().unwrap()));
        req
    }

    #[test]
    fn key_uses_peer_ip() {
        let req = request_from("192.0.2.10:51234", None);
        assert_eq!(rate_key(&req, false), "ip:192.0.2.10");
    }

    #[test]
    fn peer_port_does_not_split_the_bucket() {
        let a = request_from("192.0.2.10:51234", None);
        let b = request_from("192.0.2.10:40000", None);
        assert_eq!(rate_key(&a, false), rate_key(&b, false));
    }

    #[test]
    fn forwarded_header_ignored_without_trusted_proxy() {
        let req = request_from("192.0.2.10:51234", Some("203.0.113.7"));
        assert_eq!(rate_key(&req, false), "ip:192.0.2.10");
    }

    #[test]
    fn trusted_proxy_uses_first_forwarded_hop() {
        let req = request_from("10.0.0.1:443", Some("203.0.113.7, 10.0.0.1"));
        assert_eq!(rate_key(&req, true), "ip:203.0.113.7");

        let req = request_from("10.0.0.1:443", None);
        assert_eq!(rate_key(&req, true), "ip:10.0.0.1");
    }

    #[test]
    fn missing_connect_info_shares_one_bucket() {
        let req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(rate_key(&req, false), "unknown");
    }
}
