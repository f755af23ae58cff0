//! Request handling.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4) and echo it on the response
//! - Extract relay-relevant information (host, path, raw query)
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Path and query are kept undecoded; the banner echoes them verbatim

use axum::http::{header, HeaderName, HeaderValue, Request};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use uuid::Uuid;

use crate::merge::RelayRequest;

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Issues a fresh UUID v4 per request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Assigns `x-request-id` unless the client sent one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuidV4> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4)
}

/// Copies `x-request-id` from the request onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// The request ID, or `unknown` when absent.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Pull host, path and raw query out of an incoming request.
pub fn relay_request<B>(request: &Request<B>) -> RelayRequest {
    let uri = request.uri();
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(ToString::to_string))
        .unwrap_or_default();

    RelayRequest {
        host,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn extracts_host_path_and_query() {
        let req = Request::builder()
            .uri("/mobile?Rule&URL%20Rewrite")
            .header("Host", "relay.example:3000")
            .body(Body::empty())
            .unwrap();

        let relay = relay_request(&req);
        assert_eq!(relay.host, "relay.example:3000");
        assert_eq!(relay.path, "/mobile");
        assert_eq!(relay.query.as_deref(), Some("Rule&URL%20Rewrite"));
        assert_eq!(relay.path_and_query(), "/mobile?Rule&URL%20Rewrite");
    }

    #[test]
    fn host_falls_back_to_authority() {
        let req = Request::builder()
            .uri("http://relay.example/")
            .body(Body::empty())
            .unwrap();

        let relay = relay_request(&req);
        assert_eq!(relay.host, "relay.example");
        assert_eq!(relay.query, None);
    }

    #[test]
    fn empty_query_is_kept() {
        let req = Request::builder().uri("/?").body(Body::empty()).unwrap();
        assert_eq!(relay_request(&req).query.as_deref(), Some(""));
    }

    #[test]
    fn request_id_is_generated() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let id = MakeRequestUuidV4.make_request_id(&req).unwrap();
        let value = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(value).is_ok());
        assert_eq!(request_id(&req), "unknown");
    }
}
