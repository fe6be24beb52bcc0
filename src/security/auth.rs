//! Token authentication middleware.
//!
//! A request is accepted when it carries a known token either as the
//! `token` query parameter or as `Authorization: Bearer <token>`.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::http::error::ApiError;
use crate::security::tokens::ApiTokens;

pub async fn token_auth_middleware(
    State(tokens): State<Arc<ApiTokens>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request_tokens(&request);
    if presented.iter().any(|t| tokens.is_valid(t)) {
        return Ok(next.run(request).await);
    }
    if !presented.is_empty() {
        tracing::warn!(path = %request.uri().path(), "Rejected request with invalid token");
    }
    Err(ApiError::Unauthorized)
}

/// Every token the request carries: the `token` query parameter first, then
/// the bearer header.
fn request_tokens(request: &Request<Body>) -> Vec<String> {
    let from_query = request.uri().query().and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
    });

    let from_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string());

    from_query.into_iter().chain(from_header).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn request(uri: &str, bearer: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_token_from_query() {
        let req = request("/ping?addr=1.1.1.1&token=abc%2Bdef", None);
        assert_eq!(request_tokens(&req), vec!["abc+def"]);
    }

    #[test]
    fn test_token_from_bearer_header() {
        let req = request("/debug", Some("secret"));
        assert_eq!(request_tokens(&req), vec!["secret"]);
    }

    #[test]
    fn test_query_and_header_both_collected() {
        let req = request("/ping?addr=1.1.1.1&token=stale", Some("fresh"));
        assert_eq!(request_tokens(&req), vec!["stale", "fresh"]);
    }

    #[test]
    fn test_no_token() {
        assert!(request_tokens(&request("/ping?addr=1.1.1.1", None)).is_empty());
    }

    async fn status_of(req: Request<Body>) -> StatusCode {
        let tokens = Arc::new(ApiTokens::new(["fresh"]));
        let app = Router::new()
            .route("/ping", get(|| async { "ok" }))
            .route_layer(middleware::from_fn_with_state(tokens, token_auth_middleware));
        app.oneshot(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_valid_bearer_wins_over_stale_query_token() {
        let req = request("/ping?token=stale", Some("fresh"));
        assert_eq!(status_of(req).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_valid_query_wins_over_stale_bearer() {
        let req = request("/ping?token=fresh", Some("stale"));
        assert_eq!(status_of(req).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_only_invalid_tokens_rejected() {
        assert_eq!(
            status_of(request("/ping?token=stale", Some("old"))).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(request("/ping", None)).await, StatusCode::UNAUTHORIZED);
    }
}
