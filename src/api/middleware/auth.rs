//! API key authentication middleware

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;

/// Middleware that requires a valid API key on every request it wraps
///
/// The key is read from either:
/// - Authorization header: `Bearer <api_key>`
/// - X-API-Key header: `<api_key>`
///
/// On success the resolved [`crate::domain::ApiKey`] is stored in the request extensions,
/// where handlers read it to attribute changes.
pub async fn require_api_key(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(api_key_value) = extract_api_key_from_headers(request.headers()) else {
        return ApiError::unauthorized(
            "API key required. Provide via 'Authorization: Bearer <key>' or 'X-API-Key: <key>' header",
        )
        .into_response();
    };

    debug!(
        key_prefix = %api_key_value.chars().take(8).collect::<String>(),
        "Validating API key"
    );

    let api_key = match state.api_key_service.validate(&api_key_value).await {
        Ok(Some(api_key)) => api_key,
        Ok(None) => return ApiError::unauthorized("Invalid API key").into_response(),
        Err(e) => {
            warn!(error = %e, "API key validation failed");
            return ApiError::internal(e.to_string()).into_response();
        }
    };

    if !api_key.is_valid() {
        return ApiError::unauthorized("API key is not active").into_response();
    }

    request.extensions_mut().insert(api_key);
    next.run(request).await
}

/// Bearer wins over X-API-Key; blank or undecodable values count as absent
fn extract_api_key_from_headers(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{extract::Extension, middleware, routing::get, Router};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::api::state::{MockApiKeyServiceTrait, MockWorkspaceServiceTrait};
    use crate::domain::{ApiKey, ApiKeyId, WorkspaceId};

    #[tokio::test]
    async fn test_resolved_key_is_available_to_handlers() {
        let mut keys = MockApiKeyServiceTrait::new();
        keys.expect_validate().returning(|_| {
            Ok(Some(ApiKey::new(
                ApiKeyId::new("agent").unwrap(),
                WorkspaceId::new("acme").unwrap(),
                "Agent",
                "sha256$hash",
                "wsk_agent_key_00",
            )))
        });
        let state = AppState::new(Arc::new(MockWorkspaceServiceTrait::new()), Arc::new(keys));

        let app = Router::new()
            .route(
                "/whoami",
                get(|Extension(key): Extension<ApiKey>| async move { key.id().to_string() }),
            )
            .route_layer(middleware::from_fn_with_state(state.clone(), require_api_key))
            .with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header("x-api-key", "wsk_agent_key_0000000000000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"agent");
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer wsk_test_key_12345".parse().unwrap(),
        );

        assert_eq!(
            extract_api_key_from_headers(&headers).as_deref(),
            Some("wsk_test_key_12345")
        );
    }

    #[test]
    fn test_extract_x_api_key() {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", "wsk_test_key_67890".parse().unwrap());

        assert_eq!(
            extract_api_key_from_headers(&headers).as_deref(),
            Some("wsk_test_key_67890")
        );
    }

    #[test]
    fn test_bearer_takes_precedence() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer wsk_bearer".parse().unwrap());
        headers.insert("x-api-key", "wsk_header".parse().unwrap());

        assert_eq!(
            extract_api_key_from_headers(&headers).as_deref(),
            Some("wsk_bearer")
        );
    }

    #[test]
    fn test_missing_api_key() {
        assert!(extract_api_key_from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_non_bearer_authorization_falls_back_to_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());
        assert!(extract_api_key_from_headers(&headers).is_none());

        headers.insert("x-api-key", "wsk_header".parse().unwrap());
        assert_eq!(
            extract_api_key_from_headers(&headers).as_deref(),
            Some("wsk_header")
        );
    }

    #[test]
    fn test_trimmed_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer   wsk_with_spaces   ".parse().unwrap(),
        );

        assert_eq!(
            extract_api_key_from_headers(&headers).as_deref(),
            Some("wsk_with_spaces")
        );
    }

    #[test]
    fn test_blank_values_are_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer    ".parse().unwrap());
        headers.insert("x-api-key", "  ".parse().unwrap());

        assert!(extract_api_key_from_headers(&headers).is_none());
    }
}
