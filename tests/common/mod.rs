use std::io::Write;

use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use tempfile::NamedTempFile;
use tower::ServiceExt;

use workspace_agent_api::{api::create_router, create_app_state_with_config, AppConfig};

pub const BOOTSTRAP_KEY: &str = "wsk_bootstrap_integration_0001";
pub const SEEDED_KEY: &str = "wsk_seeded_agent_key_000000000";

const SEED: &str = r#"
[[projects]]
id = "shop"
title = "Shop"
description = "Storefront rewrite"

[[projects.features]]
id = "checkout"
title = "Checkout flow"
status = "in_progress"
annotations = "Payment provider chosen"

[[projects.features]]
id = "cart"
title = "Cart"

[[projects]]
id = "billing"
title = "Billing"
description = "Invoices"

[[projects.features]]
id = "invoices"
title = "Invoice PDFs"
status = "blocked"

[[api_keys]]
id = "agent"
name = "Coding agent"
key = "wsk_seeded_agent_key_000000000"
"#;

/// Router over a seeded in-memory workspace "acme"
pub async fn seeded_app() -> Router {
    let mut seed = NamedTempFile::new().unwrap();
    seed.write_all(SEED.as_bytes()).unwrap();

    let mut config = AppConfig::default();
    config.workspace.id = "acme".to_string();
    config.workspace.name = "Acme".to_string();
    config.seed.path = Some(seed.path().display().to_string());
    config.auth.bootstrap_key = Some(BOOTSTRAP_KEY.to_string());

    let state = create_app_state_with_config(&config).await.unwrap();
    create_router(state, None)
}

pub fn get(uri: &str, key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(key) = key {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", key));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, key: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
