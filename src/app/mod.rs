//! 应用层：路由与共享状态

pub mod recipe;

use axum::{extract::State, middleware, response::Json, routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::config::HttpConfig;
use crate::core::{error::CoreError, middleware::request_logging_middleware};
use recipe::service::RecipeService;

#[derive(Clone)]
pub struct AppState {
    pub recipe_service: RecipeService,
}

/// OpenAPI 文档
pub fn openapi() -> utoipa::openapi::OpenApi {
    recipe::ApiDoc::openapi()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi())
}

async fn health_check(State(state): State<AppState>) -> Result<Json<serde_json::Value>, CoreError> {
    state.recipe_service.ping().await?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "storage": state.recipe_service.backend(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

/// 组装完整的应用路由
pub fn create_app(recipe_service: RecipeService, http: &HttpConfig) -> Router {
    let state = AppState { recipe_service };

    Router::new()
        .merge(recipe::router())
        .route("/health", get(health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware))
                .layer(TimeoutLayer::new(Duration::from_secs(http.timeout_seconds)))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
