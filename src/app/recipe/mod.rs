pub mod filter;
pub mod handler;
pub mod model;
pub mod service;
pub mod store;

use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

use crate::app::AppState;

/// /recipes 路由
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/recipes",
            get(handler::list_recipes).post(handler::create_recipe),
        )
        .route(
            "/recipes/:id",
            get(handler::get_recipe)
                .put(handler::update_recipe)
                .delete(handler::delete_recipe),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handler::create_recipe,
        handler::list_recipes,
        handler::get_recipe,
        handler::update_recipe,
        handler::delete_recipe,
    ),
    components(schemas(model::RecipeDto, crate::core::error::ErrorResponse)),
    tags((name = "recipes", description = "Recipe management"))
)]
pub struct ApiDoc;
