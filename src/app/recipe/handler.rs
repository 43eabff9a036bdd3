//! 菜谱处理器

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use super::{filter::FilterParams, model::RecipeDto};
use crate::app::AppState;
use crate::core::error::{CoreError, ErrorResponse};

// 提取器失败统一转成 CoreError，响应体与其它错误同形

fn json_body(payload: Result<Json<RecipeDto>, JsonRejection>) -> Result<RecipeDto, CoreError> {
    payload
        .map(|Json(dto)| dto)
        .map_err(|rejection| CoreError::BadRequest(rejection.body_text()))
}

fn recipe_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, CoreError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| CoreError::BadRequest(rejection.body_text()))
}

fn filter_params(
    query: Result<Query<FilterParams>, QueryRejection>,
) -> Result<FilterParams, CoreError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| CoreError::BadRequest(rejection.body_text()))
}

/// Create a recipe
#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    request_body = RecipeDto,
    responses(
        (status = 201, description = "Recipe created", body = RecipeDto),
        (status = 400, description = "Missing or invalid field", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipeDto>, JsonRejection>,
) -> Result<(StatusCode, Json<RecipeDto>), CoreError> {
    let recipe = json_body(payload)?.into_new_recipe()?;
    let recipe = state.recipe_service.create(recipe).await?;
    Ok((StatusCode::CREATED, Json(recipe.into())))
}

/// Get a specific recipe
#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "recipes",
    params(("id" = Uuid, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe details", body = RecipeDto),
        (status = 400, description = "Malformed recipe id", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<RecipeDto>, CoreError> {
    let id = recipe_id(path)?;
    let recipe = state
        .recipe_service
        .find_by_id(id)
        .await?
        .ok_or_else(|| CoreError::NotFound(format!("Recipe {} not found", id)))?;

    Ok(Json(recipe.into()))
}

/// Get a list of available recipes
#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipes",
    params(FilterParams),
    responses(
        (status = 200, description = "Matching recipes", body = [RecipeDto]),
        (status = 400, description = "Malformed filter value", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(state): State<AppState>,
    query: Result<Query<FilterParams>, QueryRejection>,
) -> Result<Json<Vec<RecipeDto>>, CoreError> {
    let params = filter_params(query)?;
    let recipes = state.recipe_service.find(&params).await?;
    Ok(Json(recipes.into_iter().map(RecipeDto::from).collect()))
}

/// Update a specific recipe
///
/// 请求体中的 id 必须与路径一致，校验先于任何修改。
#[utoipa::path(
    put,
    path = "/recipes/{id}",
    tag = "recipes",
    params(("id" = Uuid, Path, description = "Recipe ID")),
    request_body = RecipeDto,
    responses(
        (status = 204, description = "Recipe updated"),
        (status = 400, description = "Id mismatch or invalid field", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<RecipeDto>, JsonRejection>,
) -> Result<StatusCode, CoreError> {
    let id = recipe_id(path)?;
    let dto = json_body(payload)?;
    if dto.id != Some(id) {
        return Err(CoreError::BadRequest(format!(
            "Body id does not match path id {}",
            id
        )));
    }

    let recipe = dto.into_recipe(id)?;
    state.recipe_service.update(recipe).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a specific recipe
#[utoipa::path(
    delete,
    path = "/recipes/{id}",
    tag = "recipes",
    params(("id" = Uuid, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Recipe deleted or did not exist"),
        (status = 400, description = "Malformed recipe id", body = ErrorResponse)
    )
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, CoreError> {
    let id = recipe_id(path)?;
    state.recipe_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
