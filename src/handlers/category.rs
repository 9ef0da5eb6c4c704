//! Category handlers. Names are unique (case- and padding-insensitive).

use crate::dto::{CategoryDto, PokemonDto};
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::mapping::map_all;
use crate::model::Category;
use crate::response::{no_content, success_created, success_many, success_one};
use crate::state::AppState;
use crate::validation::{name_taken, require_body, require_matching_id};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let categories = state.categories.list().await?;
    Ok(success_many(map_all::<_, CategoryDto>(&categories)))
}

pub async fn read(State(state): State<AppState>, Path(category_id): Path<i32>) -> Result<Response, AppError> {
    if !state.categories.exists(category_id).await? {
        return Ok(no_content());
    }
    match state.categories.get(category_id).await? {
        Some(category) => Ok(success_one(CategoryDto::from(&category))),
        None => Ok(no_content()),
    }
}

pub async fn pokemon_by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<Response, AppError> {
    let pokemon = state.categories.pokemon_by_category(category_id).await?;
    Ok(success_many(map_all::<_, PokemonDto>(&pokemon)))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CategoryDto>,
) -> Result<Response, AppError> {
    let dto = require_body(body)?;
    let existing = state.categories.list().await?;
    if name_taken(existing.iter().map(|c| c.name.as_str()), &dto.name) {
        return Err(AppError::unprocessable("Category already exists"));
    }
    let category = Category::from(dto);
    if !state.categories.create(&category).await? {
        return Err(AppError::save_failed("Something went wrong while saving"));
    }
    tracing::info!(name = %category.name, "category created");
    Ok(success_created(StatusCode::CREATED))
}

pub async fn update(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
    JsonBody(body): JsonBody<CategoryDto>,
) -> Result<Response, AppError> {
    let dto = require_body(body)?;
    require_matching_id(category_id, dto.id)?;
    if !state.categories.exists(category_id).await? {
        return Ok(no_content());
    }
    let category = Category::from(dto);
    if !state.categories.update(&category).await? {
        return Err(AppError::save_failed("Something went wrong updating category"));
    }
    tracing::info!(id = category_id, "category updated");
    Ok(no_content())
}

pub async fn delete(State(state): State<AppState>, Path(category_id): Path<i32>) -> Result<Response, AppError> {
    if !state.categories.exists(category_id).await? {
        return Ok(no_content());
    }
    let Some(category) = state.categories.get(category_id).await? else {
        return Ok(no_content());
    };
    if !state.categories.delete(&category).await? {
        return Err(AppError::save_failed("Something went wrong deleting category"));
    }
    tracing::info!(id = category_id, "category deleted");
    Ok(no_content())
}
