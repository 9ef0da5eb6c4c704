//! Owner handlers. An owner is created inside an existing country (`?countryId=`).

use crate::dto::{OwnerDto, PokemonDto};
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::mapping::map_all;
use crate::model::Owner;
use crate::response::{no_content, success_created, success_many, success_one};
use crate::state::AppState;
use crate::validation::{require_body, require_matching_id};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRefs {
    pub country_id: i32,
}

pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let owners = state.owners.list().await?;
    Ok(success_many(map_all::<_, OwnerDto>(&owners)))
}

pub async fn read(State(state): State<AppState>, Path(owner_id): Path<i32>) -> Result<Response, AppError> {
    if !state.owners.exists(owner_id).await? {
        return Ok(no_content());
    }
    match state.owners.get(owner_id).await? {
        Some(owner) => Ok(success_one(OwnerDto::from(&owner))),
        None => Ok(no_content()),
    }
}

pub async fn pokemon_by_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<i32>,
) -> Result<Response, AppError> {
    let pokemon = state.owners.pokemon_by_owner(owner_id).await?;
    Ok(success_many(map_all::<_, PokemonDto>(&pokemon)))
}

pub async fn owners_of_pokemon(
    State(state): State<AppState>,
    Path(pokemon_id): Path<i32>,
) -> Result<Response, AppError> {
    let owners = state.owners.owners_of_pokemon(pokemon_id).await?;
    Ok(success_many(map_all::<_, OwnerDto>(&owners)))
}

pub async fn create(
    State(state): State<AppState>,
    Query(refs): Query<OwnerRefs>,
    JsonBody(body): JsonBody<OwnerDto>,
) -> Result<Response, AppError> {
    let dto = require_body(body)?;
    let Some(country) = state.countries.get(refs.country_id).await? else {
        return Err(AppError::unprocessable("Country does not exist"));
    };
    let mut owner = Owner::from(dto);
    owner.country_id = Some(country.id);
    if !state.owners.create(&owner).await? {
        return Err(AppError::save_failed("Something went wrong while saving"));
    }
    tracing::info!(country_id = country.id, "owner created");
    Ok(success_created(StatusCode::OK))
}

pub async fn update(
    State(state): State<AppState>,
    Path(owner_id): Path<i32>,
    JsonBody(body): JsonBody<OwnerDto>,
) -> Result<Response, AppError> {
    let dto = require_body(body)?;
    require_matching_id(owner_id, dto.id)?;
    if !state.owners.exists(owner_id).await? {
        return Ok(no_content());
    }
    let owner = Owner::from(dto);
    if !state.owners.update(&owner).await? {
        return Err(AppError::save_failed("Something went wrong updating owner"));
    }
    tracing::info!(id = owner_id, "owner updated");
    Ok(no_content())
}

pub async fn delete(State(state): State<AppState>, Path(owner_id): Path<i32>) -> Result<Response, AppError> {
    if !state.owners.exists(owner_id).await? {
        return Ok(no_content());
    }
    let Some(owner) = state.owners.get(owner_id).await? else {
        return Ok(no_content());
    };
    if !state.owners.delete(&owner).await? {
        return Err(AppError::save_failed("Something went wrong deleting owner"));
    }
    tracing::info!(id = owner_id, "owner deleted");
    Ok(no_content())
}
