//! Pokemon handlers. A pokemon is always linked to one owner and one category
//! (`?ownerId=&catId=`); deleting it removes its reviews in the same transaction.

use crate::dto::{PokemonDto, RatingDto};
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::mapping::map_all;
use crate::model::Pokemon;
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
pub struct PokemonRefs {
    pub owner_id: i32,
    pub cat_id: i32,
}

impl PokemonRefs {
    async fn check(&self, state: &AppState) -> Result<(), AppError> {
        if !state.owners.exists(self.owner_id).await? {
            return Err(AppError::unprocessable("Owner does not exist"));
        }
        if !state.categories.exists(self.cat_id).await? {
            return Err(AppError::unprocessable("Category does not exist"));
        }
        Ok(())
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let pokemon = state.pokemon.list().await?;
    Ok(success_many(map_all::<_, PokemonDto>(&pokemon)))
}

pub async fn read(State(state): State<AppState>, Path(pokemon_id): Path<i32>) -> Result<Response, AppError> {
    if !state.pokemon.exists(pokemon_id).await? {
        return Ok(no_content());
    }
    match state.pokemon.get(pokemon_id).await? {
        Some(pokemon) => Ok(success_one(PokemonDto::from(&pokemon))),
        None => Ok(no_content()),
    }
}

pub async fn rating(State(state): State<AppState>, Path(pokemon_id): Path<i32>) -> Result<Response, AppError> {
    if !state.pokemon.exists(pokemon_id).await? {
        return Ok(no_content());
    }
    let rating = state.pokemon.rating(pokemon_id).await?;
    Ok(success_one(RatingDto { pokemon_id, rating }))
}

pub async fn create(
    State(state): State<AppState>,
    Query(refs): Query<PokemonRefs>,
    JsonBody(body): JsonBody<PokemonDto>,
) -> Result<Response, AppError> {
    let dto = require_body(body)?;
    refs.check(&state).await?;
    let pokemon = Pokemon::from(dto);
    if !state.pokemon.create(refs.owner_id, refs.cat_id, &pokemon).await? {
        return Err(AppError::save_failed("Something went wrong while saving"));
    }
    tracing::info!(name = %pokemon.name, owner_id = refs.owner_id, category_id = refs.cat_id, "pokemon created");
    Ok(success_created(StatusCode::OK))
}

pub async fn update(
    State(state): State<AppState>,
    Path(pokemon_id): Path<i32>,
    Query(refs): Query<PokemonRefs>,
    JsonBody(body): JsonBody<PokemonDto>,
) -> Result<Response, AppError> {
    let dto = require_body(body)?;
    require_matching_id(pokemon_id, dto.id)?;
    if !state.pokemon.exists(pokemon_id).await? {
        return Ok(no_content());
    }
    refs.check(&state).await?;
    let pokemon = Pokemon::from(dto);
    if !state.pokemon.update(refs.owner_id, refs.cat_id, &pokemon).await? {
        return Err(AppError::save_failed("Something went wrong updating pokemon"));
    }
    tracing::info!(id = pokemon_id, "pokemon updated");
    Ok(no_content())
}

pub async fn delete(State(state): State<AppState>, Path(pokemon_id): Path<i32>) -> Result<Response, AppError> {
    if !state.pokemon.exists(pokemon_id).await? {
        return Ok(no_content());
    }
    let reviews = state.reviews.reviews_of_pokemon(pokemon_id).await?;
    let Some(pokemon) = state.pokemon.get(pokemon_id).await? else {
        return Ok(no_content());
    };
    if !state.pokemon.delete(&pokemon, &reviews).await? {
        return Err(AppError::save_failed("Something went wrong deleting pokemon"));
    }
    tracing::info!(id = pokemon_id, reviews = reviews.len(), "pokemon deleted");
    Ok(no_content())
}
