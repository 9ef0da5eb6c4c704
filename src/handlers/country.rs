//! Country handlers. Names are unique (case- and padding-insensitive).

use crate::dto::{CountryDto, OwnerDto};
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::mapping::map_all;
use crate::model::Country;
use crate::response::{no_content, success_created, success_many, success_one};
use crate::state::AppState;
use crate::validation::{name_taken, require_body, require_matching_id};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let countries = state.countries.list().await?;
    Ok(success_many(map_all::<_, CountryDto>(&countries)))
}

pub async fn read(State(state): State<AppState>, Path(country_id): Path<i32>) -> Result<Response, AppError> {
    if !state.countries.exists(country_id).await? {
        return Ok(no_content());
    }
    match state.countries.get(country_id).await? {
        Some(country) => Ok(success_one(CountryDto::from(&country))),
        None => Ok(no_content()),
    }
}

pub async fn country_by_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<i32>,
) -> Result<Response, AppError> {
    match state.countries.country_by_owner(owner_id).await? {
        Some(country) => Ok(success_one(CountryDto::from(&country))),
        None => Ok(no_content()),
    }
}

pub async fn owners_from_country(
    State(state): State<AppState>,
    Path(country_id): Path<i32>,
) -> Result<Response, AppError> {
    let owners = state.countries.owners_from_country(country_id).await?;
    Ok(success_many(map_all::<_, OwnerDto>(&owners)))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CountryDto>,
) -> Result<Response, AppError> {
    let dto = require_body(body)?;
    let existing = state.countries.list().await?;
    if name_taken(existing.iter().map(|c| c.name.as_str()), &dto.name) {
        return Err(AppError::unprocessable("Country already exists"));
    }
    let country = Country::from(dto);
    if !state.countries.create(&country).await? {
        return Err(AppError::save_failed("Something went wrong while saving"));
    }
    tracing::info!(name = %country.name, "country created");
    Ok(success_created(StatusCode::OK))
}

pub async fn update(
    State(state): State<AppState>,
    Path(country_id): Path<i32>,
    JsonBody(body): JsonBody<CountryDto>,
) -> Result<Response, AppError> {
    let dto = require_body(body)?;
    require_matching_id(country_id, dto.id)?;
    if !state.countries.exists(country_id).await? {
        return Ok(no_content());
    }
    let country = Country::from(dto);
    if !state.countries.update(&country).await? {
        return Err(AppError::save_failed("Something went wrong updating country"));
    }
    tracing::info!(id = country_id, "country updated");
    Ok(no_content())
}

pub async fn delete(State(state): State<AppState>, Path(country_id): Path<i32>) -> Result<Response, AppError> {
    if !state.countries.exists(country_id).await? {
        return Ok(no_content());
    }
    let Some(country) = state.countries.get(country_id).await? else {
        return Ok(no_content());
    };
    if !state.countries.delete(&country).await? {
        return Err(AppError::save_failed("Something went wrong deleting country"));
    }
    tracing::info!(id = country_id, "country deleted");
    Ok(no_content())
}
