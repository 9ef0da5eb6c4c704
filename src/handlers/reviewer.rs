//! Reviewer handlers.

use crate::dto::{ReviewDto, ReviewerDto};
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::mapping::map_all;
use crate::model::Reviewer;
use crate::response::{no_content, success_created, success_many, success_one};
use crate::state::AppState;
use crate::validation::{require_body, require_matching_id};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};

pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let reviewers = state.reviewers.list().await?;
    Ok(success_many(map_all::<_, ReviewerDto>(&reviewers)))
}

pub async fn read(State(state): State<AppState>, Path(reviewer_id): Path<i32>) -> Result<Response, AppError> {
    if !state.reviewers.exists(reviewer_id).await? {
        return Ok(no_content());
    }
    match state.reviewers.get(reviewer_id).await? {
        Some(reviewer) => Ok(success_one(ReviewerDto::from(&reviewer))),
        None => Ok(no_content()),
    }
}

pub async fn reviews_by_reviewer(
    State(state): State<AppState>,
    Path(reviewer_id): Path<i32>,
) -> Result<Response, AppError> {
    if !state.reviewers.exists(reviewer_id).await? {
        return Ok(no_content());
    }
    let reviews = state.reviewers.reviews_by_reviewer(reviewer_id).await?;
    Ok(success_many(map_all::<_, ReviewDto>(&reviews)))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ReviewerDto>,
) -> Result<Response, AppError> {
    let dto = require_body(body)?;
    let reviewer = Reviewer::from(dto);
    if !state.reviewers.create(&reviewer).await? {
        return Err(AppError::save_failed("Something went wrong while saving"));
    }
    tracing::info!(last_name = %reviewer.last_name, "reviewer created");
    Ok(success_created(StatusCode::CREATED))
}

pub async fn update(
    State(state): State<AppState>,
    Path(reviewer_id): Path<i32>,
    JsonBody(body): JsonBody<ReviewerDto>,
) -> Result<Response, AppError> {
    let dto = require_body(body)?;
    require_matching_id(reviewer_id, dto.id)?;
    if !state.reviewers.exists(reviewer_id).await? {
        return Ok(no_content());
    }
    let reviewer = Reviewer::from(dto);
    if !state.reviewers.update(&reviewer).await? {
        return Err(AppError::save_failed("Something went wrong updating reviewer"));
    }
    tracing::info!(id = reviewer_id, "reviewer updated");
    Ok(no_content())
}

pub async fn delete(State(state): State<AppState>, Path(reviewer_id): Path<i32>) -> Result<Response, AppError> {
    if !state.reviewers.exists(reviewer_id).await? {
        return Ok(no_content());
    }
    let Some(reviewer) = state.reviewers.get(reviewer_id).await? else {
        return Ok(no_content());
    };
    if !state.reviewers.delete(&reviewer).await? {
        return Err(AppError::save_failed("Something went wrong deleting reviewer"));
    }
    tracing::info!(id = reviewer_id, "reviewer deleted");
    Ok(no_content())
}
