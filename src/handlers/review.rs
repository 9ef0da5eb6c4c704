//! Review handlers. A review is created for an existing pokemon by an existing
//! reviewer (`?reviewerId=&pokeId=`).

use crate::dto::ReviewDto;
use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::mapping::map_all;
use crate::model::Review;
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
pub struct ReviewRefs {
    pub reviewer_id: i32,
    pub poke_id: i32,
}

pub async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let reviews = state.reviews.list().await?;
    Ok(success_many(map_all::<_, ReviewDto>(&reviews)))
}

pub async fn read(State(state): State<AppState>, Path(review_id): Path<i32>) -> Result<Response, AppError> {
    if !state.reviews.exists(review_id).await? {
        return Ok(no_content());
    }
    match state.reviews.get(review_id).await? {
        Some(review) => Ok(success_one(ReviewDto::from(&review))),
        None => Ok(no_content()),
    }
}

pub async fn reviews_of_pokemon(
    State(state): State<AppState>,
    Path(pokemon_id): Path<i32>,
) -> Result<Response, AppError> {
    let reviews = state.reviews.reviews_of_pokemon(pokemon_id).await?;
    Ok(success_many(map_all::<_, ReviewDto>(&reviews)))
}

pub async fn create(
    State(state): State<AppState>,
    Query(refs): Query<ReviewRefs>,
    JsonBody(body): JsonBody<ReviewDto>,
) -> Result<Response, AppError> {
    let dto = require_body(body)?;
    let mut review = Review::from(dto);
    let Some(pokemon) = state.pokemon.get(refs.poke_id).await? else {
        return Err(AppError::unprocessable("Pokemon does not exist"));
    };
    let Some(reviewer) = state.reviewers.get(refs.reviewer_id).await? else {
        return Err(AppError::unprocessable("Reviewer does not exist"));
    };
    review.pokemon_id = Some(pokemon.id);
    review.reviewer_id = Some(reviewer.id);
    if !state.reviews.create(&review).await? {
        return Err(AppError::save_failed("Something went wrong while saving"));
    }
    tracing::info!(pokemon_id = pokemon.id, reviewer_id = reviewer.id, "review created");
    Ok(success_created(StatusCode::OK))
}

pub async fn update(
    State(state): State<AppState>,
    Path(review_id): Path<i32>,
    JsonBody(body): JsonBody<ReviewDto>,
) -> Result<Response, AppError> {
    let dto = require_body(body)?;
    require_matching_id(review_id, dto.id)?;
    if !state.reviews.exists(review_id).await? {
        return Ok(no_content());
    }
    let review = Review::from(dto);
    if !state.reviews.update(&review).await? {
        return Err(AppError::save_failed("Something went wrong updating review"));
    }
    tracing::info!(id = review_id, "review updated");
    Ok(no_content())
}

pub async fn delete(State(state): State<AppState>, Path(review_id): Path<i32>) -> Result<Response, AppError> {
    if !state.reviews.exists(review_id).await? {
        return Ok(no_content());
    }
    let Some(review) = state.reviews.get(review_id).await? else {
        return Ok(no_content());
    };
    if !state.reviews.delete(&review).await? {
        return Err(AppError::save_failed("Something went wrong deleting review"));
    }
    tracing::info!(id = review_id, "review deleted");
    Ok(no_content())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{delete as delete_req, get, post_json, put_json, send, Mocks};
    use crate::model::{Pokemon, Reviewer};
    use chrono::NaiveDate;
    use serde_json::json;

    fn review() -> Review {
        Review {
            id: 5,
            title: "Loyal".into(),
            text: "Never evolves".into(),
            rating: 5,
            pokemon_id: Some(25),
            reviewer_id: Some(2),
        }
    }

    fn pikachu() -> Pokemon {
        Pokemon {
            id: 25,
            name: "Pikachu".into(),
            birth_date: NaiveDate::from_ymd_opt(1996, 2, 27)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap(),
        }
    }

    fn oak() -> Reviewer {
        Reviewer {
            id: 2,
            first_name: "Samuel".into(),
            last_name: "Oak".into(),
        }
    }

    #[tokio::test]
    async fn list_returns_reviews() {
        let mut mocks = Mocks::new();
        mocks.reviews.expect_list().times(1).returning(|| Ok(vec![review()]));

        let (status, body) = send(mocks, get("/api/review")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{"id": 5, "title": "Loyal", "text": "Never evolves", "rating": 5}])
        );
    }

    #[tokio::test]
    async fn read_missing_review_is_no_content() {
        let mut mocks = Mocks::new();
        mocks.reviews.expect_exists().times(1).returning(|_| Ok(false));

        let (status, _) = send(mocks, get("/api/review/5")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn reviews_of_a_pokemon() {
        let mut mocks = Mocks::new();
        mocks
            .reviews
            .expect_reviews_of_pokemon()
            .withf(|id| *id == 25)
            .times(1)
            .returning(|_| Ok(vec![review()]));

        let (status, body) = send(mocks, get("/api/review/pokemon/25")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn create_resolves_pokemon_and_reviewer() {
        let mut mocks = Mocks::new();
        mocks.pokemon.expect_get().withf(|id| *id == 25).times(1).returning(|_| Ok(Some(pikachu())));
        mocks.reviewers.expect_get().withf(|id| *id == 2).times(1).returning(|_| Ok(Some(oak())));
        mocks
            .reviews
            .expect_create()
            .withf(|r: &Review| r.pokemon_id == Some(25) && r.reviewer_id == Some(2) && r.rating == 5)
            .times(1)
            .returning(|_| Ok(true));

        let body = json!({"title": "Loyal", "text": "Never evolves", "rating": 5});
        let (status, body) = send(mocks, post_json("/api/review?reviewerId=2&pokeId=25", body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!("Successfully created"));
    }

    #[tokio::test]
    async fn create_for_unknown_reviewer_is_unprocessable() {
        let mut mocks = Mocks::new();
        mocks.pokemon.expect_get().returning(|_| Ok(Some(pikachu())));
        mocks.reviewers.expect_get().times(1).returning(|_| Ok(None));
        mocks.reviews.expect_create().never();

        let body = json!({"title": "Loyal", "text": "Never evolves", "rating": 5});
        let (status, body) = send(mocks, post_json("/api/review?reviewerId=2&pokeId=25", body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, json!({"": ["Reviewer does not exist"]}));
    }

    #[tokio::test]
    async fn create_with_null_body_is_bad_request() {
        let mut mocks = Mocks::new();
        mocks.reviews.expect_create().never();

        let (status, _) = send(
            mocks,
            post_json("/api/review?reviewerId=2&pokeId=25", serde_json::Value::Null),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_existing_review() {
        let mut mocks = Mocks::new();
        mocks.reviews.expect_exists().times(1).returning(|_| Ok(true));
        mocks
            .reviews
            .expect_update()
            .withf(|r: &Review| r.id == 5 && r.rating == 3)
            .times(1)
            .returning(|_| Ok(true));

        let body = json!({"id": 5, "title": "Loyal", "text": "Meh", "rating": 3});
        let (status, _) = send(mocks, put_json("/api/review/5", body)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn update_with_mismatched_id_is_bad_request() {
        let mut mocks = Mocks::new();
        mocks.reviews.expect_update().never();

        let body = json!({"id": 6, "title": "Loyal", "text": "Meh", "rating": 3});
        let (status, _) = send(mocks, put_json("/api/review/5", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_existing_review() {
        let mut mocks = Mocks::new();
        mocks.reviews.expect_exists().times(1).returning(|_| Ok(true));
        mocks.reviews.expect_get().times(1).returning(|_| Ok(Some(review())));
        mocks
            .reviews
            .expect_delete()
            .withf(|r: &Review| r.id == 5)
            .times(1)
            .returning(|_| Ok(true));

        let (status, _) = send(mocks, delete_req("/api/review/5")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn update_missing_review_is_no_content() {
        let mut mocks = Mocks::new();
        mocks.reviews.expect_exists().withf(|id| *id == 5).times(1).returning(|_| Ok(false));
        mocks.reviews.expect_update().never();

        let body = json!({"id": 5, "title": "Loyal", "text": "Meh", "rating": 3});
        let (status, _) = send(mocks, put_json("/api/review/5", body)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn delete_missing_review_skips_delete() {
        let mut mocks = Mocks::new();
        mocks.reviews.expect_exists().withf(|id| *id == 5).times(1).returning(|_| Ok(false));
        mocks.reviews.expect_get().never();
        mocks.reviews.expect_delete().never();

        let (status, _) = send(mocks, delete_req("/api/review/5")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
