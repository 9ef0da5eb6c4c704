use super::{saved, REVIEW_COLUMNS};
use crate::error::AppError;
use crate::model::Review;
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Review>, AppError>;
    async fn get(&self, id: i32) -> Result<Option<Review>, AppError>;
    async fn exists(&self, id: i32) -> Result<bool, AppError>;
    async fn reviews_of_pokemon(&self, pokemon_id: i32) -> Result<Vec<Review>, AppError>;
    /// Insert with `review.pokemon_id` and `review.reviewer_id`, which the caller has resolved.
    async fn create(&self, review: &Review) -> Result<bool, AppError>;
    /// Updates title, text and rating; associations are kept.
    async fn update(&self, review: &Review) -> Result<bool, AppError>;
    async fn delete(&self, review: &Review) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        PgReviewRepository { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn list(&self) -> Result<Vec<Review>, AppError> {
        let sql = format!("SELECT {} FROM reviews ORDER BY id", REVIEW_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Review>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i32) -> Result<Option<Review>, AppError> {
        let sql = format!("SELECT {} FROM reviews WHERE id = $1", REVIEW_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Review>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM reviews WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn reviews_of_pokemon(&self, pokemon_id: i32) -> Result<Vec<Review>, AppError> {
        let sql = format!(
            "SELECT {} FROM reviews WHERE pokemon_id = $1 ORDER BY id",
            REVIEW_COLUMNS
        );
        tracing::debug!(sql = %sql, pokemon_id, "query");
        Ok(sqlx::query_as::<_, Review>(&sql)
            .bind(pokemon_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn create(&self, review: &Review) -> Result<bool, AppError> {
        let sql = "INSERT INTO reviews (title, text, rating, pokemon_id, reviewer_id) VALUES ($1, $2, $3, $4, $5)";
        tracing::debug!(
            sql = %sql,
            pokemon_id = ?review.pokemon_id,
            reviewer_id = ?review.reviewer_id,
            "execute"
        );
        let result = sqlx::query(sql)
            .bind(&review.title)
            .bind(&review.text)
            .bind(review.rating)
            .bind(review.pokemon_id)
            .bind(review.reviewer_id)
            .execute(&self.pool)
            .await?;
        Ok(saved(result))
    }

    async fn update(&self, review: &Review) -> Result<bool, AppError> {
        let sql = "UPDATE reviews SET title = $2, text = $3, rating = $4 WHERE id = $1";
        tracing::debug!(sql = %sql, id = review.id, "execute");
        let result = sqlx::query(sql)
            .bind(review.id)
            .bind(&review.title)
            .bind(&review.text)
            .bind(review.rating)
            .execute(&self.pool)
            .await?;
        Ok(saved(result))
    }

    async fn delete(&self, review: &Review) -> Result<bool, AppError> {
        let sql = "DELETE FROM reviews WHERE id = $1";
        tracing::debug!(sql = %sql, id = review.id, "execute");
        let result = sqlx::query(sql).bind(review.id).execute(&self.pool).await?;
        Ok(saved(result))
    }
}
