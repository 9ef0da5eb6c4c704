use super::{saved, REVIEW_COLUMNS};
use crate::error::AppError;
use crate::model::{Review, Reviewer};
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewerRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Reviewer>, AppError>;
    async fn get(&self, id: i32) -> Result<Option<Reviewer>, AppError>;
    async fn exists(&self, id: i32) -> Result<bool, AppError>;
    async fn reviews_by_reviewer(&self, reviewer_id: i32) -> Result<Vec<Review>, AppError>;
    async fn create(&self, reviewer: &Reviewer) -> Result<bool, AppError>;
    async fn update(&self, reviewer: &Reviewer) -> Result<bool, AppError>;
    async fn delete(&self, reviewer: &Reviewer) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgReviewerRepository {
    pool: PgPool,
}

impl PgReviewerRepository {
    pub fn new(pool: PgPool) -> Self {
        PgReviewerRepository { pool }
    }
}

#[async_trait]
impl ReviewerRepository for PgReviewerRepository {
    async fn list(&self) -> Result<Vec<Reviewer>, AppError> {
        let sql = "SELECT id, first_name, last_name FROM reviewers ORDER BY id";
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Reviewer>(sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i32) -> Result<Option<Reviewer>, AppError> {
        let sql = "SELECT id, first_name, last_name FROM reviewers WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Reviewer>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM reviewers WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn reviews_by_reviewer(&self, reviewer_id: i32) -> Result<Vec<Review>, AppError> {
        let sql = format!(
            "SELECT {} FROM reviews WHERE reviewer_id = $1 ORDER BY id",
            REVIEW_COLUMNS
        );
        tracing::debug!(sql = %sql, reviewer_id, "query");
        Ok(sqlx::query_as::<_, Review>(&sql)
            .bind(reviewer_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn create(&self, reviewer: &Reviewer) -> Result<bool, AppError> {
        let sql = "INSERT INTO reviewers (first_name, last_name) VALUES ($1, $2)";
        tracing::debug!(sql = %sql, "execute");
        let result = sqlx::query(sql)
            .bind(&reviewer.first_name)
            .bind(&reviewer.last_name)
            .execute(&self.pool)
            .await?;
        Ok(saved(result))
    }

    async fn update(&self, reviewer: &Reviewer) -> Result<bool, AppError> {
        let sql = "UPDATE reviewers SET first_name = $2, last_name = $3 WHERE id = $1";
        tracing::debug!(sql = %sql, id = reviewer.id, "execute");
        let result = sqlx::query(sql)
            .bind(reviewer.id)
            .bind(&reviewer.first_name)
            .bind(&reviewer.last_name)
            .execute(&self.pool)
            .await?;
        Ok(saved(result))
    }

    async fn delete(&self, reviewer: &Reviewer) -> Result<bool, AppError> {
        let sql = "DELETE FROM reviewers WHERE id = $1";
        tracing::debug!(sql = %sql, id = reviewer.id, "execute");
        let result = sqlx::query(sql).bind(reviewer.id).execute(&self.pool).await?;
        Ok(saved(result))
    }
}
