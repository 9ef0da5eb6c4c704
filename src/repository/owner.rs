use super::{saved, OWNER_COLUMNS, POKEMON_COLUMNS};
use crate::error::AppError;
use crate::model::{Owner, Pokemon};
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnerRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Owner>, AppError>;
    async fn get(&self, id: i32) -> Result<Option<Owner>, AppError>;
    async fn exists(&self, id: i32) -> Result<bool, AppError>;
    async fn pokemon_by_owner(&self, owner_id: i32) -> Result<Vec<Pokemon>, AppError>;
    async fn owners_of_pokemon(&self, pokemon_id: i32) -> Result<Vec<Owner>, AppError>;
    /// Insert with `owner.country_id`, which the caller has resolved.
    async fn create(&self, owner: &Owner) -> Result<bool, AppError>;
    /// Updates scalar fields only; the country association is kept.
    async fn update(&self, owner: &Owner) -> Result<bool, AppError>;
    async fn delete(&self, owner: &Owner) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgOwnerRepository {
    pool: PgPool,
}

impl PgOwnerRepository {
    pub fn new(pool: PgPool) -> Self {
        PgOwnerRepository { pool }
    }
}

#[async_trait]
impl OwnerRepository for PgOwnerRepository {
    async fn list(&self) -> Result<Vec<Owner>, AppError> {
        let sql = format!("SELECT {} FROM owners o ORDER BY o.id", OWNER_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Owner>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i32) -> Result<Option<Owner>, AppError> {
        let sql = format!("SELECT {} FROM owners o WHERE o.id = $1", OWNER_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Owner>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM owners WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn pokemon_by_owner(&self, owner_id: i32) -> Result<Vec<Pokemon>, AppError> {
        let sql = format!(
            "SELECT {} FROM pokemon p JOIN pokemon_owners po ON po.pokemon_id = p.id \
             WHERE po.owner_id = $1 ORDER BY p.id",
            POKEMON_COLUMNS
        );
        tracing::debug!(sql = %sql, owner_id, "query");
        Ok(sqlx::query_as::<_, Pokemon>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn owners_of_pokemon(&self, pokemon_id: i32) -> Result<Vec<Owner>, AppError> {
        let sql = format!(
            "SELECT {} FROM owners o JOIN pokemon_owners po ON po.owner_id = o.id \
             WHERE po.pokemon_id = $1 ORDER BY o.id",
            OWNER_COLUMNS
        );
        tracing::debug!(sql = %sql, pokemon_id, "query");
        Ok(sqlx::query_as::<_, Owner>(&sql)
            .bind(pokemon_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn create(&self, owner: &Owner) -> Result<bool, AppError> {
        let sql = "INSERT INTO owners (first_name, last_name, gym, country_id) VALUES ($1, $2, $3, $4)";
        tracing::debug!(sql = %sql, country_id = ?owner.country_id, "execute");
        let result = sqlx::query(sql)
            .bind(&owner.first_name)
            .bind(&owner.last_name)
            .bind(&owner.gym)
            .bind(owner.country_id)
            .execute(&self.pool)
            .await?;
        Ok(saved(result))
    }

    async fn update(&self, owner: &Owner) -> Result<bool, AppError> {
        let sql = "UPDATE owners SET first_name = $2, last_name = $3, gym = $4 WHERE id = $1";
        tracing::debug!(sql = %sql, id = owner.id, "execute");
        let result = sqlx::query(sql)
            .bind(owner.id)
            .bind(&owner.first_name)
            .bind(&owner.last_name)
            .bind(&owner.gym)
            .execute(&self.pool)
            .await?;
        Ok(saved(result))
    }

    async fn delete(&self, owner: &Owner) -> Result<bool, AppError> {
        let sql = "DELETE FROM owners WHERE id = $1";
        tracing::debug!(sql = %sql, id = owner.id, "execute");
        let result = sqlx::query(sql).bind(owner.id).execute(&self.pool).await?;
        Ok(saved(result))
    }
}
