use super::{saved, POKEMON_COLUMNS};
use crate::error::AppError;
use crate::model::{Pokemon, Review};
use async_trait::async_trait;
use sqlx::PgPool;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PokemonRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Pokemon>, AppError>;
    async fn get(&self, id: i32) -> Result<Option<Pokemon>, AppError>;
    async fn exists(&self, id: i32) -> Result<bool, AppError>;
    /// Mean review rating; 0 when the pokemon has no reviews.
    async fn rating(&self, pokemon_id: i32) -> Result<f64, AppError>;
    /// Insert the pokemon and link it to one owner and one category, atomically.
    async fn create(&self, owner_id: i32, category_id: i32, pokemon: &Pokemon) -> Result<bool, AppError>;
    /// Update the row and re-link it to the given owner and category, atomically.
    async fn update(&self, owner_id: i32, category_id: i32, pokemon: &Pokemon) -> Result<bool, AppError>;
    /// Delete the given reviews and then the pokemon, atomically. Join rows cascade.
    async fn delete(&self, pokemon: &Pokemon, reviews: &[Review]) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgPokemonRepository {
    pool: PgPool,
}

impl PgPokemonRepository {
    pub fn new(pool: PgPool) -> Self {
        PgPokemonRepository { pool }
    }
}

async fn link(
    tx: &mut sqlx::PgConnection,
    pokemon_id: i32,
    owner_id: i32,
    category_id: i32,
) -> Result<bool, AppError> {
    let owners = sqlx::query("INSERT INTO pokemon_owners (pokemon_id, owner_id) VALUES ($1, $2)")
        .bind(pokemon_id)
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;
    let categories = sqlx::query("INSERT INTO pokemon_categories (pokemon_id, category_id) VALUES ($1, $2)")
        .bind(pokemon_id)
        .bind(category_id)
        .execute(&mut *tx)
        .await?;
    Ok(saved(owners) && saved(categories))
}

#[async_trait]
impl PokemonRepository for PgPokemonRepository {
    async fn list(&self) -> Result<Vec<Pokemon>, AppError> {
        let sql = format!("SELECT {} FROM pokemon p ORDER BY p.id", POKEMON_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Pokemon>(&sql).fetch_all(&self.pool).await?)
    }

    async fn get(&self, id: i32) -> Result<Option<Pokemon>, AppError> {
        let sql = format!("SELECT {} FROM pokemon p WHERE p.id = $1", POKEMON_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Pokemon>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        let sql = "SELECT EXISTS(SELECT 1 FROM pokemon WHERE id = $1)";
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn rating(&self, pokemon_id: i32) -> Result<f64, AppError> {
        let sql = "SELECT COALESCE(AVG(rating)::float8, 0) FROM reviews WHERE pokemon_id = $1";
        tracing::debug!(sql = %sql, pokemon_id, "query");
        Ok(sqlx::query_scalar::<_, f64>(sql)
            .bind(pokemon_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn create(&self, owner_id: i32, category_id: i32, pokemon: &Pokemon) -> Result<bool, AppError> {
        tracing::debug!(name = %pokemon.name, owner_id, category_id, "insert pokemon (tx)");
        let mut tx = self.pool.begin().await?;
        let id: i32 = sqlx::query_scalar("INSERT INTO pokemon (name, birth_date) VALUES ($1, $2) RETURNING id")
            .bind(&pokemon.name)
            .bind(pokemon.birth_date)
            .fetch_one(&mut *tx)
            .await?;
        if !link(&mut *tx, id, owner_id, category_id).await? {
            return Ok(false);
        }
        tx.commit().await?;
        Ok(true)
    }

    async fn update(&self, owner_id: i32, category_id: i32, pokemon: &Pokemon) -> Result<bool, AppError> {
        tracing::debug!(id = pokemon.id, owner_id, category_id, "update pokemon (tx)");
        let mut tx = self.pool.begin().await?;
        let updated = sqlx::query("UPDATE pokemon SET name = $2, birth_date = $3 WHERE id = $1")
            .bind(pokemon.id)
            .bind(&pokemon.name)
            .bind(pokemon.birth_date)
            .execute(&mut *tx)
            .await?;
        if !saved(updated) {
            return Ok(false);
        }
        for unlink in [
            "DELETE FROM pokemon_owners WHERE pokemon_id = $1",
            "DELETE FROM pokemon_categories WHERE pokemon_id = $1",
        ] {
            sqlx::query(unlink).bind(pokemon.id).execute(&mut *tx).await?;
        }
        if !link(&mut *tx, pokemon.id, owner_id, category_id).await? {
            return Ok(false);
        }
        tx.commit().await?;
        Ok(true)
    }

    async fn delete(&self, pokemon: &Pokemon, reviews: &[Review]) -> Result<bool, AppError> {
        tracing::debug!(id = pokemon.id, reviews = reviews.len(), "delete pokemon (tx)");
        let mut tx = self.pool.begin().await?;
        if !reviews.is_empty() {
            let ids: Vec<i32> = reviews.iter().map(|r| r.id).collect();
            let removed = sqlx::query("DELETE FROM reviews WHERE pokemon_id = $1 AND id = ANY($2)")
                .bind(pokemon.id)
                .bind(&ids)
                .execute(&mut *tx)
                .await?;
            if removed.rows_affected() != ids.len() as u64 {
                return Ok(false);
            }
        }
        let result = sqlx::query("DELETE FROM pokemon WHERE id = $1")
            .bind(pokemon.id)
            .execute(&mut *tx)
            .await?;
        if !saved(result) {
            return Ok(false);
        }
        tx.commit().await?;
        Ok(true)
    }
}
