//! Shared application state: one repository handle per entity.

use crate::repository::{
    CategoryRepository, CountryRepository, OwnerRepository, PgCategoryRepository, PgCountryRepository,
    PgOwnerRepository, PgPokemonRepository, PgReviewRepository, PgReviewerRepository, PokemonRepository,
    ReviewRepository, ReviewerRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<dyn CategoryRepository>,
    pub countries: Arc<dyn CountryRepository>,
    pub owners: Arc<dyn OwnerRepository>,
    pub pokemon: Arc<dyn PokemonRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub reviewers: Arc<dyn ReviewerRepository>,
}

impl AppState {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        AppState {
            categories: Arc::new(PgCategoryRepository::new(pool.clone())),
            countries: Arc::new(PgCountryRepository::new(pool.clone())),
            owners: Arc::new(PgOwnerRepository::new(pool.clone())),
            pokemon: Arc::new(PgPokemonRepository::new(pool.clone())),
            reviews: Arc::new(PgReviewRepository::new(pool.clone())),
            reviewers: Arc::new(PgReviewerRepository::new(pool)),
        }
    }
}
