//! Data-access gateways, one trait per entity with a PostgreSQL implementation.
//!
//! Mutations return the success flag: `true` only when the statement touched at
//! least one row. Database failures propagate as [`AppError::Db`].
//!
//! [`AppError::Db`]: crate::error::AppError::Db

mod category;
mod country;
mod owner;
mod pokemon;
mod review;
mod reviewer;

#[cfg(test)]
mod pg_tests;

pub use category::{CategoryRepository, PgCategoryRepository};
pub use country::{CountryRepository, PgCountryRepository};
pub use owner::{OwnerRepository, PgOwnerRepository};
pub use pokemon::{PgPokemonRepository, PokemonRepository};
pub use review::{PgReviewRepository, ReviewRepository};
pub use reviewer::{PgReviewerRepository, ReviewerRepository};

#[cfg(test)]
pub use category::MockCategoryRepository;
#[cfg(test)]
pub use country::MockCountryRepository;
#[cfg(test)]
pub use owner::MockOwnerRepository;
#[cfg(test)]
pub use pokemon::MockPokemonRepository;
#[cfg(test)]
pub use review::MockReviewRepository;
#[cfg(test)]
pub use reviewer::MockReviewerRepository;

use sqlx::postgres::PgQueryResult;

fn saved(result: PgQueryResult) -> bool {
    result.rows_affected() > 0
}

const POKEMON_COLUMNS: &str = "p.id, p.name, p.birth_date";
const OWNER_COLUMNS: &str = "o.id, o.first_name, o.last_name, o.gym, o.country_id";
const REVIEW_COLUMNS: &str = "id, title, text, rating, pokemon_id, reviewer_id";
