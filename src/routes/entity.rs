//! Entity CRUD routes. Static segments (`/pokemon/:id`, `/owners/:id`) take
//! priority over the `/:id` routes of the same entity.

use crate::handlers::{category, country, owner, pokemon, review, reviewer};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/category", get(category::list).post(category::create))
        .route(
            "/category/:category_id",
            get(category::read).put(category::update).delete(category::delete),
        )
        .route("/category/pokemon/:category_id", get(category::pokemon_by_category))
        .route("/country", get(country::list).post(country::create))
        .route(
            "/country/:country_id",
            get(country::read).put(country::update).delete(country::delete),
        )
        .route("/country/owners/:owner_id", get(country::country_by_owner))
        .route("/country/:country_id/owners", get(country::owners_from_country))
        .route("/owner", get(owner::list).post(owner::create))
        .route(
            "/owner/:owner_id",
            get(owner::read).put(owner::update).delete(owner::delete),
        )
        .route("/owner/:owner_id/pokemon", get(owner::pokemon_by_owner))
        .route("/owner/pokemon/:poke_id", get(owner::owners_of_pokemon))
        .route("/pokemon", get(pokemon::list).post(pokemon::create))
        .route(
            "/pokemon/:poke_id",
            get(pokemon::read).put(pokemon::update).delete(pokemon::delete),
        )
        .route("/pokemon/:poke_id/rating", get(pokemon::rating))
        .route("/review", get(review::list).post(review::create))
        .route(
            "/review/:review_id",
            get(review::read).put(review::update).delete(review::delete),
        )
        .route("/review/pokemon/:poke_id", get(review::reviews_of_pokemon))
        .route("/reviewer", get(reviewer::list).post(reviewer::create))
        .route(
            "/reviewer/:reviewer_id",
            get(reviewer::read).put(reviewer::update).delete(reviewer::delete),
        )
        .route("/reviewer/:reviewer_id/reviews", get(reviewer::reviews_by_reviewer))
        .with_state(state)
}
