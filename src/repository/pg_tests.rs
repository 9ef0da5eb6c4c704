//! Statements run against a live PostgreSQL (`TEST_DATABASE_URL`, else `DATABASE_URL`).
//! Each test bootstraps its own schema and drops it afterwards. Without a URL the
//! tests return early.

use super::*;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::model::{Category, Country, Owner, Pokemon, Review, Reviewer};
use crate::store::{connect, ensure_tables};
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::PgPool;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_SCHEMA: AtomicU32 = AtomicU32::new(0);

struct TestDb {
    pool: PgPool,
    schema: String,
}

impl TestDb {
    async fn open() -> Option<TestDb> {
        let database_url = std::env::var("TEST_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .ok()?;
        let schema = format!(
            "pokemon_test_{}_{}",
            std::process::id(),
            NEXT_SCHEMA.fetch_add(1, Ordering::Relaxed)
        );
        let config = AppConfig {
            database_url,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            max_connections: 1,
            schema: schema.clone(),
        };
        let pool = connect(&config).await.unwrap();
        ensure_tables(&pool, &schema).await.unwrap();
        Some(TestDb { pool, schema })
    }

    async fn close(self) {
        sqlx::query(&format!("DROP SCHEMA \"{}\" CASCADE", self.schema))
            .execute(&self.pool)
            .await
            .unwrap();
        self.pool.close().await;
    }
}

fn birth() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1996, 2, 27)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap()
}

fn pokemon(id: i32, name: &str) -> Pokemon {
    Pokemon {
        id,
        name: name.into(),
        birth_date: birth(),
    }
}

async fn new_category(pool: &PgPool, name: &str) -> i32 {
    let repo = PgCategoryRepository::new(pool.clone());
    assert!(repo.create(&Category { id: 0, name: name.into() }).await.unwrap());
    repo.list().await.unwrap().last().unwrap().id
}

async fn new_owner(pool: &PgPool, first_name: &str, country_id: i32) -> i32 {
    let repo = PgOwnerRepository::new(pool.clone());
    let owner = Owner {
        id: 0,
        first_name: first_name.into(),
        last_name: "Trainer".into(),
        gym: "Pallet".into(),
        country_id: Some(country_id),
    };
    assert!(repo.create(&owner).await.unwrap());
    repo.list().await.unwrap().last().unwrap().id
}

async fn new_country(pool: &PgPool, name: &str) -> i32 {
    let repo = PgCountryRepository::new(pool.clone());
    assert!(repo.create(&Country { id: 0, name: name.into() }).await.unwrap());
    repo.list().await.unwrap().last().unwrap().id
}

async fn new_reviewer(pool: &PgPool) -> i32 {
    let repo = PgReviewerRepository::new(pool.clone());
    let reviewer = Reviewer {
        id: 0,
        first_name: "Gary".into(),
        last_name: "Oak".into(),
    };
    assert!(repo.create(&reviewer).await.unwrap());
    repo.list().await.unwrap().last().unwrap().id
}

async fn new_review(pool: &PgPool, pokemon_id: i32, reviewer_id: i32, rating: i32) -> Review {
    let repo = PgReviewRepository::new(pool.clone());
    let review = Review {
        id: 0,
        title: "Review".into(),
        text: "Text".into(),
        rating,
        pokemon_id: Some(pokemon_id),
        reviewer_id: Some(reviewer_id),
    };
    assert!(repo.create(&review).await.unwrap());
    repo.list().await.unwrap().pop().unwrap()
}

#[tokio::test]
async fn pokemon_create_links_owner_and_category() {
    let Some(db) = TestDb::open().await else { return };
    let country = new_country(&db.pool, "Kanto").await;
    let owner = new_owner(&db.pool, "Ash", country).await;
    let category = new_category(&db.pool, "Electric").await;
    let repo = PgPokemonRepository::new(db.pool.clone());

    assert!(repo.create(owner, category, &pokemon(0, "Pikachu")).await.unwrap());

    let created = repo.list().await.unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].name, "Pikachu");
    assert_eq!(created[0].birth_date, birth());
    let owners = PgOwnerRepository::new(db.pool.clone());
    assert_eq!(owners.pokemon_by_owner(owner).await.unwrap(), created);
    let categories = PgCategoryRepository::new(db.pool.clone());
    assert_eq!(categories.pokemon_by_category(category).await.unwrap(), created);
    db.close().await;
}

#[tokio::test]
async fn pokemon_create_with_unknown_owner_leaves_nothing_behind() {
    let Some(db) = TestDb::open().await else { return };
    let category = new_category(&db.pool, "Electric").await;
    let repo = PgPokemonRepository::new(db.pool.clone());

    let err = repo.create(999, category, &pokemon(0, "Pikachu")).await;
    assert!(matches!(err, Err(AppError::Db(_))));
    assert!(repo.list().await.unwrap().is_empty());
    db.close().await;
}

#[tokio::test]
async fn pokemon_update_relinks_owner_and_category() {
    let Some(db) = TestDb::open().await else { return };
    let country = new_country(&db.pool, "Kanto").await;
    let ash = new_owner(&db.pool, "Ash", country).await;
    let misty = new_owner(&db.pool, "Misty", country).await;
    let electric = new_category(&db.pool, "Electric").await;
    let mouse = new_category(&db.pool, "Mouse").await;
    let repo = PgPokemonRepository::new(db.pool.clone());
    assert!(repo.create(ash, electric, &pokemon(0, "Pikachu")).await.unwrap());
    let id = repo.list().await.unwrap()[0].id;

    assert!(repo.update(misty, mouse, &pokemon(id, "Raichu")).await.unwrap());

    assert_eq!(repo.get(id).await.unwrap().map(|p| p.name), Some("Raichu".into()));
    let owners = PgOwnerRepository::new(db.pool.clone());
    assert!(owners.pokemon_by_owner(ash).await.unwrap().is_empty());
    let linked: Vec<i32> = owners.owners_of_pokemon(id).await.unwrap().iter().map(|o| o.id).collect();
    assert_eq!(linked, vec![misty]);
    let categories = PgCategoryRepository::new(db.pool.clone());
    assert!(categories.pokemon_by_category(electric).await.unwrap().is_empty());
    assert_eq!(categories.pokemon_by_category(mouse).await.unwrap().len(), 1);
    db.close().await;
}

#[tokio::test]
async fn pokemon_update_of_unknown_row_reports_no_change() {
    let Some(db) = TestDb::open().await else { return };
    let country = new_country(&db.pool, "Kanto").await;
    let owner = new_owner(&db.pool, "Ash", country).await;
    let category = new_category(&db.pool, "Electric").await;
    let repo = PgPokemonRepository::new(db.pool.clone());

    assert!(!repo.update(owner, category, &pokemon(42, "Missingno")).await.unwrap());
    db.close().await;
}

#[tokio::test]
async fn rating_is_mean_of_reviews_or_zero() {
    let Some(db) = TestDb::open().await else { return };
    let country = new_country(&db.pool, "Kanto").await;
    let owner = new_owner(&db.pool, "Ash", country).await;
    let category = new_category(&db.pool, "Electric").await;
    let reviewer = new_reviewer(&db.pool).await;
    let repo = PgPokemonRepository::new(db.pool.clone());
    assert!(repo.create(owner, category, &pokemon(0, "Pikachu")).await.unwrap());
    let id = repo.list().await.unwrap()[0].id;

    assert_eq!(repo.rating(id).await.unwrap(), 0.0);
    new_review(&db.pool, id, reviewer, 4).await;
    new_review(&db.pool, id, reviewer, 5).await;
    assert_eq!(repo.rating(id).await.unwrap(), 4.5);
    db.close().await;
}

#[tokio::test]
async fn pokemon_delete_removes_reviews_and_join_rows() {
    let Some(db) = TestDb::open().await else { return };
    let country = new_country(&db.pool, "Kanto").await;
    let owner = new_owner(&db.pool, "Ash", country).await;
    let category = new_category(&db.pool, "Electric").await;
    let reviewer = new_reviewer(&db.pool).await;
    let repo = PgPokemonRepository::new(db.pool.clone());
    assert!(repo.create(owner, category, &pokemon(0, "Pikachu")).await.unwrap());
    let target = repo.list().await.unwrap().remove(0);
    let reviews = vec![
        new_review(&db.pool, target.id, reviewer, 4).await,
        new_review(&db.pool, target.id, reviewer, 2).await,
    ];

    assert!(repo.delete(&target, &reviews).await.unwrap());

    assert!(!repo.exists(target.id).await.unwrap());
    let remaining = PgReviewRepository::new(db.pool.clone());
    assert!(remaining.list().await.unwrap().is_empty());
    let owners = PgOwnerRepository::new(db.pool.clone());
    assert!(owners.pokemon_by_owner(owner).await.unwrap().is_empty());
    db.close().await;
}

#[tokio::test]
async fn pokemon_delete_with_stale_reviews_rolls_back() {
    let Some(db) = TestDb::open().await else { return };
    let country = new_country(&db.pool, "Kanto").await;
    let owner = new_owner(&db.pool, "Ash", country).await;
    let category = new_category(&db.pool, "Electric").await;
    let reviewer = new_reviewer(&db.pool).await;
    let repo = PgPokemonRepository::new(db.pool.clone());
    assert!(repo.create(owner, category, &pokemon(0, "Pikachu")).await.unwrap());
    let target = repo.list().await.unwrap().remove(0);
    let kept = new_review(&db.pool, target.id, reviewer, 4).await;
    let mut gone = kept.clone();
    gone.id += 100;

    assert!(!repo.delete(&target, &[kept.clone(), gone]).await.unwrap());

    assert!(repo.exists(target.id).await.unwrap());
    let reviews = PgReviewRepository::new(db.pool.clone());
    assert_eq!(reviews.reviews_of_pokemon(target.id).await.unwrap(), vec![kept]);
    db.close().await;
}

#[tokio::test]
async fn duplicate_category_name_is_unprocessable_on_create_and_rename() {
    let Some(db) = TestDb::open().await else { return };
    new_category(&db.pool, "Water").await;
    let fire = new_category(&db.pool, "Fire").await;
    let repo = PgCategoryRepository::new(db.pool.clone());

    let created = repo.create(&Category { id: 0, name: " water ".into() }).await;
    assert!(matches!(created, Err(AppError::Unprocessable(_))));
    let renamed = repo.update(&Category { id: fire, name: "WATER".into() }).await;
    assert!(matches!(renamed, Err(AppError::Unprocessable(_))));
    db.close().await;
}

#[tokio::test]
async fn country_with_owners_cannot_be_deleted() {
    let Some(db) = TestDb::open().await else { return };
    let country = new_country(&db.pool, "Kanto").await;
    new_owner(&db.pool, "Ash", country).await;
    let repo = PgCountryRepository::new(db.pool.clone());

    let err = repo.delete(&Country { id: country, name: "Kanto".into() }).await;
    assert!(matches!(err, Err(AppError::Db(_))));
    assert!(repo.exists(country).await.unwrap());
    db.close().await;
}
