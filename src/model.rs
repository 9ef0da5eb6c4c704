//! Persistence records as stored in PostgreSQL.
//!
//! Relationship ids are `Option` because a record built from a transfer record
//! does not know its associations until the handler resolves them.

use chrono::NaiveDateTime;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Country {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Owner {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub gym: String,
    pub country_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Pokemon {
    pub id: i32,
    pub name: String,
    pub birth_date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Review {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub rating: i32,
    pub pokemon_id: Option<i32>,
    pub reviewer_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Reviewer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}
