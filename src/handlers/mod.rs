//! HTTP handlers, one module per entity.
//!
//! Each mutation runs the same pipeline: body shape, existence/uniqueness,
//! mapping, repository mutation, status. Missing targets answer 204.

pub mod category;
pub mod country;
pub mod owner;
pub mod pokemon;
pub mod review;
pub mod reviewer;
