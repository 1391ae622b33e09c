//! Service layer.
//!
//! Services orchestrate validation, existence checks and rating enrichment
//! around the repository traits. Handlers never talk to repositories directly.

pub mod movie_service;
pub mod rating_service;

pub use movie_service::MovieService;
pub use rating_service::RatingService;

#[cfg(test)]
pub(crate) mod fakes;
