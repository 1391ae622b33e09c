use std::sync::Arc;

use movies_db::repositories::{PgMovieRepo, PgRatingRepo};
use movies_db::DbPool;

use crate::config::ServerConfig;
use crate::services::{MovieService, RatingService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Server configuration (read by the auth extractors).
    pub config: Arc<ServerConfig>,
    pub movies: Arc<MovieService>,
    pub ratings: Arc<RatingService>,
}

impl AppState {
    /// Wire the PostgreSQL repositories and services over `pool`.
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        let movie_repo = Arc::new(PgMovieRepo::new(pool.clone()));
        let rating_repo = Arc::new(PgRatingRepo::new(pool.clone()));

        Self {
            movies: Arc::new(MovieService::new(movie_repo.clone(), rating_repo.clone())),
            ratings: Arc::new(RatingService::new(movie_repo, rating_repo)),
            config: Arc::new(config),
            pool,
        }
    }
}
