//! Repository layer.
//!
//! The service layer depends on the [`MovieRepository`] and
//! [`RatingRepository`] traits; [`PgMovieRepo`] and [`PgRatingRepo`] are
//! the PostgreSQL implementations. Each method checks a connection out of
//! the pool for the duration of the call.

use async_trait::async_trait;
use movies_core::movie::Movie;
use movies_core::options::GetAllMoviesOptions;
use movies_core::rating::MovieRating;
use movies_core::types::{MovieId, UserId};

use crate::models::rating::RatingSummary;

pub mod movie_repo;
pub mod rating_repo;

pub use movie_repo::PgMovieRepo;
pub use rating_repo::PgRatingRepo;

/// Movie persistence: CRUD plus the filtered, sorted, paginated listing.
#[async_trait]
pub trait MovieRepository: Send + Sync {
    /// Insert the movie and its genres atomically.
    async fn create(&self, movie: &Movie) -> Result<bool, sqlx::Error>;

    async fn get_by_id(
        &self,
        id: MovieId,
        user_id: Option<UserId>,
    ) -> Result<Option<Movie>, sqlx::Error>;

    async fn get_by_slug(
        &self,
        slug: &str,
        user_id: Option<UserId>,
    ) -> Result<Option<Movie>, sqlx::Error>;

    /// One page of movies matching `options`. Options must already be validated.
    async fn get_all(&self, options: &GetAllMoviesOptions) -> Result<Vec<Movie>, sqlx::Error>;

    /// Replace title, year, slug and the full genre set. Returns `false`
    /// when no movie has the given id.
    async fn update(&self, movie: &Movie) -> Result<bool, sqlx::Error>;

    async fn delete_by_id(&self, id: MovieId) -> Result<bool, sqlx::Error>;

    async fn exists_by_id(&self, id: MovieId) -> Result<bool, sqlx::Error>;

    /// Number of movies matching the same filter predicate as `get_all`.
    async fn get_count(
        &self,
        title: Option<&str>,
        year_of_release: Option<i32>,
    ) -> Result<i64, sqlx::Error>;
}

/// Per-user rating persistence and aggregation.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Insert or overwrite the user's rating for the movie.
    async fn rate(&self, movie_id: MovieId, rating: i32, user_id: UserId)
        -> Result<bool, sqlx::Error>;

    /// Average across all users, rounded to one decimal.
    async fn get_average_rating(&self, movie_id: MovieId) -> Result<Option<f64>, sqlx::Error>;

    async fn get_rating(
        &self,
        movie_id: MovieId,
        user_id: UserId,
    ) -> Result<RatingSummary, sqlx::Error>;

    async fn delete_rating(&self, movie_id: MovieId, user_id: UserId)
        -> Result<bool, sqlx::Error>;

    async fn get_ratings_for_user(&self, user_id: UserId)
        -> Result<Vec<MovieRating>, sqlx::Error>;
}
