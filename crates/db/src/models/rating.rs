//! Rating row models.

use movies_core::rating::MovieRating;
use movies_core::types::MovieId;
use serde::Deserialize;
use sqlx::FromRow;

/// Aggregate rating of a movie plus one user's own rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, FromRow)]
pub struct RatingSummary {
    pub rating: Option<f64>,
    pub user_rating: Option<i32>,
}

/// A user's rating joined to the movie slug.
#[derive(Debug, Clone, FromRow)]
pub struct MovieRatingRow {
    pub movie_id: MovieId,
    pub slug: String,
    pub rating: i32,
}

impl From<MovieRatingRow> for MovieRating {
    fn from(row: MovieRatingRow) -> Self {
        MovieRating {
            movie_id: row.movie_id,
            slug: row.slug,
            rating: row.rating,
        }
    }
}

/// DTO for rating a movie.
#[derive(Debug, Clone, Deserialize)]
pub struct RateMovie {
    pub rating: i32,
}
