//! Per-user ratings: validation and movie existence checks around the
//! rating repository.

use std::sync::Arc;

use movies_core::rating::{validate_rating, MovieRating};
use movies_core::types::{MovieId, UserId};
use movies_db::repositories::{MovieRepository, RatingRepository};

use crate::error::{AppError, AppResult};

pub struct RatingService {
    movies: Arc<dyn MovieRepository>,
    ratings: Arc<dyn RatingRepository>,
}

impl RatingService {
    pub fn new(movies: Arc<dyn MovieRepository>, ratings: Arc<dyn RatingRepository>) -> Self {
        Self { movies, ratings }
    }

    /// Record or overwrite the user's rating. The value is checked before
    /// the movie lookup, so an out-of-range rating on an unknown movie is a
    /// validation error.
    pub async fn rate(&self, movie_id: MovieId, rating: i32, user_id: UserId) -> AppResult<bool> {
        validate_rating(rating)?;

        if !self.movies.exists_by_id(movie_id).await? {
            return Err(AppError::not_found("Movie", movie_id));
        }

        Ok(self.ratings.rate(movie_id, rating, user_id).await?)
    }

    /// Remove the user's rating. `false` when there was nothing to remove.
    pub async fn delete_rating(&self, movie_id: MovieId, user_id: UserId) -> AppResult<bool> {
        Ok(self.ratings.delete_rating(movie_id, user_id).await?)
    }

    pub async fn get_ratings_for_user(&self, user_id: UserId) -> AppResult<Vec<MovieRating>> {
        Ok(self.ratings.get_ratings_for_user(user_id).await?)
    }
}
