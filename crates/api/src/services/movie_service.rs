//! Movie orchestration: validation, existence checks and rating enrichment.

use std::sync::Arc;

use movies_core::error::CoreError;
use movies_core::movie::Movie;
use movies_core::options::GetAllMoviesOptions;
use movies_core::types::{MovieId, UserId};
use movies_core::validation::FieldViolation;
use movies_db::repositories::{MovieRepository, RatingRepository};

use crate::error::AppResult;

pub struct MovieService {
    movies: Arc<dyn MovieRepository>,
    ratings: Arc<dyn RatingRepository>,
}

impl MovieService {
    pub fn new(movies: Arc<dyn MovieRepository>, ratings: Arc<dyn RatingRepository>) -> Self {
        Self { movies, ratings }
    }

    /// Validate and insert a movie with its genres.
    pub async fn create(&self, movie: &Movie) -> AppResult<bool> {
        self.validate_movie(movie).await?;
        Ok(self.movies.create(movie).await?)
    }

    pub async fn get_by_id(&self, id: MovieId, user_id: Option<UserId>) -> AppResult<Option<Movie>> {
        Ok(self.movies.get_by_id(id, user_id).await?)
    }

    pub async fn get_by_slug(&self, slug: &str, user_id: Option<UserId>) -> AppResult<Option<Movie>> {
        Ok(self.movies.get_by_slug(slug, user_id).await?)
    }

    /// Validate the listing options, then fetch one page.
    pub async fn get_all(&self, options: &GetAllMoviesOptions) -> AppResult<Vec<Movie>> {
        options.validate()?;
        Ok(self.movies.get_all(options).await?)
    }

    /// Replace a movie. Returns `None` without touching storage when the id
    /// is unknown; otherwise the updated movie with fresh rating aggregates.
    pub async fn update(&self, mut movie: Movie, user_id: Option<UserId>) -> AppResult<Option<Movie>> {
        self.validate_movie(&movie).await?;

        if !self.movies.exists_by_id(movie.id).await? {
            return Ok(None);
        }

        self.movies.update(&movie).await?;

        match user_id {
            Some(user_id) => {
                let summary = self.ratings.get_rating(movie.id, user_id).await?;
                movie.rating = summary.rating;
                movie.user_rating = summary.user_rating;
            }
            None => {
                movie.rating = self.ratings.get_average_rating(movie.id).await?;
            }
        }

        Ok(Some(movie))
    }

    pub async fn delete_by_id(&self, id: MovieId) -> AppResult<bool> {
        Ok(self.movies.delete_by_id(id).await?)
    }

    /// Total matching movies, for pagination metadata.
    pub async fn get_count(&self, title: Option<&str>, year_of_release: Option<i32>) -> AppResult<i64> {
        Ok(self.movies.get_count(title, year_of_release).await?)
    }

    /// Field rules plus slug uniqueness against other movies.
    async fn validate_movie(&self, movie: &Movie) -> AppResult<()> {
        let mut violations = match movie.validate_fields() {
            Ok(()) => Vec::new(),
            Err(CoreError::Validation(violations)) => violations,
            Err(other) => return Err(other.into()),
        };

        if let Some(existing) = self.movies.get_by_slug(&movie.slug, None).await? {
            if existing.id != movie.id {
                violations.push(FieldViolation::new(
                    "slug",
                    "This movie already exists in the system",
                ));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(violations).into())
        }
    }
}
