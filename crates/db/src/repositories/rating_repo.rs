//! Repository for the `ratings` table.

use async_trait::async_trait;
use movies_core::rating::MovieRating;
use movies_core::types::{MovieId, UserId};
use sqlx::PgPool;

use super::RatingRepository;
use crate::models::rating::{MovieRatingRow, RatingSummary};

/// PostgreSQL-backed [`RatingRepository`].
#[derive(Debug, Clone)]
pub struct PgRatingRepo {
    pool: PgPool,
}

impl PgRatingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PgRatingRepo {
    /// Upsert on `(user_id, movie_id)`: the last write wins.
    async fn rate(
        &self,
        movie_id: MovieId,
        rating: i32,
        user_id: UserId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO ratings (user_id, movie_id, rating) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, movie_id) DO UPDATE SET rating = EXCLUDED.rating",
        )
        .bind(user_id)
        .bind(movie_id)
        .bind(rating)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_average_rating(&self, movie_id: MovieId) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<f64>>(
            "SELECT round(avg(rating), 1)::float8 FROM ratings WHERE movie_id = $1",
        )
        .bind(movie_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_rating(
        &self,
        movie_id: MovieId,
        user_id: UserId,
    ) -> Result<RatingSummary, sqlx::Error> {
        sqlx::query_as::<_, RatingSummary>(
            "SELECT \
                (SELECT round(avg(r.rating), 1)::float8 FROM ratings r WHERE r.movie_id = $1) AS rating, \
                (SELECT r.rating FROM ratings r WHERE r.movie_id = $1 AND r.user_id = $2) AS user_rating",
        )
        .bind(movie_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_rating(&self, movie_id: MovieId, user_id: UserId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ratings WHERE movie_id = $1 AND user_id = $2")
            .bind(movie_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_ratings_for_user(&self, user_id: UserId) -> Result<Vec<MovieRating>, sqlx::Error> {
        let rows = sqlx::query_as::<_, MovieRatingRow>(
            "SELECT r.movie_id, m.slug, r.rating \
             FROM ratings r \
             JOIN movies m ON m.id = r.movie_id \
             WHERE r.user_id = $1 \
             ORDER BY m.slug",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(MovieRating::from).collect())
    }
}
