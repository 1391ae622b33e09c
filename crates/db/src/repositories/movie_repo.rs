//! Repository for the `movies` and `genres` tables.
//!
//! Reads join the rating aggregates from `ratings`: the average over all
//! users and, when a user id is supplied, that user's own rating.

use async_trait::async_trait;
use movies_core::movie::Movie;
use movies_core::options::GetAllMoviesOptions;
use movies_core::types::{MovieId, UserId};
use sqlx::PgPool;

use super::MovieRepository;
use crate::models::movie::MovieRow;

/// Movie columns plus genres and rating aggregates. `$1` is the optional
/// user id scoping `user_rating`.
const MOVIE_SELECT: &str = "\
    SELECT m.id, m.slug, m.title, m.year_of_release, \
        COALESCE( \
            (SELECT array_agg(g.name ORDER BY g.position) FROM genres g WHERE g.movie_id = m.id), \
            ARRAY[]::text[] \
        ) AS genres, \
        (SELECT round(avg(r.rating), 1)::float8 FROM ratings r WHERE r.movie_id = m.id) AS rating, \
        (SELECT myr.rating FROM ratings myr WHERE myr.movie_id = m.id AND myr.user_id = $1) AS user_rating \
    FROM movies m";

/// Title-substring and exact-year predicate shared by listing and counting.
/// The title parameter must be passed through [`escape_like`].
fn filter_clause(title_param: usize, year_param: usize) -> String {
    format!(
        "(${title_param}::text IS NULL OR m.title LIKE '%' || ${title_param}::text || '%' ESCAPE '\\') \
         AND (${year_param}::int4 IS NULL OR m.year_of_release = ${year_param}::int4)"
    )
}

/// Escape `LIKE` metacharacters so the title filter matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `ORDER BY` body. `m.id` is always the last key so pages never overlap.
fn order_clause(options: &GetAllMoviesOptions) -> String {
    match options.sort() {
        Some((field, order)) => format!("m.{} {}, m.id", field.column(), order.as_sql()),
        None => "m.id".to_string(),
    }
}

/// PostgreSQL-backed [`MovieRepository`].
#[derive(Debug, Clone)]
pub struct PgMovieRepo {
    pool: PgPool,
}

impl PgMovieRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert genre rows in list order within an existing transaction.
    async fn insert_genres(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        movie_id: MovieId,
        genres: &[String],
    ) -> Result<(), sqlx::Error> {
        for (position, name) in genres.iter().enumerate() {
            sqlx::query("INSERT INTO genres (movie_id, position, name) VALUES ($1, $2, $3)")
                .bind(movie_id)
                .bind(position as i32)
                .bind(name)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl MovieRepository for PgMovieRepo {
    async fn create(&self, movie: &Movie) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO movies (id, slug, title, year_of_release) VALUES ($1, $2, $3, $4)",
        )
        .bind(movie.id)
        .bind(&movie.slug)
        .bind(&movie.title)
        .bind(movie.year_of_release)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        Self::insert_genres(&mut tx, movie.id, &movie.genres).await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn get_by_id(
        &self,
        id: MovieId,
        user_id: Option<UserId>,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("{MOVIE_SELECT} WHERE m.id = $2");
        let row = sqlx::query_as::<_, MovieRow>(&query)
            .bind(user_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Movie::from))
    }

    async fn get_by_slug(
        &self,
        slug: &str,
        user_id: Option<UserId>,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("{MOVIE_SELECT} WHERE m.slug = $2");
        let row = sqlx::query_as::<_, MovieRow>(&query)
            .bind(user_id)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Movie::from))
    }

    async fn get_all(&self, options: &GetAllMoviesOptions) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "{MOVIE_SELECT} WHERE {} ORDER BY {} LIMIT $4 OFFSET $5",
            filter_clause(2, 3),
            order_clause(options),
        );
        let rows = sqlx::query_as::<_, MovieRow>(&query)
            .bind(options.user_id)
            .bind(options.title.as_deref().map(escape_like))
            .bind(options.year_of_release)
            .bind(options.page_size)
            .bind(options.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn update(&self, movie: &Movie) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE movies SET slug = $2, title = $3, year_of_release = $4 WHERE id = $1",
        )
        .bind(movie.id)
        .bind(&movie.slug)
        .bind(&movie.title)
        .bind(movie.year_of_release)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tracing::debug!(movie_id = %movie.id, "Update matched no movie");
            return Ok(false);
        }

        sqlx::query("DELETE FROM genres WHERE movie_id = $1")
            .bind(movie.id)
            .execute(&mut *tx)
            .await?;
        Self::insert_genres(&mut tx, movie.id, &movie.genres).await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn delete_by_id(&self, id: MovieId) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM ratings WHERE movie_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM genres WHERE movie_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_id(&self, id: MovieId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM movies WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_count(
        &self,
        title: Option<&str>,
        year_of_release: Option<i32>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM movies m WHERE {}", filter_clause(1, 2));
        sqlx::query_scalar::<_, i64>(&query)
            .bind(title.map(escape_like))
            .bind(year_of_release)
            .fetch_one(&self.pool)
            .await
    }
}
