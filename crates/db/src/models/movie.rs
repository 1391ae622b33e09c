//! Movie row model.

use movies_core::error::CoreError;
use movies_core::movie::Movie;
use movies_core::types::MovieId;
use movies_core::validation::FieldViolation;
use serde::Deserialize;
use sqlx::FromRow;

/// A `movies` row enriched with its genres and rating aggregates.
#[derive(Debug, Clone, FromRow)]
pub struct MovieRow {
    pub id: MovieId,
    pub slug: String,
    pub title: String,
    pub year_of_release: i32,
    /// Genre names in insertion order.
    pub genres: Vec<String>,
    pub rating: Option<f64>,
    pub user_rating: Option<i32>,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: row.id,
            slug: row.slug,
            title: row.title,
            year_of_release: row.year_of_release,
            genres: row.genres,
            rating: row.rating,
            user_rating: row.user_rating,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a movie. The id and slug are assigned server-side.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovie {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year_of_release: Option<i32>,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// DTO for replacing a movie. Every field is overwritten.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovie {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year_of_release: Option<i32>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl CreateMovie {
    pub fn into_movie(self, id: MovieId) -> Result<Movie, CoreError> {
        movie_from_parts(id, self.title, self.year_of_release, self.genres)
    }
}

impl UpdateMovie {
    pub fn into_movie(self, id: MovieId) -> Result<Movie, CoreError> {
        movie_from_parts(id, self.title, self.year_of_release, self.genres)
    }
}

/// Build the movie, or report a missing year together with every other
/// field rule the payload breaks.
fn movie_from_parts(
    id: MovieId,
    title: String,
    year_of_release: Option<i32>,
    genres: Vec<String>,
) -> Result<Movie, CoreError> {
    if let Some(year) = year_of_release {
        return Ok(Movie::new(id, title, year, genres));
    }

    let mut violations = match Movie::new(id, title, 0, genres).validate_fields() {
        Ok(()) => Vec::new(),
        Err(CoreError::Validation(violations)) => violations,
        Err(other) => return Err(other),
    };
    violations.push(FieldViolation::new(
        "yearOfRelease",
        "Year of release is required",
    ));
    violations.sort_by(|a, b| a.field.cmp(&b.field));
    Err(CoreError::Validation(violations))
}
