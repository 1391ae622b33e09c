//! The movie aggregate, slug derivation and field rules.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::types::{current_utc_year, MovieId};
use crate::validation::from_validation_errors;

/// Characters kept when deriving a slug; everything else is dropped.
static SLUG_STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z _-]").expect("valid regex"));

/// A catalog entry together with its rating aggregates.
///
/// `slug` is derived from `title` and `year_of_release` by [`Movie::new`]
/// and must be recomputed whenever either changes.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_release_year", skip_on_field_errors = false))]
pub struct Movie {
    pub id: MovieId,
    pub slug: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub year_of_release: i32,
    #[validate(length(min = 1, message = "At least one genre is required"))]
    pub genres: Vec<String>,
    /// Average across all users, rounded to one decimal.
    pub rating: Option<f64>,
    /// The requesting user's own rating, when a user is known.
    pub user_rating: Option<i32>,
}

impl Movie {
    pub fn new(id: MovieId, title: String, year_of_release: i32, genres: Vec<String>) -> Self {
        let slug = generate_slug(&title, year_of_release);
        Self {
            id,
            slug,
            title,
            year_of_release,
            genres,
            rating: None,
            user_rating: None,
        }
    }

    /// Check the field rules, collecting every violation.
    pub fn validate_fields(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|errors| CoreError::Validation(from_validation_errors(&errors)))
    }
}

/// Derive the URL slug: strip punctuation, lowercase, hyphenate spaces and
/// append the release year.
pub fn generate_slug(title: &str, year_of_release: i32) -> String {
    let cleaned = SLUG_STRIP_RE.replace_all(title, "");
    let slug = cleaned.to_lowercase().replace(' ', "-");
    format!("{slug}-{year_of_release}")
}

fn validate_release_year(movie: &Movie) -> Result<(), ValidationError> {
    let max_year = current_utc_year();
    if movie.year_of_release > max_year {
        let mut error = ValidationError::new("year_of_release");
        error.message = Some(format!("Year of release must be {max_year} or earlier").into());
        return Err(error);
    }
    Ok(())
}
