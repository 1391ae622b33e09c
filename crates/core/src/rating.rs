//! Rating value rules and the per-user rating view.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::MovieId;

/// Inclusive bounds of a user rating.
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// One rating given by a user, joined to the rated movie's slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRating {
    pub movie_id: MovieId,
    pub slug: String,
    pub rating: i32,
}

/// Reject ratings outside `MIN_RATING..=MAX_RATING`.
pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::invalid(
            "rating",
            format!("Rating must be between {MIN_RATING} and {MAX_RATING}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }
}
