//! Route definitions for the movie catalog, mounted at `/movies`.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{movies, ratings};
use crate::state::AppState;

/// ```text
/// GET    /                -> list_movies
/// POST   /                -> create_movie
/// GET    /{id}            -> get_movie (id or slug)
/// PUT    /{id}            -> update_movie
/// DELETE /{id}            -> delete_movie (admin only)
/// PUT    /{id}/ratings    -> rate_movie
/// DELETE /{id}/ratings    -> delete_rating
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movies::list_movies).post(movies::create_movie))
        .route(
            "/{id}",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route(
            "/{id}/ratings",
            put(ratings::rate_movie).delete(ratings::delete_rating),
        )
}
