pub mod health;
pub mod movies;
pub mod ratings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /movies                       list (public), create (trusted member)
/// /movies/{idOrSlug}            get (public)
/// /movies/{id}                  update (trusted member), delete (admin)
/// /movies/{id}/ratings          rate, delete rating (authenticated)
/// /ratings/me                   caller's ratings (authenticated)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/movies", movies::router())
        .nest("/ratings", ratings::router())
}
