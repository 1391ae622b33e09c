//! Handlers for per-user movie ratings. All require authentication.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use movies_core::types::MovieId;
use movies_db::models::rating::RateMovie;

use crate::error::{AppError, AppResult};
use crate::extract::JsonBody;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// PUT /api/v1/movies/{id}/ratings
///
/// Record the caller's rating, overwriting any previous one.
pub async fn rate_movie(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
    JsonBody(input): JsonBody<RateMovie>,
) -> AppResult<impl IntoResponse> {
    state
        .ratings
        .rate(movie_id, input.rating, user.user_id)
        .await?;

    tracing::info!(%movie_id, user_id = %user.user_id, rating = input.rating, "Movie rated");

    Ok(StatusCode::OK)
}

/// DELETE /api/v1/movies/{id}/ratings
pub async fn delete_rating(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(movie_id): Path<MovieId>,
) -> AppResult<impl IntoResponse> {
    if !state.ratings.delete_rating(movie_id, user.user_id).await? {
        return Err(AppError::not_found("Rating", movie_id));
    }

    tracing::info!(%movie_id, user_id = %user.user_id, "Rating deleted");

    Ok(StatusCode::OK)
}

/// GET /api/v1/ratings/me
pub async fn my_ratings(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let ratings = state.ratings.get_ratings_for_user(user.user_id).await?;
    Ok(Json(DataResponse { data: ratings }))
}
