//! Handlers for the movie catalog.
//!
//! Reads are public; a valid bearer token only scopes `userRating`.
//! Create and update require a trusted member, delete requires an admin.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use movies_core::types::MovieId;
use movies_db::models::movie::{CreateMovie, UpdateMovie};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, QueryParams};
use crate::middleware::auth::MaybeUser;
use crate::middleware::rbac::{RequireAdmin, RequireTrustedMember};
use crate::query::GetAllMoviesQuery;
use crate::response::MoviesResponse;
use crate::state::AppState;

/// POST /api/v1/movies
///
/// Create a movie. Responds 201 with a `Location` header and the movie.
pub async fn create_movie(
    RequireTrustedMember(user): RequireTrustedMember,
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateMovie>,
) -> AppResult<impl IntoResponse> {
    let movie = input.into_movie(Uuid::now_v7())?;
    state.movies.create(&movie).await?;

    tracing::info!(movie_id = %movie.id, slug = %movie.slug, user_id = %user.user_id, "Movie created");

    let location = format!("/api/v1/movies/{}", movie.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(movie),
    ))
}

/// GET /api/v1/movies/{idOrSlug}
pub async fn get_movie(
    user: MaybeUser,
    State(state): State<AppState>,
    Path(id_or_slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user_id = user.user_id();
    let movie = match Uuid::parse_str(&id_or_slug) {
        Ok(id) => state.movies.get_by_id(id, user_id).await?,
        Err(_) => state.movies.get_by_slug(&id_or_slug, user_id).await?,
    };

    movie
        .map(Json)
        .ok_or_else(|| AppError::not_found("Movie", id_or_slug))
}

/// GET /api/v1/movies
///
/// Filtered, sorted, paginated listing. Invalid options answer 400 with
/// every violated rule.
pub async fn list_movies(
    user: MaybeUser,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<GetAllMoviesQuery>,
) -> AppResult<impl IntoResponse> {
    let options = params.into_options(user.user_id())?;

    let movies = state.movies.get_all(&options).await?;
    let total = state
        .movies
        .get_count(options.title.as_deref(), options.year_of_release)
        .await?;

    Ok(Json(MoviesResponse::new(
        movies,
        options.page,
        options.page_size,
        total,
    )))
}

/// PUT /api/v1/movies/{id}
///
/// Replace title, year and genres. The slug is re-derived.
pub async fn update_movie(
    RequireTrustedMember(user): RequireTrustedMember,
    State(state): State<AppState>,
    Path(id): Path<MovieId>,
    JsonBody(input): JsonBody<UpdateMovie>,
) -> AppResult<impl IntoResponse> {
    let movie = state
        .movies
        .update(input.into_movie(id)?, Some(user.user_id))
        .await?
        .ok_or_else(|| AppError::not_found("Movie", id))?;

    tracing::info!(movie_id = %id, user_id = %user.user_id, "Movie updated");

    Ok(Json(movie))
}

/// DELETE /api/v1/movies/{id}
///
/// Delete a movie with its genres and ratings. Admin only.
pub async fn delete_movie(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<MovieId>,
) -> AppResult<impl IntoResponse> {
    if !state.movies.delete_by_id(id).await? {
        return Err(AppError::not_found("Movie", id));
    }

    tracing::info!(movie_id = %id, user_id = %admin.user_id, "Movie deleted");

    Ok(StatusCode::OK)
}
