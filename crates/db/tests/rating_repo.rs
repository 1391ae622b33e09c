//! Integration tests for the rating repository: upsert, aggregates,
//! deletion and the per-user listing.

use movies_core::movie::Movie;
use movies_db::models::rating::RatingSummary;
use movies_db::repositories::{MovieRepository, PgMovieRepo, PgRatingRepo, RatingRepository};
use sqlx::PgPool;
use uuid::Uuid;

async fn create_movie(pool: &PgPool, title: &str, year: i32) -> Movie {
    let movie = Movie::new(Uuid::now_v7(), title.to_string(), year, vec!["Drama".into()]);
    PgMovieRepo::new(pool.clone()).create(&movie).await.unwrap();
    movie
}

async fn rating_rows(pool: &PgPool, movie_id: Uuid, user_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM ratings WHERE movie_id = $1 AND user_id = $2")
        .bind(movie_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rate_twice_overwrites(pool: PgPool) {
    let movie = create_movie(&pool, "Vertigo", 1958).await;
    let repo = PgRatingRepo::new(pool.clone());
    let user = Uuid::now_v7();

    assert!(repo.rate(movie.id, 2, user).await.unwrap());
    assert!(repo.rate(movie.id, 5, user).await.unwrap());

    assert_eq!(rating_rows(&pool, movie.id, user).await, 1);
    let summary = repo.get_rating(movie.id, user).await.unwrap();
    assert_eq!(
        summary,
        RatingSummary {
            rating: Some(5.0),
            user_rating: Some(5),
        }
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_average_is_rounded_to_one_decimal(pool: PgPool) {
    let movie = create_movie(&pool, "Psycho", 1960).await;
    let repo = PgRatingRepo::new(pool);

    assert_eq!(repo.get_average_rating(movie.id).await.unwrap(), None);

    repo.rate(movie.id, 4, Uuid::now_v7()).await.unwrap();
    repo.rate(movie.id, 5, Uuid::now_v7()).await.unwrap();
    assert_eq!(repo.get_average_rating(movie.id).await.unwrap(), Some(4.5));

    repo.rate(movie.id, 5, Uuid::now_v7()).await.unwrap();
    assert_eq!(repo.get_average_rating(movie.id).await.unwrap(), Some(4.7));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_summary_for_user_without_rating(pool: PgPool) {
    let movie = create_movie(&pool, "Rear Window", 1954).await;
    let repo = PgRatingRepo::new(pool);
    repo.rate(movie.id, 3, Uuid::now_v7()).await.unwrap();

    let summary = repo.get_rating(movie.id, Uuid::now_v7()).await.unwrap();
    assert_eq!(summary.rating, Some(3.0));
    assert_eq!(summary.user_rating, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_rating(pool: PgPool) {
    let movie = create_movie(&pool, "Rope", 1948).await;
    let repo = PgRatingRepo::new(pool.clone());
    let user = Uuid::now_v7();
    repo.rate(movie.id, 4, user).await.unwrap();

    assert!(repo.delete_rating(movie.id, user).await.unwrap());
    assert_eq!(rating_rows(&pool, movie.id, user).await, 0);
    assert!(!repo.delete_rating(movie.id, user).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_ratings_for_user_include_slug(pool: PgPool) {
    let notorious = create_movie(&pool, "Notorious", 1946).await;
    let birds = create_movie(&pool, "The Birds", 1963).await;
    let repo = PgRatingRepo::new(pool);
    let user = Uuid::now_v7();
    let someone_else = Uuid::now_v7();

    repo.rate(notorious.id, 4, user).await.unwrap();
    repo.rate(birds.id, 2, user).await.unwrap();
    repo.rate(birds.id, 5, someone_else).await.unwrap();

    let mine = repo.get_ratings_for_user(user).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].slug, "notorious-1946");
    assert_eq!(mine[0].movie_id, notorious.id);
    assert_eq!(mine[0].rating, 4);
    assert_eq!(mine[1].slug, "the-birds-1963");
    assert_eq!(mine[1].rating, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rating_unknown_movie_violates_foreign_key(pool: PgPool) {
    let repo = PgRatingRepo::new(pool);
    let err = repo
        .rate(Uuid::now_v7(), 3, Uuid::now_v7())
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => assert_eq!(db_err.code().as_deref(), Some("23503")),
        other => panic!("expected foreign key violation, got {other:?}"),
    }
}
