//! In-memory repositories for service unit tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use movies_core::movie::Movie;
use movies_core::options::GetAllMoviesOptions;
use movies_core::rating::MovieRating;
use movies_core::types::{MovieId, UserId};
use movies_db::models::rating::RatingSummary;
use movies_db::repositories::{MovieRepository, RatingRepository};

fn matches(movie: &Movie, title: Option<&str>, year: Option<i32>) -> bool {
    title.map_or(true, |t| movie.title.contains(t))
        && year.map_or(true, |y| movie.year_of_release == y)
}

#[derive(Default)]
pub struct InMemoryMovieRepo {
    movies: Mutex<BTreeMap<MovieId, Movie>>,
    get_all_calls: AtomicUsize,
}

impl InMemoryMovieRepo {
    pub fn len(&self) -> usize {
        self.movies.lock().unwrap().len()
    }

    pub fn get_all_calls(&self) -> usize {
        self.get_all_calls.load(Ordering::SeqCst)
    }

    fn slug_of(&self, id: MovieId) -> Option<String> {
        self.movies.lock().unwrap().get(&id).map(|m| m.slug.clone())
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepo {
    async fn create(&self, movie: &Movie) -> Result<bool, sqlx::Error> {
        self.movies.lock().unwrap().insert(movie.id, movie.clone());
        Ok(true)
    }

    async fn get_by_id(&self, id: MovieId, _: Option<UserId>) -> Result<Option<Movie>, sqlx::Error> {
        Ok(self.movies.lock().unwrap().get(&id).cloned())
    }

    async fn get_by_slug(&self, slug: &str, _: Option<UserId>) -> Result<Option<Movie>, sqlx::Error> {
        Ok(self
            .movies
            .lock()
            .unwrap()
            .values()
            .find(|m| m.slug == slug)
            .cloned())
    }

    async fn get_all(&self, options: &GetAllMoviesOptions) -> Result<Vec<Movie>, sqlx::Error> {
        self.get_all_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .movies
            .lock()
            .unwrap()
            .values()
            .filter(|m| matches(m, options.title.as_deref(), options.year_of_release))
            .skip(options.offset() as usize)
            .take(options.page_size as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, movie: &Movie) -> Result<bool, sqlx::Error> {
        let mut movies = self.movies.lock().unwrap();
        match movies.get_mut(&movie.id) {
            Some(stored) => {
                *stored = movie.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: MovieId) -> Result<bool, sqlx::Error> {
        Ok(self.movies.lock().unwrap().remove(&id).is_some())
    }

    async fn exists_by_id(&self, id: MovieId) -> Result<bool, sqlx::Error> {
        Ok(self.movies.lock().unwrap().contains_key(&id))
    }

    async fn get_count(&self, title: Option<&str>, year: Option<i32>) -> Result<i64, sqlx::Error> {
        Ok(self
            .movies
            .lock()
            .unwrap()
            .values()
            .filter(|m| matches(m, title, year))
            .count() as i64)
    }
}

pub struct InMemoryRatingRepo {
    movies: Arc<InMemoryMovieRepo>,
    ratings: Mutex<BTreeMap<(MovieId, UserId), i32>>,
}

impl InMemoryRatingRepo {
    pub fn new(movies: Arc<InMemoryMovieRepo>) -> Self {
        Self {
            movies,
            ratings: Mutex::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.ratings.lock().unwrap().len()
    }
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepo {
    async fn rate(&self, movie_id: MovieId, rating: i32, user_id: UserId) -> Result<bool, sqlx::Error> {
        self.ratings.lock().unwrap().insert((movie_id, user_id), rating);
        Ok(true)
    }

    async fn get_average_rating(&self, movie_id: MovieId) -> Result<Option<f64>, sqlx::Error> {
        let ratings = self.ratings.lock().unwrap();
        let values: Vec<i32> = ratings
            .iter()
            .filter(|((m, _), _)| *m == movie_id)
            .map(|(_, r)| *r)
            .collect();
        if values.is_empty() {
            return Ok(None);
        }
        let avg = values.iter().sum::<i32>() as f64 / values.len() as f64;
        Ok(Some((avg * 10.0).round() / 10.0))
    }

    async fn get_rating(&self, movie_id: MovieId, user_id: UserId) -> Result<RatingSummary, sqlx::Error> {
        let rating = self.get_average_rating(movie_id).await?;
        let user_rating = self.ratings.lock().unwrap().get(&(movie_id, user_id)).copied();
        Ok(RatingSummary {
            rating,
            user_rating,
        })
    }

    async fn delete_rating(&self, movie_id: MovieId, user_id: UserId) -> Result<bool, sqlx::Error> {
        Ok(self.ratings.lock().unwrap().remove(&(movie_id, user_id)).is_some())
    }

    async fn get_ratings_for_user(&self, user_id: UserId) -> Result<Vec<MovieRating>, sqlx::Error> {
        let ratings: Vec<(MovieId, i32)> = self
            .ratings
            .lock()
            .unwrap()
            .iter()
            .filter(|((_, u), _)| *u == user_id)
            .map(|((m, _), r)| (*m, *r))
            .collect();
        let mut out: Vec<MovieRating> = ratings
            .into_iter()
            .map(|(movie_id, rating)| MovieRating {
                movie_id,
                slug: self.movies.slug_of(movie_id).unwrap_or_default(),
                rating,
            })
            .collect();
        out.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(out)
    }
}
