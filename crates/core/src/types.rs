use chrono::Datelike;

/// Movie primary keys are UUIDs (v7, so they sort by creation time).
pub type MovieId = uuid::Uuid;

/// User identity as carried in the `sub` claim of an access token.
pub type UserId = uuid::Uuid;

/// The current calendar year in UTC.
pub fn current_utc_year() -> i32 {
    chrono::Utc::now().year()
}
