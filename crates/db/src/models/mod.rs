//! Row types returned by the repositories.

pub mod movie;
pub mod rating;
