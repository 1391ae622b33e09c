//! Movie catalog domain layer.
//!
//! Pure types and rules shared by the repository and HTTP layers. Nothing
//! in this crate performs I/O.

pub mod error;
pub mod movie;
pub mod options;
pub mod rating;
pub mod roles;
pub mod types;
pub mod validation;
