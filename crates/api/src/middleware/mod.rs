//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`auth::MaybeUser`] -- The caller's identity when present; never rejects.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` claim or the admin API key.
//! - [`rbac::RequireTrustedMember`] -- Requires `trusted_member` or `admin`.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.

pub mod auth;
pub mod rbac;
