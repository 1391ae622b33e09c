//! Well-known authorization header and service identity.

/// Header carrying the API key used by trusted automated callers.
pub const API_KEY_HEADER: &str = "x-api-key";

/// User id attributed to requests authenticated by API key.
pub const SERVICE_USER_ID: uuid::Uuid =
    uuid::Uuid::from_u128(0x6c7e_5a40_c665_4f5d_8c41_3f2e_9a1b_0d77);
