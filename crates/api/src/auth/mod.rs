//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- signed access-token generation and validation.

pub mod jwt;
pub mod password;
