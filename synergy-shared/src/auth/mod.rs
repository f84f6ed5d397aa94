/// Authentication utilities
///
/// This module provides the authentication primitives for SynergySphere:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Bearer token generation and validation
/// - [`middleware`]: Axum middleware that turns a bearer token into a
///   [`middleware::CurrentUser`] request extension
///
/// # Security Notes
///
/// - Passwords are hashed with Argon2id; verification is constant-time.
/// - Tokens are HS256 JWTs signed with secret material injected through
///   configuration, never embedded in source.

pub mod jwt;
pub mod middleware;
pub mod password;
