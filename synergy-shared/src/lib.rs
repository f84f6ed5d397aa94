//! # SynergySphere Shared Library
//!
//! This crate contains the types and business logic shared between the
//! SynergySphere API server and its test suites.
//!
//! ## Module Organization
//!
//! - `models`: Database models and CRUD operations
//! - `auth`: Password hashing, bearer tokens, and request authentication
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the SynergySphere shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
