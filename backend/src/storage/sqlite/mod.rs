//! SQLite-backed repository implementations.

pub mod repositories;
