//! Utility modules for Loomi

pub mod auth;
pub mod dates;
pub mod hashing;
pub mod parsers;
