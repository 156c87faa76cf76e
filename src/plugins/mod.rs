//! Clients for the hosted services Loomi talks to
//!
//! Each plugin sits behind a small trait so the core can run against
//! fakes in tests and degrade when a service is not configured.

pub mod openai;
pub mod spotify;
