//! Core library functions for Loomi

pub mod analysis;
pub mod catalog;
pub mod enrichment;
pub mod generator;
pub mod playlistlib;
pub mod search;

pub use enrichment::EnrichmentLib;
pub use generator::GeneratorService;
pub use playlistlib::PlaylistLib;
pub use search::{SearchLib, SearchResults};
