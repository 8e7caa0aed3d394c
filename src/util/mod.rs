//! Utility functions.
pub mod iri;
pub mod json;

pub use iri::*;
pub use json::*;
