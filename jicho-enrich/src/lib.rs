//! Jicho Enrich - optional AI narrative for assessments
//!
//! Asks an external text-generation provider for a short qualitative
//! summary of the computed scores. Any failure (timeout, API error,
//! empty response) degrades to a deterministic templated summary;
//! nothing in this crate propagates an error to the caller.

pub mod backend;
pub mod narrative;

pub use backend::*;
pub use narrative::*;
