//! Jicho Runtime - assessment orchestration
//!
//! Wires the retrieval sources, scoring engine, recommendation engine
//! and narrative enricher into one request pipeline and assembles the
//! report consumed by the presentation layer.

pub mod pipeline;

pub use pipeline::*;
