//! Jicho Sources - document retrieval collaborators
//!
//! The engine never fetches anything itself; it is handed document
//! batches by the sources in this crate:
//! - **HeadlineSource**: HTML news search pages, headlines via CSS selectors
//! - **BulletinSource**: JSON feeds of government/agency bulletins
//! - **FixedSource**: in-memory documents for offline runs and tests
//!
//! `fetch_all` fans out over all configured sources concurrently and
//! treats any failed source as contributing zero documents.

pub mod client;
pub mod source;
pub mod news;
pub mod bulletin;

pub use client::*;
pub use source::*;
pub use news::*;
pub use bulletin::*;
