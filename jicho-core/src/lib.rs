//! Jicho Core - domain model for civic risk monitoring
//!
//! This crate provides the foundational primitives:
//! - Document records handed over by retrieval sources
//! - Static indicator catalogs (crisis, misinformation, corruption)
//! - Entity baseline profiles (county historical risk context)
//! - Alert levels and alert records

pub mod document;
pub mod catalog;
pub mod profiles;
pub mod alert;

pub use document::*;
pub use catalog::*;
pub use profiles::*;
pub use alert::*;

/// Indicators above this normalized score count as triggered
pub const TRIGGER_THRESHOLD: f64 = 0.5;

/// Indicators above this normalized score are worth mentioning in prose
pub const NOTABLE_THRESHOLD: f64 = 0.3;

/// Overall score above which a national alert is emitted
pub const NATIONAL_ALERT_FLOOR: f64 = 0.5;

/// Baseline multiplier used when an entity has no profile entry
pub const NEUTRAL_BASELINE: f64 = 0.5;
