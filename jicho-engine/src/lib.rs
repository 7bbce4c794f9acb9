//! Jicho Engine - the deterministic scoring pipeline
//!
//! Pure, synchronous, CPU-bound stages:
//! - **Scorer**: keyword presence counts against an indicator catalog
//! - **Evaluator**: baseline amplification and severity classification
//! - **Aggregator**: per-region and national alert assembly
//! - **Recommender**: severity- and indicator-driven guidance
//!
//! No stage performs I/O or holds state across requests.

pub mod scorer;
pub mod evaluator;
pub mod aggregator;
pub mod recommend;

pub use scorer::*;
pub use evaluator::*;
pub use aggregator::*;
pub use recommend::*;
