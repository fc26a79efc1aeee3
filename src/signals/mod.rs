//! Composite scoring and signal classification.

pub mod classifier;
pub mod scoring;

pub use classifier::*;
pub use scoring::*;
