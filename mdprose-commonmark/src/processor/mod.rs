//! Document classification.
//!
//! # Architecture
//!
//! The processor module is organized into focused submodules:
//!
//! - [`core`]: the `Classifier` pipeline and syntax-tree walk
//! - [`process`]: convenience entry points, panic recovery and batching
//! - [`types`]: options, their builder and the `Classifier` struct
pub mod core;
pub mod process;
pub mod types;

pub use process::{classify_batch, parse, parse_safe, parse_with_recovery};
pub use types::{
  Classifier,
  ClassifierOptions,
  ClassifierOptionsBuilder,
  HeadingLines,
};
