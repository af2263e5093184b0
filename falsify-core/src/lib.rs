//! Core functionality for falsify property-based testing.
//!
//! This crate provides the building blocks of the engine: the deterministic
//! random source, the generator/shrinker contract and its combinators,
//! model-based command sequences, and the property check/shrink loop.

pub mod data;
pub mod error;
pub mod gen;
pub mod property;
pub mod shrink;
pub mod state;
pub mod tuple;

// Re-export the main types. The `Result` alias stays in `error` so that glob
// imports keep the prelude `Result` for `Command::run` and predicates.
pub use data::*;
pub use error::{FalsifyError, ShrinkStep, TestResult};
pub use gen::*;
pub use property::*;
pub use state::*;
pub use tuple::*;
