//! falsify property-based testing library.
//!
//! This is the main entry point for falsify, providing a convenient API for
//! property-based and model-based testing in Rust.
//!
//! ```
//! use falsify::*;
//!
//! let prop = property(Gen::int_range(0, 1000).unwrap(), |&x| x < 10);
//! let result = prop.check(&Config::default().with_seed(42));
//! assert_eq!(result.counterexample(), Some(&10));
//! ```
//!
//! Model-based tests implement [`Command`] for their operations. The glob
//! import leaves the prelude `Result` untouched; the crate's own alias lives
//! at [`error::Result`].
//!
//! ```
//! use falsify::*;
//! use std::fmt;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Counter {
//!     Incr,
//!     Get,
//! }
//!
//! impl fmt::Display for Counter {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         match self {
//!             Counter::Incr => write!(f, "incr"),
//!             Counter::Get => write!(f, "get"),
//!         }
//!     }
//! }
//!
//! impl Command for Counter {
//!     type Model = u32;
//!     type Real = u32;
//!
//!     fn apply(&self, model: &mut u32) {
//!         if let Counter::Incr = self {
//!             *model += 1;
//!         }
//!     }
//!
//!     fn run(&self, model: &u32, real: &mut u32) -> Result<(), String> {
//!         match self {
//!             Counter::Incr => *real += 1,
//!             Counter::Get if *real != *model => {
//!                 return Err(format!("read {real}, expected {model}"));
//!             }
//!             Counter::Get => {}
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let sequences = commands(
//!     vec![Gen::constant(Counter::Incr), Gen::constant(Counter::Get)],
//!     20,
//! )
//! .unwrap();
//! let prop = property(sequences, |sequence| model_run(|| (0, 0), sequence));
//! assert!(prop.assert(&Config::default().with_seed(3)).is_ok());
//! ```

pub use falsify_core::*;
