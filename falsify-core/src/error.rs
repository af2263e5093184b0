//! Error and outcome types.

use std::any::Any;
use std::fmt;
use thiserror::Error;

/// Main error type for falsify.
#[derive(Error, Debug)]
pub enum FalsifyError {
    /// A property was falsified by [`Property::assert`](crate::Property::assert).
    #[error("{report}")]
    PropertyFailed {
        seed: u64,
        counterexample: String,
        tests_run: usize,
        shrinks_performed: usize,
        /// Fully rendered failure report.
        report: String,
    },

    /// Invalid generator construction.
    #[error("Invalid generator: {message}")]
    InvalidGenerator { message: String },
}

/// Result type for fallible constructors and assertions.
pub type Result<T> = std::result::Result<T, FalsifyError>;

impl FalsifyError {
    pub(crate) fn invalid_generator(message: impl Into<String>) -> Self {
        FalsifyError::InvalidGenerator {
            message: message.into(),
        }
    }
}

/// One accepted step of the shrink search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinkStep {
    /// Debug rendering of the failing value at this step.
    pub counterexample: String,
    /// 0 for the original failure, then 1.. for each accepted shrink.
    pub step: usize,
}

/// Outcome of a property check.
#[derive(Debug, Clone, PartialEq)]
pub enum TestResult<T> {
    /// Every generated case satisfied the property.
    Pass { tests_run: usize, seed: u64 },

    /// A case falsified the property; `counterexample` is the shrunk value.
    Fail {
        counterexample: T,
        reason: String,
        tests_run: usize,
        shrinks_performed: usize,
        seed: u64,
        shrink_steps: Vec<ShrinkStep>,
    },
}

impl<T> TestResult<T> {
    pub fn is_failure(&self) -> bool {
        matches!(self, TestResult::Fail { .. })
    }

    pub fn counterexample(&self) -> Option<&T> {
        match self {
            TestResult::Fail { counterexample, .. } => Some(counterexample),
            TestResult::Pass { .. } => None,
        }
    }

    /// Seed that reproduces this outcome through `Config::with_seed`.
    pub fn seed(&self) -> u64 {
        match self {
            TestResult::Pass { seed, .. } | TestResult::Fail { seed, .. } => *seed,
        }
    }

    pub fn tests_run(&self) -> usize {
        match self {
            TestResult::Pass { tests_run, .. } | TestResult::Fail { tests_run, .. } => *tests_run,
        }
    }

    pub fn shrinks_performed(&self) -> usize {
        match self {
            TestResult::Pass { .. } => 0,
            TestResult::Fail {
                shrinks_performed, ..
            } => *shrinks_performed,
        }
    }
}

impl<T: fmt::Debug> fmt::Display for TestResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResult::Pass { tests_run, .. } => {
                write!(f, "  ✓ property passed {} tests.", tests_run)
            }
            TestResult::Fail {
                counterexample,
                reason,
                tests_run,
                shrinks_performed,
                seed,
                shrink_steps,
            } => {
                writeln!(
                    f,
                    "  ✗ property failed after {} tests and {} shrinks.",
                    tests_run, shrinks_performed
                )?;

                if !shrink_steps.is_empty() {
                    writeln!(f)?;
                    writeln!(f, "    Shrinking progression:")?;
                    for step in shrink_steps {
                        if step.step == 0 {
                            writeln!(f, "      │ Original: {}", step.counterexample)?;
                        } else {
                            writeln!(f, "      │ Step {}: {}", step.step, step.counterexample)?;
                        }
                    }
                    writeln!(f)?;
                }

                writeln!(f, "    === {} ===", reason)?;
                writeln!(f, "    Minimal counterexample: {:?}", counterexample)?;
                write!(f, "    Reproduce with seed: {}", seed)
            }
        }
    }
}

/// Render a caught panic payload as text.
pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}
