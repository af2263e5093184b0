//! Property definitions and the check/shrink loop.

use crate::data::{Config, Random, Seed};
use crate::error::{panic_message, FalsifyError, Result, ShrinkStep, TestResult};
use crate::gen::Gen;
use std::fmt::{self, Debug};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, trace};

/// Values a predicate may return.
///
/// `true`, `()` and `Ok(())` pass; `false` and `Err(_)` fail. A panic inside
/// the predicate also fails.
pub trait Testable {
    fn verdict(self) -> std::result::Result<(), String>;
}

impl Testable for bool {
    fn verdict(self) -> std::result::Result<(), String> {
        if self {
            Ok(())
        } else {
            Err("predicate returned false".to_string())
        }
    }
}

impl Testable for () {
    fn verdict(self) -> std::result::Result<(), String> {
        Ok(())
    }
}

impl<E: fmt::Display> Testable for std::result::Result<(), E> {
    fn verdict(self) -> std::result::Result<(), String> {
        self.map_err(|error| error.to_string())
    }
}

type TestFn<T> = Box<dyn Fn(&T) -> std::result::Result<(), String>>;

/// A predicate paired with the generator of its inputs.
pub struct Property<T> {
    generator: Gen<T>,
    test_function: TestFn<T>,
}

struct Shrunk<T> {
    value: T,
    reason: String,
    shrinks: usize,
    steps: Vec<ShrinkStep>,
}

impl<T> Property<T>
where
    T: 'static + Debug + Clone,
{
    /// Create a property from a generator and a predicate.
    pub fn new<F, O>(generator: Gen<T>, predicate: F) -> Self
    where
        F: Fn(&T) -> O + 'static,
        O: Testable,
    {
        Property {
            generator,
            test_function: Box::new(move |input| predicate(input).verdict()),
        }
    }

    /// Evaluate the property on up to `config.test_limit` generated inputs.
    ///
    /// Every run draws from its own fork of a root source seeded with
    /// `config.seed` (or a fresh random seed), so the seed alone reproduces
    /// the whole check. The first falsifying input is shrunk and reported;
    /// falsification is never an error here.
    ///
    /// Panics in the predicate are caught, but the process panic hook still
    /// runs for each one, so a panicking property prints a message per failing
    /// run and per failing shrink candidate. Return `false` or an `Err` instead
    /// of asserting to keep the output quiet, or install a hook with
    /// [`std::panic::set_hook`] around the check.
    pub fn check(&self, config: &Config) -> TestResult<T> {
        let seed = config.seed.unwrap_or_else(Seed::random_value);
        let mut root = Random::new(seed);
        debug!(seed, tests = config.test_limit, "checking property");

        for test_num in 0..config.test_limit {
            let mut source = root.fork();
            let value = self.generator.generate(&mut source);

            if let Err(reason) = self.evaluate(&value) {
                info!(seed, run = test_num + 1, %reason, "property falsified, shrinking");
                let shrunk = self.shrink_failure(value, reason, config);
                debug!(shrinks = shrunk.shrinks, "shrinking finished");

                return TestResult::Fail {
                    counterexample: shrunk.value,
                    reason: shrunk.reason,
                    tests_run: test_num + 1,
                    shrinks_performed: shrunk.shrinks,
                    seed,
                    shrink_steps: shrunk.steps,
                };
            }
        }

        debug!(seed, tests = config.test_limit, "property passed");
        TestResult::Pass {
            tests_run: config.test_limit,
            seed,
        }
    }

    /// Like [`Property::check`], turning a falsification into
    /// [`FalsifyError::PropertyFailed`] with the full report.
    pub fn assert(&self, config: &Config) -> Result<()> {
        let result = self.check(config);
        let report = result.to_string();
        match result {
            TestResult::Pass { .. } => Ok(()),
            TestResult::Fail {
                counterexample,
                tests_run,
                shrinks_performed,
                seed,
                ..
            } => Err(FalsifyError::PropertyFailed {
                seed,
                counterexample: format!("{counterexample:?}"),
                tests_run,
                shrinks_performed,
                report,
            }),
        }
    }

    /// Run the predicate once, turning panics into failures.
    fn evaluate(&self, value: &T) -> std::result::Result<(), String> {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.test_function)(value))) {
            Ok(verdict) => verdict,
            Err(payload) => Err(format!("panicked: {}", panic_message(payload))),
        }
    }

    /// Depth-first shrink search.
    ///
    /// The first candidate of the current value that still fails replaces it
    /// and the search restarts from that candidate's shrinks. Ends at a local
    /// minimum or after `config.shrink_limit` accepted steps.
    fn shrink_failure(&self, value: T, reason: String, config: &Config) -> Shrunk<T> {
        let mut steps = vec![ShrinkStep {
            counterexample: format!("{value:?}"),
            step: 0,
        }];
        let mut current = value;
        let mut current_reason = reason;
        let mut shrinks = 0;

        'search: while shrinks < config.shrink_limit {
            for candidate in self.generator.shrink(&current) {
                if let Err(reason) = self.evaluate(&candidate) {
                    shrinks += 1;
                    trace!(step = shrinks, value = ?candidate, "accepted shrink");
                    steps.push(ShrinkStep {
                        counterexample: format!("{candidate:?}"),
                        step: shrinks,
                    });
                    current = candidate;
                    current_reason = reason;
                    continue 'search;
                }
            }
            break;
        }

        Shrunk {
            value: current,
            reason: current_reason,
            shrinks,
            steps,
        }
    }
}

/// Create a property for a generator and predicate.
pub fn property<T, F, O>(generator: Gen<T>, predicate: F) -> Property<T>
where
    T: 'static + Debug + Clone,
    F: Fn(&T) -> O + 'static,
    O: Testable,
{
    Property::new(generator, predicate)
}
