//! Reproducibility properties
//!
//! A seed must determine every draw of a random source, and therefore the
//! whole outcome of a check, including the shrunk counterexample.

use crate::{arbitrary_seed, assert_holds};
use falsify::*;

/// Property: Two sources built from the same seed yield identical streams
pub fn test_same_seed_same_stream() {
    let prop = property(arbitrary_seed(), |&seed| {
        let mut first = Random::new(seed);
        let mut second = Random::new(seed);
        (0..64).all(|_| first.next_u64() == second.next_u64())
    });

    assert_holds("same seed same stream", prop, &Config::default());
}

/// Property: Forks taken at the same cursor position are identical
pub fn test_forked_streams_are_reproducible() {
    let prop = property(arbitrary_seed(), |&seed| {
        let mut first = Random::new(seed);
        let mut second = Random::new(seed);
        first.next_u64();
        second.next_u64();

        let mut first_fork = first.fork();
        let mut second_fork = second.fork();
        (0..16).all(|_| {
            first_fork.next_in_range(-100, 100) == second_fork.next_in_range(-100, 100)
                && first.next_bool() == second.next_bool()
        })
    });

    assert_holds("forked streams are reproducible", prop, &Config::default());
}

/// Property: Checking twice with the same explicit seed gives the same outcome
pub fn test_check_is_reproducible() {
    let prop = property(arbitrary_seed(), |&seed| {
        let inner = property(
            tuple((Gen::int_range(-1000, 1000).unwrap(), Gen::bool())),
            |&(n, flag)| flag || n < 250,
        );
        let config = Config::default().with_seed(seed);
        let first = inner.check(&config);
        let second = inner.check(&config);
        first == second && first.seed() == seed
    });

    assert_holds(
        "check is reproducible",
        prop,
        &Config::default().with_tests(30),
    );
}

/// Property: Asserting an always-true property never fails, for any seed
pub fn test_assert_never_fails_on_true_property() {
    let prop = property(arbitrary_seed(), |&seed| {
        let inner = property(tuple((Gen::integer(), Gen::bool())), |_| true);
        inner
            .assert(&Config::default().with_seed(seed).with_tests(20))
            .is_ok()
    });

    assert_holds(
        "assert never fails on a true property",
        prop,
        &Config::default().with_tests(30),
    );
}
