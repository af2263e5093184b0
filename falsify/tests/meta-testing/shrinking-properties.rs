//! Shrinking correctness properties
//!
//! These properties ensure that shrink candidates are valid, that they never
//! repeat the input, and that the shrink search converges to the boundary of
//! the failing region.

use crate::{arbitrary_seed, assert_holds};
use falsify::*;

/// Property: Integer shrinks stay in range and never repeat the input
pub fn test_integer_shrinks_are_valid() {
    let prop = property(
        tuple((
            Gen::int_range(-1000, 1000).unwrap(),
            Gen::int_range(0, 500).unwrap(),
        )),
        |&(low, width)| {
            let high = low + width;
            let gen = Gen::int_range(low, high).unwrap();
            (low..=high).all(|value| {
                gen.shrink(&value)
                    .iter()
                    .all(|&candidate| (low..=high).contains(&candidate) && candidate != value)
            })
        },
    );

    assert_holds("integer shrinks are valid", prop, &Config::default().with_tests(50));
}

/// Property: Integer shrink sets grow logarithmically with the distance to the target
pub fn test_integer_shrinks_are_logarithmic() {
    let prop = property(Gen::integer(), |&value| {
        let candidates = Gen::integer().shrink(&value);
        let bound = 64 - value.unsigned_abs().leading_zeros() as usize;
        candidates.len() <= bound && (value == 0 || candidates.first() == Some(&0))
    });

    assert_holds("integer shrinks are logarithmic", prop, &Config::default());
}

/// Property: The shrink search stops exactly at the failing threshold
pub fn test_shrinking_finds_threshold() {
    let prop = property(
        tuple((Gen::int_range(1, 1000).unwrap(), arbitrary_seed())),
        |&(threshold, seed)| {
            let inner = property(Gen::int_range(0, 2000).unwrap(), move |&x| x < threshold);
            match inner.check(&Config::default().with_seed(seed)) {
                TestResult::Fail { counterexample, .. } => counterexample == threshold,
                TestResult::Pass { .. } => true,
            }
        },
    );

    assert_holds(
        "shrinking finds threshold",
        prop,
        &Config::default().with_tests(30),
    );
}
