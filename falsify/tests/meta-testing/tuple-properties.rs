//! Tuple combinator properties
//!
//! Every property is checked for each supported arity, from 1 to 9
//! components. Components are tagged generators producing `key{id}_{n}` so a
//! value in the wrong position is detected.

use crate::{arbitrary_seed, assert_holds};
use falsify::*;

/// Integer generator whose values carry the id of the component.
fn dummy(id: u32) -> Gen<String> {
    let prefix = format!("key{id}_");
    let unprefix = prefix.clone();
    Gen::integer().map(
        move |n| format!("{prefix}{n}"),
        move |value: &String| value.strip_prefix(unprefix.as_str())?.parse().ok(),
    )
}

fn has_key(value: &str, id: u32) -> bool {
    value.starts_with(&format!("key{id}_"))
}

/// Run `$check` for tuples of every arity, with `$gen` bound to the tuple
/// generator and `$ids` to the component ids in order.
macro_rules! for_each_arity {
    ($check:ident) => {
        $check!(1 => 0);
        $check!(1 => 0, 2 => 1);
        $check!(1 => 0, 2 => 1, 3 => 2);
        $check!(1 => 0, 2 => 1, 3 => 2, 11 => 3);
        $check!(1 => 0, 2 => 1, 3 => 2, 11 => 3, 12 => 4);
        $check!(1 => 0, 2 => 1, 3 => 2, 11 => 3, 12 => 4, 13 => 5);
        $check!(1 => 0, 2 => 1, 3 => 2, 11 => 3, 12 => 4, 13 => 5, 21 => 6);
        $check!(1 => 0, 2 => 1, 3 => 2, 11 => 3, 12 => 4, 13 => 5, 21 => 6, 22 => 7);
        $check!(1 => 0, 2 => 1, 3 => 2, 11 => 3, 12 => 4, 13 => 5, 21 => 6, 22 => 7, 23 => 8);
    };
}

/// Property: The same seed yields the same tuple, each component in place
pub fn test_same_tuple_for_same_seed() {
    macro_rules! check {
        ($($id:literal => $index:tt),+) => {{
            let gen = tuple(($(dummy($id),)+));
            let prop = property(arbitrary_seed(), move |&seed| {
                let first = gen.generate(&mut Random::new(seed));
                let second = gen.generate(&mut Random::new(seed));
                $(has_key(&first.$index, $id) &&)+ first == second
            });
            assert_holds("same tuple for same seed", prop, &Config::default().with_tests(50));
        }};
    }
    for_each_arity!(check);
}

/// Property: Every shrink candidate keeps each component in its domain
pub fn test_shrink_within_allowed_values() {
    macro_rules! check {
        ($($id:literal => $index:tt),+) => {{
            let gen = tuple(($(dummy($id),)+));
            let prop = property(arbitrary_seed(), move |&seed| {
                let value = gen.sample(seed);
                gen.shrink(&value)
                    .iter()
                    .all(|candidate| $(has_key(&candidate.$index, $id) &&)+ true)
            });
            assert_holds("shrink within allowed values", prop, &Config::default().with_tests(50));
        }};
    }
    for_each_arity!(check);
}

/// Property: The input never appears among its own shrink candidates
pub fn test_shrink_never_suggests_input() {
    macro_rules! check {
        ($($id:literal => $index:tt),+) => {{
            let gen = tuple(($(dummy($id),)+));
            let prop = property(arbitrary_seed(), move |&seed| {
                let value = gen.sample(seed);
                gen.shrink(&value).iter().all(|candidate| *candidate != value)
            });
            assert_holds("shrink never suggests input", prop, &Config::default().with_tests(50));
        }};
    }
    for_each_arity!(check);
}

/// Property: A shrink candidate differs from the input in exactly one position
pub fn test_shrink_changes_exactly_one_position() {
    macro_rules! check {
        ($($id:literal => $index:tt),+) => {{
            let gen = tuple(($(dummy($id),)+));
            let prop = property(arbitrary_seed(), move |&seed| {
                let value = gen.sample(seed);
                gen.shrink(&value).iter().all(|candidate| {
                    let changed = 0 $(+ usize::from(candidate.$index != value.$index))+;
                    changed == 1
                })
            });
            assert_holds(
                "shrink changes exactly one position",
                prop,
                &Config::default().with_tests(50),
            );
        }};
    }
    for_each_arity!(check);
}

/// Property: The shrink set size is the sum of the component shrink-set sizes
pub fn test_shrink_size_is_sum_of_components() {
    macro_rules! check {
        ($($id:literal => $index:tt),+) => {{
            let gen = tuple(($(dummy($id),)+));
            let prop = property(arbitrary_seed(), move |&seed| {
                let value = gen.sample(seed);
                let expected = 0 $(+ dummy($id).shrink(&value.$index).len())+;
                gen.shrink(&value).len() == expected
            });
            assert_holds(
                "shrink size is sum of components",
                prop,
                &Config::default().with_tests(50),
            );
        }};
    }
    for_each_arity!(check);
}
