//! The generator/shrinker contract and its basic combinators.

use crate::data::Random;
use crate::error::{FalsifyError, Result};
use crate::shrink;
use std::sync::Arc;

/// Something that can draw values from a [`Random`] and shrink them.
///
/// Implementations must keep `shrink` a pure function of its argument: every
/// candidate is a valid value of the same domain, the argument itself is never
/// offered, and the same argument always yields the same ordered candidates.
pub trait Arbitrary {
    type Value;

    /// Draw a value, consuming entropy from `source`.
    fn generate(&self, source: &mut Random) -> Self::Value;

    /// Strictly smaller candidates for `value`, most aggressive first.
    fn shrink(&self, value: &Self::Value) -> Vec<Self::Value>;
}

/// A generator for test data of type `T`.
///
/// Generators are explicit, first-class values composed with combinator
/// functions. Cloning is cheap and the handle can be shared across threads.
pub struct Gen<T> {
    inner: Arc<dyn Arbitrary<Value = T> + Send + Sync>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Arbitrary for Gen<T> {
    type Value = T;

    fn generate(&self, source: &mut Random) -> T {
        self.inner.generate(source)
    }

    fn shrink(&self, value: &T) -> Vec<T> {
        self.inner.shrink(value)
    }
}

impl<T: 'static> Gen<T> {
    /// Wrap any [`Arbitrary`] implementation.
    pub fn from_arbitrary<A>(arbitrary: A) -> Self
    where
        A: Arbitrary<Value = T> + Send + Sync + 'static,
    {
        Gen {
            inner: Arc::new(arbitrary),
        }
    }

    /// Create a generator from a draw function and a shrink function.
    pub fn new<G, S>(generate: G, shrink: S) -> Self
    where
        G: Fn(&mut Random) -> T + Send + Sync + 'static,
        S: Fn(&T) -> Vec<T> + Send + Sync + 'static,
    {
        Gen::from_arbitrary(FnArbitrary { generate, shrink })
    }

    /// Draw a value.
    pub fn generate(&self, source: &mut Random) -> T {
        self.inner.generate(source)
    }

    /// Shrink candidates for `value`.
    pub fn shrink(&self, value: &T) -> Vec<T> {
        self.inner.shrink(value)
    }

    /// Draw a single value from a fresh source seeded with `seed`.
    pub fn sample(&self, seed: u64) -> T {
        self.generate(&mut Random::new(seed))
    }

    /// A generator that always produces `value` and never shrinks.
    pub fn constant(value: T) -> Self
    where
        T: Clone + Send + Sync,
    {
        Gen::new(move |_source| value.clone(), |_value| Vec::new())
    }

    /// Map generated values through `mapper`.
    ///
    /// Shrinking a mapped value asks `unmapper` for the value it came from,
    /// shrinks that and maps the candidates forward; values the unmapper
    /// rejects do not shrink. The caller must keep `mapper` injective on the
    /// shrink set and `unmapper` its left inverse, otherwise a shrink
    /// candidate may equal the value being shrunk.
    pub fn map<U, F, B>(self, mapper: F, unmapper: B) -> Gen<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
        B: Fn(&U) -> Option<T> + Send + Sync + 'static,
    {
        Gen::from_arbitrary(Mapped {
            source: self,
            mapper,
            unmapper,
        })
    }

    /// Choose uniformly between generators.
    pub fn one_of(generators: Vec<Gen<T>>) -> Result<Self> {
        Gen::frequency(generators.into_iter().map(|gen| (1, gen)).collect())
    }

    /// Choose between generators with the given relative weights.
    ///
    /// Shrinking offers every branch's candidates for the value, in branch
    /// order, so branches should only shrink values they can produce.
    pub fn frequency(choices: Vec<(u32, Gen<T>)>) -> Result<Self> {
        if choices.is_empty() {
            return Err(FalsifyError::invalid_generator(
                "a union needs at least one generator",
            ));
        }
        let total: u64 = choices.iter().map(|(weight, _)| u64::from(*weight)).sum();
        if total == 0 {
            return Err(FalsifyError::invalid_generator(
                "a union needs a positive total weight",
            ));
        }
        Ok(Gen::from_arbitrary(Frequency { choices, total }))
    }
}

/// Primitive generators.
impl Gen<bool> {
    /// Generate a random boolean; `true` shrinks to `false`.
    pub fn bool() -> Self {
        Gen::new(
            |source| source.next_bool(),
            |&value| if value { vec![false] } else { Vec::new() },
        )
    }
}

impl Gen<i64> {
    /// Generate an integer in `[min, max]`, shrinking towards zero (or the
    /// bound closest to it).
    pub fn int_range(min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(FalsifyError::invalid_generator(format!(
                "empty integer range [{min}, {max}]"
            )));
        }
        Ok(Gen::from_arbitrary(IntRange { min, max }))
    }

    /// Generate a 32-bit signed integer.
    pub fn integer() -> Self {
        Gen::from_arbitrary(IntRange {
            min: i64::from(i32::MIN),
            max: i64::from(i32::MAX),
        })
    }

    /// Generate a natural number up to `max`.
    pub fn nat(max: i64) -> Result<Self> {
        Self::int_range(0, max)
    }
}

struct FnArbitrary<G, S> {
    generate: G,
    shrink: S,
}

impl<T, G, S> Arbitrary for FnArbitrary<G, S>
where
    G: Fn(&mut Random) -> T,
    S: Fn(&T) -> Vec<T>,
{
    type Value = T;

    fn generate(&self, source: &mut Random) -> T {
        (self.generate)(source)
    }

    fn shrink(&self, value: &T) -> Vec<T> {
        (self.shrink)(value)
    }
}

/// Integers in an inclusive range.
#[derive(Debug, Clone, Copy)]
struct IntRange {
    min: i64,
    max: i64,
}

impl IntRange {
    fn target(&self) -> i64 {
        0i64.clamp(self.min, self.max)
    }
}

impl Arbitrary for IntRange {
    type Value = i64;

    fn generate(&self, source: &mut Random) -> i64 {
        source.next_in_range(self.min, self.max)
    }

    fn shrink(&self, value: &i64) -> Vec<i64> {
        if !(self.min..=self.max).contains(value) {
            return Vec::new();
        }
        shrink::towards(self.target(), *value)
    }
}

struct Mapped<T, F, B> {
    source: Gen<T>,
    mapper: F,
    unmapper: B,
}

impl<T, U, F, B> Arbitrary for Mapped<T, F, B>
where
    T: 'static,
    F: Fn(T) -> U,
    B: Fn(&U) -> Option<T>,
{
    type Value = U;

    fn generate(&self, source: &mut Random) -> U {
        (self.mapper)(self.source.generate(source))
    }

    fn shrink(&self, value: &U) -> Vec<U> {
        match (self.unmapper)(value) {
            Some(original) => self
                .source
                .shrink(&original)
                .into_iter()
                .map(&self.mapper)
                .collect(),
            None => Vec::new(),
        }
    }
}

struct Frequency<T> {
    choices: Vec<(u32, Gen<T>)>,
    total: u64,
}

impl<T: 'static> Arbitrary for Frequency<T> {
    type Value = T;

    fn generate(&self, source: &mut Random) -> T {
        let mut pick = source.next_bounded(self.total);
        for (weight, gen) in &self.choices {
            let weight = u64::from(*weight);
            if pick < weight {
                return gen.generate(source);
            }
            pick -= weight;
        }
        // The pick is always below the total weight.
        unreachable!("weighted pick out of range")
    }

    fn shrink(&self, value: &T) -> Vec<T> {
        self.choices
            .iter()
            .flat_map(|(_, gen)| gen.shrink(value))
            .collect()
    }
}
