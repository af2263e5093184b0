//! Fixed-arity tuple combinator.
//!
//! Components are drawn strictly left to right from one shared [`Random`], so
//! each position always consumes the same segment of the stream for a given
//! seed. Shrinking changes one position at a time: the candidates of a tuple
//! are, position by position, the candidates of that component with every
//! other position held fixed. The shrink set therefore grows with the sum of
//! the component shrink-set sizes, not their product.

use crate::data::Random;
use crate::error::{FalsifyError, Result};
use crate::gen::{Arbitrary, Gen};
use crate::shrink;

/// Largest supported tuple arity.
pub const MAX_TUPLE_ARITY: usize = 9;

/// Tuples of 1 to [`MAX_TUPLE_ARITY`] arbitraries.
pub trait TupleComponents: Arbitrary {}

/// Push a copy of `value` for every candidate of one position, with only
/// that position replaced. Every tuple arity shrinks through this.
fn replace_at<V, X, F>(value: &V, component_candidates: Vec<X>, place: F, out: &mut Vec<V>)
where
    V: Clone,
    F: Fn(&mut V, X),
{
    for component in component_candidates {
        let mut shrunk = value.clone();
        place(&mut shrunk, component);
        out.push(shrunk);
    }
}

macro_rules! impl_tuple {
    ($($name:ident $index:tt),+) => {
        impl<$($name),+> Arbitrary for ($($name,)+)
        where
            $($name: Arbitrary, $name::Value: Clone,)+
        {
            type Value = ($($name::Value,)+);

            fn generate(&self, source: &mut Random) -> Self::Value {
                ($(self.$index.generate(source),)+)
            }

            fn shrink(&self, value: &Self::Value) -> Vec<Self::Value> {
                let mut candidates = Vec::new();
                $(
                    replace_at(
                        value,
                        self.$index.shrink(&value.$index),
                        |shrunk: &mut Self::Value, component| shrunk.$index = component,
                        &mut candidates,
                    );
                )+
                candidates
            }
        }

        impl<$($name),+> TupleComponents for ($($name,)+)
        where
            $($name: Arbitrary, $name::Value: Clone,)+
        {
        }
    };
}

impl_tuple!(A 0);
impl_tuple!(A 0, B 1);
impl_tuple!(A 0, B 1, C 2);
impl_tuple!(A 0, B 1, C 2, D 3);
impl_tuple!(A 0, B 1, C 2, D 3, E 4);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
impl_tuple!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7, I 8);

/// Combine 1 to 9 component generators into a tuple generator.
///
/// ```
/// use falsify_core::*;
///
/// let pair = tuple((Gen::int_range(0, 9).unwrap(), Gen::bool()));
/// let (n, _flag) = pair.sample(42);
/// assert!((0..=9).contains(&n));
/// ```
pub fn tuple<C>(components: C) -> Gen<C::Value>
where
    C: TupleComponents + Send + Sync + 'static,
    C::Value: 'static,
{
    Gen::from_arbitrary(components)
}

/// Combine same-typed component generators into a fixed-length `Vec`.
///
/// Fails when the number of components is outside `1..=MAX_TUPLE_ARITY`.
pub fn tuple_of<T>(components: Vec<Gen<T>>) -> Result<Gen<Vec<T>>>
where
    T: Clone + 'static,
{
    if components.is_empty() || components.len() > MAX_TUPLE_ARITY {
        return Err(FalsifyError::invalid_generator(format!(
            "tuple arity must be between 1 and {MAX_TUPLE_ARITY}, got {}",
            components.len()
        )));
    }
    Ok(Gen::from_arbitrary(TupleOf { components }))
}

struct TupleOf<T> {
    components: Vec<Gen<T>>,
}

impl<T: Clone + 'static> Arbitrary for TupleOf<T> {
    type Value = Vec<T>;

    fn generate(&self, source: &mut Random) -> Vec<T> {
        self.components
            .iter()
            .map(|component| component.generate(source))
            .collect()
    }

    fn shrink(&self, value: &Vec<T>) -> Vec<Vec<T>> {
        if value.len() != self.components.len() {
            return Vec::new();
        }
        shrink::positionwise(value, |index, element| {
            self.components[index].shrink(element)
        })
    }
}
