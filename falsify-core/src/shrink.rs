//! Generic shrinking strategies shared by concrete generators.

/// Candidates moving `value` towards `target`.
///
/// The target comes first, then values halving the remaining gap, ending with
/// the immediate neighbour of `value` on the target side. The sequence has
/// O(log |value - target|) elements, stays between `target` and `value` and
/// never contains `value` itself.
pub fn towards(target: i64, value: i64) -> Vec<i64> {
    if target == value {
        return Vec::new();
    }

    let value = value as i128;
    let mut gap = value - target as i128;
    let mut candidates = Vec::new();
    while gap != 0 {
        candidates.push((value - gap) as i64);
        gap /= 2;
    }
    candidates
}

/// Shrink a fixed-length sequence one position at a time.
///
/// For each position in order, every candidate produced by `shrink_one` for
/// that element is emitted in a copy of `values` where only that position
/// changed. The result size is the sum of the per-position candidate counts.
pub fn positionwise<T, F>(values: &[T], shrink_one: F) -> Vec<Vec<T>>
where
    T: Clone,
    F: Fn(usize, &T) -> Vec<T>,
{
    let mut result = Vec::new();
    for (index, value) in values.iter().enumerate() {
        for candidate in shrink_one(index, value) {
            let mut shrunk = values.to_vec();
            shrunk[index] = candidate;
            result.push(shrunk);
        }
    }
    result
}
