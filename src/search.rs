/*
 * Binary search over a slice sorted in ascending order.
 *
 * Iterative halving on [low, high): if the target is present, it lies in
 * that range. Returns the first middle index holding an equal value, so
 * with duplicates any of them may be returned.
 *
 * O(log n) time, O(1) space.
 */
pub fn binary_search<T: Ord>(sequence: &[T], target: &T) -> Option<usize> {
    let mut low = 0;
    let mut high = sequence.len();

    while low < high {
        let middle = low + (high - low) / 2;
        match sequence[middle].cmp(target) {
            std::cmp::Ordering::Equal => return Some(middle),
            std::cmp::Ordering::Greater => high = middle,
            std::cmp::Ordering::Less => low = middle + 1,
        }
    }

    None
}
