use bumpalo::Bump;

/*
 * Comparison sorts over mutable slices, all ascending.
 *
 *                    | worst      | best       | space    | stable
 * bubble_sort        | O(n^2)     | O(n)       | O(1)     | yes
 * insertion_sort     | O(n^2)     | O(n)       | O(1)     | yes
 * selection_sort     | O(n^2)     | O(n^2)     | O(1)     | no
 * merge_sort         | O(n log n) | O(n log n) | O(n)     | no (right-first ties)
 * quick_sort         | O(n^2)     | O(n log n) | O(log n) | no
 * heap_sort          | O(n log n) | O(n log n) | O(1)     | no
 */

pub fn is_sorted<T: Ord>(sequence: &[T]) -> bool {
    sequence.windows(2).all(|w| w[0] <= w[1])
}

/*
 * Repeatedly swap adjacent out-of-order pairs. After pass i the last i
 * elements are in their final position. Stops as soon as a full pass
 * performs no swap.
 */
pub fn bubble_sort<T: Ord>(sequence: &mut [T]) {
    let n = sequence.len();
    for i in 0..n {
        let mut swapped = false;
        for j in 0..n - 1 - i {
            if sequence[j] > sequence[j + 1] {
                sequence.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

/*
 * Grow a sorted prefix [0, i) one element at a time, walking each new
 * element left with adjacent swaps. Equal elements are never swapped,
 * which keeps the sort stable.
 */
pub fn insertion_sort<T: Ord>(sequence: &mut [T]) {
    for i in 1..sequence.len() {
        let mut j = i;
        while j > 0 && sequence[j - 1] > sequence[j] {
            sequence.swap(j - 1, j);
            j -= 1;
        }
    }
}

/*
 * For each position, find the minimum of the unsorted suffix and exchange
 * it into place. The single exchange is what makes it unstable.
 */
pub fn selection_sort<T: Ord>(sequence: &mut [T]) {
    let n = sequence.len();
    for i in 0..n {
        let mut minimum = i;
        for j in i + 1..n {
            if sequence[minimum] > sequence[j] {
                minimum = j;
            }
        }
        sequence.swap(i, minimum);
    }
}

/*
 * Sort <sequence> in place with merge sort.
 */
pub fn merge_sort<T: Ord + Copy>(sequence: &mut [T]) {
    let bump = Bump::new();
    let src: &[T] = bump.alloc_slice_copy(sequence);
    merge_sort_into(sequence, src);
}

/*
 * Merge sort <src> into <dst>.
 *
 * Panics if <dst> and <src> differ in length, like copy_from_slice.
 *
 * Each frame splits at n/2, sorts both halves into scratch buffers taken
 * from its own arena, then merges them into <dst>. The arena is dropped
 * when the frame returns, releasing both halves.
 */
pub fn merge_sort_into<T: Ord + Copy>(dst: &mut [T], src: &[T]) {
    assert_eq!(
        dst.len(),
        src.len(),
        "destination and source lengths differ"
    );

    match src.len() {
        0 => return,
        1 => {
            dst[0] = src[0];
            return;
        }
        _ => {}
    }

    let middle = src.len() / 2;
    let (src_left, src_right) = src.split_at(middle);

    let bump = Bump::with_capacity(std::mem::size_of_val(src));
    let left = bump.alloc_slice_copy(src_left);
    let right = bump.alloc_slice_copy(src_right);

    merge_sort_into(left, src_left);
    merge_sort_into(right, src_right);
    merge(dst, left, right);
}

/*
 * Merge two sorted runs. On ties the right element goes first.
 */
fn merge<T: Ord + Copy>(dst: &mut [T], left: &[T], right: &[T]) {
    let (mut l, mut r, mut i) = (0, 0, 0);

    while l < left.len() && r < right.len() {
        if left[l] >= right[r] {
            dst[i] = right[r];
            r += 1;
        } else {
            dst[i] = left[l];
            l += 1;
        }
        i += 1;
    }

    // At most one of these is non-empty
    let rest = if l < left.len() { &left[l..] } else { &right[r..] };
    dst[i..].copy_from_slice(rest);
}

/*
 * Partition-exchange sort with the last element as pivot.
 * Recurses into the smaller partition and loops on the larger one, so the
 * stack stays O(log n) even on already sorted input.
 */
pub fn quick_sort<T: Ord>(mut sequence: &mut [T]) {
    while sequence.len() > 1 {
        let pivot = partition(sequence);
        let (left, rest) = std::mem::take(&mut sequence).split_at_mut(pivot);
        let right = &mut rest[1..];
        if left.len() < right.len() {
            quick_sort(left);
            sequence = right;
        } else {
            quick_sort(right);
            sequence = left;
        }
    }
}

/*
 * Lomuto partition: everything <= pivot ends up before it.
 * Returns the final pivot index.
 */
fn partition<T: Ord>(sequence: &mut [T]) -> usize {
    let last = sequence.len() - 1;
    let mut store = 0;
    for j in 0..last {
        if sequence[j] <= sequence[last] {
            sequence.swap(store, j);
            store += 1;
        }
    }
    sequence.swap(store, last);
    store
}

/*
 * Build a max-heap, then repeatedly move the root behind the shrinking heap.
 */
pub fn heap_sort<T: Ord>(sequence: &mut [T]) {
    let n = sequence.len();
    for i in (0..n / 2).rev() {
        sift_down(sequence, i, n);
    }
    for end in (1..n).rev() {
        sequence.swap(0, end);
        sift_down(sequence, 0, end);
    }
}

fn sift_down<T: Ord>(heap: &mut [T], mut index: usize, heap_size: usize) {
    loop {
        let left = 2 * index + 1;
        let right = left + 1;
        let mut largest = index;

        if left < heap_size && heap[largest] < heap[left] {
            largest = left;
        }
        if right < heap_size && heap[largest] < heap[right] {
            largest = right;
        }
        if largest == index {
            return;
        }
        heap.swap(index, largest);
        index = largest;
    }
}
