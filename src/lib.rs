/*
 * Classic search and sort algorithms, plus a singly linked list and a
 * binary search tree, both backed by node arenas.
 */

pub mod bst;
pub mod error;
pub mod linkedlist;
pub mod search;
pub mod sort;

pub use bst::{BinarySearchTree, NodeId};
pub use error::{Error, Result};
pub use linkedlist::LinkedList;
pub use search::binary_search;
pub use sort::{
    bubble_sort, heap_sort, insertion_sort, is_sorted, merge_sort, merge_sort_into, quick_sort,
    selection_sort,
};
