use std::fmt::{self, Debug, Display};

use crate::error::{Error, Result};

/*
 * Singly linked list whose nodes live in a slot arena.
 *
 * Links are slot indices instead of pointers. A removed node's slot is
 * pushed on a free list and handed out again by the next insertion, so
 * the arena only grows to the peak length of the list.
 *
 *   get             O(index)
 *   insert_head     O(1)
 *   insert_tail     O(1)
 *   insert_between  O(index)
 *   remove          O(index)
 *   values          O(n)
 */
pub struct LinkedList<T> {
    slots: Vec<Slot<T>>,
    free: Option<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    length: usize,
}

struct Node<T> {
    value: T,
    next: Option<usize>,
}

enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        LinkedList {
            slots: Vec::new(),
            free: None,
            head: None,
            tail: None,
            length: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /*
     * Value at <index>, walking from the head.
     */
    pub fn get(&self, index: usize) -> Result<&T> {
        self.check_index(index)?;
        let id = self.walk(index);
        Ok(&self.node(id).value)
    }

    pub fn insert_head(&mut self, value: T) {
        let id = self.alloc(value, self.head);
        if self.tail.is_none() {
            self.tail = Some(id);
        }
        self.head = Some(id);
        self.length += 1;
    }

    pub fn insert_tail(&mut self, value: T) {
        let id = self.alloc(value, None);
        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.length += 1;
    }

    /*
     * Insert <value> so that it becomes the element at <index>, shifting the
     * previous occupant and everything after it one position later.
     * Index 0 inserts at the head. The index must name an existing element,
     * so the new node is never the tail: use insert_tail to append.
     */
    pub fn insert_between(&mut self, index: usize, value: T) -> Result<()> {
        self.check_index(index)?;
        if index == 0 {
            self.insert_head(value);
            return Ok(());
        }

        let prev = self.walk(index - 1);
        let id = self.alloc(value, self.node(prev).next);
        self.node_mut(prev).next = Some(id);
        self.length += 1;
        Ok(())
    }

    /*
     * Detach the node at <index> and return its value.
     */
    pub fn remove(&mut self, index: usize) -> Result<T> {
        self.check_index(index)?;

        let id = if index == 0 {
            let head = self.walk(0);
            self.head = self.node(head).next;
            if self.head.is_none() {
                self.tail = None;
            }
            head
        } else {
            let prev = self.walk(index - 1);
            let id = self.walk_from(prev, 1);
            let next = self.node(id).next;
            self.node_mut(prev).next = next;
            if self.tail == Some(id) {
                self.tail = Some(prev);
            }
            id
        };

        self.length -= 1;
        Ok(self.release(id))
    }

    /*
     * Snapshot of all values, head to tail.
     */
    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.length,
        }
    }

    /*
     * Drop every node at once and release the arena.
     */
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.head = None;
        self.tail = None;
        self.length = 0;
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.length {
            return Err(Error::out_of_range(index, self.length));
        }
        Ok(())
    }

    /*
     * Slot of the node at <index>. Callers check the index first.
     */
    fn walk(&self, index: usize) -> usize {
        match self.head {
            Some(head) => self.walk_from(head, index),
            None => unreachable!("walk on an empty list"),
        }
    }

    fn walk_from(&self, mut id: usize, steps: usize) -> usize {
        for _ in 0..steps {
            id = match self.node(id).next {
                Some(next) => next,
                None => unreachable!("walked past the tail"),
            };
        }
        id
    }

    fn node(&self, id: usize) -> &Node<T> {
        match &self.slots[id] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link to vacant slot {}", id),
        }
    }

    fn node_mut(&mut self, id: usize) -> &mut Node<T> {
        match &mut self.slots[id] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => unreachable!("link to vacant slot {}", id),
        }
    }

    fn alloc(&mut self, value: T, next: Option<usize>) -> usize {
        let node = Slot::Occupied(Node { value, next });
        match self.free {
            Some(id) => {
                self.free = match self.slots[id] {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied(_) => unreachable!("free list points at live slot {}", id),
                };
                tracing::trace!(slot = id, "reusing list slot");
                self.slots[id] = node;
                id
            }
            None => {
                self.slots.push(node);
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, id: usize) -> T {
        let vacant = Slot::Vacant {
            next_free: self.free,
        };
        self.free = Some(id);
        match std::mem::replace(&mut self.slots[id], vacant) {
            Slot::Occupied(node) => node.value,
            Slot::Vacant { .. } => unreachable!("released vacant slot {}", id),
        }
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert_tail(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

/*
 * Debug formatter : values as a list
 */
impl<T: Debug> Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/*
 * Display formatter : 1 -> 2 -> 3
 */
impl<T: Display> Display for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "[]");
        }
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?);
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    /*
     * Walk the links and check head/tail/length agree
     */
    fn assert_invariant<T>(list: &LinkedList<T>) {
        match list.length {
            0 => {
                assert!(list.head.is_none());
                assert!(list.tail.is_none());
            }
            1 => assert_eq!(list.head, list.tail),
            _ => {}
        }
        let mut reachable = 0;
        let mut last = None;
        let mut cursor = list.head;
        while let Some(id) = cursor {
            reachable += 1;
            last = Some(id);
            cursor = list.node(id).next;
        }
        assert_eq!(reachable, list.len());
        assert_eq!(last, list.tail);
    }

    fn out_of_range(index: usize, length: usize) -> Error {
        Error::OutOfRange { index, length }
    }

    #[test]
    fn new_list_is_empty() {
        let list = LinkedList::<i32>::new();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert!(list.values().is_empty());
        assert_invariant(&list);
    }

    #[test]
    fn insert_tail_then_remove_head() -> anyhow::Result<()> {
        let mut list = LinkedList::new();
        list.insert_tail(1);
        list.insert_tail(2);
        list.insert_tail(3);
        assert_eq!(list.values(), vec![1, 2, 3]);

        let removed = list.remove(0).context("removing head")?;
        assert_eq!(removed, 1);
        assert_eq!(list.values(), vec![2, 3]);
        assert_invariant(&list);
        Ok(())
    }

    #[test]
    fn get_walks_from_head() -> anyhow::Result<()> {
        let list: LinkedList<i32> = [10, 20, 30].into_iter().collect();
        assert_eq!(*list.get(0)?, 10);
        assert_eq!(*list.get(2)?, 30);
        assert_eq!(list.get(5), Err(out_of_range(5, 3)));
        Ok(())
    }

    #[test]
    fn insert_head_prepends() {
        let mut list = LinkedList::new();
        list.insert_head(3);
        assert_eq!(list.head, list.tail);
        list.insert_head(2);
        list.insert_head(1);
        assert_eq!(list.values(), vec![1, 2, 3]);
        assert_invariant(&list);
    }

    #[test]
    fn insert_between_places_value_at_index() -> anyhow::Result<()> {
        let mut list: LinkedList<i32> = [1, 2, 3].into_iter().collect();
        list.insert_between(1, 9)?;
        assert_eq!(list.values(), vec![1, 9, 2, 3]);
        list.insert_between(3, 8)?;
        assert_eq!(list.values(), vec![1, 9, 2, 8, 3]);
        assert_eq!(list.len(), 5);
        assert_invariant(&list);

        // The tail is unchanged, appending still lands after 3
        list.insert_tail(4);
        assert_eq!(list.values(), vec![1, 9, 2, 8, 3, 4]);
        Ok(())
    }

    #[test]
    fn insert_between_zero_becomes_head() -> anyhow::Result<()> {
        let mut list: LinkedList<i32> = [1, 2].into_iter().collect();
        list.insert_between(0, 0)?;
        assert_eq!(*list.get(0)?, 0);
        assert_eq!(list.values(), vec![0, 1, 2]);
        assert_invariant(&list);
        Ok(())
    }

    #[test]
    fn remove_tail_moves_tail_back() -> anyhow::Result<()> {
        let mut list: LinkedList<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(list.remove(2)?, 3);
        assert_invariant(&list);
        list.insert_tail(4);
        assert_eq!(list.values(), vec![1, 2, 4]);
        Ok(())
    }

    #[test]
    fn remove_only_node_empties_list() -> anyhow::Result<()> {
        let mut list = LinkedList::new();
        list.insert_tail(7);
        assert_eq!(list.remove(0)?, 7);
        assert!(list.is_empty());
        assert_invariant(&list);

        list.insert_tail(8);
        assert_eq!(list.values(), vec![8]);
        assert_invariant(&list);
        Ok(())
    }

    #[test]
    fn out_of_range_at_boundaries() {
        let mut list: LinkedList<i32> = [1, 2, 3].into_iter().collect();
        for index in [3, 4, 1000, usize::MAX] {
            assert_eq!(list.get(index), Err(out_of_range(index, 3)));
            assert_eq!(list.insert_between(index, 0), Err(out_of_range(index, 3)));
            assert_eq!(list.remove(index), Err(out_of_range(index, 3)));
        }
        assert_eq!(list.values(), vec![1, 2, 3]);
        assert_invariant(&list);

        let mut empty = LinkedList::<i32>::new();
        assert_eq!(empty.get(0), Err(out_of_range(0, 0)));
        assert_eq!(empty.insert_between(0, 1), Err(out_of_range(0, 0)));
        assert_eq!(empty.remove(0), Err(out_of_range(0, 0)));
    }

    #[test]
    fn removed_slots_are_reused() -> anyhow::Result<()> {
        let mut list: LinkedList<i32> = (0..4).collect();
        list.remove(1)?;
        list.remove(1)?;
        list.insert_head(-1);
        list.insert_tail(9);
        assert_eq!(list.slots.len(), 4);
        assert_eq!(list.values(), vec![-1, 0, 3, 9]);
        assert_invariant(&list);
        Ok(())
    }

    #[test]
    fn clear_tears_everything_down() {
        let mut list: LinkedList<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        list.clear();
        assert!(list.is_empty());
        assert!(list.slots.is_empty());
        assert_invariant(&list);
        list.insert_head("c".to_string());
        assert_eq!(list.values(), vec!["c".to_string()]);
    }

    #[test]
    fn formatting() {
        let list: LinkedList<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(list.to_string(), "1 -> 2 -> 3");
        assert_eq!(format!("{:?}", list), "[1, 2, 3]");
        assert_eq!(LinkedList::<i32>::new().to_string(), "[]");
    }

    #[test]
    fn iter_is_exact_size() {
        let list: LinkedList<i32> = (0..5).collect();
        let mut iter = list.iter();
        assert_eq!(iter.len(), 5);
        iter.next();
        assert_eq!(iter.len(), 4);
        assert_eq!((&list).into_iter().sum::<i32>(), 10);
    }

    #[test]
    fn random_operations_match_vec() {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut list = LinkedList::new();
        let mut model: Vec<i64> = Vec::new();

        for step in 0..2000 {
            let value = rng.gen_range(-1000..1000);
            let index = rng.gen_range(0..model.len() + 2);
            match rng.gen_range(0..4) {
                0 => {
                    list.insert_head(value);
                    model.insert(0, value);
                }
                1 => {
                    list.insert_tail(value);
                    model.push(value);
                }
                2 => {
                    let res = list.insert_between(index, value);
                    if index < model.len() {
                        assert!(res.is_ok());
                        model.insert(index, value);
                    } else {
                        assert_eq!(res, Err(out_of_range(index, model.len())));
                    }
                }
                _ => {
                    let res = list.remove(index);
                    if index < model.len() {
                        assert_eq!(res, Ok(model.remove(index)));
                    } else {
                        assert_eq!(res, Err(out_of_range(index, model.len())));
                    }
                }
            }
            assert_invariant(&list);
            assert_eq!(list.values(), model, "step {}", step);
        }
    }
}
