/*!
A heap on some subset of elements with fixed indicies.

In other words, a heap backed by a vector with a companion vector which tracks the current location of the initial index of a heap element in the heap.
As each element knows where it sits, removal by identity is a direct lookup followed by a sift, rather than a search.

Further, the backing vector of values stays constant, allowing the heap to act as a store of elements which may be moved onto (and off) the heap.
For example, [IndexHeap] is used as a store of [variable](crate::structures::variable) scores, as variables are associated with an index and it is a useful heuristic to choose an unvalued variable with the highest score when a decision is required.

# Quick mutations

Backjumping releases many variables at once, and restoring heap order after each release is wasted work.
So, alongside the ordered operations, [quick_activate](IndexHeap::quick_activate) and [quick_remove](IndexHeap::quick_remove) edit the structure in constant time and leave the heap *inconsistent*.

While the heap is inconsistent:
- [activate](IndexHeap::activate) and [remove](IndexHeap::remove) also take the quick path.
- [peek_max](IndexHeap::peek_max) and [pop_max](IndexHeap::pop_max) first [heapify](IndexHeap::heapify), restoring the heap property.

```rust
# use prover_sat::generic::index_heap::IndexHeap;
let mut test_heap = IndexHeap::default();

test_heap.add(600, 10);
test_heap.add(0, 70);

test_heap.activate(600);
test_heap.activate(0);

assert_eq!(test_heap.count(), 601);
assert_eq!(test_heap.value_at(5), &i32::default());

assert_eq!(test_heap.pop_max(), Some(0));
assert_eq!(test_heap.pop_max(), Some(600));

assert!(test_heap.pop_max().is_none());
```
*/

use std::cmp::Ordering;

/// The index heap struct.
pub struct IndexHeap<V: PartialOrd + Default> {
    values: Vec<V>,
    position_in_heap: Vec<Option<usize>>,
    heap: Vec<usize>,
    consistent: bool,
}

impl<V: PartialOrd + Default> Default for IndexHeap<V> {
    fn default() -> Self {
        IndexHeap {
            values: Vec::default(),
            position_in_heap: Vec::default(),
            heap: Vec::default(),
            consistent: true,
        }
    }
}

impl<V: PartialOrd + Default> IndexHeap<V> {
    /// Index `value` with `value_index`.
    /// Returns true if `value_index` was a fresh index, false otherwise.
    /// To *activate* `value_index` on the heap [activate](IndexHeap::activate) should be called after this method.
    ///
    /// Note, the method grows the structure to the size required for `value_index` to be a (transparent) index.
    pub fn add(&mut self, value_index: usize, value: V) -> bool {
        if self.values.len() <= value_index {
            self.values.resize_with(value_index + 1, V::default);
            self.position_in_heap.resize(value_index + 1, None);
            self.values[value_index] = value;
            true
        } else {
            self.revalue(value_index, value);
            false
        }
    }

    /// Activate the value at `value_index` on the heap.
    /// Returns true if the value was not already on the heap.
    ///
    /// If the heap is inconsistent the quick path is taken.
    pub fn activate(&mut self, value_index: usize) -> bool {
        if !self.consistent {
            return self.quick_activate(value_index);
        }

        match self.heap_index(value_index) {
            None => {
                let heap_index = self.heap.len();
                self.heap.push(value_index);
                self.position_in_heap[value_index] = Some(heap_index);
                self.heapify_up(heap_index);
                true
            }

            Some(heap_index) => {
                self.heapify_up(heap_index);
                self.heapify_down(heap_index);
                false
            }
        }
    }

    /// Place `value_index` at the end of the heap, without restoring the heap property.
    ///
    /// Marks the heap inconsistent if an element was added.
    pub fn quick_activate(&mut self, value_index: usize) -> bool {
        match self.heap_index(value_index) {
            None => {
                self.position_in_heap[value_index] = Some(self.heap.len());
                self.heap.push(value_index);
                self.consistent = false;
                true
            }
            Some(_) => false,
        }
    }

    /// Remove `value_index` from the heap, if present.
    /// Returns true if `value_index` was removed, false otherwise.
    ///
    /// If the heap is inconsistent the quick path is taken.
    pub fn remove(&mut self, value_index: usize) -> bool {
        if !self.consistent {
            return self.quick_remove(value_index);
        }

        match self.take_from_heap(value_index) {
            Some(heap_index) => {
                if heap_index < self.heap.len() {
                    self.heapify_up(heap_index);
                    self.heapify_down(heap_index);
                }
                true
            }
            None => false,
        }
    }

    /// Remove `value_index` from the heap, if present, by moving the last element of the heap into its place.
    ///
    /// Marks the heap inconsistent if an element was removed.
    pub fn quick_remove(&mut self, value_index: usize) -> bool {
        match self.take_from_heap(value_index) {
            Some(_) => {
                self.consistent = false;
                true
            }
            None => false,
        }
    }

    /// Heapify (ensure invariants of the heap are upheld) if `value_index` is active and the heap is consistent.
    ///
    /// An inconsistent heap is left for the next [heapify](IndexHeap::heapify).
    pub fn heapify_if_active(&mut self, value_index: usize) {
        if !self.consistent {
            return;
        }
        if let Some(heap_index) = self.heap_index(value_index) {
            self.heapify_down(heap_index);
            self.heapify_up(heap_index);
        }
    }

    /// Peek at the maximum index of the heap, restoring the heap property first if required.
    pub fn peek_max(&mut self) -> Option<usize> {
        if !self.consistent {
            self.heapify();
        }
        self.heap.first().copied()
    }

    /// Pop the maximum index off the heap, restoring the heap property first if required.
    pub fn pop_max(&mut self) -> Option<usize> {
        let max_value_index = self.peek_max()?;
        self.remove(max_value_index);
        Some(max_value_index)
    }

    /// Heapify (ensure invariants of the heap are upheld) the heap.
    pub fn heapify(&mut self) {
        for heap_index in (0..self.heap.len() / 2).rev() {
            self.heapify_down(heap_index)
        }
        self.consistent = true;
    }

    /// True if the heap property holds, or will hold after some quick mutation is followed by [heapify](IndexHeap::heapify).
    pub fn is_consistent(&self) -> bool {
        self.consistent
    }

    /// True if `value_index` is on the heap.
    pub fn is_active(&self, value_index: usize) -> bool {
        self.heap_index(value_index).is_some()
    }

    /// Return the value indexed by `value_index`.
    pub fn value_at(&self, value_index: usize) -> &V {
        &self.values[value_index]
    }

    /// Apply `f` to the value at `value_index`.
    pub fn apply_to_value_at_value_index(&mut self, value_index: usize, f: impl Fn(&V) -> V) {
        self.values[value_index] = f(&self.values[value_index])
    }

    /// Apply `f` to all (indexed) values.
    ///
    /// As the order of values may change, the heap is marked inconsistent.
    pub fn apply_to_all(&mut self, f: impl Fn(&V) -> V) {
        for value in self.values.iter_mut() {
            *value = f(value)
        }
        self.consistent = false;
    }

    /// Set the value of `value_index` to `value`.
    pub fn revalue(&mut self, value_index: usize, value: V) {
        self.values[value_index] = value
    }

    /// A count of values indexed by the structure.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// A count of values active on the heap.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True if no value is active on the heap, false otherwise.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Removes every value with an index at or above `bound` from the structure.
    pub fn truncate(&mut self, bound: usize) {
        for value_index in bound..self.values.len() {
            self.quick_remove(value_index);
        }
        self.values.truncate(bound);
        self.position_in_heap.truncate(bound);
    }
}

impl<V: PartialOrd + Default> IndexHeap<V> {
    /// Where `value_index` is stored on the heap, if present.
    fn heap_index(&self, value_index: usize) -> Option<usize> {
        self.position_in_heap.get(value_index).copied().flatten()
    }

    /// Swaps the last element of the heap into the position of `value_index` and drops `value_index` from the heap.
    /// Returns the position `value_index` held, if any.
    fn take_from_heap(&mut self, value_index: usize) -> Option<usize> {
        let heap_index = self.heap_index(value_index)?;
        let last = self.heap.len() - 1;

        if heap_index != last {
            let moved = self.heap[last];
            self.heap.swap(heap_index, last);
            self.position_in_heap[moved] = Some(heap_index);
        }

        self.heap.pop();
        self.position_in_heap[value_index] = None;
        Some(heap_index)
    }

    /// The (heap) index of the left child of `heap_index`.
    fn heap_left(heap_index: usize) -> usize {
        (2 * heap_index) + 1
    }

    /// The (heap) index of the right child of `heap_index`.
    fn heap_right(heap_index: usize) -> usize {
        (2 * heap_index) + 2
    }

    /// The (heap) index of the parent of `heap_index`.
    fn heap_parent(heap_index: usize) -> usize {
        heap_index.saturating_sub(1) / 2
    }

    /// Swaps two positions of the heap, keeping the companion positions in sync.
    fn swap_positions(&mut self, a: usize, b: usize) {
        let (value_a, value_b) = (self.heap[a], self.heap[b]);
        self.position_in_heap.swap(value_a, value_b);
        self.heap.swap(a, b);
    }

    /// Shuffles the index down into the heap, if required.
    ///
    /// For any trio of an index, the left child of the index, and the right child, the largest of the three is identified and, if this is not the index, the index is swapped with the largest child.
    fn heapify_down(&mut self, mut heap_index: usize) {
        let limit = self.heap.len();

        loop {
            let left_index = Self::heap_left(heap_index);
            if left_index >= limit {
                break;
            }

            let mut update_index = heap_index;

            if self.values[self.heap[left_index]] > self.values[self.heap[update_index]] {
                update_index = left_index;
            }

            let right_index = Self::heap_right(heap_index);
            if right_index < limit
                && self.values[self.heap[right_index]] > self.values[self.heap[update_index]]
            {
                update_index = right_index;
            }

            if update_index == heap_index {
                break;
            }

            self.swap_positions(heap_index, update_index);
            heap_index = update_index;
        }
    }

    /// Shuffles the index up from the heap, if required.
    ///
    /// Swaps the index with it's parent in the heap, if the parent is smaller.
    fn heapify_up(&mut self, mut heap_index: usize) {
        while heap_index != 0 {
            let parent_heap = Self::heap_parent(heap_index);

            let index_value = &self.values[self.heap[heap_index]];
            let parent_value = &self.values[self.heap[parent_heap]];

            match parent_value.partial_cmp(index_value) {
                Some(Ordering::Less) => {
                    self.swap_positions(heap_index, parent_heap);
                    heap_index = parent_heap;
                }
                _ => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_heap(heap: &IndexHeap<i32>) {
        for (heap_index, value_index) in heap.heap.iter().enumerate() {
            assert_eq!(heap.position_in_heap[*value_index], Some(heap_index));
            if heap_index > 0 {
                let parent = heap.heap[IndexHeap::<i32>::heap_parent(heap_index)];
                assert!(heap.values[parent] >= heap.values[*value_index]);
            }
        }
    }

    #[test]
    fn heap_simple() {
        let mut test_heap = IndexHeap::default();
        test_heap.add(6, 10);
        test_heap.add(5, 20);
        test_heap.add(4, 30);
        test_heap.add(1, 60);
        test_heap.add(0, 70);
        test_heap.activate(6);
        test_heap.activate(5);
        test_heap.activate(4);
        test_heap.activate(1);
        test_heap.activate(0);

        assert_eq!(test_heap.pop_max(), Some(0));
        assert_eq!(test_heap.pop_max(), Some(1));
        assert_eq!(test_heap.pop_max(), Some(4));
        assert_eq!(test_heap.pop_max(), Some(5));
        assert_eq!(test_heap.pop_max(), Some(6));
    }

    #[test]
    fn heap_update() {
        let mut test_heap = IndexHeap::default();
        test_heap.add(6, 10);
        test_heap.add(4, 30);
        test_heap.add(1, 60);
        test_heap.add(0, 70);
        test_heap.activate(6);
        test_heap.activate(4);
        test_heap.activate(1);
        test_heap.activate(0);

        test_heap.values[0] = 0;
        test_heap.values[1] = 1;
        test_heap.values[4] = 4;
        test_heap.values[6] = 6;

        test_heap.heapify();

        assert_eq!(test_heap.pop_max(), Some(6));
        assert_eq!(test_heap.pop_max(), Some(4));
        assert_eq!(test_heap.pop_max(), Some(1));
        assert_eq!(test_heap.pop_max(), Some(0));
        assert!(test_heap.pop_max().is_none());
    }

    #[test]
    fn heap_sparse() {
        let mut test_heap = IndexHeap::default();
        test_heap.add(600, 10);
        test_heap.add(0, 70);
        test_heap.activate(600);
        test_heap.activate(0);

        assert_eq!(test_heap.values.len(), 601);
        assert_eq!(test_heap.values[5], i32::default());
        assert_eq!(test_heap.pop_max(), Some(0));
        assert_eq!(test_heap.pop_max(), Some(600));
        assert!(test_heap.pop_max().is_none());
    }

    #[test]
    fn heap_remove() {
        let mut test_heap = IndexHeap::default();
        test_heap.add(6, 6);
        test_heap.add(5, 5);
        test_heap.add(4, 4);
        test_heap.add(1, 1);
        test_heap.add(0, 0);
        test_heap.activate(6);
        test_heap.activate(5);
        test_heap.activate(4);
        test_heap.activate(1);
        test_heap.activate(0);

        assert!(test_heap.remove(4));
        assert!(!test_heap.remove(4));
        assert!(test_heap.remove(6));
        assert!(!test_heap.add(4, 10));
        assert!(!test_heap.add(4, 1));
        test_heap.activate(4);

        assert_eq!(test_heap.pop_max(), Some(5));
        assert_eq!(test_heap.pop_max(), Some(1));
        assert_eq!(test_heap.pop_max(), Some(4));
        assert_eq!(test_heap.pop_max(), Some(0));
    }

    #[test]
    fn heap_quick() {
        let mut test_heap = IndexHeap::default();
        for index in 0..20 {
            test_heap.add(index, (index as i32 * 7) % 13);
            test_heap.activate(index);
        }
        check_heap(&test_heap);

        for index in (0..20).step_by(3) {
            assert!(test_heap.quick_remove(index));
        }
        assert!(!test_heap.is_consistent());

        // Ordered operations take the quick path while inconsistent.
        assert!(test_heap.remove(1));
        assert!(test_heap.activate(0));
        assert!(test_heap.quick_activate(3));
        assert!(!test_heap.is_consistent());

        let max = test_heap.peek_max();
        assert!(test_heap.is_consistent());
        check_heap(&test_heap);

        let mut previous = max.map(|index| *test_heap.value_at(index));
        while let Some(index) = test_heap.pop_max() {
            let value = *test_heap.value_at(index);
            assert!(previous.is_some_and(|p| p >= value));
            previous = Some(value);
        }
    }

    #[test]
    fn heap_truncate() {
        let mut test_heap = IndexHeap::default();
        for index in 0..10 {
            test_heap.add(index, index as i32);
            test_heap.activate(index);
        }

        test_heap.truncate(4);
        assert_eq!(test_heap.count(), 4);
        assert_eq!(test_heap.len(), 4);

        assert_eq!(test_heap.pop_max(), Some(3));
        assert_eq!(test_heap.pop_max(), Some(2));
    }
}
