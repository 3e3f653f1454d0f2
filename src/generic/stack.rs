/*!
Stack-like operations on dense vectors.

Trails, watch lists, and literal buffers are plain vectors.
Though, a handful of operations are used throughout and are collected in the [Stack] trait.

In particular, deletion from the middle of a vector is done by swapping the last element into the gap.
This is *not* order preserving.
*/

/// Stack operations on a dense vector.
pub trait Stack<T> {
    /// Shrinks the stack to `bound` elements, if longer.
    fn shrink_to_bound(&mut self, bound: usize);

    /// Removes the element at `index` by moving the last element into its place.
    fn swap_delete(&mut self, index: usize) -> Option<T>;

    /// Removes the first element equal to `item` by moving the last element into its place.
    /// Returns true if some element was removed.
    fn remove_item(&mut self, item: &T) -> bool
    where
        T: PartialEq;
}

impl<T> Stack<T> for Vec<T> {
    fn shrink_to_bound(&mut self, bound: usize) {
        if bound < self.len() {
            self.truncate(bound);
        }
    }

    fn swap_delete(&mut self, index: usize) -> Option<T> {
        match index < self.len() {
            true => Some(self.swap_remove(index)),
            false => None,
        }
    }

    fn remove_item(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        match self.iter().position(|element| element == item) {
            Some(index) => {
                self.swap_remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_deletion() {
        let mut stack = vec![1, 2, 3, 4];
        assert_eq!(stack.swap_delete(1), Some(2));
        assert_eq!(stack, vec![1, 4, 3]);
        assert_eq!(stack.swap_delete(3), None);

        assert!(stack.remove_item(&1));
        assert!(!stack.remove_item(&1));
        assert_eq!(stack, vec![3, 4]);
    }

    #[test]
    fn bounds() {
        let mut stack = vec![1, 2, 3, 4];
        stack.shrink_to_bound(6);
        assert_eq!(stack.len(), 4);
        stack.shrink_to_bound(2);
        assert_eq!(stack, vec![1, 2]);
    }
}
