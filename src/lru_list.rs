//! Fixed-Capacity Recency List
//!
//! An ordered sequence without key lookup. Elements are appended at the back;
//! reading an element by position moves it to the back, so the front always
//! holds the element that has gone unread the longest. When an append pushes
//! the list over its capacity, the front element is dropped.
//!
//! ```text
//! add(a) add(b) add(c)      [a, b, c]
//! get(0)          → a       [b, c, a]
//! add(d), cap = 3 → drops b [c, a, d]
//! ```
//!
//! Positional access walks the list, so `get`, `peek` and `remove` are O(index);
//! `add` is O(1).

use crate::list::List;
use core::fmt;
use core::num::NonZeroUsize;

/// A fixed-capacity list with exact least-recently-used eviction.
///
/// # Examples
///
/// ```
/// use gencache::LruList;
/// use core::num::NonZeroUsize;
///
/// let mut list = LruList::new(NonZeroUsize::new(3).unwrap());
/// list.add("a");
/// list.add("b");
/// list.add("c");
///
/// assert_eq!(list.get(0), Some(&"a"));
/// assert_eq!(list.add("d"), Some("b"));
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["c", "a", "d"]);
/// ```
pub struct LruList<T> {
    cap: NonZeroUsize,
    list: List<T>,
}

impl<T> LruList<T> {
    /// Creates an empty list holding at most `cap` elements.
    pub fn new(cap: NonZeroUsize) -> Self {
        LruList {
            cap,
            list: List::with_capacity(cap.get()),
        }
    }

    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.cap
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Appends an element at the back.
    ///
    /// Returns the front element if the append exceeded the capacity.
    pub fn add(&mut self, value: T) -> Option<T> {
        self.list.push_back(value);
        if self.list.len() > self.cap.get() {
            self.list.pop_front()
        } else {
            None
        }
    }

    /// Returns the element at `index` and moves it to the back.
    ///
    /// Calling `get(0)` repeatedly rotates the whole list.
    pub fn get(&mut self, index: usize) -> Option<&T> {
        let node = self.list.nth(index)?;
        self.list.move_to_back(node);
        self.list.get(node)
    }

    /// Returns the element at `index` without changing the order.
    pub fn peek(&self, index: usize) -> Option<&T> {
        self.list.nth(index).and_then(|node| self.list.get(node))
    }

    /// Removes and returns the element at `index`.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        let node = self.list.nth(index)?;
        self.list.remove(node)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Iterates from the front (least recently used) to the back.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.list.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for LruList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruList")
            .field("cap", &self.cap)
            .field("items", &self.list)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;

    fn make_list<T>(cap: usize) -> LruList<T> {
        LruList::new(NonZeroUsize::new(cap).unwrap())
    }

    fn contents<T: Clone>(list: &LruList<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn test_add_within_capacity() {
        let mut list = make_list(3);
        assert_eq!(list.add(1), None);
        assert_eq!(list.add(2), None);
        assert_eq!(list.add(3), None);
        assert_eq!(list.len(), 3);
        assert_eq!(list.cap().get(), 3);
        assert_eq!(contents(&list), [1, 2, 3]);
    }

    #[test]
    fn test_add_drops_front() {
        let mut list = make_list(2);
        list.add(1);
        list.add(2);
        assert_eq!(list.add(3), Some(1));
        assert_eq!(list.add(4), Some(2));
        assert_eq!(list.len(), 2);
        assert_eq!(contents(&list), [3, 4]);
    }

    #[test]
    fn test_get_moves_to_back() {
        let mut list = make_list(3);
        list.add("a");
        list.add("b");
        list.add("c");

        assert_eq!(list.get(1), Some(&"b"));
        assert_eq!(contents(&list), ["a", "c", "b"]);

        assert_eq!(list.add("d"), Some("a"));
        assert_eq!(contents(&list), ["c", "b", "d"]);
    }

    #[test]
    fn test_get_zero_rotates() {
        let mut list = make_list(4);
        for i in 0..4 {
            list.add(i);
        }
        for expected in [0, 1, 2, 3, 0, 1] {
            assert_eq!(list.get(0), Some(&expected));
        }
        assert_eq!(contents(&list), [2, 3, 0, 1]);
    }

    #[test]
    fn test_peek_keeps_order() {
        let mut list = make_list(3);
        list.add(1);
        list.add(2);
        assert_eq!(list.peek(0), Some(&1));
        assert_eq!(list.peek(5), None);
        assert_eq!(contents(&list), [1, 2]);
        assert_eq!(list.add(3), None);
        assert_eq!(list.add(4), Some(1));
    }

    #[test]
    fn test_get_out_of_range() {
        let mut list: LruList<u32> = make_list(2);
        assert_eq!(list.get(0), None);
        list.add(7);
        assert_eq!(list.get(1), None);
        assert_eq!(contents(&list), [7]);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut list = make_list(3);
        list.add(String::from("x"));
        list.add(String::from("y"));
        list.add(String::from("z"));
        assert_eq!(list.remove(1), Some(String::from("y")));
        assert_eq!(list.remove(5), None);
        assert_eq!(list.len(), 2);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.add(String::from("w")), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_capacity_bound_holds() {
        let mut list = make_list(5);
        for i in 0..100 {
            list.add(i);
            let _ = list.get(i % 3);
            assert!(list.len() <= 5);
        }
        assert_eq!(list.len(), 5);
    }
}
