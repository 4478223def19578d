//! Doubly linked list over a slab of slots.
//!
//! Nodes live in a `Vec` and link to each other by index, so the list needs no
//! raw pointers and no `unsafe`. Removed slots are threaded onto a free chain
//! and reused by later pushes, which keeps the allocation stable for caches
//! that insert and evict at the same rate.
//!
//! The front of the list is the oldest node, the back the newest.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

const NIL: usize = usize::MAX;

/// Handle to a node in a [`List`].
///
/// A handle stays valid until its node is removed. Using a handle after that
/// is not memory unsafe, but it may refer to a node pushed later into the
/// same slot, so owners must drop handles together with their nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeRef(usize);

struct Node<T> {
    val: T,
    prev: usize,
    next: usize,
}

enum Slot<T> {
    Vacant { next_free: usize },
    Occupied(Node<T>),
}

/// An index-linked doubly linked list.
pub(crate) struct List<T> {
    slots: Vec<Slot<T>>,
    head: usize,
    tail: usize,
    free: usize,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list.
    pub(crate) fn new() -> Self {
        List {
            slots: Vec::new(),
            head: NIL,
            tail: NIL,
            free: NIL,
            len: 0,
        }
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        List {
            slots: Vec::with_capacity(capacity),
            ..List::new()
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn node(&self, idx: usize) -> Option<&Node<T>> {
        match self.slots.get(idx) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<T>> {
        match self.slots.get_mut(idx) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Appends a value at the back (newest end) and returns its handle.
    pub(crate) fn push_back(&mut self, val: T) -> NodeRef {
        let node = Node {
            val,
            prev: self.tail,
            next: NIL,
        };

        let idx = if self.free != NIL {
            let idx = self.free;
            if let Slot::Vacant { next_free } = self.slots[idx] {
                self.free = next_free;
            }
            self.slots[idx] = Slot::Occupied(node);
            idx
        } else {
            self.slots.push(Slot::Occupied(node));
            self.slots.len() - 1
        };

        self.link_back(idx);
        self.len += 1;
        NodeRef(idx)
    }

    fn link_back(&mut self, idx: usize) {
        let tail = self.tail;
        if let Some(node) = self.node_mut(idx) {
            node.prev = tail;
            node.next = NIL;
        }
        match self.node_mut(tail) {
            Some(prev) => prev.next = idx,
            None => self.head = idx,
        }
        self.tail = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.node(idx) {
            Some(node) => (node.prev, node.next),
            None => return,
        };
        match self.node_mut(prev) {
            Some(node) => node.next = next,
            None => self.head = next,
        }
        match self.node_mut(next) {
            Some(node) => node.prev = prev,
            None => self.tail = prev,
        }
    }

    /// Removes the node behind `node` and returns its value.
    pub(crate) fn remove(&mut self, node: NodeRef) -> Option<T> {
        self.node(node.0)?;
        self.unlink(node.0);

        let vacant = Slot::Vacant {
            next_free: self.free,
        };
        self.free = node.0;
        self.len -= 1;

        match core::mem::replace(&mut self.slots[node.0], vacant) {
            Slot::Occupied(node) => Some(node.val),
            Slot::Vacant { .. } => None,
        }
    }

    /// Removes the front (oldest) node and returns its value.
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        match self.head {
            NIL => None,
            head => self.remove(NodeRef(head)),
        }
    }

    /// Moves a node to the back (newest end) of the list.
    pub(crate) fn move_to_back(&mut self, node: NodeRef) {
        if node.0 == self.tail || self.node(node.0).is_none() {
            return;
        }
        self.unlink(node.0);
        self.link_back(node.0);
    }

    pub(crate) fn get(&self, node: NodeRef) -> Option<&T> {
        self.node(node.0).map(|n| &n.val)
    }

    pub(crate) fn get_mut(&mut self, node: NodeRef) -> Option<&mut T> {
        self.node_mut(node.0).map(|n| &mut n.val)
    }

    /// Returns the handle of the front (oldest) node.
    pub(crate) fn front(&self) -> Option<NodeRef> {
        match self.head {
            NIL => None,
            head => Some(NodeRef(head)),
        }
    }

    /// Returns the handle of the node at `index`, counted from the front.
    ///
    /// Walks the list, so this is O(index).
    pub(crate) fn nth(&self, index: usize) -> Option<NodeRef> {
        if index >= self.len {
            return None;
        }
        let mut idx = self.head;
        for _ in 0..index {
            idx = self.node(idx)?.next;
        }
        Some(NodeRef(idx))
    }

    /// Removes every node, keeping the allocation.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.head = NIL;
        self.tail = NIL;
        self.free = NIL;
        self.len = 0;
    }

    /// Iterates values from the front (oldest) to the back (newest).
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        List::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub(crate) struct Iter<'a, T> {
    list: &'a List<T>,
    next: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.list.node(self.next)?;
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.val)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
