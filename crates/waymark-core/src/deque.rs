//! The [`Deque`] type — a doubly-linked double-ended queue.
//!
//! Nodes live in an index arena rather than behind raw pointers. Each slot
//! records the index of its neighbours, and released slots are threaded onto
//! an intrusive free list so popping never allocates. Pushing reserves
//! storage with `try_reserve`, so running out of memory is reported as an
//! [`AllocError`] instead of aborting.
//!
//! Every push hands back a [`NodeHandle`]. Handles carry the generation of
//! the slot they were issued for, so a handle to a popped node never
//! resolves to a newer element that reused the slot.

use std::fmt;
use std::iter::FusedIterator;

const NIL: usize = usize::MAX;

/// Node storage could not be reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("deque: could not reserve storage for another node")]
pub struct AllocError;

/// Handle to a node returned by [`Deque::push_front`] / [`Deque::push_back`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    slot: usize,
    generation: u32,
}

#[derive(Clone)]
struct Node<T> {
    elem: Option<T>,
    prev: usize,
    next: usize,
    generation: u32,
}

/// A double-ended queue with O(1) push and pop at both ends.
///
/// `front` and `back` are both unset iff the queue is empty, and for every
/// linked node the `prev` of its successor is the node itself.
#[derive(Clone)]
pub struct Deque<T> {
    nodes: Vec<Node<T>>,
    free_head: usize,
    front: usize,
    back: usize,
    len: usize,
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deque<T> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free_head: NIL,
            front: NIL,
            back: NIL,
            len: 0,
        }
    }

    /// Create an empty queue able to hold `capacity` nodes before growing.
    pub fn with_capacity(capacity: usize) -> Result<Self, AllocError> {
        let mut nodes = Vec::new();
        nodes.try_reserve(capacity).map_err(|_| AllocError)?;
        Ok(Self {
            nodes,
            ..Self::new()
        })
    }

    /// Number of elements in the queue.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `elem` before the current front.
    pub fn push_front(&mut self, elem: T) -> Result<NodeHandle, AllocError> {
        let slot = self.alloc(elem)?;
        self.nodes[slot].next = self.front;
        if self.front == NIL {
            self.back = slot;
        } else {
            self.nodes[self.front].prev = slot;
        }
        self.front = slot;
        self.len += 1;
        Ok(self.handle(slot))
    }

    /// Insert `elem` after the current back.
    pub fn push_back(&mut self, elem: T) -> Result<NodeHandle, AllocError> {
        let slot = self.alloc(elem)?;
        self.nodes[slot].prev = self.back;
        if self.back == NIL {
            self.front = slot;
        } else {
            self.nodes[self.back].next = slot;
        }
        self.back = slot;
        self.len += 1;
        Ok(self.handle(slot))
    }

    /// Remove and return the frontmost element.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.front == NIL {
            return None;
        }
        let slot = self.front;
        let next = self.nodes[slot].next;
        if next == NIL {
            self.back = NIL;
        } else {
            self.nodes[next].prev = NIL;
        }
        self.front = next;
        self.len -= 1;
        self.release(slot)
    }

    /// Remove and return the backmost element.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.back == NIL {
            return None;
        }
        let slot = self.back;
        let prev = self.nodes[slot].prev;
        if prev == NIL {
            self.front = NIL;
        } else {
            self.nodes[prev].next = NIL;
        }
        self.back = prev;
        self.len -= 1;
        self.release(slot)
    }

    pub fn front(&self) -> Option<&T> {
        self.elem(self.front)
    }

    pub fn back(&self) -> Option<&T> {
        self.elem(self.back)
    }

    /// Resolve a handle. Returns `None` once the node has been popped.
    pub fn get(&self, handle: NodeHandle) -> Option<&T> {
        let node = self.nodes.get(handle.slot)?;
        if node.generation != handle.generation {
            return None;
        }
        node.elem.as_ref()
    }

    /// Drop every element, keeping the node storage for reuse.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Append every item of `iter` at the back, stopping at the first
    /// allocation failure.
    pub fn try_extend_back<I: IntoIterator<Item = T>>(&mut self, iter: I) -> Result<(), AllocError> {
        for elem in iter {
            self.push_back(elem)?;
        }
        Ok(())
    }

    /// Front-to-back iterator over the elements.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            deque: self,
            head: self.front,
            tail: self.back,
            remaining: self.len,
        }
    }

    /// Copy the elements into a `Vec`, front first.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    // -----------------------------------------------------------------------
    // Arena helpers
    // -----------------------------------------------------------------------

    fn alloc(&mut self, elem: T) -> Result<usize, AllocError> {
        if self.free_head != NIL {
            let slot = self.free_head;
            let node = &mut self.nodes[slot];
            self.free_head = node.next;
            node.elem = Some(elem);
            node.prev = NIL;
            node.next = NIL;
            return Ok(slot);
        }
        self.nodes.try_reserve(1).map_err(|_| AllocError)?;
        self.nodes.push(Node {
            elem: Some(elem),
            prev: NIL,
            next: NIL,
            generation: 0,
        });
        Ok(self.nodes.len() - 1)
    }

    fn release(&mut self, slot: usize) -> Option<T> {
        let node = &mut self.nodes[slot];
        let elem = node.elem.take();
        node.generation = node.generation.wrapping_add(1);
        node.prev = NIL;
        node.next = self.free_head;
        self.free_head = slot;
        elem
    }

    #[inline]
    fn handle(&self, slot: usize) -> NodeHandle {
        NodeHandle {
            slot,
            generation: self.nodes[slot].generation,
        }
    }

    #[inline]
    fn elem(&self, slot: usize) -> Option<&T> {
        if slot == NIL {
            return None;
        }
        self.nodes[slot].elem.as_ref()
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Deque<T> {}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Borrowing iterator returned by [`Deque::iter`].
pub struct Iter<'a, T> {
    deque: &'a Deque<T>,
    head: usize,
    tail: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let deque = self.deque;
        let node = &deque.nodes[self.head];
        self.head = node.next;
        self.remaining -= 1;
        node.elem.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let deque = self.deque;
        let node = &deque.nodes[self.tail];
        self.tail = node.prev;
        self.remaining -= 1;
        node.elem.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Owning iterator; drains the queue from the front.
pub struct IntoIter<T> {
    deque: Deque<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.deque.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.deque.len, Some(self.deque.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.deque.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { deque: self }
    }
}

// ---------------------------------------------------------------------------
// Serde (sequence form, front first)
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Deque<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Deque<T> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        let mut deque = Deque::new();
        deque
            .try_extend_back(items)
            .map_err(<D::Error as serde::de::Error>::custom)?;
        Ok(deque)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl<T> Deque<T> {
        /// Walk the links both ways and check they agree with `len`.
        fn assert_links(&self) {
            assert_eq!(self.front == NIL, self.back == NIL);
            assert_eq!(self.front == NIL, self.len == 0);

            let mut count = 0;
            let mut prev = NIL;
            let mut cur = self.front;
            while cur != NIL {
                assert_eq!(self.nodes[cur].prev, prev, "broken prev link at {cur}");
                assert!(self.nodes[cur].elem.is_some());
                prev = cur;
                cur = self.nodes[cur].next;
                count += 1;
            }
            assert_eq!(prev, self.back);
            assert_eq!(count, self.len);
        }
    }

    #[test]
    fn new_is_empty() {
        let q = Deque::<i32>::new();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert_eq!(q.front(), None);
        assert_eq!(q.back(), None);
        q.assert_links();
    }

    #[test]
    fn push_back_pop_front_is_fifo() {
        let mut q = Deque::new();
        q.push_back("a").unwrap();
        q.push_back("b").unwrap();
        q.push_back("c").unwrap();
        q.assert_links();

        assert_eq!(q.pop_front(), Some("a"));
        assert_eq!(q.pop_front(), Some("b"));
        assert_eq!(q.pop_front(), Some("c"));
        assert_eq!(q.pop_front(), None);
        q.assert_links();
    }

    #[test]
    fn push_front_reverses() {
        let mut q = Deque::new();
        for i in 0..4 {
            q.push_front(i).unwrap();
        }
        q.assert_links();
        assert_eq!(q.to_vec(), vec![3, 2, 1, 0]);
        assert_eq!(q.front(), Some(&3));
        assert_eq!(q.back(), Some(&0));
    }

    #[test]
    fn mixed_ends() {
        let mut q = Deque::new();
        q.push_back(2).unwrap();
        q.push_front(1).unwrap();
        q.push_back(3).unwrap();
        q.push_front(0).unwrap();
        q.assert_links();
        assert_eq!(q.to_vec(), vec![0, 1, 2, 3]);

        assert_eq!(q.pop_back(), Some(3));
        assert_eq!(q.pop_front(), Some(0));
        q.assert_links();
        assert_eq!(q.to_vec(), vec![1, 2]);

        assert_eq!(q.pop_back(), Some(2));
        assert_eq!(q.pop_back(), Some(1));
        assert_eq!(q.pop_back(), None);
        q.assert_links();
    }

    #[test]
    fn popped_slots_are_reused() {
        let mut q = Deque::new();
        for i in 0..8 {
            q.push_back(i).unwrap();
        }
        while q.pop_front().is_some() {}
        for i in 0..8 {
            q.push_front(i).unwrap();
        }
        assert_eq!(q.nodes.len(), 8);
        q.assert_links();
    }

    #[test]
    fn stale_handle_does_not_alias() {
        let mut q = Deque::new();
        let a = q.push_back("a").unwrap();
        assert_eq!(q.get(a), Some(&"a"));

        assert_eq!(q.pop_front(), Some("a"));
        assert_eq!(q.get(a), None);

        // Reuses the same slot with a bumped generation.
        let b = q.push_back("b").unwrap();
        assert_eq!(q.get(a), None);
        assert_eq!(q.get(b), Some(&"b"));
    }

    #[test]
    fn iter_both_directions() {
        let mut q = Deque::new();
        q.try_extend_back(1..=5).unwrap();
        let fwd: Vec<_> = q.iter().copied().collect();
        let rev: Vec<_> = q.iter().rev().copied().collect();
        assert_eq!(fwd, vec![1, 2, 3, 4, 5]);
        assert_eq!(rev, vec![5, 4, 3, 2, 1]);
        assert_eq!(q.iter().len(), 5);
    }

    #[test]
    fn into_iter_drains_front_first() {
        let mut q = Deque::new();
        q.try_extend_back(["x".to_string(), "y".to_string()]).unwrap();
        let out: Vec<String> = q.into_iter().collect();
        assert_eq!(out, vec!["x", "y"]);
    }

    #[test]
    fn clear_keeps_storage() {
        let mut q = Deque::with_capacity(4).unwrap();
        q.try_extend_back([1, 2, 3]).unwrap();
        q.clear();
        assert!(q.is_empty());
        q.assert_links();
        q.push_back(9).unwrap();
        assert_eq!(q.to_vec(), vec![9]);
    }

    #[test]
    fn equality_ignores_slot_layout() {
        let mut a = Deque::new();
        a.try_extend_back([1, 2, 3]).unwrap();

        let mut b = Deque::new();
        b.push_back(0).unwrap();
        b.push_back(3).unwrap();
        b.pop_front();
        b.push_front(2).unwrap();
        b.push_front(1).unwrap();

        assert_eq!(a, b);
        assert_eq!(format!("{a:?}"), "[1, 2, 3]");
    }
}
