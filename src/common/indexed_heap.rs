//! Binary min-heap of vertices with an in-place *decrease-key* operation.
//!
//! [`BinaryHeap`](std::collections::BinaryHeap) cannot change the priority of
//! an element that is already queued, so algorithms relying on it push
//! duplicates and skip stale entries on pop. This heap instead keeps a
//! vertex → position index next to the heap array, which lets
//! [`decrease_priority`](IndexedMinHeap::decrease_priority) move the vertex up
//! in `O(log n)` and guarantees that every vertex is queued at most once.

use thiserror::Error;

use crate::core::id::VertexId;

/// The error encountered during an [`IndexedMinHeap`] operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("vertex {0:?} is already in the queue")]
    AlreadyQueued(VertexId),

    #[error("vertex {0:?} is not in the queue")]
    NotQueued(VertexId),

    #[error("new priority of vertex {0:?} is greater than the current one")]
    PriorityIncrease(VertexId),
}

#[derive(Debug, Clone)]
pub struct IndexedMinHeap<P> {
    heap: Vec<(VertexId, P)>,
    // Position of each vertex in `heap`, `None` when it is not queued.
    position: Vec<Option<usize>>,
}

impl<P: PartialOrd + Copy> IndexedMinHeap<P> {
    pub fn new() -> Self {
        Self::with_vertex_bound(0)
    }

    /// Creates a heap with the vertex index preallocated for vertex ids lower
    /// than `bound`.
    pub fn with_vertex_bound(bound: usize) -> Self {
        Self {
            heap: Vec::with_capacity(bound),
            position: vec![None; bound],
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn contains(&self, vertex: VertexId) -> bool {
        self.position_of(vertex).is_some()
    }

    /// Current priority of a queued vertex.
    pub fn priority(&self, vertex: VertexId) -> Option<P> {
        self.position_of(vertex).map(|i| self.heap[i].1)
    }

    /// Returns the vertex with the lowest priority without removing it.
    pub fn peek(&self) -> Option<(VertexId, P)> {
        self.heap.first().copied()
    }

    pub fn insert(&mut self, vertex: VertexId, priority: P) -> Result<(), Error> {
        if self.contains(vertex) {
            return Err(Error::AlreadyQueued(vertex));
        }

        if self.position.len() <= vertex.as_usize() {
            self.position.resize(vertex.as_usize() + 1, None);
        }

        let i = self.heap.len();
        self.heap.push((vertex, priority));
        self.position[vertex.as_usize()] = Some(i);
        self.sift_up(i);

        Ok(())
    }

    /// Removes and returns the vertex with the lowest priority.
    ///
    /// The order of vertices with equal priorities is unspecified.
    pub fn pop_min(&mut self) -> Option<(VertexId, P)> {
        if self.heap.is_empty() {
            return None;
        }

        let last = self.heap.len() - 1;
        self.swap(0, last);

        let (vertex, priority) = self.heap.pop()?;
        self.position[vertex.as_usize()] = None;

        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        Some((vertex, priority))
    }

    /// Lowers the priority of a queued vertex and restores the heap order.
    ///
    /// The new priority must not be greater than the current one. Setting an
    /// equal priority is allowed and leaves the heap unchanged.
    pub fn decrease_priority(&mut self, vertex: VertexId, priority: P) -> Result<(), Error> {
        let i = self.position_of(vertex).ok_or(Error::NotQueued(vertex))?;

        if priority > self.heap[i].1 {
            return Err(Error::PriorityIncrease(vertex));
        }

        self.heap[i].1 = priority;
        self.sift_up(i);

        Ok(())
    }

    fn position_of(&self, vertex: VertexId) -> Option<usize> {
        self.position.get(vertex.as_usize()).copied().flatten()
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;

            if self.heap[i].1 < self.heap[parent].1 {
                self.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();

        loop {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            let mut smallest = i;

            if left < len && self.heap[left].1 < self.heap[smallest].1 {
                smallest = left;
            }

            if right < len && self.heap[right].1 < self.heap[smallest].1 {
                smallest = right;
            }

            if smallest == i {
                break;
            }

            self.swap(i, smallest);
            i = smallest;
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.position[self.heap[i].0.as_usize()] = Some(i);
        self.position[self.heap[j].0.as_usize()] = Some(j);
    }
}

impl<P: PartialOrd + Copy> Default for IndexedMinHeap<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    use super::*;

    fn v(index: usize) -> VertexId {
        index.into()
    }

    fn drain<P: PartialOrd + Copy>(heap: &mut IndexedMinHeap<P>) -> Vec<(VertexId, P)> {
        std::iter::from_fn(|| heap.pop_min()).collect()
    }

    #[test]
    fn pop_in_priority_order() {
        let mut heap = IndexedMinHeap::with_vertex_bound(5);

        heap.insert(v(0), 7).unwrap();
        heap.insert(v(1), 3).unwrap();
        heap.insert(v(2), 9).unwrap();
        heap.insert(v(3), 1).unwrap();
        heap.insert(v(4), 5).unwrap();

        assert_eq!(heap.len(), 5);
        assert_eq!(heap.peek(), Some((v(3), 1)));
        assert_eq!(
            drain(&mut heap),
            vec![(v(3), 1), (v(1), 3), (v(4), 5), (v(0), 7), (v(2), 9)]
        );
        assert!(heap.is_empty());
    }

    #[test]
    fn decrease_moves_vertex_up() {
        let mut heap = IndexedMinHeap::with_vertex_bound(4);

        heap.insert(v(0), 10).unwrap();
        heap.insert(v(1), 20).unwrap();
        heap.insert(v(2), 30).unwrap();
        heap.insert(v(3), 40).unwrap();

        heap.decrease_priority(v(3), 5).unwrap();
        assert_eq!(heap.priority(v(3)), Some(5));
        assert_eq!(heap.pop_min(), Some((v(3), 5)));

        heap.decrease_priority(v(2), 15).unwrap();
        assert_eq!(drain(&mut heap), vec![(v(0), 10), (v(2), 15), (v(1), 20)]);
    }

    #[test]
    fn decrease_to_equal_priority() {
        let mut heap = IndexedMinHeap::new();

        heap.insert(v(0), 1.5).unwrap();
        heap.decrease_priority(v(0), 1.5).unwrap();

        assert_eq!(heap.pop_min(), Some((v(0), 1.5)));
    }

    #[test]
    fn errors() {
        let mut heap = IndexedMinHeap::new();

        heap.insert(v(2), 4).unwrap();

        assert_matches!(heap.insert(v(2), 1), Err(Error::AlreadyQueued(_)));
        assert_matches!(heap.decrease_priority(v(2), 6), Err(Error::PriorityIncrease(_)));
        assert_matches!(heap.decrease_priority(v(7), 1), Err(Error::NotQueued(_)));

        heap.pop_min();
        assert!(!heap.contains(v(2)));
        assert_matches!(heap.decrease_priority(v(2), 1), Err(Error::NotQueued(_)));
    }

    #[test]
    fn reinsert_after_pop() {
        let mut heap = IndexedMinHeap::new();

        heap.insert(v(0), 2).unwrap();
        assert_eq!(heap.pop_min(), Some((v(0), 2)));

        heap.insert(v(0), 1).unwrap();
        assert_eq!(heap.priority(v(0)), Some(1));
    }

    proptest! {
        #[test]
        fn proptest_heap_sorts(priorities in proptest::collection::vec(0u32..1000, 0..64), decreases in proptest::collection::vec((any::<prop::sample::Index>(), 0u32..1000), 0..32)) {
            let mut heap = IndexedMinHeap::with_vertex_bound(priorities.len());
            let mut expected = priorities.clone();

            for (i, p) in priorities.iter().enumerate() {
                heap.insert(v(i), *p).unwrap();
            }

            if !priorities.is_empty() {
                for (index, p) in decreases {
                    let i = index.index(priorities.len());
                    if p <= expected[i] {
                        heap.decrease_priority(v(i), p).unwrap();
                        expected[i] = p;
                    }
                }
            }

            let popped = drain(&mut heap);
            prop_assert_eq!(popped.len(), expected.len());

            for pair in popped.windows(2) {
                prop_assert!(pair[0].1 <= pair[1].1);
            }

            for (vertex, p) in popped {
                prop_assert_eq!(expected[vertex.as_usize()], p);
            }
        }
    }
}
