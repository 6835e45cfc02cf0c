use crate::error::PowerHeapError;
use crate::heap_primitives::arity;
use crate::heap_primitives::index_children;
use crate::heap_primitives::index_parent;
use crate::rank::best_child;

/// Max-Heap with `2^k` children per node.
///
/// Nodes live in a single `Vec` laid out breadth-first, so the tree is only
/// implied by the index arithmetic in [`crate::heap_primitives`].
///
/// Wider nodes make the tree shallower, trading fewer swaps when going up for
/// more comparisons when going down. A whole family of siblings sits on
/// contiguous memory, so with small elements a level of the sift-down can be
/// a single cache line.
///
/// ```
/// use power_heap::PowerHeap;
///
/// let mut heap = PowerHeap::new(2)?;
/// for v in [5, 30, 25, 40, 35] {
///     heap.insert(v);
/// }
/// assert_eq!(heap.pop_max()?, 40);
/// assert_eq!(heap.pop_max()?, 35);
/// # Ok::<(), power_heap::PowerHeapError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PowerHeap<T>
where
    T: Ord,
{
    /// `k` in the `2^k` branching factor.
    exponent: u32,
    heap: Vec<T>,
}

impl<T> PowerHeap<T>
where
    T: Ord,
{
    /// Creates an empty heap with `2^k` children per node.
    ///
    /// `k=0` is accepted and degenerates into a sorted chain.
    pub fn new(k: i32) -> Result<Self, PowerHeapError> {
        Self::with_capacity(k, 0)
    }

    pub fn with_capacity(k: i32, capacity: usize) -> Result<Self, PowerHeapError> {
        let exponent = u32::try_from(k)
            .ok()
            .filter(|e| *e < usize::BITS)
            .ok_or(PowerHeapError::InvalidArgument { exponent: k })?;
        log::trace!(
            "New PowerHeap with branching factor 2^{exponent}={} and capacity {capacity}",
            arity(exponent)
        );

        Ok(Self {
            exponent,
            heap: Vec::with_capacity(capacity),
        })
    }

    #[inline(always)]
    pub fn branching_factor(&self) -> usize {
        arity(self.exponent)
    }
    #[inline(always)]
    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    pub fn len(&self) -> usize {
        self.heap.len()
    }
    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    /// The current maximum, if any.
    pub fn peek_max(&self) -> Option<&T> {
        self.heap.first()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Raw breadth-first layout of the tree.
    #[cfg(feature = "inspect")]
    pub fn as_slice(&self) -> &[T] {
        &self.heap
    }

    pub fn insert(&mut self, value: T) {
        #[cfg(feature = "coz_profile")]
        coz::scope!("Insert");

        self.verify_heap();
        let heap_index = self.heap.len(); // Future heap_index

        let capacity = self.heap.capacity();
        self.heap.push(value);
        if capacity != self.heap.capacity() {
            log::debug!(
                "PowerHeap storage grew from {capacity} to {}",
                self.heap.capacity()
            );
        }
        self.sift_up(heap_index);

        self.verify_heap();
    }

    /// Removes the maximum.
    ///
    /// The heap is left untouched when empty.
    pub fn pop_max(&mut self) -> Result<T, PowerHeapError> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("PopMax");

        self.verify_heap();

        let Some(last) = self.heap.pop() else {
            log::debug!("Rejected pop from an empty PowerHeap");
            return Err(PowerHeapError::EmptyStructure);
        };
        if self.heap.is_empty() {
            return Ok(last);
        }

        // The last element replaces the root and sinks back to its level.
        let max = std::mem::replace(&mut self.heap[0], last);
        self.sift_down(0);

        self.verify_heap();
        Ok(max)
    }

    /// Drains the heap from the maximum down.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.heap.len());
        while let Ok(v) = self.pop_max() {
            sorted.push(v);
        }
        sorted
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_heap(&self) {
        // All good... (hopefully)
    }

    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_heap(&self) {
        // Every node goes after its parent node, if any.
        for i in 1..self.heap.len() {
            let p = index_parent(i, self.exponent);
            debug_assert!(
                self.heap[p] >= self.heap[i],
                "Node[{p}] !>= child [{i}]. Out of heap of len={} and arity={}",
                self.heap.len(),
                self.branching_factor(),
            );
        }
    }

    // Implementation details

    /// Raises a node while it beats its parent.
    /// Returns it's new index
    #[inline(always)]
    fn sift_up(&mut self, mut index: usize) -> usize {
        #[cfg(feature = "coz_profile")]
        coz::scope!("SiftUp");

        debug_assert!(
            index < self.heap.len(),
            "Index {index} is OUT OF BOUNDS({})",
            self.heap.len()
        );

        while index > 0 {
            let parent = index_parent(index, self.exponent);
            if self.heap[parent] >= self.heap[index] {
                break;
            }
            self.heap.swap(parent, index);
            index = parent;
        }
        index
    }

    /// Lowers a node while one of its children beats it.
    /// Returns it's new index
    #[inline(always)]
    fn sift_down(&mut self, mut index: usize) -> usize {
        #[cfg(feature = "coz_profile")]
        coz::scope!("SiftDown");

        let len = self.heap.len();
        debug_assert!(index < len, "Index {index} is OUT OF BOUNDS({len})");

        loop {
            let children = index_children(index, self.exponent, len);
            if children.is_empty() {
                break;
            }

            // Find the best child
            let first = children.start;
            let child = first + best_child(&self.heap[children]);

            if self.heap[index] >= self.heap[child] {
                break;
            }

            self.heap.swap(index, child);
            debug_assert!(self.heap[index] >= self.heap[child]);

            index = child;
        }
        index
    }
}

impl<T> Default for PowerHeap<T>
where
    T: Ord,
{
    /// A binary heap.
    fn default() -> Self {
        Self {
            exponent: 1,
            heap: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cmp::Ordering;
    use std::collections::BinaryHeap;

    use ordered_float::OrderedFloat;
    use rand::Rng;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    fn assert_heap<T: Ord + std::fmt::Debug>(heap: &PowerHeap<T>) {
        for i in 1..heap.heap.len() {
            let p = index_parent(i, heap.exponent);
            assert!(
                heap.heap[p] >= heap.heap[i],
                "Node[{p}]={:?} !>= child [{i}]={:?} in {:?}",
                heap.heap[p],
                heap.heap[i],
                heap.heap,
            );
        }
    }

    #[test]
    fn binary_heap_pops_in_order() {
        let mut heap = PowerHeap::new(1).unwrap();
        heap.insert(10);
        heap.insert(20);
        heap.insert(15);

        assert_eq!(heap.pop_max(), Ok(20));
        assert_eq!(heap.pop_max(), Ok(15));
        assert_eq!(heap.pop_max(), Ok(10));
        assert!(heap.is_empty());
    }

    #[test]
    fn quaternary_heap_pops_in_order() {
        let mut heap = PowerHeap::new(2).unwrap();
        for v in [5, 30, 25, 40, 35] {
            heap.insert(v);
        }
        assert_eq!(heap.branching_factor(), 4);

        assert_eq!(heap.pop_max(), Ok(40));
        assert_eq!(heap.pop_max(), Ok(35));
        assert_eq!(heap.len(), 3);
        assert_heap(&heap);
    }

    #[test]
    fn negative_exponent_is_rejected() {
        assert_eq!(
            PowerHeap::<i32>::new(-1).unwrap_err(),
            PowerHeapError::InvalidArgument { exponent: -1 }
        );
        assert!(PowerHeap::<i32>::with_capacity(i32::MIN, 16).is_err());
    }

    #[test]
    fn oversized_exponent_is_rejected() {
        let k = usize::BITS as i32;
        assert_eq!(
            PowerHeap::<i32>::new(k).unwrap_err(),
            PowerHeapError::InvalidArgument { exponent: k }
        );
        let widest = PowerHeap::<i32>::new(k - 1).unwrap();
        assert_eq!(widest.branching_factor(), 1usize << (usize::BITS - 1));
    }

    #[test]
    fn unary_heap_is_a_chain() {
        let mut heap = PowerHeap::new(0).unwrap();
        assert_eq!(heap.branching_factor(), 1);
        for v in [3, 1, 4, 1, 5, 9, 2, 6] {
            heap.insert(v);
            assert_heap(&heap);
        }
        // A valid chain is sorted.
        assert!(heap.heap.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(heap.into_sorted_vec(), vec![9, 6, 5, 4, 3, 2, 1, 1]);
    }

    #[test]
    fn empty_pop_leaves_heap_usable() {
        let mut heap = PowerHeap::<u32>::new(3).unwrap();
        assert_eq!(heap.pop_max(), Err(PowerHeapError::EmptyStructure));
        assert_eq!(heap.len(), 0);

        heap.insert(7);
        assert_eq!(heap.pop_max(), Ok(7));
        assert_eq!(heap.pop_max(), Err(PowerHeapError::EmptyStructure));

        heap.insert(1);
        heap.insert(2);
        assert_eq!(heap.pop_max(), Ok(2));
        assert_eq!(heap.pop_max(), Ok(1));
    }

    #[test]
    fn peek_and_clear() {
        let mut heap = PowerHeap::default();
        assert_eq!(heap.branching_factor(), 2);
        assert_eq!(heap.peek_max(), None);

        heap.insert("b");
        heap.insert("c");
        heap.insert("a");
        assert_eq!(heap.peek_max(), Some(&"c"));
        assert_eq!(heap.len(), 3);

        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.exponent(), 1);
        assert_eq!(heap.pop_max(), Err(PowerHeapError::EmptyStructure));
    }

    #[test]
    fn with_capacity_preallocates() {
        let heap = PowerHeap::<u64>::with_capacity(2, 100).unwrap();
        assert!(heap.capacity() >= 100);
        assert!(heap.is_empty());
    }

    #[test]
    fn drains_sorted_for_every_arity() {
        for k in 0..=6 {
            let mut rng = ChaCha8Rng::seed_from_u64(k as u64);
            let mut heap = PowerHeap::new(k).unwrap();
            let mut values: Vec<u32> = (0..1000).map(|_| rng.random_range(0..300u32)).collect();
            for v in &values {
                heap.insert(*v);
            }
            assert_heap(&heap);
            assert_eq!(heap.len(), values.len());

            values.sort_unstable_by(|a, b| b.cmp(a));
            assert_eq!(heap.into_sorted_vec(), values, "k={k}");
        }
    }

    #[test]
    fn mixed_operations_match_std_heap() {
        for k in 0..=4 {
            let mut rng = ChaCha8Rng::seed_from_u64(100 + k as u64);
            let mut heap = PowerHeap::new(k).unwrap();
            let mut model = BinaryHeap::new();
            let mut inserts = 0usize;
            let mut pops = 0usize;

            for _ in 0..5000 {
                if rng.random_bool(0.6) {
                    let v: i16 = rng.random_range(-50..50);
                    heap.insert(v);
                    model.push(v);
                    inserts += 1;
                } else {
                    match model.pop() {
                        Some(expected) => {
                            let max = heap.pop_max().unwrap();
                            assert_eq!(max, expected, "k={k}");
                            // Nothing left beats what was just popped.
                            assert!(heap.heap.iter().all(|v| *v <= max));
                            pops += 1;
                        }
                        None => {
                            assert_eq!(heap.pop_max(), Err(PowerHeapError::EmptyStructure))
                        }
                    }
                }
                assert_heap(&heap);
                assert_eq!(heap.len(), inserts - pops);
                assert_eq!(heap.peek_max(), model.peek());
            }
        }
    }

    #[test]
    fn floats_through_ordered_float() {
        let mut heap = PowerHeap::new(3).unwrap();
        for v in [0.5f64, -1.25, 3.75, 2.0, f64::INFINITY, -0.0, 1e-9] {
            heap.insert(OrderedFloat(v));
        }
        assert_eq!(heap.pop_max().unwrap().into_inner(), f64::INFINITY);
        assert_eq!(heap.pop_max().unwrap().into_inner(), 3.75);
        assert_eq!(heap.pop_max().unwrap().into_inner(), 2.0);
    }

    /// Ordered by `key` only, so `tag` tells equal keys apart.
    #[derive(Debug, Clone, Copy)]
    struct Tagged {
        key: u8,
        tag: char,
    }
    impl PartialEq for Tagged {
        fn eq(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }
    impl Eq for Tagged {}
    impl PartialOrd for Tagged {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            Some(self.cmp(other))
        }
    }
    impl Ord for Tagged {
        fn cmp(&self, other: &Self) -> Ordering {
            self.key.cmp(&other.key)
        }
    }

    #[test]
    fn sift_down_prefers_first_of_equal_children() {
        let mut heap = PowerHeap::new(1).unwrap();
        heap.insert(Tagged { key: 9, tag: 'r' });
        heap.insert(Tagged { key: 5, tag: 'a' });
        heap.insert(Tagged { key: 5, tag: 'b' });
        heap.insert(Tagged { key: 1, tag: 'l' });

        assert_eq!(heap.pop_max().unwrap().tag, 'r');
        assert_eq!(heap.pop_max().unwrap().tag, 'a');
        assert_eq!(heap.pop_max().unwrap().tag, 'b');
        assert_eq!(heap.pop_max().unwrap().tag, 'l');
    }

    #[test]
    fn equal_values_do_not_sift_up() {
        let mut heap = PowerHeap::new(2).unwrap();
        heap.insert(Tagged { key: 4, tag: 'x' });
        heap.insert(Tagged { key: 4, tag: 'y' });
        assert_eq!(heap.peek_max().unwrap().tag, 'x');
    }
}
