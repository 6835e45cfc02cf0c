// Heap intrinsic operations implemented externally.
//
// A heap is a tree-like structure where every subtree's root has a better score
// than all the other nodes in the subtree.
//
// This is implemented with an array that's traversed in a non-linear way.
// With `d = 2^k` children per node these are the indices we assign to each
// node (here `k=2`, so `d=4`),
//
// ```text
//                                  0
//         1              2                   3                  4
//   5  6  7  8     9 10 11 12         13 14 15 16        17 18 19 20
// 21 22 23 ...
// ```
//
// The last level will often be incomplete
//
// Since `d` is a power of two, moving around is just shifting,
//   - Up:          `(i-1) >> k`
//   - Down-first:  `(i << k) + 1`
//   - Down-last:   `(i+1) << k`
//
// Going down may not fit in a `usize` for large `k`. Such a child can't exist
// since no storage is that long, so the `down` primitives return `None`.

use std::cmp::min;
use std::ops::Range;

/// The branching factor, `2^k`.
///
/// ```
/// use power_heap::heap_primitives::arity;
/// assert_eq!(arity(0), 1);
/// assert_eq!(arity(1), 2);
/// assert_eq!(arity(3), 8);
/// ```
#[inline(always)]
#[must_use]
pub fn arity(k: u32) -> usize {
    debug_assert!(k < usize::BITS, "Arity 2^{k} does not fit a usize");
    1usize << k
}

/// The parent node
///
/// ```
/// use power_heap::heap_primitives::index_parent;
/// // Binary
/// assert_eq!(index_parent(1, 1), 0);
/// assert_eq!(index_parent(2, 1), 0);
/// assert_eq!(index_parent(3, 1), 1);
/// assert_eq!(index_parent(6, 1), 2);
/// assert_eq!(index_parent(25, 1), 12);
/// // Quaternary
/// assert_eq!(index_parent(4, 2), 0);
/// assert_eq!(index_parent(5, 2), 1);
/// assert_eq!(index_parent(8, 2), 1);
/// assert_eq!(index_parent(9, 2), 2);
/// // Unary, a chain
/// assert_eq!(index_parent(7, 0), 6);
/// ```
#[inline(always)]
#[must_use]
pub fn index_parent(i: usize, k: u32) -> usize {
    debug_assert!(i != 0, "The root has no parent");
    (i - 1) >> k
}

/// The first children
///
/// ```
/// use power_heap::heap_primitives::index_first_children;
/// assert_eq!(index_first_children(0, 1), Some(1));
/// assert_eq!(index_first_children(3, 1), Some(7));
/// assert_eq!(index_first_children(1, 2), Some(5));
/// assert_eq!(index_first_children(2, 3), Some(17));
/// assert_eq!(index_first_children(usize::MAX, 1), None);
/// ```
#[inline(always)]
#[must_use]
pub fn index_first_children(i: usize, k: u32) -> Option<usize> {
    i.checked_mul(arity(k))?.checked_add(1)
}

/// The last children
///
/// ```
/// use power_heap::heap_primitives::index_last_children;
/// assert_eq!(index_last_children(0, 1), Some(2));
/// assert_eq!(index_last_children(6, 1), Some(14));
/// assert_eq!(index_last_children(1, 2), Some(8));
/// assert_eq!(index_last_children(0, 0), Some(1));
/// assert_eq!(index_last_children(usize::MAX / 2, 2), None);
/// ```
#[inline(always)]
#[must_use]
pub fn index_last_children(i: usize, k: u32) -> Option<usize> {
    i.checked_add(1)?.checked_mul(arity(k))
}

/// The children of `i` that exist in a heap of `len` elements.
///
/// ```
/// use power_heap::heap_primitives::index_children;
/// assert_eq!(index_children(0, 2, 10), 1..5);
/// assert_eq!(index_children(1, 2, 7), 5..7);
/// assert_eq!(index_children(2, 2, 7).len(), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn index_children(i: usize, k: u32, len: usize) -> Range<usize> {
    match index_first_children(i, k) {
        Some(first) if first < len => first..min(first.saturating_add(arity(k)), len),
        _ => len..len,
    }
}
