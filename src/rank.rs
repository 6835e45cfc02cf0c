// A graph-network function to find arg-max among siblings
//
// Sift-down needs the best of up to `2^k` children on every level. Instead of
// a left-to-right fold we run a tournament, so comparisons on each round don't
// depend on each other and the CPU can overlap them.
//
// Every fight is between a left index and a right index, and the left one
// wins ties, so the winner is always the first maximum in scan order.

/// Core comparison and index selection
#[inline(always)]
#[must_use]
fn fight<T: PartialOrd>(a: &[T], l: usize, r: usize) -> usize {
    debug_assert!(l < r, "Fight({l}, {r}) uses wrong argument order");
    if a[l] >= a[r] { l } else { r }
}

// 0   1
// *   *
//  \ /
//   *
#[inline(always)]
#[must_use]
fn rank_2<T: PartialOrd>(a: &[T]) -> usize {
    debug_assert!(a.len() == 2);
    fight(a, 0, 1)
}

// 0   1   2   3
// *   *   *   *
//  \ /     \ /
//   *       *
//    \     /
//       *
#[inline(always)]
#[must_use]
fn rank_4<T: PartialOrd>(a: &[T]) -> usize {
    debug_assert!(a.len() == 4);
    fight(
        a, //
        fight(a, 0, 1),
        fight(a, 2, 3),
    )
}

// 0   1 2   3 4   5 6   7
// *   * *   * *   * *   *
//  \ /   \ /   \ /   \ /
//   *     *     *     *
//    \   /       \   /
//      *           *
//        \        /
//            *
#[inline(always)]
#[must_use]
fn rank_8<T: PartialOrd>(a: &[T]) -> usize {
    debug_assert!(a.len() == 8);
    fight(
        a,
        fight(
            a, //
            fight(a, 0, 1),
            fight(a, 2, 3),
        ),
        fight(
            a, //
            fight(a, 4, 5),
            fight(a, 6, 7),
        ),
    )
}

// Two rounds of 8 and a final.
#[inline(always)]
#[must_use]
fn rank_16<T: PartialOrd>(a: &[T]) -> usize {
    debug_assert!(a.len() == 16);
    fight(
        a, //
        rank_8(&a[0..8]),
        rank_8(&a[8..16]) + 8,
    )
}

/// Index of the best (first maximum) sibling.
///
/// Full levels of a heap with `d <= 16` take a single tournament. The
/// incomplete last level runs the tournament over its largest power-of-two
/// prefix and fights the winner of the remainder.
///
/// ```
/// use power_heap::rank::best_child;
/// assert_eq!(best_child(&[3, 9, 1, 9]), 1);
/// assert_eq!(best_child(&[4, 4, 4]), 0);
/// assert_eq!(best_child(&[1, 2, 3, 4, 5]), 4);
/// ```
#[inline]
#[must_use]
pub fn best_child<T: PartialOrd>(a: &[T]) -> usize {
    debug_assert!(!a.is_empty(), "There are no siblings to rank");
    match a.len() {
        1 => 0usize,
        2 => rank_2(a),
        4 => rank_4(a),
        8 => rank_8(a),
        16 => rank_16(a),
        n if n < 16 => {
            let p = 1usize << n.ilog2();
            let head = best_child(&a[..p]);
            let tail = best_child(&a[p..]) + p;
            fight(a, head, tail)
        }
        _ => linear_max_index(a),
    }
}

pub fn linear_max_index<T: PartialOrd>(xs: &[T]) -> usize {
    assert!(!xs.is_empty());

    let mut max_i = 0;
    for (i, x) in xs.iter().enumerate() {
        if *x > xs[max_i] {
            max_i = i;
        }
    }
    max_i
}
