//! Heap implementations.
//!
//! These keep the maximum of a collection of values at hand.

pub mod power_heap;
