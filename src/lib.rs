use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod heap_primitives;
pub mod rank;

// Heaps
// -----
pub mod data_structures;
pub mod error;
pub mod stats;

pub use data_structures::power_heap::PowerHeap;
pub use error::PowerHeapError;
