use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PowerHeapError {
    /// The branching factor `2^k` can't be built from the given exponent.
    #[error("Invalid branching factor exponent {exponent}, expected 0 <= k < {max}", max = usize::BITS)]
    InvalidArgument { exponent: i32 },
    #[error("Can't pop from an empty heap")]
    EmptyStructure,
}
