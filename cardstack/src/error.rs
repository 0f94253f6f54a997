//! Error types.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StackError {
    /// A by-position mutation named a position outside the stack.
    #[error("position {index} is out of bounds for a stack of {len} cards")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A layout query named a card the layout has no progress for.
    #[error("card {index} is not laid out (layout holds {count} cards)")]
    UnknownCard { index: usize, count: usize },
}

pub type Result<T, E = StackError> = core::result::Result<T, E>;
