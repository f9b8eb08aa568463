//! Error types for flowview.

use thiserror::Error;

/// The main error type for flowview operations.
///
/// Most operations in this workspace are total over their stated domains;
/// the variants below cover the few hard contract violations. Missing
/// widgets or absent animations are deliberately *not* errors — they are
/// no-ops, since in view-adjacent code a missing widget simply means
/// "nothing to animate".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// An item index was outside the valid range `[0, len)`.
    #[error("item index {index} out of range (cache holds {len} entries)")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The number of entries at the time of the call.
        len: usize,
    },
}

/// A specialized Result type for flowview operations.
pub type Result<T> = std::result::Result<T, CoreError>;
