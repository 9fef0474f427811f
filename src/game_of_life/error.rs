//! Error types for the grid engine

/// Errors raised by [`Grid`](super::Grid) construction and mutation.
///
/// Both variants are caller contract violations; nothing here is transient.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Width or height was zero or negative, or the grid is too large to address.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimension {
        width: i64,
        height: i64,
    },

    /// A write targeted a coordinate outside the grid.
    #[error("coordinates ({x}, {y}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        x: isize,
        y: isize,
        width: usize,
        height: usize,
    },
}
