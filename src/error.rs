//! Errors surfaced by detector construction and scoring.

use thiserror::Error;

/// Validation failures for detector construction and batch scoring.
///
/// All failures are `InvalidArgument`-shaped: bad detector dimensions, a
/// bad decay factor, or an unsupported batch scoring method. There is no
/// "contract violation" variant exposed here — a submatrix operation given
/// a matrix of the wrong shape is a programmer error and panics rather
/// than returning a `Result`, matching how out-of-bounds indexing already
/// panics in Rust.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnomalyError {
    #[error("rows must be positive, got {0}")]
    InvalidRows(usize),

    #[error("buckets must be positive, got {0}")]
    InvalidBuckets(usize),

    #[error("decay must be in (0, 1], got {0}")]
    InvalidDecay(f64),

    #[error("number of dense submatrices must be positive, got {0}")]
    InvalidSubmatrixCount(usize),

    #[error("top-k requires k in [1, buckets^2], got {0}")]
    InvalidK(usize),
}
