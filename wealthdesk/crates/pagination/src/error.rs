//! Validation failures raised while building page and sort requests.

use thiserror::Error;

/// Errors raised when page or sort parameters are out of range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// The requested page size is zero or above the allowed maximum.
    #[error("perPage must be between 1 and {max}, got {per_page}")]
    PerPageOutOfRange {
        /// The rejected page size.
        per_page: u32,
        /// The largest page size accepted.
        max: u32,
    },
    /// The sort direction is neither `asc` nor `desc`.
    #[error("sort direction must be `asc` or `desc`, got `{0}`")]
    InvalidSortDirection(String),
    /// A sort was requested without naming a field.
    #[error("sort field must not be empty")]
    EmptySortField,
}
