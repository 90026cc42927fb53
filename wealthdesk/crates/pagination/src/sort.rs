//! Sort descriptors applied before a result set is sliced into pages.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PaginationError;

/// Direction in which a sort field is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest value first.
    #[default]
    Asc,
    /// Largest value first.
    Desc,
}

impl SortDirection {
    /// Flip the direction, as a repeated header click does.
    ///
    /// # Examples
    /// ```
    /// use pagination::SortDirection;
    ///
    /// assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
    /// assert_eq!(SortDirection::Desc.toggled(), SortDirection::Asc);
    /// ```
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Orient an ascending comparison result to this direction.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    /// Wire spelling used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = PaginationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(PaginationError::InvalidSortDirection(value.to_owned())),
        }
    }
}

/// A field name paired with a direction.
///
/// The field is a record property name as it appears on the wire, for
/// example `firstName` or `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sort {
    field: String,
    direction: SortDirection,
}

impl Sort {
    /// Build a sort, rejecting a blank field name.
    ///
    /// # Errors
    /// Returns [`PaginationError::EmptySortField`] when `field` is blank.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Result<Self, PaginationError> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(PaginationError::EmptySortField);
        }
        Ok(Self { field, direction })
    }

    /// Ascending sort on `field`.
    ///
    /// # Errors
    /// Returns [`PaginationError::EmptySortField`] when `field` is blank.
    pub fn ascending(field: impl Into<String>) -> Result<Self, PaginationError> {
        Self::new(field, SortDirection::Asc)
    }

    /// Property name to sort by.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Direction of the sort.
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for sort parsing and ordering.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("asc", SortDirection::Asc)]
    #[case("DESC", SortDirection::Desc)]
    #[case(" desc ", SortDirection::Desc)]
    fn parses_known_directions(#[case] raw: &str, #[case] expected: SortDirection) {
        assert_eq!(raw.parse::<SortDirection>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_direction() {
        assert_eq!(
            "sideways".parse::<SortDirection>(),
            Err(PaginationError::InvalidSortDirection("sideways".to_owned()))
        );
    }

    #[test]
    fn descending_reverses_ordering() {
        assert_eq!(SortDirection::Desc.apply(1.cmp(&2)), Ordering::Greater);
        assert_eq!(SortDirection::Asc.apply(1.cmp(&2)), Ordering::Less);
    }

    #[test]
    fn blank_field_is_rejected() {
        assert_eq!(
            Sort::new("  ", SortDirection::Asc),
            Err(PaginationError::EmptySortField)
        );
    }
}
