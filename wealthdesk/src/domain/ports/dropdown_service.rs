//! Driving port for form choice lists.

use async_trait::async_trait;
use pagination::Envelope;

use crate::domain::{DropdownCatalogue, DropdownKind, DropdownOption};

/// Dropdown catalogue lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DropdownService: Send + Sync {
    /// Options for one kind.
    async fn options(&self, kind: DropdownKind) -> Envelope<Vec<DropdownOption>>;

    /// The whole catalogue.
    async fn all(&self) -> Envelope<DropdownCatalogue>;
}
