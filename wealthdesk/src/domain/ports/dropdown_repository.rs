//! Driven port over the dropdown catalogue.

use async_trait::async_trait;

use crate::domain::{DropdownCatalogue, DropdownKind, DropdownOption, Error};

/// Source of form choice lists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DropdownRepository: Send + Sync {
    /// Options for one kind.
    async fn options(&self, kind: DropdownKind) -> Result<Vec<DropdownOption>, Error>;

    /// Every kind at once.
    async fn catalogue(&self) -> Result<DropdownCatalogue, Error>;
}
