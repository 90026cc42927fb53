//! Row actions and the per-row overflow menu.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::Tone;

/// Predicate evaluated against one row.
pub type RowPredicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Stable id of the built-in view action.
pub const VIEW_ACTION: &str = "view";
/// Stable id of the built-in edit action.
pub const EDIT_ACTION: &str = "edit";
/// Stable id of the built-in delete action.
pub const DELETE_ACTION: &str = "delete";

/// A row-scoped operation offered in the overflow menu.
pub struct Action<T> {
    /// Stable id reported in [`super::GridEvent::ActionInvoked`].
    pub id: String,
    /// Icon name.
    pub icon: String,
    /// Menu text.
    pub label: String,
    /// Hover text.
    pub tooltip: Option<String>,
    /// Colour hint.
    pub tone: Option<Tone>,
    disabled: Option<RowPredicate<T>>,
    hidden: Option<RowPredicate<T>>,
}

impl<T> Clone for Action<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            icon: self.icon.clone(),
            label: self.label.clone(),
            tooltip: self.tooltip.clone(),
            tone: self.tone,
            disabled: self.disabled.clone(),
            hidden: self.hidden.clone(),
        }
    }
}

impl<T> fmt::Debug for Action<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("tone", &self.tone)
            .finish_non_exhaustive()
    }
}

impl<T> Action<T> {
    /// Action with no tooltip, tone, or predicates.
    pub fn new(id: impl Into<String>, icon: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            icon: icon.into(),
            label: label.into(),
            tooltip: None,
            tone: None,
            disabled: None,
            hidden: None,
        }
    }

    /// Set the hover text.
    #[must_use]
    pub fn tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Set the colour hint.
    #[must_use]
    pub fn tone(mut self, tone: Tone) -> Self {
        self.tone = Some(tone);
        self
    }

    /// Grey the item out for rows matching `predicate`.
    #[must_use]
    pub fn disabled_when(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.disabled = Some(Arc::new(predicate));
        self
    }

    /// Leave the item out of the menu for rows matching `predicate`.
    #[must_use]
    pub fn hidden_when(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.hidden = Some(Arc::new(predicate));
        self
    }

    fn is_hidden(&self, row: &T) -> bool {
        self.hidden.as_ref().is_some_and(|hidden| hidden(row))
    }

    fn is_disabled(&self, row: &T) -> bool {
        self.disabled.as_ref().is_some_and(|disabled| disabled(row))
    }
}

/// The View/Edit/Delete triple used when a grid has no explicit actions.
pub fn default_actions<T>() -> Vec<Action<T>> {
    vec![
        Action::new(VIEW_ACTION, "visibility", "View")
            .tooltip("View details")
            .tone(Tone::Primary),
        Action::new(EDIT_ACTION, "edit", "Edit")
            .tooltip("Edit")
            .tone(Tone::Primary),
        Action::new(DELETE_ACTION, "delete", "Delete")
            .tooltip("Delete")
            .tone(Tone::Error),
    ]
}

/// One entry of an open menu, with predicates already applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Action id.
    pub id: String,
    /// Icon name.
    pub icon: String,
    /// Menu text.
    pub label: String,
    /// Hover text.
    pub tooltip: Option<String>,
    /// Colour hint.
    pub tone: Option<Tone>,
    /// Whether choosing the item does nothing.
    pub disabled: bool,
}

/// An open overflow menu bound to the row it was opened for.
///
/// Predicates run once, when the menu opens; later changes to the grid's
/// data do not affect an open menu.
#[derive(Debug, Clone)]
pub struct ActionMenu<T> {
    row: T,
    row_id: String,
    items: Vec<MenuItem>,
}

impl<T> ActionMenu<T> {
    pub(super) fn open(row: T, row_id: String, actions: &[Action<T>]) -> Self {
        let items = actions
            .iter()
            .filter(|action| !action.is_hidden(&row))
            .map(|action| MenuItem {
                id: action.id.clone(),
                icon: action.icon.clone(),
                label: action.label.clone(),
                tooltip: action.tooltip.clone(),
                tone: action.tone,
                disabled: action.is_disabled(&row),
            })
            .collect();
        Self { row, row_id, items }
    }

    /// The row the menu was opened for.
    pub fn row(&self) -> &T {
        &self.row
    }

    /// Identifier of that row.
    pub fn row_id(&self) -> &str {
        &self.row_id
    }

    /// Visible items, in declaration order.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub(super) fn is_enabled(&self, action_id: &str) -> bool {
        self.items
            .iter()
            .any(|item| item.id == action_id && !item.disabled)
    }

    pub(super) fn into_row(self) -> T {
        self.row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Row {
        locked: bool,
    }

    #[test]
    fn predicates_run_against_the_captured_row() {
        let actions = vec![
            Action::<Row>::new("edit", "edit", "Edit").disabled_when(|r| r.locked),
            Action::<Row>::new("delete", "delete", "Delete").hidden_when(|r| r.locked),
        ];
        let menu = ActionMenu::open(Row { locked: true }, "1".into(), &actions);

        let ids: Vec<_> = menu.items().iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["edit"]);
        assert!(!menu.is_enabled("edit"));
        assert!(!menu.is_enabled("delete"));
    }

    #[test]
    fn default_triple_has_stable_ids() {
        let ids: Vec<_> = default_actions::<Row>().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, [VIEW_ACTION, EDIT_ACTION, DELETE_ACTION]);
    }
}
