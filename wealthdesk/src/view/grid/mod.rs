//! Generic data grid.
//!
//! The grid renders a caller-sliced page of arbitrary records. It owns only
//! its sort state, row selection, and the open action menu; pagination and
//! data belong to the caller. Interactions come back as [`GridEvent`]s,
//! never as mutations of the data.
//!
//! Sorting is never applied locally: every sort change is emitted so the
//! caller can forward it to the service query.

mod action;
mod column;

use std::collections::BTreeSet;

use pagination::{PageInfo, Sort, SortDirection};
use serde::Serialize;
use tracing::warn;

pub use action::{
    Action, ActionMenu, DELETE_ACTION, EDIT_ACTION, MenuItem, RowPredicate, VIEW_ACTION,
    default_actions,
};
pub use column::{Align, Cell, Column, ColumnRender, CompositeFn, FormatFn, Tone};
pub(crate) use column::row_json;

use crate::domain::{record_id, resolve_path};

/// Default rows-per-page choices.
pub const DEFAULT_ROWS_PER_PAGE_OPTIONS: [u32; 4] = [10, 25, 50, 100];

/// Default body text for an empty, settled grid.
pub const DEFAULT_EMPTY_STATE_MESSAGE: &str = "No data available";

/// Current sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    /// Column id being sorted.
    pub column_id: String,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortState {
    /// Sort state for `column_id`.
    pub fn new(column_id: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column_id: column_id.into(),
            direction,
        }
    }

    /// Service-side sort equivalent, or `None` for a blank column id.
    pub fn to_sort(&self) -> Option<Sort> {
        Sort::new(self.column_id.clone(), self.direction).ok()
    }
}

/// Tri-state of the "select all" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckState {
    /// No row on the page is selected.
    Unchecked,
    /// Some, but not all, rows on the page are selected.
    Indeterminate,
    /// Every row on a non-empty page is selected.
    Checked,
}

/// Interaction reported to the grid's owner.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent<T> {
    /// A row body was clicked.
    RowActivated(T),
    /// The operator asked for another page.
    PageRequested(u32),
    /// The operator asked for another page size.
    RowsPerPageRequested(u32),
    /// The sort column or direction changed.
    SortChanged(SortState),
    /// A menu action was chosen for a row.
    ActionInvoked {
        /// Action id.
        action: String,
        /// The row the menu was opened for.
        row: T,
    },
}

/// Configuration errors detectable against a sample row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridConfigError {
    /// A plain or formatted column names a path the record lacks.
    #[error("column `{column}` does not resolve to a record property")]
    UnresolvedColumn {
        /// Offending column id.
        column: String,
    },
}

/// Static grid configuration.
#[derive(Debug, Clone)]
pub struct GridConfig<T> {
    /// Displayed columns, in order.
    pub columns: Vec<Column<T>>,
    /// Property path of each record's unique identifier.
    pub id_field: String,
    /// Row actions; `None` means the built-in View/Edit/Delete triple and an
    /// empty list means no action column.
    pub actions: Option<Vec<Action<T>>>,
    /// Whether rows carry selection checkboxes.
    pub selectable: bool,
    /// Whether clicking a row emits [`GridEvent::RowActivated`].
    pub row_click: bool,
    /// Body text when the grid is settled and empty.
    pub empty_state_message: String,
    /// Sort shown before the first header click.
    pub initial_sort: Option<SortState>,
    /// Page-size choices offered in the footer.
    pub rows_per_page_options: Vec<u32>,
}

impl<T> GridConfig<T> {
    /// Configuration with defaults for everything but columns and id field.
    pub fn new(columns: Vec<Column<T>>, id_field: impl Into<String>) -> Self {
        Self {
            columns,
            id_field: id_field.into(),
            actions: None,
            selectable: false,
            row_click: false,
            empty_state_message: DEFAULT_EMPTY_STATE_MESSAGE.to_owned(),
            initial_sort: None,
            rows_per_page_options: DEFAULT_ROWS_PER_PAGE_OPTIONS.to_vec(),
        }
    }

    /// Use explicit row actions.
    #[must_use]
    pub fn actions(mut self, actions: Vec<Action<T>>) -> Self {
        self.actions = Some(actions);
        self
    }

    /// Enable row selection.
    #[must_use]
    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Enable row activation on click.
    #[must_use]
    pub fn row_click(mut self, row_click: bool) -> Self {
        self.row_click = row_click;
        self
    }

    /// Override the empty-state text.
    #[must_use]
    pub fn empty_state_message(mut self, message: impl Into<String>) -> Self {
        self.empty_state_message = message.into();
        self
    }

    /// Set the initial sort.
    #[must_use]
    pub fn initial_sort(mut self, column_id: impl Into<String>, direction: SortDirection) -> Self {
        self.initial_sort = Some(SortState::new(column_id, direction));
        self
    }

    /// Override the page-size choices.
    #[must_use]
    pub fn rows_per_page_options(mut self, options: Vec<u32>) -> Self {
        self.rows_per_page_options = options;
        self
    }
}

impl<T: Serialize> GridConfig<T> {
    /// Check that every path-reading column resolves on `sample`.
    ///
    /// # Errors
    /// Returns [`GridConfigError::UnresolvedColumn`] for the first column
    /// whose id is not a property of the sample's serialised form.
    pub fn check_paths(&self, sample: &T) -> Result<(), GridConfigError> {
        let json = row_json(sample);
        match self
            .columns
            .iter()
            .filter(|column| column.reads_path())
            .find(|column| resolve_path(&json, &column.id).is_none())
        {
            Some(column) => Err(GridConfigError::UnresolvedColumn {
                column: column.id.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Header cell render model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderView {
    /// Column id.
    pub id: String,
    /// Header text.
    pub label: String,
    /// Whether the header is a sort control.
    pub sortable: bool,
    /// Direction shown when this column is the active sort.
    pub sorted: Option<SortDirection>,
    /// Alignment.
    pub align: Align,
    /// Minimum width hint.
    pub min_width: Option<u16>,
    /// Maximum width hint.
    pub max_width: Option<u16>,
}

/// Body row render model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    /// String-coerced identifier, when the record has one.
    pub id: Option<String>,
    /// Whether the row is in the selection.
    pub selected: bool,
    /// One cell per column.
    pub cells: Vec<Cell>,
}

/// Body render model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GridBody {
    /// One centred row spanning every column.
    Empty {
        /// Text to show.
        message: String,
        /// Number of columns spanned, including selection and actions.
        colspan: usize,
    },
    /// Data rows.
    Rows {
        /// Rows in data order.
        rows: Vec<RowView>,
    },
}

/// Footer render model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterView {
    /// Zero-based page.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
    /// Total rows.
    pub total: u64,
    /// Page-size choices.
    pub options: Vec<u32>,
    /// `"{from}–{to} of {total}"`.
    pub range_label: String,
}

impl FooterView {
    fn new(info: PageInfo, options: &[u32]) -> Self {
        let (from, to) = info.displayed_range();
        Self {
            page: info.page,
            per_page: info.per_page,
            total: info.total,
            options: options.to_vec(),
            range_label: format!("{from}\u{2013}{to} of {}", info.total),
        }
    }
}

/// Complete grid render model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridView {
    /// Column headers.
    pub headers: Vec<HeaderView>,
    /// Select-all checkbox, present when the grid is selectable.
    pub select_all: Option<CheckState>,
    /// Whether rows carry an action menu button.
    pub has_actions: bool,
    /// Whether the loading overlay is shown.
    pub loading: bool,
    /// Table body.
    pub body: GridBody,
    /// Pagination footer.
    pub footer: Option<FooterView>,
}

/// Sortable, selectable, paginated table state machine.
#[derive(Debug)]
pub struct DataGrid<T> {
    config: GridConfig<T>,
    actions: Vec<Action<T>>,
    data: Vec<T>,
    ids: Vec<Option<String>>,
    pagination: Option<PageInfo>,
    loading: bool,
    sort: Option<SortState>,
    selection: BTreeSet<String>,
    menu: Option<ActionMenu<T>>,
}

impl<T: Serialize + Clone> DataGrid<T> {
    /// Empty, settled grid.
    pub fn new(config: GridConfig<T>) -> Self {
        let actions = config.actions.clone().unwrap_or_else(default_actions);
        let sort = config.initial_sort.clone();
        Self {
            config,
            actions,
            data: Vec::new(),
            ids: Vec::new(),
            pagination: None,
            loading: false,
            sort,
            selection: BTreeSet::new(),
            menu: None,
        }
    }

    /// Replace the displayed page.
    ///
    /// Selected ids no longer on the page are dropped. An open menu keeps
    /// the row it captured.
    pub fn set_data(&mut self, data: Vec<T>) {
        if let Some(Err(err)) = data.first().map(|first| self.config.check_paths(first)) {
            warn!(error = %err, "grid column misconfigured");
        }
        self.ids = data
            .iter()
            .map(|row| record_id(&row_json(row), &self.config.id_field))
            .collect();
        let on_page: BTreeSet<&str> = self.ids.iter().flatten().map(String::as_str).collect();
        self.selection.retain(|id| on_page.contains(id.as_str()));
        self.data = data;
    }

    /// Rows currently displayed.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Show or hide the loading overlay.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Whether the loading overlay is shown.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Replace the pagination descriptor.
    pub fn set_pagination(&mut self, pagination: Option<PageInfo>) {
        self.pagination = pagination;
    }

    /// Current sort.
    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Selected identifiers.
    pub fn selection(&self) -> &BTreeSet<String> {
        &self.selection
    }

    /// Static configuration.
    pub fn config(&self) -> &GridConfig<T> {
        &self.config
    }

    /// Handle a header click.
    ///
    /// The active column flips direction; any other sortable column starts
    /// ascending. Unknown and unsortable columns emit nothing.
    pub fn click_header(&mut self, column_id: &str) -> Option<GridEvent<T>> {
        let column = self
            .config
            .columns
            .iter()
            .find(|column| column.id == column_id && column.sortable)?;
        let direction = match &self.sort {
            Some(current) if current.column_id == column.id => current.direction.toggled(),
            _ => SortDirection::Asc,
        };
        let next = SortState::new(column.id.clone(), direction);
        self.sort = Some(next.clone());
        Some(GridEvent::SortChanged(next))
    }

    /// Toggle one row's selection; returns whether it is now selected.
    ///
    /// Ids not on the current page are ignored.
    pub fn toggle_row(&mut self, id: &str) -> bool {
        if !self.config.selectable || !self.ids.iter().flatten().any(|known| known == id) {
            return false;
        }
        if self.selection.remove(id) {
            false
        } else {
            self.selection.insert(id.to_owned());
            true
        }
    }

    /// Select every row on the page, or clear the selection.
    pub fn select_all(&mut self, checked: bool) {
        if !self.config.selectable {
            return;
        }
        if checked {
            self.selection = self.ids.iter().flatten().cloned().collect();
        } else {
            self.selection.clear();
        }
    }

    /// State of the select-all checkbox.
    pub fn header_check(&self) -> CheckState {
        let page_ids: BTreeSet<&str> = self.ids.iter().flatten().map(String::as_str).collect();
        let selected_on_page = page_ids
            .iter()
            .filter(|id| self.selection.contains(**id))
            .count();
        if !page_ids.is_empty() && selected_on_page == page_ids.len() {
            CheckState::Checked
        } else if selected_on_page > 0 {
            CheckState::Indeterminate
        } else {
            CheckState::Unchecked
        }
    }

    /// Handle a click on the row at `index`.
    pub fn activate_row(&self, index: usize) -> Option<GridEvent<T>> {
        if !self.config.row_click {
            return None;
        }
        self.data.get(index).cloned().map(GridEvent::RowActivated)
    }

    /// Ask the owner for `page`.
    pub fn request_page(&self, page: u32) -> GridEvent<T> {
        GridEvent::PageRequested(page)
    }

    /// Ask the owner for a page size of `size`; zero is ignored.
    pub fn request_rows_per_page(&self, size: u32) -> Option<GridEvent<T>> {
        (size > 0).then_some(GridEvent::RowsPerPageRequested(size))
    }

    /// Open the action menu for the row at `index`.
    pub fn open_menu(&mut self, index: usize) -> Option<&ActionMenu<T>> {
        let row = self.data.get(index)?.clone();
        let row_id = self.ids.get(index).cloned().flatten().unwrap_or_default();
        self.menu = Some(ActionMenu::open(row, row_id, &self.actions));
        self.menu.as_ref()
    }

    /// The open menu, if any.
    pub fn menu(&self) -> Option<&ActionMenu<T>> {
        self.menu.as_ref()
    }

    /// Choose `action_id` from the open menu.
    ///
    /// Enabled items emit [`GridEvent::ActionInvoked`] and close the menu;
    /// disabled, hidden, or unknown items do nothing.
    pub fn choose_action(&mut self, action_id: &str) -> Option<GridEvent<T>> {
        if !self.menu.as_ref()?.is_enabled(action_id) {
            return None;
        }
        let row = self.menu.take()?.into_row();
        Some(GridEvent::ActionInvoked {
            action: action_id.to_owned(),
            row,
        })
    }

    /// Dismiss the menu.
    pub fn close_menu(&mut self) {
        self.menu = None;
    }

    /// Render model for the current state.
    pub fn view(&self) -> GridView {
        let has_actions = !self.actions.is_empty();
        let headers = self
            .config
            .columns
            .iter()
            .map(|column| HeaderView {
                id: column.id.clone(),
                label: column.label.clone(),
                sortable: column.sortable,
                sorted: self
                    .sort
                    .as_ref()
                    .filter(|sort| column.sortable && sort.column_id == column.id)
                    .map(|sort| sort.direction),
                align: column.align,
                min_width: column.min_width,
                max_width: column.max_width,
            })
            .collect();

        let body = if self.data.is_empty() && !self.loading {
            GridBody::Empty {
                message: self.config.empty_state_message.clone(),
                colspan: self.config.columns.len()
                    + usize::from(self.config.selectable)
                    + usize::from(has_actions),
            }
        } else {
            GridBody::Rows {
                rows: self
                    .data
                    .iter()
                    .zip(&self.ids)
                    .map(|(row, id)| self.row_view(row, id.as_ref()))
                    .collect(),
            }
        };

        GridView {
            headers,
            select_all: self.config.selectable.then(|| self.header_check()),
            has_actions,
            loading: self.loading,
            body,
            footer: self
                .pagination
                .map(|info| FooterView::new(info, &self.config.rows_per_page_options)),
        }
    }

    fn row_view(&self, row: &T, id: Option<&String>) -> RowView {
        let json = row_json(row);
        RowView {
            id: id.cloned(),
            selected: id.is_some_and(|id| self.selection.contains(id)),
            cells: self
                .config
                .columns
                .iter()
                .map(|column| column.cell(row, &json))
                .collect(),
        }
    }
}
