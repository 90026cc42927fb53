//! Column descriptors and rendered cells.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::domain::{resolve_path, value_text};

/// Colour hint for badges and menu items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Neutral.
    #[default]
    Default,
    /// Primary accent.
    Primary,
    /// Positive outcome.
    Success,
    /// Needs attention.
    Warning,
    /// Failure or destructive.
    Error,
    /// Informational.
    Info,
}

/// Horizontal alignment of a column's header and cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Flush left.
    #[default]
    Left,
    /// Centred.
    Center,
    /// Flush right.
    Right,
}

/// One rendered table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Cell {
    /// Plain text.
    Text(String),
    /// A coloured status chip.
    Badge {
        /// Chip text.
        label: String,
        /// Chip colour.
        tone: Tone,
    },
    /// Nothing to show.
    Empty,
}

impl Cell {
    /// Text cell, or [`Cell::Empty`] when `text` is empty.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::Empty
        } else {
            Self::Text(text)
        }
    }

    /// Badge cell.
    pub fn badge(label: impl Into<String>, tone: Tone) -> Self {
        Self::Badge {
            label: label.into(),
            tone,
        }
    }

    /// The text a reader would see, empty for [`Cell::Empty`].
    pub fn display(&self) -> &str {
        match self {
            Self::Text(text) | Self::Badge { label: text, .. } => text,
            Self::Empty => "",
        }
    }
}

/// Formatter over a resolved value and its row.
pub type FormatFn<T> = Arc<dyn Fn(Option<&Value>, &T) -> Cell + Send + Sync>;

/// Formatter deriving a cell from the whole row.
pub type CompositeFn<T> = Arc<dyn Fn(&T) -> Cell + Send + Sync>;

/// How a column turns a row into a cell.
pub enum ColumnRender<T> {
    /// The raw value at the column's path, coerced to text.
    Plain,
    /// A formatter applied to the value at the column's path.
    Formatted(FormatFn<T>),
    /// A formatter over the whole row; the column id need not be a path.
    Composite(CompositeFn<T>),
}

impl<T> Clone for ColumnRender<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Plain => Self::Plain,
            Self::Formatted(f) => Self::Formatted(Arc::clone(f)),
            Self::Composite(f) => Self::Composite(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for ColumnRender<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plain => "Plain",
            Self::Formatted(_) => "Formatted",
            Self::Composite(_) => "Composite",
        })
    }
}

/// How one field of `T` is displayed.
///
/// # Examples
/// ```
/// use wealthdesk::view::{Align, Column};
///
/// #[derive(serde::Serialize)]
/// struct Row { amount: u64 }
///
/// let column = Column::<Row>::plain("amount", "Amount").align(Align::Right);
/// assert!(column.sortable);
/// ```
#[derive(Debug, Clone)]
pub struct Column<T> {
    /// Property path, or a free key for composite columns.
    pub id: String,
    /// Header text.
    pub label: String,
    /// Whether header clicks sort by this column.
    pub sortable: bool,
    /// Minimum width hint in characters.
    pub min_width: Option<u16>,
    /// Maximum width hint in characters.
    pub max_width: Option<u16>,
    /// Cell alignment.
    pub align: Align,
    /// Rendering strategy.
    pub render: ColumnRender<T>,
}

impl<T> Column<T> {
    fn with_render(id: impl Into<String>, label: impl Into<String>, render: ColumnRender<T>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            sortable: true,
            min_width: None,
            max_width: None,
            align: Align::Left,
            render,
        }
    }

    /// Column showing the raw value at `id`.
    pub fn plain(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::with_render(id, label, ColumnRender::Plain)
    }

    /// Column formatting the value at `id`.
    pub fn formatted(
        id: impl Into<String>,
        label: impl Into<String>,
        format: impl Fn(Option<&Value>, &T) -> Cell + Send + Sync + 'static,
    ) -> Self {
        Self::with_render(id, label, ColumnRender::Formatted(Arc::new(format)))
    }

    /// Column derived from the whole row.
    pub fn composite(
        id: impl Into<String>,
        label: impl Into<String>,
        derive: impl Fn(&T) -> Cell + Send + Sync + 'static,
    ) -> Self {
        Self::with_render(id, label, ColumnRender::Composite(Arc::new(derive)))
    }

    /// Disable header sorting.
    #[must_use]
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Set the alignment.
    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Set width hints.
    #[must_use]
    pub fn width(mut self, min: Option<u16>, max: Option<u16>) -> Self {
        self.min_width = min;
        self.max_width = max;
        self
    }

    /// Whether the column reads a property path.
    pub fn reads_path(&self) -> bool {
        !matches!(self.render, ColumnRender::Composite(_))
    }

    /// Render the cell for `row`, whose serialised form is `json`.
    pub fn cell(&self, row: &T, json: &Value) -> Cell {
        match &self.render {
            ColumnRender::Plain => Cell::text(value_text(resolve_path(json, &self.id))),
            ColumnRender::Formatted(format) => format(resolve_path(json, &self.id), row),
            ColumnRender::Composite(derive) => derive(row),
        }
    }
}

/// Serialised form of a row, or null when it cannot be serialised.
pub(crate) fn row_json<T: Serialize>(row: &T) -> Value {
    serde_json::to_value(row).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    //! Coverage for cell rendering strategies.
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Row {
        first_name: String,
        last_name: String,
        amount: Option<u64>,
        active: bool,
    }

    fn row() -> Row {
        Row {
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            amount: None,
            active: true,
        }
    }

    #[rstest]
    #[case("firstName", Cell::Text("Asha".into()))]
    #[case("active", Cell::Text("true".into()))]
    #[case("amount", Cell::Empty)]
    #[case("nowhere", Cell::Empty)]
    fn plain_columns_coerce_values(#[case] id: &str, #[case] expected: Cell) {
        let row = row();
        let column = Column::<Row>::plain(id, "x");
        assert_eq!(column.cell(&row, &row_json(&row)), expected);
    }

    #[test]
    fn formatter_is_authoritative() {
        let row = row();
        let column = Column::<Row>::formatted("amount", "Amount", |value, _| {
            if value.is_none_or(Value::is_null) {
                Cell::text("0")
            } else {
                Cell::text("set")
            }
        });
        assert_eq!(column.cell(&row, &json!({"amount": null})), Cell::text("0"));
    }

    #[test]
    fn composite_columns_read_the_row() {
        let row = row();
        let column = Column::<Row>::composite("name", "Name", |r| {
            Cell::text(format!("{} {}", r.first_name, r.last_name))
        });
        assert!(!column.reads_path());
        assert_eq!(column.cell(&row, &Value::Null).display(), "Asha Rao");
    }
}
