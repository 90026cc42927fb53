//! Plain-text rendering of a grid view for terminals.

use pagination::SortDirection;

use super::grid::{CheckState, GridBody, GridView, HeaderView};
use super::{Align, Cell};

const COLUMN_GAP: &str = "  ";

/// Render `view` as an aligned text table followed by its footer.
///
/// Column widths fit the widest cell, clamped to each header's width hints.
/// Badges render as their label in brackets.
///
/// # Examples
/// ```
/// use serde::Serialize;
/// use wealthdesk::view::{Column, DataGrid, GridConfig, render_grid_text};
///
/// #[derive(Clone, Serialize)]
/// struct Row { id: u32, name: &'static str }
///
/// let mut grid = DataGrid::new(GridConfig::new(vec![Column::plain("name", "Name")], "id"));
/// grid.set_data(vec![Row { id: 1, name: "Asha" }]);
/// assert!(render_grid_text(&grid.view()).contains("Asha"));
/// ```
pub fn render_grid_text(view: &GridView) -> String {
    let header_texts: Vec<String> = view.headers.iter().map(header_text).collect();
    let rows: Vec<Vec<String>> = match &view.body {
        GridBody::Rows { rows } => rows
            .iter()
            .map(|row| {
                let mut texts = Vec::with_capacity(row.cells.len() + 1);
                if view.select_all.is_some() {
                    texts.push(checkbox(row.selected).to_owned());
                }
                texts.extend(row.cells.iter().map(cell_text));
                texts
            })
            .collect(),
        GridBody::Empty { .. } => Vec::new(),
    };

    let mut headers = Vec::with_capacity(header_texts.len() + 1);
    let mut aligns = Vec::with_capacity(header_texts.len() + 1);
    let mut hints = Vec::with_capacity(header_texts.len() + 1);
    if let Some(state) = view.select_all {
        headers.push(select_all_text(state).to_owned());
        aligns.push(Align::Left);
        hints.push((None, None));
    }
    for (header, text) in view.headers.iter().zip(header_texts) {
        headers.push(text);
        aligns.push(header.align);
        hints.push((header.min_width, header.max_width));
    }

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let widest = rows
                .iter()
                .filter_map(|row| row.get(index))
                .map(|text| text.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0);
            let (min, max) = hints.get(index).copied().unwrap_or((None, None));
            clamp_width(widest, min, max)
        })
        .collect();

    let mut output = String::new();
    render_line(&mut output, &headers, &widths, &aligns);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    render_line(&mut output, &rule, &widths, &aligns);

    if view.loading {
        output.push_str("Loading...\n");
    } else if let GridBody::Empty { message, .. } = &view.body {
        output.push_str(message);
        output.push('\n');
    }
    for row in &rows {
        render_line(&mut output, row, &widths, &aligns);
    }

    if let Some(footer) = &view.footer {
        output.push('\n');
        output.push_str("Rows per page: ");
        output.push_str(&footer.per_page.to_string());
        output.push_str(COLUMN_GAP);
        output.push_str(&footer.range_label);
        output.push('\n');
    }
    output
}

fn clamp_width(widest: usize, min: Option<u16>, max: Option<u16>) -> usize {
    let floor = min.map_or(0, usize::from);
    let capped = max.map_or(widest, |max| widest.min(usize::from(max)));
    capped.max(floor)
}

fn header_text(header: &HeaderView) -> String {
    match header.sorted {
        Some(SortDirection::Asc) => format!("{} \u{2191}", header.label),
        Some(SortDirection::Desc) => format!("{} \u{2193}", header.label),
        None => header.label.clone(),
    }
}

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::Badge { label, .. } => format!("[{label}]"),
        other => other.display().to_owned(),
    }
}

const fn checkbox(selected: bool) -> &'static str {
    if selected { "[x]" } else { "[ ]" }
}

const fn select_all_text(state: CheckState) -> &'static str {
    match state {
        CheckState::Unchecked => "[ ]",
        CheckState::Indeterminate => "[-]",
        CheckState::Checked => "[x]",
    }
}

fn render_line(output: &mut String, texts: &[String], widths: &[usize], aligns: &[Align]) {
    let mut line = String::new();
    for (index, (text, width)) in texts.iter().zip(widths).enumerate() {
        if index > 0 {
            line.push_str(COLUMN_GAP);
        }
        let fitted = truncate(text, *width);
        let padding = width.saturating_sub(fitted.chars().count());
        let align = aligns.get(index).copied().unwrap_or(Align::Left);
        let (left, right) = match align {
            Align::Left => (0, padding),
            Align::Right => (padding, 0),
            Align::Center => (padding / 2, padding - padding / 2),
        };
        line.push_str(&" ".repeat(left));
        line.push_str(&fitted);
        line.push_str(&" ".repeat(right));
    }
    output.push_str(line.trim_end());
    output.push('\n');
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}\u{2026}")
}
