//! Fixed-width grid rendering of tables.
//!
//! The layout matches pandas' `DataFrame.to_string()` for a frame of strings
//! with default integer labels:
//!
//! ```text
//!       0    1
//! 0  Item  Qty
//! 1   Pen    2
//! ```

use crate::model::Table;

const EMPTY_GRID: &str = "Empty DataFrame\nColumns: []\nIndex: []";

/// Render a table as a labelled fixed-width grid.
///
/// Row labels are left-aligned, each value column is right-aligned to the
/// widest of its label and its values (values carry one leading space), and
/// columns are separated by a single space.
pub fn render_grid(table: &Table) -> String {
    if table.is_empty() {
        return EMPTY_GRID.to_string();
    }

    let row_labels: Vec<String> = (0..table.row_count()).map(|i| i.to_string()).collect();
    let label_width = row_labels.iter().map(|l| width(l)).max().unwrap_or(0);

    let mut columns: Vec<Vec<String>> = Vec::with_capacity(table.column_count());
    for c in 0..table.column_count() {
        let header = c.to_string();
        let values: Vec<String> = table
            .rows
            .iter()
            .map(|row| format!(" {}", row.get(c).map(String::as_str).unwrap_or("")))
            .collect();
        let column_width = values
            .iter()
            .map(|v| width(v))
            .chain(std::iter::once(width(&header)))
            .max()
            .unwrap_or(0);

        let mut column = Vec::with_capacity(values.len() + 1);
        column.push(pad_left(&header, column_width));
        column.extend(values.iter().map(|v| pad_left(v, column_width)));
        columns.push(column);
    }

    let mut lines = Vec::with_capacity(table.row_count() + 1);
    for line_index in 0..=table.row_count() {
        let label = if line_index == 0 {
            ""
        } else {
            row_labels[line_index - 1].as_str()
        };
        let mut line = pad_right(label, label_width);
        for column in &columns {
            line.push(' ');
            line.push_str(&column[line_index]);
        }
        lines.push(line);
    }

    lines.join("\n")
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad_left(s: &str, to: usize) -> String {
    format!("{}{}", " ".repeat(to.saturating_sub(width(s))), s)
}

fn pad_right(s: &str, to: usize) -> String {
    format!("{}{}", s, " ".repeat(to.saturating_sub(width(s))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_grid_layout() {
        let table = Table::from_rows([["a", "bb"], ["ccc", ""]]);
        let expected = ["     0   1", "0    a  bb", "1  ccc    "].join("\n");
        assert_eq!(render_grid(&table), expected);
    }

    #[test]
    fn test_render_grid_header_wider_than_values() {
        let rows: Vec<Vec<String>> = (0..11).map(|i| vec![i.to_string()]).collect();
        let table = Table::from_rows(rows);
        let rendered = render_grid(&table);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "     0");
        assert_eq!(lines[1], "0    0");
        assert_eq!(lines[11], "10  10");
    }

    #[test]
    fn test_render_empty_grid() {
        assert_eq!(
            render_grid(&Table::new()),
            "Empty DataFrame\nColumns: []\nIndex: []"
        );
    }
}
