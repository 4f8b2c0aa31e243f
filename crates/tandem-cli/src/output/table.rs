//! Aligned plain-text tables.

const COLUMN_GAP: &str = "  ";
const MIN_COLUMN: usize = 4;

#[derive(Clone, Copy, Debug, Default)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

/// Render rows under headers, each column padded to its widest cell.
///
/// Columns are shrunk, widest first, until the table fits `max_width`;
/// shrunk cells end with `…`.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(cell));
        }
    }
    if let Some(max_width) = options.max_width {
        shrink_to_fit(&mut widths, headers, max_width);
    }

    let header_cells: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
    let header_line = render_row(&header_cells, &widths, false);
    let divider = "-".repeat(display_width(&header_line));
    let mut lines = vec![header_line, divider];
    lines.extend(rows.iter().map(|row| render_row(row, &widths, options.color)));
    lines.join("\n")
}

fn render_row(cells: &[String], widths: &[usize], color: bool) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(index, &width)| {
            let cell = cells.get(index).map_or("-", String::as_str);
            let text = truncate(cell, width);
            let pad = " ".repeat(width.saturating_sub(display_width(&text)));
            let text = if color { colorize(&text) } else { text };
            if is_numeric(cell) {
                format!("{pad}{text}")
            } else {
                format!("{text}{pad}")
            }
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}

fn shrink_to_fit(widths: &mut [usize], headers: &[&str], max_width: usize) {
    let gaps = widths.len().saturating_sub(1) * COLUMN_GAP.len();
    while widths.iter().sum::<usize>() + gaps > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(index, width)| **width > display_width(headers[*index]).max(MIN_COLUMN))
            .max_by_key(|(_, width)| **width)
            .map(|(index, _)| index);
        let Some(index) = widest else {
            break;
        };
        widths[index] -= 1;
    }
}

fn display_width(text: &str) -> usize {
    text.chars().count()
}

fn truncate(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|ch| ch.is_ascii_digit())
}

/// Outcome and category words get a color; everything else stays plain.
fn colorize(text: &str) -> String {
    let code = match text {
        "match" => "32",
        "dynamic_noise" => "33",
        "mismatch" | "schema_change" | "data_update" => "31",
        _ => return text.to_string(),
    };
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect()
    }

    #[test]
    fn columns_align_and_numbers_right_align() {
        let table = render_table(
            &["session", "records"],
            &rows(&[&["test-set-0", "12"], &["s1", "3"]]),
            TableOptions::default(),
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "session     records");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "test-set-0       12");
        assert_eq!(lines[3], "s1                3");
    }

    #[test]
    fn wide_tables_are_truncated() {
        let long = "x".repeat(80);
        let table = render_table(
            &["path", "detail"],
            &rows(&[&["status", &long]]),
            TableOptions {
                max_width: Some(40),
                color: false,
            },
        );
        let row = table.lines().nth(2).unwrap();
        assert!(row.chars().count() <= 40, "{row}");
        assert!(row.ends_with('…'));
    }

    #[test]
    fn color_marks_categories_only() {
        assert_eq!(colorize("data_update"), "\u{1b}[31mdata_update\u{1b}[0m");
        assert_eq!(colorize("status"), "status");
    }
}
