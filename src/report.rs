//! Summary table rendering.
//!
//! The table is drawn with ratatui's `Table` widget into an off-screen `Buffer`
//! sized to fit its content, then flattened to plain text so it can go to any
//! writer, terminal or not.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Row, Table, Widget};

use crate::labels::StatusLabels;
use crate::stats::StatusCount;

const HEADER: [&str; 3] = ["(index)", "statusCode", "count"];
const COLUMN_SPACING: u16 = 3;

/// One printed line of the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub label: String,
    pub status_code: u16,
    pub count: usize,
}

impl ReportRow {
    fn cells(&self) -> [String; 3] {
        [
            self.label.clone(),
            self.status_code.to_string(),
            self.count.to_string(),
        ]
    }
}

/// Keep only labelled codes, in the count's iteration order.
pub fn rows(counts: &StatusCount, labels: &StatusLabels) -> Vec<ReportRow> {
    counts
        .iter()
        .filter_map(|(status_code, count)| {
            let Some(label) = labels.get(status_code) else {
                tracing::debug!(status_code, count, "status code has no label, not reported");
                return None;
            };
            Some(ReportRow {
                label: label.to_string(),
                status_code,
                count,
            })
        })
        .collect()
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn cell(text: String, column: usize) -> Cell<'static> {
    // Numeric columns read better right-aligned.
    let line = if column == 0 {
        Line::from(text)
    } else {
        Line::from(text).alignment(Alignment::Right)
    };
    Cell::from(line)
}

fn table_row(cells: [String; 3]) -> Row<'static> {
    Row::new(cells.into_iter().enumerate().map(|(i, text)| cell(text, i)))
}

/// Render `rows` as a bordered table titled `title`. Always ends with a newline.
pub fn render(title: &str, rows: &[ReportRow]) -> String {
    let body: Vec<[String; 3]> = rows.iter().map(ReportRow::cells).collect();

    let mut widths = HEADER.map(|h| to_u16(Line::from(h).width()));
    for row in &body {
        for (w, text) in widths.iter_mut().zip(row) {
            *w = (*w).max(to_u16(Line::from(text.as_str()).width()));
        }
    }

    let title = format!(" {title} ");
    let columns_width = widths.iter().sum::<u16>() + COLUMN_SPACING * (HEADER.len() as u16 - 1);
    let title_width = to_u16(Line::from(title.as_str()).width()) + 2;
    if title_width > columns_width + 2 {
        widths[2] += title_width - columns_width - 2;
    }
    let width = columns_width.max(title_width.saturating_sub(2)) + 2;
    let height = to_u16(body.len()) + 3;

    let table_rows = body.into_iter().map(table_row);
    let table = Table::new(table_rows, widths.map(Constraint::Length))
        .header(table_row(HEADER.map(String::from)))
        .column_spacing(COLUMN_SPACING)
        .block(Block::default().borders(Borders::ALL).title(title));

    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    table.render(area, &mut buf);
    buffer_to_string(&buf)
}

fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        let mut x = area.left();
        while x < area.right() {
            let symbol = buf[(x, y)].symbol();
            line.push_str(symbol);
            // A wide symbol owns the filler cells after it.
            x += to_u16(Line::from(symbol).width()).max(1);
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::LogRecord;
    use crate::stats::aggregate;

    fn counts(codes: &[u16]) -> StatusCount {
        aggregate(codes.iter().map(|&status_code| LogRecord {
            timestamp: "2024-01-01 10:00 +00:00".into(),
            endpoint: "GET".into(),
            status_code,
        }))
    }

    fn data_lines(table: &str) -> Vec<&str> {
        // top border, header, then data rows, bottom border
        let lines: Vec<&str> = table.lines().collect();
        lines[2..lines.len() - 1].to_vec()
    }

    #[test]
    fn unlabelled_codes_are_dropped() {
        let counts = counts(&[200, 200, 200, 200, 200, 999, 999]);
        let rows = rows(&counts, &StatusLabels::default());
        assert_eq!(
            rows,
            vec![ReportRow {
                label: "OK".into(),
                status_code: 200,
                count: 5,
            }]
        );

        let table = render("app.log", &rows);
        let data = data_lines(&table);
        assert_eq!(data.len(), 1);
        let fields: Vec<&str> = data[0]
            .trim_matches(|c: char| c == '│' || c.is_whitespace())
            .split_whitespace()
            .collect();
        assert_eq!(fields, vec!["OK", "200", "5"]);
        assert!(!table.contains("999"));
    }

    #[test]
    fn rows_follow_code_order() {
        let counts = counts(&[500, 404, 200, 304, 200]);
        let rows = rows(&counts, &StatusLabels::default());
        let codes: Vec<u16> = rows.iter().map(|r| r.status_code).collect();
        assert_eq!(codes, vec![200, 304, 404, 500]);

        let table = render("app.log", &rows);
        let data = data_lines(&table);
        assert!(data[1].contains("Not Changed"));
        assert!(data[3].contains("Server Error"));
    }

    #[test]
    fn empty_counts_render_header_only() {
        let rows = rows(&StatusCount::default(), &StatusLabels::default());
        assert!(rows.is_empty());

        let table = render("empty.log", &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("empty.log"));
        for h in HEADER {
            assert!(lines[1].contains(h), "{table}");
        }
    }

    fn display_widths(table: &str) -> Vec<usize> {
        table.lines().map(|l| Line::from(l).width()).collect()
    }

    #[test]
    fn lines_share_one_width() {
        let counts = counts(&[200, 404, 404]);
        let rows = rows(&counts, &StatusLabels::default());
        let table = render("a/very/long/path/to/some/access.log", &rows);
        let widths = display_widths(&table);
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{table}");
        assert!(table.contains("a/very/long/path/to/some/access.log"));
    }

    #[test]
    fn wide_characters_keep_columns_aligned() {
        let mut labels = StatusLabels::default();
        labels.insert(200, "成功");
        let rows = rows(&counts(&[200, 404]), &labels);

        for title in ["日志/访问.log", "x.log"] {
            let table = render(title, &rows);
            let widths = display_widths(&table);
            assert!(widths.windows(2).all(|w| w[0] == w[1]), "{table}");
            assert!(table.contains(title), "{table}");

            let data = data_lines(&table);
            let fields: Vec<&str> = data[0]
                .trim_matches(|c: char| c == '│' || c.is_whitespace())
                .split_whitespace()
                .collect();
            assert_eq!(fields, vec!["成功", "200", "1"]);
        }
    }
}
