//! Text rendering for the join view.

use staffdesk_core::{EmptySide, JoinView, JoinedRow};

const NO_DATA_MESSAGE: &str = "Please add data in both Employee and Department sections";

/// Renders the join view as an aligned text table, or a warning when a
/// side is empty.
pub fn render_table(view: &JoinView) -> String {
    match view {
        JoinView::NoData(side) => no_data_message(*side),
        JoinView::Rows(rows) if rows.is_empty() => {
            "No employee matches a department Deptno".to_string()
        }
        JoinView::Rows(rows) => table(rows),
    }
}

/// Renders joined rows as a JSON array. `NoData` never reaches here; callers
/// report it with `no_data_message` instead of printing `[]`.
pub fn render_json(rows: &[JoinedRow]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rows)
}

pub fn no_data_message(side: EmptySide) -> String {
    let detail = match side {
        EmptySide::Employees => "no employees recorded",
        EmptySide::Departments => "no departments recorded",
        EmptySide::Both => "no records yet",
    };
    format!("{NO_DATA_MESSAGE} ({detail})")
}

fn table(rows: &[JoinedRow]) -> String {
    let cells: Vec<[String; 6]> = rows.iter().map(JoinedRow::cells).collect();
    let mut widths = JoinedRow::COLUMNS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, JoinedRow::COLUMNS.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &cells {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
