use crate::model::TablePreview;

pub const DEFAULT_PREVIEW_ROWS: usize = 20;

/// Header plus up to `max_rows` data rows, each fitted to the header width.
pub fn build_preview(rows: &[Vec<String>], max_rows: usize) -> Option<TablePreview> {
    let header = rows.first()?.clone();
    let width = header.len();

    let body = rows
        .iter()
        .skip(1)
        .take(max_rows)
        .map(|row| {
            (0..width)
                .map(|idx| row.get(idx).cloned().unwrap_or_default())
                .collect::<Vec<String>>()
        })
        .collect::<Vec<Vec<String>>>();

    Some(TablePreview {
        header,
        rows: body,
        total_rows: rows.len() - 1,
    })
}

pub fn preview_to_markdown(preview: &TablePreview) -> String {
    let width = preview.header.len().max(1);
    let mut lines = Vec::<String>::with_capacity(preview.rows.len() + 2);

    lines.push(markdown_row(&preview.header, width));
    lines.push(format!(
        "| {} |",
        (0..width).map(|_| "---").collect::<Vec<&str>>().join(" | ")
    ));
    for row in &preview.rows {
        lines.push(markdown_row(row, width));
    }

    lines.join("\n")
}

fn markdown_row(cells: &[String], width: usize) -> String {
    let cells = (0..width)
        .map(|idx| cells.get(idx).map(|cell| escape_markdown_cell(cell)).unwrap_or_default())
        .collect::<Vec<String>>();
    format!("| {} |", cells.join(" | "))
}

fn escape_markdown_cell(value: &str) -> String {
    value
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}
