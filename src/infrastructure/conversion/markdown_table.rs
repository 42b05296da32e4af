/// Renders rows as a GitHub-flavoured Markdown table; the first row is the
/// header. Short rows are padded to the widest row.
pub fn render_table(rows: &[Vec<String>]) -> String {
    let Some((header, body)) = rows.split_first() else {
        return String::new();
    };

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    push_row(&mut out, header, width);
    out.push('|');
    for _ in 0..width {
        out.push_str(" --- |");
    }
    out.push('\n');
    for row in body {
        push_row(&mut out, row, width);
    }

    out.truncate(out.trim_end().len());
    out
}

fn push_row(out: &mut String, row: &[String], width: usize) {
    out.push('|');
    for index in 0..width {
        let cell = row.get(index).map(String::as_str).unwrap_or_default();
        out.push(' ');
        out.push_str(&escape_cell(cell));
        out.push_str(" |");
    }
    out.push('\n');
}

fn escape_cell(cell: &str) -> String {
    cell.trim()
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}
