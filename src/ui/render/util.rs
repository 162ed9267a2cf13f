use lipgloss::Style;

// Fit a block to exactly `rows` lines, each padded out to `width` columns.
pub fn fit_block(lines: Vec<String>, width: usize, rows: usize) -> String {
    let pad = Style::new().width(width as i32);
    let mut out: Vec<String> = Vec::with_capacity(rows);
    for line in lines.into_iter().take(rows) {
        out.push(pad.render(&line));
    }
    while out.len() < rows {
        out.push(pad.render(""));
    }
    out.join("\n")
}
