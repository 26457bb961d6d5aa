//! Line-aligned text comparison for test failure messages.

/// Reports lines that differ between `left` and `right`, aligned by index.
///
/// Lines present in both with different content are marked `!!!`; lines only
/// in `left` are marked `+++` and lines only in `right` `---`. Tabs count as
/// two spaces so columns line up. Equal texts give an empty report.
pub fn diff(left: &str, right: &str) -> String {
    let left = split_lines(left);
    let right = split_lines(right);
    let left_width = widest(&left);
    let right_width = widest(&right);

    let mut report = Vec::new();
    for idx in 0..left.len().max(right.len()) {
        match (left.get(idx), right.get(idx)) {
            (Some(a), Some(b)) if a != b => {
                report.push(format!("\t!!! {a:<left_width$} ! {b:<right_width$} !!!"));
            }
            (Some(a), None) => {
                report.push(format!("\t+++ {a:<left_width$} + {:<right_width$} +++", ""));
            }
            (None, Some(b)) => {
                report.push(format!("\t--- {:<left_width$} - {b:<right_width$} ---", ""));
            }
            _ => {}
        }
    }
    report.join("\n")
}

fn split_lines(text: &str) -> Vec<String> {
    text.trim()
        .replace('\t', "  ")
        .split('\n')
        .map(str::to_string)
        .collect()
}

fn widest(lines: &[String]) -> usize {
    lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
}
