use crate::RenderableReport;

const HEADER: [&str; 2] = ["REPO", "WARN"];

/// Borderless two-column table, one row per warning.
///
/// Columns are separated by a tab after padding the first column to its
/// widest cell. Returns an empty string when there are no warnings.
pub fn render_table(report: &RenderableReport) -> String {
    let rows: Vec<(&str, &str)> = report.rows().collect();
    if rows.is_empty() {
        return String::new();
    }

    let width = rows
        .iter()
        .map(|(repo, _)| repo.chars().count())
        .chain(std::iter::once(HEADER[0].len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (repo, warning) in std::iter::once((HEADER[0], HEADER[1])).chain(rows) {
        let line = format!("{repo:<width$}\t{warning}");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
