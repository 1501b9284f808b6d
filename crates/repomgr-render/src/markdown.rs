use crate::RenderableReport;
use repomgr_types::Verdict;

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# repo-manager report\n\n");
    let verdict = match report.verdict {
        Verdict::Pass => "PASS",
        Verdict::Fail => "FAIL",
    };
    out.push_str(&format!(
        "- Verdict: **{}**\n- Repositories: {}\n- Warnings: {}\n\n",
        verdict,
        report.repos.len(),
        report.warnings_total()
    ));

    if report.warnings_total() == 0 {
        out.push_str("No warnings.\n");
        return out;
    }

    out.push_str("## Warnings\n");
    for repo in report.repos.iter().filter(|r| !r.warnings.is_empty()) {
        out.push_str(&format!("\n### {}\n\n", repo.name));
        for warning in &repo.warnings {
            out.push_str(&format!("- {warning}\n"));
        }
    }

    out
}
