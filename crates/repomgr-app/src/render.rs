//! Report rendering and output.

use crate::report::{serialize_report, to_renderable};
use anyhow::Context;
use camino::Utf8Path;
use repomgr_types::RunReport;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// `REPO`/`WARN` table; empty when there are no warnings.
    #[default]
    Table,
    Markdown,
    Json,
}

impl ReportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportFormat::Table => "table",
            ReportFormat::Markdown => "markdown",
            ReportFormat::Json => "json",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(ReportFormat::Table),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            other => anyhow::bail!("unknown format: {other} (expected table|markdown|json)"),
        }
    }
}

pub fn render_report(report: &RunReport, format: ReportFormat) -> anyhow::Result<String> {
    match format {
        ReportFormat::Table => Ok(repomgr_render::render_table(&to_renderable(report))),
        ReportFormat::Markdown => Ok(repomgr_render::render_markdown(&to_renderable(report))),
        ReportFormat::Json => {
            let bytes = serialize_report(report)?;
            String::from_utf8(bytes).context("run report is not UTF-8")
        }
    }
}

/// Write `text` to `path`, creating parent directories.
pub fn write_text(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory `{parent}`"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write `{path}`"))
}
