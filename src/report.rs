//! Output formatting for coverage summaries.

use std::fmt::Write;

use serde::Serialize;

use crate::model::{JobRef, Metrics};
use crate::summary::{CoverageSummary, Totals};

/// Label used for results that carry no job.
const UNNAMED_JOB: &str = "(unnamed)";

/// One row of the per-job table.
#[derive(Debug, Clone, Serialize)]
pub struct JobRow {
    pub job: String,
    #[serde(flatten)]
    pub metrics: Metrics,
}

/// Totals plus the per-job rows they were computed from.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub totals: Totals,
    pub jobs: Vec<JobRow>,
}

impl SummaryReport {
    #[must_use]
    pub fn from_summary(summary: &CoverageSummary) -> Self {
        let jobs = summary
            .results()
            .iter()
            .map(|r| JobRow {
                job: r.job().map_or(UNNAMED_JOB, JobRef::as_str).to_string(),
                metrics: *r.metrics(),
            })
            .collect();
        Self {
            totals: summary.totals(),
            jobs,
        }
    }

    /// Format using a specific formatter.
    #[must_use]
    pub fn format(&self, formatter: &dyn ReportFormatter) -> String {
        formatter.format(self)
    }
}

/// Trait for formatting summary reports.
pub trait ReportFormatter {
    /// Format the report to a string.
    fn format(&self, report: &SummaryReport) -> String;
}

/// Plain text formatter.
pub struct TextFormatter;

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &SummaryReport) -> String {
        let mut out = String::new();
        let t = &report.totals;

        if t.results == 0 {
            out.push_str("No coverage results.\n");
            return out;
        }

        writeln!(out, "Jobs:         {}", t.results).unwrap();
        writeln!(out, "Lines:        {:.1}%", t.line).unwrap();
        writeln!(out, "Methods:      {:.1}%", t.method).unwrap();
        writeln!(out, "Classes:      {:.1}%", t.class).unwrap();
        writeln!(out, "Branches:     {:.1}%", t.branch).unwrap();
        writeln!(out, "Instructions: {:.1}%", t.instruction).unwrap();
        writeln!(
            out,
            "Complexity:   {:.1} ({})",
            t.complexity, t.complexity_policy
        )
        .unwrap();
        out
    }
}

/// Markdown formatter.
pub struct MarkdownFormatter;

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, report: &SummaryReport) -> String {
        let mut md = String::new();
        let t = &report.totals;

        writeln!(md, "### Coverage Summary: {:.1}% lines\n", t.line).unwrap();

        if report.jobs.is_empty() {
            md.push_str("No coverage results.\n");
            return md;
        }

        md.push_str("| Job | Line | Method | Class | Branch | Instruction | Complexity |\n");
        md.push_str("|:----|-----:|-------:|------:|-------:|------------:|-----------:|\n");
        for row in &report.jobs {
            let m = &row.metrics;
            writeln!(
                md,
                "| {} | {:.1}% | {:.1}% | {:.1}% | {:.1}% | {:.1}% | {:.1} |",
                row.job, m.line, m.method, m.class, m.branch, m.instruction, m.complexity
            )
            .unwrap();
        }
        writeln!(
            md,
            "| **Total** | **{:.1}%** | **{:.1}%** | **{:.1}%** | **{:.1}%** | **{:.1}%** | **{:.1}** |",
            t.line, t.method, t.class, t.branch, t.instruction, t.complexity
        )
        .unwrap();

        md
    }
}

/// Pretty-printed JSON formatter.
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &SummaryReport) -> String {
        // Plain numbers and strings only; serialization cannot fail.
        let mut out = serde_json::to_string_pretty(report).unwrap_or_default();
        out.push('\n');
        out
    }
}
