//! Command handler functions for the covsum CLI.
//!
//! Each `cmd_*` function returns its output as a `String`, making them easy
//! to test without capturing stdout.

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::ingest;
use crate::report::{JsonFormatter, MarkdownFormatter, ReportFormatter, SummaryReport, TextFormatter};
use crate::summary::ComplexityPolicy;

/// Output style for the `summary` command.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Style {
    Text,
    Markdown,
    Json,
}

impl Style {
    fn formatter(self) -> &'static dyn ReportFormatter {
        match self {
            Style::Text => &TextFormatter,
            Style::Markdown => &MarkdownFormatter,
            Style::Json => &JsonFormatter,
        }
    }
}

pub fn cmd_summary(file: &Path, style: Style, policy: ComplexityPolicy) -> Result<String> {
    let summary = ingest::ingest(file, policy)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    Ok(SummaryReport::from_summary(&summary).format(style.formatter()))
}

pub fn cmd_jobs(file: &Path, sort_by_coverage: bool) -> Result<String> {
    let summary = ingest::ingest(file, ComplexityPolicy::default())
        .with_context(|| format!("Failed to load {}", file.display()))?;
    let mut rows = SummaryReport::from_summary(&summary).jobs;

    if rows.is_empty() {
        return Ok("No jobs in input.\n".to_string());
    }

    if sort_by_coverage {
        rows.sort_by(|a, b| a.metrics.line.total_cmp(&b.metrics.line));
    }

    let mut out = String::new();
    writeln!(
        out,
        "{:<30} {:>7} {:>7} {:>7} {:>7} {:>7} {:>10}",
        "JOB", "LINE", "METHOD", "CLASS", "BRANCH", "INSTR", "COMPLEXITY"
    )
    .unwrap();
    writeln!(out, "{}", "-".repeat(84)).unwrap();

    for row in &rows {
        let m = &row.metrics;
        writeln!(
            out,
            "{:<30} {:>6.1}% {:>6.1}% {:>6.1}% {:>6.1}% {:>6.1}% {:>10.1}",
            row.job, m.line, m.method, m.class, m.branch, m.instruction, m.complexity
        )
        .unwrap();
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_jobs(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("jobs.json");
        std::fs::write(
            &path,
            br#"{"jobs": [
                {"name": "core", "coverage": {"line": 90, "method": 80, "class": 100,
                                              "branch": {"covered": 3, "missed": 1},
                                              "instruction": 85, "complexity": 10}},
                {"name": "web", "coverage": {"line": 40, "method": 30, "class": 50,
                                             "branch": 25, "instruction": 35, "complexity": 4.5}},
                {"name": "docs"}
            ]}"#,
        )
        .unwrap();
        path
    }

    #[test]
    fn test_cmd_summary_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_jobs(&dir);

        let out = cmd_summary(&path, Style::Text, ComplexityPolicy::Sum).unwrap();

        assert!(out.contains("Jobs:         3"));
        // (90 + 40 + 0) / 3 = 43.33...
        assert!(out.contains("Lines:        43.3%"));
        assert!(out.contains("Branches:     33.3%"));
        assert!(out.contains("Complexity:   14.5 (sum)"));
    }

    #[test]
    fn test_cmd_summary_mean_complexity() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_jobs(&dir);

        let out = cmd_summary(&path, Style::Json, ComplexityPolicy::Mean).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        // 14.5 / 3 = 4.833...
        assert_eq!(value["totals"]["complexity"], 4.8);
        assert_eq!(value["totals"]["complexity_policy"], "mean");
    }

    #[test]
    fn test_cmd_summary_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_jobs(&dir);

        let out = cmd_summary(&path, Style::Markdown, ComplexityPolicy::Sum).unwrap();
        assert!(out.contains("| docs | 0.0% |"));
    }

    #[test]
    fn test_cmd_summary_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = cmd_summary(&dir.path().join("nope.json"), Style::Text, ComplexityPolicy::Sum)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to load"));
    }

    #[test]
    fn test_cmd_jobs() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_jobs(&dir);

        let out = cmd_jobs(&path, false).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("JOB"));
        assert!(lines[2].starts_with("core"));
        assert!(lines[2].contains("75.0%"));
        assert!(lines[4].starts_with("docs"));
    }

    #[test]
    fn test_cmd_jobs_sorted_by_coverage() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_jobs(&dir);

        let out = cmd_jobs(&path, true).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[2].starts_with("docs"));
        assert!(lines[3].starts_with("web"));
        assert!(lines[4].starts_with("core"));
    }

    #[test]
    fn test_cmd_jobs_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        std::fs::write(&path, b"[]").unwrap();

        assert_eq!(cmd_jobs(&path, false).unwrap(), "No jobs in input.\n");
    }
}
