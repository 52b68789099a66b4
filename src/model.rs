//! Plain data types shared by the summary, the loader and the formatters.
//! Nothing here knows how results are combined; see [`crate::summary`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Compute a coverage rate, returning 0.0 when the total is zero.
#[must_use]
pub fn rate(covered: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64
    }
}

/// Opaque reference to the job that owns a summary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobRef(String);

impl JobRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The six coverage dimensions. All but `complexity` are percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub line: f64,
    pub method: f64,
    pub class: f64,
    pub branch: f64,
    pub instruction: f64,
    /// Complexity score (not a percentage).
    pub complexity: f64,
}

impl Metrics {
    pub fn new(
        line: f64,
        method: f64,
        class: f64,
        branch: f64,
        instruction: f64,
        complexity: f64,
    ) -> Self {
        Self {
            line,
            method,
            class,
            branch,
            instruction,
            complexity,
        }
    }

    /// Field-wise sum.
    pub fn accumulate(&mut self, other: &Metrics) {
        self.line += other.line;
        self.method += other.method;
        self.class += other.class;
        self.branch += other.branch;
        self.instruction += other.instruction;
        self.complexity += other.complexity;
    }

    /// `(name, value)` pairs in display order.
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("line", self.line),
            ("method", self.method),
            ("class", self.class),
            ("branch", self.branch),
            ("instruction", self.instruction),
            ("complexity", self.complexity),
        ]
    }
}

/// A single metric as supplied by a collaborator: either a ready-made
/// percentage or the raw counter pair it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Percent(f64),
    Counter { covered: u64, missed: u64 },
}

impl MetricValue {
    /// Percentage in [0,100] for counters; percentages pass through untouched.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        match *self {
            MetricValue::Percent(p) => p,
            MetricValue::Counter { covered, missed } => {
                rate(covered, covered.saturating_add(missed)) * 100.0
            }
        }
    }
}

impl Default for MetricValue {
    fn default() -> Self {
        MetricValue::Percent(0.0)
    }
}

/// Input shape of one job's coverage block. Missing metrics default to zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetricsInput {
    pub line: MetricValue,
    pub method: MetricValue,
    pub class: MetricValue,
    pub branch: MetricValue,
    pub instruction: MetricValue,
    #[serde(alias = "complexity_score")]
    pub complexity: f64,
}

impl From<&MetricsInput> for Metrics {
    fn from(input: &MetricsInput) -> Self {
        Metrics {
            line: input.line.percentage(),
            method: input.method.percentage(),
            class: input.class.percentage(),
            branch: input.branch.percentage(),
            instruction: input.instruction.percentage(),
            complexity: input.complexity,
        }
    }
}

/// One job as read from an input document. `coverage` is `None` when the
/// job has no recorded coverage yet.
#[derive(Debug, Clone, Deserialize)]
pub struct JobCoverage {
    pub name: String,
    #[serde(default)]
    pub coverage: Option<MetricsInput>,
}

impl JobCoverage {
    /// Metrics for this job; all zero when nothing was recorded.
    #[must_use]
    pub fn metrics(&self) -> Metrics {
        self.coverage.as_ref().map(Metrics::from).unwrap_or_default()
    }
}
