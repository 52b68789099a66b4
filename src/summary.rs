//! The coverage summary: a tree of per-job results folded into running sums.
//!
//! A summary's metrics double as its own values (a leaf) and as the running
//! sum of every result added to it. Totals divide that sum by the number of
//! results, so a summary with no results reports 0.0 across the board.

use serde::Serialize;

use crate::error::CovsumError;
use crate::model::{JobRef, Metrics};
use crate::rounding::round_half_even;

/// Decimal places kept in every reported total.
pub const TOTAL_SCALE: usize = 1;

/// How the complexity score is combined across results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityPolicy {
    /// Report the accumulated score as-is.
    #[default]
    Sum,
    /// Divide by the result count like the percentage metrics.
    Mean,
}

impl ComplexityPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityPolicy::Sum => "sum",
            ComplexityPolicy::Mean => "mean",
        }
    }
}

impl std::str::FromStr for ComplexityPolicy {
    type Err = CovsumError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sum" => Ok(ComplexityPolicy::Sum),
            "mean" => Ok(ComplexityPolicy::Mean),
            _ => Err(CovsumError::Parse(format!(
                "Unknown complexity policy: '{}'. Supported: sum, mean",
                s
            ))),
        }
    }
}

impl std::fmt::Display for ComplexityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rounded totals of a summary, ready for a formatter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub results: usize,
    pub line: f64,
    pub method: f64,
    pub class: f64,
    pub branch: f64,
    pub instruction: f64,
    pub complexity: f64,
    pub complexity_policy: ComplexityPolicy,
}

impl Totals {
    /// The six totals as a [`Metrics`] value.
    #[must_use]
    pub fn metrics(&self) -> Metrics {
        Metrics::new(
            self.line,
            self.method,
            self.class,
            self.branch,
            self.instruction,
            self.complexity,
        )
    }
}

/// Coverage for one job, possibly combined from child results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageSummary {
    job: Option<JobRef>,
    metrics: Metrics,
    results: Vec<CoverageSummary>,
    complexity_policy: ComplexityPolicy,
}

impl CoverageSummary {
    /// All metrics zero, no job, no results.
    pub fn new() -> Self {
        Self::default()
    }

    /// A summary owned by `job` with the given metrics stored verbatim.
    /// Values are not range-checked.
    pub fn with_metrics(job: JobRef, metrics: Metrics) -> Self {
        Self {
            job: Some(job),
            metrics,
            ..Default::default()
        }
    }

    /// Fold `result` into this summary: its metrics are added to ours and
    /// the result itself is appended to [`results`](Self::results).
    ///
    /// The result is moved in, so the recorded contribution cannot change
    /// afterwards. Returns `self` so calls can be chained.
    pub fn add_result(&mut self, result: CoverageSummary) -> &mut Self {
        self.metrics.accumulate(&result.metrics);
        tracing::debug!(
            job = result.job.as_ref().map(JobRef::as_str),
            line = result.metrics.line,
            count = self.results.len() + 1,
            "added coverage result"
        );
        self.results.push(result);
        self
    }

    pub fn job(&self) -> Option<&JobRef> {
        self.job.as_ref()
    }

    pub fn set_job(&mut self, job: Option<JobRef>) {
        self.job = job;
    }

    /// Stored metrics: own values, or running sums once results were added.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut Metrics {
        &mut self.metrics
    }

    pub fn set_line_coverage(&mut self, value: f64) {
        self.metrics.line = value;
    }

    pub fn set_method_coverage(&mut self, value: f64) {
        self.metrics.method = value;
    }

    pub fn set_class_coverage(&mut self, value: f64) {
        self.metrics.class = value;
    }

    pub fn set_branch_coverage(&mut self, value: f64) {
        self.metrics.branch = value;
    }

    pub fn set_instruction_coverage(&mut self, value: f64) {
        self.metrics.instruction = value;
    }

    pub fn set_complexity_score(&mut self, value: f64) {
        self.metrics.complexity = value;
    }

    /// Results added so far, in insertion order.
    pub fn results(&self) -> &[CoverageSummary] {
        &self.results
    }

    pub fn complexity_policy(&self) -> ComplexityPolicy {
        self.complexity_policy
    }

    pub fn set_complexity_policy(&mut self, policy: ComplexityPolicy) {
        self.complexity_policy = policy;
    }

    #[must_use]
    pub fn with_complexity_policy(mut self, policy: ComplexityPolicy) -> Self {
        self.complexity_policy = policy;
        self
    }

    /// Sum divided by the result count, rounded. 0.0 with no results.
    fn mean_of(&self, sum: f64) -> f64 {
        if self.results.is_empty() {
            0.0
        } else {
            round_half_even(sum / self.results.len() as f64, TOTAL_SCALE)
        }
    }

    #[must_use]
    pub fn total_line(&self) -> f64 {
        self.mean_of(self.metrics.line)
    }

    #[must_use]
    pub fn total_method(&self) -> f64 {
        self.mean_of(self.metrics.method)
    }

    #[must_use]
    pub fn total_class(&self) -> f64 {
        self.mean_of(self.metrics.class)
    }

    #[must_use]
    pub fn total_branch(&self) -> f64 {
        self.mean_of(self.metrics.branch)
    }

    #[must_use]
    pub fn total_instruction(&self) -> f64 {
        self.mean_of(self.metrics.instruction)
    }

    /// Complexity total according to the summary's [`ComplexityPolicy`].
    #[must_use]
    pub fn total_complexity(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        match self.complexity_policy {
            ComplexityPolicy::Sum => round_half_even(self.metrics.complexity, TOTAL_SCALE),
            ComplexityPolicy::Mean => self.mean_of(self.metrics.complexity),
        }
    }

    #[must_use]
    pub fn totals(&self) -> Totals {
        Totals {
            results: self.results.len(),
            line: self.total_line(),
            method: self.total_method(),
            class: self.total_class(),
            branch: self.total_branch(),
            instruction: self.total_instruction(),
            complexity: self.total_complexity(),
            complexity_policy: self.complexity_policy,
        }
    }
}
