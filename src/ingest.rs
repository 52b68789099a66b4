use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::model::{JobCoverage, JobRef};
use crate::summary::{ComplexityPolicy, CoverageSummary};

/// Either `{"jobs": [...]}` or a bare array of jobs.
#[derive(Deserialize)]
#[serde(untagged)]
enum JobsDocument {
    Wrapped { jobs: Vec<JobCoverage> },
    Bare(Vec<JobCoverage>),
}

/// Parse a JSON job document.
pub fn parse_jobs(input: &[u8]) -> Result<Vec<JobCoverage>> {
    let doc: JobsDocument = serde_json::from_slice(input)?;
    let jobs = match doc {
        JobsDocument::Wrapped { jobs } | JobsDocument::Bare(jobs) => jobs,
    };

    for job in &jobs {
        for (metric, value) in job.metrics().entries() {
            if !value.is_finite() || value < 0.0 {
                tracing::warn!(job = %job.name, metric, value, "suspicious coverage value");
            }
        }
    }
    Ok(jobs)
}

/// Fold every job into a fresh summary, one result per job in input order.
/// Jobs without recorded coverage contribute zeros.
pub fn summarize_jobs(jobs: &[JobCoverage], policy: ComplexityPolicy) -> CoverageSummary {
    let mut summary = CoverageSummary::new().with_complexity_policy(policy);
    for job in jobs {
        if job.coverage.is_none() {
            tracing::debug!(job = %job.name, "no coverage recorded, counting as zero");
        }
        summary.add_result(CoverageSummary::with_metrics(
            JobRef::new(job.name.clone()),
            job.metrics(),
        ));
    }
    summary
}

/// Read a job document from disk and summarize it.
pub fn ingest(file_path: &Path, policy: ComplexityPolicy) -> Result<CoverageSummary> {
    let content = std::fs::read(file_path)?;
    let jobs = parse_jobs(&content)?;
    tracing::info!(
        file = %file_path.display(),
        jobs = jobs.len(),
        policy = policy.as_str(),
        "loaded job coverage"
    );
    Ok(summarize_jobs(&jobs, policy))
}
