#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Loader must not panic on any input, and neither may the totals.
    if let Ok(jobs) = covsum::ingest::parse_jobs(data) {
        let summary =
            covsum::ingest::summarize_jobs(&jobs, covsum::summary::ComplexityPolicy::Mean);
        let _ = summary.totals();
    }
});
