use std::path::PathBuf;
use tempfile::TempDir;

/// Write `content` to a job document in a fresh temporary directory.
/// The caller must hold onto `TempDir` to keep the temp directory alive.
pub fn write_jobs(content: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.json");
    std::fs::write(&path, content).unwrap();
    (dir, path)
}
