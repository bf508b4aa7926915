use crate::utils::{get_file_mtime, is_directory};
use std::path::Path;

/// What the local file system holds for one artifact target.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LocalFileState {
    pub target_dir_exists: bool,
    /// Modification time in whole epoch seconds, `None` when the file is missing.
    pub file_mtime: Option<i64>,
}

impl LocalFileState {
    pub async fn inspect(path: &Path) -> Self {
        let target_dir_exists = match path.parent() {
            Some(dir) => is_directory(dir).await,
            None => false,
        };
        let file_mtime = if target_dir_exists { get_file_mtime(path).await } else { None };
        Self { target_dir_exists, file_mtime }
    }

    pub const fn file_exists(&self) -> bool {
        self.file_mtime.is_some()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FreshnessDecision {
    NotExistTargetDir,
    DryRun { file_exists: bool },
    Create,
    Overwrite,
    Skip,
}

/// Decides what happens to one artifact. Checked in order: missing directory,
/// dry run, missing file, then remote `updated_at` against the file mtime.
pub const fn decide(state: &LocalFileState, remote_updated_at: i64, dry_run: bool, force_overwrite: bool) -> FreshnessDecision {
    if !state.target_dir_exists {
        return FreshnessDecision::NotExistTargetDir;
    }
    if dry_run {
        return FreshnessDecision::DryRun { file_exists: state.file_exists() };
    }
    match state.file_mtime {
        None => FreshnessDecision::Create,
        Some(mtime) if mtime < remote_updated_at || force_overwrite => FreshnessDecision::Overwrite,
        Some(_) => FreshnessDecision::Skip,
    }
}
