use filetime::FileTime;
use log::debug;
use std::path::Path;

pub async fn is_directory(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok_and(|meta| meta.is_dir())
}

/// Modification time of a regular file truncated to whole epoch seconds.
pub async fn get_file_mtime(path: &Path) -> Option<i64> {
    let meta = tokio::fs::metadata(path).await.ok()?;
    if meta.is_file() {
        Some(FileTime::from_last_modification_time(&meta).unix_seconds())
    } else {
        None
    }
}

/// Writes `content` to `path`. A failed write never leaves a partial file behind.
pub async fn write_file_or_cleanup(path: &Path, content: &[u8]) -> std::io::Result<()> {
    if let Err(err) = tokio::fs::write(path, content).await {
        remove_incomplete_file(path).await;
        return Err(err);
    }
    Ok(())
}

pub async fn remove_incomplete_file(path: &Path) {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        match tokio::fs::remove_file(path).await {
            Ok(()) => debug!("[CLEANUP] Incomplete file at {} has been removed", path.display()),
            Err(err) => debug!("[CLEANUP] Failed to remove incomplete file at {}: {err}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filetime::set_file_mtime;

    #[tokio::test]
    async fn test_file_state() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("poster.jpg");
        assert!(is_directory(dir.path()).await);
        assert!(!is_directory(&file).await);
        assert_eq!(get_file_mtime(&file).await, None);

        write_file_or_cleanup(&file, b"jpeg").await.unwrap();
        set_file_mtime(&file, FileTime::from_unix_time(1_700_000_000, 500)).unwrap();
        assert_eq!(get_file_mtime(&file).await, Some(1_700_000_000));
        assert_eq!(get_file_mtime(dir.path()).await, None);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("missing").join("movie.nfo");
        assert!(write_file_or_cleanup(&file, b"<movie/>").await.is_err());
        assert!(!file.exists());
    }
}
