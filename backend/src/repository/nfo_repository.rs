use crate::model::NfoDocument;
use crate::utils::write_file_or_cleanup;
use shared::error::{artifact_err, ExportError};
use std::path::Path;

/// Serializes the document and writes it to `path`. A failed write removes the partial file.
pub async fn write_nfo(path: &Path, doc: &NfoDocument) -> Result<(), ExportError> {
    let content = doc.to_bytes()
        .map_err(|err| artifact_err!("Failed to serialize {}: {err}", path.display()))?;
    write_file_or_cleanup(path, &content).await
        .map_err(|err| artifact_err!("Failed to write {}: {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NfoElement;

    #[tokio::test]
    async fn test_write_nfo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tvshow.nfo");
        let mut doc = NfoDocument::new("tvshow");
        doc.push(NfoElement::new("title", "Dark"));
        write_nfo(&path, &doc).await.unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<title>Dark</title>"));
        assert!(content.trim_end().ends_with("</tvshow>"));
    }

    #[tokio::test]
    async fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone").join("movie.nfo");
        let err = write_nfo(&path, &NfoDocument::new("movie")).await.unwrap_err();
        assert!(!err.is_fatal());
        assert!(!path.exists());
    }
}
