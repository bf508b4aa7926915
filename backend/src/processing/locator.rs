use crate::model::{MediaRecord, PathMappingRule};
use crate::processing::map_path;
use crate::utils::PlexApi;
use indexmap::IndexMap;
use shared::error::{artifact_err, ExportError};
use shared::model::{LibraryKind, XML_ELEMENT_TRACK};

/// Local directory holding one item's files, with trailing `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLocation {
    pub dir: String,
    /// Remote path of the first media file inside `dir`, used for file name based naming.
    pub media_file: Option<String>,
}

fn parent_dir(file: &str) -> Option<&str> {
    file.rfind('/').map(|idx| &file[..=idx])
}

fn with_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

fn locate_movie(record: &MediaRecord, rules: &[PathMappingRule]) -> Vec<MediaLocation> {
    let mut dirs: IndexMap<&str, &str> = IndexMap::new();
    for file in record.part_files() {
        if let Some(dir) = parent_dir(file) {
            dirs.entry(dir).or_insert(file);
        }
    }
    dirs.into_iter()
        .map(|(dir, file)| MediaLocation {
            dir: map_path(dir, rules),
            media_file: Some(file.to_string()),
        })
        .collect()
}

fn locate_directory(record: &MediaRecord, rules: &[PathMappingRule]) -> Vec<MediaLocation> {
    record.location_paths().into_iter()
        .map(|path| MediaLocation {
            dir: map_path(&with_trailing_slash(path), rules),
            media_file: None,
        })
        .collect()
}

async fn locate_album<A: PlexApi>(api: &A, rating_key: &str, rules: &[PathMappingRule]) -> Result<Vec<MediaLocation>, ExportError> {
    let tracks = api.fetch_children(rating_key, XML_ELEMENT_TRACK).await?;
    let file = tracks.first()
        .map(|track| MediaRecord::new(track.clone()))
        .and_then(|track| track.first_part_file().map(ToString::to_string))
        .ok_or_else(|| artifact_err!("album {rating_key} has no track with a media file"))?;
    let dir = parent_dir(&file).ok_or_else(|| artifact_err!("can't determine album directory from {file}"))?;
    Ok(vec![MediaLocation {
        dir: map_path(dir, rules),
        media_file: None,
    }])
}

/// Local directories an item's artifacts are written to. Movies can span
/// several directories when multiple versions exist.
pub async fn locate_media<A: PlexApi>(api: &A, kind: LibraryKind, rating_key: &str,
                                      record: &MediaRecord, rules: &[PathMappingRule]) -> Result<Vec<MediaLocation>, ExportError> {
    let locations = match kind {
        LibraryKind::Movie => locate_movie(record, rules),
        LibraryKind::Show | LibraryKind::Artist => locate_directory(record, rules),
        LibraryKind::Albums => locate_album(api, rating_key, rules).await?,
    };
    if locations.is_empty() {
        return Err(artifact_err!("no media location found for {}", record.title().unwrap_or(rating_key)));
    }
    Ok(locations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_xml_document;

    fn record(xml: &str) -> MediaRecord {
        MediaRecord::new(parse_xml_document(xml.as_bytes()).unwrap().unwrap())
    }

    fn rules() -> Vec<PathMappingRule> {
        vec![PathMappingRule { remote_prefix: "/data".to_string(), local_prefix: "/mnt/nas".to_string() }]
    }

    #[test]
    fn test_movie_versions_deduplicated() {
        let rec = record(r#"<Video title="Heat">
            <Media><Part file="/data/movies/Heat/Heat.1080p.mkv"/></Media>
            <Media><Part file="/data/movies/Heat/Heat.720p.mkv"/></Media>
            <Media><Part file="/data/movies/Heat 4K/Heat.2160p.mkv"/></Media>
        </Video>"#);
        let locations = locate_movie(&rec, &rules());
        assert_eq!(locations, vec![
            MediaLocation { dir: "/mnt/nas/movies/Heat/".to_string(), media_file: Some("/data/movies/Heat/Heat.1080p.mkv".to_string()) },
            MediaLocation { dir: "/mnt/nas/movies/Heat 4K/".to_string(), media_file: Some("/data/movies/Heat 4K/Heat.2160p.mkv".to_string()) },
        ]);
    }

    #[test]
    fn test_show_location() {
        let rec = record(r#"<Directory title="Show"><Location path="/data/tv/Show"/></Directory>"#);
        let locations = locate_directory(&rec, &rules());
        assert_eq!(locations[0].dir, "/mnt/nas/tv/Show/");
        assert!(locations[0].media_file.is_none());
    }

    #[test]
    fn test_movie_without_parts() {
        let rec = record(r#"<Video title="Ghost"/>"#);
        assert!(locate_movie(&rec, &rules()).is_empty());
    }
}
