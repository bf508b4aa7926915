use crate::model::PathMappingRule;
use crate::processing::map_path;
use shared::model::{LibraryKind, NamingMode};
use std::path::{Path, PathBuf};

const POSTER_FILE: &str = "poster.jpg";
const FANART_FILE: &str = "fanart.jpg";
const SEASON_ALL_EPISODES: &str = "All episodes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPaths {
    pub nfo: PathBuf,
    pub poster: PathBuf,
    pub fanart: PathBuf,
}

/// Makes a title usable as file name.
pub fn sanitize_filename(title: &str) -> String {
    let replaced = title.replace(": ", " - ");
    let mut result = String::with_capacity(replaced.len());
    for c in replaced.chars() {
        match c {
            ':' | '/' | '\\' | '*' | '<' | '>' | '|' => result.push('-'),
            '?' | '"' => {}
            _ => result.push(c),
        }
    }
    result.trim_end_matches('.').to_string()
}

fn file_stem(media_file: &str) -> Option<String> {
    let name = &media_file[media_file.rfind('/').map_or(0, |idx| idx + 1)..];
    let stem = match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    };
    if stem.is_empty() { None } else { Some(stem.to_string()) }
}

/// Base name for a movie artifact, `None` selects the fixed names.
fn movie_base_name(mode: NamingMode, title: &str, media_file: Option<&str>) -> Option<String> {
    match mode {
        NamingMode::Default => None,
        NamingMode::Title => Some(sanitize_filename(title)).filter(|t| !t.is_empty()),
        NamingMode::Filename => media_file.and_then(file_stem),
    }
}

pub fn resolve_target_paths(kind: LibraryKind, nfo_mode: NamingMode, image_mode: NamingMode,
                            media_dir: &str, title: &str, media_file: Option<&str>) -> TargetPaths {
    let dir = Path::new(media_dir);
    let nfo_name = match kind {
        LibraryKind::Artist => "artist.nfo".to_string(),
        LibraryKind::Albums => "album.nfo".to_string(),
        LibraryKind::Movie => movie_base_name(nfo_mode, title, media_file)
            .map_or_else(|| format!("{}.nfo", kind.root_tag()), |name| format!("{name}.nfo")),
        LibraryKind::Show => format!("{}.nfo", kind.root_tag()),
    };
    let (poster_name, fanart_name) = match kind {
        LibraryKind::Movie => movie_base_name(image_mode, title, media_file)
            .map_or_else(|| (POSTER_FILE.to_string(), FANART_FILE.to_string()),
                         |name| (format!("{name}_poster.jpg"), format!("{name}_fanart.jpg"))),
        _ => (POSTER_FILE.to_string(), FANART_FILE.to_string()),
    };
    TargetPaths {
        nfo: dir.join(nfo_name),
        poster: dir.join(poster_name),
        fanart: dir.join(fanart_name),
    }
}

/// File name of a season poster, `None` for entries that get no poster.
pub fn season_cover_name(season_title: Option<&str>) -> Option<String> {
    let title = season_title.filter(|t| !t.is_empty() && *t != SEASON_ALL_EPISODES)?;
    let slug = title.to_lowercase().replace(' ', "");
    Some(match slug.as_str() {
        "specials" => "season-specials-cover.jpg".to_string(),
        "miniseries" => "season1-cover.jpg".to_string(),
        _ => format!("{slug}-cover.jpg"),
    })
}

/// The episode NFO sits next to the episode's media file.
pub fn episode_nfo_path(media_file: &str, rules: &[PathMappingRule]) -> PathBuf {
    let name_start = media_file.rfind('/').map_or(0, |idx| idx + 1);
    let without_ext = match media_file[name_start..].rfind('.') {
        Some(idx) => &media_file[..name_start + idx],
        None => media_file,
    };
    PathBuf::from(map_path(&format!("{without_ext}.nfo"), rules))
}
