use crate::model::{LibraryDescriptor, LibraryEntry, SectionInfo};
use log::warn;
use shared::error::{config_err_res, ExportError};
use shared::model::{LibraryKind, SECTION_TYPE_ARTIST};
use shared::utils::WILDCARD_LIBRARY;

/// Which root the next music section without explicit kind is listed by.
/// Music sections are declared twice in a row, the first is read by artist,
/// the second by album. The value alternates over the whole library list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
enum MusicRoot {
    #[default]
    Artist,
    Albums,
}

impl MusicRoot {
    fn advance(&mut self) -> LibraryKind {
        match self {
            Self::Artist => {
                *self = Self::Albums;
                LibraryKind::Artist
            }
            Self::Albums => {
                *self = Self::Artist;
                LibraryKind::Albums
            }
        }
    }
}

fn is_blacklisted(blacklist: &[String], name: &str) -> bool {
    blacklist.iter().any(|b| b == name)
}

fn descriptor(section: &SectionInfo, kind: LibraryKind) -> LibraryDescriptor {
    LibraryDescriptor {
        key: section.key.clone(),
        kind,
        name: section.title.clone(),
    }
}

fn expand_all(sections: &[SectionInfo], blacklist: &[String], result: &mut Vec<LibraryDescriptor>) {
    for section in sections {
        if is_blacklisted(blacklist, &section.title) {
            continue;
        }
        if let Some(kind) = LibraryKind::from_section_type(&section.section_type) {
            result.push(descriptor(section, kind));
        } else if section.section_type == SECTION_TYPE_ARTIST {
            result.push(descriptor(section, LibraryKind::Artist));
            result.push(descriptor(section, LibraryKind::Albums));
        } else {
            warn!("Library \"{}\" has unsupported type \"{}\" and is skipped", section.title, section.section_type);
        }
    }
}

/// Matches the configured library names against the server's sections and
/// decides how each one is processed.
pub fn resolve_libraries(sections: &[SectionInfo], entries: &[LibraryEntry], blacklist: &[String]) -> Result<Vec<LibraryDescriptor>, ExportError> {
    let mut music_root = MusicRoot::default();
    let mut result = vec![];
    for entry in entries {
        if entry.name == WILDCARD_LIBRARY {
            expand_all(sections, blacklist, &mut result);
            continue;
        }
        if is_blacklisted(blacklist, &entry.name) {
            continue;
        }
        let Some(section) = sections.iter().find(|s| s.title == entry.name) else {
            warn!("Library \"{}\" not found in Plex.", entry.name);
            continue;
        };
        let kind = match entry.kind {
            Some(kind) => Some(kind),
            None => LibraryKind::from_section_type(&section.section_type)
                .or_else(|| (section.section_type == SECTION_TYPE_ARTIST).then(|| music_root.advance())),
        };
        match kind {
            Some(kind) => result.push(descriptor(section, kind)),
            None => warn!("Library \"{}\" has unsupported type \"{}\" and is skipped", section.title, section.section_type),
        }
    }

    if result.is_empty() {
        return config_err_res!("None of the specified libraries were found in Plex.");
    }
    Ok(result)
}
