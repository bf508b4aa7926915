use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const SECTION_TYPE_MOVIE: &str = "movie";
pub const SECTION_TYPE_SHOW: &str = "show";
pub const SECTION_TYPE_ARTIST: &str = "artist";

pub const XML_ELEMENT_VIDEO: &str = "Video";
pub const XML_ELEMENT_DIRECTORY: &str = "Directory";
pub const XML_ELEMENT_TRACK: &str = "Track";

/// How the items of one library section are listed, located and written.
/// Music sections exist twice: once rooted at the artist folders, once at the album folders.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LibraryKind {
    Movie,
    #[serde(alias = "tvshow")]
    Show,
    Artist,
    #[serde(alias = "album")]
    Albums,
}

impl LibraryKind {
    const MOVIE: &'static str = "movie";
    const SHOW: &'static str = "show";
    const ARTIST: &'static str = "artist";
    const ALBUMS: &'static str = "albums";

    /// Kinds the section type alone decides. Music sections need the caller to pick artist or albums.
    pub fn from_section_type(section_type: &str) -> Option<Self> {
        match section_type {
            SECTION_TYPE_MOVIE => Some(Self::Movie),
            SECTION_TYPE_SHOW => Some(Self::Show),
            _ => None,
        }
    }

    /// Root element of the written NFO document.
    pub const fn root_tag(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Show => "tvshow",
            Self::Artist => "artist",
            Self::Albums => "albums",
        }
    }

    /// Element carrying one entry in listings and in the detail document.
    pub const fn item_element(self) -> &'static str {
        match self {
            Self::Movie => XML_ELEMENT_VIDEO,
            Self::Show | Self::Artist | Self::Albums => XML_ELEMENT_DIRECTORY,
        }
    }

    pub const fn listing_endpoint(self) -> &'static str {
        match self {
            Self::Movie | Self::Show | Self::Artist => "all",
            Self::Albums => "albums",
        }
    }

    pub const fn is_music(self) -> bool {
        matches!(self, Self::Artist | Self::Albums)
    }
}

impl Display for LibraryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            Self::Movie => Self::MOVIE,
            Self::Show => Self::SHOW,
            Self::Artist => Self::ARTIST,
            Self::Albums => Self::ALBUMS,
        })
    }
}

/// A configured library, either a plain section name or a name with an explicit kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LibraryEntryDto {
    Name(String),
    Typed {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        kind: Option<LibraryKind>,
    },
}

impl LibraryEntryDto {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Typed { name, .. } => name.as_str(),
        }
    }

    pub const fn kind(&self) -> Option<LibraryKind> {
        match self {
            Self::Name(_) => None,
            Self::Typed { kind, .. } => *kind,
        }
    }
}

impl From<&str> for LibraryEntryDto {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_entries() {
        let entries: Vec<LibraryEntryDto> = serde_yaml::from_str("['Movies', {name: 'Music', kind: albums}, {name: 'Shows'}]").unwrap();
        assert_eq!(entries[0], LibraryEntryDto::Name("Movies".to_string()));
        assert_eq!(entries[1].name(), "Music");
        assert_eq!(entries[1].kind(), Some(LibraryKind::Albums));
        assert_eq!(entries[2].kind(), None);
    }

    #[test]
    fn test_kind_aliases() {
        let kind: LibraryKind = serde_yaml::from_str("tvshow").unwrap();
        assert_eq!(kind, LibraryKind::Show);
        assert_eq!(kind.root_tag(), "tvshow");
        assert_eq!(LibraryKind::Albums.listing_endpoint(), "albums");
        assert_eq!(LibraryKind::from_section_type("artist"), None);
        assert_eq!(LibraryKind::from_section_type("movie"), Some(LibraryKind::Movie));
    }
}
