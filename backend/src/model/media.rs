use crate::model::XmlTag;
use shared::model::LibraryKind;
use std::fmt::{Display, Formatter};

pub const ATTR_RATING_KEY: &str = "ratingKey";
pub const ATTR_TITLE: &str = "title";
pub const ATTR_UPDATED_AT: &str = "updatedAt";
pub const ATTR_GUID: &str = "guid";
pub const ATTR_ID: &str = "id";
pub const ATTR_THUMB: &str = "thumb";
pub const ATTR_ART: &str = "art";
pub const ATTR_FILE: &str = "file";
pub const ATTR_PATH: &str = "path";
pub const ATTR_KEY: &str = "key";
pub const ATTR_TYPE: &str = "type";

pub const ELEMENT_GUID: &str = "Guid";
pub const ELEMENT_PART: &str = "Part";
pub const ELEMENT_LOCATION: &str = "Location";

/// Library section as announced by the media server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionInfo {
    pub key: String,
    pub section_type: String,
    pub title: String,
}

impl SectionInfo {
    pub fn from_tag(tag: &XmlTag) -> Option<Self> {
        Some(Self {
            key: tag.attr(ATTR_KEY)?.to_string(),
            section_type: tag.attr(ATTR_TYPE).unwrap_or_default().to_string(),
            title: tag.attr(ATTR_TITLE)?.to_string(),
        })
    }
}

/// One library pass: a section listed and written as `kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryDescriptor {
    pub key: String,
    pub kind: LibraryKind,
    pub name: String,
}

impl Display for LibraryDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.kind.is_music() {
            write!(f, "{} ({})", self.name, self.kind)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Listing entry, the detail is fetched separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub rating_key: String,
    pub title: Option<String>,
}

impl ItemRef {
    pub fn from_tag(tag: &XmlTag) -> Option<Self> {
        Some(Self {
            rating_key: tag.attr(ATTR_RATING_KEY)?.to_string(),
            title: tag.attr(ATTR_TITLE).map(ToString::to_string),
        })
    }
}

/// Detail record of a movie, show, artist, album or episode.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRecord {
    tag: XmlTag,
}

impl MediaRecord {
    pub const fn new(tag: XmlTag) -> Self {
        Self { tag }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.tag.attr(name)
    }

    pub fn title(&self) -> Option<&str> {
        self.attr(ATTR_TITLE)
    }

    pub fn rating_key(&self) -> Option<&str> {
        self.attr(ATTR_RATING_KEY)
    }

    /// Remote change timestamp in epoch seconds, `0` when absent or unparsable.
    pub fn updated_at(&self) -> i64 {
        self.attr(ATTR_UPDATED_AT)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(0)
    }

    pub fn guid(&self) -> Option<&str> {
        self.attr(ATTR_GUID)
    }

    /// `id` of every secondary `Guid` element, empty ids included.
    pub fn guids(&self) -> impl Iterator<Item=&str> {
        self.tag.find_children(ELEMENT_GUID)
            .map(|g| g.get_attribute_value(ATTR_ID).map_or("", String::as_str))
    }

    pub fn elements<'a>(&'a self, name: &'a str) -> impl Iterator<Item=&'a XmlTag> + 'a {
        self.tag.find_children(name)
    }

    /// Every media part file, in document order.
    pub fn part_files(&self) -> Vec<&str> {
        let mut parts = vec![];
        self.tag.find_descendants(ELEMENT_PART, &mut parts);
        parts.into_iter().filter_map(|p| p.attr(ATTR_FILE)).collect()
    }

    pub fn first_part_file(&self) -> Option<&str> {
        self.part_files().into_iter().next()
    }

    pub fn location_paths(&self) -> Vec<&str> {
        let mut locations = vec![];
        self.tag.find_descendants(ELEMENT_LOCATION, &mut locations);
        locations.into_iter().filter_map(|l| l.attr(ATTR_PATH)).collect()
    }
}

/// Season directory of a show as returned by the children listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonEntry {
    pub rating_key: Option<String>,
    pub title: Option<String>,
    pub thumb: Option<String>,
}

impl From<&XmlTag> for SeasonEntry {
    fn from(tag: &XmlTag) -> Self {
        Self {
            rating_key: tag.attr(ATTR_RATING_KEY).map(ToString::to_string),
            title: tag.attr(ATTR_TITLE).map(ToString::to_string),
            thumb: tag.attr(ATTR_THUMB).map(ToString::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_xml_document;

    fn record(xml: &str) -> MediaRecord {
        let root = parse_xml_document(xml.as_bytes()).unwrap().unwrap();
        MediaRecord::new(root)
    }

    #[test]
    fn test_updated_at() {
        assert_eq!(record(r#"<Video updatedAt="1700000000"/>"#).updated_at(), 1_700_000_000);
        assert_eq!(record(r#"<Video updatedAt=""/>"#).updated_at(), 0);
        assert_eq!(record(r"<Video/>").updated_at(), 0);
    }

    #[test]
    fn test_guids_keep_empty_ids() {
        let rec = record(r#"<Video><Guid id="imdb://tt1"/><Guid id=""/><Guid/></Video>"#);
        assert_eq!(rec.guids().collect::<Vec<_>>(), vec!["imdb://tt1", "", ""]);
    }

    #[test]
    fn test_locations() {
        let rec = record(r#"<Directory><Location path="/tv/Show A"/><Location path="/tv2/Show A"/></Directory>"#);
        assert_eq!(rec.location_paths(), vec!["/tv/Show A", "/tv2/Show A"]);
        assert!(rec.first_part_file().is_none());
    }
}
