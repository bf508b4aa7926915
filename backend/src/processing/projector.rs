use crate::model::{MediaRecord, NfoDocument, NfoElement, NfoField, NfoFields, ATTR_THUMB, NFO_TAG_EPISODE};
use shared::model::LibraryKind;

const GUID_TMDB: &str = "themoviedb";
const GUID_HAMA: &str = "agents.hama";
const ATTR_TAG: &str = "tag";
const ATTR_ROLE: &str = "role";

/// Scalar output fields: gate, source attribute, output tag. Emission order is fixed.
const SCALAR_FIELDS: &[(NfoField, &str, &str)] = &[
    (NfoField::Studio, "studio", "studio"),
    (NfoField::Title, "title", "title"),
    (NfoField::Mpaa, "contentRating", "mpaa"),
    (NfoField::Plot, "summary", "plot"),
    (NfoField::CriticRating, "rating", "criticrating"),
    (NfoField::CustomRating, "userRating", "customrating"),
    (NfoField::Year, "year", "year"),
    (NfoField::Tagline, "tagline", "tagline"),
    (NfoField::Runtime, "duration", "runtime"),
    (NfoField::ReleaseDate, "originallyAvailableAt", "releasedate"),
];

const TAG_FIELDS: &[(NfoField, &str, &str)] = &[
    (NfoField::Genre, "Genre", "genre"),
    (NfoField::Country, "Country", "country"),
    (NfoField::Style, "Style", "style"),
];

const CREDIT_FIELDS: &[(NfoField, &str, &str)] = &[
    (NfoField::Directors, "Director", "director"),
    (NfoField::Writers, "Writer", "writer"),
    (NfoField::Roles, "Role", "actor"),
];

const EPISODE_FIELDS: &[(&str, &str)] = &[
    ("parentIndex", "season"),
    ("index", "episode"),
    ("title", "title"),
    ("summary", "plot"),
    ("contentRating", "mpaa"),
    ("rating", "userrating"),
    ("originallyAvailableAt", "aired"),
];

const EPISODE_ID_TYPES: &[&str] = &["imdb", "tmdb", "tvdb"];

fn after_last<'a>(value: &'a str, separator: &str) -> &'a str {
    value.rfind(separator).map_or(value, |idx| &value[idx + separator.len()..])
}

fn before_first<'a>(value: &'a str, separator: char) -> &'a str {
    value.find(separator).map_or(value, |idx| &value[..idx])
}

/// `com.plexapp.agents.themoviedb://603?lang=en` -> `603`
fn tmdb_id(guid: &str) -> &str {
    before_first(after_last(guid, "//"), '?')
}

/// `com.plexapp.agents.hama://anidb-12345?lang=en` -> (`anidb`, `12345`)
fn hama_id(guid: &str) -> Option<(&str, &str)> {
    let rest = after_last(guid, "//");
    let (prefix, id) = rest.split_once('-')?;
    Some((prefix, before_first(id, '?')))
}

/// `imdb://tt0133093` -> (`imdbid`, `tt0133093`)
fn secondary_id(id: &str) -> Option<(String, &str)> {
    if id.is_empty() {
        return None;
    }
    Some((format!("{}id", before_first(id, ':')), after_last(id, "//")))
}

fn project_identifiers(record: &MediaRecord, doc: &mut NfoDocument) {
    if let Some(guid) = record.guid() {
        if guid.contains(GUID_TMDB) {
            doc.push(NfoElement::new("tmdbid", tmdb_id(guid)));
        }
        if guid.contains(GUID_HAMA) {
            if let Some((prefix, id)) = hama_id(guid) {
                doc.push(NfoElement::new(&format!("{prefix}id"), id));
            }
        }
    }
    for (tag, value) in record.guids().filter_map(secondary_id) {
        doc.push(NfoElement::new(&tag, value));
    }
}

fn project_ratings(record: &MediaRecord, doc: &mut NfoDocument) {
    let mut ratings = record.elements("Rating").peekable();
    if ratings.peek().is_none() {
        return;
    }
    let children = ratings
        .filter_map(|r| Some(NfoElement::new(r.attr("type")?, r.attr("value")?)))
        .collect();
    doc.push(NfoElement::with_children("ratings", children));
}

fn project_credits(fields: &NfoFields, record: &MediaRecord, doc: &mut NfoDocument) {
    for (field, element, tag) in CREDIT_FIELDS {
        if !fields.is_enabled(*field) {
            continue;
        }
        for credit in record.elements(element) {
            let Some(name) = credit.attr(ATTR_TAG) else { continue };
            let mut out = NfoElement::new(tag, name);
            if let Some(thumb) = credit.attr(ATTR_THUMB) {
                out = out.with_attribute(ATTR_THUMB, thumb);
            }
            if *field == NfoField::Roles {
                if let Some(role) = credit.attr(ATTR_ROLE) {
                    out = out.with_attribute(ATTR_ROLE, role);
                }
            }
            doc.push(out);
        }
    }
}

/// Builds the NFO document of a movie, show, artist or album.
pub fn project_record(fields: &NfoFields, kind: LibraryKind, record: &MediaRecord) -> NfoDocument {
    let mut doc = NfoDocument::new(kind.root_tag());

    if fields.is_enabled(NfoField::AgentId) {
        project_identifiers(record, &mut doc);
    }

    for (field, attr, tag) in SCALAR_FIELDS {
        if fields.is_enabled(*field) {
            if let Some(value) = record.attr(attr) {
                doc.push(NfoElement::new(tag, value));
            }
        }
    }

    for (field, element, tag) in TAG_FIELDS {
        if fields.is_enabled(*field) {
            for value in record.elements(element).filter_map(|e| e.attr(ATTR_TAG)) {
                doc.push(NfoElement::new(tag, value));
            }
        }
    }

    if fields.is_enabled(NfoField::Ratings) {
        project_ratings(record, &mut doc);
    }

    project_credits(fields, record, &mut doc);
    doc
}

/// Episode documents have a fixed field set.
pub fn project_episode(record: &MediaRecord) -> NfoDocument {
    let mut doc = NfoDocument::new(NFO_TAG_EPISODE);

    for id in record.guids() {
        if let Some(id_type) = EPISODE_ID_TYPES.iter().find(|t| id.contains(*t)) {
            doc.push(NfoElement::new("uniqueid", after_last(id, "/")).with_attribute("type", id_type));
        }
    }

    for (attr, tag) in EPISODE_FIELDS {
        if let Some(value) = record.attr(attr) {
            doc.push(NfoElement::new(tag, value));
        }
    }
    doc
}
