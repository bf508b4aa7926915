use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

/// Generic element of a media server response. Responses carry their data
/// in attributes, text content is not kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlTag {
    pub name: String,
    pub attributes: Option<HashMap<String, String>>,
    pub children: Option<Vec<XmlTag>>,
}

impl XmlTag {
    pub fn new(name: String, attribs: Option<HashMap<String, String>>) -> Self {
        Self {
            name,
            attributes: attribs,
            children: None,
        }
    }

    pub fn get_attribute_value(&self, attr_name: &str) -> Option<&String> {
        self.attributes.as_ref().and_then(|attr| attr.get(attr_name))
    }

    /// Attribute value, `None` when missing or empty.
    pub fn attr(&self, attr_name: &str) -> Option<&str> {
        self.get_attribute_value(attr_name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn children(&self) -> &[XmlTag] {
        self.children.as_deref().unwrap_or_default()
    }

    pub fn find_children<'a>(&'a self, name: &'a str) -> impl Iterator<Item=&'a XmlTag> + 'a {
        self.children().iter().filter(move |c| c.name == name)
    }

    pub fn find_child(&self, name: &str) -> Option<&XmlTag> {
        self.children().iter().find(|c| c.name == name)
    }

    /// Depth first search over all descendants, document order.
    pub fn find_descendants<'a>(&'a self, name: &str, result: &mut Vec<&'a XmlTag>) {
        for child in self.children() {
            if child.name == name {
                result.push(child);
            }
            child.find_descendants(name, result);
        }
    }

    fn add_child(&mut self, tag: XmlTag) {
        self.children.get_or_insert_with(Vec::new).push(tag);
    }
}

fn handle_tag_start(reader: &Reader<&[u8]>, stack: &mut Vec<XmlTag>, e: &BytesStart) {
    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let attributes = e.attributes().filter_map(Result::ok)
        .filter_map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            attr.decode_and_unescape_value(reader.decoder()).ok().map(|value| (key, value.to_string()))
        }).collect::<HashMap<String, String>>();
    let attribs = if attributes.is_empty() { None } else { Some(attributes) };
    stack.push(XmlTag::new(name, attribs));
}

fn handle_tag_end(stack: &mut Vec<XmlTag>) -> Option<XmlTag> {
    let tag = stack.pop()?;
    match stack.last_mut() {
        Some(parent) => {
            parent.add_child(tag);
            None
        }
        None => Some(tag),
    }
}

/// Parses a response document and returns its root element.
/// A document without a complete root element yields `Ok(None)`.
pub fn parse_xml_document(content: &[u8]) -> Result<Option<XmlTag>, quick_xml::Error> {
    let mut reader = Reader::from_reader(content);
    let mut stack: Vec<XmlTag> = vec![];
    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) => handle_tag_start(&reader, &mut stack, &e),
            Event::Empty(e) => {
                handle_tag_start(&reader, &mut stack, &e);
                if let Some(root) = handle_tag_end(&mut stack) {
                    return Ok(Some(root));
                }
            }
            Event::End(_) => {
                if let Some(root) = handle_tag_end(&mut stack) {
                    return Ok(Some(root));
                }
            }
            _ => {}
        }
    }
    Ok(None)
}
