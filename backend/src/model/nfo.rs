use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

pub const NFO_ATTRIB_XSI: &str = "xsi";
pub const NFO_ATTRIB_XSD: &str = "xsd";
pub const NFO_XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const NFO_XSD: &str = "http://www.w3.org/2001/XMLSchema";
pub const NFO_TAG_EPISODE: &str = "episodedetails";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfoElement {
    pub tag: String,
    pub value: Option<String>,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<NfoElement>,
}

impl NfoElement {
    pub fn new(tag: &str, value: &str) -> Self {
        Self {
            tag: tag.to_string(),
            value: Some(value.to_string()),
            attributes: vec![],
            children: vec![],
        }
    }

    pub fn with_children(tag: &str, children: Vec<NfoElement>) -> Self {
        Self {
            tag: tag.to_string(),
            value: None,
            attributes: vec![],
            children,
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<(), quick_xml::Error> {
        let mut elem = BytesStart::new(self.tag.as_str());
        for (k, v) in &self.attributes {
            elem.push_attribute((k.as_str(), v.as_str()));
        }
        writer.write_event(Event::Start(elem))?;
        if let Some(text) = self.value.as_ref() {
            writer.write_event(Event::Text(BytesText::new(text.as_str())))?;
        }
        for child in &self.children {
            child.write_to(writer)?;
        }
        Ok(writer.write_event(Event::End(BytesEnd::new(self.tag.as_str())))?)
    }
}

/// A complete sidecar document: `<root xsi=.. xsd=..>` followed by the projected elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfoDocument {
    pub root: String,
    pub elements: Vec<NfoElement>,
}

impl NfoDocument {
    pub fn new(root: &str) -> Self {
        Self {
            root: root.to_string(),
            elements: vec![],
        }
    }

    pub fn push(&mut self, element: NfoElement) {
        self.elements.push(element);
    }

    pub fn find(&self, tag: &str) -> Option<&NfoElement> {
        self.elements.iter().find(|e| e.tag == tag)
    }

    pub fn write_to<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<(), quick_xml::Error> {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        let mut elem = BytesStart::new(self.root.as_str());
        elem.push_attribute((NFO_ATTRIB_XSI, NFO_XSI));
        elem.push_attribute((NFO_ATTRIB_XSD, NFO_XSD));
        writer.write_event(Event::Start(elem))?;
        for element in &self.elements {
            element.write_to(writer)?;
        }
        Ok(writer.write_event(Event::End(BytesEnd::new(self.root.as_str())))?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, quick_xml::Error> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        self.write_to(&mut writer)?;
        Ok(writer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_output() {
        let mut doc = NfoDocument::new("movie");
        doc.push(NfoElement::new("tmdbid", "603"));
        doc.push(NfoElement::new("title", "Fast & Furious"));
        doc.push(NfoElement::with_children("ratings", vec![NfoElement::new("imdb", "8.7")]));
        doc.push(NfoElement::new("actor", "Keanu Reeves").with_attribute("thumb", "http://img/1.jpg").with_attribute("role", "Neo"));
        let content = String::from_utf8(doc.to_bytes().unwrap()).unwrap();
        assert!(content.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(content.contains(r#"<movie xsi="http://www.w3.org/2001/XMLSchema-instance" xsd="http://www.w3.org/2001/XMLSchema">"#));
        assert!(content.contains("<tmdbid>603</tmdbid>"));
        assert!(content.contains("<title>Fast &amp; Furious</title>"));
        assert!(content.contains("<imdb>8.7</imdb>"));
        assert!(content.contains(r#"<actor thumb="http://img/1.jpg" role="Neo">Keanu Reeves</actor>"#));
        assert!(content.trim_end().ends_with("</movie>"));
    }
}
