//! Owned XML element tree with ElementTree-style path queries.
//!
//! Supported paths: `Tag` and `./Tag` select direct children, `.//Tag`
//! selects descendants in document order, and steps can be chained, e.g.
//! `.//Subject/SubjectCode`. Namespace prefixes are dropped at parse time so
//! queries use local names only.

use std::collections::HashSet;

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesRef, BytesStart, Event};
use thiserror::Error;

/// Query capability the field mappers rely on.
pub trait DocumentNode {
    /// Local tag name.
    fn tag(&self) -> &str;

    /// Trimmed text before the first child element; empty when there is none.
    fn text(&self) -> &str;

    fn attribute(&self, name: &str) -> Option<&str>;

    /// First node matching `path`, in document order.
    fn find(&self, path: &str) -> Option<&Self>;

    /// Every node matching `path`, in document order.
    fn find_all(&self, path: &str) -> Vec<&Self>;

    /// Text of the first node matching `path`.
    ///
    /// `Some("")` when the node exists without text.
    fn find_text(&self, path: &str) -> Option<&str> {
        self.find(path).map(DocumentNode::text)
    }
}

/// A parsed XML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step<'p> {
    Child(&'p str),
    Descendant(&'p str),
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Consume the element, yielding its direct children.
    pub fn into_children(self) -> Vec<Element> {
        self.children
    }

    fn select<'a>(&'a self, path: &str) -> Vec<&'a Element> {
        let mut current: Vec<&Element> = vec![self];
        for step in parse_path(path) {
            let mut next: Vec<&Element> = Vec::new();
            for node in current {
                match step {
                    Step::Child(name) => {
                        next.extend(node.children.iter().filter(|child| child.name == name));
                    }
                    Step::Descendant(name) => node.collect_descendants(name, &mut next),
                }
            }
            let mut seen = HashSet::new();
            next.retain(|node| seen.insert(std::ptr::from_ref(*node)));
            current = next;
            if current.is_empty() {
                break;
            }
        }
        current
    }

    fn collect_descendants<'a>(&'a self, name: &str, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            child.collect_descendants(name, out);
        }
    }
}

impl DocumentNode for Element {
    fn tag(&self) -> &str {
        &self.name
    }

    fn text(&self) -> &str {
        self.text.trim()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn find(&self, path: &str) -> Option<&Self> {
        self.select(path).into_iter().next()
    }

    fn find_all(&self, path: &str) -> Vec<&Self> {
        self.select(path)
    }
}

fn parse_path(path: &str) -> Vec<Step<'_>> {
    let mut steps = Vec::new();
    let mut descend = false;
    for segment in path.trim().split('/') {
        match segment {
            "." => {}
            "" => descend = true,
            name if descend => {
                steps.push(Step::Descendant(name));
                descend = false;
            }
            name => steps.push(Step::Child(name)),
        }
    }
    steps
}

/// The document could not be read as XML.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct XmlSyntaxError {
    message: String,
}

impl XmlSyntaxError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn from_display(err: impl std::fmt::Display) -> Self {
        Self::new(err.to_string())
    }
}

/// Parse XML text into its root element.
pub fn parse_document(xml: &str) -> Result<Element, XmlSyntaxError> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event().map_err(XmlSyntaxError::from_display)? {
            Event::Start(start) => stack.push(open_element(&start)?),
            Event::Empty(start) => {
                let element = open_element(&start)?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlSyntaxError::new("unexpected closing tag"))?;
                close_element(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => push_text(&mut stack, &String::from_utf8_lossy(&text)),
            Event::CData(data) => push_text(&mut stack, &String::from_utf8_lossy(&data)),
            Event::GeneralRef(reference) => {
                let resolved = resolve_reference(&reference)?;
                push_text(&mut stack, &resolved);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlSyntaxError::new(format!(
            "unclosed element <{}>",
            open.name
        )));
    }
    root.ok_or_else(|| XmlSyntaxError::new("document has no root element"))
}

fn open_element(start: &BytesStart<'_>) -> Result<Element, XmlSyntaxError> {
    let mut element = Element::new(String::from_utf8_lossy(start.local_name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(XmlSyntaxError::from_display)?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape(&raw).map_or_else(|_| raw.to_string(), |value| value.into_owned());
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn close_element(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), XmlSyntaxError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlSyntaxError::new("multiple root elements"));
    }
    *root = Some(element);
    Ok(())
}

// Only text before the first child belongs to an element; later runs are
// tails of its children and are not kept.
fn push_text(stack: &mut [Element], text: &str) {
    if let Some(current) = stack.last_mut()
        && current.children.is_empty()
    {
        current.text.push_str(text);
    }
}

// Unknown named entities are kept as written.
fn resolve_reference(reference: &BytesRef<'_>) -> Result<String, XmlSyntaxError> {
    if let Some(ch) = reference
        .resolve_char_ref()
        .map_err(XmlSyntaxError::from_display)?
    {
        return Ok(ch.to_string());
    }
    let name = String::from_utf8_lossy(reference);
    Ok(resolve_predefined_entity(&name).map_or_else(|| format!("&{name};"), str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0"?>
<ONIXMessage release="3.0" xmlns:o="http://ns.editeur.org/onix/3.0/reference">
  <Product>
    <o:RecordReference>rec-1</o:RecordReference>
    <DescriptiveDetail>
      <Subject><MainSubject/><SubjectCode>FIC022000</SubjectCode></Subject>
      <Subject><SubjectCode>FIC000000</SubjectCode></Subject>
      <TitleDetail><TitleElement><TitleText>Tom &amp; Jerry &#169; &custom;</TitleText></TitleElement></TitleDetail>
    </DescriptiveDetail>
    <Empty></Empty>
    <Blurb><![CDATA[<b>bold</b>]]></Blurb>
  </Product>
  <Product><RecordReference>rec-2</RecordReference></Product>
</ONIXMessage>"#;

    fn sample() -> Element {
        parse_document(SAMPLE).expect("parse sample")
    }

    #[test]
    fn reads_root_attributes_and_children() {
        let root = sample();
        assert_eq!(root.tag(), "ONIXMessage");
        assert_eq!(root.attribute("release"), Some("3.0"));
        assert_eq!(root.find_all("Product").len(), 2);
        assert_eq!(root.find_all("./Product").len(), 2);
    }

    #[test]
    fn strips_namespace_prefixes() {
        let root = sample();
        assert_eq!(root.find_text(".//RecordReference"), Some("rec-1"));
        assert_eq!(
            root.find_all(".//RecordReference")
                .iter()
                .map(|node| node.text())
                .collect::<Vec<_>>(),
            vec!["rec-1", "rec-2"]
        );
    }

    #[test]
    fn multi_step_paths_follow_children() {
        let root = sample();
        let codes: Vec<&str> = root
            .find_all(".//Subject/SubjectCode")
            .into_iter()
            .map(DocumentNode::text)
            .collect();
        assert_eq!(codes, vec!["FIC022000", "FIC000000"]);
        assert!(root.find("SubjectCode").is_none());
    }

    #[test]
    fn resolves_references_and_keeps_unknown_entities() {
        let root = sample();
        assert_eq!(
            root.find_text(".//TitleText"),
            Some("Tom & Jerry \u{a9} &custom;")
        );
    }

    #[test]
    fn empty_elements_have_empty_text() {
        let root = sample();
        assert_eq!(root.find_text(".//Empty"), Some(""));
        assert_eq!(root.find_text(".//MainSubject"), Some(""));
        assert_eq!(root.find_text(".//Missing"), None);
    }

    #[test]
    fn keeps_cdata_as_text() {
        let root = sample();
        assert_eq!(root.find_text(".//Blurb"), Some("<b>bold</b>"));
    }

    #[test]
    fn mixed_content_keeps_leading_text_only() {
        let root = parse_document("<P><Text>Hello <b>bold</b> World War</Text></P>")
            .expect("parse");
        assert_eq!(root.find_text(".//Text"), Some("Hello"));
        assert_eq!(root.find_text(".//b"), Some("bold"));

        let root = parse_document("<P><Text><b>bold</b> tail</Text></P>").expect("parse");
        assert_eq!(root.find_text("Text"), Some(""));
    }

    #[test]
    fn nested_descendant_steps_return_each_node_once() {
        let root = parse_document(
            "<R><A><A><B>inner</B></A><B>outer</B></A><A><B>last</B></A></R>",
        )
        .expect("parse");
        let found: Vec<&str> = root
            .find_all(".//A//B")
            .into_iter()
            .map(DocumentNode::text)
            .collect();
        assert_eq!(found, vec!["inner", "outer", "last"]);
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(parse_document("<ONIXMessage><Product></ONIXMessage>").is_err());
        assert!(parse_document("<a></a><b></b>").is_err());
        assert!(parse_document("").is_err());
        assert!(parse_document("<a>").is_err());
    }
}
