//! In-memory tree for structure documents.
//!
//! The tree mirrors the document as written: element local names (namespace
//! prefixes stripped), attributes, trimmed text and ordered children. No
//! fixed record shape is imposed; extractors navigate it by name.

use std::collections::BTreeMap;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Result, SchemaError};

/// One XML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Local name without namespace prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Trimmed text content, `None` when empty.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// All children with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Follow a chain of first-child names.
    pub fn path(&self, names: &[&str]) -> Option<&Element> {
        names
            .iter()
            .try_fold(self, |element, name| element.child(name))
    }
}

/// A parsed structure document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDocument {
    root: Element,
}

impl SchemaDocument {
    pub fn root(&self) -> &Element {
        &self.root
    }
}

/// Parse a structure document.
///
/// # Errors
///
/// [`SchemaError::Parse`] for malformed XML, mismatched or unclosed tags,
/// and documents without (or with more than one) root element.
pub fn parse_schema(xml: &str) -> Result<SchemaDocument> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<(Element, String)> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            SchemaError::parse(format!("at byte {}: {e}", reader.error_position()))
        })?;
        match event {
            Event::Start(start) => stack.push((open_element(&start)?, String::new())),
            Event::Empty(start) => {
                let element = open_element(&start)?;
                attach(element, "", &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let (element, text) = stack
                    .pop()
                    .ok_or_else(|| SchemaError::parse("closing tag without an open element"))?;
                attach(element, &text, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                if let Some((_, buffer)) = stack.last_mut() {
                    let raw = String::from_utf8_lossy(&text);
                    let value = unescape(&raw).map_err(|e| SchemaError::parse(e.to_string()))?;
                    buffer.push_str(&value);
                }
            }
            Event::CData(data) => {
                if let Some((_, buffer)) = stack.last_mut() {
                    buffer.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::GeneralRef(reference) => {
                if let Some((_, buffer)) = stack.last_mut() {
                    let entity = format!("&{};", String::from_utf8_lossy(&reference));
                    let value =
                        unescape(&entity).map_err(|e| SchemaError::parse(e.to_string()))?;
                    buffer.push_str(&value);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((open, _)) = stack.last() {
        return Err(SchemaError::parse(format!(
            "unexpected end of document inside <{}>",
            open.name
        )));
    }
    root.map(|root| SchemaDocument { root })
        .ok_or_else(|| SchemaError::parse("document has no root element"))
}

fn open_element(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.local_name().as_ref()));
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| {
            SchemaError::parse(format!("invalid attribute on <{}>: {e}", element.name))
        })?;
        // Namespace declarations carry no data.
        if attribute.key.as_ref().starts_with(b"xmlns") {
            continue;
        }
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attribute.value);
        let value = unescape(&raw).map_err(|e| SchemaError::parse(e.to_string()))?;
        element.attributes.insert(key, value.into_owned());
    }
    Ok(element)
}

fn attach(
    mut element: Element,
    text: &str,
    stack: &mut [(Element, String)],
    root: &mut Option<Element>,
) -> Result<()> {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        element.text = Some(trimmed.to_string());
    }
    if let Some((parent, _)) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(SchemaError::parse(format!(
            "second root element <{}>",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}
