//! Element tree built from a quick-xml event stream

use super::{XmlError, XmlResult, MAX_NESTING_DEPTH};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// A node inside an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element, keyed by its local (namespace-prefix-free) name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    children: Vec<Node>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            children: Vec::new(),
        }
    }

    /// Local name, without any namespace prefix
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &[Node] {
        &self.children
    }

    /// Child elements in document order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// First child element with the given local name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    /// Concatenated text of the direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }
}

/// A parsed, well-formed XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn root(&self) -> &Element {
        &self.root
    }
}

/// Parses a raw body into a [`Document`]
///
/// The body must be UTF-8 (a leading byte-order mark is ignored), contain
/// exactly one root element, close every element it opens and must not
/// declare a DOCTYPE.
///
/// # Examples
///
/// ```
/// use spider_sitemap::xml::{parse_document, XmlError};
///
/// let doc = parse_document(b"<urlset><url><loc>https://example.org/</loc></url></urlset>").unwrap();
/// assert_eq!(doc.root().name(), "urlset");
///
/// let err = parse_document(b"<!DOCTYPE urlset><urlset/>").unwrap_err();
/// assert_eq!(err, XmlError::Doctype);
/// ```
pub fn parse_document(body: &[u8]) -> XmlResult<Document> {
    let text = std::str::from_utf8(body)
        .map_err(|e| XmlError::Malformed(format!("body is not UTF-8: {}", e)))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    if text.trim().is_empty() {
        return Err(XmlError::Empty);
    }

    let mut reader = Reader::from_str(text);
    reader.config_mut().check_end_names = true;
    reader.config_mut().check_comments = true;

    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| malformed_at(&reader, e))?;

        match event {
            Event::DocType(_) => return Err(XmlError::Doctype),
            Event::Start(start) => {
                if open.len() >= MAX_NESTING_DEPTH {
                    return Err(XmlError::Malformed(format!(
                        "elements nested deeper than {}",
                        MAX_NESTING_DEPTH
                    )));
                }
                let element = open_element(&start)?;
                if open.is_empty() && root.is_some() {
                    return Err(XmlError::Malformed(
                        "more than one root element".to_string(),
                    ));
                }
                open.push(element);
            }
            Event::Empty(start) => {
                let element = open_element(&start)?;
                close_element(element, &mut open, &mut root)?;
            }
            Event::End(_) => {
                // Names are matched by the reader (check_end_names)
                let element = open.pop().ok_or_else(|| {
                    XmlError::Malformed("closing tag without an open element".to_string())
                })?;
                close_element(element, &mut open, &mut root)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| malformed_at(&reader, e))?
                    .into_owned();
                push_text(text, &mut open)?;
            }
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                push_text(text, &mut open)?;
            }
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(XmlError::Malformed(format!(
            "element <{}> is never closed",
            unclosed.name
        )));
    }

    root.map(|root| Document { root })
        .ok_or_else(|| XmlError::Malformed("no root element".to_string()))
}

fn malformed_at<E: std::fmt::Display>(reader: &Reader<&[u8]>, error: E) -> XmlError {
    XmlError::Malformed(format!(
        "{} (at byte {})",
        error,
        reader.buffer_position()
    ))
}

/// Builds an element from a start tag, checking its attributes on the way
fn open_element(start: &BytesStart<'_>) -> XmlResult<Element> {
    for attribute in start.attributes() {
        attribute.map_err(|e| XmlError::Malformed(format!("bad attribute: {}", e)))?;
    }

    let name = std::str::from_utf8(start.local_name().as_ref())
        .map_err(|e| XmlError::Malformed(format!("element name is not UTF-8: {}", e)))?
        .to_string();

    Ok(Element::new(name))
}

fn close_element(
    element: Element,
    open: &mut [Element],
    root: &mut Option<Element>,
) -> XmlResult<()> {
    match open.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(XmlError::Malformed(
                "more than one root element".to_string(),
            ))
        }
    }
    Ok(())
}

fn push_text(text: String, open: &mut [Element]) -> XmlResult<()> {
    match open.last_mut() {
        Some(parent) => parent.children.push(Node::Text(text)),
        None if text.trim().is_empty() => {}
        None => {
            return Err(XmlError::Malformed(
                "text outside the root element".to_string(),
            ))
        }
    }
    Ok(())
}
