//! Attributed tree model for an SVG-like markup subset.
//!
//! Provides the minimal element tree the sanitizer rebuilds: a tag name,
//! an ordered attribute list, and an ordered child list. The tree is owned
//! top-down; there are no back-references, so walks can rebuild it as a
//! pure function (traverse the original, construct a new tree) instead of
//! removing nodes mid-iteration.

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{MarkupError, MarkupResult};

/// A node in the attributed tree.
///
/// Tag names are normalized to lower-case at parse time so every
/// allow-list comparison sees canonical form. Attribute names keep their
/// original case (`viewBox` is case-sensitive in SVG).
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Lower-cased tag name.
    pub tag: String,
    /// Attributes in document order.
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order.
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Look up an attribute value by exact name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Serialize the tree back to markup.
    ///
    /// Output is deterministic: attributes in stored order, childless
    /// elements self-closed. Serializing a parsed tree and re-parsing it
    /// yields an equal tree, which is what makes sanitization idempotent.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out);
        out
    }

    fn write_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>");
        } else {
            out.push('>');
            for child in &self.children {
                child.write_into(out);
            }
            out.push_str("</");
            out.push_str(&self.tag);
            out.push('>');
        }
    }
}

/// Parse raw markup into an [`Element`] tree.
///
/// Text, CDATA, comments, and processing instructions are discarded — the
/// accepted SVG subset has no text-bearing elements. Errors on empty
/// input, malformed syntax, mismatched tags, and missing or multiple root
/// elements.
#[tracing::instrument(skip_all, fields(input_len = input.len()))]
pub fn parse_markup(input: &str) -> MarkupResult<Element> {
    if input.trim().is_empty() {
        return Err(MarkupError::Empty);
    }

    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                stack.push(element_from_start(&start)?);
            }
            Ok(Event::Empty(start)) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack.pop().ok_or_else(|| {
                    MarkupError::Malformed("closing tag without an open element".to_string())
                })?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Eof) => break,
            // No text-bearing tags in the subset.
            Ok(_) => {}
            Err(e) => return Err(MarkupError::Malformed(e.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(MarkupError::Truncated);
    }
    root.ok_or(MarkupError::NoRoot)
}

/// Build an element from a start tag, decoding its attributes.
fn element_from_start(start: &BytesStart<'_>) -> MarkupResult<Element> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).to_lowercase();
    let mut element = Element {
        tag: tag.clone(),
        attributes: Vec::new(),
        children: Vec::new(),
    };
    for attr in start.attributes() {
        let attr = attr.map_err(|e| MarkupError::BadAttribute {
            tag: tag.clone(),
            detail: e.to_string(),
        })?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| MarkupError::BadAttribute {
                tag: tag.clone(),
                detail: e.to_string(),
            })?
            .into_owned();
        element.attributes.push((name, value));
    }
    Ok(element)
}

/// Attach a completed element to its parent, or install it as the root.
fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> MarkupResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        Ok(())
    } else if root.is_none() {
        *root = Some(element);
        Ok(())
    } else {
        Err(MarkupError::Malformed(
            "multiple root elements".to_string(),
        ))
    }
}
