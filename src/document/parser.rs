//! Pull parser turning raw export text into an `Element` tree

use super::element::{local_name, Element};
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

/// Errors raised while parsing a registry export document
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed attribute syntax: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    #[error("Closing tag </{found}> does not match <{expected}>")]
    MismatchedTag { expected: String, found: String },

    #[error("Element <{0}> appears after the document root")]
    TrailingContent(String),

    #[error("Document contains no root element")]
    EmptyDocument,
}

/// Parse a registry export into its root element.
///
/// Child order is preserved exactly as written. The parser does not
/// consult the type catalog; unmodeled elements come back in the tree
/// like any other and are skipped later by the loader.
pub fn parse_document(text: &str) -> Result<Element, ParseError> {
    let mut reader = Reader::from_str(text);
    // open elements, innermost last
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let mut element = Element::new(local_name(&decode_name(start.name().as_ref())));
                for attr in start.attributes() {
                    let attr = attr?;
                    element.attributes.push((
                        decode_name(attr.key.as_ref()),
                        attr.unescape_value()?.into_owned(),
                    ));
                }
                stack.push(element);
            }
            Event::Empty(start) => {
                let mut element = Element::new(local_name(&decode_name(start.name().as_ref())));
                for attr in start.attributes() {
                    let attr = attr?;
                    element.attributes.push((
                        decode_name(attr.key.as_ref()),
                        attr.unescape_value()?.into_owned(),
                    ));
                }
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(end) => {
                let found = local_name(&decode_name(end.name().as_ref())).to_string();
                let element = stack.pop().ok_or_else(|| ParseError::MismatchedTag {
                    expected: String::new(),
                    found: found.clone(),
                })?;
                if element.tag != found {
                    return Err(ParseError::MismatchedTag {
                        expected: element.tag,
                        found,
                    });
                }
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let value = text.unescape()?;
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    if let Some(open) = stack.last_mut() {
                        match &mut open.text {
                            Some(existing) => existing.push_str(trimmed),
                            None => open.text = Some(trimmed.to_string()),
                        }
                    }
                }
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(&data).into_owned();
                if let Some(open) = stack.last_mut() {
                    match &mut open.text {
                        Some(existing) => existing.push_str(&value),
                        None => open.text = Some(value),
                    }
                }
            }
            Event::Eof => {
                if let Some(open) = stack.last() {
                    return Err(ParseError::UnexpectedEof(open.tag.clone()));
                }
                return root.ok_or(ParseError::EmptyDocument);
            }
            // declarations, comments, processing instructions, doctypes
            _ => {}
        }
    }
}

/// Attach a completed element to its parent, or record it as the root.
/// A second top-level element is not well-formed XML and the reader
/// does not police it, so it is rejected here.
fn attach(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => return Err(ParseError::TrailingContent(element.tag)),
        None => *root = Some(element),
    }
    Ok(())
}

fn decode_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}
