//! Parse XML documents into [`ElementNode`] trees.
//!
//! Text is kept exactly as written except that whitespace-only text (the
//! indentation between child elements) is dropped. Comments, processing
//! instructions and the declaration are not retained.
//!
//! An element holds one text value. Mixed content is not modelled: text
//! segments around child elements are joined in document order and written
//! back ahead of the children. The SBA schemas have no mixed content.

use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};
use sba_model::ElementNode;

use crate::error::XmlError;

pub fn read_document(path: &Path) -> Result<ElementNode, XmlError> {
    let content = fs::read_to_string(path)?;
    parse_document(&content)
}

pub fn parse_document(xml: &str) -> Result<ElementNode, XmlError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<(ElementNode, String)> = Vec::new();
    let mut root: Option<ElementNode> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push((element(&start)?, String::new())),
            Event::Empty(start) => attach(&mut stack, &mut root, element(&start)?)?,
            Event::End(_) => {
                let (mut node, text) = stack.pop().ok_or(XmlError::UnbalancedEnd)?;
                if !text.trim().is_empty() {
                    node.text = Some(text);
                }
                attach(&mut stack, &mut root, node)?;
            }
            Event::Text(text) => {
                if let Some((_, buffer)) = stack.last_mut() {
                    buffer.push_str(std::str::from_utf8(&text)?);
                }
            }
            Event::CData(data) => {
                if let Some((_, buffer)) = stack.last_mut() {
                    buffer.push_str(std::str::from_utf8(&data)?);
                }
            }
            Event::GeneralRef(reference) => {
                if let Some((_, buffer)) = stack.last_mut() {
                    let name = std::str::from_utf8(&reference)?;
                    buffer.push_str(&resolve_reference(name)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((open, _)) = stack.pop() {
        return Err(XmlError::Unclosed(open.name));
    }
    root.ok_or(XmlError::NoRoot)
}

fn element(start: &BytesStart<'_>) -> Result<ElementNode, XmlError> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
    let mut node = ElementNode::new(name);
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = std::str::from_utf8(attribute.key.as_ref())?.to_string();
        let raw = std::str::from_utf8(&attribute.value)?;
        node.attributes.push((key, unescape(raw)?.into_owned()));
    }
    Ok(node)
}

fn attach(
    stack: &mut [(ElementNode, String)],
    root: &mut Option<ElementNode>,
    node: ElementNode,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some((parent, _)) => parent.push(node),
        None if root.is_none() => *root = Some(node),
        None => return Err(XmlError::MultipleRoots(node.name)),
    }
    Ok(())
}

/// Resolves `&name;` (predefined entities and character references).
fn resolve_reference(name: &str) -> Result<String, XmlError> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => number.parse::<u32>().ok(),
        };
        return code
            .and_then(char::from_u32)
            .map(String::from)
            .ok_or_else(|| XmlError::UnknownEntity(name.to_string()));
    }
    resolve_predefined_entity(name)
        .map(str::to_string)
        .ok_or_else(|| XmlError::UnknownEntity(name.to_string()))
}
