//! Serialize [`ElementNode`] trees.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use sba_model::ElementNode;

use crate::error::XmlError;

/// Indentation used for files written by the converter and the fixer.
pub const DEFAULT_INDENT: usize = 2;

/// Writes the declaration and `root`. `indent` of `None` writes everything
/// on one line.
pub fn write_document<W: Write>(
    root: &ElementNode,
    out: W,
    indent: Option<usize>,
) -> Result<(), XmlError> {
    let mut xml = match indent {
        Some(width) => Writer::new_with_indent(out, b' ', width),
        None => Writer::new(out),
    };
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut xml, root)?;
    if indent.is_some() {
        xml.get_mut().write_all(b"\n")?;
    }
    Ok(())
}

pub fn to_xml_string(root: &ElementNode, indent: Option<usize>) -> Result<String, XmlError> {
    let mut buffer = Vec::new();
    write_document(root, &mut buffer, indent)?;
    Ok(String::from_utf8(buffer)?)
}

/// Writes `root` to `path`, creating parent directories as needed.
pub fn write_document_file(root: &ElementNode, path: &Path) -> Result<(), XmlError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_document(root, &mut writer, Some(DEFAULT_INDENT))?;
    writer.flush()?;
    Ok(())
}

fn write_element<W: Write>(xml: &mut Writer<W>, node: &ElementNode) -> Result<(), XmlError> {
    let mut start = BytesStart::new(node.name.as_str());
    for (key, value) in &node.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if node.children.is_empty() && node.text.is_none() {
        xml.write_event(Event::Empty(start))?;
        return Ok(());
    }

    xml.write_event(Event::Start(start))?;
    if let Some(text) = &node.text {
        xml.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    }
    for child in &node.children {
        write_element(xml, child)?;
    }
    xml.write_event(Event::End(BytesEnd::new(node.name.as_str())))?;
    Ok(())
}
