//! Builds [`Element`] trees from XML text with quick-xml's pull reader.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{Element, LoadError};

/// Parses a complete document and returns its root element.
///
/// Comments, processing instructions, the XML declaration and the doctype
/// are dropped. Text after an element's first child is ignored, so
/// [`Element::text`] only ever holds the leading character data.
pub(crate) fn parse_root(input: &str) -> Result<Element, LoadError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if stack.is_empty() && root.is_some() {
                    return Err(LoadError::malformed(position, "multiple root elements"));
                }
                stack.push(open_element(&start, position)?);
            }
            Ok(Event::Empty(start)) => {
                let element = open_element(&start, position)?;
                close_element(&mut stack, &mut root, element, position)?;
            }
            Ok(Event::End(_)) => {
                let Some(element) = stack.pop() else {
                    return Err(LoadError::malformed(position, "unexpected closing tag"));
                };
                close_element(&mut stack, &mut root, element, position)?;
            }
            Ok(Event::Text(text)) => {
                let text =
                    text.unescape().map_err(|err| LoadError::malformed(position, err.to_string()))?;
                append_text(&mut stack, &text, position)?;
            }
            Ok(Event::CData(data)) => {
                let text = std::str::from_utf8(&data)
                    .map_err(|err| LoadError::malformed(position, err.to_string()))?;
                append_text(&mut stack, text, position)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => {
                return Err(LoadError::malformed(reader.error_position(), err.to_string()));
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(LoadError::malformed(
            reader.buffer_position(),
            format!("unclosed element <{}>", open.name()),
        ));
    }
    root.ok_or_else(|| LoadError::malformed(reader.buffer_position(), "no root element"))
}

fn open_element(start: &BytesStart<'_>, position: u64) -> Result<Element, LoadError> {
    let qname = start.name();
    let name = std::str::from_utf8(qname.as_ref())
        .map_err(|err| LoadError::malformed(position, err.to_string()))?;
    let mut element = Element::new(name);
    for attribute in start.attributes() {
        let attribute =
            attribute.map_err(|err| LoadError::malformed(position, err.to_string()))?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|err| LoadError::malformed(position, err.to_string()))?
            .to_string();
        let value = attribute
            .unescape_value()
            .map_err(|err| LoadError::malformed(position, err.to_string()))?
            .into_owned();
        element.push_attribute(key, value);
    }
    Ok(element)
}

fn close_element(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    position: u64,
) -> Result<(), LoadError> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(LoadError::malformed(position, "multiple root elements"));
    }
    *root = Some(element);
    Ok(())
}

fn append_text(stack: &mut [Element], text: &str, position: u64) -> Result<(), LoadError> {
    match stack.last_mut() {
        Some(current) => {
            if current.children().is_empty() {
                current.append_text(text);
            }
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(LoadError::malformed(position, "text outside the root element")),
    }
}
