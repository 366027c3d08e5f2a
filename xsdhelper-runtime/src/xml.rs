//! XML serializer for wrapped-class instances.
//!
//! The document root is named after the serializer's type. A null instance
//! is written as an empty root carrying `xsi:nil="true"`.

use crate::fault::Fault;
use crate::value::{Content, Element};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// XML Schema instance namespace.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Serializes `instance` as a document rooted at `root`.
///
/// The root takes the type name; the instance's own name is not written.
///
/// # Errors
/// Returns `Fault::Io` if writing fails.
pub fn write_document(root: &str, instance: Option<&Element>) -> Result<Vec<u8>, Fault> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    match instance {
        None => {
            let mut start = BytesStart::new(root);
            start.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
            start.push_attribute(("xsi:nil", "true"));
            writer.write_event(Event::Empty(start))?;
        }
        Some(element) => write_element(&mut writer, root, &element.content)?,
    }

    Ok(writer.into_inner())
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    content: &Content,
) -> Result<(), Fault> {
    match content {
        Content::Children(children) if children.is_empty() => {
            writer.write_event(Event::Empty(BytesStart::new(name)))?;
        }
        Content::Children(children) => {
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            for child in children {
                write_element(writer, &child.name, &child.content)?;
            }
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
        Content::Text(text) => {
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            if !text.is_empty() {
                writer.write_event(Event::Text(BytesText::new(text)))?;
            }
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
    }
    Ok(())
}

/// Element under construction.
struct Open {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Open {
    fn new(name: String) -> Self {
        Self {
            name,
            text: String::new(),
            children: Vec::new(),
        }
    }

    fn finish(self) -> Result<Element, Fault> {
        if self.children.is_empty() {
            return Ok(Element::text(self.name, self.text));
        }
        if !self.text.trim().is_empty() {
            return Err(Fault::invalid_document(format!(
                "element '{}' mixes text and elements",
                self.name
            )));
        }
        Ok(Element::with_children(self.name, self.children))
    }
}

/// Parses a document whose root must be named `root`.
///
/// # Returns
/// `None` for a nil root, otherwise the instance.
///
/// # Errors
/// Returns `Fault::Xml` for malformed XML and `Fault::InvalidDocument` for a
/// wrong root or unsupported content.
pub fn read_document(xml: &str, root: &str) -> Result<Option<Element>, Fault> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut stack: Vec<Open> = Vec::new();
    let mut result: Option<Option<Element>> = None;
    let mut nil_root = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let name = utf8(e.name().as_ref())?.to_string();
                if stack.is_empty() {
                    check_root(&name, root, result.is_some())?;
                    nil_root = is_nil(e)?;
                }
                stack.push(Open::new(name));
            }
            Event::Empty(ref e) => {
                let name = utf8(e.name().as_ref())?.to_string();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Element::with_children(name, vec![])),
                    None => {
                        check_root(&name, root, result.is_some())?;
                        result = Some(if is_nil(e)? {
                            None
                        } else {
                            Some(Element::with_children(name, vec![]))
                        });
                    }
                }
            }
            Event::End(_) => {
                let open = stack
                    .pop()
                    .ok_or_else(|| Fault::invalid_document("unbalanced end tag"))?;
                let element = open.finish()?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => result = Some((!nil_root).then_some(element)),
                }
            }
            Event::Text(ref t) => {
                let text = utf8(t.as_ref())?;
                match stack.last_mut() {
                    Some(open) => open.text.push_str(text),
                    None if text.trim().is_empty() => {}
                    None => return Err(Fault::invalid_document("text outside root element")),
                }
            }
            Event::CData(ref t) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(utf8(t)?);
                }
            }
            Event::GeneralRef(ref r) => {
                let resolved = resolve_reference(utf8(r)?)?;
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(Fault::invalid_document("unexpected end of document"));
    }
    result.ok_or_else(|| Fault::invalid_document("document has no root element"))
}

fn utf8(bytes: &[u8]) -> Result<&str, Fault> {
    std::str::from_utf8(bytes).map_err(|e| Fault::invalid_document(e.to_string()))
}

fn check_root(name: &str, root: &str, seen: bool) -> Result<(), Fault> {
    if seen {
        return Err(Fault::invalid_document("more than one root element"));
    }
    if name != root {
        return Err(Fault::invalid_document(format!(
            "expected root '{root}', found '{name}'"
        )));
    }
    Ok(())
}

fn is_nil(start: &BytesStart<'_>) -> Result<bool, Fault> {
    for attr in start.attributes().flatten() {
        if attr.key.as_ref() == b"xsi:nil" {
            return Ok(utf8(&attr.value)? == "true");
        }
    }
    Ok(false)
}

/// Resolves `&name;` where `name` is a predefined entity or character
/// reference.
fn resolve_reference(name: &str) -> Result<String, Fault> {
    if let Some(code) = name.strip_prefix('#') {
        let parsed = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => code.parse::<u32>(),
        };
        return parsed
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .ok_or_else(|| {
                Fault::invalid_document(format!("invalid character reference '{name}'"))
            });
    }
    quick_xml::escape::resolve_predefined_entity(name)
        .map(str::to_string)
        .ok_or_else(|| Fault::invalid_document(format!("unknown entity '{name}'")))
}
