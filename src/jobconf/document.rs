//! Minimal read-only XML element tree.
//!
//! Built from `quick-xml` events without namespace processing: element names
//! are kept exactly as written, prefix included, and prefixes never need a
//! declaration. The tree keeps elements in document order and the text
//! (character data and CDATA) interleaved with child elements. Comments and
//! processing instructions are dropped.

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;
use std::collections::HashMap;

use super::XmlOptions;

#[derive(Debug)]
enum Content {
    Text(String),
    Child(usize),
}

#[derive(Debug)]
struct ElementData {
    name: String,
    content: Vec<Content>,
    /// One past the index of the last descendant
    end: usize,
}

/// A parsed, well-formed XML document.
#[derive(Debug)]
pub(crate) struct XmlDocument {
    elements: Vec<ElementData>,
}

/// An element of an [`XmlDocument`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Element<'d> {
    doc: &'d XmlDocument,
    index: usize,
}

impl XmlDocument {
    /// Parse `text`, enforcing `options`.
    ///
    /// # Errors
    /// Returns the reason, with the byte offset, when the document is not
    /// well-formed, exceeds the node limit, or carries a DTD that is not allowed.
    pub(crate) fn parse(text: &str, options: &XmlOptions) -> Result<Self, String> {
        let mut reader = Reader::from_str(text);
        let mut builder = TreeBuilder::new(options);

        loop {
            let event = reader
                .read_event()
                .map_err(|e| format!("{e} at byte {}", reader.error_position()))?;

            let step = match event {
                Event::Start(tag) => builder.open(&tag),
                Event::Empty(tag) => builder.open(&tag).map(|()| builder.close()),
                Event::End(_) => {
                    builder.close();
                    Ok(())
                }
                Event::Text(text) => {
                    let entities = &builder.entities;
                    text.unescape_with(|name| {
                        resolve_predefined_entity(name)
                            .or_else(|| entities.get(name).map(String::as_str))
                    })
                    .map(Cow::into_owned)
                    .map_err(|e| e.to_string())
                    .and_then(|text| builder.text(text))
                }
                Event::CData(data) => builder.text(String::from_utf8_lossy(&data).into_owned()),
                Event::DocType(doctype) => builder.doctype(&String::from_utf8_lossy(&doctype)),
                Event::Comment(_) | Event::PI(_) | Event::Decl(_) => Ok(()),
                Event::Eof => break,
            };
            step.map_err(|reason| format!("{reason} at byte {}", reader.buffer_position()))?;
        }

        builder.finish()
    }

    /// Every element in document order
    pub(crate) fn elements(&self) -> impl Iterator<Item = Element<'_>> {
        (0..self.elements.len()).map(move |index| Element { doc: self, index })
    }
}

impl<'d> Element<'d> {
    fn data(self) -> &'d ElementData {
        &self.doc.elements[self.index]
    }

    /// Tag name as written, prefix included
    pub(crate) fn name(self) -> &'d str {
        &self.data().name
    }

    /// Every element below this one, in document order
    pub(crate) fn descendants(self) -> impl Iterator<Item = Element<'d>> {
        let doc = self.doc;
        (self.index + 1..self.data().end).map(move |index| Element { doc, index })
    }

    /// All text below this element concatenated in document order
    pub(crate) fn text_content(self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(self, out: &mut String) {
        for content in &self.data().content {
            match content {
                Content::Text(text) => out.push_str(text),
                Content::Child(index) => Element {
                    doc: self.doc,
                    index: *index,
                }
                .collect_text(out),
            }
        }
    }
}

struct TreeBuilder<'o> {
    options: &'o XmlOptions,
    elements: Vec<ElementData>,
    open: Vec<usize>,
    entities: HashMap<String, String>,
    nodes: u32,
    root_closed: bool,
}

impl<'o> TreeBuilder<'o> {
    fn new(options: &'o XmlOptions) -> Self {
        Self {
            options,
            elements: Vec::new(),
            open: Vec::new(),
            entities: HashMap::new(),
            nodes: 0,
            root_closed: false,
        }
    }

    fn count_node(&mut self) -> Result<(), String> {
        self.nodes = self.nodes.saturating_add(1);
        if self.nodes > self.options.nodes_limit {
            return Err(format!(
                "document exceeds the limit of {} nodes",
                self.options.nodes_limit
            ));
        }
        Ok(())
    }

    fn open(&mut self, tag: &BytesStart<'_>) -> Result<(), String> {
        if self.open.is_empty() && self.root_closed {
            return Err("content after the root element".to_string());
        }
        for attribute in tag.attributes() {
            attribute.map_err(|e| e.to_string())?;
        }
        self.count_node()?;

        let index = self.elements.len();
        if let Some(&parent) = self.open.last() {
            self.elements[parent].content.push(Content::Child(index));
        }
        self.elements.push(ElementData {
            name: String::from_utf8_lossy(tag.name().as_ref()).into_owned(),
            content: Vec::new(),
            end: index + 1,
        });
        self.open.push(index);
        Ok(())
    }

    fn close(&mut self) {
        if let Some(index) = self.open.pop() {
            self.elements[index].end = self.elements.len();
            if self.open.is_empty() {
                self.root_closed = true;
            }
        }
    }

    fn text(&mut self, text: String) -> Result<(), String> {
        match self.open.last() {
            Some(&parent) => {
                self.count_node()?;
                self.elements[parent].content.push(Content::Text(text));
                Ok(())
            }
            None if text.chars().all(is_xml_whitespace) => Ok(()),
            None => Err("text outside the root element".to_string()),
        }
    }

    fn doctype(&mut self, doctype: &str) -> Result<(), String> {
        if !self.options.allow_dtd {
            return Err("DTD is not allowed".to_string());
        }
        if !self.elements.is_empty() {
            return Err("DTD after the root element".to_string());
        }
        self.entities = entity_declarations(doctype);
        Ok(())
    }

    fn finish(self) -> Result<XmlDocument, String> {
        if let Some(&index) = self.open.last() {
            return Err(format!(
                "unexpected end of document, <{}> is not closed",
                self.elements[index].name
            ));
        }
        if self.elements.is_empty() {
            return Err("document has no root element".to_string());
        }
        Ok(XmlDocument {
            elements: self.elements,
        })
    }
}

fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Internal general entities declared as `<!ENTITY name "value">`.
///
/// Parameter and external entities are skipped. The first declaration of a
/// name wins.
fn entity_declarations(doctype: &str) -> HashMap<String, String> {
    const KEYWORD: &str = "<!ENTITY";

    let mut entities = HashMap::new();
    let mut rest = doctype;
    while let Some(pos) = rest.find(KEYWORD) {
        rest = &rest[pos + KEYWORD.len()..];
        let decl = rest.trim_start();
        if decl.starts_with('%') {
            continue;
        }

        let name_end = decl.find(char::is_whitespace).unwrap_or(decl.len());
        let (name, tail) = decl.split_at(name_end);
        let tail = tail.trim_start();
        let Some(quote) = tail.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            continue;
        };
        let value = &tail[1..];
        if let Some(end) = value.find(quote) {
            entities
                .entry(name.to_string())
                .or_insert_with(|| value[..end].to_string());
        }
    }
    entities
}
