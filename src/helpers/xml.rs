//! XML writing utilities for SpreadsheetML output
//! Provides a writer wrapper and helper trait for element and text emission

use quick_xml::events::BytesDecl;
use quick_xml::events::BytesEnd;
use quick_xml::events::BytesPI;
use quick_xml::events::BytesStart;
use quick_xml::events::BytesText;
use quick_xml::events::Event;
use quick_xml::Writer;
use std::io::Write;

/// XML writer wrapper producing compact (unindented) markup
pub(crate) struct XmlWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlWriter<W> {
    pub(crate) fn new(inner: W) -> XmlWriter<W> {
        XmlWriter {
            writer: Writer::new(inner),
        }
    }

    /// Writes `<?xml version="1.0"?>` followed by a line break
    pub(crate) fn declaration(&mut self) -> std::io::Result<()> {
        self.writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;
        self.writer.get_mut().write_all(b"\n")
    }

    /// Writes a processing instruction followed by a line break
    pub(crate) fn processing_instruction(&mut self, content: &str) -> std::io::Result<()> {
        self.writer.write_event(Event::PI(BytesPI::new(content)))?;
        self.writer.get_mut().write_all(b"\n")
    }

    pub(crate) fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

/// Helper trait for emitting elements with attributes and escaped text
pub(crate) trait XmlWriterHelper {
    /// Opens an element
    fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> std::io::Result<()>;

    /// Closes an element
    fn end(&mut self, name: &str) -> std::io::Result<()>;

    /// Writes a self-closing element
    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> std::io::Result<()>;

    /// Writes escaped character data
    fn text(&mut self, content: &str) -> std::io::Result<()>;
}

fn element<'a>(name: &'a str, attributes: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut element = BytesStart::new(name);
    for attribute in attributes {
        element.push_attribute(*attribute);
    }
    element
}

impl<W: Write> XmlWriterHelper for XmlWriter<W> {
    fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> std::io::Result<()> {
        self.writer.write_event(Event::Start(element(name, attributes)))
    }

    fn end(&mut self, name: &str) -> std::io::Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> std::io::Result<()> {
        self.writer.write_event(Event::Empty(element(name, attributes)))
    }

    fn text(&mut self, content: &str) -> std::io::Result<()> {
        self.writer.write_event(Event::Text(BytesText::new(content)))
    }
}

#[macro_export]
macro_rules! write_xml_element {
    ($writer:expr, $name:expr, [$($attribute:expr),* $(,)?] => $body:block) => {{
        $writer.start($name, &[$($attribute),*])?;
        $body
        $writer.end($name)?;
    }};
}
