//! `XmlWriter`: emits an XML document without indentation.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::{Scalar, WireError, WireFormat, WireWriter};

#[derive(Debug)]
struct Frame {
    name: String,
    /// Element name of the items when this frame is an array wrapper.
    item: Option<String>,
}

pub struct XmlWriter {
    inner: Writer<Vec<u8>>,
    stack: Vec<Frame>,
    declaration: bool,
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self {
            inner: Writer::new(Vec::new()),
            stack: Vec::new(),
            declaration: false,
        }
    }
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefixes the document with `<?xml version="1.0" encoding="UTF-8"?>`.
    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    fn emit(&mut self, event: Event<'_>) -> Result<(), WireError> {
        self.inner
            .write_event(event)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        Ok(())
    }

    fn element<'a>(
        &mut self,
        name: &'a str,
        attrs: &[(&str, Scalar)],
        array: bool,
    ) -> Result<BytesStart<'a>, WireError> {
        if self.declaration && self.inner.get_ref().is_empty() {
            self.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        let mut start = BytesStart::new(name);
        if array {
            start.push_attribute(("type", "array"));
        }
        for (key, value) in attrs {
            if let Some(text) = value.as_text() {
                start.push_attribute((*key, text));
            }
        }
        Ok(start)
    }

    fn start_tag(
        &mut self,
        name: &str,
        attrs: &[(&str, Scalar)],
        array: bool,
    ) -> Result<(), WireError> {
        let start = self.element(name, attrs, array)?;
        self.emit(Event::Start(start))
    }

    fn end_tag(&mut self, name: &str) -> Result<(), WireError> {
        self.emit(Event::End(BytesEnd::new(name)))
    }

    fn item_name(&self) -> Result<String, WireError> {
        match self.stack.last() {
            Some(Frame { item: Some(item), .. }) => Ok(item.clone()),
            _ => Err(WireError::Writer("item outside of an array")),
        }
    }

    fn close(&mut self, array: bool) -> Result<(), WireError> {
        match self.stack.pop() {
            Some(frame) if frame.item.is_some() == array => self.end_tag(&frame.name),
            _ => Err(WireError::Writer("unbalanced close")),
        }
    }
}

impl WireWriter for XmlWriter {
    fn format(&self) -> WireFormat {
        WireFormat::Xml
    }

    fn begin_object(&mut self, key: &str, attrs: &[(&str, Scalar)]) -> Result<(), WireError> {
        self.start_tag(key, attrs, false)?;
        self.stack.push(Frame {
            name: key.to_owned(),
            item: None,
        });
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), WireError> {
        self.close(false)
    }

    fn write_value(&mut self, key: &str, value: &Scalar) -> Result<(), WireError> {
        match value.as_text() {
            Some(text) => {
                self.start_tag(key, &[], false)?;
                if !text.is_empty() {
                    self.emit(Event::Text(BytesText::new(text)))?;
                }
                self.end_tag(key)
            }
            None => {
                let mut empty = self.element(key, &[], false)?;
                empty.push_attribute(("nil", "true"));
                self.emit(Event::Empty(empty))
            }
        }
    }

    fn begin_array(&mut self, key: &str, item: &str) -> Result<(), WireError> {
        self.start_tag(key, &[], true)?;
        self.stack.push(Frame {
            name: key.to_owned(),
            item: Some(item.to_owned()),
        });
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), WireError> {
        self.close(true)
    }

    fn begin_item(&mut self, attrs: &[(&str, Scalar)]) -> Result<(), WireError> {
        let item = self.item_name()?;
        self.begin_object(&item, attrs)
    }

    fn end_item(&mut self) -> Result<(), WireError> {
        self.close(false)
    }

    fn write_item(&mut self, value: &Scalar) -> Result<(), WireError> {
        let item = self.item_name()?;
        self.write_value(&item, value)
    }

    fn finish(&mut self) -> Result<Vec<u8>, WireError> {
        if !self.stack.is_empty() {
            return Err(WireError::Writer("unclosed structure"));
        }
        Ok(std::mem::take(self.inner.get_mut()))
    }
}
