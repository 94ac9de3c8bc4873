//! `XmlReader`: token cursor over an XML document.

use std::collections::VecDeque;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{Scalar, ValueKind, WireError, WireFormat, WireReader, DEFAULT_MAX_DEPTH};

/// An element whose start tag has been read but whose content has not.
#[derive(Debug)]
struct Element {
    attrs: Vec<(String, String)>,
    array: bool,
    nil: bool,
    /// Self-closing: no content and no end event will follow.
    empty: bool,
}

#[derive(Debug)]
enum Pending {
    None,
    Document,
    Attr(String),
    Element(Element),
}

#[derive(Debug)]
struct Frame {
    attrs: VecDeque<(String, String)>,
    empty: bool,
    document: bool,
}

pub struct XmlReader<'a> {
    inner: Reader<&'a [u8]>,
    pending: Pending,
    stack: Vec<Frame>,
    max_depth: usize,
}

impl<'a> XmlReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            inner: Reader::from_reader(data),
            pending: Pending::Document,
            stack: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn syntax(&self, message: impl Into<String>) -> WireError {
        WireError::syntax(WireFormat::Xml, self.position(), message)
    }

    fn eof(&self) -> WireError {
        WireError::UnexpectedEof(WireFormat::Xml, self.position())
    }

    fn mismatch(&self, expected: &'static str, found: &'static str) -> WireError {
        WireError::Mismatch {
            expected,
            found,
            position: self.position(),
        }
    }

    fn next_event(&mut self) -> Result<Event<'a>, WireError> {
        self.inner
            .read_event()
            .map_err(|e| WireError::syntax(WireFormat::Xml, self.position(), e.to_string()))
    }

    fn element(&self, start: &BytesStart<'_>, empty: bool) -> Result<(String, Element), WireError> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|_| WireError::InvalidUtf8(self.position()))?
            .to_owned();
        let mut element = Element {
            attrs: Vec::new(),
            array: false,
            nil: false,
            empty,
        };
        for attr in start.attributes() {
            let attr = attr.map_err(|e| self.syntax(e.to_string()))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|_| WireError::InvalidUtf8(self.position()))?;
            let value = attr
                .unescape_value()
                .map_err(|e| self.syntax(e.to_string()))?;
            match key {
                "type" => element.array = value == "array",
                "nil" => element.nil = value == "true",
                k if k.starts_with("xmlns") || k.starts_with("xsi:") => {}
                _ => element.attrs.push((key.to_owned(), value.into_owned())),
            }
        }
        Ok((name, element))
    }

    fn push(&mut self, attrs: Vec<(String, String)>, empty: bool, document: bool) -> Result<(), WireError> {
        if self.stack.len() >= self.max_depth {
            return Err(WireError::TooDeep(self.max_depth));
        }
        self.stack.push(Frame {
            attrs: attrs.into(),
            empty,
            document,
        });
        Ok(())
    }

    /// Reads up to the next child element of the innermost frame and returns
    /// its name, or `None` after consuming the frame's end.
    fn next_child(&mut self) -> Result<Option<String>, WireError> {
        let (empty, document) = match self.stack.last() {
            Some(frame) => (frame.empty, frame.document),
            None => return Err(self.syntax("no open element")),
        };
        if empty {
            self.stack.pop();
            return Ok(None);
        }
        loop {
            match self.next_event()? {
                Event::Start(start) => {
                    let (name, element) = self.element(&start, false)?;
                    self.pending = Pending::Element(element);
                    return Ok(Some(name));
                }
                Event::Empty(start) => {
                    let (name, element) = self.element(&start, true)?;
                    self.pending = Pending::Element(element);
                    return Ok(Some(name));
                }
                Event::End(_) => {
                    self.stack.pop();
                    return Ok(None);
                }
                Event::Eof if document => {
                    self.stack.pop();
                    return Ok(None);
                }
                Event::Eof => return Err(self.eof()),
                // mixed-content text, comments, declarations
                _ => {}
            }
        }
    }

    /// Consumes events up to and including the end of the current element.
    fn skip_content(&mut self) -> Result<(), WireError> {
        let mut depth = 1usize;
        loop {
            match self.next_event()? {
                Event::Start(_) => depth += 1,
                Event::End(_) => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                Event::Eof => return Err(self.eof()),
                _ => {}
            }
        }
    }

    fn read_text(&mut self) -> Result<String, WireError> {
        let mut text = String::new();
        loop {
            match self.next_event()? {
                Event::Text(t) => {
                    let part = t.unescape().map_err(|e| self.syntax(e.to_string()))?;
                    text.push_str(&part);
                }
                Event::CData(c) => {
                    let part = std::str::from_utf8(&c)
                        .map_err(|_| WireError::InvalidUtf8(self.position()))?;
                    text.push_str(part);
                }
                Event::Start(_) | Event::Empty(_) => {
                    return Err(self.mismatch("scalar", "element"));
                }
                Event::End(_) => return Ok(text),
                Event::Eof => return Err(self.eof()),
                _ => {}
            }
        }
    }
}

impl WireReader for XmlReader<'_> {
    fn format(&self) -> WireFormat {
        WireFormat::Xml
    }

    fn position(&self) -> u64 {
        self.inner.buffer_position() as u64
    }

    fn peek_kind(&mut self) -> Result<ValueKind, WireError> {
        match &self.pending {
            Pending::None => Err(self.syntax("no pending value")),
            Pending::Document => Ok(ValueKind::Object),
            Pending::Attr(_) => Ok(ValueKind::Scalar),
            Pending::Element(e) if e.nil => Ok(ValueKind::Null),
            Pending::Element(e) if e.array => Ok(ValueKind::Array),
            Pending::Element(e) if !e.attrs.is_empty() => Ok(ValueKind::Object),
            Pending::Element(e) if e.empty => Ok(ValueKind::Null),
            Pending::Element(_) => Ok(ValueKind::Scalar),
        }
    }

    fn read_scalar(&mut self) -> Result<Scalar, WireError> {
        match std::mem::replace(&mut self.pending, Pending::None) {
            Pending::Attr(value) => Ok(Scalar::Text(value)),
            Pending::Element(e) if e.nil => {
                if !e.empty {
                    self.skip_content()?;
                }
                Ok(Scalar::Null)
            }
            Pending::Element(e) if e.array => Err(self.mismatch("scalar", "array")),
            Pending::Element(e) if e.empty => Ok(Scalar::Text(String::new())),
            Pending::Element(_) => Ok(Scalar::Text(self.read_text()?)),
            Pending::Document => Err(self.mismatch("scalar", "document")),
            Pending::None => Err(self.syntax("no pending value")),
        }
    }

    fn begin_object(&mut self) -> Result<(), WireError> {
        match std::mem::replace(&mut self.pending, Pending::None) {
            Pending::Document => self.push(Vec::new(), false, true),
            Pending::Element(e) if e.array => Err(self.mismatch("object", "array")),
            Pending::Element(e) => self.push(e.attrs, e.empty, false),
            Pending::Attr(_) => Err(self.mismatch("object", "attribute")),
            Pending::None => Err(self.syntax("no pending value")),
        }
    }

    fn next_key(&mut self) -> Result<Option<String>, WireError> {
        if let Some(frame) = self.stack.last_mut() {
            if let Some((key, value)) = frame.attrs.pop_front() {
                self.pending = Pending::Attr(value);
                return Ok(Some(key));
            }
        }
        self.next_child()
    }

    fn begin_array(&mut self) -> Result<Vec<(String, String)>, WireError> {
        match std::mem::replace(&mut self.pending, Pending::None) {
            Pending::Element(e) => {
                self.push(Vec::new(), e.empty, false)?;
                Ok(e.attrs)
            }
            Pending::Document => Err(self.mismatch("array", "document")),
            Pending::Attr(_) => Err(self.mismatch("array", "attribute")),
            Pending::None => Err(self.syntax("no pending value")),
        }
    }

    fn next_item(&mut self) -> Result<bool, WireError> {
        Ok(self.next_child()?.is_some())
    }

    fn skip_value(&mut self) -> Result<(), WireError> {
        match std::mem::replace(&mut self.pending, Pending::None) {
            Pending::None | Pending::Attr(_) => Ok(()),
            Pending::Element(e) if e.empty => Ok(()),
            Pending::Element(_) => self.skip_content(),
            Pending::Document => loop {
                if let Event::Eof = self.next_event()? {
                    return Ok(());
                }
            },
        }
    }

    fn finish(&mut self) -> Result<(), WireError> {
        if !self.stack.is_empty() {
            return Err(self.syntax("unclosed element"));
        }
        loop {
            match self.next_event()? {
                Event::Eof => return Ok(()),
                Event::Start(_) | Event::Empty(_) | Event::End(_) | Event::CData(_) => {
                    return Err(self.syntax("trailing content"));
                }
                Event::Text(t) if !t.iter().all(u8::is_ascii_whitespace) => {
                    return Err(self.syntax("trailing content"));
                }
                _ => {}
            }
        }
    }
}
