//! `JsonWriter`: emits a compact JSON document.
//!
//! The document is an object; the first structure opened at the top level
//! opens it implicitly and [`WireWriter::finish`] closes it.

use super::util::write_json_string;
use crate::{Scalar, WireError, WireFormat, WireWriter};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Frame {
    Object { first: bool },
    Array { first: bool },
}

#[derive(Default)]
pub struct JsonWriter {
    out: Vec<u8>,
    stack: Vec<Frame>,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_document(&mut self) {
        if self.out.is_empty() && self.stack.is_empty() {
            self.out.push(b'{');
            self.stack.push(Frame::Object { first: true });
        }
    }

    fn write_key(&mut self, key: &str) -> Result<(), WireError> {
        self.ensure_document();
        match self.stack.last_mut() {
            Some(Frame::Object { first }) => {
                if !std::mem::replace(first, false) {
                    self.out.push(b',');
                }
            }
            _ => return Err(WireError::Writer("keyed value outside of an object")),
        }
        write_json_string(&mut self.out, key);
        self.out.push(b':');
        Ok(())
    }

    fn write_separator(&mut self) -> Result<(), WireError> {
        match self.stack.last_mut() {
            Some(Frame::Array { first }) => {
                if !std::mem::replace(first, false) {
                    self.out.push(b',');
                }
                Ok(())
            }
            _ => Err(WireError::Writer("item outside of an array")),
        }
    }

    fn write_scalar(&mut self, value: &Scalar) {
        match value {
            Scalar::Null => self.out.extend_from_slice(b"null"),
            Scalar::Bool(true) => self.out.extend_from_slice(b"true"),
            Scalar::Bool(false) => self.out.extend_from_slice(b"false"),
            Scalar::Number(n) => self.out.extend_from_slice(n.as_bytes()),
            Scalar::Text(s) => write_json_string(&mut self.out, s),
        }
    }

    fn open_object(&mut self, attrs: &[(&str, Scalar)]) -> Result<(), WireError> {
        self.out.push(b'{');
        self.stack.push(Frame::Object { first: true });
        for (key, value) in attrs {
            if !value.is_null() {
                self.write_value(key, value)?;
            }
        }
        Ok(())
    }

    fn close(&mut self, expected_object: bool) -> Result<(), WireError> {
        match self.stack.pop() {
            Some(Frame::Object { .. }) if expected_object && !self.stack.is_empty() => {
                self.out.push(b'}');
                Ok(())
            }
            Some(Frame::Array { .. }) if !expected_object => {
                self.out.push(b']');
                Ok(())
            }
            _ => Err(WireError::Writer("unbalanced close")),
        }
    }
}

impl WireWriter for JsonWriter {
    fn format(&self) -> WireFormat {
        WireFormat::Json
    }

    fn begin_object(&mut self, key: &str, attrs: &[(&str, Scalar)]) -> Result<(), WireError> {
        self.write_key(key)?;
        self.open_object(attrs)
    }

    fn end_object(&mut self) -> Result<(), WireError> {
        self.close(true)
    }

    fn write_value(&mut self, key: &str, value: &Scalar) -> Result<(), WireError> {
        self.write_key(key)?;
        self.write_scalar(value);
        Ok(())
    }

    fn begin_array(&mut self, key: &str, _item: &str) -> Result<(), WireError> {
        self.write_key(key)?;
        self.out.push(b'[');
        self.stack.push(Frame::Array { first: true });
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), WireError> {
        self.close(false)
    }

    fn begin_item(&mut self, attrs: &[(&str, Scalar)]) -> Result<(), WireError> {
        self.write_separator()?;
        self.open_object(attrs)
    }

    fn end_item(&mut self) -> Result<(), WireError> {
        self.close(true)
    }

    fn write_item(&mut self, value: &Scalar) -> Result<(), WireError> {
        self.write_separator()?;
        self.write_scalar(value);
        Ok(())
    }

    fn finish(&mut self) -> Result<Vec<u8>, WireError> {
        self.ensure_document();
        if self.stack.len() != 1 {
            return Err(WireError::Writer("unclosed structure"));
        }
        self.stack.clear();
        self.out.push(b'}');
        Ok(std::mem::take(&mut self.out))
    }
}
