//! `JsonReader`: forward-only token cursor over a JSON document.
//!
//! The byte-level scanning follows a classic hand-written decoder: a data
//! slice plus a cursor `x`, whitespace skipping, and lexical readers for
//! literals, numbers and strings. Structure is tracked on an explicit stack so
//! callers can pull one key or item at a time instead of materializing a
//! value tree.

use super::util::{decode_json_string, find_ending_quote};
use crate::{Scalar, ValueKind, WireError, WireFormat, WireReader, DEFAULT_MAX_DEPTH};

#[derive(Clone, Copy, Debug)]
struct Frame {
    object: bool,
    /// `true` until the first member has been announced.
    first: bool,
}

pub struct JsonReader<'a> {
    data: &'a [u8],
    x: usize,
    stack: Vec<Frame>,
    max_depth: usize,
}

impl<'a> JsonReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            x: 0,
            stack: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn skip_whitespace(&mut self) {
        while self.x < self.data.len() {
            match self.data[self.x] {
                b' ' | b'\t' | b'\n' | b'\r' => self.x += 1,
                _ => break,
            }
        }
    }

    fn syntax(&self, message: impl Into<String>) -> WireError {
        WireError::syntax(WireFormat::Json, self.x as u64, message)
    }

    fn eof(&self) -> WireError {
        WireError::UnexpectedEof(WireFormat::Json, self.x as u64)
    }

    /// Skips whitespace and returns the next byte without consuming it.
    fn peek_byte(&mut self) -> Result<u8, WireError> {
        self.skip_whitespace();
        self.data.get(self.x).copied().ok_or_else(|| self.eof())
    }

    fn expect(&mut self, byte: u8) -> Result<(), WireError> {
        if self.peek_byte()? != byte {
            return Err(self.syntax(format!("expected `{}`", byte as char)));
        }
        self.x += 1;
        Ok(())
    }

    fn read_literal(&mut self, literal: &[u8]) -> Result<(), WireError> {
        let end = self.x + literal.len();
        if end > self.data.len() {
            return Err(self.eof());
        }
        if &self.data[self.x..end] != literal {
            return Err(self.syntax("invalid literal"));
        }
        self.x = end;
        Ok(())
    }

    fn read_num(&mut self) -> Result<String, WireError> {
        let start = self.x;
        let data = self.data;
        let len = data.len();
        let mut x = self.x;

        if x < len && data[x] == b'-' {
            x += 1;
        }
        let digits_start = x;
        while x < len && data[x].is_ascii_digit() {
            x += 1;
        }
        if x == digits_start {
            return Err(self.syntax("expected digit"));
        }
        if x < len && data[x] == b'.' {
            x += 1;
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
        }
        if x < len && (data[x] == b'e' || data[x] == b'E') {
            x += 1;
            if x < len && (data[x] == b'+' || data[x] == b'-') {
                x += 1;
            }
            while x < len && data[x].is_ascii_digit() {
                x += 1;
            }
        }
        self.x = x;
        // digits, sign, dot and exponent are all ASCII
        Ok(String::from_utf8_lossy(&data[start..x]).into_owned())
    }

    fn read_str(&mut self) -> Result<String, WireError> {
        if self.peek_byte()? != b'"' {
            return Err(self.syntax("expected string"));
        }
        let x0 = self.x + 1;
        let x1 = find_ending_quote(self.data, x0).ok_or_else(|| self.eof())?;
        let s = decode_json_string(&self.data[x0..x1])
            .ok_or(WireError::InvalidUtf8(x0 as u64))?;
        self.x = x1 + 1;
        Ok(s)
    }

    fn push(&mut self, object: bool) -> Result<(), WireError> {
        if self.stack.len() >= self.max_depth {
            return Err(WireError::TooDeep(self.max_depth));
        }
        self.stack.push(Frame {
            object,
            first: true,
        });
        Ok(())
    }

    /// Consumes the member separator of the innermost frame, if due.
    fn separate(&mut self) -> Result<(), WireError> {
        let first = match self.stack.last_mut() {
            Some(frame) => std::mem::replace(&mut frame.first, false),
            None => return Err(self.syntax("no open container")),
        };
        if !first {
            self.expect(b',')?;
        }
        Ok(())
    }

    fn mismatch(&self, expected: &'static str, found: ValueKind) -> WireError {
        WireError::Mismatch {
            expected,
            found: found.name(),
            position: self.x as u64,
        }
    }
}

impl WireReader for JsonReader<'_> {
    fn format(&self) -> WireFormat {
        WireFormat::Json
    }

    fn position(&self) -> u64 {
        self.x as u64
    }

    fn peek_kind(&mut self) -> Result<ValueKind, WireError> {
        Ok(match self.peek_byte()? {
            b'n' => ValueKind::Null,
            b'{' => ValueKind::Object,
            b'[' => ValueKind::Array,
            _ => ValueKind::Scalar,
        })
    }

    fn read_scalar(&mut self) -> Result<Scalar, WireError> {
        match self.peek_byte()? {
            b'"' => Ok(Scalar::Text(self.read_str()?)),
            b't' => {
                self.read_literal(b"true")?;
                Ok(Scalar::Bool(true))
            }
            b'f' => {
                self.read_literal(b"false")?;
                Ok(Scalar::Bool(false))
            }
            b'n' => {
                self.read_literal(b"null")?;
                Ok(Scalar::Null)
            }
            b'{' => Err(self.mismatch("scalar", ValueKind::Object)),
            b'[' => Err(self.mismatch("scalar", ValueKind::Array)),
            c if c.is_ascii_digit() || c == b'-' => Ok(Scalar::Number(self.read_num()?)),
            _ => Err(self.syntax("unexpected character")),
        }
    }

    fn begin_object(&mut self) -> Result<(), WireError> {
        match self.peek_byte()? {
            b'{' => {
                self.push(true)?;
                self.x += 1;
                Ok(())
            }
            b'[' => Err(self.mismatch("object", ValueKind::Array)),
            b'n' => Err(self.mismatch("object", ValueKind::Null)),
            _ => Err(self.mismatch("object", ValueKind::Scalar)),
        }
    }

    fn next_key(&mut self) -> Result<Option<String>, WireError> {
        match self.stack.last() {
            Some(frame) if frame.object => {}
            _ => return Err(self.syntax("no open object")),
        }
        if self.peek_byte()? == b'}' {
            self.x += 1;
            self.stack.pop();
            return Ok(None);
        }
        self.separate()?;
        let key = self.read_str()?;
        self.expect(b':')?;
        Ok(Some(key))
    }

    fn begin_array(&mut self) -> Result<Vec<(String, String)>, WireError> {
        match self.peek_byte()? {
            b'[' => {
                self.push(false)?;
                self.x += 1;
                Ok(Vec::new())
            }
            b'{' => Err(self.mismatch("array", ValueKind::Object)),
            b'n' => Err(self.mismatch("array", ValueKind::Null)),
            _ => Err(self.mismatch("array", ValueKind::Scalar)),
        }
    }

    fn next_item(&mut self) -> Result<bool, WireError> {
        match self.stack.last() {
            Some(frame) if !frame.object => {}
            _ => return Err(self.syntax("no open array")),
        }
        if self.peek_byte()? == b']' {
            self.x += 1;
            self.stack.pop();
            return Ok(false);
        }
        self.separate()?;
        Ok(true)
    }

    fn skip_value(&mut self) -> Result<(), WireError> {
        match self.peek_kind()? {
            ValueKind::Object => {
                self.begin_object()?;
                while self.next_key()?.is_some() {
                    self.skip_value()?;
                }
            }
            ValueKind::Array => {
                self.begin_array()?;
                while self.next_item()? {
                    self.skip_value()?;
                }
            }
            ValueKind::Null | ValueKind::Scalar => {
                self.read_scalar()?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), WireError> {
        if !self.stack.is_empty() {
            return Err(self.syntax("unclosed structure"));
        }
        self.skip_whitespace();
        if self.x < self.data.len() {
            return Err(self.syntax("trailing content"));
        }
        Ok(())
    }
}
