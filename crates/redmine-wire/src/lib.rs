//! Token cursors and emitters for the Redmine wire formats.
//!
//! Redmine speaks the same logical schema in two encodings:
//!
//! - JSON: `{"issue":{"id":1,"project":{"id":2,"name":"Tracker"}}}`
//! - XML: `<issue><id>1</id><project id="2" name="Tracker"/></issue>`
//!
//! This crate hides the difference behind two object-safe traits:
//!
//! - [`WireReader`] - a forward-only token cursor. The document is an object
//!   whose single key is the root wrapper; XML attributes are presented as
//!   leading keys of their element; an XML element carrying `type="array"`
//!   is an array whose child elements are the items.
//! - [`WireWriter`] - an emitter for objects, arrays and scalars. Attributes
//!   passed to [`WireWriter::begin_object`] become XML attributes or leading
//!   JSON fields.
//!
//! # Example
//!
//! ```
//! use redmine_wire::{json::JsonReader, Scalar, WireReader};
//!
//! let mut reader = JsonReader::new(br#"{"issue":{"id":7}}"#);
//! reader.begin_object().unwrap();
//! assert_eq!(reader.next_key().unwrap().as_deref(), Some("issue"));
//! reader.begin_object().unwrap();
//! assert_eq!(reader.next_key().unwrap().as_deref(), Some("id"));
//! assert_eq!(reader.read_scalar().unwrap(), Scalar::Number("7".into()));
//! assert_eq!(reader.next_key().unwrap(), None);
//! assert_eq!(reader.next_key().unwrap(), None);
//! reader.finish().unwrap();
//! ```

mod error;
mod format;
mod scalar;

pub mod json;
pub mod xml;

pub use error::WireError;
pub use format::WireFormat;
pub use scalar::{Scalar, ValueKind};

/// Default bound on object/array nesting accepted by the readers.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Forward-only token cursor over one wire document.
///
/// Every value announced by [`next_key`](Self::next_key) or
/// [`next_item`](Self::next_item) must be consumed exactly once, by one of
/// [`read_scalar`](Self::read_scalar), [`begin_object`](Self::begin_object),
/// [`begin_array`](Self::begin_array) or [`skip_value`](Self::skip_value).
pub trait WireReader {
    fn format(&self) -> WireFormat;

    /// Byte offset of the cursor, for error reports.
    fn position(&self) -> u64;

    /// Classifies the pending value without consuming it.
    ///
    /// XML cannot distinguish a text element from an element with only child
    /// elements before reading it; such elements report [`ValueKind::Scalar`].
    fn peek_kind(&mut self) -> Result<ValueKind, WireError>;

    fn read_scalar(&mut self) -> Result<Scalar, WireError>;

    fn begin_object(&mut self) -> Result<(), WireError>;

    /// Returns the next key of the innermost object, or `None` after
    /// consuming its closing marker.
    fn next_key(&mut self) -> Result<Option<String>, WireError>;

    /// Enters an array and returns the wrapper metadata (XML attributes other
    /// than `type`; always empty for JSON).
    fn begin_array(&mut self) -> Result<Vec<(String, String)>, WireError>;

    /// Advances to the next item of the innermost array, or returns `false`
    /// after consuming its closing marker.
    fn next_item(&mut self) -> Result<bool, WireError>;

    fn skip_value(&mut self) -> Result<(), WireError>;

    /// Asserts that nothing but whitespace follows the document.
    fn finish(&mut self) -> Result<(), WireError>;
}

/// Emitter for one wire document.
pub trait WireWriter {
    fn format(&self) -> WireFormat;

    fn begin_object(&mut self, key: &str, attrs: &[(&str, Scalar)]) -> Result<(), WireError>;

    fn end_object(&mut self) -> Result<(), WireError>;

    fn write_value(&mut self, key: &str, value: &Scalar) -> Result<(), WireError>;

    /// Opens an array under `key`; `item` names the XML element of each item.
    fn begin_array(&mut self, key: &str, item: &str) -> Result<(), WireError>;

    fn end_array(&mut self) -> Result<(), WireError>;

    fn begin_item(&mut self, attrs: &[(&str, Scalar)]) -> Result<(), WireError>;

    fn end_item(&mut self) -> Result<(), WireError>;

    fn write_item(&mut self, value: &Scalar) -> Result<(), WireError>;

    /// Closes every open structure and hands out the finished document.
    fn finish(&mut self) -> Result<Vec<u8>, WireError>;
}
