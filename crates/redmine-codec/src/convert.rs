//! Entity converters.
//!
//! Every record type implements [`Entity`]: a fixed `match` from wire keys to
//! fields on the read side, and its write-subset in a fixed order on the
//! write side. [`EntityConverter`] turns that table into the object-safe
//! [`Converter`] the registry hands out.

use std::marker::PhantomData;

use redmine_wire::{Scalar, ValueKind, WireReader, WireWriter};

use crate::error::Result;
use crate::scalar;

/// A typed Redmine record with a fixed wire mapping.
pub trait Entity: Default + Send + Sync + 'static {
    /// Name of the wrapper around a standalone payload (`issue`).
    const ROOT: &'static str;
    /// Key of the list in a collection payload (`issues`).
    const COLLECTION: &'static str;
    /// Whether the record may also arrive as bare text
    /// (`"permissions": ["add_issues"]`).
    const TEXT_FORM: bool = false;

    /// Consumes the value of `key` into `self`. Returns `false`, without
    /// touching the reader, when the key is not part of the mapping.
    fn read_field(&mut self, key: &str, reader: &mut dyn WireReader) -> Result<bool>;

    /// Stores the text of a bare-text item; only called when `TEXT_FORM` is set.
    fn read_text(&mut self, _text: String) {}

    /// Rejects records that must not be serialized.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Fields emitted as XML attributes (leading fields in JSON). Null values
    /// are omitted.
    fn write_attributes(&self) -> Vec<(&'static str, Scalar)> {
        Vec::new()
    }

    /// Emits the write-subset in wire order. Server-authoritative types keep
    /// the empty default.
    fn write_fields(&self, _writer: &mut dyn WireWriter) -> Result<()> {
        Ok(())
    }
}

/// Type-erased decode/encode routines for one record type.
pub trait Converter<T>: Send + Sync {
    fn root(&self) -> &'static str;

    fn collection(&self) -> &'static str;

    /// Decodes the pending value into a fresh record.
    fn decode(&self, reader: &mut dyn WireReader) -> Result<T>;

    fn validate(&self, value: &T) -> Result<()>;

    fn attributes(&self, value: &T) -> Vec<(&'static str, Scalar)>;

    /// Writes the fields inside an already opened structure.
    fn encode_fields(&self, value: &T, writer: &mut dyn WireWriter) -> Result<()>;

    /// Validates, then writes `value` under its root wrapper.
    fn encode(&self, value: &T, writer: &mut dyn WireWriter) -> Result<()> {
        self.validate(value)?;
        writer.begin_object(self.root(), &self.attributes(value))?;
        self.encode_fields(value, writer)?;
        writer.end_object()?;
        Ok(())
    }
}

/// The [`Converter`] for any [`Entity`].
pub struct EntityConverter<T>(PhantomData<fn() -> T>);

impl<T> EntityConverter<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for EntityConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Converter<T> for EntityConverter<T> {
    fn root(&self) -> &'static str {
        T::ROOT
    }

    fn collection(&self) -> &'static str {
        T::COLLECTION
    }

    fn decode(&self, reader: &mut dyn WireReader) -> Result<T> {
        let mut value = T::default();
        if T::TEXT_FORM && matches!(reader.peek_kind()?, ValueKind::Scalar | ValueKind::Null) {
            if let Some(text) = scalar::read::<String>(reader)? {
                value.read_text(text);
            }
            return Ok(value);
        }
        reader.begin_object()?;
        while let Some(key) = reader.next_key()? {
            if !value.read_field(&key, reader)? {
                skip_unknown(T::ROOT, &key, reader)?;
            }
        }
        Ok(value)
    }

    fn validate(&self, value: &T) -> Result<()> {
        value.validate()
    }

    fn attributes(&self, value: &T) -> Vec<(&'static str, Scalar)> {
        value.write_attributes()
    }

    fn encode_fields(&self, value: &T, writer: &mut dyn WireWriter) -> Result<()> {
        value.write_fields(writer)
    }
}

/// Consumes a value whose key the record does not map.
pub(crate) fn skip_unknown(entity: &'static str, key: &str, reader: &mut dyn WireReader) -> Result<()> {
    tracing::trace!(entity, key, "skipping unknown field");
    reader.skip_value()?;
    Ok(())
}

/// Reads an entity id; null and blank mean unsaved.
pub(crate) fn read_id(reader: &mut dyn WireReader) -> Result<u32> {
    Ok(scalar::read::<u32>(reader)?.unwrap_or_default())
}

/// Reads an optional nested record through the registry.
pub fn read_entity<T: Entity>(reader: &mut dyn WireReader) -> Result<Option<T>> {
    if reader.peek_kind()? == ValueKind::Null {
        reader.skip_value()?;
        return Ok(None);
    }
    crate::registry::get::<T>().decode(reader).map(Some)
}
