//! `Codec`: decode and encode whole Redmine payloads.

use std::io::{Read, Write};

use redmine_wire::json::{JsonReader, JsonWriter};
use redmine_wire::xml::{XmlReader, XmlWriter};
use redmine_wire::{WireFormat, WireReader, WireWriter};

use crate::collection;
use crate::convert::{skip_unknown, Entity};
use crate::error::{Error, Result};
use crate::options::CodecOptions;
use crate::paging::{self, PagedList};
use crate::registry;

/// Wire format plus options; cheap to clone and share.
#[derive(Clone, Debug)]
pub struct Codec {
    format: WireFormat,
    options: CodecOptions,
}

impl Codec {
    pub fn new(format: WireFormat, options: CodecOptions) -> Self {
        Self { format, options }
    }

    pub fn json() -> Self {
        Self::new(WireFormat::Json, CodecOptions::default())
    }

    pub fn xml() -> Self {
        Self::new(WireFormat::Xml, CodecOptions::default())
    }

    pub fn format(&self) -> WireFormat {
        self.format
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    fn reader<'a>(&self, input: &'a [u8]) -> Box<dyn WireReader + 'a> {
        match self.format {
            WireFormat::Json => Box::new(JsonReader::new(input).with_max_depth(self.options.max_depth)),
            WireFormat::Xml => Box::new(XmlReader::new(input).with_max_depth(self.options.max_depth)),
        }
    }

    fn writer(&self) -> Box<dyn WireWriter> {
        match self.format {
            WireFormat::Json => Box::new(JsonWriter::new()),
            WireFormat::Xml => {
                Box::new(XmlWriter::new().with_declaration(self.options.xml_declaration))
            }
        }
    }

    /// Decodes a single-entity payload wrapped in `T`'s root name.
    pub fn decode<T: Entity>(&self, input: &[u8]) -> Result<T> {
        let converter = registry::get::<T>();
        let mut reader = self.reader(input);
        let reader = reader.as_mut();
        reader.begin_object()?;
        match reader.next_key()? {
            Some(key) if key == converter.root() => {}
            found => {
                return Err(Error::UnexpectedRoot {
                    expected: converter.root(),
                    found: found.unwrap_or_default(),
                })
            }
        }
        let value = converter.decode(reader)?;
        while let Some(key) = reader.next_key()? {
            skip_unknown("document", &key, reader)?;
        }
        reader.finish()?;
        Ok(value)
    }

    /// Buffers `input` fully, then decodes it like [`Codec::decode`].
    pub fn decode_from<T: Entity, R: Read>(&self, mut input: R) -> Result<T> {
        let mut buf = Vec::new();
        input.read_to_end(&mut buf)?;
        self.decode(&buf)
    }

    /// Decodes a collection payload, dropping the paging metadata.
    pub fn decode_list<T: Entity>(&self, input: &[u8]) -> Result<Vec<T>> {
        Ok(self.decode_paged(input)?.items)
    }

    pub fn decode_paged<T: Entity>(&self, input: &[u8]) -> Result<PagedList<T>> {
        paging::read_paged(self.reader(input).as_mut())
    }

    /// Decodes a validation failure body (`{"errors":[...]}`).
    pub fn decode_errors(&self, input: &[u8]) -> Result<Vec<String>> {
        let mut reader = self.reader(input);
        let reader = reader.as_mut();
        let mut errors = None;
        reader.begin_object()?;
        while let Some(key) = reader.next_key()? {
            if key == "errors" {
                collection::read_scalars(reader, &mut errors)?;
            } else {
                skip_unknown("errors", &key, reader)?;
            }
        }
        reader.finish()?;
        errors.ok_or(Error::MissingCollection("errors"))
    }

    /// Validates and encodes `value` under its root name.
    pub fn encode<T: Entity>(&self, value: &T) -> Result<Vec<u8>> {
        let mut writer = self.writer();
        registry::get::<T>().encode(value, writer.as_mut())?;
        Ok(writer.finish()?)
    }

    /// Like [`Codec::encode`]; nothing reaches `out` unless encoding succeeded.
    pub fn encode_to<T: Entity, W: Write>(&self, value: &T, mut out: W) -> Result<()> {
        let buf = self.encode(value)?;
        out.write_all(&buf)?;
        out.flush()?;
        Ok(())
    }
}
