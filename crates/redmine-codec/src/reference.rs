//! Reference codec for the ubiquitous `{id, name}` association shape.
//!
//! A logical reference `project` may arrive as
//!
//! - `"project": {"id": 5, "name": "X"}` / `<project id="5" name="X"/>`
//! - `"project": {"id": 5}` / `<project id="5"/>`
//! - `"project_id": 5` / `<project_id>5</project_id>`
//!
//! and all three decode to the same [`IdentifiableName`] (with an empty name
//! in the latter two). Outbound references are written in the bare-id form
//! unless the caller asks for [`write_named`].

use redmine_wire::{Scalar, ValueKind, WireReader, WireWriter};

use crate::error::{Error, Result};
use crate::scalar::{self, ToWire};

/// A decoded `{id, name}` pair pointing at another entity.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct IdentifiableName {
    pub id: u32,
    pub name: String,
}

impl IdentifiableName {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// A write-time reference carrying only the id.
    pub fn id(id: u32) -> Self {
        Self {
            id,
            name: String::new(),
        }
    }
}

/// Reads the structured form. Null or an empty element yields `None`; a bare
/// scalar in this position is taken as the id.
pub fn read(reader: &mut dyn WireReader) -> Result<Option<IdentifiableName>> {
    match reader.peek_kind()? {
        ValueKind::Null => {
            reader.skip_value()?;
            Ok(None)
        }
        ValueKind::Scalar => read_bare_id(reader),
        ValueKind::Object => read_object(reader).map(Some),
        ValueKind::Array => Err(Error::Wire(redmine_wire::WireError::Mismatch {
            expected: "reference",
            found: "array",
            position: reader.position(),
        })),
    }
}

fn read_object(reader: &mut dyn WireReader) -> Result<IdentifiableName> {
    let position = reader.position();
    reader.begin_object()?;
    let mut id = None;
    let mut name = None;
    while let Some(key) = reader.next_key()? {
        match key.as_str() {
            "id" => id = scalar::read::<u32>(reader)?,
            "name" => name = scalar::read::<String>(reader)?,
            _ => reader.skip_value()?,
        }
    }
    let id = id.ok_or(Error::MissingId(position))?;
    Ok(IdentifiableName {
        id,
        name: name.unwrap_or_default(),
    })
}

/// Reads the bare-id alternate (`project_id`).
pub fn read_bare_id(reader: &mut dyn WireReader) -> Result<Option<IdentifiableName>> {
    Ok(scalar::read::<u32>(reader)?.map(IdentifiableName::id))
}

/// Writes `key: id` when a reference is present.
pub fn write_id(
    writer: &mut dyn WireWriter,
    key: &str,
    value: Option<&IdentifiableName>,
) -> Result<()> {
    match value {
        Some(value) => scalar::write(writer, key, &value.id),
        None => Ok(()),
    }
}

/// Writes the structured form with both id and name.
pub fn write_named(
    writer: &mut dyn WireWriter,
    key: &str,
    value: Option<&IdentifiableName>,
) -> Result<()> {
    if let Some(value) = value {
        writer.begin_object(key, &attributes(value))?;
        writer.end_object()?;
    }
    Ok(())
}

/// `id` and `name` as element attributes; used for reference-shaped items.
pub fn attributes(value: &IdentifiableName) -> Vec<(&'static str, Scalar)> {
    vec![("id", value.id.to_wire()), ("name", value.name.to_wire())]
}
