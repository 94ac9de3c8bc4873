//! Collection codec.
//!
//! A list field decodes to `Option<Vec<T>>`:
//!
//! - field absent or JSON `null` → `None`;
//! - `[]` / `<field type="array"/>` → `Some(vec![])`;
//! - a wrapped array → all items, replacing the slot only once every item
//!   decoded;
//! - anything else is one item of a repeated-sibling list and is appended.
//!
//! Array items and sibling items go through the same item routine, so a
//! caller matches both `watcher_user_ids` and `watcher_user_id` to one call.

use redmine_wire::{ValueKind, WireReader, WireWriter};

use crate::convert::Entity;
use crate::error::Result;
use crate::registry;
use crate::scalar::{self, FromWire, ToWire};

/// Reads a list-position value into `slot` using `item` for each element.
pub fn read_list<T, F>(reader: &mut dyn WireReader, slot: &mut Option<Vec<T>>, mut item: F) -> Result<()>
where
    F: FnMut(&mut dyn WireReader) -> Result<T>,
{
    match reader.peek_kind()? {
        ValueKind::Null => {
            reader.skip_value()?;
        }
        ValueKind::Array => {
            reader.begin_array()?;
            let mut items = Vec::new();
            while reader.next_item()? {
                items.push(item(reader)?);
            }
            *slot = Some(items);
        }
        ValueKind::Scalar | ValueKind::Object => {
            let value = item(reader)?;
            slot.get_or_insert_with(Vec::new).push(value);
        }
    }
    Ok(())
}

/// Reads a list of nested entities through their registered converter.
pub fn read_entities<T: Entity>(reader: &mut dyn WireReader, slot: &mut Option<Vec<T>>) -> Result<()> {
    read_list(reader, slot, |r| registry::get::<T>().decode(r))
}

/// Reads a list of scalars; null items are a format error.
pub fn read_scalars<T: FromWire>(reader: &mut dyn WireReader, slot: &mut Option<Vec<T>>) -> Result<()> {
    read_list(reader, slot, |r| scalar::read_required::<T>(r))
}

/// Writes `key` as an array of entities, each under its converter's root.
pub fn write_entities<T: Entity>(writer: &mut dyn WireWriter, key: &str, items: Option<&[T]>) -> Result<()> {
    let Some(items) = items else {
        return Ok(());
    };
    let converter = registry::get::<T>();
    writer.begin_array(key, converter.root())?;
    for item in items {
        writer.begin_item(&converter.attributes(item))?;
        converter.encode_fields(item, writer)?;
        writer.end_item()?;
    }
    writer.end_array()?;
    Ok(())
}

/// Writes `key` as an array of scalars named `item` in XML.
pub fn write_scalars<I>(writer: &mut dyn WireWriter, key: &str, item: &str, values: Option<I>) -> Result<()>
where
    I: IntoIterator,
    I::Item: ToWire,
{
    let Some(values) = values else {
        return Ok(());
    };
    writer.begin_array(key, item)?;
    for value in values {
        writer.write_item(&value.to_wire())?;
    }
    writer.end_array()?;
    Ok(())
}
