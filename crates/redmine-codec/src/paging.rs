//! Paged-result unwrapper.
//!
//! A list payload is `{"issues":[...],"total_count":1640,"offset":0,"limit":25}`
//! in JSON and `<issues type="array" total_count="1640" offset="0" limit="25">`
//! in XML. Both present the metadata as plain keys: JSON at document level,
//! XML as attributes returned by [`WireReader::begin_array`].

use redmine_wire::{ValueKind, WireReader};

use crate::convert::{skip_unknown, Entity};
use crate::error::{Error, Result};
use crate::registry;
use crate::scalar::{self, FromWire};

/// One page of a collection.
#[derive(Clone, Debug, PartialEq)]
pub struct PagedList<T> {
    /// Size of the whole collection server-side; the item count when the
    /// payload does not say.
    pub total_count: u32,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub items: Vec<T>,
}

impl<T> PagedList<T> {
    /// Whether pages follow this one. Unknown without `limit`.
    pub fn has_more(&self) -> bool {
        match self.limit {
            Some(_) => {
                let seen = self.offset.unwrap_or(0) as u64 + self.items.len() as u64;
                seen < self.total_count as u64
            }
            None => false,
        }
    }
}

impl<T> IntoIterator for PagedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[derive(Default)]
struct Meta {
    total_count: Option<u32>,
    offset: Option<u32>,
    limit: Option<u32>,
}

impl Meta {
    /// `None` for keys that are not paging metadata.
    fn slot(&mut self, key: &str) -> Option<&mut Option<u32>> {
        match key {
            "total_count" => Some(&mut self.total_count),
            "offset" => Some(&mut self.offset),
            "limit" => Some(&mut self.limit),
            _ => None,
        }
    }
}

fn attribute<T: FromWire>(text: &str, position: u64) -> Result<Option<T>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    T::from_text(trimmed).map(Some).ok_or_else(|| Error::ValueFormat {
        expected: T::EXPECTED,
        text: text.to_owned(),
        position,
    })
}

/// Reads a whole list document positioned before its opening marker.
pub fn read_paged<T: Entity>(reader: &mut dyn WireReader) -> Result<PagedList<T>> {
    let converter = registry::get::<T>();
    let collection = converter.collection();
    let mut meta = Meta::default();
    let mut items = None;

    reader.begin_object()?;
    while let Some(key) = reader.next_key()? {
        if key == collection {
            if reader.peek_kind()? == ValueKind::Null {
                reader.skip_value()?;
                items = Some(Vec::new());
                continue;
            }
            let position = reader.position();
            for (name, value) in reader.begin_array()? {
                match meta.slot(&name) {
                    Some(slot) => *slot = attribute(&value, position)?,
                    None => {
                        tracing::trace!(collection, attribute = %name, "skipping unknown attribute")
                    }
                }
            }
            let mut list = Vec::new();
            while reader.next_item()? {
                list.push(converter.decode(reader)?);
            }
            items = Some(list);
        } else if let Some(slot) = meta.slot(&key) {
            *slot = scalar::read::<u32>(reader)?;
        } else {
            skip_unknown(collection, &key, reader)?;
        }
    }
    reader.finish()?;

    let items = items.ok_or(Error::MissingCollection(collection))?;
    let total_count = match meta.total_count {
        Some(total) => total,
        None => u32::try_from(items.len()).unwrap_or(u32::MAX),
    };
    Ok(PagedList {
        total_count,
        offset: meta.offset,
        limit: meta.limit,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::IssueStatus;
    use redmine_wire::json::JsonReader;
    use redmine_wire::xml::XmlReader;

    #[test]
    fn json_metadata_sits_beside_the_list() {
        let doc = br#"{"issue_statuses":[{"id":1,"name":"New"},{"id":5,"name":"Closed","is_closed":true}],"total_count":40,"offset":10,"limit":2}"#;
        let page = read_paged::<IssueStatus>(&mut JsonReader::new(doc)).unwrap();
        assert_eq!(page.total_count, 40);
        assert_eq!(page.offset, Some(10));
        assert_eq!(page.limit, Some(2));
        assert_eq!(page.items.len(), 2);
        assert!(page.items[1].is_closed);
        assert!(page.has_more());
    }

    #[test]
    fn xml_metadata_sits_on_the_wrapper() {
        let doc = br#"<issue_statuses type="array" total_count="2" limit="25"><issue_status><id>1</id><name>New</name></issue_status><issue_status><id>2</id></issue_status></issue_statuses>"#;
        let page = read_paged::<IssueStatus>(&mut XmlReader::new(doc)).unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.offset, None);
        assert_eq!(page.limit, Some(25));
        assert_eq!(page.items[0].name, "New");
        assert!(!page.has_more());

        let doc = br#"<issue_statuses type="array" total_count="2" generated_by="redmine-6"><issue_status><id>1</id></issue_status><issue_status><id>2</id></issue_status></issue_statuses>"#;
        let page = read_paged::<IssueStatus>(&mut XmlReader::new(doc)).unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn total_defaults_to_item_count() {
        let doc = br#"{"issue_statuses":[{"id":1},{"id":2},{"id":3}]}"#;
        let page = read_paged::<IssueStatus>(&mut JsonReader::new(doc)).unwrap();
        assert_eq!(page.total_count, 3);
        assert_eq!(page.into_iter().map(|s| s.id).collect::<Vec<_>>(), [1, 2, 3]);
    }

    #[test]
    fn missing_collection_is_structural() {
        let err = read_paged::<IssueStatus>(&mut JsonReader::new(br#"{"trackers":[]}"#)).unwrap_err();
        assert!(matches!(err, Error::MissingCollection("issue_statuses")));
    }

    #[test]
    fn malformed_metadata_is_a_format_error() {
        let doc = br#"<issue_statuses type="array" total_count="many"/>"#;
        let err = read_paged::<IssueStatus>(&mut XmlReader::new(doc)).unwrap_err();
        assert!(matches!(err, Error::ValueFormat { .. }));
    }
}
