use redmine_wire::WireReader;

use crate::collection;
use crate::convert::{read_id, Entity};
use crate::error::Result;
use crate::reference::{self, IdentifiableName};
use crate::scalar;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tracker {
    pub id: u32,
    pub name: String,
    pub default_status: Option<IdentifiableName>,
    pub description: Option<String>,
    /// Standard issue fields enabled for this tracker.
    pub enabled_standard_fields: Option<Vec<TrackerCoreField>>,
}

impl Entity for Tracker {
    const ROOT: &'static str = "tracker";
    const COLLECTION: &'static str = "trackers";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "name" => self.name = scalar::read(r)?.unwrap_or_default(),
            "default_status" => self.default_status = reference::read(r)?,
            "description" => self.description = scalar::read(r)?,
            "enabled_standard_fields" => {
                collection::read_entities(r, &mut self.enabled_standard_fields)?
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Name of a standard issue field, e.g. `assigned_to_id`.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct TrackerCoreField {
    pub name: String,
}

impl Entity for TrackerCoreField {
    const ROOT: &'static str = "field";
    const COLLECTION: &'static str = "enabled_standard_fields";
    const TEXT_FORM: bool = true;

    fn read_field(&mut self, _key: &str, _r: &mut dyn WireReader) -> Result<bool> {
        Ok(false)
    }

    fn read_text(&mut self, text: String) {
        self.name = text;
    }
}

named_entity! {
    /// Tracker a custom field applies to.
    TrackerCustomField, "tracker", "trackers"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Codec;

    #[test]
    fn trackers_with_standard_fields() {
        let json = br#"{"trackers":[{"id":1,"name":"Bug","default_status":{"id":1,"name":"New"},"description":null,"enabled_standard_fields":["assigned_to_id","category_id"]}]}"#;
        let xml = br#"<trackers type="array"><tracker><id>1</id><name>Bug</name><default_status id="1" name="New"/><description/><enabled_standard_fields type="array"><field>assigned_to_id</field><field>category_id</field></enabled_standard_fields></tracker></trackers>"#;
        let from_json = Codec::json().decode_list::<Tracker>(json).unwrap();
        let from_xml = Codec::xml().decode_list::<Tracker>(xml).unwrap();
        assert_eq!(from_json, from_xml);
        let fields: Vec<_> = from_json[0]
            .enabled_standard_fields
            .iter()
            .flatten()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(fields, ["assigned_to_id", "category_id"]);
        assert_eq!(from_json[0].default_status, Some(IdentifiableName::new(1, "New")));
    }
}
