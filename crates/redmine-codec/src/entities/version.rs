use redmine_wire::{WireReader, WireWriter};
use time::{Date, OffsetDateTime};

use crate::collection;
use crate::convert::{read_id, Entity};
use crate::entities::IssueCustomField;
use crate::enums::{VersionSharing, VersionStatus};
use crate::error::Result;
use crate::reference::{self, IdentifiableName};
use crate::scalar;

/// A project version (milestone).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Version {
    pub id: u32,
    pub project: Option<IdentifiableName>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<VersionStatus>,
    pub due_date: Option<Date>,
    pub sharing: Option<VersionSharing>,
    pub wiki_page_title: Option<String>,
    pub estimated_hours: Option<f32>,
    pub spent_hours: Option<f32>,
    pub created_on: Option<OffsetDateTime>,
    pub updated_on: Option<OffsetDateTime>,
    pub custom_fields: Option<Vec<IssueCustomField>>,
}

impl Entity for Version {
    const ROOT: &'static str = "version";
    const COLLECTION: &'static str = "versions";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "project" => self.project = reference::read(r)?,
            "name" => self.name = scalar::read(r)?,
            "description" => self.description = scalar::read(r)?,
            "status" => self.status = scalar::read(r)?,
            "due_date" | "effective_date" => self.due_date = scalar::read(r)?,
            "sharing" => self.sharing = scalar::read(r)?,
            "wiki_page_title" => self.wiki_page_title = scalar::read(r)?,
            "estimated_hours" => self.estimated_hours = scalar::read(r)?,
            "spent_hours" => self.spent_hours = scalar::read(r)?,
            "created_on" => self.created_on = scalar::read(r)?,
            "updated_on" => self.updated_on = scalar::read(r)?,
            "custom_fields" => collection::read_entities(r, &mut self.custom_fields)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_fields(&self, w: &mut dyn WireWriter) -> Result<()> {
        scalar::write_opt(w, "name", self.name.as_ref())?;
        scalar::write_opt(w, "status", self.status.as_ref())?;
        scalar::write_opt(w, "sharing", self.sharing.as_ref())?;
        scalar::write_opt(w, "due_date", self.due_date.as_ref())?;
        scalar::write_opt(w, "description", self.description.as_ref())?;
        scalar::write_opt(w, "wiki_page_title", self.wiki_page_title.as_ref())?;
        collection::write_entities(w, "custom_fields", self.custom_fields.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::testing::{json, to_json, to_xml, xml};
    use time::macros::date;

    #[test]
    fn status_and_sharing_accept_names_and_codes() {
        let v: Version = json(
            r#"{"version":{"id":2,"project":{"id":1,"name":"Alpha"},"name":"1.0","status":"locked","sharing":"3","due_date":"2024-06-30","estimated_hours":12.5}}"#,
        );
        assert_eq!(v.status, Some(VersionStatus::Locked));
        assert_eq!(v.sharing, Some(VersionSharing::Tree));
        assert_eq!(v.due_date, Some(date!(2024 - 06 - 30)));

        let v: Version = xml(
            "<version><id>2</id><status>2</status><sharing>none</sharing><due_date></due_date></version>",
        );
        assert_eq!(v.status, Some(VersionStatus::Closed));
        assert_eq!(v.sharing, Some(VersionSharing::None));
        assert_eq!(v.due_date, None);
    }

    #[test]
    fn writes_enum_names() {
        let v = Version {
            name: Some("2.0".into()),
            status: Some(VersionStatus::Open),
            sharing: Some(VersionSharing::System),
            due_date: Some(date!(2025 - 01 - 31)),
            estimated_hours: Some(3.0),
            ..Version::default()
        };
        assert_eq!(
            to_json(&v),
            r#"{"version":{"name":"2.0","status":"open","sharing":"system","due_date":"2025-01-31"}}"#
        );
        let back: Version = xml(&to_xml(&v));
        assert_eq!(back.status, v.status);
        assert_eq!(back.sharing, v.sharing);
        assert_eq!(back.due_date, v.due_date);
    }
}
