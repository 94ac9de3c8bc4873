use redmine_wire::{WireReader, WireWriter};
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

use crate::collection;
use crate::convert::{read_id, Entity};
use crate::entities::IssueCustomField;
use crate::error::Result;
use crate::reference::{self, IdentifiableName};
use crate::scalar;

/// Time logged against an issue or a project.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeEntry {
    pub id: u32,
    pub issue: Option<IdentifiableName>,
    pub project: Option<IdentifiableName>,
    pub spent_on: Option<Date>,
    pub hours: Option<Decimal>,
    pub activity: Option<IdentifiableName>,
    pub user: Option<IdentifiableName>,
    pub comments: Option<String>,
    pub created_on: Option<OffsetDateTime>,
    pub updated_on: Option<OffsetDateTime>,
    pub custom_fields: Option<Vec<IssueCustomField>>,
}

impl Entity for TimeEntry {
    const ROOT: &'static str = "time_entry";
    const COLLECTION: &'static str = "time_entries";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "issue" => self.issue = reference::read(r)?,
            "issue_id" => self.issue = reference::read_bare_id(r)?,
            "project" => self.project = reference::read(r)?,
            "project_id" => self.project = reference::read_bare_id(r)?,
            "spent_on" => self.spent_on = scalar::read(r)?,
            "hours" => self.hours = scalar::read(r)?,
            "activity" => self.activity = reference::read(r)?,
            "activity_id" => self.activity = reference::read_bare_id(r)?,
            "user" => self.user = reference::read(r)?,
            "user_id" => self.user = reference::read_bare_id(r)?,
            "comments" => self.comments = scalar::read(r)?,
            "created_on" => self.created_on = scalar::read(r)?,
            "updated_on" => self.updated_on = scalar::read(r)?,
            "custom_fields" => collection::read_entities(r, &mut self.custom_fields)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_fields(&self, w: &mut dyn WireWriter) -> Result<()> {
        reference::write_id(w, "issue_id", self.issue.as_ref())?;
        reference::write_id(w, "project_id", self.project.as_ref())?;
        scalar::write_opt(w, "spent_on", self.spent_on.as_ref())?;
        scalar::write_opt(w, "hours", self.hours.as_ref())?;
        reference::write_id(w, "activity_id", self.activity.as_ref())?;
        scalar::write_opt(w, "comments", self.comments.as_ref())?;
        reference::write_id(w, "user_id", self.user.as_ref())?;
        collection::write_entities(w, "custom_fields", self.custom_fields.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::testing::{json, to_json, to_xml, xml};
    use time::macros::date;

    #[test]
    fn decodes_hours_as_decimal() {
        let entry: TimeEntry = json(
            r#"{"time_entry":{"id":1,"project":{"id":1,"name":"Alpha"},"issue":{"id":42},"user":{"id":3,"name":"John"},"activity":{"id":9,"name":"Development"},"hours":0.25,"comments":"Review","spent_on":"2024-03-04","created_on":"2024-03-04T12:00:00Z"}}"#,
        );
        assert_eq!(entry.hours, Some(Decimal::new(25, 2)));
        assert_eq!(entry.issue, Some(IdentifiableName::id(42)));
        assert_eq!(entry.spent_on, Some(date!(2024 - 03 - 04)));

        let entry: TimeEntry = xml(
            r#"<time_entry><id>1</id><project id="1" name="Alpha"/><hours>1.5</hours><spent_on>2024/03/04</spent_on></time_entry>"#,
        );
        assert_eq!(entry.hours, Some(Decimal::new(15, 1)));
        assert_eq!(entry.spent_on, Some(date!(2024 - 03 - 04)));
    }

    #[test]
    fn malformed_hours_fail() {
        let err = crate::Codec::json()
            .decode::<TimeEntry>(br#"{"time_entry":{"hours":"1,5"}}"#)
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ValueFormat);
    }

    #[test]
    fn writes_in_wire_order() {
        let entry = TimeEntry {
            issue: Some(IdentifiableName::id(42)),
            spent_on: Some(date!(2024 - 03 - 04)),
            hours: Some(Decimal::new(1500, 3)),
            activity: Some(IdentifiableName::id(9)),
            comments: Some("Review".into()),
            ..TimeEntry::default()
        };
        assert_eq!(
            to_json(&entry),
            r#"{"time_entry":{"issue_id":42,"spent_on":"2024-03-04","hours":1.5,"activity_id":9,"comments":"Review"}}"#
        );
        assert_eq!(
            to_xml(&entry),
            "<time_entry><issue_id>42</issue_id><spent_on>2024-03-04</spent_on><hours>1.5</hours><activity_id>9</activity_id><comments>Review</comments></time_entry>"
        );
    }
}
