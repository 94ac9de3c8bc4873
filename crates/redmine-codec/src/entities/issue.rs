use redmine_wire::{WireReader, WireWriter};
use time::{Date, OffsetDateTime};

use crate::collection;
use crate::convert::{read_id, Entity};
use crate::entities::{
    Attachment, ChangeSet, IssueCustomField, IssueRelation, Journal, Upload,
};
use crate::error::Result;
use crate::reference::{self, IdentifiableName};
use crate::scalar;

/// An issue with every association Redmine can include.
///
/// References decode from either their structured form (`project`) or the
/// bare id (`project_id`). The `include`-only collections stay `None` unless
/// the server sent them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Issue {
    pub id: u32,
    pub project: Option<IdentifiableName>,
    pub tracker: Option<IdentifiableName>,
    pub status: Option<IdentifiableName>,
    pub priority: Option<IdentifiableName>,
    pub author: Option<IdentifiableName>,
    pub assigned_to: Option<IdentifiableName>,
    pub category: Option<IdentifiableName>,
    pub fixed_version: Option<IdentifiableName>,
    pub parent_id: Option<u32>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub due_date: Option<Date>,
    pub done_ratio: Option<u32>,
    pub is_private: Option<bool>,
    pub estimated_hours: Option<f32>,
    pub total_estimated_hours: Option<f32>,
    pub spent_hours: Option<f32>,
    pub total_spent_hours: Option<f32>,
    pub custom_fields: Option<Vec<IssueCustomField>>,
    pub created_on: Option<OffsetDateTime>,
    pub updated_on: Option<OffsetDateTime>,
    pub closed_on: Option<OffsetDateTime>,
    /// Journal note added with an update.
    pub notes: Option<String>,
    /// Whether `notes` is private.
    pub private_notes: Option<bool>,
    pub attachments: Option<Vec<Attachment>>,
    pub relations: Option<Vec<IssueRelation>>,
    pub changesets: Option<Vec<ChangeSet>>,
    pub journals: Option<Vec<Journal>>,
    pub children: Option<Vec<IssueChild>>,
    pub watchers: Option<Vec<Watcher>>,
    pub allowed_statuses: Option<Vec<IssueAllowedStatus>>,
    /// Watchers to add on create.
    pub watcher_user_ids: Option<Vec<u32>>,
    pub uploads: Option<Vec<Upload>>,
}

impl Issue {
    pub fn custom_field(&self, id: u32) -> Option<&IssueCustomField> {
        self.custom_fields.as_deref()?.iter().find(|f| f.id == id)
    }
}

impl Entity for Issue {
    const ROOT: &'static str = "issue";
    const COLLECTION: &'static str = "issues";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "project" => self.project = reference::read(r)?,
            "project_id" => self.project = reference::read_bare_id(r)?,
            "tracker" => self.tracker = reference::read(r)?,
            "tracker_id" => self.tracker = reference::read_bare_id(r)?,
            "status" => self.status = reference::read(r)?,
            "status_id" => self.status = reference::read_bare_id(r)?,
            "priority" => self.priority = reference::read(r)?,
            "priority_id" => self.priority = reference::read_bare_id(r)?,
            "author" => self.author = reference::read(r)?,
            "author_id" => self.author = reference::read_bare_id(r)?,
            "assigned_to" => self.assigned_to = reference::read(r)?,
            "assigned_to_id" => self.assigned_to = reference::read_bare_id(r)?,
            "category" => self.category = reference::read(r)?,
            "category_id" => self.category = reference::read_bare_id(r)?,
            "fixed_version" => self.fixed_version = reference::read(r)?,
            "fixed_version_id" => self.fixed_version = reference::read_bare_id(r)?,
            "parent" => self.parent_id = reference::read(r)?.map(|p| p.id),
            "parent_issue_id" | "parent_id" => self.parent_id = scalar::read(r)?,
            "subject" => self.subject = scalar::read(r)?,
            "description" => self.description = scalar::read(r)?,
            "start_date" => self.start_date = scalar::read(r)?,
            "due_date" => self.due_date = scalar::read(r)?,
            "done_ratio" => self.done_ratio = scalar::read(r)?,
            "is_private" => self.is_private = scalar::read(r)?,
            "estimated_hours" => self.estimated_hours = scalar::read(r)?,
            "total_estimated_hours" => self.total_estimated_hours = scalar::read(r)?,
            "spent_hours" => self.spent_hours = scalar::read(r)?,
            "total_spent_hours" => self.total_spent_hours = scalar::read(r)?,
            "custom_fields" | "custom_field" => {
                collection::read_entities(r, &mut self.custom_fields)?
            }
            "created_on" => self.created_on = scalar::read(r)?,
            "updated_on" => self.updated_on = scalar::read(r)?,
            "closed_on" => self.closed_on = scalar::read(r)?,
            "notes" => self.notes = scalar::read(r)?,
            "private_notes" => self.private_notes = scalar::read(r)?,
            "attachments" => collection::read_entities(r, &mut self.attachments)?,
            "relations" => collection::read_entities(r, &mut self.relations)?,
            "changesets" => collection::read_entities(r, &mut self.changesets)?,
            "journals" => collection::read_entities(r, &mut self.journals)?,
            "children" => collection::read_entities(r, &mut self.children)?,
            "watchers" => collection::read_entities(r, &mut self.watchers)?,
            "allowed_statuses" => collection::read_entities(r, &mut self.allowed_statuses)?,
            "watcher_user_ids" | "watcher_user_id" => {
                collection::read_scalars(r, &mut self.watcher_user_ids)?
            }
            "uploads" => collection::read_entities(r, &mut self.uploads)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_fields(&self, w: &mut dyn WireWriter) -> Result<()> {
        scalar::write_opt(w, "subject", self.subject.as_ref())?;
        scalar::write_opt(w, "description", self.description.as_ref())?;
        scalar::write_opt(w, "notes", self.notes.as_ref())?;
        scalar::write_opt(w, "private_notes", self.private_notes.as_ref())?;
        scalar::write_opt(w, "is_private", self.is_private.as_ref())?;
        reference::write_id(w, "project_id", self.project.as_ref())?;
        reference::write_id(w, "tracker_id", self.tracker.as_ref())?;
        reference::write_id(w, "status_id", self.status.as_ref())?;
        reference::write_id(w, "priority_id", self.priority.as_ref())?;
        reference::write_id(w, "category_id", self.category.as_ref())?;
        reference::write_id(w, "assigned_to_id", self.assigned_to.as_ref())?;
        scalar::write_opt(w, "parent_issue_id", self.parent_id.as_ref())?;
        reference::write_id(w, "fixed_version_id", self.fixed_version.as_ref())?;
        scalar::write_opt(w, "start_date", self.start_date.as_ref())?;
        scalar::write_opt(w, "due_date", self.due_date.as_ref())?;
        scalar::write_opt(w, "estimated_hours", self.estimated_hours.as_ref())?;
        scalar::write_opt(w, "done_ratio", self.done_ratio.as_ref())?;
        collection::write_entities(w, "custom_fields", self.custom_fields.as_deref())?;
        collection::write_scalars(
            w,
            "watcher_user_ids",
            "watcher_user_id",
            self.watcher_user_ids.as_deref(),
        )?;
        collection::write_entities(w, "uploads", self.uploads.as_deref())
    }
}

/// A subtask as listed under `children`; nests recursively.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IssueChild {
    pub id: u32,
    pub tracker: Option<IdentifiableName>,
    pub subject: Option<String>,
    pub children: Option<Vec<IssueChild>>,
}

impl Entity for IssueChild {
    const ROOT: &'static str = "issue";
    const COLLECTION: &'static str = "children";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "tracker" => self.tracker = reference::read(r)?,
            "subject" => self.subject = scalar::read(r)?,
            "children" => collection::read_entities(r, &mut self.children)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// A status the current user may move the issue to.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IssueAllowedStatus {
    pub id: u32,
    pub name: String,
    pub is_closed: bool,
}

impl Entity for IssueAllowedStatus {
    const ROOT: &'static str = "status";
    const COLLECTION: &'static str = "allowed_statuses";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "name" => self.name = scalar::read(r)?.unwrap_or_default(),
            "is_closed" => self.is_closed = scalar::read(r)?.unwrap_or_default(),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

named_entity!(Watcher, "user", "watchers");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::testing::{json, to_json, to_xml, xml};
    use crate::enums::IssueRelationType;
    use time::macros::date;

    const JSON: &str = r#"{"issue":{"id":42,"project":{"id":1,"name":"Alpha"},"tracker":{"id":2,"name":"Feature"},"status":{"id":1,"name":"New","is_closed":false},"priority":{"id":4,"name":"Normal"},"author":{"id":3,"name":"John"},"parent":{"id":40},"subject":"Export","description":"CSV export","start_date":"2024-03-01","due_date":null,"done_ratio":20,"is_private":false,"estimated_hours":4.5,"spent_hours":1.25,"custom_fields":[{"id":1,"name":"Env","value":"prod"},{"id":2,"name":"Tags","multiple":true,"value":["a","b"]}],"created_on":"2024-03-01T09:00:00Z","relations":[{"id":7,"issue_id":42,"issue_to_id":43,"relation_type":"follows","delay":2}],"children":[{"id":44,"tracker":{"id":1,"name":"Bug"},"subject":"Sub","children":[{"id":45,"subject":"Leaf"}]}],"watchers":[{"id":3,"name":"John"}],"allowed_statuses":[{"id":2,"name":"In progress","is_closed":false},{"id":5,"name":"Closed","is_closed":true}],"unknown":{"future":[1,2]}}}"#;

    const XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<issue>
  <id>42</id>
  <project id="1" name="Alpha"/>
  <tracker id="2" name="Feature"/>
  <status id="1" name="New" is_closed="false"/>
  <priority id="4" name="Normal"/>
  <author id="3" name="John"/>
  <parent id="40"/>
  <subject>Export</subject>
  <description>CSV export</description>
  <start_date>2024-03-01</start_date>
  <due_date/>
  <done_ratio>20</done_ratio>
  <is_private>false</is_private>
  <estimated_hours>4.5</estimated_hours>
  <spent_hours>1.25</spent_hours>
  <custom_fields type="array">
    <custom_field id="1" name="Env"><value>prod</value></custom_field>
    <custom_field id="2" name="Tags" multiple="true"><value type="array"><value>a</value><value>b</value></value></custom_field>
  </custom_fields>
  <created_on>2024-03-01T09:00:00Z</created_on>
  <relations type="array"><relation id="7" issue_id="42" issue_to_id="43" relation_type="follows" delay="2"/></relations>
  <children type="array"><issue id="44"><tracker id="1" name="Bug"/><subject>Sub</subject><children type="array"><issue id="45"><subject>Leaf</subject></issue></children></issue></children>
  <watchers type="array"><user id="3" name="John"/></watchers>
  <allowed_statuses type="array"><status id="2" name="In progress" is_closed="false"/><status id="5" name="Closed" is_closed="true"/></allowed_statuses>
  <unknown><future>1</future></unknown>
</issue>"#;

    #[test]
    fn both_formats_decode_the_same_issue() {
        let from_json: Issue = json(JSON);
        let from_xml: Issue = xml(XML);
        assert_eq!(from_json, from_xml);

        let issue = from_json;
        assert_eq!(issue.id, 42);
        assert_eq!(issue.project, Some(IdentifiableName::new(1, "Alpha")));
        assert_eq!(issue.parent_id, Some(40));
        assert_eq!(issue.start_date, Some(date!(2024 - 03 - 01)));
        assert_eq!(issue.due_date, None);
        assert_eq!(issue.estimated_hours, Some(4.5));
        assert_eq!(issue.custom_field(2).unwrap().values.as_ref().unwrap().len(), 2);
        assert_eq!(issue.relations.as_ref().unwrap()[0].relation_type, IssueRelationType::Follows);
        let children = issue.children.as_ref().unwrap();
        assert_eq!(children[0].children.as_ref().unwrap()[0].subject.as_deref(), Some("Leaf"));
        assert!(issue.allowed_statuses.as_ref().unwrap()[1].is_closed);
        assert_eq!(issue.watchers.as_ref().unwrap()[0], Watcher::new(3, "John"));
        assert_eq!(issue.journals, None);
        assert_eq!(issue.attachments, None);
    }

    #[test]
    fn omitted_and_empty_custom_fields_differ() {
        let issue: Issue = json(r#"{"issue":{"id":1}}"#);
        assert_eq!(issue.custom_fields, None);
        let issue: Issue = json(r#"{"issue":{"id":1,"custom_fields":[]}}"#);
        assert_eq!(issue.custom_fields, Some(vec![]));
        let issue: Issue = xml(r#"<issue><id>1</id><custom_fields type="array"/></issue>"#);
        assert_eq!(issue.custom_fields, Some(vec![]));
    }

    #[test]
    fn watcher_ids_as_siblings() {
        let issue: Issue = xml(
            "<issue><watcher_user_id>3</watcher_user_id><subject>s</subject><watcher_user_id>5</watcher_user_id></issue>",
        );
        assert_eq!(issue.watcher_user_ids, Some(vec![3, 5]));
    }

    #[test]
    fn create_payload_in_wire_order() {
        let issue = Issue {
            subject: Some("Crash on save".into()),
            project: Some(IdentifiableName::new(1, "Alpha")),
            tracker: Some(IdentifiableName::id(2)),
            assigned_to: Some(IdentifiableName::id(7)),
            parent_id: Some(40),
            due_date: Some(date!(2024 - 04 - 30)),
            estimated_hours: Some(2.5),
            custom_fields: Some(vec![IssueCustomField::single(1, "prod")]),
            watcher_user_ids: Some(vec![3, 5]),
            uploads: Some(vec![Upload::new("1.abc", "log.txt")]),
            author: Some(IdentifiableName::id(9)),
            ..Issue::default()
        };
        assert_eq!(
            to_json(&issue),
            r#"{"issue":{"subject":"Crash on save","project_id":1,"tracker_id":2,"assigned_to_id":7,"parent_issue_id":40,"due_date":"2024-04-30","estimated_hours":2.5,"custom_fields":[{"id":1,"value":"prod"}],"watcher_user_ids":[3,5],"uploads":[{"token":"1.abc","filename":"log.txt"}]}}"#
        );
        assert_eq!(
            to_xml(&issue),
            concat!(
                "<issue><subject>Crash on save</subject><project_id>1</project_id><tracker_id>2</tracker_id>",
                "<assigned_to_id>7</assigned_to_id><parent_issue_id>40</parent_issue_id>",
                "<due_date>2024-04-30</due_date><estimated_hours>2.5</estimated_hours>",
                r#"<custom_fields type="array"><custom_field id="1"><value>prod</value></custom_field></custom_fields>"#,
                r#"<watcher_user_ids type="array"><watcher_user_id>3</watcher_user_id><watcher_user_id>5</watcher_user_id></watcher_user_ids>"#,
                r#"<uploads type="array"><upload><token>1.abc</token><filename>log.txt</filename></upload></uploads>"#,
                "</issue>"
            )
        );
    }

    #[test]
    fn update_with_notes() {
        let issue = Issue {
            id: 42,
            notes: Some("Done".into()),
            private_notes: Some(true),
            status: Some(IdentifiableName::id(5)),
            done_ratio: Some(100),
            ..Issue::default()
        };
        assert_eq!(
            to_json(&issue),
            r#"{"issue":{"notes":"Done","private_notes":true,"status_id":5,"done_ratio":100}}"#
        );
    }
}
