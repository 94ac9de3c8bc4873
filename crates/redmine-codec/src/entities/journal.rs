//! Issue history: journals, their details and repository changesets.

use redmine_wire::WireReader;
use time::OffsetDateTime;

use crate::collection;
use crate::convert::{read_id, Entity};
use crate::error::Result;
use crate::reference::{self, IdentifiableName};
use crate::scalar;

/// One change of one property within a journal.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Detail {
    /// `attr`, `cf`, `attachment` or `relation`.
    pub property: Option<String>,
    pub name: Option<String>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl Entity for Detail {
    const ROOT: &'static str = "detail";
    const COLLECTION: &'static str = "details";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "property" => self.property = scalar::read(r)?,
            "name" => self.name = scalar::read(r)?,
            "old_value" => self.old_value = scalar::read(r)?,
            "new_value" => self.new_value = scalar::read(r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Journal {
    pub id: u32,
    pub user: Option<IdentifiableName>,
    pub notes: Option<String>,
    pub created_on: Option<OffsetDateTime>,
    pub private_notes: bool,
    pub details: Option<Vec<Detail>>,
}

impl Entity for Journal {
    const ROOT: &'static str = "journal";
    const COLLECTION: &'static str = "journals";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "user" => self.user = reference::read(r)?,
            "notes" => self.notes = scalar::read(r)?,
            "created_on" => self.created_on = scalar::read(r)?,
            "private_notes" => self.private_notes = scalar::read(r)?.unwrap_or_default(),
            "details" => collection::read_entities(r, &mut self.details)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// A repository revision linked to an issue.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChangeSet {
    pub revision: String,
    pub user: Option<IdentifiableName>,
    pub comments: Option<String>,
    pub committed_on: Option<OffsetDateTime>,
}

impl Entity for ChangeSet {
    const ROOT: &'static str = "changeset";
    const COLLECTION: &'static str = "changesets";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "revision" => self.revision = scalar::read(r)?.unwrap_or_default(),
            "user" => self.user = reference::read(r)?,
            "comments" => self.comments = scalar::read(r)?,
            "committed_on" => self.committed_on = scalar::read(r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::testing::{json, xml};
    use time::macros::datetime;

    #[test]
    fn journal_with_details() {
        let from_json: Journal = json(
            r#"{"journal":{"id":31,"user":{"id":1,"name":"Admin"},"notes":"Fixed","created_on":"2012-04-27T13:10:33+02:00","private_notes":false,"details":[{"property":"attr","name":"status_id","old_value":"1","new_value":"3"}]}}"#,
        );
        let from_xml: Journal = xml(
            r#"<journal id="31"><user id="1" name="Admin"/><notes>Fixed</notes><created_on>Fri Apr 27 13:10:33 +0200 2012</created_on><private_notes>false</private_notes><details type="array"><detail property="attr" name="status_id"><old_value>1</old_value><new_value>3</new_value></detail></details></journal>"#,
        );
        assert_eq!(from_json, from_xml);
        assert_eq!(from_json.created_on, Some(datetime!(2012-04-27 13:10:33 +02:00)));
        let details = from_json.details.unwrap();
        assert_eq!(details[0].property.as_deref(), Some("attr"));
        assert_eq!(details[0].new_value.as_deref(), Some("3"));
    }

    #[test]
    fn detail_without_old_value() {
        let journal: Journal = xml(
            r#"<journal id="2"><details type="array"><detail property="attachment" name="5"><new_value>a.txt</new_value></detail></details></journal>"#,
        );
        let details = journal.details.unwrap();
        assert_eq!(details[0].old_value, None);
        assert_eq!(journal.notes, None);
    }

    #[test]
    fn changeset_revision_is_an_attribute_in_xml() {
        let from_xml: ChangeSet = xml(
            r#"<changeset revision="abc123"><user id="2" name="jsmith"/><comments>Refs #1</comments><committed_on>2024-01-01T00:00:00Z</committed_on></changeset>"#,
        );
        let from_json: ChangeSet = json(
            r#"{"changeset":{"revision":"abc123","user":{"id":2,"name":"jsmith"},"comments":"Refs #1","committed_on":"2024-01-01T00:00:00Z"}}"#,
        );
        assert_eq!(from_xml, from_json);
        assert_eq!(from_xml.revision, "abc123");
    }
}
