use redmine_wire::{WireReader, WireWriter};

use crate::convert::{read_id, Entity};
use crate::enums::IssueRelationType;
use crate::error::{Error, Result};
use crate::scalar;

/// A directed link between two issues.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IssueRelation {
    pub id: u32,
    pub issue_id: Option<u32>,
    pub issue_to_id: Option<u32>,
    pub relation_type: IssueRelationType,
    /// Days between the two issues; meaningful for `precedes`/`follows` only.
    pub delay: Option<i32>,
}

impl IssueRelation {
    pub fn new(issue_id: u32, issue_to_id: u32, relation_type: IssueRelationType) -> Self {
        Self {
            issue_id: Some(issue_id),
            issue_to_id: Some(issue_to_id),
            relation_type,
            ..Self::default()
        }
    }
}

impl Entity for IssueRelation {
    const ROOT: &'static str = "relation";
    const COLLECTION: &'static str = "relations";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "issue_id" => self.issue_id = scalar::read(r)?,
            "issue_to_id" => self.issue_to_id = scalar::read(r)?,
            "relation_type" => self.relation_type = scalar::read(r)?.unwrap_or_default(),
            "delay" => self.delay = scalar::read(r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn validate(&self) -> Result<()> {
        if self.relation_type == IssueRelationType::Undefined {
            return Err(Error::validation(Self::ROOT, "relation type is undefined"));
        }
        Ok(())
    }

    fn write_fields(&self, w: &mut dyn WireWriter) -> Result<()> {
        scalar::write_opt(w, "issue_to_id", self.issue_to_id.as_ref())?;
        scalar::write(w, "relation_type", &self.relation_type)?;
        if self.relation_type.has_delay() {
            scalar::write_opt(w, "delay", self.delay.as_ref())?;
        }
        Ok(())
    }
}
