//! Server-side enumerations: statuses, priorities, activities and document
//! categories. All are read-only over the API.

use redmine_wire::WireReader;

use crate::convert::{read_id, Entity};
use crate::error::Result;
use crate::scalar;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IssueStatus {
    pub id: u32,
    pub name: String,
    pub is_default: bool,
    pub is_closed: bool,
}

impl Entity for IssueStatus {
    const ROOT: &'static str = "issue_status";
    const COLLECTION: &'static str = "issue_statuses";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "name" => self.name = scalar::read(r)?.unwrap_or_default(),
            "is_default" => self.is_default = scalar::read(r)?.unwrap_or_default(),
            "is_closed" => self.is_closed = scalar::read(r)?.unwrap_or_default(),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Declares an enumeration record carrying `is_default` and `active`.
macro_rules! activity_like {
    ($(#[$meta:meta])* $name:ident, $root:literal, $collection:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, Eq, PartialEq)]
        pub struct $name {
            pub id: u32,
            pub name: String,
            pub is_default: bool,
            pub active: bool,
        }

        impl Entity for $name {
            const ROOT: &'static str = $root;
            const COLLECTION: &'static str = $collection;

            fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
                match key {
                    "id" => self.id = read_id(r)?,
                    "name" => self.name = scalar::read(r)?.unwrap_or_default(),
                    "is_default" => self.is_default = scalar::read(r)?.unwrap_or_default(),
                    "active" => self.active = scalar::read(r)?.unwrap_or_default(),
                    _ => return Ok(false),
                }
                Ok(true)
            }
        }
    };
}

activity_like!(IssuePriority, "issue_priority", "issue_priorities");
activity_like!(
    /// Activity a time entry is booked against.
    TimeEntryActivity,
    "time_entry_activity",
    "time_entry_activities"
);
activity_like!(DocumentCategory, "document_category", "document_categories");
