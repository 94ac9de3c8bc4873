//! Typed Redmine records and their wire mappings.

/// Declares a leaf record that is nothing but an `{id, name}` pair with its
/// own root name, e.g. the trackers listed inside a project.
macro_rules! named_entity {
    ($(#[$meta:meta])* $name:ident, $root:literal, $collection:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
        pub struct $name {
            pub id: u32,
            pub name: String,
        }

        impl $name {
            pub fn new(id: u32, name: impl Into<String>) -> Self {
                Self {
                    id,
                    name: name.into(),
                }
            }
        }

        impl $crate::convert::Entity for $name {
            const ROOT: &'static str = $root;
            const COLLECTION: &'static str = $collection;

            fn read_field(
                &mut self,
                key: &str,
                reader: &mut dyn redmine_wire::WireReader,
            ) -> $crate::error::Result<bool> {
                match key {
                    "id" => self.id = $crate::convert::read_id(reader)?,
                    "name" => self.name = $crate::scalar::read(reader)?.unwrap_or_default(),
                    _ => return Ok(false),
                }
                Ok(true)
            }
        }

        impl From<$name> for $crate::reference::IdentifiableName {
            fn from(value: $name) -> Self {
                Self {
                    id: value.id,
                    name: value.name,
                }
            }
        }
    };
}

mod attachment;
mod custom_field;
mod enumeration;
mod issue;
mod journal;
mod membership;
mod news;
mod project;
mod relation;
mod search;
mod time_entry;
mod tracker;
mod user;
mod version;
mod wiki;

pub use attachment::{Attachment, File, Upload};
pub use custom_field::{
    CustomField, CustomFieldPossibleValue, CustomFieldRole, CustomFieldValue, IssueCustomField,
};
pub use enumeration::{DocumentCategory, IssuePriority, IssueStatus, TimeEntryActivity};
pub use issue::{Issue, IssueAllowedStatus, IssueChild, Watcher};
pub use journal::{ChangeSet, Detail, Journal};
pub use membership::{Membership, MembershipRole, Permission, Role};
pub use news::{News, NewsComment};
pub use project::{
    IssueCategory, Project, ProjectEnabledModule, ProjectIssueCategory, ProjectTimeEntryActivity,
    ProjectTracker,
};
pub use relation::IssueRelation;
pub use search::{Query, SearchResult};
pub use time_entry::TimeEntry;
pub use tracker::{Tracker, TrackerCoreField, TrackerCustomField};
pub use user::{Group, GroupUser, MyAccount, User, UserGroup};
pub use version::Version;
pub use wiki::{WikiPage, WikiPageInfo};
