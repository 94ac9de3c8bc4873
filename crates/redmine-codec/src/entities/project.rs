use redmine_wire::{WireReader, WireWriter};
use time::OffsetDateTime;

use crate::collection;
use crate::convert::{read_id, Entity};
use crate::entities::IssueCustomField;
use crate::enums::ProjectStatus;
use crate::error::Result;
use crate::reference::{self, IdentifiableName};
use crate::scalar;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Project {
    pub id: u32,
    pub name: Option<String>,
    pub identifier: Option<String>,
    pub description: Option<String>,
    pub parent: Option<IdentifiableName>,
    pub homepage: Option<String>,
    pub is_public: Option<bool>,
    pub inherit_members: Option<bool>,
    pub status: Option<ProjectStatus>,
    pub created_on: Option<OffsetDateTime>,
    pub updated_on: Option<OffsetDateTime>,
    pub trackers: Option<Vec<ProjectTracker>>,
    pub custom_fields: Option<Vec<IssueCustomField>>,
    pub issue_categories: Option<Vec<ProjectIssueCategory>>,
    pub enabled_modules: Option<Vec<ProjectEnabledModule>>,
    pub time_entry_activities: Option<Vec<ProjectTimeEntryActivity>>,
    pub default_version: Option<IdentifiableName>,
    pub default_assignee: Option<IdentifiableName>,
}

impl Entity for Project {
    const ROOT: &'static str = "project";
    const COLLECTION: &'static str = "projects";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "name" => self.name = scalar::read(r)?,
            "identifier" => self.identifier = scalar::read(r)?,
            "description" => self.description = scalar::read(r)?,
            "parent" => self.parent = reference::read(r)?,
            "parent_id" => self.parent = reference::read_bare_id(r)?,
            "homepage" => self.homepage = scalar::read(r)?,
            "is_public" => self.is_public = scalar::read(r)?,
            "inherit_members" => self.inherit_members = scalar::read(r)?,
            "status" => self.status = scalar::read(r)?,
            "created_on" => self.created_on = scalar::read(r)?,
            "updated_on" => self.updated_on = scalar::read(r)?,
            "trackers" => collection::read_entities(r, &mut self.trackers)?,
            "tracker_ids" | "tracker_id" => {
                let mut ids: Option<Vec<u32>> = None;
                collection::read_scalars(r, &mut ids)?;
                if let Some(ids) = ids {
                    let trackers = self.trackers.get_or_insert_with(Vec::new);
                    trackers.extend(ids.into_iter().map(|id| ProjectTracker::new(id, "")));
                }
            }
            "custom_fields" => collection::read_entities(r, &mut self.custom_fields)?,
            "issue_categories" => collection::read_entities(r, &mut self.issue_categories)?,
            "enabled_modules" => collection::read_entities(r, &mut self.enabled_modules)?,
            "enabled_module_names" | "enabled_module_name" => {
                let mut names: Option<Vec<String>> = None;
                collection::read_scalars(r, &mut names)?;
                if let Some(names) = names {
                    let modules = self.enabled_modules.get_or_insert_with(Vec::new);
                    modules.extend(names.into_iter().map(|name| ProjectEnabledModule::new(0, name)));
                }
            }
            "time_entry_activities" => {
                collection::read_entities(r, &mut self.time_entry_activities)?
            }
            "default_version" => self.default_version = reference::read(r)?,
            "default_assignee" => self.default_assignee = reference::read(r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_fields(&self, w: &mut dyn WireWriter) -> Result<()> {
        scalar::write_opt(w, "name", self.name.as_ref())?;
        scalar::write_opt(w, "identifier", self.identifier.as_ref())?;
        scalar::write_opt(w, "description", self.description.as_ref())?;
        scalar::write_opt(w, "homepage", self.homepage.as_ref())?;
        scalar::write_opt(w, "is_public", self.is_public.as_ref())?;
        scalar::write_opt(w, "inherit_members", self.inherit_members.as_ref())?;
        reference::write_id(w, "parent_id", self.parent.as_ref())?;
        let tracker_ids = self.trackers.as_deref().map(|t| t.iter().map(|t| t.id));
        collection::write_scalars(w, "tracker_ids", "tracker_id", tracker_ids)?;
        let module_names = self
            .enabled_modules
            .as_deref()
            .map(|m| m.iter().map(|m| m.name.as_str()));
        collection::write_scalars(w, "enabled_module_names", "enabled_module_name", module_names)?;
        collection::write_entities(w, "custom_fields", self.custom_fields.as_deref())
    }
}

named_entity!(ProjectTracker, "tracker", "trackers");
named_entity!(ProjectEnabledModule, "enabled_module", "enabled_modules");
named_entity!(ProjectIssueCategory, "issue_category", "issue_categories");
named_entity!(
    ProjectTimeEntryActivity,
    "time_entry_activity",
    "time_entry_activities"
);

/// An issue category as managed through `/projects/:id/issue_categories`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IssueCategory {
    pub id: u32,
    pub project: Option<IdentifiableName>,
    pub assigned_to: Option<IdentifiableName>,
    pub name: Option<String>,
}

impl Entity for IssueCategory {
    const ROOT: &'static str = "issue_category";
    const COLLECTION: &'static str = "issue_categories";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "project" => self.project = reference::read(r)?,
            "project_id" => self.project = reference::read_bare_id(r)?,
            "assigned_to" => self.assigned_to = reference::read(r)?,
            "assigned_to_id" => self.assigned_to = reference::read_bare_id(r)?,
            "name" => self.name = scalar::read(r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_fields(&self, w: &mut dyn WireWriter) -> Result<()> {
        scalar::write_opt(w, "name", self.name.as_ref())?;
        reference::write_id(w, "assigned_to_id", self.assigned_to.as_ref())
    }
}
