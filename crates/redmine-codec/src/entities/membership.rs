//! Project memberships and the roles/permissions they grant.

use redmine_wire::{WireReader, WireWriter};

use crate::collection;
use crate::convert::{read_id, Entity};
use crate::error::Result;
use crate::reference::{self, IdentifiableName};
use crate::scalar;

/// A user or group holding roles in a project.
///
/// `project`, `user` and `group` are independent: a group membership listed
/// on a user carries both a project and a group.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Membership {
    pub id: u32,
    pub project: Option<IdentifiableName>,
    pub user: Option<IdentifiableName>,
    pub group: Option<IdentifiableName>,
    pub roles: Option<Vec<MembershipRole>>,
}

impl Entity for Membership {
    const ROOT: &'static str = "membership";
    const COLLECTION: &'static str = "memberships";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "project" => self.project = reference::read(r)?,
            "project_id" => self.project = reference::read_bare_id(r)?,
            "user" => self.user = reference::read(r)?,
            "user_id" => self.user = reference::read_bare_id(r)?,
            "group" => self.group = reference::read(r)?,
            "group_id" => self.group = reference::read_bare_id(r)?,
            "roles" => collection::read_entities(r, &mut self.roles)?,
            "role_ids" | "role_id" => {
                let mut ids: Option<Vec<u32>> = None;
                collection::read_scalars(r, &mut ids)?;
                if let Some(ids) = ids {
                    let roles = self.roles.get_or_insert_with(Vec::new);
                    roles.extend(ids.into_iter().map(|id| MembershipRole {
                        id,
                        ..MembershipRole::default()
                    }));
                }
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_fields(&self, w: &mut dyn WireWriter) -> Result<()> {
        reference::write_id(w, "user_id", self.user.as_ref())?;
        let role_ids = self
            .roles
            .as_deref()
            .map(|roles| roles.iter().map(|role| role.id));
        collection::write_scalars(w, "role_ids", "role_id", role_ids)
    }
}

/// A role inside a membership; `inherited` when granted through a group.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MembershipRole {
    pub id: u32,
    pub name: String,
    pub inherited: bool,
}

impl Entity for MembershipRole {
    const ROOT: &'static str = "role";
    const COLLECTION: &'static str = "roles";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "name" => self.name = scalar::read(r)?.unwrap_or_default(),
            "inherited" => self.inherited = scalar::read(r)?.unwrap_or_default(),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Role {
    pub id: u32,
    pub name: String,
    pub assignable: Option<bool>,
    pub issues_visibility: Option<String>,
    pub time_entries_visibility: Option<String>,
    pub users_visibility: Option<String>,
    pub permissions: Option<Vec<Permission>>,
}

impl Entity for Role {
    const ROOT: &'static str = "role";
    const COLLECTION: &'static str = "roles";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "name" => self.name = scalar::read(r)?.unwrap_or_default(),
            "assignable" => self.assignable = scalar::read(r)?,
            "issues_visibility" => self.issues_visibility = scalar::read(r)?,
            "time_entries_visibility" => self.time_entries_visibility = scalar::read(r)?,
            "users_visibility" => self.users_visibility = scalar::read(r)?,
            "permissions" | "permission" => collection::read_entities(r, &mut self.permissions)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// A permission name such as `add_issues`.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Permission {
    pub info: String,
}

impl Entity for Permission {
    const ROOT: &'static str = "permission";
    const COLLECTION: &'static str = "permissions";
    const TEXT_FORM: bool = true;

    fn read_field(&mut self, _key: &str, _r: &mut dyn WireReader) -> Result<bool> {
        Ok(false)
    }

    fn read_text(&mut self, text: String) {
        self.info = text;
    }
}
