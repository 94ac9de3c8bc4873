//! Users, groups and the current account.

use redmine_wire::{WireReader, WireWriter};
use time::OffsetDateTime;

use crate::collection;
use crate::convert::{read_id, Entity};
use crate::entities::{IssueCustomField, Membership};
use crate::enums::UserStatus;
use crate::error::Result;
use crate::scalar;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct User {
    pub id: u32,
    pub login: Option<String>,
    pub admin: Option<bool>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub mail: Option<String>,
    /// Write-only.
    pub password: Option<String>,
    pub auth_source_id: Option<u32>,
    pub mail_notification: Option<String>,
    pub must_change_passwd: Option<bool>,
    /// Write-only; asks the server to generate and mail a password.
    pub generate_password: Option<bool>,
    pub created_on: Option<OffsetDateTime>,
    pub updated_on: Option<OffsetDateTime>,
    pub last_login_on: Option<OffsetDateTime>,
    pub passwd_changed_on: Option<OffsetDateTime>,
    pub api_key: Option<String>,
    pub status: Option<UserStatus>,
    pub custom_fields: Option<Vec<IssueCustomField>>,
    pub memberships: Option<Vec<Membership>>,
    pub groups: Option<Vec<UserGroup>>,
}

impl User {
    pub fn full_name(&self) -> String {
        match (self.firstname.as_deref(), self.lastname.as_deref()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.to_owned(),
            (None, None) => String::new(),
        }
    }
}

impl Entity for User {
    const ROOT: &'static str = "user";
    const COLLECTION: &'static str = "users";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "login" => self.login = scalar::read(r)?,
            "admin" => self.admin = scalar::read(r)?,
            "firstname" => self.firstname = scalar::read(r)?,
            "lastname" => self.lastname = scalar::read(r)?,
            "mail" => self.mail = scalar::read(r)?,
            "password" => self.password = scalar::read(r)?,
            "auth_source_id" => self.auth_source_id = scalar::read(r)?,
            "mail_notification" => self.mail_notification = scalar::read(r)?,
            "must_change_passwd" => self.must_change_passwd = scalar::read(r)?,
            "generate_password" => self.generate_password = scalar::read(r)?,
            "created_on" => self.created_on = scalar::read(r)?,
            "updated_on" => self.updated_on = scalar::read(r)?,
            "last_login_on" => self.last_login_on = scalar::read(r)?,
            "passwd_changed_on" => self.passwd_changed_on = scalar::read(r)?,
            "api_key" => self.api_key = scalar::read(r)?,
            "status" => self.status = scalar::read(r)?,
            "custom_fields" => collection::read_entities(r, &mut self.custom_fields)?,
            "memberships" => collection::read_entities(r, &mut self.memberships)?,
            "groups" => collection::read_entities(r, &mut self.groups)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_fields(&self, w: &mut dyn WireWriter) -> Result<()> {
        scalar::write_opt(w, "login", self.login.as_ref())?;
        scalar::write_opt(w, "firstname", self.firstname.as_ref())?;
        scalar::write_opt(w, "lastname", self.lastname.as_ref())?;
        scalar::write_opt(w, "mail", self.mail.as_ref())?;
        scalar::write_opt(w, "password", self.password.as_ref())?;
        scalar::write_opt(w, "auth_source_id", self.auth_source_id.as_ref())?;
        scalar::write_opt(w, "mail_notification", self.mail_notification.as_ref())?;
        scalar::write_opt(w, "must_change_passwd", self.must_change_passwd.as_ref())?;
        scalar::write_opt(w, "generate_password", self.generate_password.as_ref())?;
        scalar::write_opt(w, "admin", self.admin.as_ref())?;
        scalar::write_opt(w, "status", self.status.as_ref())?;
        collection::write_entities(w, "custom_fields", self.custom_fields.as_deref())
    }
}

named_entity! {
    /// A group a user belongs to.
    UserGroup, "group", "groups"
}

/// The account behind the API key (`/my/account`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MyAccount {
    pub id: u32,
    pub login: Option<String>,
    pub admin: bool,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub mail: Option<String>,
    pub created_on: Option<OffsetDateTime>,
    pub last_login_on: Option<OffsetDateTime>,
    pub api_key: Option<String>,
    pub custom_fields: Option<Vec<IssueCustomField>>,
}

impl Entity for MyAccount {
    const ROOT: &'static str = "user";
    const COLLECTION: &'static str = "users";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "login" => self.login = scalar::read(r)?,
            "admin" => self.admin = scalar::read(r)?.unwrap_or_default(),
            "firstname" => self.firstname = scalar::read(r)?,
            "lastname" => self.lastname = scalar::read(r)?,
            "mail" => self.mail = scalar::read(r)?,
            "created_on" => self.created_on = scalar::read(r)?,
            "last_login_on" => self.last_login_on = scalar::read(r)?,
            "api_key" => self.api_key = scalar::read(r)?,
            "custom_fields" => collection::read_entities(r, &mut self.custom_fields)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_fields(&self, w: &mut dyn WireWriter) -> Result<()> {
        scalar::write_opt(w, "firstname", self.firstname.as_ref())?;
        scalar::write_opt(w, "lastname", self.lastname.as_ref())?;
        scalar::write_opt(w, "mail", self.mail.as_ref())?;
        collection::write_entities(w, "custom_fields", self.custom_fields.as_deref())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Group {
    pub id: u32,
    pub name: Option<String>,
    pub users: Option<Vec<GroupUser>>,
    pub custom_fields: Option<Vec<IssueCustomField>>,
    pub memberships: Option<Vec<Membership>>,
}

impl Entity for Group {
    const ROOT: &'static str = "group";
    const COLLECTION: &'static str = "groups";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "name" => self.name = scalar::read(r)?,
            "users" => collection::read_entities(r, &mut self.users)?,
            "user_ids" | "user_id" => {
                let mut ids: Option<Vec<u32>> = None;
                collection::read_scalars(r, &mut ids)?;
                if let Some(ids) = ids {
                    let users = self.users.get_or_insert_with(Vec::new);
                    users.extend(ids.into_iter().map(|id| GroupUser::new(id, "")));
                }
            }
            "custom_fields" => collection::read_entities(r, &mut self.custom_fields)?,
            "memberships" => collection::read_entities(r, &mut self.memberships)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_fields(&self, w: &mut dyn WireWriter) -> Result<()> {
        scalar::write_opt(w, "name", self.name.as_ref())?;
        let user_ids = self.users.as_deref().map(|u| u.iter().map(|u| u.id));
        collection::write_scalars(w, "user_ids", "user_id", user_ids)?;
        collection::write_entities(w, "custom_fields", self.custom_fields.as_deref())
    }
}

named_entity! {
    /// A member of a group.
    GroupUser, "user", "users"
}
