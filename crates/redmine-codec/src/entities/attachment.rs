use redmine_wire::{WireReader, WireWriter};
use time::OffsetDateTime;

use crate::convert::{read_id, Entity};
use crate::error::Result;
use crate::reference::{self, IdentifiableName};
use crate::scalar;

/// A file attached to an issue, news item or wiki page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attachment {
    pub id: u32,
    pub filename: Option<String>,
    pub filesize: Option<u64>,
    pub content_type: Option<String>,
    pub description: Option<String>,
    pub content_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub author: Option<IdentifiableName>,
    pub created_on: Option<OffsetDateTime>,
    /// Upload token, present right after an upload.
    pub token: Option<String>,
}

impl Entity for Attachment {
    const ROOT: &'static str = "attachment";
    const COLLECTION: &'static str = "attachments";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "filename" => self.filename = scalar::read(r)?,
            "filesize" => self.filesize = scalar::read(r)?,
            "content_type" => self.content_type = scalar::read(r)?,
            "description" => self.description = scalar::read(r)?,
            "content_url" => self.content_url = scalar::read(r)?,
            "thumbnail_url" => self.thumbnail_url = scalar::read(r)?,
            "author" => self.author = reference::read(r)?,
            "author_id" => self.author = reference::read_bare_id(r)?,
            "created_on" => self.created_on = scalar::read(r)?,
            "token" => self.token = scalar::read(r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_fields(&self, w: &mut dyn WireWriter) -> Result<()> {
        scalar::write_opt(w, "filename", self.filename.as_ref())?;
        scalar::write_opt(w, "description", self.description.as_ref())
    }
}

/// A previously uploaded blob to attach on create/update, referenced by the
/// token the upload endpoint returned.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Upload {
    pub token: Option<String>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub description: Option<String>,
}

impl Upload {
    pub fn new(token: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            filename: Some(filename.into()),
            ..Self::default()
        }
    }
}

impl Entity for Upload {
    const ROOT: &'static str = "upload";
    const COLLECTION: &'static str = "uploads";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "token" => self.token = scalar::read(r)?,
            "filename" => self.filename = scalar::read(r)?,
            "content_type" => self.content_type = scalar::read(r)?,
            "description" => self.description = scalar::read(r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_fields(&self, w: &mut dyn WireWriter) -> Result<()> {
        scalar::write_opt(w, "token", self.token.as_ref())?;
        scalar::write_opt(w, "filename", self.filename.as_ref())?;
        scalar::write_opt(w, "content_type", self.content_type.as_ref())?;
        scalar::write_opt(w, "description", self.description.as_ref())
    }
}

/// A file published in a project's Files area.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct File {
    pub id: u32,
    pub filename: Option<String>,
    pub filesize: Option<u64>,
    pub content_type: Option<String>,
    pub description: Option<String>,
    pub content_url: Option<String>,
    pub author: Option<IdentifiableName>,
    pub created_on: Option<OffsetDateTime>,
    pub version: Option<IdentifiableName>,
    pub digest: Option<String>,
    pub downloads: Option<u32>,
    pub token: Option<String>,
}

impl Entity for File {
    const ROOT: &'static str = "file";
    const COLLECTION: &'static str = "files";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "filename" => self.filename = scalar::read(r)?,
            "filesize" => self.filesize = scalar::read(r)?,
            "content_type" => self.content_type = scalar::read(r)?,
            "description" => self.description = scalar::read(r)?,
            "content_url" => self.content_url = scalar::read(r)?,
            "author" => self.author = reference::read(r)?,
            "created_on" => self.created_on = scalar::read(r)?,
            "version" => self.version = reference::read(r)?,
            "version_id" => self.version = reference::read_bare_id(r)?,
            "digest" => self.digest = scalar::read(r)?,
            "downloads" => self.downloads = scalar::read(r)?,
            "token" => self.token = scalar::read(r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_fields(&self, w: &mut dyn WireWriter) -> Result<()> {
        scalar::write_opt(w, "token", self.token.as_ref())?;
        reference::write_id(w, "version_id", self.version.as_ref())?;
        scalar::write_opt(w, "filename", self.filename.as_ref())?;
        scalar::write_opt(w, "description", self.description.as_ref())
    }
}
