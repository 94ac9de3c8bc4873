use redmine_wire::{WireReader, WireWriter};
use time::OffsetDateTime;

use crate::collection;
use crate::convert::{read_id, Entity};
use crate::entities::{Attachment, Upload};
use crate::error::Result;
use crate::reference::{self, IdentifiableName};
use crate::scalar;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct News {
    pub id: u32,
    pub project: Option<IdentifiableName>,
    pub author: Option<IdentifiableName>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub created_on: Option<OffsetDateTime>,
    pub comments: Option<Vec<NewsComment>>,
    pub attachments: Option<Vec<Attachment>>,
    pub uploads: Option<Vec<Upload>>,
}

impl Entity for News {
    const ROOT: &'static str = "news";
    const COLLECTION: &'static str = "news";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "project" => self.project = reference::read(r)?,
            "author" => self.author = reference::read(r)?,
            "title" => self.title = scalar::read(r)?,
            "summary" => self.summary = scalar::read(r)?,
            "description" => self.description = scalar::read(r)?,
            "created_on" => self.created_on = scalar::read(r)?,
            "comments" => collection::read_entities(r, &mut self.comments)?,
            "attachments" => collection::read_entities(r, &mut self.attachments)?,
            "uploads" => collection::read_entities(r, &mut self.uploads)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_fields(&self, w: &mut dyn WireWriter) -> Result<()> {
        scalar::write_opt(w, "title", self.title.as_ref())?;
        scalar::write_opt(w, "summary", self.summary.as_ref())?;
        scalar::write_opt(w, "description", self.description.as_ref())?;
        collection::write_entities(w, "uploads", self.uploads.as_deref())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NewsComment {
    pub id: u32,
    pub author: Option<IdentifiableName>,
    pub content: Option<String>,
}

impl Entity for NewsComment {
    const ROOT: &'static str = "comment";
    const COLLECTION: &'static str = "comments";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "author" => self.author = reference::read(r)?,
            "content" => self.content = scalar::read(r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}
