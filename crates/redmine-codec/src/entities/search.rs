use redmine_wire::WireReader;
use time::OffsetDateTime;

use crate::convert::{read_id, Entity};
use crate::error::Result;
use crate::scalar;

/// A saved issue query.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Query {
    pub id: u32,
    pub name: String,
    pub is_public: bool,
    /// `None` for global queries.
    pub project_id: Option<u32>,
}

impl Entity for Query {
    const ROOT: &'static str = "query";
    const COLLECTION: &'static str = "queries";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "name" => self.name = scalar::read(r)?.unwrap_or_default(),
            "is_public" => self.is_public = scalar::read(r)?.unwrap_or_default(),
            "project_id" => self.project_id = scalar::read(r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// One hit of `/search`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResult {
    pub id: u32,
    pub title: String,
    /// Wire key `type`, e.g. `issue` or `wiki-page`.
    pub kind: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub datetime: Option<OffsetDateTime>,
}

impl Entity for SearchResult {
    const ROOT: &'static str = "result";
    const COLLECTION: &'static str = "results";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "title" => self.title = scalar::read(r)?.unwrap_or_default(),
            "type" => self.kind = scalar::read(r)?.unwrap_or_default(),
            "url" => self.url = scalar::read(r)?,
            "description" => self.description = scalar::read(r)?,
            "datetime" => self.datetime = scalar::read(r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}
