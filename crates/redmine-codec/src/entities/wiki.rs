use redmine_wire::{ValueKind, WireReader, WireWriter};
use time::OffsetDateTime;

use crate::collection;
use crate::convert::{skip_unknown, Entity};
use crate::entities::{Attachment, Upload};
use crate::error::Result;
use crate::reference::{self, IdentifiableName};
use crate::scalar;

/// Reads `"parent": {"title": "..."}` / `<parent title="..."/>`.
fn read_parent_title(r: &mut dyn WireReader) -> Result<Option<String>> {
    if r.peek_kind()? == ValueKind::Null {
        r.skip_value()?;
        return Ok(None);
    }
    r.begin_object()?;
    let mut title = None;
    while let Some(key) = r.next_key()? {
        match key.as_str() {
            "title" => title = scalar::read(r)?,
            _ => skip_unknown("parent", &key, r)?,
        }
    }
    Ok(title)
}

/// A wiki page with its content.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WikiPage {
    pub title: String,
    pub parent_title: Option<String>,
    pub text: Option<String>,
    /// Page revision; sent back on update to detect conflicts.
    pub version: Option<u32>,
    pub author: Option<IdentifiableName>,
    /// Edit comment.
    pub comments: Option<String>,
    pub created_on: Option<OffsetDateTime>,
    pub updated_on: Option<OffsetDateTime>,
    pub attachments: Option<Vec<Attachment>>,
    pub uploads: Option<Vec<Upload>>,
}

impl Entity for WikiPage {
    const ROOT: &'static str = "wiki_page";
    const COLLECTION: &'static str = "wiki_pages";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "title" => self.title = scalar::read(r)?.unwrap_or_default(),
            "parent" => self.parent_title = read_parent_title(r)?,
            "text" => self.text = scalar::read(r)?,
            "version" => self.version = scalar::read(r)?,
            "author" => self.author = reference::read(r)?,
            "comments" => self.comments = scalar::read(r)?,
            "created_on" => self.created_on = scalar::read(r)?,
            "updated_on" => self.updated_on = scalar::read(r)?,
            "attachments" => collection::read_entities(r, &mut self.attachments)?,
            "uploads" => collection::read_entities(r, &mut self.uploads)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_fields(&self, w: &mut dyn WireWriter) -> Result<()> {
        scalar::write_opt(w, "text", self.text.as_ref())?;
        scalar::write_opt(w, "comments", self.comments.as_ref())?;
        scalar::write_opt(w, "version", self.version.as_ref())?;
        collection::write_entities(w, "uploads", self.uploads.as_deref())
    }
}

/// Index entry of `/projects/:id/wiki/index`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WikiPageInfo {
    pub title: String,
    pub parent_title: Option<String>,
    pub version: Option<u32>,
    pub created_on: Option<OffsetDateTime>,
    pub updated_on: Option<OffsetDateTime>,
}

impl Entity for WikiPageInfo {
    const ROOT: &'static str = "wiki_page";
    const COLLECTION: &'static str = "wiki_pages";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "title" => self.title = scalar::read(r)?.unwrap_or_default(),
            "parent" => self.parent_title = read_parent_title(r)?,
            "version" => self.version = scalar::read(r)?,
            "created_on" => self.created_on = scalar::read(r)?,
            "updated_on" => self.updated_on = scalar::read(r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::testing::{json, to_json, to_xml, xml};
    use crate::Codec;

    #[test]
    fn page_parent_is_a_title() {
        let from_json: WikiPage = json(
            r#"{"wiki_page":{"title":"Install","parent":{"title":"Wiki"},"text":"h1. Install","version":3,"author":{"id":1,"name":"Admin"},"comments":"typo","attachments":[]}}"#,
        );
        let from_xml: WikiPage = xml(
            r#"<wiki_page><title>Install</title><parent title="Wiki"/><text>h1. Install</text><version>3</version><author id="1" name="Admin"/><comments>typo</comments><attachments type="array"></attachments></wiki_page>"#,
        );
        assert_eq!(from_json, from_xml);
        assert_eq!(from_json.parent_title.as_deref(), Some("Wiki"));
        assert_eq!(from_json.attachments, Some(vec![]));
    }

    #[test]
    fn update_sends_text_comments_version() {
        let page = WikiPage {
            title: "Install".into(),
            text: Some("h1. Setup & run".into()),
            comments: Some("rewrite".into()),
            version: Some(3),
            ..WikiPage::default()
        };
        assert_eq!(
            to_json(&page),
            r#"{"wiki_page":{"text":"h1. Setup & run","comments":"rewrite","version":3}}"#
        );
        assert_eq!(
            to_xml(&page),
            "<wiki_page><text>h1. Setup &amp; run</text><comments>rewrite</comments><version>3</version></wiki_page>"
        );
    }

    #[test]
    fn index_lists_page_infos() {
        let list = Codec::json()
            .decode_list::<WikiPageInfo>(
                br#"{"wiki_pages":[{"title":"Wiki","version":2},{"title":"Install","parent":{"title":"Wiki"},"version":3}]}"#,
            )
            .unwrap();
        assert_eq!(list[0].parent_title, None);
        assert_eq!(list[1].parent_title.as_deref(), Some("Wiki"));
    }
}
