//! Typed Redmine REST entities and their JSON/XML wire converters.
//!
//! ```
//! use redmine_codec::{Codec, Issue};
//!
//! let issue: Issue = Codec::json()
//!     .decode(br#"{"issue":{"id":7,"project":{"id":1,"name":"Alpha"},"subject":"Crash"}}"#)
//!     .unwrap();
//! assert_eq!(issue.project.as_ref().map(|p| p.id), Some(1));
//!
//! let xml = Codec::xml().encode(&issue).unwrap();
//! assert_eq!(xml, b"<issue><subject>Crash</subject><project_id>1</project_id></issue>");
//! ```

mod codec;
mod error;
mod options;

pub mod collection;
pub mod convert;
pub mod entities;
pub mod enums;
pub mod paging;
pub mod reference;
pub mod registry;
pub mod scalar;

pub use codec::Codec;
pub use convert::{Converter, Entity, EntityConverter};
pub use entities::*;
pub use enums::{IssueRelationType, ProjectStatus, UserStatus, VersionSharing, VersionStatus};
pub use error::{Error, ErrorKind, Result};
pub use options::CodecOptions;
pub use paging::PagedList;
pub use reference::IdentifiableName;
pub use redmine_wire::{WireError, WireFormat};
