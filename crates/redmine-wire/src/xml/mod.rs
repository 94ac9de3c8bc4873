//! XML adapter built on `quick-xml`.
//!
//! Element attributes surface as leading object keys, `type="array"` marks an
//! array wrapper and `nil="true"` marks a null. Other `type` hints
//! (`type="integer"`, ...) are dropped; the scalar codec decides types.

mod reader;
mod writer;

pub use reader::XmlReader;
pub use writer::XmlWriter;
