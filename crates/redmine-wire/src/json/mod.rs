//! JSON adapter: a byte cursor reader and a compact writer.

mod reader;
mod util;
mod writer;

pub use reader::JsonReader;
pub use writer::JsonWriter;
