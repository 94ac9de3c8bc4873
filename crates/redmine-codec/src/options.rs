//! Codec configuration.

use serde::Deserialize;

/// Tunables a host application can embed in its own configuration file.
///
/// ```toml
/// [redmine.codec]
/// max_depth = 32
/// xml_declaration = true
/// ```
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CodecOptions {
    /// Deepest object/array nesting accepted on decode.
    pub max_depth: usize,
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` before XML documents.
    pub xml_declaration: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            max_depth: redmine_wire::DEFAULT_MAX_DEPTH,
            xml_declaration: false,
        }
    }
}
