use std::fmt;

/// The two encodings Redmine accepts for its REST API.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum WireFormat {
    Json,
    Xml,
}

impl WireFormat {
    /// Suffix Redmine expects on resource paths, e.g. `/issues.json`.
    pub fn extension(self) -> &'static str {
        match self {
            WireFormat::Json => "json",
            WireFormat::Xml => "xml",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            WireFormat::Json => "application/json",
            WireFormat::Xml => "application/xml",
        }
    }
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireFormat::Json => f.write_str("JSON"),
            WireFormat::Xml => f.write_str("XML"),
        }
    }
}
