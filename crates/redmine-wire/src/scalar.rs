/// A leaf token as it appears on the wire.
///
/// XML only ever produces [`Scalar::Text`]; JSON keeps the lexical class of
/// the token so the scalar codec can tell `"5"` from `5` when it matters.
/// The same type is used for output, where it decides quoting in JSON.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    /// Numeric literal, kept verbatim.
    Number(String),
    Text(String),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Textual form used for XML content and attributes. `None` for null.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Null => None,
            Scalar::Bool(true) => Some("true"),
            Scalar::Bool(false) => Some("false"),
            Scalar::Number(s) | Scalar::Text(s) => Some(s),
        }
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "boolean",
            Scalar::Number(_) => "number",
            Scalar::Text(_) => "text",
        }
    }
}

/// Shape of the value under the cursor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueKind {
    Null,
    Scalar,
    Object,
    Array,
}

impl ValueKind {
    pub(crate) fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Scalar => "scalar",
            ValueKind::Object => "object",
            ValueKind::Array => "array",
        }
    }
}
