use redmine_wire::{Scalar, ValueKind, WireReader, WireWriter};

use crate::collection;
use crate::convert::{read_id, Entity};
use crate::entities::TrackerCustomField;
use crate::error::Result;
use crate::scalar::{self, ToWire};

/// Custom field definition as listed by `/custom_fields`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CustomField {
    pub id: u32,
    pub name: String,
    pub customized_type: Option<String>,
    pub field_format: Option<String>,
    pub regexp: Option<String>,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
    pub is_required: bool,
    pub is_filter: bool,
    pub searchable: bool,
    pub multiple: bool,
    pub default_value: Option<String>,
    pub visible: bool,
    pub possible_values: Option<Vec<CustomFieldPossibleValue>>,
    pub trackers: Option<Vec<TrackerCustomField>>,
    pub roles: Option<Vec<CustomFieldRole>>,
}

impl Entity for CustomField {
    const ROOT: &'static str = "custom_field";
    const COLLECTION: &'static str = "custom_fields";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "name" => self.name = scalar::read(r)?.unwrap_or_default(),
            "customized_type" => self.customized_type = scalar::read(r)?,
            "field_format" => self.field_format = scalar::read(r)?,
            "regexp" => self.regexp = scalar::read(r)?,
            "min_length" => self.min_length = scalar::read(r)?,
            "max_length" => self.max_length = scalar::read(r)?,
            "is_required" => self.is_required = scalar::read(r)?.unwrap_or_default(),
            "is_filter" => self.is_filter = scalar::read(r)?.unwrap_or_default(),
            "searchable" => self.searchable = scalar::read(r)?.unwrap_or_default(),
            "multiple" => self.multiple = scalar::read(r)?.unwrap_or_default(),
            "default_value" => self.default_value = scalar::read(r)?,
            "visible" => self.visible = scalar::read(r)?.unwrap_or_default(),
            "possible_values" => collection::read_entities(r, &mut self.possible_values)?,
            "trackers" => collection::read_entities(r, &mut self.trackers)?,
            "roles" => collection::read_entities(r, &mut self.roles)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// One entry of a list-format custom field.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CustomFieldPossibleValue {
    pub value: String,
    pub label: Option<String>,
}

impl Entity for CustomFieldPossibleValue {
    const ROOT: &'static str = "possible_value";
    const COLLECTION: &'static str = "possible_values";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "value" => self.value = scalar::read(r)?.unwrap_or_default(),
            "label" => self.label = scalar::read(r)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

named_entity! {
    /// Role a custom field is visible to.
    CustomFieldRole, "role", "roles"
}

/// One value of a custom field on a customized record.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct CustomFieldValue {
    pub info: String,
}

impl CustomFieldValue {
    pub fn new(info: impl Into<String>) -> Self {
        Self { info: info.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.info
    }
}

impl From<&str> for CustomFieldValue {
    fn from(info: &str) -> Self {
        Self::new(info)
    }
}

impl From<String> for CustomFieldValue {
    fn from(info: String) -> Self {
        Self { info }
    }
}

impl Entity for CustomFieldValue {
    const ROOT: &'static str = "value";
    const COLLECTION: &'static str = "values";
    const TEXT_FORM: bool = true;

    fn read_field(&mut self, _key: &str, _r: &mut dyn WireReader) -> Result<bool> {
        Ok(false)
    }

    fn read_text(&mut self, text: String) {
        self.info = text;
    }
}

/// Wire shape of a custom field's `value`: one scalar or a list of them.
#[derive(Debug)]
enum FieldValue {
    Single(CustomFieldValue),
    Multiple(Vec<CustomFieldValue>),
}

impl FieldValue {
    fn read(r: &mut dyn WireReader) -> Result<Option<FieldValue>> {
        if r.peek_kind()? == ValueKind::Array {
            let mut values = None;
            collection::read_entities(r, &mut values)?;
            return Ok(values.map(FieldValue::Multiple));
        }
        let value = scalar::read::<String>(r)?;
        Ok(value.map(|v| FieldValue::Single(CustomFieldValue::from(v))))
    }

    fn into_values(self) -> Vec<CustomFieldValue> {
        match self {
            FieldValue::Single(value) => vec![value],
            FieldValue::Multiple(values) => values,
        }
    }
}

/// A custom field value set on an issue, project, user, ...
///
/// Values are always a list; `multiple` reflects what the server said and is
/// recomputed from the value count when writing.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IssueCustomField {
    pub id: u32,
    pub name: String,
    pub multiple: bool,
    pub values: Option<Vec<CustomFieldValue>>,
}

impl IssueCustomField {
    pub fn single(id: u32, value: impl Into<String>) -> Self {
        Self {
            id,
            values: Some(vec![CustomFieldValue::new(value)]),
            ..Self::default()
        }
    }

    pub fn multiple<I, V>(id: u32, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values: Vec<_> = values.into_iter().map(CustomFieldValue::new).collect();
        Self {
            id,
            multiple: values.len() > 1,
            values: Some(values),
            ..Self::default()
        }
    }

    /// First value, the only one of a single-valued field.
    pub fn value(&self) -> Option<&str> {
        self.values.as_deref()?.first().map(CustomFieldValue::as_str)
    }
}

impl Entity for IssueCustomField {
    const ROOT: &'static str = "custom_field";
    const COLLECTION: &'static str = "custom_fields";

    fn read_field(&mut self, key: &str, r: &mut dyn WireReader) -> Result<bool> {
        match key {
            "id" => self.id = read_id(r)?,
            "name" => self.name = scalar::read(r)?.unwrap_or_default(),
            "multiple" => self.multiple = scalar::read(r)?.unwrap_or_default(),
            "value" => self.values = FieldValue::read(r)?.map(FieldValue::into_values),
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn write_attributes(&self) -> Vec<(&'static str, Scalar)> {
        let multiple = self.values.as_ref().is_some_and(|v| v.len() > 1);
        vec![
            ("id", self.id.to_wire()),
            ("multiple", if multiple { Scalar::Bool(true) } else { Scalar::Null }),
        ]
    }

    fn write_fields(&self, w: &mut dyn WireWriter) -> Result<()> {
        match self.values.as_deref() {
            None => Ok(()),
            Some([single]) => scalar::write(w, "value", single.as_str()),
            Some(values) => collection::write_scalars(
                w,
                "value",
                "value",
                Some(values.iter().map(CustomFieldValue::as_str)),
            ),
        }
    }
}
