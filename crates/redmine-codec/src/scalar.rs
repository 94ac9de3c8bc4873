//! Scalar codec: numbers, booleans, decimals, dates and strings.
//!
//! Decoding accepts native JSON tokens as well as their stringified forms
//! (`5`, `"5"`, `<id>5</id>`), and treats empty text as null for every type
//! except strings. Anything else that fails to parse is a
//! [`Error::ValueFormat`]; nothing is silently defaulted.

use std::str::FromStr;

use redmine_wire::{Scalar, WireReader, WireWriter};
use rust_decimal::Decimal;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::error::{Error, Result};

/// A type that can be parsed from a wire scalar.
pub trait FromWire: Sized {
    /// Type name used in error reports.
    const EXPECTED: &'static str;
    /// Whether blank text decodes to null.
    const EMPTY_IS_NULL: bool = true;

    fn from_text(text: &str) -> Option<Self>;

    fn from_bool(_value: bool) -> Option<Self> {
        None
    }
}

/// A type that can be emitted as a wire scalar.
pub trait ToWire {
    fn to_wire(&self) -> Scalar;
}

impl<T: ToWire + ?Sized> ToWire for &T {
    fn to_wire(&self) -> Scalar {
        (**self).to_wire()
    }
}

/// Reads the pending value as `T`; `None` for null or blank input.
pub fn read<T: FromWire>(reader: &mut dyn WireReader) -> Result<Option<T>> {
    let position = reader.position();
    let invalid = |text: &str| Error::ValueFormat {
        expected: T::EXPECTED,
        text: text.to_owned(),
        position,
    };
    match reader.read_scalar()? {
        Scalar::Null => Ok(None),
        Scalar::Bool(b) => T::from_bool(b)
            .map(Some)
            .ok_or_else(|| invalid(if b { "true" } else { "false" })),
        Scalar::Number(text) | Scalar::Text(text) => {
            if !T::EMPTY_IS_NULL {
                return T::from_text(&text).map(Some).ok_or_else(|| invalid(&text));
            }
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            T::from_text(trimmed).map(Some).ok_or_else(|| invalid(&text))
        }
    }
}

/// Like [`read`], but null is a format error.
pub fn read_required<T: FromWire>(reader: &mut dyn WireReader) -> Result<T> {
    let position = reader.position();
    read(reader)?.ok_or(Error::ValueFormat {
        expected: T::EXPECTED,
        text: String::new(),
        position,
    })
}

pub fn write<T: ToWire + ?Sized>(writer: &mut dyn WireWriter, key: &str, value: &T) -> Result<()> {
    writer.write_value(key, &value.to_wire())?;
    Ok(())
}

/// Writes `key` only when a value is present.
pub fn write_opt<T: ToWire>(writer: &mut dyn WireWriter, key: &str, value: Option<&T>) -> Result<()> {
    match value {
        Some(value) => write(writer, key, value),
        None => Ok(()),
    }
}

macro_rules! integer_from_wire {
    ($($ty:ty),*) => {$(
        impl FromWire for $ty {
            const EXPECTED: &'static str = "integer";

            fn from_text(text: &str) -> Option<Self> {
                text.parse().ok()
            }
        }

        impl ToWire for $ty {
            fn to_wire(&self) -> Scalar {
                Scalar::Number(self.to_string())
            }
        }
    )*};
}

integer_from_wire!(i32, i64, u32, u64);

impl FromWire for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_text(text: &str) -> Option<Self> {
        if text.eq_ignore_ascii_case("true") || text == "1" {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") || text == "0" {
            Some(false)
        } else {
            None
        }
    }

    fn from_bool(value: bool) -> Option<Self> {
        Some(value)
    }
}

impl ToWire for bool {
    fn to_wire(&self) -> Scalar {
        Scalar::Bool(*self)
    }
}

macro_rules! float_from_wire {
    ($($ty:ty),*) => {$(
        impl FromWire for $ty {
            const EXPECTED: &'static str = "number";

            fn from_text(text: &str) -> Option<Self> {
                text.parse::<$ty>().ok().filter(|v| v.is_finite())
            }
        }

        impl ToWire for $ty {
            fn to_wire(&self) -> Scalar {
                if self.is_finite() {
                    // Display never uses exponent notation or locale separators
                    Scalar::Number(self.to_string())
                } else {
                    Scalar::Null
                }
            }
        }
    )*};
}

float_from_wire!(f32, f64);

impl FromWire for Decimal {
    const EXPECTED: &'static str = "decimal";

    fn from_text(text: &str) -> Option<Self> {
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
    }
}

impl ToWire for Decimal {
    fn to_wire(&self) -> Scalar {
        Scalar::Number(self.normalize().to_string())
    }
}

impl FromWire for String {
    const EXPECTED: &'static str = "string";
    const EMPTY_IS_NULL: bool = false;

    fn from_text(text: &str) -> Option<Self> {
        Some(text.to_owned())
    }

    fn from_bool(value: bool) -> Option<Self> {
        Some(value.to_string())
    }
}

impl ToWire for String {
    fn to_wire(&self) -> Scalar {
        Scalar::Text(self.clone())
    }
}

impl ToWire for str {
    fn to_wire(&self) -> Scalar {
        Scalar::Text(self.to_owned())
    }
}

impl FromWire for Date {
    const EXPECTED: &'static str = "date";

    fn from_text(text: &str) -> Option<Self> {
        parse_date(text)
    }
}

impl ToWire for Date {
    fn to_wire(&self) -> Scalar {
        Scalar::Text(format_date(*self))
    }
}

impl FromWire for OffsetDateTime {
    const EXPECTED: &'static str = "timestamp";

    fn from_text(text: &str) -> Option<Self> {
        parse_timestamp(text)
    }
}

impl ToWire for OffsetDateTime {
    fn to_wire(&self) -> Scalar {
        self.format(&Rfc3339)
            .map(Scalar::Text)
            .unwrap_or(Scalar::Null)
    }
}

/// Parses the timestamp shapes Redmine has emitted over its versions.
///
/// Accepted: RFC 3339 (`2024-03-01T10:20:30Z`, `...+02:00`), ISO-8601 without
/// offset (taken as UTC), `2012/04/27 13:10:33 +0200`,
/// `Fri Apr 27 13:10:33 +0200 2012`, and bare dates (midnight UTC).
pub fn parse_timestamp(text: &str) -> Option<OffsetDateTime> {
    if let Ok(ts) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(ts);
    }
    if let Ok(ts) = OffsetDateTime::parse(
        text,
        format_description!(
            "[year]/[month]/[day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
        ),
    ) {
        return Some(ts);
    }
    if let Ok(ts) = OffsetDateTime::parse(
        text,
        format_description!(
            "[weekday repr:short] [month repr:short] [day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute] [year]"
        ),
    ) {
        return Some(ts);
    }
    if let Ok(ts) = PrimitiveDateTime::parse(
        text,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    ) {
        return Some(ts.assume_utc());
    }
    parse_plain_date(text).map(|date| date.midnight().assume_utc())
}

/// Parses a date-only field; full timestamps are truncated to their date.
pub fn parse_date(text: &str) -> Option<Date> {
    parse_plain_date(text).or_else(|| parse_timestamp(text).map(|ts| ts.date()))
}

fn parse_plain_date(text: &str) -> Option<Date> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .or_else(|_| Date::parse(text, format_description!("[year]/[month]/[day]")))
        .ok()
}

/// Formats a date-only field as `yyyy-MM-dd`.
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
