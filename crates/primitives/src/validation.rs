//! Coercion of loosely typed request input into typed values.
//!
//! Request bodies, multipart forms and query strings are all normalised into a
//! [`RawFields`] map first. A [`FieldReader`] then pulls typed values out of it,
//! accepting numeric-looking strings for numeric fields, and collects every
//! problem as a field-keyed [`ValidationError`] so a caller can report all of
//! them at once.

use serde_json::{Map, Value};
use std::str::FromStr;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

pub type RawFields = Map<String, Value>;

/// Builds a field map from string pairs (query strings, multipart text parts).
pub fn fields_from_pairs<I, K, V>(pairs: I) -> RawFields
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), Value::String(v.into())))
        .collect()
}

pub fn field_error(code: &'static str, message: impl Into<String>) -> ValidationError {
    ValidationError::new(code).with_message(message.into().into())
}

pub struct FieldReader<'a> {
    fields: &'a RawFields,
    errors: ValidationErrors,
}

impl<'a> FieldReader<'a> {
    pub fn new(fields: &'a RawFields) -> Self {
        Self {
            fields,
            errors: ValidationErrors::new(),
        }
    }

    /// `null` and blank strings count as absent.
    fn present(&self, field: &str) -> Option<&'a Value> {
        match self.fields.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(v) => Some(v),
        }
    }

    pub fn reject(&mut self, field: &'static str, code: &'static str, message: impl Into<String>) {
        self.errors.add(field, field_error(code, message));
    }

    fn missing(&mut self, field: &'static str) {
        self.reject(field, "required", format!("{} is required", field));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    pub fn optional_string(&mut self, field: &'static str) -> Option<String> {
        match self.present(field)? {
            Value::String(s) => Some(s.trim().to_string()),
            _ => {
                self.reject(field, "invalid_string", format!("{} must be a string", field));
                None
            }
        }
    }

    pub fn required_string(&mut self, field: &'static str) -> Option<String> {
        if self.present(field).is_none() {
            self.missing(field);
            return None;
        }
        self.optional_string(field)
    }

    pub fn optional_number(&mut self, field: &'static str) -> Option<f64> {
        let parsed = match self.present(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match parsed {
            Some(n) if n.is_finite() => Some(n),
            _ => {
                self.reject(field, "invalid_number", format!("{} must be a number", field));
                None
            }
        }
    }

    pub fn required_number(&mut self, field: &'static str) -> Option<f64> {
        if self.present(field).is_none() {
            self.missing(field);
            return None;
        }
        self.optional_number(field)
    }

    pub fn optional_integer(&mut self, field: &'static str) -> Option<i64> {
        let parsed = match self.present(field)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && f.is_finite()).map(|f| f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        if parsed.is_none() {
            self.reject(field, "invalid_integer", format!("{} must be a whole number", field));
        }
        parsed
    }

    pub fn required_integer(&mut self, field: &'static str) -> Option<i64> {
        if self.present(field).is_none() {
            self.missing(field);
            return None;
        }
        self.optional_integer(field)
    }

    /// Non-negative count that fits a database `INTEGER`.
    pub fn optional_count(&mut self, field: &'static str) -> Option<i32> {
        let value = self.optional_integer(field)?;
        match i32::try_from(value) {
            Ok(v) if v >= 0 => Some(v),
            _ => {
                self.reject(field, "range", format!("{} must be zero or more", field));
                None
            }
        }
    }

    pub fn optional_choice<T: FromStr>(&mut self, field: &'static str) -> Option<T> {
        let raw = self.optional_string(field)?;
        match T::from_str(&raw) {
            Ok(v) => Some(v),
            Err(_) => {
                self.reject(
                    field,
                    "invalid_choice",
                    format!("{} has an unsupported value '{}'", field, raw),
                );
                None
            }
        }
    }

    pub fn required_choice<T: FromStr>(&mut self, field: &'static str) -> Option<T> {
        if self.present(field).is_none() {
            self.missing(field);
            return None;
        }
        self.optional_choice(field)
    }

    pub fn optional_email(&mut self, field: &'static str) -> Option<String> {
        let raw = self.optional_string(field)?;
        if raw.validate_email() {
            Some(raw.to_lowercase())
        } else {
            self.reject(field, "email", format!("{} must be a valid email address", field));
            None
        }
    }

    /// Accepts a JSON array of strings; a bare string is treated as one element.
    pub fn optional_string_list(&mut self, field: &'static str) -> Option<Vec<String>> {
        let list = match self.present(field)? {
            Value::Array(items) => items
                .iter()
                .map(|v| v.as_str().map(|s| s.trim().to_string()))
                .collect::<Option<Vec<_>>>(),
            Value::String(s) => Some(vec![s.trim().to_string()]),
            _ => None,
        };

        match list {
            Some(items) => Some(items.into_iter().filter(|s| !s.is_empty()).collect()),
            None => {
                self.reject(field, "invalid_list", format!("{} must be a list of strings", field));
                None
            }
        }
    }

    pub fn ensure(
        &mut self,
        ok: bool,
        field: &'static str,
        code: &'static str,
        message: impl Into<String>,
    ) {
        if !ok {
            self.reject(field, code, message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::field_messages;
    use serde_json::json;

    fn fields(value: Value) -> RawFields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn coerces_numeric_strings() {
        let raw = fields(json!({ "price": " 1500.5 ", "bedrooms": "3", "area": 120 }));
        let mut reader = FieldReader::new(&raw);

        assert_eq!(reader.required_number("price"), Some(1500.5));
        assert_eq!(reader.optional_count("bedrooms"), Some(3));
        assert_eq!(reader.optional_number("area"), Some(120.0));
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn blank_optional_fields_are_absent_not_errors() {
        let raw = fields(json!({ "bedrooms": "", "video": null }));
        let mut reader = FieldReader::new(&raw);

        assert_eq!(reader.optional_count("bedrooms"), None);
        assert_eq!(reader.optional_string("video"), None);
        assert_eq!(reader.optional_number("area"), None);
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn collects_every_problem_by_field() {
        let raw = fields(json!({ "price": "cheap", "bathrooms": "-1", "city": 42 }));
        let mut reader = FieldReader::new(&raw);

        reader.required_number("price");
        reader.optional_count("bathrooms");
        reader.required_string("city");
        reader.required_string("location");

        let errors = reader.finish().unwrap_err();
        let map = field_messages(&errors);
        assert_eq!(map.len(), 4);
        assert_eq!(map["price"], vec!["price must be a number".to_string()]);
        assert_eq!(map["bathrooms"], vec!["bathrooms must be zero or more".to_string()]);
        assert_eq!(map["city"], vec!["city must be a string".to_string()]);
        assert_eq!(map["location"], vec!["location is required".to_string()]);
    }

    #[test]
    fn rejects_non_finite_and_fractional_values() {
        let raw = fields(json!({ "price": "NaN", "bedrooms": 2.5 }));
        let mut reader = FieldReader::new(&raw);

        assert_eq!(reader.required_number("price"), None);
        assert_eq!(reader.optional_count("bedrooms"), None);
        assert!(reader.has_errors());
    }

    #[test]
    fn emails_are_checked_and_lowercased() {
        let raw = fields(json!({ "email": "Buyer@Example.com", "other": "nope" }));
        let mut reader = FieldReader::new(&raw);

        assert_eq!(
            reader.optional_email("email").as_deref(),
            Some("buyer@example.com")
        );
        assert_eq!(reader.optional_email("other"), None);
        assert!(reader.has_errors());
    }

    #[test]
    fn string_lists_accept_arrays_and_single_values() {
        let raw = fields(json!({ "images": ["a.jpg", " ", "b.jpg"], "single": "c.jpg", "bad": [1] }));
        let mut reader = FieldReader::new(&raw);

        assert_eq!(
            reader.optional_string_list("images"),
            Some(vec!["a.jpg".to_string(), "b.jpg".to_string()])
        );
        assert_eq!(
            reader.optional_string_list("single"),
            Some(vec!["c.jpg".to_string()])
        );
        assert_eq!(reader.optional_string_list("bad"), None);
        assert!(reader.has_errors());
    }
}
