//! Core data models for formbase.
//!
//! Fields and records arrive already deserialized from the backend's JSON
//! representation. Only the three text-shaped field kinds are tracked by the
//! filter engine; media and location kinds carry structured values that the
//! engine never inspects.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// =============================================================================
// CATEGORIES
// =============================================================================

/// Coarse field category used to pool type-inference evidence.
///
/// This is a closed set: operator resolution matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Single-line text input.
    PlainText,
    /// Multi-line text area.
    MultilineText,
    /// Choice from a fixed option list.
    Dropdown,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [
        Category::PlainText,
        Category::MultilineText,
        Category::Dropdown,
    ];

    /// Stable key used in query strings and serialized clauses.
    pub fn key(&self) -> &'static str {
        match self {
            Self::PlainText => "plain_text",
            Self::MultilineText => "multiline_text",
            Self::Dropdown => "dropdown",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PlainText => "Text",
            Self::MultilineText => "Multiline text",
            Self::Dropdown => "Dropdown",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for Category {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "plain_text" | "plaintext" | "text" => Ok(Self::PlainText),
            "multiline_text" | "multilinetext" | "multiline" => Ok(Self::MultilineText),
            "dropdown" => Ok(Self::Dropdown),
            _ => Err(format!("Invalid category: {}", s)),
        }
    }
}

/// Field input kind as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    PlainText,
    MultilineText,
    Dropdown,
    /// Photo capture; values are `{uri, timestamp}` descriptors.
    Photo,
    /// Map location; values are `{latitude, longitude}` pairs.
    Location,
}

impl FieldKind {
    /// The filter category this kind pools into, if it is tracked.
    pub fn category(&self) -> Option<Category> {
        match self {
            Self::PlainText => Some(Category::PlainText),
            Self::MultilineText => Some(Category::MultilineText),
            Self::Dropdown => Some(Category::Dropdown),
            Self::Photo | Self::Location => None,
        }
    }
}

impl From<Category> for FieldKind {
    fn from(category: Category) -> Self {
        match category {
            Category::PlainText => Self::PlainText,
            Category::MultilineText => Self::MultilineText,
            Category::Dropdown => Self::Dropdown,
        }
    }
}

// =============================================================================
// FIELDS AND RECORDS
// =============================================================================

/// A field definition on a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Unique within its form; keys the record's value map.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// The form designer marked this field as numeric.
    #[serde(rename = "is_numeric", default)]
    pub declared_numeric: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl Field {
    /// Create an optional, non-numeric field.
    pub fn new(name: impl Into<String>, kind: impl Into<FieldKind>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            declared_numeric: false,
            required: false,
            options: None,
        }
    }

    /// Mark the field as declared numeric.
    pub fn numeric(mut self) -> Self {
        self.declared_numeric = true;
        self
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach dropdown options.
    pub fn with_options(mut self, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Tracked category of this field, if any.
    pub fn category(&self) -> Option<Category> {
        self.kind.category()
    }
}

/// A submitted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    /// Raw stored values keyed by field name.
    #[serde(default)]
    pub values: BTreeMap<String, JsonValue>,
}

impl Record {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            values: BTreeMap::new(),
        }
    }

    /// Builder-style value insertion.
    pub fn with_value(mut self, field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    /// Raw value stored under a field name.
    pub fn value(&self, field: &str) -> Option<&JsonValue> {
        self.values.get(field)
    }
}

// =============================================================================
// RAW VALUE INTERPRETATION
// =============================================================================

/// Text of a primitive-looking raw value.
///
/// Returns `None` for empty values (null, blank strings) and for structured
/// values: JSON objects/arrays, or strings that decode to one.
pub fn filterable_text(value: &JsonValue) -> Option<Cow<'_, str>> {
    match value {
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
        JsonValue::Bool(b) => Some(Cow::Owned(b.to_string())),
        JsonValue::Number(n) => Some(Cow::Owned(n.to_string())),
        JsonValue::String(s) => {
            if s.trim().is_empty() || is_encoded_structure(s) {
                None
            } else {
                Some(Cow::Borrowed(s.as_str()))
            }
        }
    }
}

fn is_encoded_structure(s: &str) -> bool {
    let trimmed = s.trim_start();
    if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        return false;
    }
    matches!(
        serde_json::from_str::<JsonValue>(trimmed),
        Ok(JsonValue::Object(_) | JsonValue::Array(_))
    )
}

/// Parse text as a finite number.
///
/// Surrounding whitespace is ignored; blank input, `NaN` and infinities are
/// rejected.
pub fn parse_finite(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_keys_round_trip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.key().parse::<Category>().unwrap(), category);
        }
        assert_eq!("Multiline".parse::<Category>().unwrap(), Category::MultilineText);
        assert!("photo".parse::<Category>().is_err());
    }

    #[test]
    fn test_untracked_kinds_have_no_category() {
        assert_eq!(FieldKind::Photo.category(), None);
        assert_eq!(FieldKind::Location.category(), None);
        assert_eq!(FieldKind::Dropdown.category(), Some(Category::Dropdown));
    }

    #[test]
    fn test_field_deserializes_backend_shape() {
        let field: Field = serde_json::from_value(json!({
            "id": 7,
            "form_id": 3,
            "name": "Age",
            "type": "plain_text",
            "is_numeric": true,
            "required": true
        }))
        .unwrap();

        assert_eq!(field.name, "Age");
        assert_eq!(field.kind, FieldKind::PlainText);
        assert!(field.declared_numeric);
        assert!(field.required);
        assert!(field.options.is_none());
    }

    #[test]
    fn test_field_defaults_when_flags_missing() {
        let field: Field =
            serde_json::from_value(json!({"name": "Color", "type": "dropdown", "options": ["red", "blue"]}))
                .unwrap();
        assert!(!field.declared_numeric);
        assert!(!field.required);
        assert_eq!(field.options.as_deref(), Some(&["red".to_string(), "blue".to_string()][..]));
    }

    #[test]
    fn test_record_deserializes_mixed_values() {
        let record: Record = serde_json::from_value(json!({
            "id": 1,
            "values": {"Age": "10", "Score": 4.5, "Where": {"latitude": 1.0, "longitude": 2.0}}
        }))
        .unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.values.len(), 3);
    }

    #[test]
    fn test_filterable_text_primitives() {
        assert_eq!(filterable_text(&json!("abc")).as_deref(), Some("abc"));
        assert_eq!(filterable_text(&json!(42)).as_deref(), Some("42"));
        assert_eq!(filterable_text(&json!(true)).as_deref(), Some("true"));
    }

    #[test]
    fn test_filterable_text_excludes_empty_and_structured() {
        assert!(filterable_text(&JsonValue::Null).is_none());
        assert!(filterable_text(&json!("   ")).is_none());
        assert!(filterable_text(&json!({"uri": "file://a.jpg"})).is_none());
        assert!(filterable_text(&json!(r#"{"latitude": 1.5, "longitude": 2.5}"#)).is_none());
        assert!(filterable_text(&json!("[1, 2]")).is_none());
    }

    #[test]
    fn test_filterable_text_keeps_brace_prefixed_prose() {
        assert_eq!(filterable_text(&json!("{not json")).as_deref(), Some("{not json"));
    }

    #[test]
    fn test_parse_finite() {
        assert_eq!(parse_finite("10"), Some(10.0));
        assert_eq!(parse_finite(" -2.5 "), Some(-2.5));
        assert_eq!(parse_finite("1e3"), Some(1000.0));
        assert_eq!(parse_finite(""), None);
        assert_eq!(parse_finite("abc"), None);
        assert_eq!(parse_finite("NaN"), None);
        assert_eq!(parse_finite("inf"), None);
    }
}
