use serde_json::{Number, Value};

/// Field separator of the compacted index: a space followed by a pipe
pub const FIELD_DELIMITER: &str = " |";

/// Separator between keywords inside the keyword field
pub const KEYWORD_SEPARATOR: char = ',';

/// One package entry of the registry's bulk document, before compaction.
///
/// Fields are already flattened to text. The keyword list keeps the source
/// order; an empty list encodes as an empty keyword field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageRecord {
    pub name: String,
    pub description: String,
    pub keywords: Vec<String>,
}

impl PackageRecord {
    pub fn new(name: impl Into<String>, description: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Build a record from one value of the bulk document.
    ///
    /// Nothing is validated: missing or non-text fields are flattened the
    /// same way the registry client always did, and entries that are not
    /// objects at all (such as the `_updated` stamp) yield an empty record.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key);

        let keywords = match field("keywords") {
            Some(Value::Array(items)) => items.iter().map(item_text).collect(),
            Some(other) => {
                let text = value_text(other);
                if text.is_empty() { Vec::new() } else { vec![text] }
            }
            None => Vec::new(),
        };

        Self {
            name: field("name").map(value_text).unwrap_or_default(),
            description: field("description").map(value_text).unwrap_or_default(),
            keywords,
        }
    }

    /// Keyword field as stored on disk, before escaping
    pub fn keyword_field(&self) -> String {
        self.keywords.join(",")
    }
}

/// Flatten a JSON value to text.
///
/// Falsy scalars (null, false, 0, "") are empty, other scalars print as
/// themselves, arrays join their flattened items with commas and objects
/// collapse to `[object Object]`.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "true".to_string(),
        Value::Number(n) => {
            if n.as_f64() == Some(0.0) {
                String::new()
            } else {
                number_text(n)
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(item_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Inside arrays only null is blank; false and 0 print as themselves
fn item_text(item: &Value) -> String {
    match item {
        Value::Bool(false) => "false".to_string(),
        Value::Number(n) => number_text(n),
        other => value_text(other),
    }
}

/// Floats print without a trailing `.0` when whole: `1.0` -> `1`
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

/// Statistics of a finished index build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub records: usize,
    /// Entries that were not objects and encoded as empty lines
    pub non_objects: usize,
    pub bytes: u64,
}
