//! Decoding and shallow validation of model output.
//!
//! The structure check is strict (the root must be an array of objects) but the
//! field check is soft: a record missing any of the required keys is kept and
//! reported as a warning.

use crate::error::ValidationError;
use serde_json::{Map, Value};
use tracing::warn;

/// Keys every generated test case is expected to carry.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "id",
    "title",
    "description",
    "priority",
    "type",
    "preconditions",
    "steps",
    "expected_result",
];

/// One generated test case. Text fields are `None` when the model left them out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestCase {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    /// The record's `type` key
    pub kind: Option<String>,
    pub preconditions: Option<String>,
    pub steps: Vec<String>,
    pub expected_result: Option<String>,
}

impl TestCase {
    fn from_object(object: &Map<String, Value>) -> Self {
        let text = |key: &str| object.get(key).and_then(value_to_text);
        Self {
            id: text("id"),
            title: text("title"),
            description: text("description"),
            priority: text("priority"),
            kind: text("type"),
            preconditions: text("preconditions"),
            steps: object.get("steps").map(steps_from_value).unwrap_or_default(),
            expected_result: text("expected_result"),
        }
    }
}

/// A record that was kept despite missing keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields {
    pub index: usize,
    pub id: Option<String>,
    pub missing: Vec<&'static str>,
}

/// Result of a successful parse: one test case per array element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedBatch {
    pub cases: Vec<TestCase>,
    pub warnings: Vec<MissingFields>,
}

impl ValidatedBatch {
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }
}

/// Parse raw model output into test cases.
///
/// Surrounding whitespace and a single Markdown code fence are tolerated.
pub fn parse_test_cases(raw: &str) -> Result<ValidatedBatch, ValidationError> {
    let body = strip_code_fence(raw);
    let data: Value = serde_json::from_str(body).map_err(|e| ValidationError::Decode {
        message: e.to_string(),
        line: e.line(),
        column: e.column(),
    })?;

    let items = match data {
        Value::Array(items) => items,
        other => {
            return Err(ValidationError::NotAnArray {
                found: json_type_name(&other),
            })
        }
    };

    let mut batch = ValidatedBatch::default();
    for (index, item) in items.iter().enumerate() {
        let object = item.as_object().ok_or(ValidationError::ElementNotObject {
            index,
            found: json_type_name(item),
        })?;

        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|key| !object.contains_key(*key))
            .collect();

        let case = TestCase::from_object(object);
        if !missing.is_empty() {
            warn!(
                index,
                id = case.id.as_deref().unwrap_or("<none>"),
                missing = %missing.join(", "),
                "Warning: A test case object is missing a required key."
            );
            batch.warnings.push(MissingFields {
                index,
                id: case.id.clone(),
                missing,
            });
        }
        batch.cases.push(case);
    }

    Ok(batch)
}

/// Remove one surrounding ```` ``` ```` fence (with optional language tag).
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some((_lang, body)) = rest.split_once('\n') else {
        return trimmed;
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

fn steps_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(value_to_text).collect(),
        other => value_to_text(other).into_iter().collect(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
