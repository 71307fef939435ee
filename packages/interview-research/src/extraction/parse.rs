//! Parse-with-defaults for model output.
//!
//! Model responses are untrusted text. [`parse_object`] finds the JSON
//! object in a response; the `*_from_json` functions map that untyped object
//! onto a typed record, applying the documented default for every field that
//! is missing or has the wrong shape. Nothing here validates strictly.

use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::types::records::{CompanyBackground, InterviewProcess, PreparationGuide, UNKNOWN};

type Object = Map<String, Value>;

const FENCE: &str = "```";

/// The part of a response that should hold JSON.
///
/// With a fenced code block, returns the content between the first opening
/// fence and the last closing fence, minus a language tag such as `json`.
/// Otherwise returns the whole trimmed text.
pub fn extract_json_block(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(open) = trimmed.find(FENCE) else {
        return trimmed;
    };

    let after_open = &trimmed[open + FENCE.len()..];
    let inner = match after_open.rfind(FENCE) {
        Some(close) => &after_open[..close],
        None => after_open,
    };

    strip_language_tag(inner).trim()
}

/// Drop an info string like `json` directly after an opening fence, also
/// when the payload follows it without a line break.
fn strip_language_tag(block: &str) -> &str {
    let tag_len = block
        .find(|c: char| !c.is_ascii_alphanumeric() && c != '_' && c != '-')
        .unwrap_or(block.len());

    if tag_len == 0 {
        return block;
    }

    match block[tag_len..].chars().next() {
        Some(c) if c.is_whitespace() || c == '{' || c == '[' => &block[tag_len..],
        _ => block,
    }
}

/// Parse a response into a JSON object.
pub fn parse_object(text: &str) -> Result<Object, ParseError> {
    let block = extract_json_block(text);
    if block.is_empty() {
        return Err(ParseError::NoJson);
    }

    match serde_json::from_str::<Value>(block)? {
        Value::Object(map) => Ok(map),
        other => Err(ParseError::NotAnObject(type_name(&other))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Truthiness of an arbitrary JSON value.
///
/// Strings are true unless empty or one of `false`, `no`, `0`
/// (case-insensitive); `null` is false. This is stricter than plain
/// non-empty-string truthiness: models answer flags like
/// `"has_coding_challenge": "no"`, which must not read as true.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => {
            let s = s.trim();
            !(s.is_empty()
                || s.eq_ignore_ascii_case("false")
                || s.eq_ignore_ascii_case("no")
                || s == "0")
        }
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Text of a scalar value; `None` for null, blanks and containers.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A text field. Lists of strings are joined with `", "`; anything else
/// unusable gives `default`.
pub fn string_field(obj: &Object, key: &str, default: &str) -> String {
    let text = match obj.get(key) {
        Some(Value::Array(items)) => {
            let parts: Vec<String> = items.iter().filter_map(scalar_text).collect();
            Some(parts.join(", ")).filter(|s| !s.is_empty())
        }
        Some(value) => scalar_text(value),
        None => None,
    };
    text.unwrap_or_else(|| default.to_string())
}

/// A list field. Non-list values give an empty list; blank and null items
/// are dropped.
pub fn list_field(obj: &Object, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        _ => Vec::new(),
    }
}

/// A boolean field, coerced by [`truthy`]; absent is `false`.
pub fn bool_field(obj: &Object, key: &str) -> bool {
    obj.get(key).map(truthy).unwrap_or(false)
}

/// A list field that may also be given as a single string.
fn string_or_list_field(obj: &Object, key: &str) -> Vec<String> {
    match obj.get(key) {
        Some(Value::Array(_)) => list_field(obj, key),
        Some(value) => scalar_text(value).into_iter().collect(),
        None => Vec::new(),
    }
}

/// A nested object, or an empty one when missing or wrong-shaped.
fn object_field<'a>(obj: &'a Object, key: &str) -> &'a Object {
    static EMPTY: std::sync::OnceLock<Object> = std::sync::OnceLock::new();
    match obj.get(key) {
        Some(Value::Object(inner)) => inner,
        _ => EMPTY.get_or_init(Object::new),
    }
}

pub fn background_from_json(obj: &Object) -> CompanyBackground {
    CompanyBackground {
        company_size: string_field(obj, "company_size", UNKNOWN),
        industry: string_field(obj, "industry", UNKNOWN),
        company_culture: string_field(obj, "company_culture", UNKNOWN),
        values: list_field(obj, "values").into_iter().collect(),
        recent_news: list_field(obj, "recent_news"),
    }
}

pub fn process_from_json(obj: &Object) -> InterviewProcess {
    let mut typical_stages = list_field(obj, "typical_stages");
    if typical_stages.is_empty() {
        typical_stages.push(UNKNOWN.to_string());
    }

    InterviewProcess {
        typical_stages,
        duration: string_field(obj, "duration", UNKNOWN),
        common_questions: list_field(obj, "common_questions"),
        technical_assessment: bool_field(obj, "technical_assessment"),
        system_design: bool_field(obj, "system_design"),
        behavioral_focus: bool_field(obj, "behavioral_focus"),
        coding_challenges: bool_field(obj, "coding_challenges"),
        take_home_projects: bool_field(obj, "take_home_projects"),
    }
}

/// Map the guide object. `last_updated` and `sources` are left for the
/// caller to fill.
pub fn guide_from_json(obj: &Object) -> PreparationGuide {
    let timeline = object_field(obj, "timeline");
    let technical = object_field(obj, "technical_preparation");
    let behavioral = object_field(obj, "behavioral_preparation");

    let preparation_timeline = ["1_week_before", "3_days_before", "day_before"]
        .iter()
        .flat_map(|bucket| list_field(timeline, bucket))
        .collect();

    let mut additional_resources = list_field(technical, "practice_resources");
    additional_resources.extend(list_field(obj, "additional_tips"));

    PreparationGuide {
        overview: string_field(obj, "overview", ""),
        preparation_timeline,
        technical_preparation: list_field(technical, "topics_to_study"),
        behavioral_preparation: list_field(behavioral, "common_questions"),
        company_specific_prep: string_or_list_field(behavioral, "company_specific_tips"),
        additional_resources,
        ..Default::default()
    }
}
