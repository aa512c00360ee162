use serde_json::Value;

use crate::models::RemoteRecord;
use crate::schema::ColumnSchema;

// Quote doubling plus backslash-escaped commas, matching the format the
// original extension produced. Not RFC 4180.
fn csv_token(text: &str) -> String {
    let escaped = text.replace('"', "\"\"").replace(',', "\\,");
    format!("\"{escaped}\"")
}

fn stringify(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "null".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(number)) => number.to_string(),
        // nested arrays/objects are flattened to their compact JSON text
        Some(nested) => nested.to_string(),
    }
}

/// Converts one scalar into a CSV-safe quoted token. Total over all inputs;
/// null and absent both yield `"null"`.
pub fn serialize_value(value: Option<&Value>) -> String {
    csv_token(&stringify(value))
}

/// Heading line: root keys verbatim, meta keys as their `metadata.` dot path.
pub fn header_row(schema: &ColumnSchema) -> String {
    let mut tokens = Vec::with_capacity(schema.width());
    tokens.extend(schema.root_keys.iter().map(|key| csv_token(key)));
    tokens.extend(
        schema
            .meta_keys
            .iter()
            .map(|key| csv_token(&format!("metadata.{key}"))),
    );
    tokens.join(",")
}

/// Projects one record against the fixed schema. Always yields exactly
/// `schema.width()` tokens regardless of which keys the record carries.
pub fn record_row(record: &RemoteRecord, schema: &ColumnSchema) -> String {
    let mut tokens = Vec::with_capacity(schema.width());
    for key in &schema.root_keys {
        tokens.push(serialize_value(record.get(key)));
    }
    let metadata = record.get("metadata").and_then(Value::as_object);
    for key in &schema.meta_keys {
        tokens.push(serialize_value(metadata.and_then(|fields| fields.get(key))));
    }
    tokens.join(",")
}
