//! Terminal output
//!
//! JSON mode prints response bodies pretty-printed and untouched. Text mode
//! prints one line per record.

use anyhow::Result;
use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::{Map, Value};

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summaries
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Identifier fields, in lookup order
const ID_KEYS: &[&str] = &["transaction_id", "message_id", "item_id", "user_id"];

/// Fields used as the record's headline
const LABEL_KEYS: &[&str] = &["title", "username", "content"];

/// Secondary fields appended as `key=value`
const DETAIL_KEYS: &[&str] = &[
    "status",
    "price",
    "condition",
    "email",
    "sender_id",
    "receiver_id",
    "sent_at",
];

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }
}

/// Print a response body in the requested format
pub fn render(value: &Value, format: OutputFormat, empty_message: &str) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => match value {
            Value::Null => Status::success(empty_message),
            Value::Array(records) if records.is_empty() => Status::info("No results"),
            Value::Array(records) => {
                for record in records {
                    println!("{}", summary(record));
                }
                println!();
                println!("  Total: {}", records.len().to_string().green());
            }
            other => println!("{}", summary(other)),
        },
    }
    Ok(())
}

/// One-line summary of a record
pub fn summary(record: &Value) -> String {
    let Value::Object(fields) = record else {
        return scalar(record);
    };

    let mut parts = Vec::new();
    if let Some((key, id)) = first_field(fields, ID_KEYS) {
        parts.push(format!("#{}", scalar(id)));
        // transactions and messages still name the item they refer to
        if key != "item_id" {
            if let Some(item) = fields.get("item_id") {
                parts.push(format!("item_id={}", scalar(item)));
            }
        }
    }
    if let Some((_, label)) = first_field(fields, LABEL_KEYS) {
        parts.push(scalar(label));
    }
    for key in DETAIL_KEYS {
        if let Some(value) = fields.get(*key).filter(|v| !v.is_null()) {
            parts.push(format!("{key}={}", scalar(value)));
        }
    }

    if parts.is_empty() {
        return Value::Object(fields.clone()).to_string();
    }
    parts.join("  ")
}

fn first_field<'a>(
    fields: &'a Map<String, Value>,
    keys: &[&'static str],
) -> Option<(&'static str, &'a Value)> {
    keys.iter()
        .find_map(|key| fields.get(*key).filter(|v| !v.is_null()).map(|v| (*key, v)))
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
