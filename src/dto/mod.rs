use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

pub mod auth;
pub mod cart;
pub mod products;
pub mod users;

/// Accepts a JSON string, number or boolean and yields its text form.
pub fn text_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    optional_text_from_any(deserializer)?
        .ok_or_else(|| de::Error::custom("expected text, found null"))
}

pub fn optional_text_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(de::Error::custom(format!(
            "expected text, found {}",
            if other.is_array() { "array" } else { "object" }
        ))),
    }
}
