use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Treat an explicit `null` the same as a missing field
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Custom deserializer for character IDs that accepts strings or integers
pub fn deserialize_character_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let id = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(Error::custom("character id must be a string or number")),
    };

    if id.is_empty() {
        return Err(Error::custom("character id cannot be empty"));
    }

    Ok(id)
}

/// Custom deserializer for tags that accepts a list or a comma-separated string
pub fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let raw: Vec<String> = match value {
        Value::Null => Vec::new(),
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(Error::custom(format!("tag must be a string, got {}", other))),
            })
            .collect::<Result<_, _>>()?,
        _ => return Err(Error::custom("tags must be a list or a comma-separated string")),
    };

    Ok(raw.into_iter().map(|tag| tag.trim().to_string()).filter(|tag| !tag.is_empty()).collect())
}
