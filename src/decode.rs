use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;

/// Every list shape the backend is known to send.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListShape<T> {
    Bare(Vec<T>),
    Paginated { results: Vec<T> },
    Missions { missions: Vec<T> },
}

impl<T> ListShape<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items)
            | Self::Paginated { results: items }
            | Self::Missions { missions: items } => items,
        }
    }
}

/// Normalize a list response into a `Vec<T>`. Unrecognized shapes fail.
pub fn decode_list<T: DeserializeOwned>(endpoint: &str, body: Value) -> Result<Vec<T>, ApiError> {
    let shape = describe(&body);
    serde_json::from_value::<ListShape<T>>(body)
        .map(ListShape::into_items)
        .map_err(|_| ApiError::Decode {
            endpoint: endpoint.to_string(),
            reason: format!("expected a list, {{results: [...]}} or {{missions: [...]}}, got {shape}"),
        })
}

pub fn decode_one<T: DeserializeOwned>(endpoint: &str, body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|err| ApiError::Decode {
        endpoint: endpoint.to_string(),
        reason: err.to_string(),
    })
}

fn describe(body: &Value) -> String {
    match body {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(_) => "a string".to_string(),
        Value::Array(_) => "an array with malformed items".to_string(),
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("an object with keys [{}]", keys.join(", "))
        }
    }
}
