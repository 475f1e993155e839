pub type JSONValue = serde_json::Value;
pub type JSONObject = serde_json::Map<String, serde_json::Value>;
