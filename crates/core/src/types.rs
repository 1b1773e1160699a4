/// A candidate or normalized record: a JSON object keyed by camelCase field name.
pub type Record = serde_json::Map<String, serde_json::Value>;
