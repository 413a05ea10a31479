/// Identifier of a task as registered with an agent.
pub type TaskId = String;

/// Key/value store handed to tasks. Values are arbitrary JSON.
pub type ParamMap = serde_json::Map<String, serde_json::Value>;
