//! Task descriptors and the group/plan shapes built from them.
//!
//! Descriptors are shared through `Arc` so a derived plan points at the
//! exact records the agent owns rather than copies of them.

use std::sync::Arc;

use harvest_core::types::TaskId;
use serde::{Deserialize, Serialize};

/// One task as registered with an agent.
///
/// Only `task_id` is interpreted by a job. Everything else the agent
/// attaches is carried through untouched in `attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDescriptor {
    pub task_id: TaskId,

    #[serde(flatten)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl TaskDescriptor {
    /// Create a descriptor with no extra attributes.
    pub fn new(task_id: impl Into<TaskId>) -> Self {
        Self {
            task_id: task_id.into(),
            attributes: serde_json::Map::new(),
        }
    }

    /// Attach an opaque attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

/// An ordered group of descriptors. Group membership and any execution
/// semantics it implies belong to the agent.
pub type TaskGroup = Vec<Arc<TaskDescriptor>>;

/// Ordered sequence of groups. Used for both the agent's topology and a
/// job's derived plan.
pub type ExecutionPlan = Vec<TaskGroup>;
