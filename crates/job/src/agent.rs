//! Collaborator capabilities a [`Job`](crate::Job) depends on.
//!
//! The job never owns an agent or a scraper. It holds shared references
//! and talks to the agent through two calls only: applying setup and
//! reading the topology. The scraper is carried but never called.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use harvest_core::CoreError;

use crate::descriptor::{TaskDescriptor, TaskGroup};

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Owner of the full task topology and of environment setup.
pub trait Agent: Send + Sync {
    /// Every task the agent knows about, grouped and ordered by the agent.
    ///
    /// Must return the same groups for the duration of one plan build.
    fn execution_topology(&self) -> &[TaskGroup];

    /// Apply the agent's environment setup. Called once per job run,
    /// before the plan is derived.
    fn apply_setup(&self);
}

/// Opaque scraper reference passed through a job.
pub trait Scraper: Send + Sync {}

/// Scraper for callers that have nothing to pass through.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullScraper;

impl Scraper for NullScraper {}

// ---------------------------------------------------------------------------
// StaticAgent
// ---------------------------------------------------------------------------

/// Agent backed by a fixed, in-memory topology.
///
/// Setup has no environment to touch; each application is counted and
/// logged so callers can observe it.
#[derive(Debug, Default)]
pub struct StaticAgent {
    topology: Vec<TaskGroup>,
    setup_count: AtomicUsize,
}

impl StaticAgent {
    pub fn new(topology: Vec<TaskGroup>) -> Self {
        Self {
            topology,
            setup_count: AtomicUsize::new(0),
        }
    }

    /// Parse a topology document: an array of groups, each an array of
    /// descriptor objects carrying at least `taskId`.
    ///
    /// ```json
    /// [[{"taskId": "login"}], [{"taskId": "articles"}, {"taskId": "comments"}]]
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let groups: Vec<Vec<TaskDescriptor>> =
            serde_json::from_str(json).map_err(|e| CoreError::Topology(e.to_string()))?;

        let topology: Vec<TaskGroup> = groups
            .into_iter()
            .map(|group| group.into_iter().map(Arc::new).collect())
            .collect();

        Ok(Self::new(topology))
    }

    /// How many times setup has been applied.
    pub fn setup_count(&self) -> usize {
        self.setup_count.load(Ordering::SeqCst)
    }
}

impl Agent for StaticAgent {
    fn execution_topology(&self) -> &[TaskGroup] {
        &self.topology
    }

    fn apply_setup(&self) {
        let applied = self.setup_count.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(
            group_count = self.topology.len(),
            applied,
            "Static agent setup applied",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn from_json_str_keeps_group_and_descriptor_order() {
        let agent = StaticAgent::from_json_str(
            r#"[[{"taskId": "a"}, {"taskId": "b"}], [{"taskId": "c", "stage": 2}]]"#,
        )
        .unwrap();

        let topology = agent.execution_topology();
        assert_eq!(topology.len(), 2);
        assert_eq!(topology[0][0].task_id, "a");
        assert_eq!(topology[0][1].task_id, "b");
        assert_eq!(topology[1][0].attributes["stage"], 2);
    }

    #[test]
    fn from_json_str_accepts_empty_groups() {
        let agent = StaticAgent::from_json_str("[[], []]").unwrap();
        assert_eq!(agent.execution_topology().len(), 2);
    }

    #[test]
    fn from_json_str_rejects_flat_array() {
        let result = StaticAgent::from_json_str(r#"[{"taskId": "a"}]"#);
        assert_matches!(result, Err(CoreError::Topology(_)));
    }

    #[test]
    fn from_json_str_rejects_descriptor_without_task_id() {
        let result = StaticAgent::from_json_str(r#"[[{"name": "a"}]]"#);
        assert_matches!(result, Err(CoreError::Topology(_)));
    }

    #[test]
    fn setup_applications_are_counted() {
        let agent = StaticAgent::default();
        assert_eq!(agent.setup_count(), 0);
        agent.apply_setup();
        agent.apply_setup();
        assert_eq!(agent.setup_count(), 2);
    }
}
