//! Execution plan derivation.
//!
//! Reduces an agent's topology to the tasks a job enqueued. Group order is
//! the agent's; order inside a group is the job's enqueue order.

use std::sync::Arc;

use crate::descriptor::{ExecutionPlan, TaskGroup};

/// Derive a job's plan from the agent topology and the enqueue ledger.
///
/// For every group, each enqueued id (in enqueue order) selects the first
/// descriptor in that group with a matching `task_id`. Consequences:
///
/// - ids that appear in no group are dropped silently;
/// - an id enqueued twice yields the same descriptor twice;
/// - a later descriptor sharing an id with an earlier one in the same
///   group is never selected;
/// - groups with no selected descriptor are left out of the plan.
///
/// Selected descriptors are the agent's own `Arc`s, cloned by reference.
pub fn derive_execution_plan(topology: &[TaskGroup], enqueued: &[String]) -> ExecutionPlan {
    let mut plan = ExecutionPlan::new();

    for (group_idx, group) in topology.iter().enumerate() {
        let group_task_ids: Vec<&str> = group.iter().map(|d| d.task_id.as_str()).collect();

        let selected: TaskGroup = enqueued
            .iter()
            .filter_map(|task_id| {
                group_task_ids
                    .iter()
                    .position(|id| *id == task_id.as_str())
                    .map(|idx| Arc::clone(&group[idx]))
            })
            .collect();

        if selected.is_empty() {
            tracing::trace!(group_idx, "No enqueued task in group, dropping it");
            continue;
        }

        plan.push(selected);
    }

    plan
}

/// Total number of descriptor slots across all groups, duplicates included.
pub fn task_count(plan: &[TaskGroup]) -> usize {
    plan.iter().map(Vec::len).sum()
}

/// Enqueued ids that matched no descriptor anywhere in the topology.
///
/// Order and duplicates follow the ledger.
pub fn unmatched_task_ids<'a>(topology: &[TaskGroup], enqueued: &'a [String]) -> Vec<&'a str> {
    enqueued
        .iter()
        .filter(|task_id| {
            !topology
                .iter()
                .flatten()
                .any(|d| d.task_id == task_id.as_str())
        })
        .map(String::as_str)
        .collect()
}
