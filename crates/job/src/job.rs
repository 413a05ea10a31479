//! The run-scoped [`Job`].
//!
//! A job is built once per run, configured through [`Job::params`] and
//! [`Job::enqueue`], then started with [`Job::run`], which applies the
//! agent's setup and derives the job's execution plan.

use std::sync::Arc;

use harvest_core::types::{ParamMap, TaskId};
use harvest_core::validation::{require_params_object, validate_task_id, validate_uid};
use harvest_core::CoreError;

use crate::agent::{Agent, Scraper};
use crate::descriptor::{ExecutionPlan, TaskDescriptor};
use crate::plan;

pub struct Job {
    uid: Option<String>,
    agent: Arc<dyn Agent>,
    scraper: Arc<dyn Scraper>,
    params: ParamMap,
    enqueued_tasks: Vec<TaskId>,
    /// `None` until the first build. Each build replaces it.
    execution_plan: Option<ExecutionPlan>,
    /// Reserved for a runtime queue built from the plan by a downstream
    /// executor. Nothing in this crate fills it.
    execution_queue: Vec<Arc<TaskDescriptor>>,
}

impl Job {
    /// Create a job bound to `agent` and `scraper`.
    ///
    /// A `None` uid leaves the job without an identifier. A `Some` uid
    /// must be non-empty.
    pub fn new(
        uid: Option<&str>,
        agent: Arc<dyn Agent>,
        scraper: Arc<dyn Scraper>,
    ) -> Result<Self, CoreError> {
        let mut job = Self {
            uid: None,
            agent,
            scraper,
            params: ParamMap::new(),
            enqueued_tasks: Vec::new(),
            execution_plan: None,
            execution_queue: Vec::new(),
        };

        if let Some(uid) = uid {
            job.set_uid(uid)?;
        }

        Ok(job)
    }

    fn set_uid(&mut self, uid: &str) -> Result<(), CoreError> {
        validate_uid(uid)?;
        self.uid = Some(uid.to_string());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Merge a JSON object into the parameters handed to tasks.
    ///
    /// The merge is shallow: colliding keys take the new value. Arrays and
    /// scalars are rejected.
    pub fn params(&mut self, params: serde_json::Value) -> Result<&mut Self, CoreError> {
        let incoming = require_params_object(params)?;

        tracing::debug!(
            job_uid = self.uid.as_deref(),
            keys = incoming.len(),
            "Merging job params",
        );

        self.params.extend(incoming);
        Ok(self)
    }

    /// Append a task id to the ledger. Duplicates are kept.
    pub fn enqueue(&mut self, task_id: impl Into<TaskId>) -> Result<&mut Self, CoreError> {
        let task_id = task_id.into();
        validate_task_id(&task_id)?;

        tracing::debug!(
            job_uid = self.uid.as_deref(),
            task_id = %task_id,
            position = self.enqueued_tasks.len(),
            "Task enqueued",
        );

        self.enqueued_tasks.push(task_id);
        Ok(self)
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Apply the agent's setup, then derive the execution plan.
    pub fn run(&mut self) {
        tracing::info!(
            job_uid = self.uid.as_deref(),
            enqueued = self.enqueued_tasks.len(),
            "Starting job",
        );

        self.agent.apply_setup();
        self.build_execution_plan();
    }

    /// Recompute the plan from the agent's current topology and replace
    /// any previous plan.
    pub(crate) fn build_execution_plan(&mut self) {
        let topology = self.agent.execution_topology();
        let new_plan = plan::derive_execution_plan(topology, &self.enqueued_tasks);

        let unmatched = plan::unmatched_task_ids(topology, &self.enqueued_tasks);
        if !unmatched.is_empty() {
            tracing::debug!(
                job_uid = self.uid.as_deref(),
                ?unmatched,
                "Enqueued tasks not known to agent",
            );
        }

        tracing::info!(
            job_uid = self.uid.as_deref(),
            agent_groups = topology.len(),
            group_count = new_plan.len(),
            task_count = plan::task_count(&new_plan),
            "Execution plan built",
        );

        self.execution_plan = Some(new_plan);
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn agent(&self) -> &Arc<dyn Agent> {
        &self.agent
    }

    pub fn scraper(&self) -> &Arc<dyn Scraper> {
        &self.scraper
    }

    pub fn params_store(&self) -> &ParamMap {
        &self.params
    }

    pub fn enqueued_tasks(&self) -> &[TaskId] {
        &self.enqueued_tasks
    }

    /// The derived plan, or `None` if the job has not run.
    pub fn execution_plan(&self) -> Option<&ExecutionPlan> {
        self.execution_plan.as_ref()
    }

    /// Always empty here; see the field docs.
    pub fn execution_queue(&self) -> &[Arc<TaskDescriptor>] {
        &self.execution_queue
    }
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job")
            .field("uid", &self.uid)
            .field("params", &self.params)
            .field("enqueued_tasks", &self.enqueued_tasks)
            .field("execution_plan", &self.execution_plan)
            .finish_non_exhaustive()
    }
}
