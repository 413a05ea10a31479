//! `harvest-job` -- run-scoped jobs over an agent's task topology.
//!
//! A [`Job`] records which tasks a caller wants, then derives an
//! [`ExecutionPlan`] by filtering the agent's grouped topology down to
//! those tasks. The agent keeps control of group order; the job controls
//! order inside each group.

pub mod agent;
pub mod descriptor;
pub mod job;
pub mod plan;

pub use agent::{Agent, NullScraper, Scraper, StaticAgent};
pub use descriptor::{ExecutionPlan, TaskDescriptor, TaskGroup};
pub use job::Job;
