//! `harvest-plan` -- build a job's execution plan from a topology file.
//!
//! Loads an agent topology from JSON, enqueues the requested tasks, runs
//! the job, and prints the derived plan as JSON on stdout.
//!
//! # Environment variables
//!
//! | Variable        | Required | Default | Description                                  |
//! |-----------------|----------|---------|----------------------------------------------|
//! | `TOPOLOGY_PATH` | yes      | --      | JSON file: array of groups of `{"taskId"}`   |
//! | `ENQUEUE`       | no       | empty   | Comma-separated task ids, in enqueue order   |
//! | `JOB_UID`       | no       | UUIDv7  | Run identifier                               |
//! | `JOB_PARAMS`    | no       | --      | JSON object merged into the job's params     |

use std::sync::Arc;

use harvest_core::CoreError;
use harvest_job::{Job, NullScraper, StaticAgent};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::PlanConfig;

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "harvest_cli=info,harvest_job=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = PlanConfig::from_env().unwrap_or_else(|msg| {
        tracing::error!("{msg}");
        std::process::exit(1);
    });

    tracing::info!(
        job_uid = %config.job_uid,
        topology_path = %config.topology_path.display(),
        enqueued = config.enqueue.len(),
        "Starting harvest-plan",
    );

    let raw = std::fs::read_to_string(&config.topology_path).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to read topology file");
        std::process::exit(1);
    });

    let job = build_job(&config, &raw).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build job");
        std::process::exit(1);
    });

    let plan = job.execution_plan().cloned().unwrap_or_default();
    match serde_json::to_string_pretty(&plan) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize execution plan");
            std::process::exit(1);
        }
    }
}

/// Construct and run a job from configuration and a topology document.
fn build_job(config: &PlanConfig, topology_json: &str) -> Result<Job, CoreError> {
    let agent = Arc::new(StaticAgent::from_json_str(topology_json)?);
    let mut job = Job::new(Some(config.job_uid.as_str()), agent, Arc::new(NullScraper))?;

    if let Some(raw) = &config.job_params {
        let params: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| CoreError::Validation(format!("JOB_PARAMS is not valid JSON: {e}")))?;
        job.params(params)?;
    }

    for task_id in &config.enqueue {
        job.enqueue(task_id.as_str())?;
    }

    job.run();
    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(enqueue: &[&str], job_params: Option<&str>) -> PlanConfig {
        PlanConfig {
            topology_path: PathBuf::from("unused.json"),
            enqueue: enqueue.iter().map(|s| s.to_string()).collect(),
            job_uid: "cli-test".to_string(),
            job_params: job_params.map(str::to_string),
        }
    }

    #[test]
    fn build_job_runs_and_builds_plan() {
        let job = build_job(
            &config(&["c", "a"], Some(r#"{"depth": 1}"#)),
            r#"[[{"taskId": "a"}, {"taskId": "b"}], [{"taskId": "c"}]]"#,
        )
        .unwrap();

        let plan = job.execution_plan().unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0][0].task_id, "a");
        assert_eq!(plan[1][0].task_id, "c");
        assert_eq!(job.params_store()["depth"], 1);
        assert_eq!(job.uid(), Some("cli-test"));
    }

    #[test]
    fn build_job_rejects_non_object_params() {
        let result = build_job(&config(&[], Some("[1, 2]")), "[]");
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn build_job_rejects_malformed_params() {
        let result = build_job(&config(&[], Some("{")), "[]");
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[test]
    fn build_job_rejects_malformed_topology() {
        let result = build_job(&config(&["a"], None), "not json");
        assert!(matches!(result, Err(CoreError::Topology(_))));
    }

    #[test]
    fn plan_serializes_with_task_id_key() {
        let job = build_job(&config(&["a"], None), r#"[[{"taskId": "a", "x": 1}]]"#).unwrap();
        let value = serde_json::to_value(job.execution_plan().unwrap()).unwrap();
        assert_eq!(value, serde_json::json!([[{"taskId": "a", "x": 1}]]));
    }
}
