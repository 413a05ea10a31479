use std::path::PathBuf;

/// Plan configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct PlanConfig {
    /// JSON file holding the agent topology.
    pub topology_path: PathBuf,
    /// Task ids to enqueue, in order.
    pub enqueue: Vec<String>,
    /// Run identifier (default: a fresh UUIDv7).
    pub job_uid: String,
    /// JSON object merged into the job's params, if set.
    pub job_params: Option<String>,
}

impl PlanConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var         | Default          |
    /// |-----------------|------------------|
    /// | `TOPOLOGY_PATH` | required         |
    /// | `ENQUEUE`       | empty            |
    /// | `JOB_UID`       | UUIDv7           |
    /// | `JOB_PARAMS`    | unset            |
    pub fn from_env() -> Result<Self, String> {
        let topology_path = std::env::var("TOPOLOGY_PATH")
            .map(PathBuf::from)
            .map_err(|_| "TOPOLOGY_PATH environment variable is required".to_string())?;

        let enqueue = std::env::var("ENQUEUE")
            .map(|v| parse_task_list(&v))
            .unwrap_or_default();

        let job_uid = std::env::var("JOB_UID")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| uuid::Uuid::now_v7().to_string());

        let job_params = std::env::var("JOB_PARAMS").ok().filter(|v| !v.is_empty());

        Ok(Self {
            topology_path,
            enqueue,
            job_uid,
            job_params,
        })
    }
}

/// Split a comma-separated task list. Blank entries are skipped so a
/// trailing comma does not enqueue an empty id.
fn parse_task_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
