use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    OK,
    TLE,
    MLE,
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ExecutionStatus::OK => "OK",
            ExecutionStatus::TLE => "TLE",
            ExecutionStatus::MLE => "MLE",
        };
        return write!(f, "{label}");
    }
}

/// The run (or compile) stage report from the execution sandbox. Fields
/// default generously because the service omits whatever a stage did not
/// produce.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageReport {
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub signal: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub cpu_time: f64,
    #[serde(default)]
    pub wall_time: f64,
    #[serde(default)]
    pub memory: u64,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResponse {
    pub language: String,
    pub version: String,
    pub run: StageReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compile: Option<StageReport>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runtime {
    pub language: String,
    pub version: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
}
