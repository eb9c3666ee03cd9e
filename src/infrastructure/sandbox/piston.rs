#[cfg(test)]
#[path = "piston_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ExecutionResponse;
use crate::domain::models::ExecutionStatus;
use crate::domain::models::Runtime;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ExecutionFile {
    name: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ExecutionRequest {
    language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    files: Vec<ExecutionFile>,
    stdin: String,
    args: Vec<String>,
    compile_timeout: u64,
    run_timeout: u64,
    compile_memory_limit: u64,
    run_memory_limit: u64,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: String,
}

/// Relay to the sandboxed code-execution service. One request per call, no
/// retry, no queueing; the service enforces roughly 5 requests per second on
/// its side.
pub struct Piston {
    url: String,
}

impl Default for Piston {
    fn default() -> Piston {
        return Piston {
            url: Config::get(ConfigKey::PistonURL),
        };
    }
}

impl Piston {
    pub fn new(url: &str) -> Piston {
        return Piston {
            url: url.to_string(),
        };
    }

    pub async fn runtimes(&self) -> Result<Vec<Runtime>> {
        let res = reqwest::Client::new()
            .get(format!("{url}/runtimes", url = self.url))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Failed to fetch runtimes");
            bail!("Failed to fetch available runtimes");
        }

        return Ok(res.unwrap().json::<Vec<Runtime>>().await?);
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn execute(
        &self,
        language: &str,
        content: &str,
        stdin: &str,
        args: &[String],
        time_limit: u64,
        memory_limit: u64,
        version: Option<&str>,
    ) -> Result<ExecutionResponse> {
        let req = ExecutionRequest {
            language: language.to_string(),
            version: version.map(|version| return version.to_string()),
            files: vec![ExecutionFile {
                name: "main".to_string(),
                content: content.to_string(),
            }],
            stdin: stdin.to_string(),
            args: args.to_vec(),
            compile_timeout: time_limit,
            run_timeout: time_limit,
            compile_memory_limit: memory_limit,
            run_memory_limit: memory_limit,
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/execute", url = self.url))
            .json(&req)
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Execution sandbox is not reachable");
            bail!("No response received from the execution sandbox");
        }

        let res = res.unwrap();
        let status = res.status().as_u16();
        if status == 429 {
            bail!("Rate limit exceeded. The execution sandbox is limited to 5 requests per second.");
        }
        if status >= 400 {
            let message = res
                .json::<ErrorResponse>()
                .await
                .map(|error| {
                    return error.message;
                })
                .unwrap_or_default();
            let message = if message.is_empty() {
                "Unknown error occurred".to_string()
            } else {
                message
            };

            if status == 400 {
                bail!(format!("Bad request: {message}"));
            }
            bail!(format!("Execution failed: {message}"));
        }

        return Ok(res.json::<ExecutionResponse>().await?);
    }

    pub fn is_time_limit(response: &ExecutionResponse, time_limit: u64) -> bool {
        return response.run.wall_time >= time_limit as f64
            || response.run.message.as_deref() == Some("Runtime limit exceeded")
            || response.run.status.as_deref() == Some("timeout");
    }

    pub fn is_memory_limit(response: &ExecutionResponse, memory_limit: u64) -> bool {
        return response.run.memory >= memory_limit
            || response.run.message.as_deref() == Some("Memory limit exceeded");
    }

    pub fn classify(
        response: &ExecutionResponse,
        time_limit: u64,
        memory_limit: u64,
    ) -> ExecutionStatus {
        if Piston::is_time_limit(response, time_limit) {
            return ExecutionStatus::TLE;
        }
        if Piston::is_memory_limit(response, memory_limit) {
            return ExecutionStatus::MLE;
        }

        return ExecutionStatus::OK;
    }
}
