#[cfg(test)]
#[path = "julep_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Reasoner;
use crate::domain::models::ReasonerPrompt;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CreateAgentRequest {
    name: String,
    model: String,
    about: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TaskPromptMessage {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TaskStep {
    prompt: Vec<TaskPromptMessage>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CreateTaskRequest {
    name: String,
    description: String,
    main: Vec<TaskStep>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CreatedResource {
    id: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ExecutionOutput {
    choices: Vec<Choice>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Execution {
    status: String,
    #[serde(default)]
    output: Option<ExecutionOutput>,
    #[serde(default)]
    error: Option<String>,
}

/// The agent/task execution reasoning service. Every completion creates an
/// agent and task, starts an execution, and polls it at a fixed interval.
/// The poll is bounded; exhausting it is an explicit timeout error rather
/// than an open-ended wait.
pub struct Julep {
    url: String,
    token: String,
    model: String,
    poll_interval: String,
    poll_attempts: String,
}

impl Default for Julep {
    fn default() -> Julep {
        return Julep {
            url: Config::get(ConfigKey::JulepURL),
            token: Config::get(ConfigKey::JulepToken),
            model: Config::get(ConfigKey::AgentModel),
            poll_interval: Config::get(ConfigKey::PollInterval),
            poll_attempts: Config::get(ConfigKey::PollAttempts),
        };
    }
}

impl Julep {
    async fn create_agent(&self, client: &reqwest::Client) -> Result<String> {
        let req = CreateAgentRequest {
            name: "Mock Interviewer".to_string(),
            model: self.model.to_string(),
            about: "Acts like a software interview panelist giving feedback on code and thought process.".to_string(),
        };

        let res = client
            .post(format!("{url}/v1/agents", url = self.url))
            .bearer_auth(&self.token)
            .json(&req)
            .send()
            .await?;
        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "Failed to create agent");
            bail!(format!(
                "Failed to create agent, {}",
                res.status().as_u16()
            ));
        }

        let agent = res.json::<CreatedResource>().await?;
        return Ok(agent.id);
    }

    async fn create_task(
        &self,
        client: &reqwest::Client,
        agent_id: &str,
        prompt: &ReasonerPrompt,
    ) -> Result<String> {
        let mut user_content = prompt.input.to_string();
        if !prompt.history.is_empty() {
            user_content = format!(
                "{input}\n\nChat History:\n{history}",
                input = prompt.input,
                history = prompt.history
            );
        }

        let req = CreateTaskRequest {
            name: "Mock Interviewer".to_string(),
            description: "Review the candidate's progress and respond like a real interviewer."
                .to_string(),
            main: vec![TaskStep {
                prompt: vec![
                    TaskPromptMessage {
                        role: "system".to_string(),
                        content: prompt.context.to_string(),
                    },
                    TaskPromptMessage {
                        role: "user".to_string(),
                        content: user_content,
                    },
                ],
            }],
        };

        let res = client
            .post(format!(
                "{url}/v1/agents/{agent_id}/tasks",
                url = self.url
            ))
            .bearer_auth(&self.token)
            .json(&req)
            .send()
            .await?;
        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "Failed to create task");
            bail!(format!("Failed to create task, {}", res.status().as_u16()));
        }

        let task = res.json::<CreatedResource>().await?;
        return Ok(task.id);
    }

    async fn create_execution(&self, client: &reqwest::Client, task_id: &str) -> Result<String> {
        let res = client
            .post(format!(
                "{url}/v1/tasks/{task_id}/executions",
                url = self.url
            ))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "input": {} }))
            .send()
            .await?;
        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "Failed to create execution");
            bail!(format!(
                "Failed to create execution, {}",
                res.status().as_u16()
            ));
        }

        let execution = res.json::<CreatedResource>().await?;
        return Ok(execution.id);
    }
}

#[async_trait]
impl Reasoner for Julep {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Julep URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Julep token is not defined");
        }

        let res = reqwest::Client::new()
            .get(format!("{url}/v1/agents", url = self.url))
            .bearer_auth(&self.token)
            .timeout(Duration::from_millis(
                Config::get(ConfigKey::HealthCheckTimeout)
                    .parse::<u64>()
                    .unwrap_or(1000),
            ))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Julep is not reachable");
            bail!("Julep is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Julep health check failed");
            bail!("Julep health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn complete(&self, prompt: ReasonerPrompt) -> Result<String> {
        let interval = Duration::from_millis(self.poll_interval.parse::<u64>()?);
        let attempts = self.poll_attempts.parse::<u64>()?;

        let client = reqwest::Client::new();
        let agent_id = self.create_agent(&client).await?;
        let task_id = self.create_task(&client, &agent_id, &prompt).await?;
        let execution_id = self.create_execution(&client, &task_id).await?;

        for _ in 0..attempts {
            let res = client
                .get(format!(
                    "{url}/v1/executions/{execution_id}",
                    url = self.url
                ))
                .bearer_auth(&self.token)
                .send()
                .await?;
            if !res.status().is_success() {
                tracing::error!(status = res.status().as_u16(), "Failed to poll execution");
                bail!(format!(
                    "Failed to poll execution, {}",
                    res.status().as_u16()
                ));
            }

            let execution = res.json::<Execution>().await?;
            match execution.status.as_str() {
                "succeeded" => {
                    let choices = execution
                        .output
                        .map(|output| return output.choices)
                        .unwrap_or_default();
                    if choices.is_empty() {
                        bail!("Execution succeeded without output");
                    }
                    return Ok(choices[0].message.content.to_string());
                }
                "failed" => {
                    bail!(format!(
                        "Execution failed: {error}",
                        error = execution.error.unwrap_or_else(|| {
                            return "unknown error".to_string();
                        })
                    ));
                }
                _ => {
                    tokio::time::sleep(interval).await;
                }
            }
        }

        bail!("Execution timed out.")
    }
}
