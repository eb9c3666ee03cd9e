#[cfg(test)]
#[path = "gemini_test.rs"]
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
struct ContentPart {
    text: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    parts: Vec<ContentPart>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionRequest {
    contents: Vec<Content>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// The direct prompt-completion reasoning service: one `generateContent`
/// call per prompt, no streaming, no server-side conversation state.
pub struct Gemini {
    url: String,
    token: String,
    model: String,
    timeout: String,
}

impl Default for Gemini {
    fn default() -> Gemini {
        return Gemini {
            url: Config::get(ConfigKey::GeminiURL),
            token: Config::get(ConfigKey::GeminiToken),
            model: Config::get(ConfigKey::Model),
            timeout: Config::get(ConfigKey::HealthCheckTimeout),
        };
    }
}

#[async_trait]
impl Reasoner for Gemini {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Gemini URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Gemini token is not defined");
        }

        let url = format!(
            "{url}/v1beta/{model}?key={key}",
            url = self.url,
            model = self.model,
            key = self.token
        );

        let res = reqwest::Client::new()
            .get(&url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Gemini is not reachable");
            bail!("Gemini is not reachable");
        }

        let status = res.unwrap().status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Gemini health check failed");
            bail!("Gemini health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn complete(&self, prompt: ReasonerPrompt) -> Result<String> {
        let req = CompletionRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![ContentPart {
                    text: prompt.flatten(),
                }],
            }],
        };

        let res = reqwest::Client::new()
            .post(format!(
                "{url}/v1beta/{model}:generateContent?key={key}",
                url = self.url,
                model = self.model,
                key = self.token,
            ))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make completion request to Gemini"
            );
            bail!(format!(
                "Failed to make completion request to Gemini, {}",
                res.status().as_u16()
            ));
        }

        let ores = res.json::<GenerateContentResponse>().await?;
        if ores.candidates.is_empty() {
            bail!("No response from the model.");
        }

        let text = ores.candidates[0]
            .content
            .parts
            .iter()
            .map(|part| {
                return part.text.to_string();
            })
            .collect::<Vec<String>>()
            .join("");

        return Ok(text);
    }
}
