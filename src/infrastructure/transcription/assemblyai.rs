#[cfg(test)]
#[path = "assemblyai_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct UploadResponse {
    upload_url: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CreateTranscriptRequest {
    audio_url: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Transcript {
    id: String,
    status: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Relay to the speech-to-text service: upload the raw audio, start a
/// transcript job, poll until it lands. The poll is bounded the same way the
/// reasoning-service execution poll is.
pub struct AssemblyAi {
    url: String,
    token: String,
    poll_interval: String,
    poll_attempts: String,
}

impl Default for AssemblyAi {
    fn default() -> AssemblyAi {
        return AssemblyAi {
            url: Config::get(ConfigKey::AssemblyAiURL),
            token: Config::get(ConfigKey::AssemblyAiToken),
            poll_interval: Config::get(ConfigKey::PollInterval),
            poll_attempts: Config::get(ConfigKey::PollAttempts),
        };
    }
}

impl AssemblyAi {
    pub async fn transcribe(&self, audio: Vec<u8>) -> Result<String> {
        let interval = Duration::from_millis(self.poll_interval.parse::<u64>()?);
        let attempts = self.poll_attempts.parse::<u64>()?;
        let client = reqwest::Client::new();

        let res = client
            .post(format!("{url}/v2/upload", url = self.url))
            .header("authorization", &self.token)
            .body(audio)
            .send()
            .await?;
        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "Failed to upload audio");
            bail!("Failed to transcribe audio");
        }
        let upload = res.json::<UploadResponse>().await?;

        let res = client
            .post(format!("{url}/v2/transcript", url = self.url))
            .header("authorization", &self.token)
            .json(&CreateTranscriptRequest {
                audio_url: upload.upload_url,
            })
            .send()
            .await?;
        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "Failed to create transcript");
            bail!("Failed to transcribe audio");
        }
        let created = res.json::<Transcript>().await?;

        for _ in 0..attempts {
            let transcript = client
                .get(format!(
                    "{url}/v2/transcript/{id}",
                    url = self.url,
                    id = created.id
                ))
                .header("authorization", &self.token)
                .send()
                .await?
                .json::<Transcript>()
                .await?;

            match transcript.status.as_str() {
                "completed" => {
                    return Ok(transcript.text.unwrap_or_default());
                }
                "error" => {
                    bail!(format!(
                        "Transcription failed: {error}",
                        error = transcript.error.unwrap_or_else(|| {
                            return "unknown error".to_string();
                        })
                    ));
                }
                _ => {
                    tokio::time::sleep(interval).await;
                }
            }
        }

        bail!("Transcription timed out.")
    }
}
