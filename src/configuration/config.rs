#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::Result;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::IntoEnumIterator;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Eq, PartialEq, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    AgentModel,
    AssemblyAiToken,
    AssemblyAiURL,
    DataDir,
    GeminiToken,
    GeminiURL,
    HealthCheckTimeout,
    JulepToken,
    JulepURL,
    MemoryLimit,
    Model,
    PistonURL,
    PollAttempts,
    PollInterval,
    Reasoner,
    TimeLimit,
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::DataDir {
            let data_dir = dirs::data_dir().unwrap().join("crackit");
            return data_dir.to_string_lossy().to_string();
        }

        let res = match key {
            ConfigKey::AgentModel => "gpt-4o",
            ConfigKey::AssemblyAiToken => "",
            ConfigKey::AssemblyAiURL => "https://api.assemblyai.com",
            ConfigKey::GeminiToken => "",
            ConfigKey::GeminiURL => "https://generativelanguage.googleapis.com",
            ConfigKey::HealthCheckTimeout => "1000",
            ConfigKey::JulepToken => "",
            ConfigKey::JulepURL => "https://api.julep.ai",
            ConfigKey::MemoryLimit => "524288000",
            ConfigKey::Model => "models/gemini-2.0-flash",
            ConfigKey::PistonURL => "https://emkc.org/api/v2/piston",
            ConfigKey::PollAttempts => "120",
            ConfigKey::PollInterval => "1000",
            ConfigKey::Reasoner => "gemini",
            ConfigKey::TimeLimit => "1000",

            // Handled above.
            ConfigKey::DataDir => "",
        };

        return res.to_string();
    }

    fn env_var(key: ConfigKey) -> String {
        let suffix = key.to_string().replace('-', "_").to_uppercase();
        return format!("CRACKIT_{suffix}");
    }

    pub async fn load(config_file: Option<&str>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        if let Some(config_file) = config_file {
            let config_path = path::PathBuf::from(config_file);
            if config_path.exists() {
                let toml_str = fs::read_to_string(config_path).await?;
                let doc = toml_str.parse::<toml_edit::Document>()?;

                for key in ConfigKey::iter() {
                    if let Some(val) = doc.get(&key.to_string()) {
                        if let Some(val_int) = val.as_integer() {
                            Config::set(key, &val_int.to_string());
                        } else if let Some(val_str) = val.as_str() {
                            if val_str.is_empty() {
                                continue;
                            }
                            Config::set(key, val_str);
                        }
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            if let Ok(val) = env::var(Config::env_var(key)) {
                if val.is_empty() {
                    continue;
                }
                Config::set(key, &val);
            }
        }

        tracing::debug!(
            reasoner = Config::get(ConfigKey::Reasoner),
            model = Config::get(ConfigKey::Model),
            data_dir = Config::get(ConfigKey::DataDir),
            piston_url = Config::get(ConfigKey::PistonURL),
            "config"
        );

        return Ok(());
    }
}
