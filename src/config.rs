use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{0} must be a positive integer")]
    NotPositive(&'static str),
    #[error("interval ({interval}s) must be less than duration ({duration}s)")]
    IntervalNotBelowDuration { interval: u64, duration: u64 },
}

/// Polling parameters. Every field can be set from a YAML file and
/// overridden on the command line.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SamplingConfig {
    pub duration_s: u64,
    pub interval_s: u64,
    pub endpoint: String,
    pub request_timeout_s: u64,
    pub output_dir: PathBuf,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            duration_s: 15,
            interval_s: 5,
            endpoint: default_endpoint(),
            request_timeout_s: 10,
            output_dir: PathBuf::from("."),
        }
    }
}

fn default_endpoint() -> String {
    "http://api.open-notify.org/iss-now.json".to_string()
}

impl SamplingConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: SamplingConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.duration_s == 0 {
            return Err(ConfigError::NotPositive("duration"));
        }
        if self.interval_s == 0 {
            return Err(ConfigError::NotPositive("interval"));
        }
        if self.request_timeout_s == 0 {
            return Err(ConfigError::NotPositive("request timeout"));
        }
        if self.interval_s >= self.duration_s {
            return Err(ConfigError::IntervalNotBelowDuration {
                interval: self.interval_s,
                duration: self.duration_s,
            });
        }
        Ok(())
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_s)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_s)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_s)
    }
}
