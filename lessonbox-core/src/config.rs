use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path, path::PathBuf, time::Duration};

use crate::{Error, InternalResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_lessons_dir")]
    pub lessons_dir: PathBuf,

    #[serde(default)]
    pub evaluator: EvaluatorConfig,

    #[serde(default)]
    pub hint: HintConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lessons_dir: default_lessons_dir(),
            evaluator: EvaluatorConfig::default(),
            hint: HintConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Interpreter used to run submissions
    #[serde(default = "default_python")]
    pub python: String,

    #[serde(
        rename = "timeout_ms",
        default = "default_evaluation_timeout",
        with = "duration_ms"
    )]
    pub timeout: Duration,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            python: default_python(),
            timeout: default_evaluation_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(
        rename = "timeout_ms",
        default = "default_hint_timeout",
        with = "duration_ms"
    )]
    pub timeout: Duration,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Override for OpenAI-compatible endpoints
    #[serde(default)]
    pub api_base: Option<String>,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout: default_hint_timeout(),
            api_key_env: default_api_key_env(),
            api_base: None,
        }
    }
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> InternalResult<T> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::Config(format!(
            "Failed to open config file {}: {}",
            path.display(),
            e
        ))
    })?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> InternalResult<T> {
    let config = serde_json::from_str(s)
        .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

fn default_lessons_dir() -> PathBuf {
    PathBuf::from("lessons")
}
fn default_python() -> String {
    "python3".to_string()
}
fn default_evaluation_timeout() -> Duration {
    Duration::from_secs(10)
}
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    400
}
fn default_hint_timeout() -> Duration {
    Duration::from_secs(30)
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

pub mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
