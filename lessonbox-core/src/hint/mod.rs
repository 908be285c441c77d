//! Hints for a lesson, generated by an external text-generation service.
//!
//! [`HintService`] is what callers use. It is disabled when no API key is
//! configured and reports that as [`HintError::NotConfigured`] instead of
//! failing at startup. There is no retry and no caching; every request goes
//! to the provider.

pub mod openai;

pub use openai::OpenAIHintProvider;

use async_trait::async_trait;
use secrecy::SecretString;
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::{config::HintConfig, lesson::Lesson};

#[derive(Error, Debug)]
pub enum HintError {
    #[error("Hints are not configured: set {0} to enable them")]
    NotConfigured(String),

    #[error("Hint service error: {0}")]
    Service(String),

    #[error("Hint service did not answer within {} ms", .0.as_millis())]
    Timeout(Duration),
}

pub type HintResult<T> = Result<T, HintError>;

/// A text-generation backend
#[mockall::automock]
#[async_trait]
pub trait HintProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> HintResult<String>;
}

#[derive(Clone)]
pub struct HintService {
    provider: Option<Arc<dyn HintProvider>>,
    timeout: Duration,
    api_key_env: String,
}

impl HintService {
    /// Build the service from config, reading the API key from the environment
    pub fn from_config(config: &HintConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(|key| SecretString::new(Box::from(key)));
        Self::from_config_with_key(config, api_key)
    }

    pub fn from_config_with_key(config: &HintConfig, api_key: Option<SecretString>) -> Self {
        match api_key {
            Some(key) => {
                info!("Hints enabled (model {})", config.model);
                let provider = OpenAIHintProvider::new(config, &key);
                Self::with_provider(Arc::new(provider), config.timeout)
            }
            None => {
                info!("Hints disabled: {} is not set", config.api_key_env);
                Self::disabled(config.api_key_env.clone())
            }
        }
    }

    pub fn with_provider(provider: Arc<dyn HintProvider>, timeout: Duration) -> Self {
        Self {
            provider: Some(provider),
            timeout,
            api_key_env: HintConfig::default().api_key_env,
        }
    }

    pub fn disabled(api_key_env: impl Into<String>) -> Self {
        Self {
            provider: None,
            timeout: HintConfig::default().timeout,
            api_key_env: api_key_env.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    #[tracing::instrument(skip(self, lesson, code), fields(lesson = %lesson.id))]
    pub async fn get_hint(
        &self,
        lesson: &Lesson,
        attempts: u32,
        code: Option<&str>,
    ) -> HintResult<String> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| HintError::NotConfigured(self.api_key_env.clone()))?;

        let prompt = build_prompt(lesson, attempts, code);
        debug!("hint prompt: {}", prompt);

        let hint = tokio::time::timeout(self.timeout, provider.complete(&prompt))
            .await
            .map_err(|_| HintError::Timeout(self.timeout))?
            .inspect_err(|e| error!("Hint request failed: {}", e))?;

        Ok(hint.trim().to_string())
    }
}

/// The prompt gets more direct as the learner's attempt count grows, but
/// never asks for a full solution.
pub fn build_prompt(lesson: &Lesson, attempts: u32, code: Option<&str>) -> String {
    let guidance = match attempts {
        0 | 1 => "Give a gentle nudge in one or two sentences. Do not mention specific code.",
        2 | 3 => {
            "Point out the concept or likely mistake the learner should look at, in a few sentences."
        }
        _ => {
            "Describe the concrete next step. You may include a short snippet of at most three lines."
        }
    };

    let mut prompt = format!(
        "You are a patient Python tutor. A learner is working on the lesson \"{}\".\n\n\
         Problem:\n{}\n\n\
         The learner has made {} attempt(s). {} Never give the complete solution.",
        lesson.title, lesson.problem, attempts, guidance
    );

    if let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) {
        prompt.push_str("\n\nTheir current code:\n```python\n");
        prompt.push_str(code);
        prompt.push_str("\n```");
    }

    prompt
}
