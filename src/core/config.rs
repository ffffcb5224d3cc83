use std::env;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{error, info, warn};
use url::Url;

use super::ssm;
use crate::ai::prompt_builder::DEFAULT_INSTRUCTION_TEMPLATE;

pub const DEFAULT_ENDPOINT: &str = "https://api.cerebras.ai/v1/";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b";
pub const DEFAULT_DOCUMENTS_ROOT: &str = "researchers";
pub const DEFAULT_RECORD_PARAM_PREFIX: &str = "/pdf-summary/records/";
pub const DEFAULT_MAX_OUTPUT_WORDS: usize = 150;
pub const DEFAULT_MAX_INPUT_CHARS: usize = 8000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings for the outbound LLM call. Immutable once built.
#[derive(Clone)]
pub struct LlmRequestConfig {
    pub endpoint: Url,
    pub api_key: Option<String>,
    pub model: String,
    /// System instruction; `{max_words}` is replaced with `max_output_words`.
    pub instruction_template: String,
    pub max_output_words: usize,
    pub max_input_chars: usize,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl LlmRequestConfig {
    /// Config pointing at `endpoint` with every other field at its default.
    ///
    /// # Errors
    ///
    /// Returns an error if `endpoint` is not a valid absolute URL.
    pub fn new(endpoint: &str, api_key: Option<String>) -> Result<Self, String> {
        Ok(Self {
            endpoint: parse_endpoint(endpoint)?,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            instruction_template: DEFAULT_INSTRUCTION_TEMPLATE.to_string(),
            max_output_words: DEFAULT_MAX_OUTPUT_WORDS,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            temperature: 0.3,
            max_tokens: 1000,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// `true` when a non-blank API key is present.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

// Hand-written so the key never ends up in logs.
impl std::fmt::Debug for LlmRequestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmRequestConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("max_output_words", &self.max_output_words)
            .field("max_input_chars", &self.max_input_chars)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub documents_root: PathBuf,
    pub record_param_prefix: String,
    /// SSM parameter holding the API key, used when `LLM_API_KEY` is unset.
    pub api_key_param: Option<String>,
    pub llm: LlmRequestConfig,
}

impl AppConfig {
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending variable when a value is present
    /// but invalid. A missing API key is not an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let endpoint = get("LLM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let mut llm = LlmRequestConfig::new(&endpoint, get("LLM_API_KEY"))
            .map_err(|e| format!("LLM_ENDPOINT: {e}"))?;

        if let Some(model) = get("LLM_MODEL") {
            llm.model = model;
        }
        if let Some(words) = get("LLM_MAX_OUTPUT_WORDS") {
            llm.max_output_words = parse_positive("LLM_MAX_OUTPUT_WORDS", &words)?;
        }
        if let Some(chars) = get("LLM_MAX_INPUT_CHARS") {
            llm.max_input_chars = parse_positive("LLM_MAX_INPUT_CHARS", &chars)?;
        }
        if let Some(secs) = get("LLM_TIMEOUT_SECS") {
            let secs = parse_positive("LLM_TIMEOUT_SECS", &secs)?;
            llm.timeout = Duration::from_secs(secs as u64);
        }

        Ok(Self {
            documents_root: get("DOCUMENTS_ROOT")
                .map_or_else(|| PathBuf::from(DEFAULT_DOCUMENTS_ROOT), PathBuf::from),
            record_param_prefix: get("RECORD_PARAM_PREFIX")
                .unwrap_or_else(|| DEFAULT_RECORD_PARAM_PREFIX.to_string()),
            api_key_param: get("LLM_API_KEY_PARAM"),
            llm,
        })
    }

    /// Reads the environment and, if needed, pulls the API key from SSM.
    ///
    /// Failing to fetch the key is logged and leaves the key unset, so the
    /// service still starts and answers "AI service not configured".
    ///
    /// # Errors
    ///
    /// Returns an error if the environment holds an invalid value.
    pub async fn load(ssm_client: &aws_sdk_ssm::Client) -> Result<Self, String> {
        let mut config = Self::from_env()?;

        if config.llm.has_api_key() {
            info!("Using LLM API key from environment");
            return Ok(config);
        }

        let Some(param) = config.api_key_param.clone() else {
            warn!("No LLM API key configured; summaries will be refused");
            return Ok(config);
        };

        match ssm::get_parameter(ssm_client, &param, true).await {
            Ok(Some(key)) => {
                info!(parameter = %param, "Loaded LLM API key from SSM");
                config.llm.api_key = Some(key);
            }
            Ok(None) => warn!(parameter = %param, "LLM API key parameter not found"),
            Err(e) => error!(parameter = %param, "Failed to load LLM API key: {}", e),
        }

        Ok(config)
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw.trim()).map_err(|e| format!("invalid URL '{raw}': {e}"))?;
    if url.cannot_be_a_base() {
        return Err(format!("'{raw}' cannot be used as a base URL"));
    }
    // `Url::join` replaces the last segment unless the path ends with a slash.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_positive(key: &str, raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(format!("{key}: must be greater than zero")),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("{key}: {e}")),
    }
}
