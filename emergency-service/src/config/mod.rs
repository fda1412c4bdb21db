use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "mistralai/mixtral-8x22b-instruct";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

const DEFAULT_MAX_TOKENS: u32 = 600;
const DEFAULT_TEMPERATURE: f32 = 0.2;
const DEFAULT_TIMEOUT_MS: u64 = 8_000;

#[derive(Debug, Clone)]
pub struct EmergencyConfig {
    pub common: core_config::Config,
    pub llm: LlmConfig,
    pub planner: PlannerConfig,
}

/// Which completion backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Any OpenAI-compatible `/chat/completions` endpoint.
    OpenAi,
    Gemini,
    /// No backend; every plan comes from the fallback table.
    Disabled,
}

impl FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "gemini" => Ok(ProviderKind::Gemini),
            "none" | "disabled" => Ok(ProviderKind::Disabled),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "LLM_PROVIDER must be one of openai, gemini, none (got {})",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    pub api_key: String,
    pub model: String,
    /// Only used by the OpenAI-compatible provider.
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub max_tokens: u32,
    pub temperature: f32,
    /// Upper bound on a single provider call.
    pub timeout_ms: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl EmergencyConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let provider: ProviderKind = get_env("LLM_PROVIDER", Some("openai"), is_prod)?.parse()?;

        let llm = match provider {
            ProviderKind::OpenAi => LlmConfig {
                provider,
                api_key: get_env("LLM_API_KEY", None, is_prod)?,
                model: get_env("LLM_MODEL", Some(DEFAULT_OPENAI_MODEL), is_prod)?,
                base_url: get_env("LLM_BASE_URL", Some(DEFAULT_OPENAI_BASE_URL), is_prod)?,
            },
            ProviderKind::Gemini => LlmConfig {
                provider,
                api_key: get_env("LLM_API_KEY", None, is_prod)?,
                model: get_env("LLM_MODEL", Some(DEFAULT_GEMINI_MODEL), is_prod)?,
                base_url: String::new(),
            },
            ProviderKind::Disabled => LlmConfig {
                provider,
                api_key: String::new(),
                model: String::new(),
                base_url: String::new(),
            },
        };

        // Tunables keep their defaults in every environment.
        Ok(EmergencyConfig {
            common: common_config,
            llm,
            planner: PlannerConfig {
                max_tokens: parse_env("PLAN_MAX_TOKENS", DEFAULT_MAX_TOKENS)?,
                temperature: parse_env("PLAN_TEMPERATURE", DEFAULT_TEMPERATURE)?,
                timeout_ms: parse_env("PLAN_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value {:?}: {}", key, raw, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_parses_known_names() {
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!("Gemini".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert_eq!("none".parse::<ProviderKind>().unwrap(), ProviderKind::Disabled);
        assert!("llama".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn numeric_values_are_parsed_strictly() {
        assert_eq!(parse_value::<u32>("PLAN_MAX_TOKENS", " 512 ").unwrap(), 512);
        assert_eq!(parse_value::<f32>("PLAN_TEMPERATURE", "0.2").unwrap(), 0.2);

        let err = parse_value::<u64>("PLAN_TIMEOUT_MS", "soon").unwrap_err();
        assert!(err.to_string().contains("PLAN_TIMEOUT_MS"));
    }

    #[test]
    fn planner_defaults_are_conservative() {
        let planner = PlannerConfig::default();
        assert_eq!(planner.max_tokens, 600);
        assert!(planner.temperature <= 0.3);
        assert_eq!(planner.timeout_ms, 8_000);
    }
}
