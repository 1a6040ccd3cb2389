use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

/// Sampling parameters sent with every classifier request
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplingConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        // Low temperature keeps repeated runs close together
        Self {
            temperature: 0.1,
            top_p: 0.9,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

/// Connection settings for the classifier endpoint
#[derive(Clone)]
pub struct ClassifierConfig {
    /// OpenAI-compatible API base (chat completions live under it)
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub sampling: SamplingConfig,
    /// Upper bound on a single classifier call
    pub timeout: Duration,
}

impl std::fmt::Debug for ClassifierConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("sampling", &self.sampling)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub classifier: ClassifierConfig,
    pub test_cases_path: PathBuf,
    pub ground_truth_path: PathBuf,
    /// Pipeline runs per ticket during consistency evaluation
    pub consistency_runs: usize,
    /// Triage-only runs per ticket during consistency evaluation
    pub triage_runs: usize,
    /// Pipeline runs allowed in flight at once during evaluation
    pub max_in_flight: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = SamplingConfig::default();

        Self {
            classifier: ClassifierConfig {
                base_url: env::var("GROQ_BASE_URL")
                    .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string()),
                api_key: env::var("GROQ_API_KEY").unwrap_or_default(),
                model: env::var("ROUTER_MODEL").unwrap_or_else(|_| "llama3-70b-8192".to_string()),
                sampling: SamplingConfig {
                    temperature: env_or("ROUTER_TEMPERATURE", defaults.temperature),
                    top_p: env_or("ROUTER_TOP_P", defaults.top_p),
                    ..defaults
                },
                timeout: Duration::from_secs(env_or("ROUTER_TIMEOUT_SECS", 30)),
            },
            test_cases_path: env::var("ROUTER_TEST_CASES")
                .unwrap_or_else(|_| "data/test_cases.json".to_string())
                .into(),
            ground_truth_path: env::var("ROUTER_GROUND_TRUTH")
                .unwrap_or_else(|_| "data/ground_truth.json".to_string())
                .into(),
            consistency_runs: env_or("ROUTER_CONSISTENCY_RUNS", 3),
            triage_runs: env_or("ROUTER_TRIAGE_RUNS", 3),
            max_in_flight: env_or::<usize>("ROUTER_MAX_IN_FLIGHT", 4).max(1),
        }
    }

    /// Check if an API key is configured for the classifier endpoint
    pub fn classifier_configured(&self) -> bool {
        !self.classifier.api_key.trim().is_empty()
    }
}

fn env_or<T>(name: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Debug,
{
    parse_or(name, env::var(name).ok(), default)
}

/// Parse an optional raw value, keeping the default when absent or invalid
fn parse_or<T>(name: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Debug,
{
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using {:?}", name, raw, default);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_or_uses_default_when_missing() {
        assert_eq!(parse_or::<u64>("X", None, 30), 30);
    }

    #[test]
    fn parse_or_parses_present_values() {
        assert_eq!(parse_or::<usize>("X", Some(" 7 ".to_string()), 3), 7);
        assert_eq!(parse_or::<f32>("X", Some("0.5".to_string()), 0.1), 0.5);
    }

    #[test]
    fn parse_or_falls_back_on_garbage() {
        assert_eq!(parse_or::<usize>("X", Some("many".to_string()), 3), 3);
    }

    #[test]
    fn default_sampling_is_low_temperature() {
        let sampling = SamplingConfig::default();
        assert_eq!(sampling.temperature, 0.1);
        assert_eq!(sampling.top_p, 0.9);
    }

    #[test]
    fn classifier_config_debug_redacts_api_key() {
        let config = ClassifierConfig {
            base_url: "http://localhost".to_string(),
            api_key: "gsk-secret".to_string(),
            model: "m".to_string(),
            sampling: SamplingConfig::default(),
            timeout: Duration::from_secs(1),
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("gsk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
