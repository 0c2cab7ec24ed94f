//! Configuration for the Analyzer

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Number of topics produced by the heuristic fallback
    pub topic_count: usize,

    /// Number of keywords extracted per text
    pub keyword_count: usize,

    /// Heuristic summary cutoff (characters)
    pub summary_max_chars: usize,

    /// Cutoff (characters) for summaries taken from generated output
    pub generated_summary_max_chars: usize,

    /// Title used when none was produced
    pub title_placeholder: String,

    /// Upper bound on a single generation attempt (seconds); expiry routes
    /// the request to the fallback path
    pub generation_timeout_secs: u64,
}

impl AnalyzerConfig {
    /// Get the generation timeout as a Duration
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.summary_max_chars == 0 {
            return Err("summary_max_chars must be greater than 0".to_string());
        }
        if self.generated_summary_max_chars == 0 {
            return Err("generated_summary_max_chars must be greater than 0".to_string());
        }
        if self.title_placeholder.trim().is_empty() {
            return Err("title_placeholder cannot be empty".to_string());
        }
        if self.generation_timeout_secs == 0 {
            return Err("generation_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Preset for slow local models: longer generation budget, longer summaries
    pub fn patient() -> Self {
        Self {
            summary_max_chars: 200,
            generation_timeout_secs: 120,
            ..Self::default()
        }
    }

    /// Preset for latency-sensitive callers: short generation budget, more keywords
    pub fn brisk() -> Self {
        Self {
            keyword_count: 5,
            generation_timeout_secs: 5,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            topic_count: 3,
            keyword_count: 3,
            summary_max_chars: 100,
            generated_summary_max_chars: 500,
            title_placeholder: "Untitled".to_string(),
            generation_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.generation_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_summary_cutoff() {
        let config = AnalyzerConfig {
            summary_max_chars: 0,
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_generated_summary_cutoff() {
        let config = AnalyzerConfig {
            generated_summary_max_chars: 0,
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_placeholder_rejected() {
        let config = AnalyzerConfig {
            title_placeholder: "  ".to_string(),
            ..AnalyzerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_presets_are_valid() {
        let patient = AnalyzerConfig::patient();
        assert!(patient.validate().is_ok());
        assert_eq!(patient.generation_timeout_secs, 120);

        let brisk = AnalyzerConfig::brisk();
        assert!(brisk.validate().is_ok());
        assert_eq!(brisk.keyword_count, 5);
        assert_eq!(brisk.topic_count, 3);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AnalyzerConfig::from_toml("keyword_count = 5").unwrap();
        assert_eq!(config.keyword_count, 5);
        assert_eq!(config.topic_count, 3);
        assert_eq!(config.title_placeholder, "Untitled");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AnalyzerConfig {
            summary_max_chars: 240,
            ..AnalyzerConfig::default()
        };
        let parsed = AnalyzerConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.summary_max_chars, 240);
        assert_eq!(parsed.generation_timeout_secs, config.generation_timeout_secs);
    }
}
