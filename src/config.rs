use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionConfig {
    pub questionnaire_weight: f64,
    pub fortune_weight: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            questionnaire_weight: 0.6,
            fortune_weight: 0.4,
        }
    }
}

/// Point contributions of the fortune engine's internal scoring rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FortunePoints {
    pub dominant_element: f64,
    pub stem_element: f64,
    pub star_element: f64,
    pub life_path: f64,
}

impl Default for FortunePoints {
    fn default() -> Self {
        Self {
            dominant_element: 3.0,
            stem_element: 2.0,
            star_element: 2.0,
            life_path: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub timeout_ms: u64,
    pub max_highlights: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 15_000,
            max_highlights: 4,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosisConfig {
    pub fusion: FusionConfig,
    pub fortune: FortunePoints,
    pub llm: LlmConfig,
}

impl DiagnosisConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                DiagnosisConfig::default()
            }
        } else {
            DiagnosisConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(weight) = env::var("FUSION_QUESTIONNAIRE_WEIGHT") {
            if let Ok(value) = weight.parse::<f64>() {
                self.fusion.questionnaire_weight = value;
            }
        }
        if let Ok(weight) = env::var("FUSION_FORTUNE_WEIGHT") {
            if let Ok(value) = weight.parse::<f64>() {
                self.fusion.fortune_weight = value;
            }
        }
        if let Ok(timeout) = env::var("LLM_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.llm.timeout_ms = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("DIAGNOSIS_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/diagnosis.toml")))
}
