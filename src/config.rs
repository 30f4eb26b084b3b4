use crate::error::{RxAiError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// APIキーを上書きする環境変数
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_completion_tokens: u32,
    pub max_image_bytes: u64,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "meta-llama/llama-4-scout-17b-16e-instruct".into(),
            temperature: 0.3,
            max_completion_tokens: 1024,
            max_image_bytes: 10 * 1024 * 1024, // 処方箋アップロード上限 10MB
            timeout_seconds: 120,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RxAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("rx-ai").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(RxAiError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, "meta-llama/llama-4-scout-17b-16e-instruct");
        assert_eq!(config.max_completion_tokens, 1024);
        assert_eq!(config.max_image_bytes, 10 * 1024 * 1024);
        assert!((config.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"timeout_seconds": 30}"#).unwrap();
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.max_completion_tokens, 1024);
        assert!(config.api_key.is_none());
    }
}
