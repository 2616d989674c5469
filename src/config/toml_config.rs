use crate::config::{
    DEFAULT_HEALTH_PORT, DEFAULT_MAX_UPLOAD_MB, DEFAULT_PENDING_TTL_SECS,
    DEFAULT_POLL_TIMEOUT_SECS, MAX_POLL_TIMEOUT_SECS, MAX_UPLOAD_MB_LIMIT,
};
use crate::adapters::telegram::DEFAULT_API_BASE_URL;
use crate::core::render::DEFAULT_FOOTER;
use crate::core::{ConfigProvider, ScoringPolicy};
use crate::utils::error::{FancyError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_socket_addr,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub telegram: TelegramConfig,
    pub health: Option<HealthConfig>,
    pub ranking: Option<RankingConfig>,
    pub session: Option<SessionConfig>,
    pub messages: Option<MessagesConfig>,
    pub limits: Option<LimitsConfig>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub token: Option<String>,
    pub api_base_url: Option<String>,
    pub poll_timeout_secs: Option<u64>,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    pub enabled: Option<bool>,
    pub addr: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    pub policy: Option<ScoringPolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub pending_ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesConfig {
    pub footer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_upload_mb: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(FancyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FancyError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BOT_TOKEN})，未設定者保留原文
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| FancyError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let token = validate_required_field("telegram.token", &self.telegram.token)?;
        validate_non_empty_string("telegram.token", token)?;
        if token.starts_with("${") {
            return Err(FancyError::ConfigValidationError {
                field: "telegram.token".to_string(),
                message: format!("Environment variable {} is not set", token),
            });
        }

        validate_url("telegram.api_base_url", self.api_base_url())?;
        validate_range(
            "telegram.poll_timeout_secs",
            self.poll_timeout_secs(),
            0,
            MAX_POLL_TIMEOUT_SECS,
        )?;

        if let Some(addr) = self.health_addr() {
            validate_socket_addr("health.addr", &addr)?;
        }

        let max_upload_mb = self
            .limits
            .as_ref()
            .and_then(|l| l.max_upload_mb)
            .unwrap_or(DEFAULT_MAX_UPLOAD_MB);
        validate_range("limits.max_upload_mb", max_upload_mb, 1, MAX_UPLOAD_MB_LIMIT)?;

        tracing::debug!("✅ TOML configuration validation passed");
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn bot_token(&self) -> &str {
        self.telegram.token.as_deref().unwrap_or("")
    }

    fn api_base_url(&self) -> &str {
        self.telegram
            .api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
    }

    fn health_addr(&self) -> Option<String> {
        let health = self.health.as_ref();
        if !health.and_then(|h| h.enabled).unwrap_or(true) {
            return None;
        }
        Some(
            health
                .and_then(|h| h.addr.clone())
                .unwrap_or_else(|| format!("0.0.0.0:{}", DEFAULT_HEALTH_PORT)),
        )
    }

    fn footer(&self) -> &str {
        self.messages
            .as_ref()
            .and_then(|m| m.footer.as_deref())
            .unwrap_or(DEFAULT_FOOTER)
    }

    fn scoring_policy(&self) -> ScoringPolicy {
        self.ranking
            .as_ref()
            .and_then(|r| r.policy)
            .unwrap_or_default()
    }

    fn pending_ttl_secs(&self) -> u64 {
        self.session
            .as_ref()
            .and_then(|s| s.pending_ttl_secs)
            .unwrap_or(DEFAULT_PENDING_TTL_SECS)
    }

    fn poll_timeout_secs(&self) -> u64 {
        self.telegram
            .poll_timeout_secs
            .unwrap_or(DEFAULT_POLL_TIMEOUT_SECS)
    }

    fn max_upload_bytes(&self) -> u64 {
        self.limits
            .as_ref()
            .and_then(|l| l.max_upload_mb)
            .unwrap_or(DEFAULT_MAX_UPLOAD_MB)
            * 1024
            * 1024
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
