use crate::config::{
    DEFAULT_HEALTH_PORT, DEFAULT_MAX_UPLOAD_MB, DEFAULT_PENDING_TTL_SECS,
    DEFAULT_POLL_TIMEOUT_SECS, MAX_POLL_TIMEOUT_SECS, MAX_UPLOAD_MB_LIMIT,
};
use crate::core::render::DEFAULT_FOOTER;
use crate::core::{ConfigProvider, ScoringPolicy};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_socket_addr, validate_url, Validate,
};
use clap::Parser;

#[derive(Clone, Parser)]
#[command(name = "fancy-numbers")]
#[command(about = "Telegram bot that ranks fancy phone numbers found in uploaded files")]
pub struct CliConfig {
    #[arg(long, env = "BOT_TOKEN", default_value = "", hide_env_values = true)]
    pub bot_token: String,

    #[arg(long, env = "TELEGRAM_API_BASE_URL", default_value = "https://api.telegram.org")]
    pub api_base_url: String,

    /// Full bind address; overrides --port
    #[arg(long, env = "HEALTH_ADDR")]
    pub health_addr: Option<String>,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_HEALTH_PORT)]
    pub port: u16,

    #[arg(long, help = "Disable the health check endpoint")]
    pub no_health: bool,

    #[arg(long, env = "BOT_FOOTER", default_value = DEFAULT_FOOTER)]
    pub footer: String,

    #[arg(long, value_enum, default_value_t = ScoringPolicy::Weighted)]
    pub scoring: ScoringPolicy,

    /// Seconds a pending upload waits for its count; 0 keeps it forever
    #[arg(long, default_value_t = DEFAULT_PENDING_TTL_SECS)]
    pub pending_ttl_secs: u64,

    #[arg(long, default_value_t = DEFAULT_POLL_TIMEOUT_SECS)]
    pub poll_timeout_secs: u64,

    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_MB)]
    pub max_upload_mb: u64,

    /// Load settings from a TOML file instead of flags
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl std::fmt::Debug for CliConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliConfig")
            .field("api_base_url", &self.api_base_url)
            .field("health_addr", &self.health_addr())
            .field("scoring", &self.scoring)
            .field("pending_ttl_secs", &self.pending_ttl_secs)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("max_upload_mb", &self.max_upload_mb)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ConfigProvider for CliConfig {
    fn bot_token(&self) -> &str {
        &self.bot_token
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn health_addr(&self) -> Option<String> {
        if self.no_health {
            return None;
        }
        Some(
            self.health_addr
                .clone()
                .unwrap_or_else(|| format!("0.0.0.0:{}", self.port)),
        )
    }

    fn footer(&self) -> &str {
        &self.footer
    }

    fn scoring_policy(&self) -> ScoringPolicy {
        self.scoring
    }

    fn pending_ttl_secs(&self) -> u64 {
        self.pending_ttl_secs
    }

    fn poll_timeout_secs(&self) -> u64 {
        self.poll_timeout_secs
    }

    fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb * 1024 * 1024
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("bot_token", &self.bot_token)?;
        validate_url("api_base_url", &self.api_base_url)?;

        if let Some(addr) = self.health_addr() {
            validate_socket_addr("health_addr", &addr)?;
        }

        validate_range("poll_timeout_secs", self.poll_timeout_secs, 0, MAX_POLL_TIMEOUT_SECS)?;
        validate_range("max_upload_mb", self.max_upload_mb, 1, MAX_UPLOAD_MB_LIMIT)?;

        tracing::debug!("✅ CLI configuration validation passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["fancy-numbers"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_explicit_flags() {
        let config = parse(&[
            "--bot-token",
            "123:ABC",
            "--port",
            "8080",
            "--scoring",
            "boolean",
            "--pending-ttl-secs",
            "0",
            "--max-upload-mb",
            "5",
        ]);

        assert_eq!(config.bot_token(), "123:ABC");
        assert_eq!(config.health_addr().as_deref(), Some("0.0.0.0:8080"));
        assert_eq!(config.scoring_policy(), ScoringPolicy::Boolean);
        assert_eq!(config.pending_ttl_secs(), 0);
        assert_eq!(config.max_upload_bytes(), 5 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_health_addr_overrides_port_and_can_be_disabled() {
        let config = parse(&["--bot-token", "t", "--health-addr", "127.0.0.1:9000"]);
        assert_eq!(config.health_addr().as_deref(), Some("127.0.0.1:9000"));

        let config = parse(&["--bot-token", "t", "--no-health"]);
        assert!(config.health_addr().is_none());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = parse(&["--bot-token", "t"]);
        assert!(config.validate().is_ok());

        config.poll_timeout_secs = 90;
        assert!(config.validate().is_err());

        config.poll_timeout_secs = 30;
        config.health_addr = Some("not-an-address".to_string());
        assert!(config.validate().is_err());

        config.health_addr = None;
        config.bot_token = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_hides_token() {
        let config = parse(&["--bot-token", "123:SECRET"]);
        assert!(!format!("{:?}", config).contains("SECRET"));
    }
}
