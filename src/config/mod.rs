#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_HEALTH_PORT: u16 = 10000;
pub const DEFAULT_PENDING_TTL_SECS: u64 = 1800;
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 20;

/// Telegram caps long polling at 50 seconds.
pub const MAX_POLL_TIMEOUT_SECS: u64 = 50;
pub const MAX_UPLOAD_MB_LIMIT: u64 = 2000;
