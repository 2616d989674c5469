pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{
    health::{start_health_server, HealthServer},
    storage::LocalStorage,
    telegram::TelegramClient,
};
pub use core::{
    bot::FancyBot,
    classifier::classify,
    engine::FancyEngine,
    extractor::extract,
    ranker::{rank, top},
};
pub use utils::error::{FancyError, Result};
