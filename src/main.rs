use clap::Parser;
use fancy_numbers::core::ConfigProvider;
use fancy_numbers::utils::error::ErrorSeverity;
use fancy_numbers::utils::validation::{validate_socket_addr, Validate};
use fancy_numbers::utils::logger;
use fancy_numbers::{start_health_server, CliConfig, FancyBot, Result, TelegramClient, TomlConfig};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting fancy-numbers bot");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let outcome = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(&path) {
                Ok(config) => run(config).await,
                Err(e) => Err(e),
            }
        }
        None => run(cli).await,
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Bot stopped with error: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run<C: ConfigProvider + Validate>(config: C) -> Result<()> {
    // 驗證配置
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    // 健康檢查與輪詢為兩個獨立任務
    let health = match config.health_addr() {
        Some(addr) => {
            let addr = validate_socket_addr("health_addr", &addr)?;
            Some(start_health_server(addr).await?)
        }
        None => {
            tracing::info!("Health endpoint disabled");
            None
        }
    };

    let api = TelegramClient::new(config.api_base_url(), config.bot_token());
    let bot = FancyBot::new(api, config);

    bot.run(shutdown_signal()).await;

    if let Some(server) = health {
        server.stop().await;
    }

    tracing::info!("👋 Bot shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
