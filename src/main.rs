use clap::Parser;
use wedding_market::utils::logger;
use wedding_market::CliConfig;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            // 日誌尚未初始化，直接輸出
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose || matches!(config.log_level(), Some("debug" | "trace")));
    }

    tracing::info!("Starting wedding-market v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = wedding_market::app::serve(&config).await {
        tracing::error!(
            "❌ Server failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code().max(1));
    }
}
