use clap::Parser;
use std::path::PathBuf;
use wedding_market::adapters::storage::archive_data_dir;
use wedding_market::utils::logger;
use wedding_market::{LocalStorage, MarketError};

#[derive(Parser)]
#[command(name = "backup-data")]
#[command(about = "Zip every JSON collection in the data directory")]
struct Args {
    /// Directory holding the JSON collections
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Archive to write
    #[arg(short, long, default_value = "wedding-market-backup.zip")]
    output: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

async fn run(args: &Args) -> Result<usize, MarketError> {
    let storage = LocalStorage::new(&args.data_dir);
    let archive = archive_data_dir(&storage).await?;
    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&args.output, &archive).await?;
    Ok(archive.len())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);
    tracing::info!("🗜️ Backing up {}", args.data_dir.display());

    match run(&args).await {
        Ok(bytes) => {
            tracing::info!("✅ Backup written to {} ({} bytes)", args.output.display(), bytes);
            println!("✅ Backup written to {}", args.output.display());
        }
        Err(e) => {
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code().max(1));
        }
    }
}
