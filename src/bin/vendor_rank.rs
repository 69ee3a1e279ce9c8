use clap::Parser;
use std::path::PathBuf;
use wedding_market::adapters::export::{render_ranking, ExportFormat};
use wedding_market::adapters::storage::read_collection;
use wedding_market::core::vendor_list::rank_vendors;
use wedding_market::core::RankingOrder;
use wedding_market::domain::model::Vendor;
use wedding_market::utils::logger;
use wedding_market::{LocalStorage, MarketError};

#[derive(Parser)]
#[command(name = "vendor-rank")]
#[command(about = "Rank vendors from a data directory and export the listing")]
struct Args {
    /// Directory holding vendors.json
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Ordering: rating, price-asc, price-desc or stored
    #[arg(long, default_value = "rating")]
    by: RankingOrder,

    /// Output format: csv, tsv or json
    #[arg(long, default_value = "csv")]
    format: ExportFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

async fn run(args: &Args) -> Result<(), MarketError> {
    // 只讀取，不建立缺少的資料檔
    let storage = LocalStorage::new(&args.data_dir);
    let vendors: Vec<Vendor> = read_collection(&storage).await?;
    tracing::debug!("Loaded {} vendors", vendors.len());
    let listing = render_ranking(&rank_vendors(vendors, args.by), args.format)?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, listing.as_bytes()).await?;
            tracing::info!("📁 Ranking saved to: {}", path.display());
        }
        None => print!("{}", listing),
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);
    tracing::info!(
        "📊 Ranking vendors in {} by {:?}",
        args.data_dir.display(),
        args.by
    );

    if let Err(e) = run(&args).await {
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code().max(1));
    }
}
