use clap::Parser;
use fancy_numbers::core::render::{
    format_pattern_summary, format_ranked_line, remainder_file, REMAINDER_FILE_NAME,
};
use fancy_numbers::core::{ScoringPolicy, Storage};
use fancy_numbers::utils::logger;
use fancy_numbers::utils::validation::{validate_file_extensions, validate_path};
use fancy_numbers::{FancyEngine, LocalStorage, Result};

#[derive(Parser)]
#[command(name = "fancy-rank")]
#[command(about = "Rank fancy numbers found in a local TXT / CSV / XLSX file")]
struct Args {
    /// File to scan
    input: String,

    /// How many top numbers to print
    #[arg(short = 'n', long, default_value_t = 50)]
    top: usize,

    /// Directory for the remainder file
    #[arg(short, long, default_value = ".")]
    output_dir: String,

    #[arg(long, value_enum, default_value_t = ScoringPolicy::Weighted)]
    scoring: ScoringPolicy,

    /// Print the selected numbers with their pattern matches as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    if let Err(e) = run(&args).await {
        tracing::error!(
            "❌ Ranking failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    Ok(())
}

async fn run(args: &Args) -> Result<()> {
    validate_path("input", &args.input)?;
    validate_file_extensions("input", &[args.input.clone()], &["txt", "csv", "xlsx"])?;
    validate_path("output_dir", &args.output_dir)?;

    tracing::info!("📁 Reading {}", args.input);
    let data = LocalStorage::new(".".to_string()).read_file(&args.input).await?;

    let engine = FancyEngine::new(args.scoring);
    let candidates = engine.ingest(&args.input, &data)?;
    if candidates.is_empty() {
        println!("❌ No numbers found.");
        return Ok(());
    }

    let split = engine.select(&candidates, args.top);
    if split.selected.is_empty() && split.remainder.is_empty() {
        println!("❌ No fancy numbers found.");
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&split.selected)?);
    } else {
        println!("🏆 Top {} Fancy Numbers (Best First):", split.selected.len());
        for (index, scored) in split.selected.iter().enumerate() {
            println!(
                "{}  [{}]",
                format_ranked_line(index + 1, scored),
                format_pattern_summary(scored)
            );
        }
    }

    if !split.remainder.is_empty() {
        let storage = LocalStorage::new(args.output_dir.clone());
        storage
            .write_file(REMAINDER_FILE_NAME, remainder_file(&split.remainder).as_bytes())
            .await?;
        println!(
            "📄 {} remaining fancy numbers written to {}/{}",
            split.remainder.len(),
            args.output_dir,
            REMAINDER_FILE_NAME
        );
    }

    Ok(())
}
