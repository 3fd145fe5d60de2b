// src/main.rs
use clap::Parser;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use prospectus_retriever::edgar::{ProspectusClient, SeriesResolver};
use prospectus_retriever::retriever::{OutputFormat, ProspectusLog, ProspectusRetriever};
use prospectus_retriever::storage::StorageManager;
use prospectus_retriever::utils::{self, AppError};

/// Command Line Interface for the fund prospectus retriever
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Fund symbols (e.g. SPY QQQ VTSAX)
    #[arg(short, long, num_args = 1.., required = true)]
    symbols: Vec<String>,

    /// Destination filenames, one per symbol (e.g. file1.htm file2.htm)
    #[arg(short, long, num_args = 1..)]
    files: Option<Vec<String>>,

    /// Save prospectuses as converted PDFs instead of archived HTML
    #[arg(long)]
    to_pdf: bool,

    /// API key for the filings search service (falls back to $SEC_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Path to the SEC mutual fund ticker mapping file
    #[arg(long, default_value = "company_tickers_mf.json")]
    mapping_file: String,

    /// Directory the downloaded documents are written to
    #[arg(short, long, default_value = ".")]
    output_dir: String,

    /// Also write the batch result log as JSON to this file (relative to the output dir)
    #[arg(long)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::debug!("Starting retrieval for args: {:?}", args);

    let api_key = args
        .api_key
        .or_else(|| std::env::var("SEC_API_KEY").ok())
        .ok_or_else(|| {
            AppError::Config("no API key: pass --api-key or set SEC_API_KEY".to_string())
        })?;

    // 3. Initialize the pipeline
    let resolver = SeriesResolver::from_file(&args.mapping_file)?;
    let client = ProspectusClient::new(api_key)?;
    let storage = StorageManager::new(&args.output_dir)?;
    let retriever = ProspectusRetriever::new(resolver, client, storage);

    let format = if args.to_pdf {
        OutputFormat::Pdf
    } else {
        OutputFormat::Html
    };

    // 4. Run the batch
    let logs = retriever
        .retrieve_many(&args.symbols, args.files.as_deref(), format)
        .await?;

    // 5. Export the structured log if requested, then render the table
    if let Some(log_file) = &args.log_file {
        retriever.storage().save_batch_log(log_file, &logs)?;
    }

    println!("Logs:");
    println!("{}", render_log_table(&logs));

    Ok(())
}

fn render_log_table(logs: &[ProspectusLog]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Fund Symbol", "Saved?", "Error", "Link", "Filing Date"]);

    for log in logs {
        table.add_row(vec![
            log.fund_symbol.clone(),
            log.is_successfully_saved.to_string(),
            log.error.clone().unwrap_or_default(),
            log.url.clone().unwrap_or_default(),
            log.date.clone().unwrap_or_default(),
        ]);
    }

    table
}
