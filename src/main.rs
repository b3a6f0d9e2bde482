use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use versemood::analysis::{AnalysisRequest, GatewayConfig, RemoteClient, Session};
use versemood::export;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "versemood")]
#[command(about = "Sentiment analysis of scriptural text with multi-format export")]
#[command(version)]
struct Args {
    /// Text to analyze
    #[arg(short, long, conflicts_with = "file")]
    text: Option<String>,

    /// PDF document to analyze
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Directory to write export artifacts into
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Base address of the remote analysis service (overrides BACKEND_URL)
    #[arg(long)]
    backend_url: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let request = match (&args.text, &args.file) {
        (Some(text), None) => AnalysisRequest::Text { text: text.clone() },
        (None, Some(path)) => {
            let bytes = fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "document.pdf".to_string());
            AnalysisRequest::Document { bytes, file_name }
        }
        _ => anyhow::bail!("exactly one of --text or --file is required"),
    };

    let mut config = GatewayConfig::from_env();
    if let Some(url) = args.backend_url {
        config.base_url = url;
    }

    let mut session = Session::new(RemoteClient::new(config));
    let result = session
        .run(request)
        .map_err(|e| anyhow::anyhow!("{}: {}", e.kind(), e))?;

    if result.demo_mode {
        log::warn!(
            "backend not reachable; showing demo results (set BACKEND_URL to connect to a real backend)"
        );
    }

    let (positive, negative, neutral) = result.label_tally();
    println!("Analysis {}", result.id);
    if let Some(name) = &result.file_name {
        println!("Document: {}", name);
    }
    println!("Words: {}  Characters: {}", result.word_count, result.char_count);
    println!(
        "Consensus: {} ({}+ / {}- / {}~)",
        result.consensus(),
        positive,
        negative,
        neutral
    );

    fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create {}", args.out.display()))?;
    let stem = format!("sentiment-analysis-{}", result.id);

    let json_path = args.out.join(format!("{}.json", stem));
    match export::json::encode(&result) {
        Ok(data) => {
            fs::write(&json_path, data)
                .with_context(|| format!("failed to write {}", json_path.display()))?;
            println!("Wrote {}", json_path.display());
        }
        Err(e) => log::error!("{}: {}", e.kind(), e),
    }

    let csv_path = args.out.join(format!("{}.csv", stem));
    fs::write(&csv_path, export::csv::encode(&result))
        .with_context(|| format!("failed to write {}", csv_path.display()))?;
    println!("Wrote {}", csv_path.display());

    // A failed report leaves the other artifacts untouched
    let pdf_path = args.out.join(format!("{}.pdf", stem));
    match export::report::render(&result) {
        Ok(bytes) => {
            fs::write(&pdf_path, bytes)
                .with_context(|| format!("failed to write {}", pdf_path.display()))?;
            println!("Wrote {}", pdf_path.display());
        }
        Err(e) => log::error!("{}: {}", e.kind(), e),
    }

    Ok(())
}
