use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pdfnup",
    about = "Merge multiple PDF pages onto single sheets",
    version
)]
struct Cli {
    /// Input PDF file
    #[arg(short, long)]
    input: PathBuf,

    /// Output PDF file (defaults to <input-stem>_layoutChanged.pdf)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Source pages per output sheet (2, 3 or a perfect square)
    #[arg(long, default_value = "2")]
    pages_per_sheet: usize,

    /// Comma-separated 1-based page numbers to keep on their own sheet
    #[arg(long, default_value = "")]
    isolate: String,

    /// Draw a thin outline around each placed page
    #[arg(long)]
    border: bool,

    /// Show statistics only, don't generate a PDF
    #[arg(long)]
    stats_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let options = pdf_nup::NupOptions {
        pages_per_sheet: cli.pages_per_sheet,
        add_border: cli.border,
        isolated_pages: pdf_nup::IsolationSet::parse(&cli.isolate),
    };

    let source = pdf_nup::load_pdf(&cli.input).await?;
    info!("Loaded {}", cli.input.display());

    let stats = pdf_nup::calculate_statistics(&source, &options)?;
    println!("Composition statistics:");
    println!("  Source pages: {}", stats.source_pages);
    println!("  Output sheets: {}", stats.output_sheets);
    println!("  Isolated sheets: {}", stats.isolated_sheets);
    println!("  Grouped sheets: {}", stats.grouped_sheets);

    if cli.stats_only {
        return Ok(());
    }

    let composed = pdf_nup::compose(&source, &options).await?;

    let output = cli.output.unwrap_or_else(|| {
        cli.input
            .with_file_name(pdf_nup::output_filename(&cli.input))
    });
    pdf_nup::save_pdf(composed, &output).await?;
    println!("Composed → {}", output.display());

    Ok(())
}
