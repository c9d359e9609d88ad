//! pdfsift CLI - persona-driven PDF section extraction and ranking

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfsift::{
    extract_outline, CollectionAnalyzer, CollectionConfig, HashEmbedder, PdfiumDecoder,
};

#[derive(Parser)]
#[command(name = "pdfsift")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract PDF outlines and rank sections by persona relevance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a document collection and rank its sections
    Analyze {
        /// Collection directory containing the input JSON and a PDFs/ folder
        #[arg(value_name = "DIR")]
        collection: PathBuf,

        /// Name of the input configuration file inside the collection
        #[arg(long, default_value = "challenge1b_input.json")]
        input_json: String,

        /// Output file (defaults to challenge1b_output.json in the collection)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Embedding vector width
        #[arg(long, default_value_t = 384)]
        dimensions: usize,

        /// Process documents one at a time instead of in parallel
        #[arg(long)]
        sequential: bool,
    },

    /// Extract the outline of a single PDF
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            collection,
            input_json,
            output,
            dimensions,
            sequential,
        } => cmd_analyze(
            &collection,
            &input_json,
            output.as_deref(),
            dimensions,
            sequential,
        ),
        Commands::Outline { input, output } => cmd_outline(&input, output.as_deref()),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_analyze(
    collection: &Path,
    input_json: &str,
    output: Option<&Path>,
    dimensions: usize,
    sequential: bool,
) -> pdfsift::Result<()> {
    let config = CollectionConfig::load(&collection.join(input_json))?;
    let pdf_dir = collection.join("PDFs");
    log::debug!(
        "collection {}: {} documents, persona '{}'",
        collection.display(),
        config.documents.len(),
        config.persona.role
    );

    let decoder = PdfiumDecoder::new();
    let embedder = HashEmbedder::new(dimensions);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    spinner.set_message(format!(
        "Analyzing {} documents for persona '{}'...",
        config.documents.len(),
        config.persona.role
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let analyzer = CollectionAnalyzer::new(&decoder, &embedder);
    let analyzer = if sequential {
        analyzer.sequential()
    } else {
        analyzer
    };
    let result = analyzer.analyze(&config, &pdf_dir)?;

    spinner.finish_and_clear();

    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| collection.join("challenge1b_output.json"));
    std::fs::write(&output_path, serde_json::to_string_pretty(&result)?)?;

    println!(
        "{} {} sections ranked across {} documents",
        "✓".green().bold(),
        result.extracted_sections.len(),
        config.documents.len()
    );
    for section in &result.extracted_sections {
        println!(
            "  {}. {} {}",
            section.importance_rank,
            section.section_title.bold(),
            format!("({}, p.{})", section.document, section.page_number).dimmed()
        );
    }
    println!("{} {}", "Output:".cyan(), output_path.display());

    Ok(())
}

fn cmd_outline(input: &Path, output: Option<&Path>) -> pdfsift::Result<()> {
    let outline = extract_outline(input)?;

    let entries: Vec<serde_json::Value> = outline
        .headings
        .iter()
        .map(|heading| {
            serde_json::json!({
                "level": heading.level.to_string(),
                "text": heading.text,
                "page": heading.page,
            })
        })
        .collect();
    let json = serde_json::to_string_pretty(&serde_json::json!({
        "title": outline.title,
        "outline": entries,
    }))?;

    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            println!(
                "{} {} headings -> {}",
                "✓".green().bold(),
                outline.headings.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}

fn cmd_version() {
    println!("pdfsift {}", env!("CARGO_PKG_VERSION"));
}
