//! untextract CLI - rebuild document structure from analysis responses

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use untextract::naming::storage_key;
use untextract::render::{self, JsonFormat, TextOptions};
use untextract::{
    detect_kind_from_path, DirectoryStore, DocumentKind, DocumentLocation, JobDriver,
    PollOptions, ReplayService, StructuredDocument,
};

#[derive(Parser)]
#[command(name = "untextract")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rebuild lines, tables, and forms from document analysis responses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the lines of each page as plain text
    Text {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Append table grids after each page's lines
        #[arg(long)]
        tables: bool,

        /// Append form fields after each page's lines
        #[arg(long)]
        forms: bool,
    },

    /// Print the reconstructed document as JSON
    Json {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Write the tables, key-value pairs, and date line to a result file
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output: PathBuf,

        /// Date used in the result file name (YYYY-MM-DD, today if not specified)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show document statistics
    Info {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Check whether a source document can be analyzed
    Detect {
        /// Source document
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct InputArgs {
    /// Recorded analysis response files, in page order
    #[arg(value_name = "RESPONSE", required = true)]
    responses: Vec<PathBuf>,

    /// Source document the responses were produced from
    #[arg(short, long, value_name = "FILE")]
    source: Option<PathBuf>,

    /// Treat the responses as a synchronous single-image detection
    #[arg(long)]
    image: bool,

    /// Copy the source document into this directory before analysis
    #[arg(long, value_name = "DIR", requires = "source")]
    store: Option<PathBuf>,

    /// Delay between job status checks in milliseconds
    #[arg(long, env = "UNTEXTRACT_POLL_INTERVAL_MS", default_value = "0")]
    poll_interval_ms: u64,

    /// Maximum number of job status checks
    #[arg(long, env = "UNTEXTRACT_MAX_ATTEMPTS")]
    max_attempts: Option<u32>,

    /// Give up on the job after this many seconds
    #[arg(long, env = "UNTEXTRACT_TIMEOUT_SECS", default_value = "600")]
    timeout_secs: u64,

    /// Rebuild pages one at a time
    #[arg(long)]
    sequential: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Text {
            input,
            output,
            tables,
            forms,
        } => cmd_text(&input, output.as_deref(), tables, forms),
        Commands::Json {
            input,
            output,
            compact,
        } => cmd_json(&input, output.as_deref(), compact),
        Commands::Export {
            input,
            output,
            date,
        } => cmd_export(&input, &output, date),
        Commands::Info { input } => cmd_info(&input),
        Commands::Detect { file } => cmd_detect(&file),
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

impl InputArgs {
    fn poll_options(&self) -> PollOptions {
        let mut options = PollOptions::new()
            .with_interval(Duration::from_millis(self.poll_interval_ms))
            .with_timeout(Duration::from_secs(self.timeout_secs));
        if let Some(attempts) = self.max_attempts {
            options = options.with_max_attempts(attempts);
        }
        options
    }

    /// Name of the analyzed document, used for storage keys and result files.
    fn document_name(&self) -> String {
        self.source
            .as_deref()
            .or_else(|| self.responses.first().map(PathBuf::as_path))
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string())
    }
}

/// Run the recorded responses through the job driver.
fn analyze(input: &InputArgs) -> Result<StructuredDocument, Box<dyn std::error::Error>> {
    let source = match &input.source {
        Some(path) => {
            let kind = detect_kind_from_path(path)?;
            Some((kind, fs::read(path)?))
        }
        None => None,
    };
    let image = input.image || matches!(&source, Some((kind, _)) if kind.is_image());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Loading responses...");
    let service = ReplayService::from_files(&input.responses)?;

    let mut driver = JobDriver::new(service, input.poll_options());
    if input.sequential {
        driver = driver.with_reconstruct_options(untextract::ReconstructOptions::new().sequential());
    }

    pb.set_message("Analyzing...");
    let bytes = source.map(|(_, bytes)| bytes).unwrap_or_default();
    let result = if image {
        driver.detect(&bytes)
    } else if let Some(dir) = &input.store {
        let store = DirectoryStore::new(dir, "local");
        let key = storage_key(&input.document_name(), Local::now().date_naive());
        driver.analyze_stored(&store, &bytes, &key)
    } else {
        driver.analyze(&DocumentLocation::new("local", input.document_name()))
    };

    match result {
        Ok(doc) => {
            pb.finish_and_clear();
            Ok(doc)
        }
        Err(e) => {
            pb.abandon();
            Err(e.into())
        }
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_text(
    input: &InputArgs,
    output: Option<&Path>,
    tables: bool,
    forms: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = analyze(input)?;
    let options = TextOptions::new().with_tables(tables).with_forms(forms);
    write_or_print(output, &render::to_text(&doc, &options))
}

fn cmd_json(
    input: &InputArgs,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = analyze(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    write_or_print(output, &render::to_json(&doc, format)?)
}

fn cmd_export(
    input: &InputArgs,
    output: &Path,
    date: Option<NaiveDate>,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = analyze(input)?;

    fs::create_dir_all(output)?;
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let path = render::write_export(&doc, output, &input.document_name(), date)?;

    println!("{} {}", "Saved to".green(), path.display());
    Ok(())
}

fn cmd_info(input: &InputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let doc = analyze(input)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Document".bold(), input.document_name());
    println!("{}: {}", "Responses".bold(), input.responses.len());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    if let Some(ref line) = doc.first_date_line {
        println!("{}: {}", "Date line".bold(), line);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = doc.plain_text();
    let cells: usize = doc
        .tables()
        .map(|t| t.row_count() * t.column_count())
        .sum();

    println!("{}: {}", "Lines".bold(), doc.lines().count());
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Tables".bold(), doc.tables().count());
    println!("{}: {}", "Table cells".bold(), cells);
    println!("{}: {}", "Form fields".bold(), doc.form_fields().len());

    Ok(())
}

fn cmd_detect(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let kind = detect_kind_from_path(file)?;
    let path = match kind {
        DocumentKind::Pdf => "asynchronous job",
        _ => "synchronous detection",
    };
    println!("{}: {} ({})", "Format".bold(), kind, path);

    let named = file
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(DocumentKind::from_extension);
    if let Some(named) = named.filter(|&named| named != kind) {
        println!(
            "{}: extension suggests {}, content is {}",
            "Warning".yellow().bold(),
            named,
            kind
        );
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "untextract".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document analysis reconstruction tool");
    println!();
    println!("License: MIT");
}
