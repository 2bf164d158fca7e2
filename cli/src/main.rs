//! docsmith CLI - document assembly tool

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use docsmith::invoice::invoice_from_data;
use docsmith::interpolate::format_currency;
use docsmith::render::{self, lint};
use docsmith::{
    registry, ComposeOptions, ComposeRequest, DateStyle, DocumentStore, JsonFileStore,
    JsonFormat, RenderedDocument, StoredDocument,
};

#[derive(Parser)]
#[command(name = "docsmith")]
#[command(version)]
#[command(about = "Compose proposals, letters, invoices and articles from JSON data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a document from a JSON data file
    Compose {
        /// Document type (e.g. proposal, offer-letter, invoice)
        #[arg(value_name = "TYPE")]
        document_type: String,

        /// JSON data file ("-" for stdin, empty object if omitted)
        #[arg(value_name = "DATA")]
        data: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Compose many documents listed in a JSON array of {documentType, data}
    Batch {
        /// JSON file holding the requests
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "docsmith_output")]
        output: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Print the default content of a document type
    Defaults {
        /// Document type
        #[arg(value_name = "TYPE")]
        document_type: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "html")]
        format: OutputFormat,
    },

    /// List document types and their sections
    Types {
        /// Show every section of each type
        #[arg(short, long)]
        verbose: bool,
    },

    /// Compute invoice totals from a JSON data file
    Invoice {
        /// JSON data file ("-" for stdin)
        #[arg(value_name = "DATA")]
        data: PathBuf,

        /// Currency symbol
        #[arg(long, default_value = "$")]
        currency: String,
    },

    /// Check a composition for unresolved interpolation markers
    Check {
        /// Document type
        #[arg(value_name = "TYPE")]
        document_type: String,

        /// JSON data file (empty object if omitted)
        #[arg(value_name = "DATA")]
        data: Option<PathBuf>,
    },

    /// Compose and save a document to the store
    Save {
        /// Numeric document id
        #[arg(value_name = "ID")]
        id: u64,

        /// Document type
        #[arg(value_name = "TYPE")]
        document_type: String,

        /// JSON data file ("-" for stdin)
        #[arg(value_name = "DATA")]
        data: Option<PathBuf>,

        /// Store directory
        #[arg(long, env = "DOCSMITH_STORE", default_value = ".docsmith")]
        store: PathBuf,
    },

    /// Show a stored document
    Show {
        /// Numeric document id (lists stored ids if omitted)
        #[arg(value_name = "ID")]
        id: Option<u64>,

        /// Store directory
        #[arg(long, env = "DOCSMITH_STORE", default_value = ".docsmith")]
        store: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "html")]
    format: OutputFormat,

    /// Use print layout (page breaks, A4 page box)
    #[arg(long)]
    print: bool,

    /// Render date (YYYY-MM-DD) used for date fallbacks
    #[arg(long, value_name = "DATE")]
    date: Option<String>,

    /// Currency symbol
    #[arg(long, default_value = "$")]
    currency: String,

    /// Date style
    #[arg(long, value_enum, default_value = "long")]
    date_style: DateStyleArg,

    /// Omit the stylesheet block
    #[arg(long)]
    no_style: bool,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,
}

impl RenderArgs {
    fn options(&self) -> Result<ComposeOptions, Box<dyn std::error::Error>> {
        let mut options = ComposeOptions::new()
            .with_currency_symbol(self.currency.as_str())
            .with_date_style(self.date_style.into())
            .with_stylesheet(!self.no_style)
            .with_lint(true);
        if self.print {
            options = options.for_print();
        }
        if let Some(ref date) = self.date {
            let today = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|e| format!("Invalid date '{}': {}", date, e))?;
            options = options.with_today(today);
        }
        Ok(options)
    }

    fn json_format(&self) -> JsonFormat {
        if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Full HTML markup
    Html,
    /// Plain text
    Text,
    /// JSON with every page
    Json,
    /// JSON page listing without bodies
    Pages,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Text => "txt",
            OutputFormat::Json | OutputFormat::Pages => "json",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum DateStyleArg {
    /// January 5, 2026
    Long,
    /// 01/05/2026
    Short,
    /// 2026-01-05
    Iso,
}

impl From<DateStyleArg> for DateStyle {
    fn from(style: DateStyleArg) -> Self {
        match style {
            DateStyleArg::Long => DateStyle::Long,
            DateStyleArg::Short => DateStyle::Short,
            DateStyleArg::Iso => DateStyle::Iso,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compose {
            document_type,
            data,
            output,
            render,
        } => cmd_compose(&document_type, data.as_deref(), output.as_deref(), &render),
        Commands::Batch {
            input,
            output,
            render,
        } => cmd_batch(&input, &output, &render),
        Commands::Defaults {
            document_type,
            output,
            format,
        } => cmd_defaults(&document_type, output.as_deref(), format),
        Commands::Types { verbose } => {
            cmd_types(verbose);
            Ok(())
        }
        Commands::Invoice { data, currency } => cmd_invoice(&data, &currency),
        Commands::Check {
            document_type,
            data,
        } => cmd_check(&document_type, data.as_deref()),
        Commands::Save {
            id,
            document_type,
            data,
            store,
        } => cmd_save(id, &document_type, data.as_deref(), &store),
        Commands::Show { id, store, format } => cmd_show(id, &store, format),
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

/// Read a data object from a file, stdin (`-`), or default to `{}`.
fn read_data(path: Option<&Path>) -> Result<Value, Box<dyn std::error::Error>> {
    match path {
        None => Ok(Value::Object(Default::default())),
        Some(p) if p == Path::new("-") => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            Ok(serde_json::from_str(&content)?)
        }
        Some(p) => Ok(docsmith::read_data(p)?),
    }
}

fn render_output(
    doc: &RenderedDocument,
    format: OutputFormat,
    json_format: JsonFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        OutputFormat::Html => doc.as_str().to_string(),
        OutputFormat::Text => render::to_text(doc),
        OutputFormat::Json => render::to_json(doc, json_format)?,
        OutputFormat::Pages => render::page_listing(doc, json_format)?,
    })
}

fn write_or_print(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_compose(
    document_type: &str,
    data: Option<&Path>,
    output: Option<&Path>,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_data(data)?;
    let options = args.options()?;
    let doc = docsmith::compose_with_options(document_type, &data, &options)?;
    let content = render_output(&doc, args.format, args.json_format())?;
    write_or_print(&content, output)
}

fn cmd_batch(
    input: &Path,
    output_dir: &Path,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(input)?;
    let requests: Vec<ComposeRequest> = serde_json::from_str(&content)?;
    let options = args.options()?;
    fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(requests.len() as u64 * 2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Composing...");
    let results = docsmith::compose_batch(&requests, &options);
    pb.inc(requests.len() as u64);

    pb.set_message("Writing...");
    let mut failed = Vec::new();
    for (index, (request, result)) in requests.iter().zip(results).enumerate() {
        match result {
            Ok(doc) => {
                let name = format!(
                    "{:03}-{}.{}",
                    index + 1,
                    doc.document_type,
                    args.format.extension()
                );
                let rendered = render_output(&doc, args.format, args.json_format())?;
                fs::write(output_dir.join(name), rendered)?;
            }
            Err(e) => failed.push(format!("#{} ({}): {}", index + 1, request.document_type, e)),
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} of {} documents written to {}",
        "Done!".green().bold(),
        requests.len() - failed.len(),
        requests.len(),
        output_dir.display()
    );
    for failure in &failed {
        println!("  {} {}", "✗".red(), failure);
    }
    if failed.is_empty() {
        Ok(())
    } else {
        Err(format!("{} documents failed", failed.len()).into())
    }
}

fn cmd_defaults(
    document_type: &str,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = docsmith::default_content(document_type)?;
    let content = render_output(doc, format, JsonFormat::Pretty)?;
    write_or_print(&content, output)
}

fn cmd_types(verbose: bool) {
    let registry = registry();

    println!("{}", "Document Types".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for document_type in registry.document_types() {
        let sections = registry.sections(document_type);
        println!(
            "{:<20} {} ({} sections)",
            document_type.as_str().bold(),
            document_type.display_name(),
            sections.len()
        );
        if verbose {
            let last = sections.len().saturating_sub(1);
            for (i, section) in sections.iter().enumerate() {
                let branch = if i == last { "└─" } else { "├─" };
                println!("  {} {:<28} {}", branch.dimmed(), section.as_str(), section.title());
            }
        }
    }
}

fn cmd_invoice(data: &Path, currency: &str) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_data(Some(data))?;
    let summary = invoice_from_data(&data)?;

    println!("{}", "Invoice Totals".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for line in &summary.items {
        let description = if line.item.description.is_empty() {
            "(no description)"
        } else {
            line.item.description.as_str()
        };
        println!(
            "{:>3}. {:<30} {:>14}",
            line.index + 1,
            description,
            format_currency(line.total, currency)
        );
    }

    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Subtotal".bold(), format_currency(summary.subtotal, currency));
    if let Some(rate) = summary.tax_rate {
        println!(
            "{} ({}%): {}",
            "Tax".bold(),
            rate.normalize(),
            format_currency(summary.tax, currency)
        );
    }
    println!(
        "{}: {}",
        "Amount due".green().bold(),
        format_currency(summary.grand_total, currency)
    );

    Ok(())
}

fn cmd_check(document_type: &str, data: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_data(data)?;
    let doc = docsmith::compose(document_type, &data)?;
    let markers = lint::unresolved_markers(doc.as_str());

    println!(
        "{}: {} ({} pages)",
        "Composed".bold(),
        doc.document_type.display_name(),
        doc.page_count()
    );

    if markers.is_empty() {
        println!("{}", "No unresolved markers".green());
        Ok(())
    } else {
        for marker in &markers {
            println!("  {} {}", "✗".red(), marker);
        }
        Err(format!("{} unresolved markers", markers.len()).into())
    }
}

fn cmd_save(
    id: u64,
    document_type: &str,
    data: Option<&Path>,
    store_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_data(data)?;
    let document_type = registry().lookup(document_type)?;
    let record = StoredDocument::compose(document_type, data, &ComposeOptions::default())?;

    let mut store = JsonFileStore::open(store_dir)?;
    store.set(id, record)?;

    println!(
        "{} {} #{} in {}",
        "Saved".green(),
        document_type.display_name(),
        id,
        store_dir.display()
    );
    Ok(())
}

fn cmd_show(
    id: Option<u64>,
    store_dir: &Path,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonFileStore::open(store_dir)?;

    let Some(id) = id else {
        println!("{}", "Stored Documents".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for id in store.ids()? {
            if let Some(record) = store.get(id)? {
                println!(
                    "{:>6}  {:<20} {}",
                    id,
                    record.document_type.as_str(),
                    record.updated_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
                );
            }
        }
        return Ok(());
    };

    let record = store
        .get(id)?
        .ok_or_else(|| format!("No document with id {} in {}", id, store_dir.display()))?;
    let content = render_output(&record.rendered, format, JsonFormat::Pretty)?;
    println!("{}", content);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docsmith".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document assembly tool");
    println!();
    println!("License: MIT");
}
