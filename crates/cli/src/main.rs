mod echo;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, bail};
use clap::{ArgGroup, Parser};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use url::Url;
use wikitable_core::{FetchConfig, ScrapeConfig, TableScraper, fetch_file, fetch_stdin, fetch_url};

use echo::{
    format_size, print_banner, print_detail, print_error, print_info, print_step, print_success, print_timing,
    print_warning,
};

pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Scrape the tables of a Wikipedia page into CSV
#[derive(Parser, Debug)]
#[command(name = "wikitable")]
#[command(author = "wikitable contributors")]
#[command(version)]
#[command(about = "Scrape tables from Wikipedia pages into CSV", long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["output_folder", "title", "list"])))]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Write every table as a CSV file into this folder
    #[arg(long, value_name = "DIR")]
    output_folder: Option<PathBuf>,

    /// Write the single table whose title matches this text
    #[arg(long, visible_alias = "header", value_name = "TEXT")]
    title: Option<String>,

    /// Print a JSON summary of every table
    #[arg(long)]
    list: bool,

    /// Output file for --title (default: stdout)
    #[arg(short, long, value_name = "FILE", requires = "title")]
    output: Option<PathBuf>,

    /// Text that replaces line breaks (<br>) inside cells
    #[arg(long, default_value = " ", value_name = "TEXT")]
    newline_replace: String,

    /// Maximum length of generated file names, without ".csv"
    #[arg(long, default_value = "250", value_name = "NUM")]
    max_filename_len: usize,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn is_url(input: &str) -> bool {
    Url::parse(input).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

async fn read_input(args: &Args) -> anyhow::Result<String> {
    if args.input == "-" {
        if args.verbose {
            print_step(1, 3, "Reading from stdin");
        }
        return fetch_stdin().context("Failed to read from stdin");
    }

    if is_url(&args.input) {
        if args.verbose {
            print_step(1, 3, &format!("Fetching from {}", args.input.bright_white().underline()));
        }

        let mut config = FetchConfig { timeout: args.timeout, ..Default::default() };
        if let Some(ua) = &args.user_agent {
            config.user_agent = ua.clone();
        }

        return fetch_url(&args.input, &config)
            .await
            .with_context(|| format!("Failed to fetch URL: {}", args.input));
    }

    if args.verbose {
        print_step(1, 3, &format!("Reading from file {}", args.input.bright_white()));
    }
    fetch_file(&args.input).with_context(|| format!("Failed to read file: {}", args.input))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let started = Instant::now();
    let html = read_input(&args).await?;

    if args.verbose {
        print_detail("Size", &format_size(html.len()));
        eprintln!();
        print_step(2, 3, "Locating tables");
    }

    let config = ScrapeConfig::builder()
        .line_break(args.newline_replace.clone())
        .max_filename_len(args.max_filename_len)
        .build();
    let scraper = TableScraper::with_config(&html, config).context("Failed to parse HTML")?;

    let tables = scraper.tables();
    if args.verbose {
        print_detail("Tables", &tables.len().to_string());
        eprintln!();
        print_step(3, 3, "Writing output");
    }
    if tables.is_empty() {
        print_warning(&format!("No tables with data rows found in {}", args.input));
    }

    if args.list {
        let summaries = scraper.summaries();
        println!("{}", serde_json::to_string_pretty(&summaries)?);

        let failed: Vec<_> = summaries.iter().filter(|summary| !summary.is_ok()).collect();
        for summary in &failed {
            print_error(&format!(
                "Table {} could not be rebuilt: {}",
                summary.index,
                summary.error.as_deref().unwrap_or_default()
            ));
        }
        if !failed.is_empty() {
            bail!("{} of {} tables could not be rebuilt", failed.len(), summaries.len());
        }
    } else if let Some(search) = &args.title {
        let table = scraper
            .find_table_by_title(search)
            .with_context(|| format!("Failed to select a table from {}", args.input))?;

        match &args.output {
            Some(path) => {
                let file = File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))?;
                scraper
                    .write_table(&table, BufWriter::new(file))
                    .with_context(|| format!("Failed to write table {}", table.index()))?;
                print_success(&format!("Table written to {}", path.display().bright_white()));
            }
            None => {
                scraper
                    .write_table(&table, io::stdout().lock())
                    .with_context(|| format!("Failed to write table {}", table.index()))?;
            }
        }
    } else if let Some(dir) = &args.output_folder {
        let outcomes = scraper
            .write_to_dir(dir)
            .with_context(|| format!("Failed to write tables into {}", dir.display()))?;

        let mut failed = 0;
        for outcome in &outcomes {
            match &outcome.result {
                Ok(rows) => print_success(&format!("{} ({} rows)", outcome.path.display(), rows)),
                Err(e) => {
                    failed += 1;
                    print_error(&format!("Table {} not written: {}", outcome.index, e));
                }
            }
        }

        if failed > 0 {
            bail!("{} of {} tables could not be written", failed, outcomes.len());
        }
    }

    if args.verbose {
        eprintln!();
        print_timing("Total", started.elapsed());
    }

    Ok(())
}
