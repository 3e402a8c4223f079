//! gutindex CLI - catalog index to JSON conversion tool

mod fetch;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use gutindex::{Catalog, JsonFormat, ParseOptions, SectionSelection};

use crate::fetch::{fetch_catalog, is_url};

#[derive(Parser)]
#[command(name = "gutindex")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert plain-text eBook catalog indexes to JSON", long_about = None)]
struct Cli {
    /// Input catalog file or URL
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Output JSON file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a catalog to a JSON array of records
    Json {
        /// Input catalog file or URL
        #[arg(value_name = "INPUT")]
        input: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Section range (e.g., "2-10", "1,3,5")
        #[arg(long)]
        sections: Option<String>,

        /// Parse sections one after another
        #[arg(long)]
        sequential: bool,

        /// Include parse statistics alongside the records
        #[arg(long)]
        stats: bool,
    },

    /// Download a catalog and convert it to JSON
    Fetch {
        /// Catalog URL
        #[arg(value_name = "URL", env = "GUTINDEX_URL")]
        url: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also save the downloaded text
        #[arg(long, value_name = "FILE")]
        save_text: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show catalog information
    Info {
        /// Input catalog file or URL
        #[arg(value_name = "INPUT")]
        input: String,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Json {
            input,
            output,
            compact,
            sections,
            sequential,
            stats,
        }) => cmd_json(
            &input,
            output.as_deref(),
            compact,
            sections.as_deref(),
            sequential,
            stats,
        ),
        Some(Commands::Fetch {
            url,
            output,
            save_text,
            compact,
        }) => cmd_fetch(&url, output.as_deref(), save_text.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_json(&input, cli.output.as_deref(), false, None, false, false)
            } else {
                println!("{}", "Usage: gutindex <INPUT> [OUTPUT]".yellow());
                println!("       gutindex --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read catalog text from a local file or a URL.
fn load_text(input: &str) -> Result<String, Box<dyn std::error::Error>> {
    if is_url(input) {
        fetch_catalog(input)
    } else {
        let data = fs::read(input)?;
        Ok(gutindex::decode_bytes(&data)?)
    }
}

fn write_output(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_json(
    input: &str,
    output: Option<&Path>,
    compact: bool,
    sections: Option<&str>,
    sequential: bool,
    stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let selection = match sections {
        Some(s) => SectionSelection::parse(s)?,
        None => SectionSelection::All,
    };
    let options = ParseOptions::new()
        .with_parallel(!sequential)
        .with_sections(selection);

    let text = load_text(input)?;
    let catalog = gutindex::parse_str_with_options(&text, options)?;

    let format = json_format(compact);
    let json = if stats {
        gutindex::render::catalog_to_json(&catalog, format)?
    } else {
        gutindex::render::to_json(&catalog.records, format)?
    };

    write_output(&json, output)
}

fn cmd_fetch(
    url: &str,
    output: Option<&Path>,
    save_text: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = fetch_catalog(url)?;

    if let Some(path) = save_text {
        fs::write(path, gutindex::normalize_line_endings(&text))?;
        eprintln!("{} {}", "Saved catalog text to".green(), path.display());
    }

    let catalog = gutindex::parse_str(&text)?;
    let json = gutindex::render::to_json(&catalog.records, json_format(compact))?;

    write_output(&json, output)
}

fn cmd_info(input: &str) -> Result<(), Box<dyn std::error::Error>> {
    let text = load_text(input)?;
    let format = gutindex::detect_format(&text)?;
    let catalog = gutindex::parse_str(&text)?;
    let stats = &catalog.stats;

    println!("{}", "Catalog Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Source".bold(), input);
    println!("{}: {}", "Dated sections".bold(), format.divider_count);
    println!(
        "{}: {}",
        "Line endings".bold(),
        if format.crlf { "CRLF" } else { "LF" }
    );

    println!();
    println!("{}", "Parse Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Records".bold(), stats.record_count);
    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!("{}: {}", "Undated sections".bold(), stats.undated_sections);
    println!("{}: {}", "Unresolved months".bold(), stats.unresolved_months);
    println!("{}: {}", "Discarded blocks".bold(), stats.discarded_blocks());
    println!("  {} noise: {}", "├─".dimmed(), stats.noise_blocks);
    println!("  {} no title: {}", "├─".dimmed(), stats.untitled_blocks);
    println!("  {} no number: {}", "└─".dimmed(), stats.unidentified_blocks);

    let languages = count_by(&catalog, |r| r.language().map(str::to_string));
    if !languages.is_empty() {
        println!();
        println!("{}", "Languages".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (language, count) in &languages {
            println!("{}: {}", language.bold(), count);
        }
    }

    let months = count_by(&catalog, |r| r.year_month.map(|ym| ym.to_string()));
    if !months.is_empty() {
        println!();
        println!("{}", "Records per Month".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (month, count) in &months {
            println!("{}: {}", month.bold(), count);
        }
    }

    Ok(())
}

/// Count records by a derived key, skipping records without one.
fn count_by<F>(catalog: &Catalog, key: F) -> BTreeMap<String, usize>
where
    F: Fn(&gutindex::Record) -> Option<String>,
{
    let mut counts = BTreeMap::new();
    for record in catalog {
        if let Some(k) = key(record) {
            *counts.entry(k).or_insert(0) += 1;
        }
    }
    counts
}

fn cmd_version() {
    println!("{} {}", "gutindex".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("eBook catalog index to JSON conversion tool");
    println!();
    println!("License: MIT");
}
