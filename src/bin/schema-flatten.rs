//! Schema Flatten CLI
//!
//! Command-line interface for flattening JSON Schema documents.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use schema_flatten::{flatten, load_schema_auto, FlattenOptions, Property, DEFAULT_ROOT_SEGMENT};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-flatten")]
#[command(about = "Flatten a JSON Schema into an inventory of its leaf fields")]
#[command(version)]
struct Cli {
    /// Schema source: file path or URL (http:// or https://)
    schema: String,

    /// Output file (stdout if not specified)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Reject documents that do not compile as JSON Schema
    #[arg(long)]
    check_schema: bool,

    /// Name of the first path segment
    #[arg(long, default_value = DEFAULT_ROOT_SEGMENT)]
    root: String,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run(cli: Cli) -> Result<(), u8> {
    let schema = load_schema_auto(&cli.schema).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let options = FlattenOptions::new()
        .root_segment(cli.root)
        .check_schema(cli.check_schema);
    let properties = flatten(&schema, &options).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let rendered = match cli.format {
        Format::Json => render_json(&properties, cli.pretty)?,
        Format::Text => render_text(&properties),
    };

    match cli.output {
        Some(path) => {
            std::fs::write(&path, &rendered).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", rendered);
        }
    }

    Ok(())
}

fn render_json(properties: &[Property], pretty: bool) -> Result<String, u8> {
    if pretty {
        serde_json::to_string_pretty(properties)
    } else {
        serde_json::to_string(properties)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })
}

/// One line per property: path, type, required flag, then any bounds.
fn render_text(properties: &[Property]) -> String {
    let width = properties.iter().map(|p| p.path.len()).max().unwrap_or(0);

    properties
        .iter()
        .map(|p| {
            let mut line = format!(
                "{:<width$}  {:<7}  {}",
                p.path,
                p.property_type,
                if p.required { "required" } else { "optional" },
                width = width
            );
            let bounds = [
                ("maximum", p.maximum),
                ("minimum", p.minimum),
                ("maxLength", p.max_length),
                ("minLength", p.min_length),
            ];
            for (name, value) in bounds {
                if let Some(v) = value {
                    line.push_str(&format!("  {}={}", name, v));
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
