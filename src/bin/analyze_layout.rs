//! Analyze the panel layout of a document dump
//!
//! Reads a JSON page dump (page geometry plus text runs per page) and prints
//! the inferred panel layouts and section headers as JSON.
//!
//! Usage:
//!   cargo run --release --bin analyze_layout -- dump.json
//!   cargo run --release --bin analyze_layout -- dump.json --threads 4 --pretty
//!   cargo run --release --bin analyze_layout -- dump.json --sequential --sections-only
//!
//! Set `RUST_LOG=debug` to see per-page break decisions.

use pdf_panels::engine::InMemoryDocument;
use pdf_panels::pipeline::{AnalysisConfig, Parallelism, analyze_document};
use std::path::PathBuf;

const USAGE: &str =
    "Usage: analyze_layout <dump.json> [--sequential] [--threads N] [--sections-only] [--pretty]";

struct CliConfig {
    input: PathBuf,
    parallelism: Parallelism,
    sections_only: bool,
    pretty: bool,
}

impl CliConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut parallelism = Parallelism::default();
        let mut sections_only = false;
        let mut pretty = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--sequential" => {
                    parallelism = Parallelism::Sequential;
                },
                "--threads" => {
                    i += 1;
                    let count = args
                        .get(i)
                        .and_then(|n| n.parse::<usize>().ok())
                        .ok_or_else(|| "--threads expects a number".to_string())?;
                    parallelism = Parallelism::Threads(count);
                },
                "--sections-only" => {
                    sections_only = true;
                },
                "--pretty" => {
                    pretty = true;
                },
                "--help" | "-h" => {
                    return Err(USAGE.to_string());
                },
                other if other.starts_with("--") => {
                    return Err(format!("Unknown option: {}", other));
                },
                path => {
                    input = Some(PathBuf::from(path));
                },
            }
            i += 1;
        }

        Ok(Self {
            input: input.ok_or_else(|| USAGE.to_string())?,
            parallelism,
            sections_only,
            pretty,
        })
    }
}

fn run(cli: &CliConfig) -> Result<String, Box<dyn std::error::Error>> {
    let doc = InMemoryDocument::from_path(&cli.input)?;
    let config = AnalysisConfig {
        parallelism: cli.parallelism,
        ..AnalysisConfig::default()
    };
    let structure = analyze_document(&doc, &config)?;

    let json = match (cli.sections_only, cli.pretty) {
        (true, true) => serde_json::to_string_pretty(&structure.sections)?,
        (true, false) => serde_json::to_string(&structure.sections)?,
        (false, true) => serde_json::to_string_pretty(&structure)?,
        (false, false) => serde_json::to_string(&structure)?,
    };
    Ok(json)
}

fn main() {
    env_logger::init();

    let cli = match CliConfig::from_args() {
        Ok(cli) => cli,
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(2);
        },
    };

    match run(&cli) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error analyzing {}: {}", cli.input.display(), e);
            std::process::exit(1);
        },
    }
}
