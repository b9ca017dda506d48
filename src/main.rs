#![forbid(unsafe_code)]
//! # Chat Statistics CLI
//!
//! This is the command-line interface for the `chat_statistics` crate.
//! It reads a group-chat JSON export and produces a word-cloud image plus a
//! ranking of the participants who answer the most questions.
//!
//! ## Features
//! - Reply ranking with configurable top-N.
//! - Word cloud for right-to-left scripts (normalized, reshaped, reordered).
//! - Optional stopword list, normalized with the same rules as the chat text.
//! - Optional ranking export in multiple formats.
//!
//! ## Example
//! ```bash
//! cargo run --release -- export.json --stopwords stopwords.txt \
//!     --font NotoNaskhArabic-Regular.ttf --output-dir out --top-n 10
//! ```
//!
//! See `--help` for all available options.

use clap::Parser;
use env_logger;
use log::error;
use std::path::{Path, PathBuf};
use std::process;

use chat_statistics::{AnalysisConfig, ChatStatistics, ExportFormat, save_ranking};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Path to the exported chat JSON file
    chat: String,

    /// Optional path to a stopword file (.txt, one word per line)
    #[arg(long)]
    stopwords: Option<String>,

    /// Number of authors in the reply ranking
    #[arg(long, default_value_t = 10)]
    top_n: usize,

    /// Directory the word cloud (and any export) is written to
    #[arg(long, default_value = ".")]
    output_dir: String,

    /// Font file for the word cloud renderer
    #[arg(long, required_unless_present = "skip_cloud")]
    font: Option<String>,

    /// Skip the word cloud and only compute the reply ranking
    #[arg(long, default_value_t = false)]
    skip_cloud: bool,

    /// Additionally write the ranking to a timestamped file in the output directory
    #[arg(long, default_value_t = false)]
    export: bool,

    /// Format for the ranking export (txt, csv, json)
    #[arg(long, default_value = "txt")]
    export_format: ExportFormat,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = AnalysisConfig::new(cli.font.clone().unwrap_or_default());
    let config = match &cli.stopwords {
        Some(path) => match config.with_stopword_file(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                error!("Error: {}", e);
                process::exit(1);
            }
        },
        None => config,
    };

    let mut stats = match ChatStatistics::from_file(Path::new(&cli.chat), config) {
        Ok(stats) => stats,
        Err(e) => {
            error!("Error: {}", e);
            process::exit(1);
        }
    };

    let output_dir = PathBuf::from(&cli.output_dir);

    if !cli.skip_cloud {
        // Cloud first: it only sees messages whose text is still a flat string,
        // while the ranking pass below flattens everything in place.
        match stats.generate_word_cloud(&output_dir) {
            Ok(path) => println!("Word cloud written to {}", path.display()),
            Err(e) => {
                error!("Error: {}", e);
                process::exit(1);
            }
        }
    }

    match stats.top_repliers(cli.top_n) {
        Ok(ranking) => {
            for entry in &ranking {
                println!("{}: {}", entry.author, entry.count);
            }
            if cli.export {
                match save_ranking(&ranking, cli.export_format, output_dir) {
                    Ok(path) => println!("Ranking exported to {}", path.display()),
                    Err(e) => {
                        error!("Error: {}", e);
                        process::exit(1);
                    }
                }
            }
        }
        Err(e) => {
            error!("Error: {}", e);
            process::exit(1);
        }
    }
}
