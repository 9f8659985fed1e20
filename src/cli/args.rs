//! Command line argument parsing for the Wisata CLI using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::combine::SignalWeights;
use crate::dataset::filter::PlaceFilter;

/// Wisata - content-based tourist destination recommender
#[derive(Parser, Debug, Clone)]
#[command(name = "wisata")]
#[command(about = "Recommend tourist destinations similar to a chosen place")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct WisataArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "WISATA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl WisataArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Recommend places similar to a place
    Recommend(RecommendArgs),

    /// Show a single place
    Show(ShowArgs),

    /// List places, optionally filtered
    List(ListArgs),

    /// Show dataset statistics
    Stats(StatsArgs),
}

/// Display filters shared by `recommend` and `list`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only places in this category (case-insensitive)
    #[arg(long)]
    pub category: Option<String>,

    /// Minimum rating
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Minimum price in Rupiah
    #[arg(long)]
    pub min_price: Option<u64>,

    /// Maximum price in Rupiah
    #[arg(long)]
    pub max_price: Option<u64>,

    /// Text that must appear in the name or description
    #[arg(short, long)]
    pub search: Option<String>,
}

impl FilterArgs {
    /// Convert into a [`PlaceFilter`].
    pub fn to_filter(&self) -> PlaceFilter {
        PlaceFilter {
            category: self.category.clone(),
            min_rating: self.min_rating,
            min_price: self.min_price,
            max_price: self.max_price,
            search: self.search.clone(),
        }
    }
}

/// Arguments for recommending places
#[derive(Parser, Debug, Clone)]
pub struct RecommendArgs {
    /// Dataset CSV file (falls back to `dataset.path` in the config)
    #[arg(value_name = "DATASET")]
    pub dataset: Option<PathBuf>,

    /// Id of the place to find similar places for
    #[arg(short, long, value_name = "PLACE_ID")]
    pub place: String,

    /// Number of recommendations (default from config, else 5)
    #[arg(short = 'n', long)]
    pub top_n: Option<usize>,

    /// Weight of the description signal
    #[arg(long = "w-desc")]
    pub description_weight: Option<f64>,

    /// Weight of the price signal
    #[arg(long = "w-price")]
    pub price_weight: Option<f64>,

    /// Weight of the rating signal
    #[arg(long = "w-rating")]
    pub rating_weight: Option<f64>,

    /// Include the per-signal breakdown in the output
    #[arg(long)]
    pub explain: bool,

    #[command(flatten)]
    pub filter: FilterArgs,
}

impl RecommendArgs {
    /// Weights from the command line, falling back to `base` per signal.
    pub fn weights(&self, base: &SignalWeights) -> SignalWeights {
        SignalWeights::new(
            self.description_weight.unwrap_or(base.description),
            self.price_weight.unwrap_or(base.price),
            self.rating_weight.unwrap_or(base.rating),
        )
    }
}

/// Arguments for showing a place
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Dataset CSV file (falls back to `dataset.path` in the config)
    #[arg(value_name = "DATASET")]
    pub dataset: Option<PathBuf>,

    /// Id of the place
    #[arg(short, long, value_name = "PLACE_ID")]
    pub place: String,
}

/// Arguments for listing places
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Dataset CSV file (falls back to `dataset.path` in the config)
    #[arg(value_name = "DATASET")]
    pub dataset: Option<PathBuf>,

    /// Maximum number of places to print
    #[arg(short, long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Arguments for dataset statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Dataset CSV file (falls back to `dataset.path` in the config)
    #[arg(value_name = "DATASET")]
    pub dataset: Option<PathBuf>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
