//! Command implementations for the Wisata CLI.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::WisataConfig;
use crate::dataset::Dataset;
use crate::dataset::csv::CsvPlaceLoader;
use crate::error::{Result, WisataError};
use crate::index::build_index_with_config;
use crate::recommend::{recommend, recommend_filtered};
use crate::vectorize::tfidf::TfidfVectorizer;

/// Execute a CLI command.
pub fn execute_command(args: WisataArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Recommend(recommend_args) => recommend_places(recommend_args, &config, &args),
        Command::Show(show_args) => show_place(show_args, &config, &args),
        Command::List(list_args) => list_places(list_args, &config, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &config, &args),
    }
}

fn load_config(args: &WisataArgs) -> Result<WisataConfig> {
    match &args.config {
        Some(path) => WisataConfig::from_path(path),
        None => Ok(WisataConfig::default()),
    }
}

/// Load the dataset named on the command line or in the configuration.
fn load_dataset(path: Option<&Path>, config: &WisataConfig) -> Result<Dataset> {
    let path: PathBuf = path
        .map(Path::to_path_buf)
        .or_else(|| config.dataset.path.clone())
        .ok_or_else(|| {
            WisataError::invalid_argument(
                "no dataset given; pass DATASET or set dataset.path in the configuration",
            )
        })?;

    CsvPlaceLoader::new()
        .with_delimiter(config.dataset.delimiter)?
        .load_path(&path)
}

/// Recommend places similar to a place.
fn recommend_places(
    args: &RecommendArgs,
    config: &WisataConfig,
    cli_args: &WisataArgs,
) -> Result<()> {
    let dataset = Arc::new(load_dataset(args.dataset.as_deref(), config)?);
    let query = PlaceSummary::from(
        dataset
            .get(&args.place)
            .ok_or_else(|| WisataError::unknown_place(args.place.as_str()))?,
    );

    let weights = args.weights(&config.weights);
    let top_n = args.top_n.unwrap_or(config.top_n);
    let index = build_index_with_config(Arc::clone(&dataset), weights, &config.vectorizer)?;

    let filter = args.filter.to_filter();
    let recommendations = if filter.is_empty() {
        recommend(&index, &args.place, top_n)?
    } else {
        recommend_filtered(&index, &args.place, top_n, &filter)?
    };

    let mut ranked = Vec::with_capacity(recommendations.len());
    for (rank, recommendation) in recommendations.into_iter().enumerate() {
        let place = dataset
            .get(recommendation.place_id.as_str())
            .ok_or_else(|| WisataError::unknown_place(&recommendation.place_id))?;
        ranked.push(RecommendedPlace {
            rank: rank + 1,
            place: place.into(),
            score: recommendation.score,
            breakdown: args.explain.then_some(recommendation.breakdown),
        });
    }

    output_result(
        &RecommendationReport {
            query,
            weights,
            recommendations: ranked,
        },
        cli_args,
    )
}

/// Show a single place.
fn show_place(args: &ShowArgs, config: &WisataConfig, cli_args: &WisataArgs) -> Result<()> {
    let dataset = load_dataset(args.dataset.as_deref(), config)?;
    let place = dataset
        .get(&args.place)
        .ok_or_else(|| WisataError::unknown_place(args.place.as_str()))?;

    output_result(&PlaceDetails::from(place), cli_args)
}

/// List places that pass the filters.
fn list_places(args: &ListArgs, config: &WisataConfig, cli_args: &WisataArgs) -> Result<()> {
    let dataset = load_dataset(args.dataset.as_deref(), config)?;
    let matched = args.filter.to_filter().apply(&dataset);
    let limit = args.limit.unwrap_or(matched.len());

    let listing = PlaceListing {
        matched: matched.len(),
        places: matched.into_iter().take(limit).map(PlaceSummary::from).collect(),
    };
    output_result(&listing, cli_args)
}

/// Show dataset statistics.
fn show_stats(args: &StatsArgs, config: &WisataConfig, cli_args: &WisataArgs) -> Result<()> {
    let dataset = load_dataset(args.dataset.as_deref(), config)?;
    output_result(&dataset_stats(&dataset, config)?, cli_args)
}

fn dataset_stats(dataset: &Dataset, config: &WisataConfig) -> Result<DatasetStats> {
    let vocabulary_size = match TfidfVectorizer::with_config(config.vectorizer.clone())?
        .fit_transform(&dataset.descriptions())
    {
        Ok(features) => Some(features.n_terms()),
        Err(WisataError::EmptyVocabulary(reason)) => {
            log::warn!("no description vocabulary: {reason}");
            None
        }
        Err(e) => return Err(e),
    };

    let categories = dataset
        .categories()
        .into_iter()
        .map(|category| CategoryCount {
            category: category.to_string(),
            places: dataset
                .places()
                .iter()
                .filter(|p| p.category == category)
                .count(),
        })
        .collect();

    let places = dataset.places();
    Ok(DatasetStats {
        places: dataset.len(),
        version: format!("{:#018x}", dataset.version()),
        categories,
        vocabulary_size,
        min_price: places.iter().map(|p| p.price).min().unwrap_or(0),
        max_price: places.iter().map(|p| p.price).max().unwrap_or(0),
        min_rating: places.iter().map(|p| p.rating).fold(f64::INFINITY, f64::min),
        max_rating: places.iter().map(|p| p.rating).fold(0.0, f64::max),
        capabilities: dataset.capabilities(),
    })
}
