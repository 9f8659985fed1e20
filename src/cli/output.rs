//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, WisataArgs};
use crate::combine::SignalWeights;
use crate::dataset::DatasetCapabilities;
use crate::dataset::price::format_rupiah;
use crate::error::Result;
use crate::place::{Coordinates, Place, PlaceId};
use crate::recommend::SignalScores;

/// Results that can be rendered for a terminal.
pub trait HumanOutput {
    /// Write the human-readable form of `self` to `out`.
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Short view of a place used in lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub id: PlaceId,
    pub name: String,
    pub category: String,
    pub price: u64,
    pub rating: f64,
}

impl From<&Place> for PlaceSummary {
    fn from(place: &Place) -> Self {
        PlaceSummary {
            id: place.id.clone(),
            name: place.name.clone(),
            category: place.category.clone(),
            price: place.price,
            rating: place.rating,
        }
    }
}

/// One line of a recommendation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedPlace {
    pub rank: usize,
    #[serde(flatten)]
    pub place: PlaceSummary,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<SignalScores>,
}

/// Result structure for the `recommend` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub query: PlaceSummary,
    pub weights: SignalWeights,
    pub recommendations: Vec<RecommendedPlace>,
}

/// Result structure for the `show` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub id: PlaceId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: u64,
    pub price_display: String,
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<&Place> for PlaceDetails {
    fn from(place: &Place) -> Self {
        PlaceDetails {
            id: place.id.clone(),
            name: place.name.clone(),
            category: place.category.clone(),
            description: place.description.clone(),
            price: place.price,
            price_display: format_rupiah(place.price),
            rating: place.rating,
            coordinates: place.coordinates,
            image_url: place.image_url.clone(),
        }
    }
}

/// Result structure for the `list` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceListing {
    /// Places matching the filter.
    pub matched: usize,
    pub places: Vec<PlaceSummary>,
}

/// Number of places in one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub places: usize,
}

/// Result structure for the `stats` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStats {
    pub places: usize,
    pub version: String,
    pub categories: Vec<CategoryCount>,
    /// `None` when the descriptions yield no vocabulary, such as a
    /// single place or stop words only.
    pub vocabulary_size: Option<usize>,
    pub min_price: u64,
    pub max_price: u64,
    pub min_rating: f64,
    pub max_rating: f64,
    pub capabilities: DatasetCapabilities,
}

impl HumanOutput for RecommendationReport {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "Places similar to {} ({}, {})",
            self.query.name, self.query.category, self.query.id
        )?;
        writeln!(
            out,
            "Weights: description={} price={} rating={}",
            self.weights.description, self.weights.price, self.weights.rating
        )?;
        writeln!(out, "═══════════════")?;

        if self.recommendations.is_empty() {
            writeln!(out, "No matching places.")?;
            return Ok(());
        }

        for item in &self.recommendations {
            writeln!(out)?;
            writeln!(
                out,
                "{}. {} (Score: {:.3})",
                item.rank, item.place.name, item.score
            )?;
            writeln!(
                out,
                "   {} | {} | rating {:.1} | id {}",
                item.place.category,
                format_rupiah(item.place.price),
                item.place.rating,
                item.place.id
            )?;
            if let Some(breakdown) = &item.breakdown {
                let parts: Vec<String> = [
                    ("description", breakdown.description),
                    ("price", breakdown.price),
                    ("rating", breakdown.rating),
                ]
                .into_iter()
                .filter_map(|(name, score)| score.map(|s| format!("{name}={s:.3}")))
                .collect();
                writeln!(out, "   {}", parts.join(" "))?;
            }
        }
        Ok(())
    }
}

impl HumanOutput for PlaceDetails {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.name)?;
        writeln!(out, "─────────────")?;
        writeln!(out, "Id:          {}", self.id)?;
        writeln!(out, "Category:    {}", self.category)?;
        writeln!(out, "Price:       {}", self.price_display)?;
        writeln!(out, "Rating:      {:.1}", self.rating)?;
        if let Some(coordinates) = &self.coordinates {
            writeln!(
                out,
                "Location:    {:.5}, {:.5}",
                coordinates.latitude, coordinates.longitude
            )?;
        }
        if let Some(url) = &self.image_url {
            writeln!(out, "Image:       {url}")?;
        }
        writeln!(out)?;
        writeln!(out, "{}", self.description)
    }
}

impl HumanOutput for PlaceListing {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        for place in &self.places {
            writeln!(
                out,
                "{:>6}  {:<40} {:<16} {:>12}  {:.1}",
                place.id,
                place.name,
                place.category,
                format_rupiah(place.price),
                place.rating
            )?;
        }
        if self.places.len() < self.matched {
            writeln!(out, "... {} more", self.matched - self.places.len())?;
        }
        writeln!(out, "Total: {} places", self.matched)
    }
}

impl HumanOutput for DatasetStats {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Dataset Statistics:")?;
        writeln!(out, "═══════════════════")?;
        writeln!(out, "Places:          {}", self.places)?;
        writeln!(out, "Version:         {}", self.version)?;
        match self.vocabulary_size {
            Some(size) => writeln!(out, "Vocabulary size: {size}")?,
            None => writeln!(out, "Vocabulary size: n/a")?,
        }
        writeln!(
            out,
            "Price range:     {} - {}",
            format_rupiah(self.min_price),
            format_rupiah(self.max_price)
        )?;
        writeln!(
            out,
            "Rating range:    {:.1} - {:.1}",
            self.min_rating, self.max_rating
        )?;
        writeln!(
            out,
            "Coordinates:     {}",
            if self.capabilities.has_coordinates { "yes" } else { "no" }
        )?;
        writeln!(
            out,
            "Images:          {}",
            if self.capabilities.has_images { "yes" } else { "no" }
        )?;
        writeln!(out)?;
        writeln!(out, "Categories:")?;
        writeln!(out, "───────────")?;
        for category in &self.categories {
            writeln!(out, "  {:<20} {}", category.category, category.places)?;
        }
        Ok(())
    }
}

/// Print `result` to stdout in the format selected by `args`.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &WisataArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, result, args.output_format, args.pretty)
}

/// Write `result` to `out` in `format`.
pub fn write_result<T: Serialize + HumanOutput>(
    out: &mut dyn Write,
    result: &T,
    format: OutputFormat,
    pretty: bool,
) -> Result<()> {
    match format {
        OutputFormat::Human => result.write_human(out)?,
        OutputFormat::Json => {
            if pretty {
                serde_json::to_writer_pretty(&mut *out, result)?;
            } else {
                serde_json::to_writer(&mut *out, result)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}
