//! CSV dataset loader.
//!
//! The first row is the header. Required columns:
//!
//! ```csv
//! Place_Id,Place_Name,Category,Description,Price,Rating
//! 1,Candi Prambanan,Budaya,Hindu temple compound,Rp 50.000,4.7
//! ```
//!
//! `Latitude`, `Longitude` and `Image_URL` are optional. A place gets
//! coordinates only when both columns are present and both cells parse on
//! its row; an unparsable optional cell is logged and ignored. A missing or
//! unparsable required cell fails the whole load with the row number.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ::csv::{ReaderBuilder, StringRecord, Trim};

use crate::dataset::Dataset;
use crate::dataset::price::parse_rupiah;
use crate::error::{Result, WisataError};
use crate::place::{Coordinates, Place};

const PLACE_ID: &str = "Place_Id";
const PLACE_NAME: &str = "Place_Name";
const CATEGORY: &str = "Category";
const DESCRIPTION: &str = "Description";
const PRICE: &str = "Price";
const RATING: &str = "Rating";
const LATITUDE: &str = "Latitude";
const LONGITUDE: &str = "Longitude";
const IMAGE_URL: &str = "Image_URL";

/// Loads a [`Dataset`] from CSV.
///
/// # Examples
///
/// ```
/// use wisata::dataset::csv::CsvPlaceLoader;
///
/// let data = "\
/// Place_Id,Place_Name,Category,Description,Price,Rating
/// 1,Candi Sewu,Budaya,buddhist temple complex,Rp 10.000,4.6
/// 2,Hutan Pinus Mangunan,Cagar Alam,pine forest on a hill,Rp 5.000,4.5
/// ";
///
/// let dataset = CsvPlaceLoader::new().load_str(data).unwrap();
/// assert_eq!(dataset.len(), 2);
/// assert_eq!(dataset.get("1").unwrap().price, 10000);
/// ```
#[derive(Debug, Clone)]
pub struct CsvPlaceLoader {
    /// CSV delimiter character (default: ',')
    delimiter: u8,
}

impl Default for CsvPlaceLoader {
    fn default() -> Self {
        Self::new()
    }
}

struct Columns {
    id: usize,
    name: usize,
    category: usize,
    description: usize,
    price: usize,
    rating: usize,
    latitude: Option<usize>,
    longitude: Option<usize>,
    image_url: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| WisataError::parse(format!("missing CSV column '{name}'")))
        };

        Ok(Columns {
            id: require(PLACE_ID)?,
            name: require(PLACE_NAME)?,
            category: require(CATEGORY)?,
            description: require(DESCRIPTION)?,
            price: require(PRICE)?,
            rating: require(RATING)?,
            latitude: find(LATITUDE),
            longitude: find(LONGITUDE),
            image_url: find(IMAGE_URL),
        })
    }
}

fn required<'r>(record: &'r StringRecord, column: usize, name: &str, row: usize) -> Result<&'r str> {
    match record.get(column) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(WisataError::parse(format!(
            "row {row}: missing value for '{name}'"
        ))),
    }
}

impl CsvPlaceLoader {
    /// Create a new loader with comma delimiter.
    pub fn new() -> Self {
        CsvPlaceLoader { delimiter: b',' }
    }

    /// Set a custom delimiter character.
    ///
    /// The CSV reader splits on single bytes, so only ASCII characters are
    /// accepted.
    pub fn with_delimiter(mut self, delimiter: char) -> Result<Self> {
        if !delimiter.is_ascii() {
            return Err(WisataError::invalid_argument(format!(
                "delimiter must be an ASCII character, got '{delimiter}'"
            )));
        }
        self.delimiter = delimiter as u8;
        Ok(self)
    }

    /// Load a dataset from a CSV file.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let dataset = self.load_reader(file)?;
        log::info!(
            "loaded {} places from {} (version {:#x})",
            dataset.len(),
            path.display(),
            dataset.version()
        );
        Ok(dataset)
    }

    /// Load a dataset from CSV text.
    pub fn load_str(&self, data: &str) -> Result<Dataset> {
        self.load_reader(data.as_bytes())
    }

    /// Load a dataset from any reader.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let columns = Columns::from_headers(&headers)?;

        let mut places = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record?;
            places.push(self.parse_record(&record, &columns, index + 1)?);
        }

        Dataset::new(places)
    }

    fn parse_record(&self, record: &StringRecord, columns: &Columns, row: usize) -> Result<Place> {
        let price = parse_rupiah(required(record, columns.price, PRICE, row)?)
            .map_err(|e| WisataError::parse(format!("row {row}: {e}")))?;
        let rating_text = required(record, columns.rating, RATING, row)?;
        let rating = rating_text.parse::<f64>().map_err(|e| {
            WisataError::parse(format!("row {row}: invalid rating '{rating_text}': {e}"))
        })?;

        let mut place = Place::new(
            required(record, columns.id, PLACE_ID, row)?,
            required(record, columns.name, PLACE_NAME, row)?,
            required(record, columns.category, CATEGORY, row)?,
            required(record, columns.description, DESCRIPTION, row)?,
            price,
            rating,
        );
        place.coordinates = Self::parse_coordinates(record, columns, row);
        place.image_url = columns
            .image_url
            .and_then(|column| record.get(column))
            .filter(|url| !url.is_empty())
            .map(str::to_string);

        Ok(place)
    }

    fn parse_coordinates(record: &StringRecord, columns: &Columns, row: usize) -> Option<Coordinates> {
        let latitude = record.get(columns.latitude?)?;
        let longitude = record.get(columns.longitude?)?;
        if latitude.is_empty() || longitude.is_empty() {
            return None;
        }

        match (latitude.parse::<f64>(), longitude.parse::<f64>()) {
            (Ok(latitude), Ok(longitude)) if latitude.is_finite() && longitude.is_finite() => {
                Some(Coordinates {
                    latitude,
                    longitude,
                })
            }
            _ => {
                log::warn!("row {row}: ignoring unparsable coordinates '{latitude}', '{longitude}'");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const FULL: &str = "\
Place_Id,Place_Name,Description,Category,Price,Rating,Latitude,Longitude,Image_URL
1,Candi Prambanan,hindu temple compound,Budaya,Rp 50.000,4.7,-7.752,110.491,https://img/1.jpg
2,Pantai Parangtritis,black sand beach,Bahari,\"Rp 10,000\",4.4,,,
3,Taman Sari,royal water garden,Budaya,Rp 15.000,4.6,not-a-number,110.359,
";

    #[test]
    fn test_load_with_optional_columns() {
        let dataset = CsvPlaceLoader::new().load_str(FULL).unwrap();
        assert_eq!(dataset.len(), 3);

        let prambanan = dataset.get("1").unwrap();
        assert_eq!(prambanan.category, "Budaya");
        assert_eq!(prambanan.price, 50000);
        assert_eq!(prambanan.image_url.as_deref(), Some("https://img/1.jpg"));
        assert_eq!(
            prambanan.coordinates,
            Some(Coordinates {
                latitude: -7.752,
                longitude: 110.491
            })
        );

        let parangtritis = dataset.get("2").unwrap();
        assert_eq!(parangtritis.price, 10000);
        assert!(parangtritis.coordinates.is_none());
        assert!(parangtritis.image_url.is_none());

        // Unparsable coordinates degrade to none.
        assert!(dataset.get("3").unwrap().coordinates.is_none());

        let capabilities = dataset.capabilities();
        assert!(capabilities.has_coordinates);
        assert!(capabilities.has_images);
    }

    #[test]
    fn test_load_without_optional_columns() {
        let data = "\
Place_Id,Place_Name,Category,Description,Price,Rating
1,Goa Pindul,Cagar Alam,cave tubing river,Rp 45.000,4.5
";
        let dataset = CsvPlaceLoader::new().load_str(data).unwrap();
        assert!(!dataset.capabilities().has_coordinates);
        assert!(!dataset.capabilities().has_images);
    }

    #[test]
    fn test_missing_required_column() {
        let data = "Place_Id,Place_Name,Category,Description,Rating\n1,A,B,C,4.0\n";
        let err = CsvPlaceLoader::new().load_str(data).unwrap_err();
        assert!(err.to_string().contains("Price"));
    }

    #[test]
    fn test_missing_price_is_rejected() {
        let data = "\
Place_Id,Place_Name,Category,Description,Price,Rating
1,Goa Pindul,Cagar Alam,cave tubing,,4.5
";
        let err = CsvPlaceLoader::new().load_str(data).unwrap_err();
        assert!(matches!(err, WisataError::Parse(_)));
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_bad_rating_is_rejected() {
        let data = "\
Place_Id,Place_Name,Category,Description,Price,Rating
1,Goa Pindul,Cagar Alam,cave tubing,Rp 1.000,great
";
        assert!(matches!(
            CsvPlaceLoader::new().load_str(data),
            Err(WisataError::Parse(_))
        ));
    }

    #[test]
    fn test_custom_delimiter_and_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "Place_Id;Place_Name;Category;Description;Price;Rating\n\
             1;Malioboro;Belanja;shopping street;Rp 0;4.7\n\
             2;Kebun Binatang Gembira Loka;Taman Hiburan;city zoo;Rp 60.000;4.5\n"
        )
        .unwrap();

        let dataset = CsvPlaceLoader::new()
            .with_delimiter(';')
            .unwrap()
            .load_path(file.path())
            .unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get("1").unwrap().price, 0);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        // U+00A6 fits in a byte but is not ASCII.
        assert!(matches!(
            CsvPlaceLoader::new().with_delimiter('¦'),
            Err(WisataError::InvalidArgument(_))
        ));
        assert!(matches!(
            CsvPlaceLoader::new().with_delimiter('、'),
            Err(WisataError::InvalidArgument(_))
        ));
        assert!(CsvPlaceLoader::new().with_delimiter('\t').is_ok());
    }

    #[test]
    fn test_missing_file() {
        let result = CsvPlaceLoader::new().load_path("/nonexistent/places.csv");
        assert!(matches!(result, Err(WisataError::Io(_))));
    }
}
