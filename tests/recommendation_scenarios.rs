//! End-to-end recommendation scenarios over small datasets.

use std::io::Write;
use std::sync::Arc;

use wisata::combine::{Signal, SignalWeights};
use wisata::dataset::Dataset;
use wisata::dataset::csv::CsvPlaceLoader;
use wisata::dataset::filter::PlaceFilter;
use wisata::error::WisataError;
use wisata::index::build_index;
use wisata::index::cache::IndexCache;
use wisata::place::Place;
use wisata::recommend::{recommend, recommend_filtered};

fn temples() -> Arc<Dataset> {
    Arc::new(
        Dataset::new(vec![
            Place::new("A", "Place A", "Budaya", "old temple ruins", 10000, 5.0),
            Place::new("B", "Place B", "Budaya", "ancient temple site", 10000, 5.0),
            Place::new("C", "Place C", "Belanja", "modern shopping mall", 10000, 5.0),
        ])
        .unwrap(),
    )
}

fn yogyakarta() -> Arc<Dataset> {
    Arc::new(
        Dataset::new(vec![
            Place::new("1", "Candi Prambanan", "Budaya", "hindu temple compound with tall shrines", 50000, 4.7),
            Place::new("2", "Candi Sewu", "Budaya", "buddhist temple compound near prambanan", 10000, 4.6),
            Place::new("3", "Candi Ratu Boko", "Budaya", "hilltop palace ruins with sunset views", 40000, 4.6),
            Place::new("4", "Pantai Parangtritis", "Bahari", "black sand beach with strong waves", 10000, 4.4),
            Place::new("5", "Pantai Indrayanti", "Bahari", "white sand beach with cafes", 10000, 4.5),
            Place::new("6", "Hutan Pinus Mangunan", "Cagar Alam", "pine forest on a hill with viewpoints", 5000, 4.5),
            Place::new("7", "Malioboro", "Belanja", "busy shopping street with batik stalls", 0, 4.7),
            Place::new("8", "Gembira Loka Zoo", "Taman Hiburan", "city zoo with animals and rides", 60000, 4.5),
        ])
        .unwrap(),
    )
}

fn ids(recommendations: &[wisata::recommend::Recommendation]) -> Vec<String> {
    recommendations
        .iter()
        .map(|r| r.place_id.to_string())
        .collect()
}

#[test]
fn test_related_description_ranks_first() {
    let index = build_index(temples(), SignalWeights::new(1.0, 0.0, 0.0)).unwrap();
    let recommendations = recommend(&index, "A", 2).unwrap();

    assert_eq!(ids(&recommendations), vec!["B", "C"]);
    assert!(recommendations[0].score > recommendations[1].score);
}

#[test]
fn test_query_place_is_never_returned() {
    let dataset = yogyakarta();
    let index = build_index(Arc::clone(&dataset), SignalWeights::new(0.6, 0.2, 0.2)).unwrap();

    for place in dataset.places() {
        let recommendations = recommend(&index, place.id.as_str(), 10).unwrap();
        assert!(recommendations.iter().all(|r| r.place_id != place.id));
    }
}

#[test]
fn test_combined_matrix_is_symmetric() {
    let index = build_index(yogyakarta(), SignalWeights::new(0.5, 0.3, 0.2)).unwrap();
    assert!(index.combined().is_symmetric());
    for signal in Signal::ALL {
        assert!(index.signal(signal).unwrap().is_symmetric());
    }
}

#[test]
fn test_exactly_top_n_unique_descending() {
    let index = build_index(yogyakarta(), SignalWeights::new(0.6, 0.2, 0.2)).unwrap();

    for top_n in 1..=7 {
        let recommendations = recommend(&index, "1", top_n).unwrap();
        assert_eq!(recommendations.len(), top_n);

        let mut unique = ids(&recommendations);
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), top_n);

        assert!(
            recommendations
                .windows(2)
                .all(|w| w[0].score >= w[1].score)
        );
    }
}

#[test]
fn test_top_n_larger_than_dataset_returns_all_others() {
    let index = build_index(yogyakarta(), SignalWeights::default()).unwrap();
    assert_eq!(recommend(&index, "4", 50).unwrap().len(), 7);
}

#[test]
fn test_zero_numeric_weights_equal_text_matrix() {
    let dataset = yogyakarta();
    let text_only = build_index(Arc::clone(&dataset), SignalWeights::new(1.0, 0.0, 0.0)).unwrap();
    let text = text_only.signal(Signal::Description).unwrap();

    assert_eq!(text_only.combined(), text);

    let full = build_index(dataset, SignalWeights::new(1.0, 0.5, 0.5)).unwrap();
    assert_eq!(full.signal(Signal::Description).unwrap(), text);
}

#[test]
fn test_beach_recommends_beach() {
    let index = build_index(yogyakarta(), SignalWeights::default()).unwrap();
    let recommendations = recommend(&index, "4", 1).unwrap();
    assert_eq!(ids(&recommendations), vec!["5"]);
}

#[test]
fn test_identical_prices_are_degenerate() {
    match build_index(temples(), SignalWeights::new(1.0, 0.5, 0.0)) {
        Err(WisataError::DegenerateColumn { column, .. }) => assert_eq!(column, "price"),
        other => panic!("expected DegenerateColumn, got {other:?}"),
    }
    assert!(matches!(
        build_index(temples(), SignalWeights::new(1.0, 0.0, 0.5)),
        Err(WisataError::DegenerateColumn { .. })
    ));
}

#[test]
fn test_unknown_place() {
    let index = build_index(temples(), SignalWeights::default()).unwrap();
    assert!(matches!(
        recommend(&index, "does-not-exist", 3),
        Err(WisataError::UnknownPlace(_))
    ));
}

#[test]
fn test_stop_words_only_description_fails() {
    let dataset = Arc::new(
        Dataset::new(vec![
            Place::new("1", "A", "X", "the and of", 10000, 4.0),
            Place::new("2", "B", "X", "it is", 20000, 4.5),
        ])
        .unwrap(),
    );
    assert!(matches!(
        build_index(Arc::clone(&dataset), SignalWeights::default()),
        Err(WisataError::EmptyVocabulary(_))
    ));
    // Without the description signal the text is never analyzed.
    assert!(build_index(dataset, SignalWeights::new(0.0, 1.0, 1.0)).is_ok());
}

#[test]
fn test_stop_word_only_description_scores_zero() {
    let dataset = Arc::new(
        Dataset::new(vec![
            Place::new("S", "Place S", "Budaya", "the and of", 20000, 4.1),
            Place::new("A", "Place A", "Budaya", "old temple ruins", 10000, 5.0),
            Place::new("B", "Place B", "Budaya", "ancient temple site", 30000, 4.5),
            Place::new("C", "Place C", "Belanja", "modern shopping mall", 40000, 4.8),
        ])
        .unwrap(),
    );

    let text_only = build_index(Arc::clone(&dataset), SignalWeights::new(1.0, 0.0, 0.0)).unwrap();
    let text = text_only.signal(Signal::Description).unwrap();
    assert!(text.values().iter().all(|v| v.is_finite()));
    assert_eq!(text.get(0, 0), 0.0);
    for j in 0..dataset.len() {
        assert_eq!(text.get(0, j), 0.0);
        assert_eq!(text.get(j, 0), 0.0);
    }
    for i in 1..dataset.len() {
        assert!((text.get(i, i) - 1.0).abs() < 1e-9);
    }

    let recommendations = recommend(&text_only, "S", 10).unwrap();
    assert_eq!(ids(&recommendations), vec!["A", "B", "C"]);
    assert!(recommendations.iter().all(|r| r.score == 0.0));

    let weighted = build_index(dataset, SignalWeights::new(0.6, 0.2, 0.2)).unwrap();
    assert!(weighted.combined().values().iter().all(|v| v.is_finite()));
    let recommendations = recommend(&weighted, "S", 10).unwrap();
    assert_eq!(recommendations.len(), 3);
    for recommendation in &recommendations {
        assert_eq!(recommendation.breakdown.description, Some(0.0));
        assert!(recommendation.score.is_finite());
    }
}

#[test]
fn test_filtered_recommendations_keep_scores() {
    let index = build_index(yogyakarta(), SignalWeights::new(0.6, 0.2, 0.2)).unwrap();
    let all = recommend(&index, "1", 7).unwrap();

    let filter = PlaceFilter::new().with_category("budaya");
    let filtered = recommend_filtered(&index, "1", 7, &filter).unwrap();
    assert_eq!(ids(&filtered), vec!["2", "3"]);

    for recommendation in &filtered {
        let unfiltered = all
            .iter()
            .find(|r| r.place_id == recommendation.place_id)
            .unwrap();
        assert_eq!(unfiltered.score, recommendation.score);
    }
}

#[test]
fn test_cache_reuses_index() {
    let dataset = yogyakarta();
    let cache = IndexCache::new();
    let weights = SignalWeights::new(0.6, 0.2, 0.2);

    let first = cache.get_or_build(&dataset, weights).unwrap();
    let second = cache.get_or_build(&dataset, weights).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let direct = build_index(dataset, weights).unwrap();
    assert_eq!(first.combined(), direct.combined());
}

#[test]
fn test_csv_to_recommendations() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "Place_Id,Place_Name,Category,Description,Price,Rating,Latitude,Longitude\n\
         1,Candi Prambanan,Budaya,hindu temple compound,Rp 50.000,4.7,-7.752,110.491\n\
         2,Candi Sewu,Budaya,buddhist temple compound,Rp 10.000,4.6,-7.744,110.492\n\
         3,Pantai Baron,Bahari,fishing beach with caves,Rp 10.000,4.3,-8.129,110.548\n"
    )
    .unwrap();

    let dataset = Arc::new(CsvPlaceLoader::new().load_path(file.path()).unwrap());
    assert!(dataset.capabilities().has_coordinates);

    let index = build_index(dataset, SignalWeights::new(1.0, 0.2, 0.1)).unwrap();
    let recommendations = recommend(&index, "1", 2).unwrap();
    assert_eq!(ids(&recommendations), vec!["2", "3"]);
}
