//! Journey: codes and themes in, clusters and analytics out

use thematic_core::{
    AnalysisConfig, AnalysisError, CachedEmbedder, ThematicAnalyzer, ThemeSet, theme_centroid,
};
use thematic_e2e_tests::mocks::{
    CountingEmbedder, FailingEmbedder, LexiconEmbedder, feedback_codes, feedback_themes,
    sentiment_codes, sentiment_themes,
};

#[test]
fn test_sentiment_example_end_to_end() {
    let analyzer = ThematicAnalyzer::new(LexiconEmbedder);
    let codes = sentiment_codes();
    let analysis = analyzer.analyze(&codes, &sentiment_themes()).unwrap();
    let clusters = analysis.clusters();

    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters.total_codes(), 5);
    assert_eq!(
        clusters.get("Positive").unwrap(),
        &["great product", "loved the design", "service was excellent"]
    );
    assert_eq!(
        clusters.get("Negative").unwrap(),
        &["could be improved", "not what i expected"]
    );
    assert!(analysis.stats().converged);
}

#[test]
fn test_course_feedback_journey() {
    let analyzer = ThematicAnalyzer::new(LexiconEmbedder);
    let codes = feedback_codes();
    let analysis = analyzer.analyze(&codes, &feedback_themes()).unwrap();
    let clusters = analysis.clusters();

    let workload = clusters.get("Workload").unwrap();
    assert_eq!(workload.iter().filter(|c| *c == "heavy workload").count(), 2);
    assert!(workload.contains(&"tight deadlines".to_string()));

    let clarity = clusters.get("Clarity").unwrap();
    assert!(clarity.contains(&"unclear instructions".to_string()));
    assert!(clarity.contains(&"confusing rubric".to_string()));

    let support = clusters.get("Support").unwrap();
    assert!(support.contains(&"helpful ta support".to_string()));

    let pacing = clusters.get("Pacing").unwrap();
    assert_eq!(pacing, &["rushed pace", "slow pace early on"]);

    // duplicates are counted, not collapsed
    assert_eq!(analysis.theme_counts().total(), codes.len());
    assert_eq!(analysis.code_frequencies()[0], ("heavy workload".to_string(), 2));
}

#[test]
fn test_unpopulated_theme_is_reported_not_dropped() {
    let themes = ThemeSet::from_pairs([
        ("Positive", vec!["great", "love"]),
        ("Negative", vec!["improved"]),
        ("Workload", vec!["heavy workload"]),
    ])
    .unwrap();
    let analyzer = ThematicAnalyzer::new(LexiconEmbedder);
    let analysis = analyzer.analyze(&sentiment_codes(), &themes).unwrap();

    assert_eq!(analysis.clusters().get("Workload").unwrap().len(), 0);
    assert_eq!(analysis.theme_counts().get("Workload"), Some(0));

    let similarity = analysis.similarity().unwrap();
    assert_eq!(similarity.populated, vec![true, true, false]);
    assert_eq!(similarity.values[2], vec![0.0, 0.0, 0.0]);

    let report = analysis.report().unwrap();
    assert_eq!(report.theme_counts.last().unwrap().theme, "Workload");
    assert_eq!(report.theme_counts.last().unwrap().count, 0);
}

#[test]
fn test_seed_centroids_match_seed_embeddings() {
    let analyzer = ThematicAnalyzer::new(LexiconEmbedder);
    let themes = feedback_themes();
    let analysis = analyzer.analyze(&feedback_codes(), &themes).unwrap();

    for (theme, centroid) in themes.iter().zip(analysis.seed_centroids()) {
        let seed_vectors: Vec<Vec<f32>> =
            theme.seeds().iter().map(|s| LexiconEmbedder::vector(s)).collect();
        let expected = theme_centroid(theme.name(), &seed_vectors).unwrap();
        for (a, b) in centroid.iter().zip(&expected) {
            assert!((a - b).abs() < 1e-6);
        }
    }
}

#[test]
fn test_insufficient_data_is_distinguishable() {
    let analyzer = ThematicAnalyzer::new(LexiconEmbedder);
    let themes = feedback_themes();
    let err = analyzer
        .analyze(&["great product", "rushed pace"], &themes)
        .unwrap_err();

    assert!(matches!(err, AnalysisError::InsufficientData { codes: 2, themes: 4 }));
    assert!(err.is_insufficient_data());
    assert!(!err.is_retryable());
}

#[test]
fn test_two_codes_three_themes() {
    let themes = ThemeSet::from_pairs([
        ("A", vec!["great"]),
        ("B", vec!["slow"]),
        ("C", vec!["heavy"]),
    ])
    .unwrap();
    let analyzer = ThematicAnalyzer::new(LexiconEmbedder);
    let err = analyzer.analyze(&["great", "slow"], &themes).unwrap_err();
    assert!(err.is_insufficient_data());
}

#[test]
fn test_whitespace_seed_fails_before_embedding() {
    let embedder = CountingEmbedder::new(LexiconEmbedder);
    let analyzer = ThematicAnalyzer::new(&embedder);

    let err = analyzer
        .analyze_with_seeds(
            &sentiment_codes(),
            [("Positive", vec!["great"]), ("Negative", vec!["   "])],
        )
        .unwrap_err();

    assert!(matches!(err, AnalysisError::InvalidTheme { .. }));
    assert_eq!(embedder.calls(), 0);
}

#[test]
fn test_embedding_failure_aborts_pass() {
    let analyzer = ThematicAnalyzer::new(FailingEmbedder);
    let err = analyzer.analyze(&sentiment_codes(), &sentiment_themes()).unwrap_err();
    assert!(matches!(err, AnalysisError::EmbeddingUnavailable(_)));
    assert!(err.is_retryable());
}

#[test]
fn test_cached_embedder_gives_identical_results() {
    let counting = CountingEmbedder::new(LexiconEmbedder);
    let cached = CachedEmbedder::new(&counting, 64);
    let cached_analyzer = ThematicAnalyzer::new(&cached);
    let plain_analyzer = ThematicAnalyzer::new(LexiconEmbedder);

    let codes = feedback_codes();
    let themes = feedback_themes();

    let first = cached_analyzer.analyze(&codes, &themes).unwrap();
    let texts_after_first = counting.texts();
    let second = cached_analyzer.analyze(&codes, &themes).unwrap();
    let plain = plain_analyzer.analyze(&codes, &themes).unwrap();

    assert_eq!(first.clusters(), plain.clusters());
    assert_eq!(second.clusters(), plain.clusters());
    assert_eq!(first.assignments(), second.assignments());
    // second pass served entirely from cache
    assert_eq!(counting.texts(), texts_after_first);
}

#[test]
fn test_report_serializes_for_renderers() {
    let config = AnalysisConfig {
        shuffle_seed: Some(42),
        ..Default::default()
    };
    let analyzer = ThematicAnalyzer::with_config(LexiconEmbedder, config).unwrap();
    let analysis = analyzer.analyze(&feedback_codes(), &feedback_themes()).unwrap();
    let report = analysis.report().unwrap();

    assert_eq!(report.projection.len(), feedback_codes().len());
    assert_eq!(report.similarity.values.len(), 4);
    assert_eq!(report.model, "lexicon-fixture");

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    for key in [
        "runId",
        "generatedAt",
        "clusters",
        "themeCounts",
        "codeFrequencies",
        "projection",
        "explainedVarianceRatio",
        "similarity",
        "overlaps",
        "stats",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["clusters"].as_array().unwrap().len(), 4);
}
