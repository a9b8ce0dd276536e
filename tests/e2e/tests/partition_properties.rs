//! Partition invariants over a spread of generated inputs

use std::collections::HashMap;

use thematic_core::{AnalysisConfig, ThematicAnalyzer, ThemeSet};
use thematic_e2e_tests::mocks::LexiconEmbedder;

const WORDS: &[&str] = &[
    "great", "loved", "excellent", "unclear", "confusing", "not", "heavy", "deadlines",
    "assignments", "ta", "office", "support", "rushed", "slow", "pace", "lectures",
];

const THEME_SEEDS: &[(&str, &[&str])] = &[
    ("Praise", &["great", "excellent"]),
    ("Clarity", &["unclear", "confusing"]),
    ("Workload", &["heavy", "deadlines"]),
    ("Support", &["ta", "office hours"]),
    ("Pacing", &["rushed", "slow"]),
];

/// Deterministic code list: two-word combinations walked with a stride
fn generated_codes(count: usize, stride: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let a = WORDS[(i * stride) % WORDS.len()];
            let b = WORDS[(i * stride + 3) % WORDS.len()];
            format!("{a} {b}")
        })
        .collect()
}

fn themes(k: usize) -> ThemeSet {
    ThemeSet::from_pairs(THEME_SEEDS.iter().take(k).map(|(n, s)| (*n, s.to_vec()))).unwrap()
}

fn multiset<S: AsRef<str>>(items: impl IntoIterator<Item = S>) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item.as_ref().to_string()).or_insert(0) += 1;
    }
    counts
}

#[test]
fn test_every_code_assigned_exactly_once() {
    for k in 1..=THEME_SEEDS.len() {
        for (count, stride) in [(k, 1), (12, 5), (40, 7), (75, 3)] {
            for shuffle_seed in [None, Some(9)] {
                let config = AnalysisConfig { shuffle_seed, ..Default::default() };
                let analyzer = ThematicAnalyzer::with_config(LexiconEmbedder, config).unwrap();
                let codes = generated_codes(count, stride);
                let themes = themes(k);
                let analysis = analyzer.analyze(&codes, &themes).unwrap();
                let clusters = analysis.clusters();

                // exactly the declared themes, in order
                assert_eq!(clusters.themes().collect::<Vec<_>>(), themes.names());
                assert_eq!(clusters.total_codes(), codes.len());

                let assigned = multiset(clusters.iter().flat_map(|c| c.codes.iter()));
                assert_eq!(assigned, multiset(&codes), "k={k} count={count}");
            }
        }
    }
}

#[test]
fn test_repeated_runs_are_identical() {
    let analyzer = ThematicAnalyzer::new(LexiconEmbedder);
    let codes = generated_codes(60, 7);
    let themes = themes(5);

    let first = analyzer.analyze(&codes, &themes).unwrap();
    for _ in 0..3 {
        let again = analyzer.analyze(&codes, &themes).unwrap();
        assert_eq!(again.assignments(), first.assignments());
        assert_eq!(again.final_centers(), first.final_centers());
    }
}

#[test]
fn test_similarity_matrix_is_symmetric() {
    let analyzer = ThematicAnalyzer::new(LexiconEmbedder);
    let analysis = analyzer.analyze(&generated_codes(50, 3), &themes(5)).unwrap();
    let matrix = analysis.similarity().unwrap();

    for i in 0..matrix.themes.len() {
        if matrix.populated[i] {
            assert_eq!(matrix.values[i][i], 1.0);
        }
        for j in 0..matrix.themes.len() {
            assert_eq!(matrix.values[i][j], matrix.values[j][i]);
        }
    }
}

#[test]
fn test_iteration_cap_still_assigns_everything() {
    let config = AnalysisConfig { max_iterations: 1, ..Default::default() };
    let analyzer = ThematicAnalyzer::with_config(LexiconEmbedder, config).unwrap();
    let codes = generated_codes(40, 7);
    let analysis = analyzer.analyze(&codes, &themes(4)).unwrap();

    assert_eq!(analysis.stats().iterations, 1);
    assert_eq!(analysis.clusters().total_codes(), codes.len());
}
