//! Property-based tests for the attribution formatter using proptest.

use proptest::prelude::*;

use finsight_ml::interpretability::phrasing::{INSUFFICIENT_DATA_MESSAGE, LENGTH_MISMATCH_MESSAGE};
use finsight_ml::interpretability::{fold_contributions, rank_contributions};
use finsight_ml::{AttributionFormatter, AttributionRequest, ExplanationKind, InputRecord};

const FIELDS: [&str; 4] = ["AgeRange", "DebtLevel", "SavingsLevel", "TimeHorizonYears"];
const CATEGORIES: [&str; 3] = ["Low", "Medium", "High"];

fn encoded_name() -> impl Strategy<Value = String> {
    prop_oneof![
        (0..FIELDS.len()).prop_map(|f| format!("numeric__{}", FIELDS[f])),
        (0..FIELDS.len(), 0..CATEGORIES.len())
            .prop_map(|(f, c)| format!("categorical__{}_{}", FIELDS[f], CATEGORIES[c])),
        (0..FIELDS.len()).prop_map(|f| FIELDS[f].to_string()),
        "[a-zA-Z_]{0,12}",
    ]
}

fn kind() -> impl Strategy<Value = ExplanationKind> {
    prop_oneof![
        Just(ExplanationKind::Risk),
        Just(ExplanationKind::Investment),
        Just(ExplanationKind::Generic),
    ]
}

fn input() -> InputRecord {
    FIELDS
        .iter()
        .zip(["Medium", "Low", "High", "12"])
        .map(|(f, v)| (*f, v))
        .collect()
}

proptest! {
    #[test]
    fn equal_lengths_always_produce_text(
        pairs in prop::collection::vec((-1.0f64..1.0, encoded_name()), 1..40),
        kind in kind(),
        max_lines in 0usize..6,
    ) {
        let (attributions, names): (Vec<f64>, Vec<String>) = pairs.into_iter().unzip();
        let request = AttributionRequest::new(attributions, names, input(), "Moderate", kind)
            .with_max_lines(max_lines);
        let text = AttributionFormatter::default().format(&request);
        prop_assert!(!text.is_empty());
        prop_assert_ne!(text.as_str(), LENGTH_MISMATCH_MESSAGE);
    }

    #[test]
    fn bullets_never_exceed_max_lines(
        pairs in prop::collection::vec((-1.0f64..1.0, encoded_name()), 1..40),
        max_lines in 1usize..6,
    ) {
        let (attributions, names): (Vec<f64>, Vec<String>) = pairs.into_iter().unzip();
        let request = AttributionRequest::new(
            attributions,
            names,
            input(),
            "Moderate",
            ExplanationKind::Risk,
        )
        .with_max_lines(max_lines);
        if let Ok(explanation) = AttributionFormatter::default().try_format(&request) {
            prop_assert!(explanation.lines.len() <= max_lines);
            prop_assert!(!explanation.lines.is_empty());
            prop_assert!(explanation.lines.iter().all(|l| l.score > 0.01));
        }
    }

    #[test]
    fn mismatched_lengths_always_hit_mismatch_message(
        attributions in prop::collection::vec(-1.0f64..1.0, 1..20),
        extra in 1usize..5,
    ) {
        let names: Vec<String> = (0..attributions.len() + extra)
            .map(|i| format!("numeric__F{i}"))
            .collect();
        let request = AttributionRequest::new(
            attributions,
            names,
            input(),
            "Moderate",
            ExplanationKind::Generic,
        );
        let text = AttributionFormatter::default().format(&request);
        prop_assert_eq!(text.as_str(), LENGTH_MISMATCH_MESSAGE);
        prop_assert_ne!(text.as_str(), INSUFFICIENT_DATA_MESSAGE);
    }

    #[test]
    fn ranking_is_sorted_and_above_floor(
        scores in prop::collection::vec(-1.0f64..1.0, 1..30),
    ) {
        let names: Vec<String> = (0..scores.len()).map(|i| format!("numeric__F{i}")).collect();
        let folded = fold_contributions(&scores, &names, &input()).unwrap();
        let ranked = rank_contributions(folded, 0.01);
        prop_assert!(ranked.iter().all(|c| c.score.abs() > 0.01));
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score.abs() >= pair[1].score.abs());
            if pair[0].score.abs() == pair[1].score.abs() {
                prop_assert!(pair[0].first_column < pair[1].first_column);
            }
        }
    }
}
