//! Folding per-column attributions back onto original input fields.

use super::formatter::ExplanationError;
use crate::features::{FeatureColumn, InputRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregated attribution for one original input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub field: String,
    pub score: f64,
    /// Index of the first encoded column folded into this field. Ties in
    /// ranking keep this order.
    pub first_column: usize,
}

/// Fold encoded-column attributions into per-field totals.
///
/// - literal names count only when the field exists in `input`;
/// - numeric columns always count;
/// - one-hot columns count only when their category is the subject's actual value.
///
/// Exact-zero attributions carry no signal and are not folded, so a field
/// that only received zeros does not appear in the output. Fields are
/// returned in the order their first contributing column appears.
pub fn fold_contributions(
    attributions: &[f64],
    encoded_names: &[String],
    input: &InputRecord,
) -> Result<Vec<Contribution>, ExplanationError> {
    if attributions.len() != encoded_names.len() {
        return Err(ExplanationError::LengthMismatch {
            attributions: attributions.len(),
            names: encoded_names.len(),
        });
    }

    let mut contributions: Vec<Contribution> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();

    for (column, (&score, name)) in attributions.iter().zip(encoded_names).enumerate() {
        if !score.is_finite() {
            return Err(ExplanationError::MalformedInput(format!(
                "attribution {score} at column {column} is not finite"
            )));
        }
        let parsed = FeatureColumn::parse(name).ok_or_else(|| {
            ExplanationError::MalformedInput(format!(
                "encoded feature name {name:?} at column {column} is malformed"
            ))
        })?;

        let field = match &parsed {
            FeatureColumn::Literal { field } if input.contains(field) => field,
            FeatureColumn::Numeric { field } => field,
            FeatureColumn::Categorical { field, category }
                if input.get(field).is_some_and(|v| v.category_key() == *category) =>
            {
                field
            }
            _ => continue,
        };
        if score == 0.0 {
            continue;
        }

        match index_of.get(field) {
            Some(&i) => contributions[i].score += score,
            None => {
                index_of.insert(field.clone(), contributions.len());
                contributions.push(Contribution {
                    field: field.clone(),
                    score,
                    first_column: column,
                });
            }
        }
    }

    Ok(contributions)
}

/// Drop contributions at or below `floor` in magnitude and order the rest by
/// magnitude, largest first. The sort is stable.
pub fn rank_contributions(contributions: Vec<Contribution>, floor: f64) -> Vec<Contribution> {
    let mut ranked: Vec<Contribution> = contributions
        .into_iter()
        .filter(|c| c.score.abs() > floor)
        .collect();
    ranked.sort_by(|a, b| b.score.abs().total_cmp(&a.score.abs()));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::InputValue;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_matching_category_contributes() {
        let input: InputRecord = [("AgeRange", "25-34")].into_iter().collect();
        let folded = fold_contributions(&[0.05], &names(&["categorical__AgeRange_25-34"]), &input)
            .unwrap();
        assert_eq!(folded.len(), 1);
        assert_eq!(folded[0].field, "AgeRange");
        assert_eq!(folded[0].score, 0.05);
    }

    #[test]
    fn test_non_matching_category_is_discarded() {
        let input: InputRecord = [("AgeRange", "35-44")].into_iter().collect();
        let folded = fold_contributions(&[0.05], &names(&["categorical__AgeRange_25-34"]), &input)
            .unwrap();
        assert!(folded.is_empty());
    }

    #[test]
    fn test_numeric_folds_unconditionally() {
        let input: InputRecord = [("AgeRange", "25-34")].into_iter().collect();
        let folded =
            fold_contributions(&[0.3], &names(&["numeric__TimeHorizonYears"]), &input).unwrap();
        assert_eq!(folded[0].field, "TimeHorizonYears");
    }

    #[test]
    fn test_literal_requires_field_in_input() {
        let input: InputRecord = [("Score", InputValue::from(3))].into_iter().collect();
        let folded =
            fold_contributions(&[0.2, 0.4], &names(&["Score", "Unknown"]), &input).unwrap();
        assert_eq!(folded.len(), 1);
        assert_eq!(folded[0].field, "Score");
    }

    #[test]
    fn test_scores_accumulate_per_field() {
        let input: InputRecord = [("Score", InputValue::from(3))].into_iter().collect();
        let folded = fold_contributions(
            &[0.1, 0.2, -0.05],
            &names(&["Score", "num__Other", "numeric__Score"]),
            &input,
        )
        .unwrap();
        assert_eq!(folded.len(), 2);
        assert!((folded[0].score - 0.05).abs() < 1e-12);
        assert_eq!(folded[0].first_column, 0);
        assert_eq!(folded[1].field, "Other");
    }

    #[test]
    fn test_zero_scores_do_not_register() {
        let input: InputRecord = [("AgeRange", "25-34")].into_iter().collect();
        let folded = fold_contributions(
            &[0.0, 0.0],
            &names(&["categorical__AgeRange_25-34", "numeric__TimeHorizonYears"]),
            &input,
        )
        .unwrap();
        assert!(folded.is_empty());
    }

    #[test]
    fn test_malformed_name_and_nan() {
        let input: InputRecord = [("AgeRange", "25-34")].into_iter().collect();
        assert!(matches!(
            fold_contributions(&[0.1], &names(&["numeric__"]), &input),
            Err(ExplanationError::MalformedInput(_))
        ));
        assert!(matches!(
            fold_contributions(&[f64::NAN], &names(&["numeric__X"]), &input),
            Err(ExplanationError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_rank_floor_is_exclusive_and_sort_is_stable() {
        let contribution = |field: &str, score: f64, first_column: usize| Contribution {
            field: field.to_string(),
            score,
            first_column,
        };
        let contributions = vec![
            contribution("A", 0.01, 0),
            contribution("B", -0.3, 1),
            contribution("C", 0.3, 2),
            contribution("D", 0.0101, 3),
        ];
        let ranked = rank_contributions(contributions, 0.01);
        let order: Vec<&str> = ranked.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "D"]);
    }
}
