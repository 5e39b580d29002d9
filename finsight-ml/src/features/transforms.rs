//! Column transforms: standard scaling for numeric fields, one-hot expansion
//! for categorical fields.

use super::encoding::FeatureColumn;
use super::record::InputRecord;
use crate::error::FinsightError;
use serde::{Deserialize, Serialize};

/// A standard-scaled numeric column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumericColumn {
    pub field: String,
    pub mean: f64,
    pub scale: f64,
}

impl NumericColumn {
    fn encode(&self, value: f64) -> f64 {
        let scale = if self.scale == 0.0 { 1.0 } else { self.scale };
        (value - self.mean) / scale
    }
}

/// A one-hot expanded categorical column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoricalColumn {
    pub field: String,
    pub categories: Vec<String>,
}

/// Fitted column transformer. Numeric columns come first in the encoded
/// layout, then every category of every categorical column.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ColumnTransformer {
    #[serde(default)]
    pub numeric: Vec<NumericColumn>,
    #[serde(default)]
    pub categorical: Vec<CategoricalColumn>,
}

impl ColumnTransformer {
    /// Number of encoded columns produced.
    pub fn width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>()
    }

    /// Encoded feature names, in the same order as [`Self::transform`] output.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.width());
        names.extend(self.numeric.iter().map(|c| FeatureColumn::numeric_name(&c.field)));
        for column in &self.categorical {
            names.extend(
                column
                    .categories
                    .iter()
                    .map(|cat| FeatureColumn::categorical_name(&column.field, cat)),
            );
        }
        names
    }

    /// Raw fields this transformer reads.
    pub fn required_fields(&self) -> Vec<&str> {
        self.numeric
            .iter()
            .map(|c| c.field.as_str())
            .chain(self.categorical.iter().map(|c| c.field.as_str()))
            .collect()
    }

    /// Encode one raw record. Unknown categories encode to all zeros.
    pub fn transform(&self, record: &InputRecord) -> Result<Vec<f64>, FinsightError> {
        let mut row = Vec::with_capacity(self.width());

        for column in &self.numeric {
            let value = record
                .present(&column.field)
                .and_then(|v| v.as_f64())
                .ok_or_else(|| {
                    FinsightError::preprocessing(format!(
                        "numeric field '{}' is missing or not a number",
                        column.field
                    ))
                })?;
            row.push(column.encode(value));
        }

        for column in &self.categorical {
            let key = record.get(&column.field).map(|v| v.category_key());
            if key.is_some()
                && !column
                    .categories
                    .iter()
                    .any(|c| Some(c.as_str()) == key.as_deref())
            {
                tracing::debug!(field = %column.field, "Unknown category, encoding as all zeros");
            }
            row.extend(column.categories.iter().map(|cat| {
                if Some(cat.as_str()) == key.as_deref() {
                    1.0
                } else {
                    0.0
                }
            }));
        }

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::InputValue;

    fn transformer() -> ColumnTransformer {
        ColumnTransformer {
            numeric: vec![NumericColumn {
                field: "TimeHorizonYears".into(),
                mean: 10.0,
                scale: 5.0,
            }],
            categorical: vec![
                CategoricalColumn {
                    field: "AgeRange".into(),
                    categories: vec!["18-24".into(), "25-34".into(), "55+".into()],
                },
                CategoricalColumn {
                    field: "HasDependents".into(),
                    categories: vec!["No".into(), "Yes".into()],
                },
            ],
        }
    }

    #[test]
    fn test_feature_names_layout() {
        assert_eq!(
            transformer().feature_names(),
            vec![
                "numeric__TimeHorizonYears",
                "categorical__AgeRange_18-24",
                "categorical__AgeRange_25-34",
                "categorical__AgeRange_55+",
                "categorical__HasDependents_No",
                "categorical__HasDependents_Yes",
            ]
        );
        assert_eq!(transformer().width(), 6);
    }

    #[test]
    fn test_transform_scales_and_one_hots() {
        let record: InputRecord = [
            ("TimeHorizonYears", InputValue::from(20)),
            ("AgeRange", InputValue::from("25-34")),
            ("HasDependents", InputValue::from("Yes")),
        ]
        .into_iter()
        .collect();
        let row = transformer().transform(&record).unwrap();
        assert_eq!(row, vec![2.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unknown_category_is_all_zeros() {
        let record: InputRecord = [
            ("TimeHorizonYears", InputValue::from(10)),
            ("AgeRange", InputValue::from("35-44")),
            ("HasDependents", InputValue::Null),
        ]
        .into_iter()
        .collect();
        let row = transformer().transform(&record).unwrap();
        assert_eq!(row, vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_missing_numeric_is_error() {
        let record: InputRecord = [("AgeRange", InputValue::from("25-34"))].into_iter().collect();
        let err = transformer().transform(&record).unwrap_err();
        assert!(matches!(err, FinsightError::Preprocessing(_)));
    }

    #[test]
    fn test_zero_scale_is_treated_as_one() {
        let t = ColumnTransformer {
            numeric: vec![NumericColumn {
                field: "X".into(),
                mean: 1.0,
                scale: 0.0,
            }],
            categorical: vec![],
        };
        let record: InputRecord = [("X", InputValue::from(4))].into_iter().collect();
        assert_eq!(t.transform(&record).unwrap(), vec![3.0]);
    }
}
