//! Encoded feature names produced by the column transformer.
//!
//! Names look like `<kind>__<field>` for numeric columns and
//! `<kind>__<field>_<category>` for one-hot columns.

/// Separator between the transform kind and the rest of an encoded name.
pub const NAME_DELIMITER: &str = "__";

/// The transform that produced an encoded column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    Numeric,
    Categorical,
}

impl TransformKind {
    /// Canonical prefix written by [`crate::features::ColumnTransformer`].
    pub fn prefix(self) -> &'static str {
        match self {
            TransformKind::Numeric => "numeric",
            TransformKind::Categorical => "categorical",
        }
    }

    /// Accepts the canonical prefixes and the short `num`/`cat` forms.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "numeric" | "num" => Some(TransformKind::Numeric),
            "categorical" | "cat" => Some(TransformKind::Categorical),
            _ => None,
        }
    }
}

/// A parsed encoded feature name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureColumn {
    /// No kind prefix; the whole name is an original field key.
    Literal { field: String },
    Numeric { field: String },
    /// One-hot column for `field == category`.
    Categorical { field: String, category: String },
    /// A prefix this crate does not map back (e.g. `remainder__X`).
    Passthrough { kind: String },
}

impl FeatureColumn {
    /// Parse an encoded name. Returns `None` for malformed names: an empty name,
    /// or a known kind prefix with nothing after the delimiter.
    ///
    /// The category is split off at the LAST underscore, so a category value
    /// that itself contains underscores is attributed to a field named with
    /// the leading part of that value. Callers depend on this exact split.
    pub fn parse(name: &str) -> Option<Self> {
        if name.is_empty() {
            return None;
        }
        let Some((kind, remainder)) = name.split_once(NAME_DELIMITER) else {
            return Some(FeatureColumn::Literal {
                field: name.to_string(),
            });
        };

        match TransformKind::from_prefix(kind) {
            Some(_) if remainder.is_empty() => None,
            Some(TransformKind::Numeric) => Some(FeatureColumn::Numeric {
                field: remainder.to_string(),
            }),
            Some(TransformKind::Categorical) => {
                let (field, category) = remainder
                    .rsplit_once('_')
                    .unwrap_or((remainder, remainder));
                Some(FeatureColumn::Categorical {
                    field: field.to_string(),
                    category: category.to_string(),
                })
            }
            None => Some(FeatureColumn::Passthrough {
                kind: kind.to_string(),
            }),
        }
    }

    /// Build the encoded name for a numeric column.
    pub fn numeric_name(field: &str) -> String {
        format!("{}{NAME_DELIMITER}{field}", TransformKind::Numeric.prefix())
    }

    /// Build the encoded name for a one-hot column.
    pub fn categorical_name(field: &str, category: &str) -> String {
        format!(
            "{}{NAME_DELIMITER}{field}_{category}",
            TransformKind::Categorical.prefix()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric() {
        assert_eq!(
            FeatureColumn::parse("numeric__TimeHorizonYears"),
            Some(FeatureColumn::Numeric {
                field: "TimeHorizonYears".into()
            })
        );
        assert_eq!(
            FeatureColumn::parse("num__TimeHorizonYears"),
            Some(FeatureColumn::Numeric {
                field: "TimeHorizonYears".into()
            })
        );
    }

    #[test]
    fn test_parse_categorical_splits_on_last_underscore() {
        assert_eq!(
            FeatureColumn::parse("categorical__AgeRange_25-34"),
            Some(FeatureColumn::Categorical {
                field: "AgeRange".into(),
                category: "25-34".into()
            })
        );
        // Category values with underscores land on the wrong split.
        assert_eq!(
            FeatureColumn::parse("cat__PrimaryGoal_Child_Edu"),
            Some(FeatureColumn::Categorical {
                field: "PrimaryGoal_Child".into(),
                category: "Edu".into()
            })
        );
    }

    #[test]
    fn test_parse_categorical_without_suffix() {
        assert_eq!(
            FeatureColumn::parse("categorical__Flag"),
            Some(FeatureColumn::Categorical {
                field: "Flag".into(),
                category: "Flag".into()
            })
        );
    }

    #[test]
    fn test_parse_literal_and_passthrough() {
        assert_eq!(
            FeatureColumn::parse("AgeRange"),
            Some(FeatureColumn::Literal {
                field: "AgeRange".into()
            })
        );
        assert_eq!(
            FeatureColumn::parse("remainder__UserID"),
            Some(FeatureColumn::Passthrough {
                kind: "remainder".into()
            })
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(FeatureColumn::parse(""), None);
        assert_eq!(FeatureColumn::parse("numeric__"), None);
        assert_eq!(FeatureColumn::parse("cat__"), None);
    }

    #[test]
    fn test_name_builders_parse_back() {
        let name = FeatureColumn::categorical_name("DebtLevel", "High");
        assert_eq!(name, "categorical__DebtLevel_High");
        assert_eq!(
            FeatureColumn::parse(&name),
            Some(FeatureColumn::Categorical {
                field: "DebtLevel".into(),
                category: "High".into(),
            })
        );
        assert_eq!(FeatureColumn::numeric_name("TimeHorizonYears"), "numeric__TimeHorizonYears");
    }
}
