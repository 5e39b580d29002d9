//! Raw (pre-encoding) input records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A raw field value as stored in a profile or an investment lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl InputValue {
    /// Whether the value is recorded at all.
    pub fn is_present(&self) -> bool {
        !matches!(self, InputValue::Null)
    }

    /// String form used to match one-hot category suffixes.
    ///
    /// Mirrors how the upstream encoder names categories: integral floats keep
    /// one decimal (`12.0`), booleans are `True`/`False`, null is `None`.
    ///
    /// Integral floats are always written positionally, so magnitudes of 1e16
    /// and above come out as `10000000000000000.0` where the upstream encoder
    /// writes `1e+16`. Such categories will not match their one-hot column.
    pub fn category_key(&self) -> String {
        match self {
            InputValue::Null => "None".to_string(),
            InputValue::Bool(true) => "True".to_string(),
            InputValue::Bool(false) => "False".to_string(),
            InputValue::Integer(i) => i.to_string(),
            InputValue::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.1}"),
            InputValue::Float(f) => f.to_string(),
            InputValue::Text(s) => s.clone(),
        }
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            InputValue::Null => None,
            InputValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            InputValue::Integer(i) => Some(*i as f64),
            InputValue::Float(f) => Some(*f),
            InputValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Yes/no reading for boolean-like fields stored as `"Yes"`/`"No"` or as booleans.
    pub fn is_affirmative(&self) -> bool {
        match self {
            InputValue::Bool(b) => *b,
            InputValue::Text(s) => s == "Yes",
            _ => false,
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.category_key())
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        InputValue::Text(value.to_string())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        InputValue::Text(value)
    }
}

impl From<i64> for InputValue {
    fn from(value: i64) -> Self {
        InputValue::Integer(value)
    }
}

impl From<i32> for InputValue {
    fn from(value: i32) -> Self {
        InputValue::Integer(i64::from(value))
    }
}

impl From<u32> for InputValue {
    fn from(value: u32) -> Self {
        InputValue::Integer(i64::from(value))
    }
}

impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        InputValue::Float(value)
    }
}

impl From<bool> for InputValue {
    fn from(value: bool) -> Self {
        InputValue::Bool(value)
    }
}

impl<T: Into<InputValue>> From<Option<T>> for InputValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(InputValue::Null, Into::into)
    }
}

/// Mapping from original field name to the raw value the subject has.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputRecord(BTreeMap<String, InputValue>);

impl InputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<InputValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&InputValue> {
        self.0.get(field)
    }

    /// The value for `field`, treating `Null` as absent.
    pub fn present(&self, field: &str) -> Option<&InputValue> {
        self.0.get(field).filter(|v| v.is_present())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &InputValue)> {
        self.0.iter()
    }

    /// Fields from `required` that are missing or null.
    pub fn missing_fields(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|f| self.present(f).is_none())
            .map(|f| f.to_string())
            .collect()
    }
}

impl<K: Into<String>, V: Into<InputValue>> FromIterator<(K, V)> for InputRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_key_forms() {
        assert_eq!(InputValue::from("25-34").category_key(), "25-34");
        assert_eq!(InputValue::from(12).category_key(), "12");
        assert_eq!(InputValue::from(12.0).category_key(), "12.0");
        assert_eq!(InputValue::from(12.5).category_key(), "12.5");
        assert_eq!(InputValue::from(true).category_key(), "True");
        assert_eq!(InputValue::Null.category_key(), "None");
    }

    #[test]
    fn test_category_key_large_integral_float_is_positional() {
        assert_eq!(InputValue::from(1e15).category_key(), "1000000000000000.0");
        assert_eq!(InputValue::from(1e16).category_key(), "10000000000000000.0");
    }

    #[test]
    fn test_untagged_deserialize() {
        let record: InputRecord = serde_json::from_str(
            r#"{"AgeRange": "25-34", "TimeHorizonYears": 12, "Score": 0.5,
                "Flag": true, "Knowledge": null}"#,
        )
        .unwrap();
        assert_eq!(record.get("AgeRange"), Some(&InputValue::Text("25-34".into())));
        assert_eq!(record.get("TimeHorizonYears"), Some(&InputValue::Integer(12)));
        assert_eq!(record.get("Score"), Some(&InputValue::Float(0.5)));
        assert_eq!(record.get("Flag"), Some(&InputValue::Bool(true)));
        assert_eq!(record.get("Knowledge"), Some(&InputValue::Null));
        assert!(record.present("Knowledge").is_none());
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(InputValue::from(7).as_f64(), Some(7.0));
        assert_eq!(InputValue::from(" 3.5 ").as_f64(), Some(3.5));
        assert_eq!(InputValue::from("Low").as_f64(), None);
        assert_eq!(InputValue::Null.as_f64(), None);
    }

    #[test]
    fn test_missing_fields_treats_null_as_missing() {
        let record: InputRecord = [
            ("AgeRange", InputValue::from("55+")),
            ("DebtLevel", InputValue::Null),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            record.missing_fields(&["AgeRange", "DebtLevel", "SavingsLevel"]),
            vec!["DebtLevel".to_string(), "SavingsLevel".to_string()]
        );
    }

    #[test]
    fn test_affirmative() {
        assert!(InputValue::from("Yes").is_affirmative());
        assert!(!InputValue::from("No").is_affirmative());
        assert!(InputValue::from(true).is_affirmative());
        assert!(!InputValue::Null.is_affirmative());
    }
}
