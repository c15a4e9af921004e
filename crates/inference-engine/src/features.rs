//! Feature alignment
//!
//! A [`FeatureSchema`] is the ordered list of feature names fixed when a model
//! is loaded. [`FeatureSchema::align`] is the only way to build a
//! [`FeatureVector`], so every vector handed to a classifier has exactly the
//! schema's length and order.

use serde_json::Value;

use common::models::{json_type_name, FeatureMap};

use crate::error::PredictError;

/// Value substituted for a feature the caller did not supply
pub const DEFAULT_FEATURE_VALUE: f64 = 0.0;

/// Ordered feature names a classifier expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    names: Vec<String>,
}

/// Single input row in schema order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    /// Values in schema order
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of dimensions
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for a zero-dimensional vector
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Result of aligning a feature map
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedFeatures {
    /// Row to classify
    pub vector: FeatureVector,

    /// Schema positions that were absent and filled with the default value
    pub defaulted: Vec<usize>,
}

impl FeatureSchema {
    /// Creates a schema from ordered feature names
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Feature names in order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if the schema has no features
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Projects a feature map onto the schema
    ///
    /// Missing keys and `null` values become [`DEFAULT_FEATURE_VALUE`]; keys
    /// outside the schema are ignored.
    pub fn align(&self, input: &FeatureMap) -> Result<AlignedFeatures, PredictError> {
        let mut values = Vec::with_capacity(self.names.len());
        let mut defaulted = Vec::new();

        for (idx, name) in self.names.iter().enumerate() {
            match input.get(name).map(|value| coerce(name, value)).transpose()?.flatten() {
                Some(value) => values.push(value),
                None => {
                    values.push(DEFAULT_FEATURE_VALUE);
                    defaulted.push(idx);
                }
            }
        }

        Ok(AlignedFeatures {
            vector: FeatureVector { values },
            defaulted,
        })
    }

    /// Names of the given schema positions
    pub fn names_at(&self, positions: &[usize]) -> Vec<String> {
        positions
            .iter()
            .filter_map(|&idx| self.names.get(idx).cloned())
            .collect()
    }
}

/// Converts a supplied JSON value to a number; `Ok(None)` means "use the default"
fn coerce(name: &str, value: &Value) -> Result<Option<f64>, PredictError> {
    let number = match value {
        Value::Null => return Ok(None),
        Value::Bool(flag) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(number) => number.as_f64().ok_or_else(|| {
            PredictError::InvalidInput(format!("feature '{}' is not representable as f64", name))
        })?,
        Value::String(text) => text.trim().parse::<f64>().map_err(|_| {
            PredictError::InvalidInput(format!(
                "could not convert string to float for feature '{}': '{}'",
                name, text
            ))
        })?,
        other => {
            return Err(PredictError::InvalidInput(format!(
                "feature '{}' must be a number, got {}",
                name,
                json_type_name(other)
            )))
        }
    };

    if !number.is_finite() {
        return Err(PredictError::InvalidInput(format!(
            "feature '{}' must be finite, got {}",
            name, number
        )));
    }

    Ok(Some(number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> FeatureSchema {
        FeatureSchema::new(vec![
            "MinTemp".to_string(),
            "MaxTemp".to_string(),
            "Humidity9am".to_string(),
        ])
    }

    fn map(value: Value) -> FeatureMap {
        FeatureMap::from_value(value).unwrap()
    }

    #[test]
    fn test_align_follows_schema_order() {
        let aligned = schema()
            .align(&map(json!({"Humidity9am": 65, "MinTemp": 15.0, "MaxTemp": 25.5})))
            .unwrap();
        assert_eq!(aligned.vector.as_slice(), &[15.0, 25.5, 65.0]);
        assert!(aligned.defaulted.is_empty());
    }

    #[test]
    fn test_key_order_does_not_matter() {
        let a = schema()
            .align(&map(json!({"MinTemp": 1, "MaxTemp": 2, "Humidity9am": 3})))
            .unwrap();
        let b = schema()
            .align(&map(json!({"Humidity9am": 3, "MaxTemp": 2, "MinTemp": 1})))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_equals_explicit_zero() {
        let omitted = schema().align(&map(json!({"MinTemp": 12.0}))).unwrap();
        let explicit = schema()
            .align(&map(json!({"MinTemp": 12.0, "MaxTemp": 0, "Humidity9am": 0})))
            .unwrap();
        assert_eq!(omitted.vector, explicit.vector);
        assert_eq!(omitted.defaulted, vec![1, 2]);
        assert_eq!(schema().names_at(&omitted.defaulted), vec!["MaxTemp", "Humidity9am"]);
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let aligned = schema()
            .align(&map(json!({"MinTemp": 1, "Location": "Albury", "RainToday": [1, 2]})))
            .unwrap();
        assert_eq!(aligned.vector.len(), 3);
        assert_eq!(aligned.vector.as_slice(), &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_map_defaults_everything() {
        let aligned = schema().align(&FeatureMap::new()).unwrap();
        assert_eq!(aligned.vector.as_slice(), &[0.0, 0.0, 0.0]);
        assert_eq!(aligned.defaulted, vec![0, 1, 2]);
    }

    #[test]
    fn test_value_coercion() {
        let aligned = schema()
            .align(&map(json!({"MinTemp": null, "MaxTemp": true, "Humidity9am": " 71.5 "})))
            .unwrap();
        assert_eq!(aligned.vector.as_slice(), &[0.0, 1.0, 71.5]);
        assert_eq!(aligned.defaulted, vec![0]);
    }

    #[test]
    fn test_non_numeric_values_are_invalid() {
        for bad in [json!("humid"), json!([65]), json!({"value": 65}), json!("NaN"), json!("inf")] {
            let err = schema()
                .align(&map(json!({"Humidity9am": bad.clone()})))
                .unwrap_err();
            assert!(matches!(err, PredictError::InvalidInput(_)), "{} accepted", bad);
        }
    }
}
