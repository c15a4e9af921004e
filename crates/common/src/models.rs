//! Common data models for the rainfall predictor
//!
//! This module defines the request and response models exchanged between the
//! HTTP layer and the inference engine.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::utils::format_percentage;

/// Caller-supplied mapping from feature name to value
///
/// The map is unordered and may omit or add keys relative to the features a
/// model expects. Values are kept as raw JSON so that coercion rules live in
/// one place, next to the feature schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureMap(Map<String, Value>);

impl FeatureMap {
    /// Creates an empty feature map
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Parses a request body into a feature map
    ///
    /// The body must be a JSON object; any other JSON value is rejected.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    /// Converts an already parsed JSON value into a feature map
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::InvalidArgument(format!(
                "expected a JSON object of feature values, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Gets the raw value supplied for a feature
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns the number of supplied keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no keys were supplied
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FeatureMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Human-readable name of a JSON value's type, used in error details
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Predicted class of the binary rain classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RainLabel {
    /// Class 0
    NoRain,
    /// Class 1
    Rain,
}

impl RainLabel {
    /// Integer class of the label
    pub fn class(self) -> u8 {
        match self {
            RainLabel::NoRain => 0,
            RainLabel::Rain => 1,
        }
    }

    /// Answer to "will it rain?"
    pub fn will_rain(self) -> &'static str {
        match self {
            RainLabel::NoRain => "No",
            RainLabel::Rain => "Yes",
        }
    }
}

/// Response body of a successful prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted class, 0 or 1
    pub prediction: u8,

    /// "Yes" if the predicted class is 1, otherwise "No"
    pub will_rain: String,

    /// Probability of class 1 as a percentage with two decimals, e.g. "73.42%"
    pub probability_of_rain: String,

    /// Expected features that were absent from the request and filled with 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaulted_features: Option<Vec<String>>,
}

impl PredictionResult {
    /// Builds a result from a label and the probability mass of class 1
    pub fn new(label: RainLabel, rain_probability: f64) -> Self {
        Self {
            prediction: label.class(),
            will_rain: label.will_rain().to_string(),
            probability_of_rain: format_percentage(rain_probability),
            defaulted_features: None,
        }
    }

    /// Attaches the list of defaulted feature names
    pub fn with_defaulted_features(mut self, names: Vec<String>) -> Self {
        self.defaulted_features = Some(names);
        self
    }
}
