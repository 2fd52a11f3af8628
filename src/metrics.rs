use crate::patterns::MetricPatternSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum MetricValue {
    #[schemars(description = "The figure parsed as a decimal number, thousands separators removed")]
    Number(f64),

    #[schemars(
        description = "The captured token verbatim, kept when it could not be parsed as a number"
    )]
    Raw(String),
}

impl MetricValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Raw(_) => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{}", value),
            Self::Raw(raw) => write!(f, "{}", raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetricEntry {
    #[schemars(description = "Metric name from the pattern table, e.g. 'revenue'")]
    pub name: String,

    #[schemars(description = "First figure found after one of the metric's labels")]
    pub value: MetricValue,
}

/// Metric name to value, kept in pattern declaration order.
///
/// A missing name means the metric was not found, never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Metrics {
    entries: Vec<MetricEntry>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a metric unless one with the same name is already present.
    pub(crate) fn insert(&mut self, name: &str, value: MetricValue) {
        if self.contains(name) {
            return;
        }
        self.entries.push(MetricEntry {
            name: name.to_string(),
            value,
        });
    }

    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.entries
            .iter()
            .map(|entry| (entry.name.as_str(), &entry.value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Extracts the standard financial metrics from document text.
pub fn extract_metrics(text: &str) -> Metrics {
    MetricPatternSet::standard().extract(text)
}
