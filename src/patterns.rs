use crate::error::{FinancialDocumentError, Result};
use crate::metrics::{MetricValue, Metrics};
use crate::number::normalize_number;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const DEFAULT_SEPARATORS: &str = " \t\r\n:$€£¥";

const DEFAULT_CONNECTIVES: &[&str] = &[
    "was", "were", "is", "are", "of", "at", "to", "totaled", "totalled", "amounted", "reached",
    "stood",
];

/// How the number after a label is located and captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureRule {
    /// Characters skipped between the label and the number.
    pub separators: String,
    /// Words that may sit between the label and the number ("revenue was 10").
    pub connectives: Vec<String>,
    /// Whether letters or digits glued to the number are captured with it.
    /// Such a token fails to parse and is kept as a degraded value.
    pub capture_residue: bool,
}

impl Default for CaptureRule {
    fn default() -> Self {
        Self {
            separators: DEFAULT_SEPARATORS.to_string(),
            connectives: DEFAULT_CONNECTIVES.iter().map(|c| c.to_string()).collect(),
            capture_residue: true,
        }
    }
}

impl CaptureRule {
    fn separator_class(&self) -> String {
        let escaped: String = self
            .separators
            .chars()
            .map(|c| match c {
                '\t' => r"\t".to_string(),
                '\r' => r"\r".to_string(),
                '\n' => r"\n".to_string(),
                c if c.is_ascii_punctuation() => format!(r"\{}", c),
                c => c.to_string(),
            })
            .collect();
        format!("[{}]", escaped)
    }

    fn pattern_after_label(&self) -> String {
        let separators = self.separator_class();

        let connectives = if self.connectives.is_empty() {
            String::new()
        } else {
            let words: Vec<String> = self
                .connectives
                .iter()
                .map(|w| regex::escape(&w.to_lowercase()))
                .collect();
            format!(r"(?:{}+(?:{})\b)*", separators, words.join("|"))
        };

        let residue = if self.capture_residue { r"\w*" } else { "" };

        format!(
            r"{}{}*([0-9][0-9,]*(?:\.[0-9]+)?{})",
            connectives, separators, residue
        )
    }
}

/// Declarative description of one metric: its name, label synonyms, and the
/// rule used to capture the figure that follows a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDefinition {
    pub name: String,
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub capture: CaptureRule,
}

impl MetricDefinition {
    pub fn new(name: impl Into<String>, synonyms: &[&str]) -> Self {
        Self {
            name: name.into(),
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
            capture: CaptureRule::default(),
        }
    }

    #[must_use]
    pub fn with_capture(mut self, capture: CaptureRule) -> Self {
        self.capture = capture;
        self
    }
}

/// A compiled metric definition.
#[derive(Debug, Clone)]
pub struct MetricPattern {
    definition: MetricDefinition,
    regex: Regex,
}

impl MetricPattern {
    pub fn compile(definition: MetricDefinition) -> Result<Self> {
        let invalid = |reason: &str| FinancialDocumentError::InvalidPattern {
            metric: definition.name.clone(),
            reason: reason.to_string(),
        };

        if definition.name.trim().is_empty() {
            return Err(invalid("metric name is empty"));
        }

        let labels: Vec<String> = definition
            .synonyms
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .map(|s| regex::escape(&s))
            .collect();

        if labels.is_empty() {
            return Err(invalid("no synonyms given"));
        }

        let pattern = format!(
            r"\b(?:{}){}",
            labels.join("|"),
            definition.capture.pattern_after_label()
        );

        let regex = Regex::new(&pattern).map_err(|e| invalid(&e.to_string()))?;

        Ok(Self { definition, regex })
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn synonyms(&self) -> &[String] {
        &self.definition.synonyms
    }

    pub fn definition(&self) -> &MetricDefinition {
        &self.definition
    }

    /// Returns the token captured at the earliest match in already
    /// lower-cased text.
    pub fn first_token<'t>(&self, lowered: &'t str) -> Option<&'t str> {
        self.regex
            .captures(lowered)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

static STANDARD: LazyLock<MetricPatternSet> = LazyLock::new(|| {
    MetricPatternSet::new(MetricPatternSet::standard_definitions())
        .expect("standard metric table is valid")
});

/// Ordered table of metric patterns evaluated by a single matching routine.
#[derive(Debug, Clone)]
pub struct MetricPatternSet {
    patterns: Vec<MetricPattern>,
}

impl MetricPatternSet {
    pub fn new(definitions: Vec<MetricDefinition>) -> Result<Self> {
        let mut patterns: Vec<MetricPattern> = Vec::with_capacity(definitions.len());

        for definition in definitions {
            if patterns.iter().any(|p| p.name() == definition.name) {
                return Err(FinancialDocumentError::InvalidPattern {
                    metric: definition.name,
                    reason: "duplicate metric name".to_string(),
                });
            }
            patterns.push(MetricPattern::compile(definition)?);
        }

        Ok(Self { patterns })
    }

    /// The process-wide default table: revenue, expenses, profit, assets,
    /// liabilities, equity.
    pub fn standard() -> &'static MetricPatternSet {
        &STANDARD
    }

    pub fn standard_definitions() -> Vec<MetricDefinition> {
        vec![
            MetricDefinition::new("revenue", &["total revenue", "revenue", "sales"]),
            MetricDefinition::new("expenses", &["total expenses", "expenses", "costs"]),
            MetricDefinition::new(
                "profit",
                &["net profit", "profit", "net income", "earnings"],
            ),
            MetricDefinition::new("assets", &["total assets", "assets"]),
            MetricDefinition::new("liabilities", &["total liabilities", "liabilities"]),
            MetricDefinition::new(
                "equity",
                &["total equity", "shareholders equity", "equity"],
            ),
        ]
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.name())
    }

    pub fn patterns(&self) -> &[MetricPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Extracts the first figure for each metric, in declaration order.
    /// Metrics without a match are left out.
    pub fn extract(&self, text: &str) -> Metrics {
        let lowered = text.to_lowercase();
        let mut metrics = Metrics::new();

        for pattern in &self.patterns {
            let Some(token) = pattern.first_token(&lowered) else {
                continue;
            };

            let value = normalize_number(token);
            if let MetricValue::Raw(raw) = &value {
                debug!(
                    "Metric '{}' matched unparseable token '{}', keeping raw text",
                    pattern.name(),
                    raw
                );
            }
            metrics.insert(pattern.name(), value);
        }

        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_order() {
        let names: Vec<&str> = MetricPatternSet::standard().names().collect();
        assert_eq!(
            names,
            vec!["revenue", "expenses", "profit", "assets", "liabilities", "equity"]
        );
    }

    #[test]
    fn test_label_separators() {
        let set = MetricPatternSet::standard();
        let pattern = &set.patterns()[0];
        assert_eq!(pattern.first_token("revenue: $1,200"), Some("1,200"));
        assert_eq!(pattern.first_token("revenue\t\t300"), Some("300"));
        assert_eq!(pattern.first_token("sales €75.5"), Some("75.5"));
        assert_eq!(pattern.first_token("revenue - 2023 - 1,000"), None);
        assert_eq!(pattern.first_token("revenue grew to 10"), None);
    }

    #[test]
    fn test_connectives() {
        let profit = &MetricPatternSet::standard().patterns()[2];
        assert_eq!(profit.first_token("net income was $45,000"), Some("45,000"));
        assert_eq!(
            profit.first_token("earnings amounted to 9,000.25."),
            Some("9,000.25")
        );
    }

    #[test]
    fn test_synonyms_need_word_start() {
        let revenue = &MetricPatternSet::standard().patterns()[0];
        assert_eq!(revenue.first_token("wholesales: 500"), None);
        assert_eq!(revenue.first_token("wholesales: 500 sales: 40"), Some("40"));
    }

    #[test]
    fn test_residue_capture_can_be_disabled() {
        let strict = CaptureRule {
            capture_residue: false,
            ..CaptureRule::default()
        };
        let set = MetricPatternSet::new(vec![
            MetricDefinition::new("revenue", &["revenue"]).with_capture(strict)
        ])
        .unwrap();

        let metrics = set.extract("Revenue: 12,34a");
        assert_eq!(metrics.get("revenue"), Some(&MetricValue::Number(1234.0)));
    }

    #[test]
    fn test_custom_metric_needs_no_new_code() {
        let mut definitions = MetricPatternSet::standard_definitions();
        definitions.push(MetricDefinition::new(
            "cash",
            &["cash and cash equivalents", "cash"],
        ));
        let set = MetricPatternSet::new(definitions).unwrap();

        let metrics = set.extract("Cash and cash equivalents: 12,500. Revenue: 90");
        assert_eq!(metrics.get("cash"), Some(&MetricValue::Number(12_500.0)));
        assert_eq!(metrics.get("revenue"), Some(&MetricValue::Number(90.0)));
        assert_eq!(metrics.names().last(), Some("cash"));
    }

    #[test]
    fn test_invalid_definitions() {
        let err = MetricPatternSet::new(vec![MetricDefinition::new("revenue", &[])]).unwrap_err();
        assert!(matches!(err, FinancialDocumentError::InvalidPattern { .. }));

        let err = MetricPatternSet::new(vec![MetricDefinition::new(" ", &["x"])]).unwrap_err();
        assert!(matches!(err, FinancialDocumentError::InvalidPattern { .. }));

        let err = MetricPatternSet::new(vec![
            MetricDefinition::new("revenue", &["revenue"]),
            MetricDefinition::new("revenue", &["sales"]),
        ])
        .unwrap_err();
        assert!(matches!(err, FinancialDocumentError::InvalidPattern { .. }));
    }

    #[test]
    fn test_synonyms_are_escaped() {
        let set = MetricPatternSet::new(vec![MetricDefinition::new(
            "ebitda",
            &["ebitda (adj.)"],
        )])
        .unwrap();
        let metrics = set.extract("EBITDA (adj.): 7,000");
        assert_eq!(metrics.get("ebitda"), Some(&MetricValue::Number(7000.0)));
    }
}
