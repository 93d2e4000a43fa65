use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::io::Read;
use thiserror::Error;

/// Value stored for a single answer, list item or rating entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Numeric reading of the scalar. Unparseable text and booleans read as 0.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Number(value) if value.is_finite() => *value,
            Self::Text(raw) => parse_number(raw),
            _ => 0.0,
        }
    }

    fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Number(value) => *value != 0.0 && !value.is_nan(),
            Self::Text(value) => {
                let trimmed = value.trim();
                !(trimmed.is_empty() || trimmed == "no" || trimmed == "false" || trimmed == "0")
            }
        }
    }
}

/// Answer recorded against a question key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
    Ratings(BTreeMap<String, Scalar>),
    /// Anything else the questionnaire produced; read as absent by every accessor.
    Other(serde_json::Value),
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::Text(value.to_string()))
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        Self::Scalar(Scalar::Text(value))
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

impl From<i32> for AnswerValue {
    fn from(value: i32) -> Self {
        Self::Scalar(Scalar::Number(f64::from(value)))
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        Self::Scalar(Scalar::Number(value))
    }
}

impl<const N: usize> From<[&str; N]> for AnswerValue {
    fn from(items: [&str; N]) -> Self {
        Self::List(
            items
                .iter()
                .map(|item| Scalar::Text((*item).to_string()))
                .collect(),
        )
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items.into_iter().map(Scalar::Text).collect())
    }
}

impl<const N: usize> From<[(&str, i32); N]> for AnswerValue {
    fn from(entries: [(&str, i32); N]) -> Self {
        Self::Ratings(
            entries
                .iter()
                .map(|(key, value)| ((*key).to_string(), Scalar::Number(f64::from(*value))))
                .collect(),
        )
    }
}

#[derive(Debug, Error)]
pub enum AnswerSetError {
    #[error("answers document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("answers document must be a JSON object keyed by question id")]
    NotAnObject,
    #[error("failed to read answers: {0}")]
    Io(#[from] std::io::Error),
}

/// Questionnaire responses keyed by question id.
///
/// Every accessor is lenient: a missing key, a JSON `null`, or a value of
/// an unexpected shape reads as the neutral value for that accessor rather
/// than failing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, Option<AnswerValue>>")]
pub struct AnswerSet {
    values: BTreeMap<String, AnswerValue>,
}

impl From<BTreeMap<String, Option<AnswerValue>>> for AnswerSet {
    fn from(raw: BTreeMap<String, Option<AnswerValue>>) -> Self {
        let values = raw
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
            .filter(|(_, value)| !matches!(value, AnswerValue::Other(serde_json::Value::Null)))
            .collect();
        Self { values }
    }
}

impl Serialize for AnswerSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.values.serialize(serializer)
    }
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(raw: &str) -> Result<Self, AnswerSetError> {
        let document: serde_json::Value = serde_json::from_str(raw)?;
        Self::from_json_value(document)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, AnswerSetError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_value(document: serde_json::Value) -> Result<Self, AnswerSetError> {
        if !document.is_object() {
            return Err(AnswerSetError::NotAnObject);
        }
        Ok(serde_json::from_value(document)?)
    }

    /// Builder-style insert, mostly for fixtures and tests.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AnswerValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<AnswerValue> {
        self.values.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    fn scalar(&self, key: &str) -> Option<&Scalar> {
        match self.values.get(key) {
            Some(AnswerValue::Scalar(scalar)) => Some(scalar),
            _ => None,
        }
    }

    /// Text of a single-choice or free-text answer.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.scalar(key).and_then(Scalar::as_text)
    }

    /// Free text, empty when absent.
    pub fn text_or_empty(&self, key: &str) -> &str {
        self.text(key).unwrap_or_default()
    }

    pub fn is(&self, key: &str, expected: &str) -> bool {
        self.text(key).map(str::trim) == Some(expected)
    }

    pub fn is_yes(&self, key: &str) -> bool {
        self.is(key, "yes")
    }

    /// Numeric answer; absent or unparseable values read as 0.
    pub fn decimal(&self, key: &str) -> f64 {
        self.scalar(key).map(Scalar::to_number).unwrap_or(0.0)
    }

    /// Integer answer, truncated toward zero.
    pub fn integer(&self, key: &str) -> i64 {
        self.decimal(key).trunc() as i64
    }

    /// Items of a multi-select answer. Non-text items are skipped.
    pub fn list(&self, key: &str) -> Vec<&str> {
        match self.values.get(key) {
            Some(AnswerValue::List(items)) => items.iter().filter_map(Scalar::as_text).collect(),
            _ => Vec::new(),
        }
    }

    /// Number of entries in a multi-select answer, text or not.
    pub fn list_len(&self, key: &str) -> usize {
        match self.values.get(key) {
            Some(AnswerValue::List(items)) => items.len(),
            _ => 0,
        }
    }

    pub fn contains(&self, key: &str, item: &str) -> bool {
        self.list(key).into_iter().any(|value| value.trim() == item)
    }

    pub fn contains_any(&self, key: &str, items: &[&str]) -> bool {
        items.iter().any(|item| self.contains(key, item))
    }

    pub fn ratings(&self, key: &str) -> Option<&BTreeMap<String, Scalar>> {
        match self.values.get(key) {
            Some(AnswerValue::Ratings(ratings)) => Some(ratings),
            _ => None,
        }
    }

    /// One entry of a ratings answer; missing entries read as 0.
    pub fn rating(&self, key: &str, entry: &str) -> f64 {
        self.ratings(key)
            .and_then(|ratings| ratings.get(entry))
            .map(Scalar::to_number)
            .unwrap_or(0.0)
    }

    /// Mean over the named entries of a ratings answer, counting missing entries as 0.
    pub fn rating_average(&self, key: &str, entries: &[&str]) -> f64 {
        if entries.is_empty() {
            return 0.0;
        }
        let total: f64 = entries.iter().map(|entry| self.rating(key, entry)).sum();
        total / entries.len() as f64
    }

    /// Mean over every entry present in a ratings answer, if any.
    pub fn rating_mean(&self, key: &str) -> Option<f64> {
        let ratings = self.ratings(key)?;
        if ratings.is_empty() {
            return None;
        }
        let total: f64 = ratings.values().map(Scalar::to_number).sum();
        Some(total / ratings.len() as f64)
    }

    /// Presence test used for optional capability flags: the answer exists
    /// and is not an empty or negative value.
    pub fn is_truthy(&self, key: &str) -> bool {
        match self.values.get(key) {
            None => false,
            Some(AnswerValue::Scalar(scalar)) => scalar.is_truthy(),
            Some(AnswerValue::List(items)) => !items.is_empty(),
            Some(AnswerValue::Ratings(ratings)) => !ratings.is_empty(),
            Some(AnswerValue::Other(value)) => !value.is_null(),
        }
    }
}

fn parse_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls_are_treated_as_absent() {
        let answers =
            AnswerSet::from_json_str(r#"{"ngoWebsite": "yes", "ngoYear": null, "ngoLocation": ["tier1", null]}"#)
                .expect("answers parse");

        assert_eq!(answers.len(), 2);
        assert!(!answers.contains_key("ngoYear"));
        assert_eq!(answers.integer("ngoYear"), 0);
        assert!(answers.is_yes("ngoWebsite"));
    }

    #[test]
    fn numeric_strings_parse_and_malformed_values_read_as_zero() {
        let answers = AnswerSet::new()
            .with("ngoBudget", "7500000")
            .with("ngoStaff", "twelve")
            .with("ngoYear", 2015.9);

        assert_eq!(answers.integer("ngoBudget"), 7_500_000);
        assert_eq!(answers.integer("ngoStaff"), 0);
        assert_eq!(answers.integer("ngoYear"), 2015);
        assert_eq!(answers.integer("missing"), 0);
    }

    #[test]
    fn shape_mismatches_are_lenient() {
        let answers = AnswerSet::new()
            .with("ngoLocation", "tier1")
            .with("ngoDigitalSkills", ["digitalMarketing"]);

        assert!(answers.list("ngoLocation").is_empty());
        assert!(answers.ratings("ngoDigitalSkills").is_none());
        assert_eq!(answers.rating("ngoDigitalSkills", "digitalMarketing"), 0.0);
        assert_eq!(answers.text("ngoDigitalSkills"), None);
    }

    #[test]
    fn ratings_average_counts_missing_entries_as_zero() {
        let answers = AnswerSet::new().with(
            "ngoEventCapacity",
            [("eventPlanning", 5), ("eventMarketing", 5)],
        );

        let average = answers.rating_average("ngoEventCapacity", &["eventPlanning", "eventMarketing", "eventTicketing", "eventVolunteers"]);
        assert_eq!(average, 2.5);
        assert_eq!(answers.rating_mean("ngoEventCapacity"), Some(5.0));
    }

    #[test]
    fn truthiness_rejects_empty_and_negative_answers() {
        let answers = AnswerSet::new()
            .with("ngoHasProduct", "handicrafts")
            .with("ngoEmpty", "")
            .with("ngoNo", "no")
            .with("ngoFalse", false)
            .with("ngoList", ["a"]);

        assert!(answers.is_truthy("ngoHasProduct"));
        assert!(answers.is_truthy("ngoList"));
        assert!(!answers.is_truthy("ngoEmpty"));
        assert!(!answers.is_truthy("ngoNo"));
        assert!(!answers.is_truthy("ngoFalse"));
        assert!(!answers.is_truthy("ngoMissing"));
    }

    #[test]
    fn non_object_documents_are_rejected() {
        match AnswerSet::from_json_str("[1, 2, 3]") {
            Err(AnswerSetError::NotAnObject) => {}
            other => panic!("expected NotAnObject, got {other:?}"),
        }
    }
}
