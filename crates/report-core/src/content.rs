//! Runtime shape classification of module content
//!
//! Payloads carry no type tag for module content. The shape is decided once,
//! here, from the module key and the kind of JSON value.

use crate::debate::{InvestmentDebate, RiskDebate};
use crate::registry::{INVESTMENT_DEBATE_KEY, RISK_DEBATE_KEY};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Module content after classification
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleContent<'a> {
    /// Absent or falsy content
    Empty,
    PlainText(&'a str),
    InvestmentDebate(InvestmentDebate),
    RiskDebate(RiskDebate),
    StructuredFields(&'a Map<String, Value>),
    /// Anything else (numbers, arrays, booleans)
    Other(&'a Value),
}

/// Discriminant of [`ModuleContent`], for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Empty,
    PlainText,
    InvestmentDebate,
    RiskDebate,
    StructuredFields,
    Other,
}

impl<'a> ModuleContent<'a> {
    /// Classify the content stored under module `key`
    pub fn classify(key: &str, value: Option<&'a Value>) -> Self {
        let Some(value) = value.filter(|v| !is_falsy(v)) else {
            return Self::Empty;
        };

        match value {
            Value::String(text) => Self::PlainText(text),
            Value::Object(map) if key == INVESTMENT_DEBATE_KEY => {
                Self::InvestmentDebate(InvestmentDebate::from_map(map))
            }
            Value::Object(map) if key == RISK_DEBATE_KEY => {
                Self::RiskDebate(RiskDebate::from_map(map))
            }
            Value::Object(map) => Self::StructuredFields(map),
            other => Self::Other(other),
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Empty => ContentKind::Empty,
            Self::PlainText(_) => ContentKind::PlainText,
            Self::InvestmentDebate(_) => ContentKind::InvestmentDebate,
            Self::RiskDebate(_) => ContentKind::RiskDebate,
            Self::StructuredFields(_) => ContentKind::StructuredFields,
            Self::Other(_) => ContentKind::Other,
        }
    }
}

/// Truthiness of a JSON value: null, false, zero, "", [] and {} are falsy
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Text form of a value: strings verbatim, everything else as JSON
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Heading for a structured field name (`price_target` -> `Price Target`)
///
/// A letter is upper-cased when it starts a word, i.e. follows anything that
/// is not a letter, and lower-cased otherwise.
pub fn field_heading(name: &str) -> String {
    let mut heading = String::with_capacity(name.len());
    let mut previous_is_letter = false;

    for ch in name.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if previous_is_letter {
                heading.extend(ch.to_lowercase());
            } else {
                heading.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            heading.push(ch);
            previous_is_letter = false;
        }
    }

    heading
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_falsy_values() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(is_falsy(&value), "{value} should be falsy");
        }
        for value in [json!(true), json!(1), json!(" "), json!([0]), json!({"a": null})] {
            assert!(!is_falsy(&value), "{value} should be truthy");
        }
    }

    #[test]
    fn test_classify_by_value_kind() {
        let text = json!("report");
        assert_eq!(
            ModuleContent::classify("market_report", Some(&text)),
            ModuleContent::PlainText("report")
        );

        let fields = json!({"support": 10});
        assert_eq!(
            ModuleContent::classify("market_report", Some(&fields)).kind(),
            ContentKind::StructuredFields
        );

        let number = json!(42);
        assert_eq!(
            ModuleContent::classify("market_report", Some(&number)),
            ModuleContent::Other(&number)
        );
    }

    #[test]
    fn test_classify_by_key_identity() {
        let debate = json!({"bull_history": "up"});
        assert_eq!(
            ModuleContent::classify(INVESTMENT_DEBATE_KEY, Some(&debate)).kind(),
            ContentKind::InvestmentDebate
        );
        assert_eq!(
            ModuleContent::classify(RISK_DEBATE_KEY, Some(&debate)).kind(),
            ContentKind::RiskDebate
        );

        // The same key with string content is plain text
        let text = json!("summary only");
        assert_eq!(
            ModuleContent::classify(RISK_DEBATE_KEY, Some(&text)).kind(),
            ContentKind::PlainText
        );
    }

    #[test]
    fn test_classify_empty() {
        assert_eq!(ModuleContent::classify("news_report", None), ModuleContent::Empty);
        let empty = json!({});
        assert_eq!(
            ModuleContent::classify(INVESTMENT_DEBATE_KEY, Some(&empty)),
            ModuleContent::Empty
        );
    }

    #[test]
    fn test_field_heading() {
        assert_eq!(field_heading("bull_history"), "Bull History");
        assert_eq!(field_heading("PE_RATIO"), "Pe Ratio");
        assert_eq!(field_heading("ma20_signal"), "Ma20 Signal");
        assert_eq!(field_heading("top3x"), "Top3X");
        assert_eq!(field_heading("支撑位"), "支撑位");
    }
}
