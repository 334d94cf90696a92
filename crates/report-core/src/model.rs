//! Analysis result payload types
//!
//! These types mirror the loosely-structured payload produced by the analysis
//! engine. Every field is optional on the wire; fields whose shape cannot be
//! trusted (confidence, risk score, target price, module content) are kept as
//! raw JSON and interpreted later by the normalizer and the dispatcher.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Top-level analysis result handed over by the analysis engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    /// Instrument symbol, e.g. `AAPL` or `600519`
    #[serde(deserialize_with = "symbol_from_json")]
    pub stock_symbol: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub decision: Decision,
    #[serde(deserialize_with = "null_as_default")]
    pub state: AnalysisState,
    pub is_demo: bool,
    pub demo_reason: Option<String>,
    pub llm_provider: Option<String>,
    pub llm_model: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub analysts: Vec<String>,
}

/// Raw trading decision record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Decision {
    pub action: Option<String>,
    pub confidence: Option<Value>,
    pub risk_score: Option<Value>,
    pub target_price: Option<Value>,
    pub reasoning: Option<String>,
}

/// Per-module report content keyed by module key, in payload order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisState(Map<String, Value>);

impl AnalysisResult {
    /// Decode a payload from a JSON value
    ///
    /// `null` and `{}` are reported as [`ReportError::MissingPayload`].
    pub fn from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Null => return Err(ReportError::MissingPayload),
            Value::Object(map) if map.is_empty() => return Err(ReportError::MissingPayload),
            _ => {}
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Create a payload for a symbol with everything else defaulted
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            stock_symbol: Some(symbol.into()),
            ..Default::default()
        }
    }

    pub fn with_decision(mut self, decision: Decision) -> Self {
        self.decision = decision;
        self
    }

    pub fn with_state(mut self, state: AnalysisState) -> Self {
        self.state = state;
        self
    }

    /// Mark the payload as synthetic demo data
    pub fn with_demo(mut self, reason: Option<String>) -> Self {
        self.is_demo = true;
        self.demo_reason = reason;
        self
    }

    pub fn with_llm(mut self, provider: impl Into<String>, model: impl Into<String>) -> Self {
        self.llm_provider = Some(provider.into());
        self.llm_model = Some(model.into());
        self
    }

    pub fn with_analysts<I, S>(mut self, analysts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.analysts = analysts.into_iter().map(Into::into).collect();
        self
    }

    pub fn symbol(&self) -> Option<&str> {
        self.stock_symbol.as_deref()
    }
}

/// Decode a payload from JSON text
pub fn parse_payload(input: &str) -> Result<AnalysisResult> {
    let value: Value = serde_json::from_str(input)?;
    AnalysisResult::from_value(value)
}

impl AnalysisState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Map<String, Value>> for AnalysisState {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Symbols occasionally arrive as bare numbers (`600519`)
fn symbol_from_json<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "stock_symbol must be a string, got {other}"
        ))),
    }
}
