//! Decision normalization
//!
//! Turns a raw [`Decision`] into display-ready strings: translated action,
//! percentage metrics with deltas against a baseline, and a currency-aware
//! target price.

use crate::classifier::Market;
use crate::config::ReportConfig;
use crate::labels::{ActionTone, TradeAction, translate};
use crate::model::Decision;
use crate::observer::{AssemblyEvent, AssemblyObserver};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ACTION_METRIC: &str = "投资建议";
pub const CONFIDENCE_METRIC: &str = "置信度";
pub const RISK_METRIC: &str = "风险评分";
pub const TARGET_PRICE_METRIC: &str = "目标价位";

/// Display value of a target price that has not been determined
pub const TARGET_PRICE_PENDING: &str = "待分析";
const TARGET_PRICE_HELP_KNOWN: &str = "AI预测的目标价位";
const TARGET_PRICE_HELP_PENDING: &str = "目标价位需要更详细的分析才能确定";

const NOT_AVAILABLE: &str = "N/A";

/// Display-ready decision summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionSummary {
    pub action_label: String,
    pub action_tone: ActionTone,
    pub confidence_display: String,
    pub confidence_delta: Option<MetricDelta>,
    pub risk_display: String,
    pub risk_delta: Option<MetricDelta>,
    pub target_price_display: String,
    pub target_price_help: String,
    pub reasoning: Option<String>,
}

/// Signed difference of a metric against its baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub text: String,
    /// Higher is worse (risk)
    pub inverse: bool,
}

/// Normalize a decision for display
///
/// `symbol` only selects the currency of the target price.
pub fn summarize_decision(
    decision: &Decision,
    symbol: Option<&str>,
    config: &ReportConfig,
    observer: &dyn AssemblyObserver,
) -> DecisionSummary {
    let (action_label, action_tone) = match decision.action.as_deref() {
        Some(raw) => (
            translate::<TradeAction>(raw, observer),
            TradeAction::tone_of(raw),
        ),
        None => (NOT_AVAILABLE.to_string(), ActionTone::Positive),
    };

    let (confidence_display, confidence_delta) = format_metric(
        "confidence",
        decision.confidence.as_ref(),
        config.confidence_baseline,
        false,
        observer,
    );
    let (risk_display, risk_delta) = format_metric(
        "risk_score",
        decision.risk_score.as_ref(),
        config.risk_baseline,
        true,
        observer,
    );

    let currency = Market::classify(symbol).currency_symbol(config);
    let (target_price_display, target_price_help) =
        format_target_price(decision.target_price.as_ref(), currency, observer);

    let reasoning = decision
        .reasoning
        .as_ref()
        .filter(|text| !text.is_empty())
        .cloned();

    DecisionSummary {
        action_label,
        action_tone,
        confidence_display,
        confidence_delta,
        risk_display,
        risk_delta,
        target_price_display,
        target_price_help,
        reasoning,
    }
}

/// Format a ratio as a percentage with one decimal (`0.75` -> `75.0%`)
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

fn format_signed_percent(ratio: f64) -> String {
    format!("{:+.1}%", ratio * 100.0)
}

/// Absent or null metrics read as zero, which shows no delta.
fn format_metric(
    field: &str,
    raw: Option<&Value>,
    baseline: f64,
    inverse: bool,
    observer: &dyn AssemblyObserver,
) -> (String, Option<MetricDelta>) {
    match raw {
        None | Some(Value::Null) => (format_percent(0.0), None),
        Some(Value::Number(number)) => {
            let value = number.as_f64().unwrap_or_default();
            // Zero is indistinguishable from a defaulted value, so no delta
            let delta = (value != 0.0).then(|| MetricDelta {
                text: format_signed_percent(value - baseline),
                inverse,
            });
            (format_percent(value), delta)
        }
        Some(Value::String(text)) => (text.clone(), None),
        Some(other) => {
            let coerced = other.to_string();
            observer.observe(&AssemblyEvent::FieldCoerced {
                field: field.to_string(),
                raw: coerced.clone(),
            });
            (coerced, None)
        }
    }
}

fn format_target_price(
    raw: Option<&Value>,
    currency: &str,
    observer: &dyn AssemblyObserver,
) -> (String, String) {
    let price = match raw {
        Some(Value::Number(number)) => number.as_f64().filter(|price| *price > 0.0),
        None | Some(Value::Null) => None,
        Some(other) => {
            observer.observe(&AssemblyEvent::FieldCoerced {
                field: "target_price".to_string(),
                raw: other.to_string(),
            });
            None
        }
    };

    match price {
        Some(price) => (
            format!("{currency}{price:.2}"),
            TARGET_PRICE_HELP_KNOWN.to_string(),
        ),
        None => (
            TARGET_PRICE_PENDING.to_string(),
            TARGET_PRICE_HELP_PENDING.to_string(),
        ),
    }
}
