//! Debate transcript formatting
//!
//! The research team (bull/bear researchers judged by the research manager)
//! and the risk team (aggressive/conservative/neutral analysts judged by the
//! portfolio manager) both report as multi-party transcripts. Each formats to
//! an ordered list of labeled blocks; empty contributions are skipped.

use crate::content::{is_falsy, value_text};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Separator rendered after a debate contribution
pub const BLOCK_SEPARATOR: &str = "---";

/// One labeled contribution of a debate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledBlock {
    pub icon: String,
    pub label: String,
    pub text: String,
    /// Whether a [`BLOCK_SEPARATOR`] follows this block
    pub separator: bool,
}

/// Research-team debate transcript
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvestmentDebate {
    pub bull_history: Option<String>,
    pub bear_history: Option<String>,
    pub judge_decision: Option<String>,
}

/// Risk-management-team debate transcript
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskDebate {
    pub risky_history: Option<String>,
    pub safe_history: Option<String>,
    pub neutral_history: Option<String>,
    pub judge_decision: Option<String>,
}

impl InvestmentDebate {
    /// Pick the known fields out of a raw mapping, ignoring the rest
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            bull_history: text_field(map, "bull_history"),
            bear_history: text_field(map, "bear_history"),
            judge_decision: text_field(map, "judge_decision"),
        }
    }

    pub fn blocks(&self) -> Vec<LabeledBlock> {
        let mut blocks = Vec::new();
        push_block(&mut blocks, "📈", "多头研究员分析", self.bull_history.as_deref(), true);
        push_block(&mut blocks, "📉", "空头研究员分析", self.bear_history.as_deref(), true);
        push_block(
            &mut blocks,
            "🎯",
            "研究经理综合决策",
            self.judge_decision.as_deref(),
            false,
        );
        blocks
    }
}

impl RiskDebate {
    /// Pick the known fields out of a raw mapping, ignoring the rest
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            risky_history: text_field(map, "risky_history"),
            safe_history: text_field(map, "safe_history"),
            neutral_history: text_field(map, "neutral_history"),
            judge_decision: text_field(map, "judge_decision"),
        }
    }

    pub fn blocks(&self) -> Vec<LabeledBlock> {
        let mut blocks = Vec::new();
        push_block(&mut blocks, "🚀", "激进分析师评估", self.risky_history.as_deref(), true);
        push_block(&mut blocks, "🛡️", "保守分析师评估", self.safe_history.as_deref(), true);
        push_block(&mut blocks, "⚖️", "中性分析师评估", self.neutral_history.as_deref(), true);
        push_block(
            &mut blocks,
            "🎯",
            "投资组合经理最终决策",
            self.judge_decision.as_deref(),
            false,
        );
        blocks
    }
}

fn text_field(map: &Map<String, Value>, name: &str) -> Option<String> {
    map.get(name)
        .filter(|value| !is_falsy(value))
        .map(value_text)
}

fn push_block(
    blocks: &mut Vec<LabeledBlock>,
    icon: &str,
    label: &str,
    text: Option<&str>,
    separator: bool,
) {
    if let Some(text) = text.filter(|t| !t.is_empty()) {
        blocks.push(LabeledBlock {
            icon: icon.to_string(),
            label: label.to_string(),
            text: text.to_string(),
            separator,
        });
    }
}
