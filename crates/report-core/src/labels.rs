//! Fixed display-label tables
//!
//! Each table is a closed enum with a display label. Values missing from a
//! table are never an error: [`translate`] passes them through verbatim and
//! reports the miss to the observer.

use crate::observer::{AssemblyEvent, AssemblyObserver};
use serde::{Deserialize, Serialize};

/// Identifies a lookup table in observer events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelTable {
    Action,
    Provider,
    Model,
    AnalystRole,
}

/// A closed set of identifiers with fixed display labels
pub trait DisplayLabel: Sized {
    /// Table this type stands for
    const TABLE: LabelTable;

    /// Resolve a raw identifier
    fn lookup(raw: &str) -> Option<Self>;

    /// Display label
    fn label(&self) -> &'static str;
}

/// Translate `raw` through table `T`, falling back to `raw` itself
pub fn translate<T: DisplayLabel>(raw: &str, observer: &dyn AssemblyObserver) -> String {
    match T::lookup(raw) {
        Some(entry) => entry.label().to_string(),
        None => {
            observer.observe(&AssemblyEvent::LabelPassedThrough {
                table: T::TABLE,
                value: raw.to_string(),
            });
            raw.to_string()
        }
    }
}

/// Trading action recommended by the analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeAction {
    Buy,
    Sell,
    Hold,
}

/// How a metric should be coloured by the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTone {
    Positive,
    Negative,
    Neutral,
}

impl TradeAction {
    /// Tone used for this action
    pub fn tone(&self) -> ActionTone {
        match self {
            Self::Buy => ActionTone::Positive,
            Self::Sell => ActionTone::Negative,
            Self::Hold => ActionTone::Neutral,
        }
    }

    /// Tone for a raw action; unrecognised actions read as positive
    pub fn tone_of(raw: &str) -> ActionTone {
        Self::lookup(raw).map_or(ActionTone::Positive, |action| action.tone())
    }
}

impl DisplayLabel for TradeAction {
    const TABLE: LabelTable = LabelTable::Action;

    /// Case-insensitive; already-localized labels map to themselves
    fn lookup(raw: &str) -> Option<Self> {
        match raw.to_uppercase().as_str() {
            "BUY" | "买入" => Some(Self::Buy),
            "SELL" | "卖出" => Some(Self::Sell),
            "HOLD" | "持有" => Some(Self::Hold),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Buy => "买入",
            Self::Sell => "卖出",
            Self::Hold => "持有",
        }
    }
}

/// LLM provider that produced the analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LlmProvider {
    DashScope,
    Google,
}

impl DisplayLabel for LlmProvider {
    const TABLE: LabelTable = LabelTable::Provider;

    fn lookup(raw: &str) -> Option<Self> {
        match raw {
            "dashscope" => Some(Self::DashScope),
            "google" => Some(Self::Google),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::DashScope => "阿里百炼",
            Self::Google => "Google AI",
        }
    }
}

/// LLM model identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LlmModel {
    QwenTurbo,
    QwenPlus,
    QwenMax,
    Gemini20Flash,
    Gemini15Pro,
    Gemini15Flash,
}

impl DisplayLabel for LlmModel {
    const TABLE: LabelTable = LabelTable::Model;

    fn lookup(raw: &str) -> Option<Self> {
        match raw {
            "qwen-turbo" => Some(Self::QwenTurbo),
            "qwen-plus" => Some(Self::QwenPlus),
            "qwen-max" => Some(Self::QwenMax),
            "gemini-2.0-flash" => Some(Self::Gemini20Flash),
            "gemini-1.5-pro" => Some(Self::Gemini15Pro),
            "gemini-1.5-flash" => Some(Self::Gemini15Flash),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::QwenTurbo => "Qwen Turbo",
            Self::QwenPlus => "Qwen Plus",
            Self::QwenMax => "Qwen Max",
            Self::Gemini20Flash => "Gemini 2.0 Flash",
            Self::Gemini15Pro => "Gemini 1.5 Pro",
            Self::Gemini15Flash => "Gemini 1.5 Flash",
        }
    }
}

/// Analyst role taking part in the analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalystRole {
    Market,
    Fundamentals,
    News,
    SocialMedia,
    Risk,
}

impl DisplayLabel for AnalystRole {
    const TABLE: LabelTable = LabelTable::AnalystRole;

    fn lookup(raw: &str) -> Option<Self> {
        match raw {
            "market" => Some(Self::Market),
            "fundamentals" => Some(Self::Fundamentals),
            "news" => Some(Self::News),
            "social_media" => Some(Self::SocialMedia),
            "risk" => Some(Self::Risk),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Market => "📈 市场技术分析师",
            Self::Fundamentals => "💰 基本面分析师",
            Self::News => "📰 新闻分析师",
            Self::SocialMedia => "💭 社交媒体分析师",
            Self::Risk => "⚠️ 风险评估师",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{MockAssemblyObserver, NoopObserver};

    #[test]
    fn test_action_case_insensitive() {
        let buy = translate::<TradeAction>("buy", &NoopObserver);
        assert_eq!(buy, "买入");
        assert_eq!(translate::<TradeAction>("BUY", &NoopObserver), buy);
        assert_eq!(translate::<TradeAction>("Buy", &NoopObserver), buy);
    }

    #[test]
    fn test_action_idempotent() {
        for raw in ["sell", "HOLD", "买入"] {
            let once = translate::<TradeAction>(raw, &NoopObserver);
            let twice = translate::<TradeAction>(&once, &NoopObserver);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_unknown_action_passes_through() {
        let mut observer = MockAssemblyObserver::new();
        observer
            .expect_observe()
            .withf(|event| {
                *event
                    == AssemblyEvent::LabelPassedThrough {
                        table: LabelTable::Action,
                        value: "TRIM".to_string(),
                    }
            })
            .times(1)
            .return_const(());

        assert_eq!(translate::<TradeAction>("TRIM", &observer), "TRIM");
    }

    #[test]
    fn test_padded_action_is_not_recognised() {
        assert_eq!(translate::<TradeAction>(" buy ", &NoopObserver), " buy ");
        assert_eq!(translate::<TradeAction>("buy\n", &NoopObserver), "buy\n");
    }

    #[test]
    fn test_action_tone() {
        assert_eq!(TradeAction::tone_of("buy"), ActionTone::Positive);
        assert_eq!(TradeAction::tone_of("卖出"), ActionTone::Negative);
        assert_eq!(TradeAction::tone_of("hold"), ActionTone::Neutral);
        assert_eq!(TradeAction::tone_of("TRIM"), ActionTone::Positive);
    }

    #[test]
    fn test_provider_and_model_labels() {
        assert_eq!(translate::<LlmProvider>("dashscope", &NoopObserver), "阿里百炼");
        assert_eq!(translate::<LlmProvider>("google", &NoopObserver), "Google AI");
        assert_eq!(translate::<LlmProvider>("openai", &NoopObserver), "openai");

        assert_eq!(translate::<LlmModel>("qwen-plus", &NoopObserver), "Qwen Plus");
        assert_eq!(
            translate::<LlmModel>("gemini-2.0-flash", &NoopObserver),
            "Gemini 2.0 Flash"
        );
        // Model ids are case-sensitive
        assert_eq!(translate::<LlmModel>("QWEN-PLUS", &NoopObserver), "QWEN-PLUS");
    }

    #[test]
    fn test_analyst_role_labels() {
        assert_eq!(
            translate::<AnalystRole>("social_media", &NoopObserver),
            "💭 社交媒体分析师"
        );
        assert_eq!(translate::<AnalystRole>("quant", &NoopObserver), "quant");
    }
}
