//! Report assembly
//!
//! [`ReportAssembler`] composes the decision summary, the configuration
//! block, the dispatched sections and the fixed risk disclaimer into a
//! [`Report`]. Apart from the generation timestamp the result is a pure
//! function of the payload.

use crate::config::ReportConfig;
use crate::decision::{DecisionSummary, summarize_decision};
use crate::error::{ReportError, Result};
use crate::labels::{AnalystRole, LlmModel, LlmProvider, translate};
use crate::model::AnalysisResult;
use crate::observer::{AssemblyObserver, TracingObserver};
use crate::section::{Section, dispatch_sections};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::sync::Arc;

/// Notice shown by the caller instead of a report when there is no payload
///
/// Raised as [`ReportError::MissingPayload`] by [`crate::model::parse_payload`].
pub const NO_RESULTS_NOTICE: &str = "暂无分析结果";

const NOT_AVAILABLE: &str = "N/A";

const DEMO_BANNER: &str = "🎭 **演示模式**: 当前显示的是模拟分析数据，用于界面演示。要获取真实分析结果，请配置正确的API密钥。";
const DEMO_NOTICE: &str = "**演示数据**: 当前显示的是模拟数据，仅用于界面演示\n**真实分析**: 要获取真实分析结果，请配置正确的API密钥";

const DISCLAIMER_TITLE: &str = "⚠️ 重要风险提示";
const DISCLAIMER_BODY: &str = "**投资风险提示**:
- **仅供参考**: 本分析结果仅供参考，不构成投资建议
- **投资风险**: 股票投资有风险，可能导致本金损失
- **理性决策**: 请结合多方信息进行理性投资决策
- **专业咨询**: 重大投资决策建议咨询专业财务顾问
- **自担风险**: 投资决策及其后果由投资者自行承担";

/// Assembled report, ready for a rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub header: String,
    pub demo_banner: Option<DemoBanner>,
    pub decision_summary: DecisionSummary,
    pub config_info: ConfigInfo,
    pub sections: Vec<Section>,
    pub disclaimer: Disclaimer,
    /// Extra warning inside the disclaimer block for demo payloads
    pub demo_notice: Option<String>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoBanner {
    pub message: String,
    pub detail: Option<String>,
}

/// Which provider, model and analysts produced the analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigInfo {
    pub provider_label: String,
    pub model_label: String,
    pub analyst_count: usize,
    pub analyst_labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disclaimer {
    pub title: String,
    pub body: String,
}

impl Default for Disclaimer {
    fn default() -> Self {
        Self {
            title: DISCLAIMER_TITLE.to_string(),
            body: DISCLAIMER_BODY.to_string(),
        }
    }
}

impl ConfigInfo {
    /// Analyst count as displayed (`3个`)
    pub fn analyst_count_display(&self) -> String {
        format!("{}个", self.analyst_count)
    }
}

impl Report {
    /// Generation timestamp rendered with a `chrono` format string
    ///
    /// An unparseable format is a [`ReportError::RenderError`].
    pub fn generated_at_display(&self, format: &str) -> Result<String> {
        let mut out = String::new();
        write!(out, "{}", self.generated_at.format(format)).map_err(|_| {
            ReportError::RenderError(format!("invalid timestamp format: {format}"))
        })?;
        Ok(out)
    }

    pub fn is_demo(&self) -> bool {
        self.demo_banner.is_some()
    }
}

/// Builds [`Report`]s from analysis results
#[derive(Clone)]
pub struct ReportAssembler {
    config: ReportConfig,
    observer: Arc<dyn AssemblyObserver>,
}

impl std::fmt::Debug for ReportAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportAssembler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

impl ReportAssembler {
    /// Create an assembler that logs through `tracing`
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the observer receiving assembly events
    pub fn with_observer(mut self, observer: Arc<dyn AssemblyObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Assemble a report stamped with the current time
    pub fn assemble(&self, result: &AnalysisResult) -> Report {
        self.assemble_at(result, Utc::now())
    }

    /// Assemble a report stamped with `generated_at`
    ///
    /// Every missing optional field has a fallback display value, so this
    /// never fails once a payload has been decoded.
    pub fn assemble_at(&self, result: &AnalysisResult, generated_at: DateTime<Utc>) -> Report {
        let observer = self.observer.as_ref();
        let symbol = result.symbol().unwrap_or(NOT_AVAILABLE);

        let demo_banner = result.is_demo.then(|| DemoBanner {
            message: DEMO_BANNER.to_string(),
            detail: result
                .demo_reason
                .as_ref()
                .filter(|reason| !reason.is_empty())
                .cloned(),
        });

        Report {
            header: format!("📊 {symbol} 分析结果"),
            demo_banner,
            decision_summary: summarize_decision(
                &result.decision,
                result.symbol(),
                &self.config,
                observer,
            ),
            config_info: build_config_info(result, &self.config, observer),
            sections: dispatch_sections(&result.state, observer),
            disclaimer: Disclaimer::default(),
            demo_notice: result.is_demo.then(|| DEMO_NOTICE.to_string()),
            generated_at,
        }
    }
}

/// Translate provider, model and analyst identifiers for display
pub fn build_config_info(
    result: &AnalysisResult,
    config: &ReportConfig,
    observer: &dyn AssemblyObserver,
) -> ConfigInfo {
    let provider = result
        .llm_provider
        .as_deref()
        .unwrap_or(&config.default_provider);

    let model_label = match result.llm_model.as_deref() {
        Some(model) => translate::<LlmModel>(model, observer),
        None => NOT_AVAILABLE.to_string(),
    };

    ConfigInfo {
        provider_label: translate::<LlmProvider>(provider, observer),
        model_label,
        analyst_count: result.analysts.len(),
        analyst_labels: result
            .analysts
            .iter()
            .map(|analyst| translate::<AnalystRole>(analyst, observer))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_payload;
    use crate::observer::NoopObserver;
    use crate::section::SectionBody;
    use chrono::TimeZone;
    use serde_json::json;

    fn assembler() -> ReportAssembler {
        ReportAssembler::default().with_observer(Arc::new(NoopObserver))
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()
    }

    fn sample() -> AnalysisResult {
        AnalysisResult::from_value(json!({
            "stock_symbol": "600519",
            "decision": {
                "action": "buy",
                "confidence": 0.75,
                "risk_score": 0.4,
                "target_price": 1888.5,
                "reasoning": "稳健增长"
            },
            "state": {
                "market_report": "均线多头排列",
                "investment_debate_state": {"bull_history": "看多", "judge_decision": "买入"}
            },
            "llm_provider": "dashscope",
            "llm_model": "qwen-plus",
            "analysts": ["market", "fundamentals", "quant"]
        }))
        .unwrap()
    }

    #[test]
    fn test_assemble_full_report() {
        let report = assembler().assemble_at(&sample(), fixed_time());

        assert_eq!(report.header, "📊 600519 分析结果");
        assert!(report.demo_banner.is_none());
        assert!(report.demo_notice.is_none());

        let summary = &report.decision_summary;
        assert_eq!(summary.action_label, "买入");
        assert_eq!(summary.confidence_display, "75.0%");
        assert_eq!(summary.risk_delta.as_ref().unwrap().text, "+10.0%");
        assert_eq!(summary.target_price_display, "¥1888.50");
        assert_eq!(summary.reasoning.as_deref(), Some("稳健增长"));

        assert_eq!(report.config_info.provider_label, "阿里百炼");
        assert_eq!(report.config_info.model_label, "Qwen Plus");
        assert_eq!(report.config_info.analyst_count, 3);
        assert_eq!(report.config_info.analyst_count_display(), "3个");
        assert_eq!(
            report.config_info.analyst_labels,
            vec!["📈 市场技术分析师", "💰 基本面分析师", "quant"]
        );

        assert_eq!(report.sections.len(), 10);
        assert_eq!(
            report.sections[0].body,
            SectionBody::PlainText("均线多头排列".to_string())
        );
        assert_eq!(report.disclaimer, Disclaimer::default());
        assert_eq!(
            report.generated_at_display("%Y-%m-%d %H:%M:%S").unwrap(),
            "2024-05-06 07:08:09"
        );
    }

    #[test]
    fn test_demo_banner_and_notice() {
        let result = sample().with_demo(Some("API key missing".to_string()));
        let report = assembler().assemble_at(&result, fixed_time());

        let banner = report.demo_banner.as_ref().unwrap();
        assert!(banner.message.contains("演示模式"));
        assert_eq!(banner.detail.as_deref(), Some("API key missing"));
        assert!(report.demo_notice.as_deref().unwrap().contains("演示数据"));
        assert!(report.is_demo());

        let result = sample().with_demo(None);
        let report = assembler().assemble_at(&result, fixed_time());
        assert!(report.demo_banner.unwrap().detail.is_none());
    }

    #[test]
    fn test_missing_optional_fields_fall_back() {
        let result = parse_payload(r#"{"is_demo": false, "state": {"news_report": ""}}"#).unwrap();
        let report = assembler().assemble_at(&result, fixed_time());

        assert_eq!(report.header, "📊 N/A 分析结果");
        assert_eq!(report.decision_summary.action_label, "N/A");
        assert_eq!(report.config_info.provider_label, "阿里百炼");
        assert_eq!(report.config_info.model_label, "N/A");
        assert_eq!(report.config_info.analyst_count, 0);
        assert!(report.config_info.analyst_labels.is_empty());
        assert!(report.sections.iter().all(Section::is_placeholder));
    }

    #[test]
    fn test_unknown_provider_and_model_pass_through() {
        let result = AnalysisResult::new("AAPL").with_llm("openai", "gpt-4o");
        let report = assembler().assemble_at(&result, fixed_time());

        assert_eq!(report.config_info.provider_label, "openai");
        assert_eq!(report.config_info.model_label, "gpt-4o");
        assert_eq!(report.decision_summary.target_price_display, "待分析");
    }

    #[test]
    fn test_default_valued_payload_still_assembles() {
        for raw in [
            r#"{"is_demo": false}"#,
            r#"{"is_demo": false, "analysts": []}"#,
            r#"{"state": {}}"#,
        ] {
            let result = parse_payload(raw).unwrap();
            let report = assembler().assemble_at(&result, fixed_time());

            assert_eq!(report.header, "📊 N/A 分析结果");
            assert_eq!(report.sections.len(), 10);
            assert!(report.sections.iter().all(Section::is_placeholder));
        }
    }

    #[test]
    fn test_empty_demo_reason_has_no_detail() {
        let result = sample().with_demo(Some(String::new()));
        let report = assembler().assemble_at(&result, fixed_time());

        assert!(report.demo_banner.unwrap().detail.is_none());
        assert!(report.demo_notice.is_some());
    }

    #[test]
    fn test_invalid_timestamp_format_is_render_error() {
        let report = assembler().assemble_at(&sample(), fixed_time());
        let err = report.generated_at_display("%Q").unwrap_err();
        assert!(matches!(err, ReportError::RenderError(_)));
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let result = sample();
        let first = assembler().assemble(&result);
        let second = assembler().assemble(&result);

        assert_eq!(first.sections, second.sections);
        assert_eq!(first.decision_summary, second.decision_summary);
        assert_eq!(first.config_info, second.config_info);

        let at = fixed_time();
        assert_eq!(
            serde_json::to_string(&assembler().assemble_at(&result, at)).unwrap(),
            serde_json::to_string(&assembler().assemble_at(&result, at)).unwrap()
        );
    }
}
