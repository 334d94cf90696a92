//! Report rendering utilities
//!
//! The rendering layer proper lives outside this crate; these formatters turn
//! a [`Report`] into Markdown, plain text tables or JSON for consumers that
//! just need a string.

use crate::config::ReportConfig;
use crate::content::value_text;
use crate::debate::BLOCK_SEPARATOR;
use crate::decision::{
    ACTION_METRIC, CONFIDENCE_METRIC, DecisionSummary, MetricDelta, RISK_METRIC,
    TARGET_PRICE_METRIC,
};
use crate::error::{ReportError, Result};
use crate::report::Report;
use crate::section::{Section, SectionBody};
use comfy_table::Table;
use minijinja::{Environment, context};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const SUMMARY_HEADING: &str = "🎯 投资决策摘要";
const REASONING_HEADING: &str = "🧠 AI分析推理";
const CONFIG_HEADING: &str = "📋 分析配置信息";
const DETAIL_HEADING: &str = "📋 详细分析报告";
const PROVIDER_LABEL: &str = "LLM提供商";
const MODEL_LABEL: &str = "AI模型";
const ANALYST_COUNT_LABEL: &str = "分析师数量";
const ANALYSTS_LABEL: &str = "参与的分析师";
const TIMESTAMP_LABEL: &str = "分析生成时间";

const MARKDOWN_TEMPLATE: &str = r"# {{ header }}
{% if banner %}

> {{ banner.message }}
{% if banner.detail %}>
> {{ banner.detail }}
{% endif %}
{% endif %}

## {{ labels.summary }}

| {{ labels.action }} | {{ labels.confidence }} | {{ labels.risk }} | {{ labels.target }} |
| --- | --- | --- | --- |
| {{ summary.action }} | {{ summary.confidence }} | {{ summary.risk }} | {{ summary.target }} |
{% if reasoning %}

### {{ labels.reasoning }}

{{ reasoning }}
{% endif %}

## {{ labels.config }}

- **{{ labels.provider }}**: {{ config.provider }}
- **{{ labels.model }}**: {{ config.model }}
- **{{ labels.analyst_count }}**: {{ config.analyst_count }}
{% if config.analysts %}- **{{ labels.analysts }}**: {{ config.analysts }}
{% endif %}

## {{ labels.detail }}
{% for section in sections %}

### {{ section.heading }}

{{ section.body }}
{% endfor %}

---

## {{ disclaimer.title }}
{% if demo_notice %}

{{ demo_notice }}
{% endif %}

{{ disclaimer.body }}

*{{ labels.timestamp }}: {{ generated_at }}*
";

/// Output format of a rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

pub trait ReportFormatter: Send + Sync {
    fn name(&self) -> &'static str;
    fn format(&self, report: &Report) -> Result<String>;
}

/// Markdown rendered through a MiniJinja template
pub struct MarkdownFormatter {
    timestamp_format: String,
}

impl MarkdownFormatter {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            timestamp_format: config.timestamp_format.clone(),
        }
    }
}

#[derive(Serialize)]
struct SectionView {
    heading: String,
    body: String,
}

impl ReportFormatter for MarkdownFormatter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn format(&self, report: &Report) -> Result<String> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);

        let summary = &report.decision_summary;
        let sections: Vec<SectionView> = report
            .sections
            .iter()
            .map(|section| SectionView {
                heading: section.tab_label(),
                body: markdown_body(section),
            })
            .collect();

        let ctx = context! {
            header => &report.header,
            banner => &report.demo_banner,
            labels => context! {
                summary => SUMMARY_HEADING,
                action => ACTION_METRIC,
                confidence => CONFIDENCE_METRIC,
                risk => RISK_METRIC,
                target => TARGET_PRICE_METRIC,
                reasoning => REASONING_HEADING,
                config => CONFIG_HEADING,
                provider => PROVIDER_LABEL,
                model => MODEL_LABEL,
                analyst_count => ANALYST_COUNT_LABEL,
                analysts => ANALYSTS_LABEL,
                detail => DETAIL_HEADING,
                timestamp => TIMESTAMP_LABEL,
            },
            summary => context! {
                action => &summary.action_label,
                confidence => metric_cell(&summary.confidence_display, summary.confidence_delta.as_ref()),
                risk => metric_cell(&summary.risk_display, summary.risk_delta.as_ref()),
                target => &summary.target_price_display,
            },
            reasoning => &summary.reasoning,
            config => context! {
                provider => &report.config_info.provider_label,
                model => &report.config_info.model_label,
                analyst_count => report.config_info.analyst_count_display(),
                analysts => report.config_info.analyst_labels.join(" • "),
            },
            sections => sections,
            disclaimer => &report.disclaimer,
            demo_notice => &report.demo_notice,
            generated_at => report.generated_at_display(&self.timestamp_format)?,
        };

        Ok(env.render_str(MARKDOWN_TEMPLATE, ctx)?)
    }
}

fn metric_cell(display: &str, delta: Option<&MetricDelta>) -> String {
    match delta {
        Some(delta) => format!("{display} ({})", delta.text),
        None => display.to_string(),
    }
}

fn markdown_body(section: &Section) -> String {
    let description = format!("*{}*", section.description);

    match &section.body {
        SectionBody::Placeholder(message) => format!("> ℹ️ {message}"),
        SectionBody::PlainText(text) => format!("{description}\n\n{text}"),
        SectionBody::StructuredFields(fields) => {
            let mut out = description;
            for field in fields {
                out.push_str(&format!("\n\n#### {}\n\n{}", field.heading, value_text(&field.value)));
            }
            out
        }
        SectionBody::LabeledBlocks(blocks) => {
            let mut out = description;
            for block in blocks {
                out.push_str(&format!("\n\n#### {} {}\n\n{}", block.icon, block.label, block.text));
                if block.separator {
                    out.push_str("\n\n");
                    out.push_str(BLOCK_SEPARATOR);
                }
            }
            out
        }
    }
}

/// Plain text with the summary and configuration laid out as tables
pub struct TextFormatter {
    timestamp_format: String,
}

impl TextFormatter {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            timestamp_format: config.timestamp_format.clone(),
        }
    }

    fn summary_table(summary: &DecisionSummary) -> Table {
        let mut table = Table::new();
        table.set_header(vec![ACTION_METRIC, CONFIDENCE_METRIC, RISK_METRIC, TARGET_PRICE_METRIC]);
        table.add_row(vec![
            summary.action_label.clone(),
            metric_cell(&summary.confidence_display, summary.confidence_delta.as_ref()),
            metric_cell(&summary.risk_display, summary.risk_delta.as_ref()),
            summary.target_price_display.clone(),
        ]);
        table
    }

    fn config_table(report: &Report) -> Table {
        let info = &report.config_info;
        let mut table = Table::new();
        table.set_header(vec![PROVIDER_LABEL, MODEL_LABEL, ANALYST_COUNT_LABEL]);
        table.add_row(vec![
            info.provider_label.clone(),
            info.model_label.clone(),
            info.analyst_count_display(),
        ]);
        table
    }
}

impl ReportFormatter for TextFormatter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn format(&self, report: &Report) -> Result<String> {
        let mut output = String::new();
        output.push_str(&report.header);
        output.push_str("\n\n");

        if let Some(banner) = &report.demo_banner {
            output.push_str(&banner.message);
            output.push('\n');
            if let Some(detail) = &banner.detail {
                output.push_str(detail);
                output.push('\n');
            }
            output.push('\n');
        }

        output.push_str(SUMMARY_HEADING);
        output.push('\n');
        output.push_str(&Self::summary_table(&report.decision_summary).to_string());
        output.push('\n');
        if let Some(reasoning) = &report.decision_summary.reasoning {
            output.push_str(&format!("\n{REASONING_HEADING}\n{reasoning}\n"));
        }

        output.push_str(&format!("\n{CONFIG_HEADING}\n"));
        output.push_str(&Self::config_table(report).to_string());
        output.push('\n');
        if !report.config_info.analyst_labels.is_empty() {
            output.push_str(&format!(
                "{ANALYSTS_LABEL}: {}\n",
                report.config_info.analyst_labels.join(" • ")
            ));
        }

        output.push_str(&format!("\n{DETAIL_HEADING}\n"));
        for section in &report.sections {
            output.push_str(&format!("\n[{}]\n", section.tab_label()));
            output.push_str(&text_body(section));
            output.push('\n');
        }

        output.push_str(&format!("\n{}\n", report.disclaimer.title));
        if let Some(notice) = &report.demo_notice {
            output.push_str(notice);
            output.push('\n');
        }
        output.push_str(&report.disclaimer.body);
        output.push_str(&format!(
            "\n\n{TIMESTAMP_LABEL}: {}\n",
            report.generated_at_display(&self.timestamp_format)?
        ));

        Ok(output)
    }
}

fn text_body(section: &Section) -> String {
    match &section.body {
        SectionBody::Placeholder(message) => message.clone(),
        SectionBody::PlainText(text) => format!("{}\n{text}", section.description),
        SectionBody::StructuredFields(fields) => {
            let mut out = section.description.clone();
            for field in fields {
                out.push_str(&format!("\n{}: {}", field.heading, value_text(&field.value)));
            }
            out
        }
        SectionBody::LabeledBlocks(blocks) => {
            let mut out = section.description.clone();
            for block in blocks {
                out.push_str(&format!("\n{} {}\n{}", block.icon, block.label, block.text));
                if block.separator {
                    out.push('\n');
                    out.push_str(BLOCK_SEPARATOR);
                }
            }
            out
        }
    }
}

/// Pretty-printed JSON of the whole report
pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn format(&self, report: &Report) -> Result<String> {
        serde_json::to_string_pretty(report).map_err(|e| ReportError::RenderError(e.to_string()))
    }
}

pub struct FormatterFactory;

impl FormatterFactory {
    pub fn create(format: OutputFormat, config: &ReportConfig) -> Box<dyn ReportFormatter> {
        match format {
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(config)),
            OutputFormat::Text => Box::new(TextFormatter::new(config)),
            OutputFormat::Json => Box::new(JsonFormatter),
        }
    }
}
