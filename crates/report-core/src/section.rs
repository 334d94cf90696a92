//! Section dispatch
//!
//! Walks the module registry in order and turns each module's state content
//! into exactly one [`Section`].

use crate::content::{ModuleContent, field_heading, value_text};
use crate::debate::LabeledBlock;
use crate::model::AnalysisState;
use crate::observer::{AssemblyEvent, AssemblyObserver};
use crate::registry::{ModuleDescriptor, modules};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One report section, in registry order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub key: String,
    pub title: String,
    pub icon: String,
    pub description: String,
    pub body: SectionBody,
}

/// Formatted content of a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum SectionBody {
    /// Module had no data
    Placeholder(String),
    PlainText(String),
    StructuredFields(Vec<StructuredField>),
    LabeledBlocks(Vec<LabeledBlock>),
}

/// Entry of a generic key/value mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredField {
    pub heading: String,
    pub value: Value,
}

impl Section {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.body, SectionBody::Placeholder(_))
    }

    /// Icon and title, as shown on the module tab
    pub fn tab_label(&self) -> String {
        format!("{} {}", self.icon, self.title)
    }
}

/// Placeholder text for a module without data (`暂无📈 市场技术分析数据`)
pub fn no_data_message(module: &ModuleDescriptor) -> String {
    format!("暂无{}数据", module.tab_label())
}

/// Build one section per registered module, in registry order
pub fn dispatch_sections(state: &AnalysisState, observer: &dyn AssemblyObserver) -> Vec<Section> {
    modules()
        .iter()
        .map(|module| dispatch_module(module, state, observer))
        .collect()
}

/// Build the section for a single module
pub fn dispatch_module(
    module: &ModuleDescriptor,
    state: &AnalysisState,
    observer: &dyn AssemblyObserver,
) -> Section {
    let content = ModuleContent::classify(module.key, state.get(module.key));
    let kind = content.kind();

    let body = match content {
        ModuleContent::Empty => {
            observer.observe(&AssemblyEvent::PlaceholderEmitted {
                key: module.key.to_string(),
            });
            SectionBody::Placeholder(no_data_message(module))
        }
        ModuleContent::PlainText(text) => SectionBody::PlainText(text.to_string()),
        ModuleContent::InvestmentDebate(debate) => SectionBody::LabeledBlocks(debate.blocks()),
        ModuleContent::RiskDebate(debate) => SectionBody::LabeledBlocks(debate.blocks()),
        ModuleContent::StructuredFields(map) => SectionBody::StructuredFields(
            map.iter()
                .map(|(name, value)| StructuredField {
                    heading: field_heading(name),
                    value: value.clone(),
                })
                .collect(),
        ),
        ModuleContent::Other(value) => SectionBody::PlainText(value_text(value)),
    };

    if !matches!(body, SectionBody::Placeholder(_)) {
        observer.observe(&AssemblyEvent::SectionDispatched {
            key: module.key.to_string(),
            kind,
        });
    }

    Section {
        key: module.key.to_string(),
        title: module.title.to_string(),
        icon: module.icon.to_string(),
        description: module.description.to_string(),
        body,
    }
}
