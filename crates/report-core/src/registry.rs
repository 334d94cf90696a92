//! Module registry
//!
//! The fixed, ordered list of report modules. Order here is display order and
//! never depends on payload content; the section dispatcher is generic over
//! this list, so adding a module only means adding a descriptor.

use serde::Serialize;

/// Key of the research-team (bull/bear) debate module
pub const INVESTMENT_DEBATE_KEY: &str = "investment_debate_state";
/// Key of the risk-management-team debate module
pub const RISK_DEBATE_KEY: &str = "risk_debate_state";

/// Static description of one report section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleDescriptor {
    /// Key into the analysis state
    pub key: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

impl ModuleDescriptor {
    /// Title prefixed by the icon, as shown on a tab
    pub fn tab_label(&self) -> String {
        format!("{} {}", self.icon, self.title)
    }
}

static MODULES: [ModuleDescriptor; 10] = [
    ModuleDescriptor {
        key: "market_report",
        title: "市场技术分析",
        icon: "📈",
        description: "技术指标、价格趋势、支撑阻力位分析",
    },
    ModuleDescriptor {
        key: "fundamentals_report",
        title: "基本面分析",
        icon: "💰",
        description: "财务数据、估值水平、盈利能力分析",
    },
    ModuleDescriptor {
        key: "sentiment_report",
        title: "市场情绪分析",
        icon: "💭",
        description: "投资者情绪、社交媒体情绪指标",
    },
    ModuleDescriptor {
        key: "news_report",
        title: "新闻事件分析",
        icon: "📰",
        description: "相关新闻事件、市场动态影响分析",
    },
    ModuleDescriptor {
        key: "risk_assessment",
        title: "风险评估",
        icon: "⚠️",
        description: "风险因素识别、风险等级评估",
    },
    ModuleDescriptor {
        key: "investment_plan",
        title: "投资建议",
        icon: "📋",
        description: "具体投资策略、仓位管理建议",
    },
    ModuleDescriptor {
        key: INVESTMENT_DEBATE_KEY,
        title: "研究团队决策",
        icon: "🔬",
        description: "多头/空头研究员辩论分析，研究经理综合决策",
    },
    ModuleDescriptor {
        key: "trader_investment_plan",
        title: "交易团队计划",
        icon: "💼",
        description: "专业交易员制定的具体交易执行计划",
    },
    ModuleDescriptor {
        key: RISK_DEBATE_KEY,
        title: "风险管理团队",
        icon: "⚖️",
        description: "激进/保守/中性分析师风险评估，投资组合经理最终决策",
    },
    ModuleDescriptor {
        key: "final_trade_decision",
        title: "最终交易决策",
        icon: "🎯",
        description: "综合所有团队分析后的最终投资决策",
    },
];

/// All report modules in display order
pub fn modules() -> &'static [ModuleDescriptor] {
    &MODULES
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_order() {
        let keys: Vec<_> = modules().iter().map(|m| m.key).collect();
        assert_eq!(
            keys,
            vec![
                "market_report",
                "fundamentals_report",
                "sentiment_report",
                "news_report",
                "risk_assessment",
                "investment_plan",
                "investment_debate_state",
                "trader_investment_plan",
                "risk_debate_state",
                "final_trade_decision",
            ]
        );
    }

    #[test]
    fn test_keys_unique() {
        let keys: HashSet<_> = modules().iter().map(|m| m.key).collect();
        assert_eq!(keys.len(), modules().len());
    }

    #[test]
    fn test_tab_label() {
        let module = modules().iter().find(|m| m.key == RISK_DEBATE_KEY).unwrap();
        assert_eq!(module.title, "风险管理团队");
        assert_eq!(module.tab_label(), "⚖️ 风险管理团队");
    }
}
