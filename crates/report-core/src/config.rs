//! Configuration for report assembly

use crate::error::{ReportError, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for report assembly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Baseline the confidence delta is measured against
    pub confidence_baseline: f64,

    /// Baseline the risk delta is measured against
    pub risk_baseline: f64,

    /// Currency symbol for domestic (six-digit) instruments
    pub domestic_currency: String,

    /// Currency symbol for every other instrument
    pub foreign_currency: String,

    /// `chrono` format string for the generation timestamp
    pub timestamp_format: String,

    /// Provider assumed when the payload does not name one
    pub default_provider: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            confidence_baseline: 0.5,
            risk_baseline: 0.3,
            domestic_currency: "¥".to_string(),
            foreign_currency: "$".to_string(),
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_string(),
            default_provider: "dashscope".to_string(),
        }
    }
}

impl ReportConfig {
    /// Create a new configuration builder
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Load a configuration from a JSON file; missing keys take defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ReportError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| ReportError::ConfigError(format!("{}: {e}", path.display())))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("confidence_baseline", self.confidence_baseline),
            ("risk_baseline", self.risk_baseline),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ReportError::ConfigError(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        if self.domestic_currency.is_empty() || self.foreign_currency.is_empty() {
            return Err(ReportError::ConfigError(
                "currency symbols must not be empty".to_string(),
            ));
        }

        if self.timestamp_format.trim().is_empty() {
            return Err(ReportError::ConfigError(
                "timestamp_format must not be empty".to_string(),
            ));
        }

        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(ReportError::ConfigError(format!(
                "timestamp_format is not a valid strftime format: {}",
                self.timestamp_format
            )));
        }

        Ok(())
    }
}

/// Builder for ReportConfig
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    confidence_baseline: Option<f64>,
    risk_baseline: Option<f64>,
    domestic_currency: Option<String>,
    foreign_currency: Option<String>,
    timestamp_format: Option<String>,
    default_provider: Option<String>,
}

impl ReportConfigBuilder {
    /// Set the confidence delta baseline
    pub fn confidence_baseline(mut self, baseline: f64) -> Self {
        self.confidence_baseline = Some(baseline);
        self
    }

    /// Set the risk delta baseline
    pub fn risk_baseline(mut self, baseline: f64) -> Self {
        self.risk_baseline = Some(baseline);
        self
    }

    /// Set the domestic currency symbol
    pub fn domestic_currency(mut self, symbol: impl Into<String>) -> Self {
        self.domestic_currency = Some(symbol.into());
        self
    }

    /// Set the foreign currency symbol
    pub fn foreign_currency(mut self, symbol: impl Into<String>) -> Self {
        self.foreign_currency = Some(symbol.into());
        self
    }

    /// Set the timestamp format
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = Some(format.into());
        self
    }

    /// Set the fallback provider
    pub fn default_provider(mut self, provider: impl Into<String>) -> Self {
        self.default_provider = Some(provider.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ReportConfig> {
        let defaults = ReportConfig::default();

        let config = ReportConfig {
            confidence_baseline: self
                .confidence_baseline
                .unwrap_or(defaults.confidence_baseline),
            risk_baseline: self.risk_baseline.unwrap_or(defaults.risk_baseline),
            domestic_currency: self
                .domestic_currency
                .unwrap_or(defaults.domestic_currency),
            foreign_currency: self.foreign_currency.unwrap_or(defaults.foreign_currency),
            timestamp_format: self.timestamp_format.unwrap_or(defaults.timestamp_format),
            default_provider: self.default_provider.unwrap_or(defaults.default_provider),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert!((config.confidence_baseline - 0.5).abs() < f64::EPSILON);
        assert!((config.risk_baseline - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.default_provider, "dashscope");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ReportConfig::builder()
            .foreign_currency("US$")
            .timestamp_format("%Y/%m/%d")
            .build()
            .unwrap();

        assert_eq!(config.foreign_currency, "US$");
        assert_eq!(config.timestamp_format, "%Y/%m/%d");
        assert_eq!(config.domestic_currency, "¥");
    }

    #[test]
    fn test_validation_baseline_out_of_range() {
        assert!(ReportConfig::builder().risk_baseline(1.5).build().is_err());
        assert!(
            ReportConfig::builder()
                .confidence_baseline(f64::NAN)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_validation_empty_currency() {
        let config = ReportConfig {
            domestic_currency: String::new(),
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_timestamp_format() {
        let err = ReportConfig::builder().timestamp_format("%Q").build().unwrap_err();
        assert!(matches!(err, ReportError::ConfigError(_)));

        let config: ReportConfig = serde_json::from_str(r#"{"timestamp_format": "%Y %Q"}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ReportConfig = serde_json::from_str(r#"{"foreign_currency": "€"}"#).unwrap();
        assert_eq!(config.foreign_currency, "€");
        assert_eq!(config.timestamp_format, "%Y-%m-%d %H:%M:%S");
    }

    #[test]
    fn test_from_missing_file() {
        let err = ReportConfig::from_file("/nonexistent/report-config.json").unwrap_err();
        assert!(matches!(err, ReportError::ConfigError(_)));
    }
}
