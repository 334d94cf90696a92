//! Instrument classification for currency selection

use crate::config::ReportConfig;
use regex::Regex;
use std::sync::LazyLock;

/// Domestic exchange codes are exactly six ASCII digits (`600519`, `000001`)
static DOMESTIC_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("domestic code pattern is valid"));

/// Market an instrument symbol belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Market {
    /// Six-digit numeric code, quoted in ¥
    Domestic,
    /// Anything else, quoted in $
    Foreign,
}

impl Market {
    /// Classify a symbol; an absent symbol is treated as foreign
    pub fn classify(symbol: Option<&str>) -> Self {
        if is_domestic_instrument(symbol) {
            Self::Domestic
        } else {
            Self::Foreign
        }
    }

    /// Currency symbol used for prices on this market
    pub fn currency_symbol<'a>(&self, config: &'a ReportConfig) -> &'a str {
        match self {
            Self::Domestic => &config.domestic_currency,
            Self::Foreign => &config.foreign_currency,
        }
    }
}

/// Whether `symbol` is a domestic-market instrument code
pub fn is_domestic_instrument(symbol: Option<&str>) -> bool {
    symbol.is_some_and(|s| DOMESTIC_CODE.is_match(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domestic_codes() {
        assert!(is_domestic_instrument(Some("600519")));
        assert!(is_domestic_instrument(Some("000001")));
    }

    #[test]
    fn test_foreign_codes() {
        assert!(!is_domestic_instrument(Some("AAPL")));
        assert!(!is_domestic_instrument(Some("60051")));
        assert!(!is_domestic_instrument(Some("6005190")));
        assert!(!is_domestic_instrument(Some("600519\n")));
        assert!(!is_domestic_instrument(Some("６００５１９")));
        assert!(!is_domestic_instrument(Some("")));
        assert!(!is_domestic_instrument(None));
    }

    #[test]
    fn test_currency_symbol() {
        let config = ReportConfig::default();
        assert_eq!(Market::classify(Some("600519")).currency_symbol(&config), "¥");
        assert_eq!(Market::classify(Some("AAPL")).currency_symbol(&config), "$");
        assert_eq!(Market::classify(None).currency_symbol(&config), "$");
    }
}
