//! Runtime configuration (environment + flags).

use mockgen_catalog::PriceFormat;

/// Environment variable overriding the currency symbol used in price texts.
pub const CURRENCY_SYMBOL_ENV: &str = "MOCKGEN_CURRENCY_SYMBOL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub currency_symbol: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            currency_symbol: PriceFormat::default().symbol,
        }
    }
}

impl CliConfig {
    /// Defaults, overridden by the environment where set.
    pub fn from_env() -> Self {
        Self::from_currency_var(std::env::var(CURRENCY_SYMBOL_ENV).ok().as_deref())
    }

    /// Config for a raw `MOCKGEN_CURRENCY_SYMBOL` value; unset or blank keeps
    /// the default symbol.
    pub fn from_currency_var(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(symbol) if !symbol.is_empty() => Self {
                currency_symbol: symbol.to_string(),
            },
            _ => Self::default(),
        }
    }

    pub fn with_currency_symbol(self, symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: symbol.into(),
        }
    }

    pub fn price_format(&self) -> PriceFormat {
        PriceFormat::new(self.currency_symbol.clone())
    }
}
