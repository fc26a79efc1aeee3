//! Ticker universe definitions.

use crate::models::TickerSymbol;

/// Large-cap NASDAQ names screened when no universe is configured.
pub const DEFAULT_TICKERS: &[&str] = &[
    // mega-cap platforms
    "NVDA", "MSFT", "AAPL", "AMZN", "GOOGL", "META", "TSLA",
    // semiconductors
    "AVGO", "AMD", "QCOM", "INTC", "TXN", "MU", "AMAT", "LRCX", "ADI", "MRVL", "KLAC", "ARM", "SMCI",
    // software and internet
    "ADBE", "CRM", "NFLX", "ORCL", "CSCO", "INTU", "NOW", "UBER", "ABNB", "PANW", "SNPS", "CDNS",
    "CRWD", "PLTR",
    // biotech and health
    "AMGN", "VRTX", "GILD", "REGN", "ISRG", "MDLZ",
    // consumer and other
    "COST", "PEP", "SBUX", "TMUS", "CMCSA", "BKNG", "MAR", "LULU", "CSX",
];

pub fn default_universe() -> Vec<TickerSymbol> {
    DEFAULT_TICKERS.iter().map(|s| TickerSymbol::from(*s)).collect()
}

/// Parse a comma separated ticker list.
///
/// Entries are trimmed and upper-cased and blanks are dropped. Order and
/// duplicates are preserved.
pub fn parse_universe(list: &str) -> Vec<TickerSymbol> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| TickerSymbol::new(s.to_ascii_uppercase()))
        .collect()
}
