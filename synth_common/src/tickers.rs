//! Ticker symbols and ticker list parsing.
//!
//! A `Ticker` is stored upper-cased, which makes every lookup and every seed
//! derived from it case-insensitive. Generation accepts any string (the empty
//! symbol included); only ticker *lists* read from files or the command line
//! are validated.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use crate::error::SynthError;

/// Punctuation allowed inside a listed symbol (`BRK.B`, `^GSPC`, `EURUSD=X`, ...).
const SYMBOL_PUNCTUATION: &[char] = &['.', '-', '^', '=', ':', '/', '_', '&'];

/// Upper-cased ticker symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Normalize `raw` into a ticker. No trimming and no validation.
    pub fn new(raw: &str) -> Self {
        Ticker(raw.to_uppercase())
    }

    /// Symbol as stored (upper-cased).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Seed key for a stream derived from this ticker, e.g. `AAPL:1y`.
    pub fn derived_key(&self, suffix: &str) -> String {
        format!("{}:{}", self.0, suffix)
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Ticker {
    fn from(raw: &str) -> Self {
        Ticker::new(raw)
    }
}

impl From<String> for Ticker {
    fn from(raw: String) -> Self {
        Ticker::new(&raw)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl FromStr for Ticker {
    type Err = SynthError;

    /// Strict parsing used for ticker lists: trims, rejects empty tokens and
    /// characters that never appear in a listed symbol.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SynthError::ParseTickersFile("empty ticker".to_string()));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_alphanumeric() || SYMBOL_PUNCTUATION.contains(c)))
        {
            return Err(SynthError::ParseTickersFile(format!(
                "invalid character {:?} in ticker {:?}",
                bad, trimmed
            )));
        }
        Ok(Ticker::new(trimmed))
    }
}

/// Trait providing ticker list parsing.
pub trait TickerParser {
    /// Parses tickers from a buffered reader.
    ///
    /// Symbols may be separated by commas, whitespace or new lines; blank
    /// tokens are skipped. Returns an error if any token is not a valid symbol.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Ticker>, SynthError>;

    /// Same as [`TickerParser::parse_from_file`] for an in-memory list.
    fn parse_list(text: &str) -> Result<Vec<Ticker>, SynthError> {
        Self::parse_from_file(text.as_bytes())
    }
}

impl TickerParser for Ticker {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, SynthError> {
        let mut tickers = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(SynthError::Io)?;
            for token in line.split(|c: char| c == ',' || c.is_whitespace()) {
                if token.is_empty() {
                    continue;
                }
                tickers.push(token.parse::<Self>()?);
            }
        }
        Ok(tickers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_upper_cases_without_trimming() {
        assert_eq!(Ticker::new("aapl").as_str(), "AAPL");
        assert_eq!(Ticker::new(" msft").as_str(), " MSFT");
        assert_eq!(Ticker::new("").as_str(), "");
    }

    #[test]
    fn parses_mixed_separators() {
        let text = "aapl, msft\n\nBRK.B\tgoogl,,\n";
        let tickers = Ticker::parse_list(text).unwrap();
        let symbols: Vec<&str> = tickers.iter().map(Ticker::as_str).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT", "BRK.B", "GOOGL"]);
    }

    #[test]
    fn rejects_invalid_symbol() {
        let err = Ticker::parse_list("AAPL\nMS\"FT").unwrap_err();
        assert!(matches!(err, SynthError::ParseTickersFile(_)));
    }

    #[test]
    fn from_str_rejects_blank() {
        assert!("   ".parse::<Ticker>().is_err());
    }

    #[test]
    fn derived_key_uses_upper_case_symbol() {
        assert_eq!(Ticker::new("tsla").derived_key("1y"), "TSLA:1y");
    }

    #[test]
    fn serde_normalizes_on_deserialize() {
        let ticker: Ticker = serde_json::from_str("\"nvda\"").unwrap();
        assert_eq!(ticker.as_str(), "NVDA");
        assert_eq!(serde_json::to_string(&ticker).unwrap(), "\"NVDA\"");
    }
}
