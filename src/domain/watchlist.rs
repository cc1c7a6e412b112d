//! Ordered watch-list of unique symbol codes.
//!
//! Order is user-significant (it drives display order) and is preserved by
//! every edit. Symbols are upper-cased and must be exactly three ASCII
//! letters or digits.

use std::collections::HashSet;

pub const DEFAULT_SYMBOLS: [&str; 8] = ["FPT", "HPG", "BID", "SSI", "GAS", "VND", "VNM", "TCB"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WatchlistError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),

    #[error("invalid symbol '{0}': expected three letters or digits")]
    InvalidSymbol(String),
}

/// Upper-case and validate a single symbol code.
pub fn normalize_symbol(raw: &str) -> Result<String, WatchlistError> {
    let symbol = raw.trim().to_uppercase();
    if is_valid_symbol(&symbol) {
        Ok(symbol)
    } else {
        Err(WatchlistError::InvalidSymbol(symbol))
    }
}

pub fn is_valid_symbol(symbol: &str) -> bool {
    symbol.len() == 3
        && symbol
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

pub fn parse_symbols(input: &str) -> Result<Vec<String>, WatchlistError> {
    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        if token.trim().is_empty() {
            return Err(WatchlistError::EmptyToken);
        }
        let symbol = normalize_symbol(token)?;
        if !seen.insert(symbol.clone()) {
            return Err(WatchlistError::DuplicateSymbol(symbol));
        }
        symbols.push(symbol);
    }

    Ok(symbols)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Watchlist {
    symbols: Vec<String>,
}

impl Watchlist {
    pub fn parse(input: &str) -> Result<Self, WatchlistError> {
        Ok(Watchlist {
            symbols: parse_symbols(input)?,
        })
    }

    pub fn default_symbols() -> Self {
        Watchlist {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        let symbol = symbol.trim().to_uppercase();
        self.symbols.iter().any(|s| *s == symbol)
    }

    /// Append a symbol. Returns `Ok(false)` when it is already listed.
    pub fn add(&mut self, raw: &str) -> Result<bool, WatchlistError> {
        let symbol = normalize_symbol(raw)?;
        if self.symbols.contains(&symbol) {
            return Ok(false);
        }
        self.symbols.push(symbol);
        Ok(true)
    }

    pub fn remove(&mut self, raw: &str) -> bool {
        let symbol = raw.trim().to_uppercase();
        let before = self.symbols.len();
        self.symbols.retain(|s| *s != symbol);
        self.symbols.len() != before
    }

    /// Remove the symbol if present, add it otherwise. Returns whether the
    /// symbol is listed afterwards.
    pub fn toggle(&mut self, raw: &str) -> Result<bool, WatchlistError> {
        if self.remove(raw) {
            Ok(false)
        } else {
            self.add(raw)
        }
    }

    /// Move the entry at `from` so that it ends up at index `to`.
    pub fn move_to(&mut self, from: usize, to: usize) -> bool {
        if from >= self.symbols.len() || to >= self.symbols.len() {
            return false;
        }
        if from != to {
            let symbol = self.symbols.remove(from);
            self.symbols.insert(to, symbol);
        }
        true
    }
}

impl<'a> IntoIterator for &'a Watchlist {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}
