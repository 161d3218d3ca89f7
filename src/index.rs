//! Market index identifier parsing and validation
//!
//! An index identifier is a short ticker-like name such as `DJI`, `N225` or
//! `BTC-USD`. The remote endpoint knows most indices under a caret-prefixed
//! symbol (`^DJI`) but some, like `BTC-USD` and `DAX`, only verbatim.

use std::fmt;
use url::form_urlencoded;

/// Validated market index identifier
///
/// Case is preserved as given; only the mapping key is normalized.
///
/// # Examples
///
/// ```
/// use index_history_downloader::index::IndexName;
///
/// let idx = IndexName::parse("BTC-USD").unwrap();
/// assert_eq!(idx.as_str(), "BTC-USD");
/// assert_eq!(idx.key(), "btc_usd");
/// assert_eq!(idx.caret_encoded(), "%5EBTC-USD");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexName {
    name: String,
}

impl IndexName {
    /// Parse and validate an index identifier
    ///
    /// Surrounding whitespace is trimmed. Allowed characters are ASCII
    /// letters, digits and `.`, `=`, `_`, `-`, `^`, which keeps the verbatim
    /// URL variant well-formed. A name already written with its caret
    /// (`^GSPC`) is accepted and used as given.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or contains any other character.
    pub fn parse(s: &str) -> Result<Self, IndexError> {
        let name = s.trim();

        if name.is_empty() {
            return Err(IndexError::InvalidFormat(
                "index identifier cannot be empty".to_string(),
            ));
        }

        if let Some(bad) = name
            .chars()
            .find(|c| {
                !(c.is_ascii_alphanumeric() || matches!(c, '.' | '=' | '_' | '-' | '^'))
            })
        {
            return Err(IndexError::InvalidFormat(format!(
                "index identifier '{name}' contains invalid character '{bad}'"
            )));
        }

        Ok(Self {
            name: name.to_string(),
        })
    }

    /// Identifier exactly as given (trimmed)
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Result Mapping key: lowercase with hyphens replaced by underscores
    pub fn key(&self) -> String {
        self.name.to_lowercase().replace('-', "_")
    }

    /// URL variant A: `^` prefix, percent-encoded (`^DJI` becomes `%5EDJI`)
    pub fn caret_encoded(&self) -> String {
        form_urlencoded::byte_serialize(format!("^{}", self.name).as_bytes()).collect()
    }

    /// URL variant B: identifier used verbatim
    pub fn verbatim(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for IndexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl std::str::FromStr for IndexName {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors that can occur during index identifier parsing
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Invalid identifier format
    #[error("index error: {0}")]
    InvalidFormat(String),
}
