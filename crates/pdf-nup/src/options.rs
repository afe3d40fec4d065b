use crate::layout::is_valid_pages_per_sheet;
use crate::types::*;
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Set of 1-based source page numbers pinned to their own sheet.
///
/// Built once from caller input and consulted during partitioning.
/// Numbers beyond the document's page count are simply never matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IsolationSet(BTreeSet<usize>);

impl IsolationSet {
    /// Parse a comma-separated list of 1-based page numbers.
    ///
    /// Parsing is permissive: non-numeric and non-positive tokens are
    /// dropped with a warning, never reported as errors.
    pub fn parse(input: &str) -> Self {
        let mut numbers = BTreeSet::new();
        for token in input.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match token.parse::<i64>() {
                Ok(n) if n > 0 => {
                    numbers.insert(n as usize);
                }
                Ok(n) => log::warn!("Ignoring non-positive page number: {n}"),
                Err(_) => log::warn!("Ignoring invalid page number token: {token:?}"),
            }
        }
        log::debug!("Parsed isolated page numbers: {numbers:?}");
        IsolationSet(numbers)
    }

    /// Whether the given 1-based page number is pinned
    pub fn contains(&self, page_number: usize) -> bool {
        self.0.contains(&page_number)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<usize> for IsolationSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        IsolationSet(iter.into_iter().filter(|&n| n > 0).collect())
    }
}

/// Composition configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NupOptions {
    /// Source pages per output sheet: 2, 3 or a perfect square
    pub pages_per_sheet: usize,

    /// Draw a thin outline around each placed page
    pub add_border: bool,

    /// 1-based page numbers that must occupy a sheet alone at native size
    pub isolated_pages: IsolationSet,
}

impl Default for NupOptions {
    fn default() -> Self {
        Self {
            pages_per_sheet: 2,
            add_border: false,
            isolated_pages: IsolationSet::default(),
        }
    }
}

impl NupOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| NupError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| NupError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if !is_valid_pages_per_sheet(self.pages_per_sheet) {
            return Err(NupError::Config(
                "pages per sheet must be 2, 3 or a perfect square".to_string(),
            ));
        }
        Ok(())
    }
}
