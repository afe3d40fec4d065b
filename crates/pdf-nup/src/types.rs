use thiserror::Error;

#[derive(Error, Debug)]
pub enum NupError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages found in the source document")]
    NoPages,
}

pub type Result<T> = std::result::Result<T, NupError>;

/// Page orientation, derived from the MediaBox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height >= width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Which strategy ended up producing an isolated page's output sheet.
///
/// Recorded by the render fallback chain so callers and logs can tell
/// exact embeds apart from degraded substitutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FallbackOutcome {
    /// Form XObject embedded 1:1 on a sheet matching the source page
    EmbeddedExact,
    /// Page imported verbatim with its declared size coerced to A4
    SizePreservedCopy,
    /// Standard-size sheet carrying a textual notice instead of content
    PlaceholderNotice {
        original_width: f32,
        original_height: f32,
    },
    /// Last-resort error sheet with a red border
    ErrorPlaceholder,
}

/// Statistics about a composition run, derived from the partition alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Total number of output sheets
    pub output_sheets: usize,
    /// Sheets holding a single pinned page at native size
    pub isolated_sheets: usize,
    /// Sheets holding one or more grouped pages
    pub grouped_sheets: usize,
}
