//! Page geometry classification

use super::PageFacts;
use crate::constants::{DEFAULT_PAGE_HEIGHT_PT, DEFAULT_PAGE_WIDTH_PT};
use crate::types::Orientation;

/// Derive orientation and size facts for a single source page.
///
/// Never fails: degenerate dimensions are passed through unchanged and
/// absorbed downstream by the sizing guards and the render fallback chain.
pub fn classify(index: usize, width: f32, height: f32) -> PageFacts {
    let orientation = if width > height {
        Orientation::Landscape
    } else {
        Orientation::Portrait
    };
    PageFacts {
        index,
        width,
        height,
        orientation,
    }
}

/// Look up a page's facts, substituting US Letter when the index is out of
/// range (a page with no usable MediaBox is classified with the same
/// default upstream).
pub fn facts_or_default(facts: &[PageFacts], index: usize) -> PageFacts {
    facts.get(index).copied().unwrap_or(PageFacts {
        index,
        width: DEFAULT_PAGE_WIDTH_PT,
        height: DEFAULT_PAGE_HEIGHT_PT,
        orientation: Orientation::Portrait,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_portrait_and_landscape() {
        assert_eq!(classify(0, 595.0, 842.0).orientation, Orientation::Portrait);
        assert_eq!(
            classify(1, 842.0, 595.0).orientation,
            Orientation::Landscape
        );
    }

    #[test]
    fn square_pages_count_as_portrait() {
        assert_eq!(classify(0, 500.0, 500.0).orientation, Orientation::Portrait);
    }

    #[test]
    fn degenerate_dimensions_pass_through() {
        let facts = classify(3, 0.0, 0.0);
        assert_eq!(facts.width, 0.0);
        assert_eq!(facts.height, 0.0);
        assert_eq!(facts.index, 3);
    }

    #[test]
    fn missing_facts_fall_back_to_letter() {
        let facts = facts_or_default(&[], 7);
        assert_eq!(facts.width, DEFAULT_PAGE_WIDTH_PT);
        assert_eq!(facts.height, DEFAULT_PAGE_HEIGHT_PT);
        assert_eq!(facts.index, 7);
    }
}
