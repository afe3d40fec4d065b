//! Group partitioning
//!
//! Walks the ordered source page sequence and splits it into groups, each
//! destined for exactly one output sheet. Pinned pages always form their
//! own single-member group, and collection stops *before* a pinned page so
//! it is never merged into a neighboring sheet. The page just before a
//! pinned page therefore ends up in a smaller (possibly single-member)
//! group, preserving source order across all sheets.

use super::Group;
use crate::options::IsolationSet;
use crate::types::{NupError, Result};

/// Whether a pages-per-sheet count is supported: 2, 3 or a perfect square.
pub fn is_valid_pages_per_sheet(pages_per_sheet: usize) -> bool {
    if pages_per_sheet == 2 || pages_per_sheet == 3 {
        return true;
    }
    let root = (pages_per_sheet as f64).sqrt().floor() as usize;
    pages_per_sheet > 0 && root * root == pages_per_sheet
}

/// Partition `[0, total_pages)` into ordered groups.
///
/// Fails on an unsupported `pages_per_sheet` or an empty document; an
/// empty output document is never produced silently.
pub fn partition(
    total_pages: usize,
    pages_per_sheet: usize,
    isolated: &IsolationSet,
) -> Result<Vec<Group>> {
    if !is_valid_pages_per_sheet(pages_per_sheet) {
        return Err(NupError::Config(
            "pages per sheet must be 2, 3 or a perfect square".to_string(),
        ));
    }
    if total_pages == 0 {
        return Err(NupError::NoPages);
    }

    let mut groups = Vec::new();
    let mut cursor = 0;

    while cursor < total_pages {
        if isolated.contains(cursor + 1) {
            log::debug!("Page {} pinned to its own sheet", cursor + 1);
            groups.push(Group {
                members: vec![cursor],
                isolated: true,
            });
            cursor += 1;
            continue;
        }

        // Collect up to pages_per_sheet consecutive pages, stopping before
        // the end of the document or the next pinned page. The first page
        // is known not to be pinned, so the group is never empty.
        let mut members = Vec::with_capacity(pages_per_sheet);
        while members.len() < pages_per_sheet
            && cursor + members.len() < total_pages
            && !isolated.contains(cursor + members.len() + 1)
        {
            members.push(cursor + members.len());
        }

        cursor += members.len();
        groups.push(Group {
            members,
            isolated: false,
        });
    }

    Ok(groups)
}
