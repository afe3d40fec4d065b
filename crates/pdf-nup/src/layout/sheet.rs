//! Sheet sizing
//!
//! Computes the physical size of the output sheet for one group. Isolated
//! pages get a full-bleed container matching their own size; pairs get the
//! sum of their widths with a corrective branch for pronounced height
//! mismatches; larger groups get a grid of uniform cells sized to the
//! largest member.

use super::{GridShape, Group, PageFacts, SheetSpec};
use crate::constants::{FALLBACK_SHEET_DIMENSIONS, PAIR_HEIGHT_RATIO_LIMIT};

/// Compute the output sheet size for a group.
///
/// Never fails: a computation that produces a non-finite or non-positive
/// dimension (degenerate source geometry, missing facts) is replaced by
/// the A3 fallback sheet and logged.
pub fn size_sheet(group: &Group, facts: &[PageFacts], grid: GridShape) -> SheetSpec {
    match compute_sheet(group, facts, grid) {
        Some(spec)
            if spec.width.is_finite()
                && spec.height.is_finite()
                && spec.width > 0.0
                && spec.height > 0.0 =>
        {
            spec
        }
        other => {
            log::warn!(
                "Could not size sheet for group starting at page {} ({:?}), using fallback",
                group.first_index() + 1,
                other
            );
            let (width, height) = FALLBACK_SHEET_DIMENSIONS;
            SheetSpec { width, height }
        }
    }
}

fn compute_sheet(group: &Group, facts: &[PageFacts], grid: GridShape) -> Option<SheetSpec> {
    if group.isolated {
        // Full-bleed container: exactly the page's own size, no padding.
        let page = facts.get(*group.members.first()?)?;
        return Some(SheetSpec {
            width: page.width,
            height: page.height,
        });
    }

    if group.members.len() == 2 && grid.cols == 2 && grid.rows == 1 {
        let a = facts.get(group.members[0])?;
        let b = facts.get(group.members[1])?;
        return Some(size_pair(a, b));
    }

    let mut max_width: f32 = 0.0;
    let mut max_height: f32 = 0.0;
    for &index in &group.members {
        let page = facts.get(index)?;
        max_width = max_width.max(page.width);
        max_height = max_height.max(page.height);
    }
    Some(SheetSpec {
        width: grid.cols as f32 * max_width,
        height: grid.rows as f32 * max_height,
    })
}

/// Side-by-side pair sizing.
///
/// When the height ratio exceeds the limit, the taller member's width is
/// shrunk by `clamp(2.0 / ratio, 0.8, 1.0)` before summing, so a portrait
/// page paired with a squat landscape one does not blow the sheet up to
/// the portrait page's full footprint.
fn size_pair(a: &PageFacts, b: &PageFacts) -> SheetSpec {
    let max_height = a.height.max(b.height);
    let min_height = a.height.min(b.height);
    let height_ratio = max_height / min_height;

    let width = if height_ratio > PAIR_HEIGHT_RATIO_LIMIT {
        let corrective = (2.0 / height_ratio).clamp(0.8, 1.0);
        log::debug!(
            "Height ratio {height_ratio:.2} exceeds {PAIR_HEIGHT_RATIO_LIMIT}, \
             corrective factor {corrective:.2}"
        );
        let width_a = if a.height > b.height {
            a.width * corrective
        } else {
            a.width
        };
        let width_b = if b.height > a.height {
            b.width * corrective
        } else {
            b.width
        };
        width_a + width_b
    } else {
        a.width + b.width
    };

    SheetSpec {
        width,
        height: max_height,
    }
}
