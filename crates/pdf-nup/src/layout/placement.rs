//! Placement planning
//!
//! Computes each member page's scale and origin on its sheet. The generic
//! path centers pages in uniform grid cells; a side-by-side pair instead
//! gets width allocated proportionally to each page's native width, which
//! avoids the dead space grid-cell centering leaves when a landscape page
//! is paired with a portrait one.

use super::{GridShape, Group, PageFacts, PlacementSpec, SheetSpec, facts_or_default};
use crate::constants::{BLEND_SCALE_FACTOR, MAX_PAIR_SCALE, MIN_DIRECT_SCALE};

/// Plan placements for every member of a non-isolated group.
///
/// Pure: consumes only geometry, returns specs for the render layer.
pub fn plan_placements(
    group: &Group,
    facts: &[PageFacts],
    sheet: &SheetSpec,
    grid: GridShape,
) -> Vec<PlacementSpec> {
    if group.members.len() == 2 && grid.cols == 2 && grid.rows == 1 {
        let a = facts_or_default(facts, group.members[0]);
        let b = facts_or_default(facts, group.members[1]);
        plan_pair(&a, &b, sheet)
    } else {
        plan_grid(group, facts, sheet, grid)
    }
}

fn plan_grid(
    group: &Group,
    facts: &[PageFacts],
    sheet: &SheetSpec,
    grid: GridShape,
) -> Vec<PlacementSpec> {
    let (cell_width, cell_height) = grid.cell_size(sheet);

    group
        .members
        .iter()
        .enumerate()
        .map(|(slot, &page_index)| {
            let page = facts_or_default(facts, page_index);
            let col = slot % grid.cols;
            let row = slot / grid.cols;

            let scale = cell_fit_scale(page.width, page.height, cell_width, cell_height);
            let scaled_width = page.width * scale;
            let scaled_height = page.height * scale;

            // Columns fill left to right, rows top to bottom; pages center
            // within their cell.
            let x = col as f32 * cell_width + ((cell_width - scaled_width) / 2.0).max(0.0);
            let y = sheet.height
                - row as f32 * cell_height
                - ((cell_height - scaled_height) / 2.0).max(0.0)
                - scaled_height;

            log::debug!(
                "Page {} at cell ({col},{row}): scale {scale:.3}, origin ({x:.1}, {y:.1})",
                page_index + 1
            );

            PlacementSpec {
                page_index,
                scale,
                x,
                y,
                scaled_width,
                scaled_height,
            }
        })
        .collect()
}

/// Scale for a page inside a grid cell.
///
/// Native size wins when it fits. Otherwise the strict fit scale is used
/// as long as it stays above the direct-scale threshold; below that the
/// weighted average of the axis scales rescues overly thin pages from
/// shrinking to illegibility, accepting slight overflow instead.
fn cell_fit_scale(page_width: f32, page_height: f32, cell_width: f32, cell_height: f32) -> f32 {
    if page_width <= cell_width && page_height <= cell_height {
        return 1.0;
    }

    let scale_w = cell_width / page_width;
    let scale_h = cell_height / page_height;
    let fit = scale_w.min(scale_h);

    if fit >= MIN_DIRECT_SCALE {
        fit
    } else {
        fit.max((scale_w + scale_h) / 2.0 * BLEND_SCALE_FACTOR)
    }
}

/// Side-by-side pair: allocate width proportionally to native width, abut
/// the pages with zero gap and run them over the full sheet height.
fn plan_pair(a: &PageFacts, b: &PageFacts, sheet: &SheetSpec) -> Vec<PlacementSpec> {
    let native_total = a.width + b.width;
    let allocated_a = sheet.width * a.width / native_total;
    let allocated_b = sheet.width * b.width / native_total;

    log::debug!(
        "Pair allocation: {:.1}% / {:.1}% of {:.1}pt",
        100.0 * a.width / native_total,
        100.0 * b.width / native_total,
        sheet.width
    );

    vec![
        place_in_slot(a, allocated_a, sheet.height, 0.0),
        place_in_slot(b, allocated_b, sheet.height, allocated_a),
    ]
}

fn place_in_slot(
    page: &PageFacts,
    allocated_width: f32,
    available_height: f32,
    x_offset: f32,
) -> PlacementSpec {
    let scale_w = allocated_width / page.width;
    let scale_h = available_height / page.height;

    let mut scale = scale_w.min(scale_h).min(MAX_PAIR_SCALE);
    if page.width <= allocated_width && page.height <= available_height {
        scale = scale.min(1.0);
    }

    PlacementSpec {
        page_index: page.index,
        scale,
        x: x_offset,
        y: 0.0,
        scaled_width: page.width * scale,
        scaled_height: page.height * scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{classify, size_sheet};

    fn group(members: Vec<usize>) -> Group {
        Group {
            members,
            isolated: false,
        }
    }

    #[test]
    fn pair_widths_sum_to_sheet_width() {
        let facts = vec![classify(0, 800.0, 600.0), classify(1, 600.0, 800.0)];
        let grid = GridShape::for_pages_per_sheet(2);
        let g = group(vec![0, 1]);
        let sheet = size_sheet(&g, &facts, grid);

        let placements = plan_placements(&g, &facts, &sheet, grid);
        assert_eq!(placements.len(), 2);

        // Sheet is 1400pt wide; allocation is proportional to native
        // widths, so the right page starts exactly where the left one's
        // 800/1400 share ends.
        assert_eq!(placements[0].x, 0.0);
        assert!((placements[1].x - 800.0).abs() < 1e-3);
        assert!(
            (placements[1].x + sheet.width * 600.0 / 1400.0 - sheet.width).abs() < 1e-3,
            "allocations must sum to the sheet width"
        );
        assert_eq!(placements[0].y, 0.0);
        assert_eq!(placements[1].y, 0.0);
    }

    #[test]
    fn pair_at_native_size_keeps_scale_one() {
        let facts = vec![classify(0, 595.0, 842.0), classify(1, 595.0, 842.0)];
        let grid = GridShape::for_pages_per_sheet(2);
        let g = group(vec![0, 1]);
        let sheet = size_sheet(&g, &facts, grid);

        let placements = plan_placements(&g, &facts, &sheet, grid);
        assert_eq!(placements[0].scale, 1.0);
        assert_eq!(placements[1].scale, 1.0);
        assert!((placements[1].x - 595.0).abs() < 1e-3);
    }

    #[test]
    fn pair_shrinks_taller_page_after_corrective_sizing() {
        // Ratio 2.5 triggers the corrective sheet width; the taller page
        // then has less than its native width allocated and scales down.
        let facts = vec![classify(0, 600.0, 1000.0), classify(1, 500.0, 400.0)];
        let grid = GridShape::for_pages_per_sheet(2);
        let g = group(vec![0, 1]);
        let sheet = size_sheet(&g, &facts, grid);

        let placements = plan_placements(&g, &facts, &sheet, grid);
        assert!(placements[0].scale < 1.0);
        assert!(placements[0].scaled_width < 600.0);
        // Allocation is width-limited for both pages, so the scaled widths
        // fill the corrected sheet exactly.
        let filled = placements[0].scaled_width + placements[1].scaled_width;
        assert!((filled - sheet.width).abs() < 1e-2);
    }

    #[test]
    fn grid_positions_fill_rows_top_to_bottom() {
        let facts: Vec<_> = (0..4).map(|i| classify(i, 500.0, 700.0)).collect();
        let grid = GridShape::for_pages_per_sheet(4);
        let g = group(vec![0, 1, 2, 3]);
        let sheet = size_sheet(&g, &facts, grid);

        let placements = plan_placements(&g, &facts, &sheet, grid);
        assert_eq!(placements.len(), 4);
        for placement in &placements {
            assert_eq!(placement.scale, 1.0);
        }

        // Top row first (higher y), then bottom row.
        assert_eq!((placements[0].x, placements[0].y), (0.0, 700.0));
        assert_eq!((placements[1].x, placements[1].y), (500.0, 700.0));
        assert_eq!((placements[2].x, placements[2].y), (0.0, 0.0));
        assert_eq!((placements[3].x, placements[3].y), (500.0, 0.0));
    }

    #[test]
    fn grid_centers_small_pages_in_cells() {
        let facts = vec![
            classify(0, 400.0, 600.0),
            classify(1, 200.0, 300.0),
            classify(2, 400.0, 600.0),
            classify(3, 400.0, 600.0),
        ];
        let grid = GridShape::for_pages_per_sheet(4);
        let g = group(vec![0, 1, 2, 3]);
        let sheet = size_sheet(&g, &facts, grid);

        let placements = plan_placements(&g, &facts, &sheet, grid);
        // Cell 1 (top right) is 400x600; page 1 is 200x300 and centers.
        assert_eq!(placements[1].scale, 1.0);
        assert!((placements[1].x - (400.0 + 100.0)).abs() < 1e-3);
        assert!((placements[1].y - (600.0 + 150.0)).abs() < 1e-3);
    }

    #[test]
    fn oversized_page_uses_strict_fit_above_threshold() {
        // Page slightly bigger than its cell: fit scale 0.9 >= 0.8.
        let placements = plan_grid(
            &group(vec![0]),
            &[classify(0, 1000.0, 500.0)],
            &SheetSpec {
                width: 900.0,
                height: 450.0,
            },
            GridShape { cols: 1, rows: 1 },
        );
        assert!((placements[0].scale - 0.9).abs() < 1e-3);
    }

    #[test]
    fn badly_oversized_page_blends_toward_average() {
        // Fit scale 0.6 < 0.8, axis scales 0.6 and 0.8:
        // blended = max(0.6, 0.9 * 0.7) = 0.63.
        let placements = plan_grid(
            &group(vec![0]),
            &[classify(0, 500.0, 500.0)],
            &SheetSpec {
                width: 300.0,
                height: 400.0,
            },
            GridShape { cols: 1, rows: 1 },
        );
        assert!((placements[0].scale - 0.63).abs() < 1e-3);
    }

    #[test]
    fn trailing_single_page_under_pair_grid_sits_in_left_cell() {
        let facts = vec![classify(0, 500.0, 700.0)];
        let grid = GridShape::for_pages_per_sheet(2);
        let g = group(vec![0]);
        let sheet = size_sheet(&g, &facts, grid);

        let placements = plan_placements(&g, &facts, &sheet, grid);
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].scale, 1.0);
        assert_eq!((placements[0].x, placements[0].y), (0.0, 0.0));
    }

    #[test]
    fn single_page_per_sheet_is_full_bleed() {
        let facts = vec![classify(0, 432.0, 648.0)];
        let grid = GridShape::for_pages_per_sheet(1);
        let g = group(vec![0]);
        let sheet = size_sheet(&g, &facts, grid);
        assert_eq!((sheet.width, sheet.height), (432.0, 648.0));

        let placements = plan_placements(&g, &facts, &sheet, grid);
        assert_eq!(placements[0].scale, 1.0);
        assert_eq!((placements[0].x, placements[0].y), (0.0, 0.0));
    }
}
