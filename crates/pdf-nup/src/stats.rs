use crate::layout::partition;
use crate::options::NupOptions;
use crate::types::*;
use lopdf::Document;

/// Calculate statistics for a composition without rendering anything.
///
/// Derived purely from the partition, so it is cheap enough to run before
/// every composition (or instead of one, for a dry run).
pub fn calculate_statistics(
    document: &Document,
    options: &NupOptions,
) -> Result<CompositionStatistics> {
    options.validate()?;

    let source_pages = document.get_pages().len();
    let groups = partition(source_pages, options.pages_per_sheet, &options.isolated_pages)?;

    let isolated_sheets = groups.iter().filter(|g| g.isolated).count();

    Ok(CompositionStatistics {
        source_pages,
        output_sheets: groups.len(),
        isolated_sheets,
        grouped_sheets: groups.len() - isolated_sheets,
    })
}
