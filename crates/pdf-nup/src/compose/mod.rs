//! Composition orchestration
//!
//! Drives the pipeline: classify source pages, partition them into
//! per-sheet groups, then per group size the sheet, plan placements and
//! draw, with the fallback chain standing in for pinned pages. Output
//! sheets are appended strictly in group order, so the composed document
//! preserves source page order even when a degraded sheet is substituted.

mod io;

pub use io::{load_pdf, output_filename, save_pdf};

use crate::layout::{GridShape, PageFacts, classify, partition, plan_placements, size_sheet};
use crate::options::NupOptions;
use crate::render::{page_dimensions, render_group_sheet, render_isolated};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Compose a new document from the source according to the options.
///
/// The synchronous core runs on a blocking task; composition itself is
/// sequential with no internal parallelism.
pub async fn compose(source: &Document, options: &NupOptions) -> Result<Document> {
    options.validate()?;

    let source = source.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || compose_sync(&source, &options)).await?
}

/// Synchronous composition core.
pub fn compose_sync(source: &Document, options: &NupOptions) -> Result<Document> {
    options.validate()?;

    let pages = source.get_pages();
    let page_ids: Vec<ObjectId> = pages.values().copied().collect();
    let total_pages = page_ids.len();
    if total_pages == 0 {
        return Err(NupError::NoPages);
    }

    log::debug!(
        "Composing {} pages at {} per sheet, {} pinned",
        total_pages,
        options.pages_per_sheet,
        options.isolated_pages.len()
    );

    let facts: Vec<PageFacts> = page_ids
        .iter()
        .enumerate()
        .map(|(index, &id)| {
            let (width, height) = page_dimensions(source, id);
            classify(index, width, height)
        })
        .collect();

    let groups = partition(total_pages, options.pages_per_sheet, &options.isolated_pages)?;
    let grid = GridShape::for_pages_per_sheet(options.pages_per_sheet);

    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut page_refs = Vec::new();

    for group in &groups {
        let sheet = size_sheet(group, &facts, grid);

        if group.isolated {
            let member = group.first_index();
            match render_isolated(
                &mut output,
                source,
                page_ids[member],
                &facts[member],
                &sheet,
                pages_tree_id,
                options.add_border,
            ) {
                Ok((page_id, outcome)) => {
                    log::debug!("Pinned page {} rendered via {:?}", member + 1, outcome);
                    page_refs.push(Object::Reference(page_id));
                }
                Err(err) => {
                    // Even the error sheet failed; record it and move on so
                    // one bad page cannot abort the whole document.
                    log::error!("No sheet could be produced for page {}: {err}", member + 1);
                }
            }
        } else {
            let placements = plan_placements(group, &facts, &sheet, grid);
            let page_id = render_group_sheet(
                &mut output,
                source,
                &page_ids,
                &placements,
                &sheet,
                pages_tree_id,
                options.add_border,
            )?;
            page_refs.push(Object::Reference(page_id));
        }
    }

    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);

    log::debug!("Composed {} output sheets", count);
    Ok(output)
}
