//! Render fallback chain for pages pinned to their own sheet
//!
//! An ordered chain of strategies, advancing only when the current one
//! fails:
//!
//! 1. embed the page as a Form XObject 1:1 on a sheet matching its size;
//! 2. if the page is already A4 within tolerance, import it verbatim and
//!    coerce its declared size to exactly A4;
//! 3. emit an A4 placeholder sheet naming the page and its original size;
//! 4. emit an A4 error sheet with a red border.
//!
//! The strategy that fired is returned as a [`FallbackOutcome`] so the
//! degradation is observable rather than silent. Only a failure of the
//! final error sheet escapes to the caller.

use crate::constants::{
    A4_HEIGHT_PT, A4_WIDTH_PT, ERROR_BORDER_INSET_PT, ERROR_BORDER_LINE_WIDTH, ERROR_FONT_SIZE,
    NOTICE_FONT_SIZE, NOTICE_LINE_SPACING, NOTICE_MARGIN_PT, NOTICE_TOP_OFFSET_PT,
    STANDARD_SIZE_TOLERANCE_PT,
};
use crate::layout::{PageFacts, PlacementSpec, SheetSpec};
use crate::types::{FallbackOutcome, NupError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;

use super::sheet::{finish_page, helvetica, outline_command, placement_command, text_command};
use super::xobject::{create_page_form, import_page_verbatim};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Embed,
    DirectCopy,
    Placeholder,
    ErrorSheet,
}

impl Stage {
    fn next(self) -> Stage {
        match self {
            Stage::Embed => Stage::DirectCopy,
            Stage::DirectCopy => Stage::Placeholder,
            Stage::Placeholder => Stage::ErrorSheet,
            // render_isolated returns out of ErrorSheet either way
            Stage::ErrorSheet => Stage::ErrorSheet,
        }
    }
}

/// Render a pinned page onto its own sheet, degrading through the chain
/// until a strategy succeeds.
///
/// `sheet` is the full-bleed sheet computed by the sizer (the page's own
/// size). Returns the new page id and the outcome that produced it; an
/// error means even the last-resort error sheet could not be built, which
/// the orchestrator records without aborting the run.
#[allow(clippy::too_many_arguments)]
pub fn render_isolated(
    output: &mut Document,
    source: &Document,
    source_page_id: ObjectId,
    page: &PageFacts,
    sheet: &SheetSpec,
    parent_pages_id: ObjectId,
    add_border: bool,
) -> Result<(ObjectId, FallbackOutcome)> {
    let page_number = page.index + 1;
    let mut stage = Stage::Embed;

    loop {
        let attempt = match stage {
            Stage::Embed => try_embed(
                output,
                source,
                source_page_id,
                page,
                sheet,
                parent_pages_id,
                add_border,
            ),
            Stage::DirectCopy => try_direct_copy(output, source, source_page_id, page, parent_pages_id),
            Stage::Placeholder => try_placeholder(output, page, parent_pages_id),
            Stage::ErrorSheet => {
                let page_id = error_sheet(output, page_number, parent_pages_id)?;
                return Ok((page_id, FallbackOutcome::ErrorPlaceholder));
            }
        };

        match attempt {
            Ok(done) => return Ok(done),
            Err(err) => {
                log::warn!("{stage:?} failed for page {page_number}: {err}");
                stage = stage.next();
            }
        }
    }
}

/// Stage 1: 1:1 Form XObject embed on the full-bleed sheet.
fn try_embed(
    output: &mut Document,
    source: &Document,
    source_page_id: ObjectId,
    page: &PageFacts,
    sheet: &SheetSpec,
    parent_pages_id: ObjectId,
    add_border: bool,
) -> Result<(ObjectId, FallbackOutcome)> {
    if !(page.width.is_finite() && page.height.is_finite())
        || page.width <= 0.0
        || page.height <= 0.0
    {
        return Err(NupError::Config(format!(
            "form bbox is degenerate: {}x{}",
            page.width, page.height
        )));
    }

    let mut copy_cache: HashMap<ObjectId, ObjectId> = HashMap::new();
    let form_id = create_page_form(output, source, source_page_id, &mut copy_cache)?;

    // The sheet already matches the page, so the placement is identity.
    let placement = PlacementSpec {
        page_index: page.index,
        scale: 1.0,
        x: 0.0,
        y: 0.0,
        scaled_width: page.width,
        scaled_height: page.height,
    };

    let mut content = placement_command("P0", &placement);
    if add_border {
        content.push_str(&outline_command(0.0, 0.0, page.width, page.height));
    }

    let mut xobjects = Dictionary::new();
    xobjects.set("P0", Object::Reference(form_id));
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let page_id = finish_page(output, sheet, parent_pages_id, content, resources);
    Ok((page_id, FallbackOutcome::EmbeddedExact))
}

/// Stage 2: verbatim import for pages that are already A4-sized.
fn try_direct_copy(
    output: &mut Document,
    source: &Document,
    source_page_id: ObjectId,
    page: &PageFacts,
    parent_pages_id: ObjectId,
) -> Result<(ObjectId, FallbackOutcome)> {
    if !within_standard_tolerance(page.width, page.height) {
        return Err(NupError::Config(format!(
            "page size {}x{} differs from A4",
            page.width, page.height
        )));
    }

    let mut copy_cache: HashMap<ObjectId, ObjectId> = HashMap::new();
    let page_id = import_page_verbatim(output, source, source_page_id, parent_pages_id, &mut copy_cache)?;

    // Pin the declared size to exactly A4.
    if let Ok(Object::Dictionary(dict)) = output.get_object_mut(page_id) {
        dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(A4_WIDTH_PT),
                Object::Real(A4_HEIGHT_PT),
            ]),
        );
    }

    Ok((page_id, FallbackOutcome::SizePreservedCopy))
}

/// Whether a page size is within the per-axis tolerance of A4.
pub(crate) fn within_standard_tolerance(width: f32, height: f32) -> bool {
    (width - A4_WIDTH_PT).abs() < STANDARD_SIZE_TOLERANCE_PT
        && (height - A4_HEIGHT_PT).abs() < STANDARD_SIZE_TOLERANCE_PT
}

/// Stage 3: A4 sheet with a textual notice in place of the content.
fn try_placeholder(
    output: &mut Document,
    page: &PageFacts,
    parent_pages_id: ObjectId,
) -> Result<(ObjectId, FallbackOutcome)> {
    let sheet = SheetSpec {
        width: A4_WIDTH_PT,
        height: A4_HEIGHT_PT,
    };

    let lines = vec![
        format!("Page {} - size adjusted to A4", page.index + 1),
        format!(
            "Original size: {}x{}",
            page.width as i64, page.height as i64
        ),
    ];
    let content = text_command(
        NOTICE_FONT_SIZE,
        NOTICE_MARGIN_PT,
        A4_HEIGHT_PT - NOTICE_TOP_OFFSET_PT,
        NOTICE_LINE_SPACING,
        &lines,
    );

    let font_id = helvetica(output);
    let mut fonts = Dictionary::new();
    fonts.set("F1", Object::Reference(font_id));
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));

    let page_id = finish_page(output, &sheet, parent_pages_id, content, resources);
    Ok((
        page_id,
        FallbackOutcome::PlaceholderNotice {
            original_width: page.width,
            original_height: page.height,
        },
    ))
}

/// Stage 4: last-resort A4 error sheet with a red border.
fn error_sheet(
    output: &mut Document,
    page_number: usize,
    parent_pages_id: ObjectId,
) -> Result<ObjectId> {
    let sheet = SheetSpec {
        width: A4_WIDTH_PT,
        height: A4_HEIGHT_PT,
    };

    let lines = vec![
        format!("Error rendering page {page_number}"),
        "Original page content could not be displayed".to_string(),
    ];
    let mut content = text_command(
        ERROR_FONT_SIZE,
        NOTICE_MARGIN_PT,
        A4_HEIGHT_PT - NOTICE_TOP_OFFSET_PT,
        NOTICE_LINE_SPACING,
        &lines,
    );
    content.push_str(&format!(
        "q 1 0 0 RG {ERROR_BORDER_LINE_WIDTH} w {x} {y} {w} {h} re S Q\n",
        x = ERROR_BORDER_INSET_PT,
        y = ERROR_BORDER_INSET_PT,
        w = A4_WIDTH_PT - 2.0 * ERROR_BORDER_INSET_PT,
        h = A4_HEIGHT_PT - 2.0 * ERROR_BORDER_INSET_PT,
    ));

    let font_id = helvetica(output);
    let mut fonts = Dictionary::new();
    fonts.set("F1", Object::Reference(font_id));
    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts));

    Ok(finish_page(output, &sheet, parent_pages_id, content, resources))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::classify;

    #[test]
    fn tolerance_accepts_near_a4() {
        assert!(within_standard_tolerance(A4_WIDTH_PT, A4_HEIGHT_PT));
        assert!(within_standard_tolerance(A4_WIDTH_PT + 9.0, A4_HEIGHT_PT - 9.0));
    }

    #[test]
    fn tolerance_rejects_other_sizes() {
        assert!(!within_standard_tolerance(612.0, 792.0));
        assert!(!within_standard_tolerance(A4_WIDTH_PT, A4_HEIGHT_PT + 11.0));
    }

    fn doc_with_page(media_box: Option<Vec<Object>>) -> (Document, ObjectId, ObjectId) {
        use lopdf::Stream;

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(Stream::new(Dictionary::new(), b"q Q".to_vec()));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(pages_id));
        if let Some(mb) = media_box {
            page_dict.set("MediaBox", Object::Array(mb));
        }
        page_dict.set("Resources", Object::Dictionary(Dictionary::new()));
        page_dict.set("Contents", Object::Reference(content_id));
        let page_id = doc.add_object(page_dict);

        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(vec![Object::Reference(page_id)])),
            ("Count", Object::Integer(1)),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        (doc, page_id, pages_id)
    }

    #[test]
    fn healthy_page_embeds_exactly() {
        let (source, page_id, _) = doc_with_page(Some(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ]));
        let mut output = Document::with_version("1.7");
        let parent = output.new_object_id();
        let facts = classify(0, 612.0, 792.0);
        let sheet = SheetSpec {
            width: 612.0,
            height: 792.0,
        };

        let (_, outcome) = render_isolated(
            &mut output,
            &source,
            page_id,
            &facts,
            &sheet,
            parent,
            false,
        )
        .unwrap();
        assert_eq!(outcome, FallbackOutcome::EmbeddedExact);
    }

    #[test]
    fn degenerate_page_falls_back_to_placeholder() {
        let (source, page_id, _) = doc_with_page(Some(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(0),
        ]));
        let mut output = Document::with_version("1.7");
        let parent = output.new_object_id();
        let facts = classify(0, 0.0, 0.0);
        let sheet = SheetSpec {
            width: A4_WIDTH_PT,
            height: A4_HEIGHT_PT,
        };

        let (_, outcome) = render_isolated(
            &mut output,
            &source,
            page_id,
            &facts,
            &sheet,
            parent,
            false,
        )
        .unwrap();
        assert_eq!(
            outcome,
            FallbackOutcome::PlaceholderNotice {
                original_width: 0.0,
                original_height: 0.0
            }
        );
    }

    #[test]
    fn direct_copy_coerces_media_box_to_a4() {
        let (source, page_id, _) = doc_with_page(Some(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(A4_WIDTH_PT + 4.0),
            Object::Real(A4_HEIGHT_PT - 6.0),
        ]));
        let mut output = Document::with_version("1.7");
        let parent = output.new_object_id();
        let facts = classify(0, A4_WIDTH_PT + 4.0, A4_HEIGHT_PT - 6.0);

        let (copied_id, outcome) =
            try_direct_copy(&mut output, &source, page_id, &facts, parent).unwrap();
        assert_eq!(outcome, FallbackOutcome::SizePreservedCopy);

        let dict = output.get_dictionary(copied_id).unwrap();
        let mb = dict.get(b"MediaBox").unwrap().as_array().unwrap();
        assert_eq!(mb[2], Object::Real(A4_WIDTH_PT));
        assert_eq!(mb[3], Object::Real(A4_HEIGHT_PT));
    }

    #[test]
    fn direct_copy_rejects_non_a4_pages() {
        let (source, page_id, _) = doc_with_page(Some(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ]));
        let mut output = Document::with_version("1.7");
        let parent = output.new_object_id();
        let facts = classify(0, 612.0, 792.0);

        assert!(try_direct_copy(&mut output, &source, page_id, &facts, parent).is_err());
    }
}
