//! Sheet drawing
//!
//! Consumes the placement specs produced by the layout layer and emits
//! the output page: one Form XObject per placed page plus optional
//! outlines, assembled from a small content-stream operator subset
//! (`cm`/`Do`, `re`/`S`, `BT`/`Tj`/`ET`).

use crate::constants::{BORDER_GRAY, BORDER_LINE_WIDTH};
use crate::layout::{PlacementSpec, SheetSpec};
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::xobject::create_page_form;

/// Render one non-isolated group sheet to the output document.
///
/// Placements are drawn in member order, so pages within a sheet keep
/// their source order.
pub fn render_group_sheet(
    output: &mut Document,
    source: &Document,
    source_page_ids: &[ObjectId],
    placements: &[PlacementSpec],
    sheet: &SheetSpec,
    parent_pages_id: ObjectId,
    add_border: bool,
) -> Result<ObjectId> {
    let mut content_ops = Vec::new();
    let mut xobjects = Dictionary::new();
    let mut copy_cache: HashMap<ObjectId, ObjectId> = HashMap::new();

    for (slot, placement) in placements.iter().enumerate() {
        let Some(&source_page_id) = source_page_ids.get(placement.page_index) else {
            log::warn!(
                "Placement references missing source page {}, skipping",
                placement.page_index + 1
            );
            continue;
        };

        let form_name = format!("P{}", slot);
        let form_id = create_page_form(output, source, source_page_id, &mut copy_cache)?;
        xobjects.set(form_name.as_bytes(), Object::Reference(form_id));

        content_ops.push(placement_command(&form_name, placement));

        if add_border {
            content_ops.push(outline_command(
                placement.x,
                placement.y,
                placement.scaled_width,
                placement.scaled_height,
            ));
        }
    }

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let page_id = finish_page(output, sheet, parent_pages_id, content_ops.join(""), resources);
    Ok(page_id)
}

/// Content stream command placing a form at a placement's transform.
pub(crate) fn placement_command(form_name: &str, placement: &PlacementSpec) -> String {
    format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        placement.scale, placement.scale, placement.x, placement.y, form_name
    )
}

/// Thin gray outline around a placed page's scaled bounding box.
pub(crate) fn outline_command(x: f32, y: f32, width: f32, height: f32) -> String {
    format!(
        "q {BORDER_GRAY} G {BORDER_LINE_WIDTH} w {x} {y} {width} {height} re S Q\n",
    )
}

/// Create the page dictionary, content stream and resources, add the page
/// to the output document and return its id. The caller owns appending
/// the reference to the page tree.
pub(crate) fn finish_page(
    output: &mut Document,
    sheet: &SheetSpec,
    parent_pages_id: ObjectId,
    content: String,
    resources: Dictionary,
) -> ObjectId {
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(sheet.width),
            Object::Real(sheet.height),
        ]),
    );
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    output.add_object(page_dict)
}

/// Standard Helvetica Type1 font object for notice text.
pub(crate) fn helvetica(output: &mut Document) -> ObjectId {
    let mut font_dict = Dictionary::new();
    font_dict.set("Type", Object::Name(b"Font".to_vec()));
    font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    font_dict.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
    output.add_object(font_dict)
}

/// Text block of consecutive lines starting at (x, y), top line first.
pub(crate) fn text_command(font_size: f32, x: f32, y: f32, line_spacing: f32, lines: &[String]) -> String {
    let mut ops = format!("BT /F1 {font_size} Tf {x} {y} Td ");
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            ops.push_str(&format!("0 {} Td ", -line_spacing));
        }
        ops.push_str(&format!("({}) Tj ", escape_text(line)));
    }
    ops.push_str("ET\n");
    ops
}

fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}
