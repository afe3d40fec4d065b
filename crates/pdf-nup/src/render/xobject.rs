//! Form XObject creation and page import
//!
//! A source page placed on a sheet is embedded as a Form XObject: its
//! content stream becomes the form body and its resources are deep-copied
//! into the output document. The deep copy is cached per sheet so shared
//! resources are written once.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Build a Form XObject from a source page.
///
/// The returned object can be placed any number of times with different
/// transforms. The BBox is the source MediaBox; callers that need a sanity
/// check on the form's extent should validate the page dimensions first.
pub fn create_page_form(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let page_dict = source.get_dictionary(page_id)?;

    let media_box = page_dict
        .get(b"MediaBox")
        .and_then(|obj| obj.as_array())
        .ok()
        .cloned()
        .unwrap_or_else(default_media_box);

    let content = page_content(source, page_dict)?;

    let mut form_dict = Dictionary::new();
    form_dict.set("Type", Object::Name(b"XObject".to_vec()));
    form_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    form_dict.set("BBox", Object::Array(media_box));
    form_dict.set("FormType", Object::Integer(1));

    if let Ok(resources) = page_dict.get(b"Resources") {
        form_dict.set(
            "Resources",
            copy_object_deep(output, source, resources, cache)?,
        );
    }

    Ok(output.add_object(Stream::new(form_dict, content)))
}

/// Deep-copy a source page into the output document unchanged.
///
/// The new page is registered in the cache before its entries are copied,
/// so back-references (annotation `/P` entries and the like) resolve to
/// the new page instead of recursing. `Parent` is rewritten to the output
/// page tree.
pub fn import_page_verbatim(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    parent_pages_id: ObjectId,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let new_id = output.new_object_id();
    cache.insert(page_id, new_id);

    let page_dict = source.get_dictionary(page_id)?;
    let mut copied = Dictionary::new();
    for (key, value) in page_dict.iter() {
        if key.as_slice() == b"Parent".as_slice() {
            continue;
        }
        copied.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    copied.set("Parent", Object::Reference(parent_pages_id));

    output.objects.insert(new_id, Object::Dictionary(copied));
    Ok(new_id)
}

/// Source page dimensions (width, height) in points, defaulting to US
/// Letter when the MediaBox is missing or malformed.
pub fn page_dimensions(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let Ok(page_dict) = doc.get_dictionary(page_id) else {
        return DEFAULT_PAGE_DIMENSIONS;
    };

    match page_dict.get(b"MediaBox").and_then(|obj| obj.as_array()) {
        Ok(mb) if mb.len() >= 4 => {
            let x0 = as_number(&mb[0]).unwrap_or(0.0);
            let y0 = as_number(&mb[1]).unwrap_or(0.0);
            let x1 = as_number(&mb[2]);
            let y1 = as_number(&mb[3]);
            match (x1, y1) {
                (Some(x1), Some(y1)) => (x1 - x0, y1 - y0),
                _ => DEFAULT_PAGE_DIMENSIONS,
            }
        }
        _ => DEFAULT_PAGE_DIMENSIONS,
    }
}

fn default_media_box() -> Vec<Object> {
    vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(DEFAULT_PAGE_DIMENSIONS.0 as i64),
        Object::Integer(DEFAULT_PAGE_DIMENSIONS.1 as i64),
    ]
}

fn as_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Concatenated, decompressed content stream data of a page.
fn page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Ok(Vec::new()), // no content, blank page
    };

    match contents {
        Object::Reference(id) => single_stream_content(doc, *id),
        Object::Array(refs) => {
            let mut result = Vec::new();
            for obj in refs {
                if let Object::Reference(id) = obj {
                    result.extend_from_slice(&single_stream_content(doc, *id)?);
                    result.push(b'\n');
                }
            }
            Ok(result)
        }
        _ => Ok(Vec::new()),
    }
}

fn single_stream_content(doc: &Document, id: ObjectId) -> Result<Vec<u8>> {
    if let Ok(stream) = doc.get_object(id)?.as_stream() {
        Ok(stream
            .decompressed_content()
            .unwrap_or_else(|_| stream.content.clone()))
    } else {
        Ok(Vec::new())
    }
}

/// Deep copy an object from source to output, following references.
///
/// The cache both de-duplicates shared objects and breaks reference
/// cycles for entries pre-seeded by callers.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            let referenced = source.get_object(*id)?;
            let copied = copy_object_deep(output, source, referenced, cache)?;

            let new_id = output.add_object(copied);
            cache.insert(*id, new_id);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Dictionary(new_dict))
        }
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in stream.dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
            }
            Ok(Object::Stream(Stream {
                dict: new_dict,
                content: stream.content.clone(),
                allows_compression: stream.allows_compression,
                start_position: None,
            }))
        }
        // Primitive types: just clone
        _ => Ok(obj.clone()),
    }
}
