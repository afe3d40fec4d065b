//! PDF rendering modules for sheet composition
//!
//! Everything lopdf-specific lives here: turning source pages into Form
//! XObjects, drawing planned sheets, and the fallback chain for pages
//! pinned to their own sheet. The layout layer stays free of these types.

mod fallback;
mod sheet;
mod xobject;

pub use fallback::render_isolated;
pub use sheet::render_group_sheet;
pub use xobject::{copy_object_deep, create_page_form, import_page_verbatim, page_dimensions};
