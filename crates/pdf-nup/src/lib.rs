pub mod compose;
pub mod layout;
pub mod render;

mod constants;
mod options;
mod stats;
mod types;

pub use compose::{compose, compose_sync, load_pdf, output_filename, save_pdf};
pub use options::*;
pub use stats::calculate_statistics;
pub use types::*;
