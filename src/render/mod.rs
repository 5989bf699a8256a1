//! Rendering module for converting reconstructed documents to output formats.

mod export;
mod grid;
mod json;
mod text;

pub use export::{to_export_text, write_export};
pub use grid::render_grid;
pub use json::{to_json, JsonFormat};
pub use text::{to_text, TextOptions};
