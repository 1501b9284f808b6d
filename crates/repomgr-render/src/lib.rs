//! Rendering for terminal and CI surfaces (plain table, Markdown).

#![forbid(unsafe_code)]

mod markdown;
mod model;
mod table;

pub use markdown::render_markdown;
pub use model::{RenderableRepo, RenderableReport};
pub use table::render_table;
