pub mod document;
pub mod html;

pub use document::{MapDocument, Marker};
pub use html::{RenderError, render_html, write_html};
