//! Live preview of a page, as a node tree or as HTML.

pub mod html;
pub mod render;
pub mod vnode;

pub use html::{render_page_html, to_html};
pub use render::{render_preview, Viewport};
pub use vnode::VNode;
