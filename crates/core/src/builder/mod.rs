//! Editing session: the page being edited plus its view and request state.

pub mod controller;
pub mod error;
pub mod sidebar;

pub use controller::{Builder, ImageGeneration, PageGeneration, SaveOutcome};
pub use error::BuilderError;
pub use sidebar::{EditorTab, PaletteEntry, SidebarEntry, SidebarView};
