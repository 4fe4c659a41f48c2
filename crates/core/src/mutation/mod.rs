pub mod types;

pub use types::{DocumentPatch, ThemePatch};
