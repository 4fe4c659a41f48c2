//! The editing sidebar, derived from the same page as the preview.

use serde::{Deserialize, Serialize};

use crate::document::id::SectionId;
use crate::document::model::{FormConfig, ThankYouPage, Theme, PRESET_COLORS, PRESET_FONTS};
use crate::section::kind::SectionKind;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorTab {
    #[default]
    Content,
    Design,
    Settings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarEntry {
    pub id: SectionId,
    pub kind: SectionKind,
    pub label: &'static str,
    pub expanded: bool,
    pub can_move_up: bool,
    pub can_move_down: bool,
    pub generating_image: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    pub kind: SectionKind,
    pub label: &'static str,
}

/// What the active tab shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tab", rename_all = "lowercase")]
pub enum SidebarView {
    #[serde(rename_all = "camelCase")]
    Content {
        sections: Vec<SidebarEntry>,
        palette: Vec<PaletteEntry>,
        generating_page: bool,
    },
    #[serde(rename_all = "camelCase")]
    Design {
        theme: Theme,
        preset_colors: Vec<&'static str>,
        preset_fonts: Vec<&'static str>,
    },
    #[serde(rename_all = "camelCase")]
    Settings {
        name: String,
        form_config: FormConfig,
        thank_you_page: ThankYouPage,
    },
}

impl SidebarView {
    pub fn tab(&self) -> EditorTab {
        match self {
            Self::Content { .. } => EditorTab::Content,
            Self::Design { .. } => EditorTab::Design,
            Self::Settings { .. } => EditorTab::Settings,
        }
    }
}

pub fn palette() -> Vec<PaletteEntry> {
    SectionKind::SUPPORTED
        .iter()
        .map(|&kind| PaletteEntry {
            kind,
            label: kind.label(),
        })
        .collect()
}

pub fn design_view(theme: &Theme) -> SidebarView {
    SidebarView::Design {
        theme: theme.clone(),
        preset_colors: PRESET_COLORS.to_vec(),
        preset_fonts: PRESET_FONTS.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_lists_supported_kinds_in_order() {
        let kinds: Vec<_> = palette().into_iter().map(|p| p.kind).collect();
        assert_eq!(kinds, SectionKind::SUPPORTED.to_vec());
    }

    #[test]
    fn views_are_tagged_by_tab() {
        let view = design_view(&Theme::default());
        assert_eq!(view.tab(), EditorTab::Design);
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["tab"], "design");
        assert_eq!(value["presetFonts"][0], "Rubik");
    }
}
