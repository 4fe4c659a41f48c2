use std::fmt;

use serde::{Deserialize, Serialize};

/// The fixed set of section kinds a landing page can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Hero,
    Features,
    About,
    Cta,
    Testimonials,
    Text,
    Form,
}

impl SectionKind {
    pub const ALL: [SectionKind; 7] = [
        SectionKind::Hero,
        SectionKind::Features,
        SectionKind::About,
        SectionKind::Cta,
        SectionKind::Testimonials,
        SectionKind::Text,
        SectionKind::Form,
    ];

    /// Kinds offered in the add-section palette, in palette order.
    /// `about` and `cta` are declared but have no editor or renderer yet.
    pub const SUPPORTED: [SectionKind; 5] = [
        SectionKind::Hero,
        SectionKind::Features,
        SectionKind::Testimonials,
        SectionKind::Form,
        SectionKind::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Features => "features",
            Self::About => "about",
            Self::Cta => "cta",
            Self::Testimonials => "testimonials",
            Self::Text => "text",
            Self::Form => "form",
        }
    }

    /// Display label shown in the editing sidebar.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Hero => "אזור ראשי",
            Self::Features => "רשימת יתרונות",
            Self::About => "אודות",
            Self::Cta => "קריאה לפעולה",
            Self::Testimonials => "המלצות",
            Self::Text => "טקסט חופשי",
            Self::Form => "טופס לידים",
        }
    }

    pub fn is_supported(&self) -> bool {
        Self::SUPPORTED.contains(self)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
