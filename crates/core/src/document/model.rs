use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{DocumentId, SectionId};
use crate::section::content::{HeroContent, Section, SectionContent};

pub const DEFAULT_PRIMARY_COLOR: &str = "#7c3aed";
pub const DEFAULT_FONT: &str = "Rubik";

/// Colours offered by the design tab.
pub const PRESET_COLORS: [&str; 6] = [
    "#7c3aed", "#2563eb", "#db2777", "#16a34a", "#ea580c", "#000000",
];

/// Fonts offered by the design tab.
pub const PRESET_FONTS: [&str; 3] = ["Rubik", "Heebo", "Assistant"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub primary_color: String,
    pub font: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            font: DEFAULT_FONT.to_string(),
        }
    }
}

/// A field the lead-capture form may show.
///
/// The well-known fields are rendered by the preview. `Custom` references a
/// field owned by the CRM settings and is never validated here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FormField {
    Name,
    Phone,
    Email,
    Custom(String),
}

impl FormField {
    /// Render order of the well-known fields.
    pub const WELL_KNOWN: [FormField; 3] = [FormField::Name, FormField::Phone, FormField::Email];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Custom(id) => id,
        }
    }
}

impl From<String> for FormField {
    fn from(value: String) -> Self {
        match value.as_str() {
            "name" => Self::Name,
            "phone" => Self::Phone,
            "email" => Self::Email,
            _ => Self::Custom(value),
        }
    }
}

impl From<&str> for FormField {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<FormField> for String {
    fn from(field: FormField) -> Self {
        field.as_str().to_string()
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
    pub button_text: String,
}

impl FormConfig {
    pub fn includes(&self, field: &FormField) -> bool {
        self.fields.contains(field)
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            title: "השאר פרטים".into(),
            fields: vec![FormField::Name, FormField::Phone],
            button_text: "שלח עכשיו".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThankYouPage {
    pub title: String,
    pub message: String,
}

impl Default for ThankYouPage {
    fn default() -> Self {
        Self {
            title: "תודה רבה!".into(),
            message: "פרטיך התקבלו בהצלחה.".into(),
        }
    }
}

/// One landing page: ordered sections plus theme, form and thank-you
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub id: DocumentId,
    pub name: String,
    /// Business description, only used as generation context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub form_config: FormConfig,
    #[serde(default)]
    pub thank_you_page: ThankYouPage,
    #[serde(default)]
    pub published: bool,
    /// Assigned once by the store; `None` for drafts.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Document {
    /// A fresh, unsaved page holding the template hero section.
    pub fn draft() -> Self {
        Self {
            id: DocumentId::draft(),
            name: "דף נחיתה חדש".into(),
            description: None,
            theme: Theme::default(),
            sections: vec![Section::new(SectionContent::Hero(HeroContent {
                headline: "כותרת ראשית מושכת".into(),
                subheadline: "תת כותרת שמסבירה את הערך ללקוח".into(),
                image_url: "https://images.unsplash.com/photo-1497366216548-37526070297c?auto=format&fit=crop&q=80&w=2301".into(),
                button_text: "קריאה לפעולה".into(),
            }))],
            form_config: FormConfig::default(),
            thank_you_page: ThankYouPage::default(),
            published: false,
            created_at: None,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.id.is_draft()
    }

    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    pub fn section_index(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    /// Image of the first hero section, used as the page thumbnail.
    pub fn cover_image(&self) -> Option<&str> {
        self.sections.iter().find_map(|s| match &s.content {
            SectionContent::Hero(hero) if !hero.image_url.is_empty() => {
                Some(hero.image_url.as_str())
            }
            _ => None,
        })
    }
}

/// A page as submitted for insertion: everything but the identifier and the
/// creation timestamp, which the store assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub form_config: FormConfig,
    #[serde(default)]
    pub thank_you_page: ThankYouPage,
    #[serde(default)]
    pub published: bool,
}

impl NewDocument {
    pub fn into_document(self, id: DocumentId, created_at: DateTime<Utc>) -> Document {
        Document {
            id,
            name: self.name,
            description: self.description,
            theme: self.theme,
            sections: self.sections,
            form_config: self.form_config,
            thank_you_page: self.thank_you_page,
            published: self.published,
            created_at: Some(created_at),
        }
    }
}

impl From<Document> for NewDocument {
    fn from(doc: Document) -> Self {
        Self {
            name: doc.name,
            description: doc.description,
            theme: doc.theme,
            sections: doc.sections,
            form_config: doc.form_config,
            thank_you_page: doc.thank_you_page,
            published: doc.published,
        }
    }
}
