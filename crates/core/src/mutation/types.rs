//! Partial-update types applied to stored pages and themes.
use serde::{Deserialize, Deserializer, Serialize};

use crate::document::model::{Document, FormConfig, ThankYouPage, Theme};
use crate::section::content::Section;

/// Shallow partial update of a stored page. Every present field replaces the
/// stored value wholesale; `id` and `createdAt` cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `Some(None)` clears the description; `None` leaves it alone.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_config: Option<FormConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thank_you_page: Option<ThankYouPage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl DocumentPatch {
    /// A patch overwriting every editable field with the values of `doc`.
    pub fn full(doc: &Document) -> Self {
        Self {
            name: Some(doc.name.clone()),
            description: Some(doc.description.clone()),
            theme: Some(doc.theme.clone()),
            sections: Some(doc.sections.clone()),
            form_config: Some(doc.form_config.clone()),
            thank_you_page: Some(doc.thank_you_page.clone()),
            published: Some(doc.published),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Names of the fields this patch touches, for logging and events.
    pub fn touched_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.theme.is_some() {
            fields.push("theme");
        }
        if self.sections.is_some() {
            fields.push("sections");
        }
        if self.form_config.is_some() {
            fields.push("formConfig");
        }
        if self.thank_you_page.is_some() {
            fields.push("thankYouPage");
        }
        if self.published.is_some() {
            fields.push("published");
        }
        fields
    }

    pub fn apply(self, doc: &mut Document) {
        if let Some(name) = self.name {
            doc.name = name;
        }
        if let Some(description) = self.description {
            doc.description = description;
        }
        if let Some(theme) = self.theme {
            doc.theme = theme;
        }
        if let Some(sections) = self.sections {
            doc.sections = sections;
        }
        if let Some(form_config) = self.form_config {
            doc.form_config = form_config;
        }
        if let Some(thank_you_page) = self.thank_you_page {
            doc.thank_you_page = thank_you_page;
        }
        if let Some(published) = self.published {
            doc.published = published;
        }
    }
}

/// Marks a field as present in the patch, including an explicit `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Field-by-field theme update: set fields overwrite, unset fields keep the
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

impl ThemePatch {
    pub fn merged_into(&self, theme: &Theme) -> Theme {
        Theme {
            primary_color: self
                .primary_color
                .clone()
                .unwrap_or_else(|| theme.primary_color.clone()),
            font: self.font.clone().unwrap_or_else(|| theme.font.clone()),
        }
    }
}
