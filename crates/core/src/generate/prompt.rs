//! Fixed instructions sent with every generation request.

/// System instruction describing the JSON shape of a generated page.
pub const PAGE_INSTRUCTION: &str = r#"You are an expert copywriter and landing page designer.
Generate a JSON object representing a landing page.
Structure:
{
    "theme": { "primaryColor": "hex" },
    "sections": [
        { "type": "hero", "content": { "headline": "", "subheadline": "", "buttonText": "" } },
        { "type": "features", "content": { "features": [{ "title": "", "description": "", "icon": "check" }] } },
        { "type": "testimonials", "content": { "testimonials": [{ "name": "", "role": "", "quote": "" }] } },
        { "type": "form", "content": { "headline": "Ready?", "subheadline": "Join us" } }
    ]
}
Return ONLY valid JSON."#;

pub fn page_request(business_description: &str) -> String {
    format!("Business Description: {business_description}")
}

pub fn image_request(headline: &str, subheadline: &str) -> String {
    format!(
        "Based on this landing page headline: \"{headline}\" and subheadline: \"{subheadline}\", \
         generate a single, concise, vivid English image prompt (max 15 words) that would make a \
         perfect background image for the hero section. \
         Do not include words like \"image of\" or \"picture of\". Just the visual description."
    )
}
