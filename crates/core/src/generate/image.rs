use super::GenerateError;

/// Turn a visual description into an image URL on the prompt endpoint.
/// Nothing is fetched; the URL is only stored.
pub fn image_url_for(endpoint: &str, description: &str) -> Result<String, GenerateError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(GenerateError::EmptyResponse);
    }
    Ok(format!(
        "{}/prompt/{}",
        endpoint.trim_end_matches('/'),
        urlencoding::encode(description)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_is_url_encoded() {
        let url = image_url_for("https://image.pollinations.ai/", " sunrise over calm sea ").unwrap();
        assert_eq!(url, "https://image.pollinations.ai/prompt/sunrise%20over%20calm%20sea");
    }

    #[test]
    fn blank_description_is_rejected() {
        assert!(matches!(
            image_url_for("https://image.pollinations.ai", "   "),
            Err(GenerateError::EmptyResponse)
        ));
    }
}
