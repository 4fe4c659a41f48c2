/// Settings for the hosted generation service and the image endpoint.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// API key; generation requests fail with `MissingApiKey` when unset.
    pub api_key: Option<String>,
    /// Model used for both page and image-description requests.
    pub model: String,
    /// Service origin, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Origin of the prompt-to-image endpoint.
    pub image_endpoint: String,
}

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_IMAGE_ENDPOINT: &str = "https://image.pollinations.ai";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            image_endpoint: DEFAULT_IMAGE_ENDPOINT.to_string(),
        }
    }
}
