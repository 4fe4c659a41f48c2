//! HTTP client for the hosted generative model.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::config::GeneratorConfig;
use super::prompt;
use super::GenerateError;

/// User-Agent string for generation requests.
const USER_AGENT: &str = concat!("landing-builder/", env!("CARGO_PKG_VERSION"));

/// Source of generated page content and image descriptions.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Raw JSON page payload for a business description.
    async fn generate_page(&self, business_description: &str) -> Result<String, GenerateError>;

    /// Short visual description for a hero background.
    async fn describe_image(&self, headline: &str, subheadline: &str)
        -> Result<String, GenerateError>;

    /// Origin of the prompt-to-image endpoint descriptions are turned into.
    fn image_endpoint(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// [`ContentGenerator`] backed by the `generateContent` REST endpoint.
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    client: Client,
    config: GeneratorConfig,
}

impl GeminiGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerateError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerateError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn generate(
        &self,
        system: Option<&str>,
        user: &str,
        json_response: bool,
    ) -> Result<String, GenerateError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(GenerateError::MissingApiKey)?;

        let body = GenerateContentRequest {
            system_instruction: system.map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: user }],
            }],
            generation_config: json_response.then_some(GenerationConfig {
                response_mime_type: "application/json",
            }),
        };

        let url = self.endpoint();
        debug!(%url, model = %self.config.model, "sending generation request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::InvalidResponse(e.to_string()))?;
        parsed.into_text().ok_or(GenerateError::EmptyResponse)
    }
}

#[async_trait]
impl ContentGenerator for GeminiGenerator {
    #[instrument(skip_all, fields(model = %self.config.model))]
    async fn generate_page(&self, business_description: &str) -> Result<String, GenerateError> {
        let text = self
            .generate(
                Some(prompt::PAGE_INSTRUCTION),
                &prompt::page_request(business_description),
                true,
            )
            .await?;
        info!(bytes = text.len(), "page content generated");
        Ok(text)
    }

    #[instrument(skip_all, fields(model = %self.config.model))]
    async fn describe_image(
        &self,
        headline: &str,
        subheadline: &str,
    ) -> Result<String, GenerateError> {
        let text = self
            .generate(None, &prompt::image_request(headline, subheadline), false)
            .await?;
        let description = text.trim().to_string();
        info!(%description, "image description generated");
        Ok(description)
    }

    fn image_endpoint(&self) -> &str {
        &self.config.image_endpoint
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn generator(server: &MockServer, api_key: Option<&str>) -> GeminiGenerator {
        GeminiGenerator::new(GeneratorConfig {
            api_key: api_key.map(str::to_string),
            base_url: server.uri(),
            timeout_secs: 5,
            ..Default::default()
        })
        .unwrap()
    }

    fn text_response(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        }))
    }

    #[tokio::test]
    async fn page_request_asks_for_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "generationConfig": { "responseMimeType": "application/json" },
                "contents": [{ "parts": [{ "text": "Business Description: yoga" }] }]
            })))
            .respond_with(text_response(r#"{"sections":[]}"#))
            .expect(1)
            .mount(&server)
            .await;

        let text = generator(&server, Some("test-key"))
            .generate_page("yoga")
            .await
            .unwrap();
        assert_eq!(text, r#"{"sections":[]}"#);
    }

    #[tokio::test]
    async fn image_description_is_trimmed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(text_response("  misty mountain sunrise \n"))
            .mount(&server)
            .await;

        let description = generator(&server, Some("k"))
            .describe_image("Calm", "Yoga")
            .await
            .unwrap();
        assert_eq!(description, "misty mountain sunrise");
    }

    #[tokio::test]
    async fn missing_key_fails_without_a_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(text_response("{}"))
            .expect(0)
            .mount(&server)
            .await;

        let err = generator(&server, None).generate_page("yoga").await.unwrap_err();
        assert!(matches!(err, GenerateError::MissingApiKey));
    }

    #[tokio::test]
    async fn service_errors_surface_their_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = generator(&server, Some("k")).generate_page("yoga").await.unwrap_err();
        match err {
            GenerateError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_candidates_are_an_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let err = generator(&server, Some("k")).generate_page("yoga").await.unwrap_err();
        assert!(matches!(err, GenerateError::EmptyResponse));
    }
}
