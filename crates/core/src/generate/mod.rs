//! Generative content service boundary.

pub mod client;
pub mod config;
pub mod image;
pub mod prompt;

use thiserror::Error;

pub use client::{ContentGenerator, GeminiGenerator};
pub use config::GeneratorConfig;
pub use image::image_url_for;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("generation service API key is not configured")]
    MissingApiKey,
    #[error("network error: {0}")]
    Network(String),
    #[error("generation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("generation service returned an empty response")]
    EmptyResponse,
    #[error("unreadable generation service response: {0}")]
    InvalidResponse(String),
}
