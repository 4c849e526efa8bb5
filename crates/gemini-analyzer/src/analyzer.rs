//! GeminiAnalyzer implementation using the Gemini API.

use async_trait::async_trait;
use reqwest::Client;
use sorucoz_core::{
    prompt_fingerprint, solution_from_reply, subject_from_reply, AnalyzerError, QuestionAnalyzer,
    Solution, Subject,
};
use tracing::{debug, info};

use crate::api_types::{
    ApiError, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};
use crate::config::GeminiConfig;

/// An analyzer implementation that uses the Gemini API for vision calls.
///
/// Each operation sends the question photo as a `file_data` part with an
/// instruction prompt and salvage-parses the reply. The analyzer keeps no
/// per-request state; one instance serves the whole process.
pub struct GeminiAnalyzer {
    client: Client,
    config: GeminiConfig,
    detect_prompt_hash: String,
    solve_prompt_hash: String,
}

impl GeminiAnalyzer {
    /// Create a new GeminiAnalyzer with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, AnalyzerError> {
        let client = Client::builder().build().map_err(|e| {
            AnalyzerError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        let detect_prompt_hash = prompt_fingerprint(config.detect_prompt());
        let solve_prompt_hash = prompt_fingerprint(config.solve_prompt());

        info!(
            "GeminiAnalyzer initialized with model: {} (detect prompt {}, solve prompt {})",
            config.model, detect_prompt_hash, solve_prompt_hash
        );

        Ok(Self {
            client,
            config,
            detect_prompt_hash,
            solve_prompt_hash,
        })
    }

    /// Create a GeminiAnalyzer from environment variables.
    ///
    /// See [`GeminiConfig::from_env`] for the variables involved.
    pub fn from_env() -> Result<Self, AnalyzerError> {
        let config = GeminiConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Fingerprint of the detection prompt in effect.
    pub fn detect_prompt_hash(&self) -> &str {
        &self.detect_prompt_hash
    }

    /// Fingerprint of the solving prompt in effect.
    pub fn solve_prompt_hash(&self) -> &str {
        &self.solve_prompt_hash
    }

    /// Make a `generateContent` request with a prompt and one image.
    async fn generate(&self, prompt: &str, image_url: &str) -> Result<String, AnalyzerError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url, self.config.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::text(prompt),
                Part::image(image_mime(image_url), image_url),
            ])],
            generation_config: Some(GenerationConfig {
                max_output_tokens: self.config.max_output_tokens,
                temperature: self.config.temperature,
            }),
        };

        debug!("Sending request to Gemini API: {:?}", request);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalyzerError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as API error
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(AnalyzerError::ProcessingFailed(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }

            return Err(AnalyzerError::ProcessingFailed(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        let completion: GenerateContentResponse = response.json().await.map_err(|e| {
            AnalyzerError::ProcessingFailed(format!("Failed to parse response: {}", e))
        })?;

        debug!("Received response from Gemini API: {:?}", completion);

        if let Some(usage) = &completion.usage_metadata {
            debug!(
                "Token usage - prompt: {:?}, completion: {:?}, total: {:?}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        completion
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| AnalyzerError::ProcessingFailed("no text in completion".to_string()))
    }
}

#[async_trait]
impl QuestionAnalyzer for GeminiAnalyzer {
    async fn detect_subject(&self, image_url: &str) -> Result<Subject, AnalyzerError> {
        debug!("Detecting subject for {}", image_url);

        let reply = self.generate(self.config.detect_prompt(), image_url).await?;
        let subject = subject_from_reply(&reply);

        info!("Detected subject {} for {}", subject, image_url);
        Ok(subject)
    }

    async fn solve(&self, image_url: &str, subject: Subject) -> Result<Solution, AnalyzerError> {
        debug!("Solving {} question at {}", subject, image_url);

        // Naming the detected subject keeps the model from re-deriving it.
        let prompt = format!("{}\nDers: {}", self.config.solve_prompt(), subject.label());
        let reply = self.generate(&prompt, image_url).await?;

        Ok(solution_from_reply(&reply))
    }

    fn name(&self) -> &str {
        "GeminiAnalyzer"
    }
}

/// Guess the MIME type of an image URL from its extension.
///
/// Uploads are normalized to JPEG by the mobile clients, so that is the
/// default when the extension is missing or unrecognized.
fn image_mime(url: &str) -> &'static str {
    let path = url.split('?').next().unwrap_or(url);
    let lower = path.to_ascii_lowercase();

    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else if lower.ends_with(".heic") {
        "image/heic"
    } else {
        "image/jpeg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyzer_name() {
        let config = GeminiConfig::builder().api_key("test-key").build();
        let analyzer = GeminiAnalyzer::new(config).unwrap();
        assert_eq!(analyzer.name(), "GeminiAnalyzer");
    }

    #[test]
    fn test_prompt_fingerprints_differ() {
        let config = GeminiConfig::builder().api_key("test-key").build();
        let analyzer = GeminiAnalyzer::new(config).unwrap();
        assert_ne!(analyzer.detect_prompt_hash(), analyzer.solve_prompt_hash());
    }

    #[test]
    fn test_image_mime_guessing() {
        assert_eq!(image_mime("https://img.example/q.png"), "image/png");
        assert_eq!(image_mime("https://img.example/q.PNG"), "image/png");
        assert_eq!(image_mime("https://img.example/q.webp?token=abc"), "image/webp");
        assert_eq!(image_mime("https://img.example/q.jpg"), "image/jpeg");
        assert_eq!(image_mime("https://img.example/upload/q"), "image/jpeg");
    }
}
