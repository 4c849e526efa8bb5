//! Configuration for GeminiAnalyzer.

use sorucoz_core::AnalyzerError;
use std::env;

/// Default detection prompt.
///
/// Asks for a strict JSON object; the salvage parsers in `sorucoz-core`
/// handle the fences and stray prose the model adds anyway.
pub const DEFAULT_DETECT_PROMPT: &str = r#"Bu fotoğraftaki sorunun hangi okul dersine ait olduğunu belirle.
Sadece JSON döndür: {"ders": "<ders adı>"}
Ders adı şunlardan biri olmalı: Matematik, Fizik, Kimya, Biyoloji, Türkçe, Tarih, Coğrafya, Felsefe, Din Kültürü, İngilizce, Fen Bilgisi.
Emin değilsen {"ders": "Bilinmeyen"} döndür. Açıklama yazma."#;

/// Default solving prompt.
pub const DEFAULT_SOLVE_PROMPT: &str = r#"Bu fotoğraftaki soruyu adım adım çöz.
Sadece JSON döndür: {"cozum": "<adım adım çözüm>", "cevap": "<kısa cevap>"}
Soru çoktan seçmeli ise cevap alanına doğru şıkkı yaz. Açıklama yazma."#;

/// Configuration for GeminiAnalyzer.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Gemini API URL.
    pub api_url: String,

    /// API key for authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// Subject-detection prompt override.
    pub detect_prompt: Option<String>,

    /// Solving prompt override.
    pub solve_prompt: Option<String>,

    /// Maximum tokens for the completion.
    pub max_output_tokens: Option<u32>,

    /// Temperature for generation. Detection wants determinism.
    pub temperature: Option<f32>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: String::new(),
            model: "gemini-2.0-flash".to_string(),
            detect_prompt: None,
            solve_prompt: None,
            max_output_tokens: Some(1024),
            temperature: Some(0.0),
        }
    }
}

impl GeminiConfig {
    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `GEMINI_API_KEY` - API key for authentication
    ///
    /// Optional environment variables:
    /// - `GEMINI_API_URL` - API URL (default: https://generativelanguage.googleapis.com)
    /// - `GEMINI_MODEL` - Model name (default: gemini-2.0-flash)
    /// - `GEMINI_DETECT_PROMPT` - Detection prompt override
    /// - `GEMINI_SOLVE_PROMPT` - Solving prompt override
    /// - `GEMINI_MAX_OUTPUT_TOKENS` - Max tokens (default: 1024)
    /// - `GEMINI_TEMPERATURE` - Temperature (default: 0.0)
    pub fn from_env() -> Result<Self, AnalyzerError> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| AnalyzerError::Configuration("GEMINI_API_KEY not set".to_string()))?;

        let api_url = env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string());

        let detect_prompt = env::var("GEMINI_DETECT_PROMPT").ok();
        let solve_prompt = env::var("GEMINI_SOLVE_PROMPT").ok();

        let max_output_tokens = env::var("GEMINI_MAX_OUTPUT_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(1024));

        let temperature = env::var("GEMINI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(Some(0.0));

        Ok(Self {
            api_url,
            api_key,
            model,
            detect_prompt,
            solve_prompt,
            max_output_tokens,
            temperature,
        })
    }

    /// The detection prompt in effect: the override or the embedded default.
    pub fn detect_prompt(&self) -> &str {
        self.detect_prompt.as_deref().unwrap_or(DEFAULT_DETECT_PROMPT)
    }

    /// The solving prompt in effect: the override or the embedded default.
    pub fn solve_prompt(&self) -> &str {
        self.solve_prompt.as_deref().unwrap_or(DEFAULT_SOLVE_PROMPT)
    }

    /// Create a new config builder.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }
}

/// Builder for GeminiConfig.
#[derive(Debug, Default)]
pub struct GeminiConfigBuilder {
    config: GeminiConfig,
}

impl GeminiConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the detection prompt.
    pub fn detect_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.detect_prompt = Some(prompt.into());
        self
    }

    /// Set the solving prompt.
    pub fn solve_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.solve_prompt = Some(prompt.into());
        self
    }

    /// Set the max output tokens.
    pub fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.config.max_output_tokens = Some(tokens);
        self
    }

    /// Set the temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GeminiConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeminiConfig::default();

        assert_eq!(config.api_url, "https://generativelanguage.googleapis.com");
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, "gemini-2.0-flash");
        assert!(config.detect_prompt.is_none());
        assert_eq!(config.detect_prompt(), DEFAULT_DETECT_PROMPT);
        assert_eq!(config.solve_prompt(), DEFAULT_SOLVE_PROMPT);
        assert_eq!(config.max_output_tokens, Some(1024));
        assert_eq!(config.temperature, Some(0.0));
    }

    #[test]
    fn test_builder_overrides() {
        let config = GeminiConfig::builder()
            .api_key("my-key")
            .api_url("https://custom.api.example")
            .model("gemini-2.5-pro")
            .detect_prompt("Hangi ders?")
            .solve_prompt("Çöz.")
            .max_output_tokens(512)
            .temperature(0.4)
            .build();

        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.api_url, "https://custom.api.example");
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.detect_prompt(), "Hangi ders?");
        assert_eq!(config.solve_prompt(), "Çöz.");
        assert_eq!(config.max_output_tokens, Some(512));
        assert_eq!(config.temperature, Some(0.4));
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_gemini_vars() {
            std::env::remove_var("GEMINI_API_KEY");
            std::env::remove_var("GEMINI_API_URL");
            std::env::remove_var("GEMINI_MODEL");
            std::env::remove_var("GEMINI_DETECT_PROMPT");
            std::env::remove_var("GEMINI_SOLVE_PROMPT");
            std::env::remove_var("GEMINI_MAX_OUTPUT_TOKENS");
            std::env::remove_var("GEMINI_TEMPERATURE");
        }

        // Scenario 1: Missing API key should error
        clear_all_gemini_vars();
        let result = GeminiConfig::from_env();
        let err = result.unwrap_err();
        match err {
            AnalyzerError::Configuration(msg) => assert!(msg.contains("GEMINI_API_KEY")),
            _ => panic!("Expected Configuration error"),
        }

        // Scenario 2: Only API key set, defaults used
        clear_all_gemini_vars();
        std::env::set_var("GEMINI_API_KEY", "test-env-key");

        let config = GeminiConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-env-key");
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.detect_prompt(), DEFAULT_DETECT_PROMPT);
        assert_eq!(config.max_output_tokens, Some(1024));

        // Scenario 3: All vars set
        clear_all_gemini_vars();
        std::env::set_var("GEMINI_API_KEY", "full-test-key");
        std::env::set_var("GEMINI_API_URL", "https://test.api.example");
        std::env::set_var("GEMINI_MODEL", "gemini-2.5-pro");
        std::env::set_var("GEMINI_DETECT_PROMPT", "Ders?");
        std::env::set_var("GEMINI_SOLVE_PROMPT", "Çöz!");
        std::env::set_var("GEMINI_MAX_OUTPUT_TOKENS", "2048");
        std::env::set_var("GEMINI_TEMPERATURE", "0.7");

        let config = GeminiConfig::from_env().unwrap();
        assert_eq!(config.api_key, "full-test-key");
        assert_eq!(config.api_url, "https://test.api.example");
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.detect_prompt(), "Ders?");
        assert_eq!(config.solve_prompt(), "Çöz!");
        assert_eq!(config.max_output_tokens, Some(2048));
        assert_eq!(config.temperature, Some(0.7));

        // Cleanup
        clear_all_gemini_vars();
    }
}
