//! Simple test for GeminiAnalyzer subject detection.
//!
//! Run with: cargo run -p gemini-analyzer --example detect_subject -- <image-url>
//!
//! Make sure to set environment variables in .env:
//!   GEMINI_API_KEY - Gemini API key for authentication

use gemini_analyzer::{GeminiAnalyzer, QuestionAnalyzer};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let image_url = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| "https://img.example/sample-question.jpg".to_string());

    println!("Initializing GeminiAnalyzer...");
    let analyzer = GeminiAnalyzer::from_env()?;

    println!("Analyzer initialized: {}", analyzer.name());
    println!("API URL: {}", analyzer.config().api_url);
    println!("Model: {}", analyzer.config().model);
    println!("Detect prompt fingerprint: {}", analyzer.detect_prompt_hash());
    println!();

    println!("Detecting subject for: {}", image_url);
    let subject = analyzer.detect_subject(&image_url).await?;

    println!("=== Subject ===");
    println!("{}", subject);
    println!("===============");

    Ok(())
}
