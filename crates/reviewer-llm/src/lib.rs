//! Reviewer LLM - Generation adapters
//!
//! This crate provides the Gemini adapter for the generation port and the
//! `PromptForwarder` that callers use to request a review.

pub mod forwarder;
pub mod gemini;

// Re-export main types
pub use forwarder::PromptForwarder;
pub use gemini::{extract_text, GeminiClient};
pub use reviewer_core::ports::Generator;
