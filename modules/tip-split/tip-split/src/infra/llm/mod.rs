//! Gemini-backed tip suggestion client.

mod client;
mod dto;
mod prompt;

pub use client::GeminiSuggestionClient;
