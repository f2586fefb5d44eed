//! Infrastructure layer: outbound HTTP and the language-model suggestion client.

pub mod http;
pub mod llm;
