//! Optional fallback text generation

pub mod client;

pub use client::{ApiFormat, LlmClient};
