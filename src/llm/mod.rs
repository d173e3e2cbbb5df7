//! Chat-completion backend clients and abstractions.
//!
//! The rest of the crate talks to the model through the [`ChatClient`]
//! trait; concrete providers are enabled via Cargo features:
//! - `ollama` (default) - Local Ollama server

/// Core chat client trait and provider selection.
pub mod client;

#[cfg(feature = "ollama")]
pub mod ollama;

pub use client::{ChatClient, Provider};
