//! Text-generation provider interface.
//!
//! [`TextGenerator`] is the seam between the idea service and a concrete
//! inference API. [`HuggingFaceGenerator`] talks to the Hugging Face
//! OpenAI-compatible chat-completion router; tests substitute a scripted
//! implementation.

pub mod config;
pub mod huggingface;
pub mod trait_def;

pub use config::ProviderConfig;
pub use huggingface::HuggingFaceGenerator;
pub use trait_def::{Completion, ProviderError, TextGenerator};
