//! Structured idea requests, prompt construction, reply parsing, and the
//! stateless service tying them to a [`crate::provider::TextGenerator`].

pub mod options;
pub mod parser;
pub mod prompt;
pub mod service;
pub mod types;

pub use parser::{FALLBACK_DESCRIPTION, FALLBACK_TITLE, parse_reply};
pub use prompt::build_prompt;
pub use service::{GenerateError, IdeaService};
pub use types::{IdeaRequest, IdeaResponse};
