//! Idea generation pipeline.
//!
//! ```text
//! IdeaClient --POST /api/generate-idea--> IdeaService
//!                                            |  build_prompt(request)
//!                                            v
//!                                      dyn TextGenerator --> provider
//!                                            |
//!                                            v  parse_reply(text)
//!                                      IdeaResponse { title, description, idea }
//! ```
//!
//! The [`client`] side wraps the HTTP call with a timeout and turns every
//! failure into one human-readable message. The [`idea`] side is the
//! stateless translation step run by the HTTP endpoint.

pub mod catalog;
pub mod client;
pub mod idea;
pub mod provider;

pub use client::{ClientError, IdeaClient};
pub use idea::{GenerateError, IdeaRequest, IdeaResponse, IdeaService};
pub use provider::{HuggingFaceGenerator, ProviderConfig, ProviderError, TextGenerator};
