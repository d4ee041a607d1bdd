//! The `TextGenerator` trait -- the adapter interface for inference APIs.

use async_trait::async_trait;
use thiserror::Error;

/// One single-message, non-streaming completion call.
#[derive(Debug, Clone, Copy)]
pub struct Completion<'a> {
    /// Provider credential.
    pub api_key: &'a str,
    /// Model identifier.
    pub model: &'a str,
    /// The sole user message.
    pub prompt: &'a str,
}

/// Failures of a provider call.
///
/// The `Display` form is the provider's own message when one was returned,
/// so it can be surfaced to callers as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The request never got a response (DNS, connection, TLS, ...).
    #[error("{0}")]
    Transport(String),

    /// Non-2xx status. `message` is the provider's message when available.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A 2xx response carrying an error payload.
    #[error("{0}")]
    Api(String),

    /// A 2xx response whose body is not a completion.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Adapter interface for text-generation providers.
///
/// Implementations send the prompt as the only user message and await the
/// full completion. No retries: failures go straight back to the caller.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Human-readable provider name (e.g. "Hugging Face").
    fn name(&self) -> &str;

    /// Run one completion and return the raw reply text.
    async fn complete(&self, request: Completion<'_>) -> Result<String, ProviderError>;
}

// Compile-time assertion: TextGenerator must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn TextGenerator) {}
};

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(&self, request: Completion<'_>) -> Result<String, ProviderError> {
            Ok(format!("{}:{}", request.model, request.prompt))
        }
    }

    #[tokio::test]
    async fn generator_is_object_safe() {
        let generator: Box<dyn TextGenerator> = Box::new(EchoGenerator);
        assert_eq!(generator.name(), "echo");
        let reply = generator
            .complete(Completion {
                api_key: "k",
                model: "m",
                prompt: "p",
            })
            .await
            .unwrap();
        assert_eq!(reply, "m:p");
    }

    #[test]
    fn status_error_displays_provider_message() {
        let err = ProviderError::Status {
            status: 401,
            message: "Invalid credentials in Authorization header".to_owned(),
        };
        assert_eq!(err.to_string(), "Invalid credentials in Authorization header");
    }
}
