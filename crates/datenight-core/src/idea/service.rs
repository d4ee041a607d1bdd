//! The idea service: validate, build prompt, call provider, parse reply.
//!
//! Stateless apart from its injected configuration and generator, so one
//! instance can be shared across concurrent requests.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info};

use super::parser::parse_reply;
use super::prompt::build_prompt;
use super::types::{IdeaRequest, IdeaResponse};
use crate::provider::{Completion, ProviderConfig, TextGenerator};

/// Why a generation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// Missing `mood` or `budget`. Correctable by the caller.
    #[error("Mood and budget are required")]
    InvalidRequest,

    /// No provider credential configured. Correctable by the operator only.
    #[error("Hugging Face API key not configured")]
    Misconfigured,

    /// The provider call failed. Carries the provider-prefixed message.
    #[error("Failed to generate date idea: {0}")]
    Upstream(String),
}

impl GenerateError {
    /// Operator hint for [`GenerateError::Misconfigured`].
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Misconfigured => Some(
                "Make sure HUGGINGFACE_API_KEY is set in the environment or the [provider] section of the config file",
            ),
            _ => None,
        }
    }
}

/// Turns [`IdeaRequest`]s into [`IdeaResponse`]s via a [`TextGenerator`].
#[derive(Clone)]
pub struct IdeaService {
    config: ProviderConfig,
    generator: Arc<dyn TextGenerator>,
}

impl IdeaService {
    pub fn new(config: ProviderConfig, generator: Arc<dyn TextGenerator>) -> Self {
        Self { config, generator }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Run one generation.
    ///
    /// Checks happen in order: required fields, then credential, then the
    /// provider call. A request failing an earlier check never reaches the
    /// provider.
    pub async fn generate(&self, request: &IdeaRequest) -> Result<IdeaResponse, GenerateError> {
        if !request.has_required() {
            return Err(GenerateError::InvalidRequest);
        }

        debug!(
            key_present = self.config.api_key().is_some(),
            key_len = self.config.api_key().map_or(0, str::len),
            "provider credential check"
        );
        let api_key = self.config.api_key().ok_or(GenerateError::Misconfigured)?;

        let prompt = build_prompt(request);
        info!(
            provider = self.generator.name(),
            model = %self.config.model,
            "generating date idea"
        );

        let reply = self
            .generator
            .complete(Completion {
                api_key,
                model: &self.config.model,
                prompt: &prompt,
            })
            .await
            .map_err(|e| {
                error!(provider = self.generator.name(), error = %e, "provider call failed");
                GenerateError::Upstream(format!("{} API error: {e}", self.generator.name()))
            })?;

        Ok(parse_reply(&reply))
    }
}

impl std::fmt::Debug for IdeaService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdeaService")
            .field("config", &self.config)
            .field("generator", &self.generator.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::provider::ProviderError;

    struct FixedGenerator {
        reply: Result<String, ProviderError>,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl FixedGenerator {
        fn new(reply: Result<String, ProviderError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        fn name(&self) -> &str {
            "Fixed"
        }

        async fn complete(&self, request: Completion<'_>) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(request.prompt.to_owned());
            self.reply.clone()
        }
    }

    fn configured() -> ProviderConfig {
        ProviderConfig::new(Some("hf_test".to_owned()))
    }

    #[tokio::test]
    async fn missing_required_fields_skip_provider() {
        let generator = FixedGenerator::new(Ok("Title: x\nDescription: y".to_owned()));
        let service = IdeaService::new(configured(), generator.clone());

        let cases = [
            IdeaRequest::default(),
            IdeaRequest::new("", "medium"),
            IdeaRequest::new("romantic", ""),
            IdeaRequest {
                mood: Some("romantic".to_owned()),
                ..IdeaRequest::default()
            },
        ];
        for request in &cases {
            let err = service.generate(request).await.unwrap_err();
            assert_eq!(err, GenerateError::InvalidRequest);
        }
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_credential_is_misconfigured() {
        let generator = FixedGenerator::new(Ok("Title: x\nDescription: y".to_owned()));
        let service = IdeaService::new(ProviderConfig::new(None), generator.clone());

        let err = service
            .generate(&IdeaRequest::new("romantic", "medium"))
            .await
            .unwrap_err();
        assert_eq!(err, GenerateError::Misconfigured);
        assert!(err.hint().is_some());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_request_wins_over_misconfiguration() {
        let generator = FixedGenerator::new(Ok(String::new()));
        let service = IdeaService::new(ProviderConfig::new(None), generator);
        let err = service.generate(&IdeaRequest::default()).await.unwrap_err();
        assert_eq!(err, GenerateError::InvalidRequest);
    }

    #[tokio::test]
    async fn success_parses_reply() {
        let reply = "Title: Sunset Picnic\nDescription: Watch the sunset with wine and cheese.";
        let generator = FixedGenerator::new(Ok(reply.to_owned()));
        let service = IdeaService::new(configured(), generator.clone());

        let idea = service
            .generate(&IdeaRequest::new("romantic", "medium"))
            .await
            .unwrap();
        assert_eq!(idea.title, "Sunset Picnic");
        assert_eq!(idea.description, "Watch the sunset with wine and cheese.");
        assert_eq!(idea.idea, reply);

        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        let prompt = generator.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Mood: romantic."));
        assert!(prompt.contains("Budget: medium."));
    }

    #[tokio::test]
    async fn provider_failure_is_upstream_with_message() {
        let generator = FixedGenerator::new(Err(ProviderError::Status {
            status: 503,
            message: "Model is loading".to_owned(),
        }));
        let service = IdeaService::new(configured(), generator);

        let err = service
            .generate(&IdeaRequest::new("fun", "low"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::Upstream("Fixed API error: Model is loading".to_owned())
        );
    }

    #[test]
    fn debug_does_not_leak_credential() {
        let service = IdeaService::new(configured(), FixedGenerator::new(Ok(String::new())));
        let rendered = format!("{service:?}");
        assert!(!rendered.contains("hf_test"), "{rendered}");
    }
}
