use std::env;
use std::fmt;

/// Text-generation provider configuration.
///
/// Built once and injected into [`crate::IdeaService`]; nothing in the
/// pipeline reads the process environment on its own.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Provider credential. `None` makes every generation fail as misconfigured.
    pub api_key: Option<String>,
    /// Model identifier sent with each completion.
    pub model: String,
    /// Base URL of the OpenAI-compatible API (without `/chat/completions`).
    pub base_url: String,
}

impl ProviderConfig {
    /// Model used when `HF_MODEL` is not set.
    pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct";

    /// Hugging Face inference router.
    pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/v1";

    /// Build a config from the environment.
    ///
    /// Reads `HUGGINGFACE_API_KEY`, `HF_MODEL` and `HF_BASE_URL`. Empty
    /// values count as unset.
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty_var("HUGGINGFACE_API_KEY"),
            model: non_empty_var("HF_MODEL").unwrap_or_else(|| Self::DEFAULT_MODEL.to_owned()),
            base_url: non_empty_var("HF_BASE_URL")
                .unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_owned()),
        }
    }

    /// Build a config with an explicit credential and default model/URL.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            model: Self::DEFAULT_MODEL.to_owned(),
            base_url: Self::DEFAULT_BASE_URL.to_owned(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The credential, if present and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

// The credential never appears in logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}
