use serde::{Deserialize, Serialize};

/// Structured input of one idea generation.
///
/// `mood` and `budget` are required; every other field is optional and an
/// empty string counts as absent. Serialized with camelCase keys
/// (`timeOfDay`) to match the HTTP contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaRequest {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
}

impl IdeaRequest {
    pub fn new(mood: impl Into<String>, budget: impl Into<String>) -> Self {
        Self {
            mood: Some(mood.into()),
            budget: Some(budget.into()),
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_time_of_day(mut self, time_of_day: impl Into<String>) -> Self {
        self.time_of_day = Some(time_of_day.into());
        self
    }

    pub fn with_occasion(mut self, occasion: impl Into<String>) -> Self {
        self.occasion = Some(occasion.into());
        self
    }

    pub fn mood(&self) -> Option<&str> {
        present(&self.mood)
    }

    pub fn budget(&self) -> Option<&str> {
        present(&self.budget)
    }

    pub fn location(&self) -> Option<&str> {
        present(&self.location)
    }

    pub fn time_of_day(&self) -> Option<&str> {
        present(&self.time_of_day)
    }

    pub fn occasion(&self) -> Option<&str> {
        present(&self.occasion)
    }

    /// Return `true` if both required fields are present and non-empty.
    pub fn has_required(&self) -> bool {
        self.mood().is_some() && self.budget().is_some()
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Structured output of one idea generation.
///
/// `idea` carries the cleaned provider reply verbatim. Fields default to
/// empty when absent from a decoded body so callers can detect a broken
/// contract instead of failing to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaResponse {
    #[serde(default)]
    pub idea: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}
