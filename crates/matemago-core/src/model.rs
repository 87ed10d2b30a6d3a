use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::FormError;
use crate::validate::{MAX_AGE, MIN_AGE};

/// One learner query. Constructed only through validation, so `concept` is never empty and
/// `age` is always within [`MIN_AGE`]..=[`MAX_AGE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplanationRequest {
    concept: String,
    age: u8,
}

impl ExplanationRequest {
    pub fn new(concept: impl Into<String>, age: u8) -> Result<Self, FormError> {
        let concept = concept.into().trim().to_string();
        if concept.is_empty() {
            return Err(FormError::Missing {
                fields: crate::validate::MISSING_CONCEPT.to_string(),
            });
        }
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(FormError::AgeOutOfRange {
                age: i64::from(age),
                min: MIN_AGE,
                max: MAX_AGE,
            });
        }
        Ok(Self { concept, age })
    }

    pub fn concept(&self) -> &str {
        &self.concept
    }

    pub fn age(&self) -> u8 {
        self.age
    }
}

/// Success body of the explanation endpoint.
///
/// No schema validation is performed: absent or `null` fields decode as empty strings, other
/// non-string values as their JSON text, and the payload is handed to the renderer as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplanationResponse {
    #[serde(deserialize_with = "lenient_string")]
    pub explanation: String,
    #[serde(deserialize_with = "lenient_string")]
    pub visual_type: String,
    #[serde(deserialize_with = "lenient_string")]
    pub visual_code: String,
}

/// `null` reads as an empty string and any other non-string value as its JSON text, so `7`
/// reaches the renderer as the tag `"7"`.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

impl ExplanationResponse {
    pub fn kind(&self) -> VisualKind {
        VisualKind::from_tag(&self.visual_type)
    }
}

/// The visualization formats the renderer knows about. Anything else is kept verbatim so the
/// "not recognized" panel can name it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VisualKind {
    Svg,
    Mermaid,
    ChartJs,
    Other(String),
}

impl VisualKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "svg" => VisualKind::Svg,
            "mermaid" => VisualKind::Mermaid,
            "chartjs" => VisualKind::ChartJs,
            other => VisualKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            VisualKind::Svg => "svg",
            VisualKind::Mermaid => "mermaid",
            VisualKind::ChartJs => "chartjs",
            VisualKind::Other(tag) => tag,
        }
    }

    /// Upper-cased tag used by the result badge.
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, VisualKind::Other(_))
    }
}

impl From<&str> for VisualKind {
    fn from(value: &str) -> Self {
        Self::from_tag(value)
    }
}

impl fmt::Display for VisualKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
