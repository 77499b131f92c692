use serde::{Deserialize, Serialize};

/// Fallback reason when the classifier flags content without explaining why
pub const FALLBACK_TOXICITY_REASON: &str = "Content is inappropriate";

/// Verdict returned by the toxicity classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToxicityVerdict {
    pub is_toxic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toxicity_reason: Option<String>,
}

impl ToxicityVerdict {
    pub fn clean() -> Self {
        Self {
            is_toxic: false,
            toxicity_reason: None,
        }
    }

    pub fn toxic(reason: impl Into<String>) -> Self {
        Self {
            is_toxic: true,
            toxicity_reason: Some(reason.into()),
        }
    }

    /// The classifier's reason, or the fixed fallback when it is missing or blank
    pub fn reason_or_fallback(&self) -> &str {
        self.toxicity_reason
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(FALLBACK_TOXICITY_REASON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_or_fallback() {
        assert_eq!(
            ToxicityVerdict::toxic("hate speech").reason_or_fallback(),
            "hate speech"
        );
        assert_eq!(
            ToxicityVerdict::toxic("  ").reason_or_fallback(),
            FALLBACK_TOXICITY_REASON
        );
        let verdict = ToxicityVerdict {
            is_toxic: true,
            toxicity_reason: None,
        };
        assert_eq!(verdict.reason_or_fallback(), FALLBACK_TOXICITY_REASON);
    }

    #[test]
    fn test_reason_is_optional_on_the_wire() {
        let verdict: ToxicityVerdict = serde_json::from_str(r#"{"isToxic": false}"#).unwrap();
        assert_eq!(verdict, ToxicityVerdict::clean());
    }
}
