use serde::{Deserialize, Serialize};
use validator::Validate;

/// Free-text description of the baby's behaviour plus the parent's goals and styles
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InsightRequest {
    #[serde(default)]
    #[validate(length(min = 10, message = "Please provide a more detailed description."))]
    pub baby_activity_description: String,

    #[serde(default)]
    #[validate(length(min = 5, message = "Please describe your parenting goals."))]
    pub parenting_goals: String,

    #[serde(default)]
    #[validate(length(min = 5, message = "Please describe your parenting styles."))]
    pub parenting_styles: String,
}

impl InsightRequest {
    pub fn trimmed(self) -> Self {
        Self {
            baby_activity_description: self.baby_activity_description.trim().to_string(),
            parenting_goals: self.parenting_goals.trim().to_string(),
            parenting_styles: self.parenting_styles.trim().to_string(),
        }
    }
}

/// Model-generated parenting advice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightResult {
    pub insight: String,
    pub recommendation: String,
}
