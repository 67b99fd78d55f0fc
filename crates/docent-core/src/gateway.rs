//! Model gateway interface.
//!
//! A gateway call is a pure function of the system instruction, the full prior
//! history and the new input. Gateways keep no conversation state between
//! calls; the caller replays history every turn.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::session::ConversationMessage;

/// Decoding parameters sent with every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            top_p: 1.0,
            top_k: 32,
            max_output_tokens: 8192,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    HarmCategoryHarassment,
    HarmCategoryHateSpeech,
    HarmCategorySexuallyExplicit,
    HarmCategoryDangerousContent,
}

impl HarmCategory {
    pub const ALL: [HarmCategory; 4] = [
        HarmCategory::HarmCategoryHarassment,
        HarmCategory::HarmCategoryHateSpeech,
        HarmCategory::HarmCategorySexuallyExplicit,
        HarmCategory::HarmCategoryDangerousContent,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockLowAndAbove,
    BlockMediumAndAbove,
    BlockOnlyHigh,
    BlockNone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// Medium blocking across all four harm categories.
pub fn default_safety_settings() -> Vec<SafetySetting> {
    HarmCategory::ALL
        .into_iter()
        .map(|category| SafetySetting {
            category,
            threshold: HarmBlockThreshold::BlockMediumAndAbove,
        })
        .collect()
}

/// One turn's worth of input for the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub system_instruction: String,
    /// Prior turns, oldest first. Does not include `user_input`.
    pub history: Vec<ConversationMessage>,
    pub user_input: String,
}

/// Invokes the remote model for a single turn and returns its full text reply.
#[async_trait::async_trait]
pub trait ChatGateway: Send + Sync {
    async fn generate(&self, request: ChatRequest) -> Result<String>;
}

/// Builds a gateway bound to the credential resolved for the current turn.
pub trait ChatGatewayFactory: Send + Sync {
    fn connect(&self, api_key: &str) -> Result<Box<dyn ChatGateway>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_wire_names() {
        let value = serde_json::to_value(GenerationConfig::default()).unwrap();
        assert_eq!(value["temperature"], 0.0);
        assert_eq!(value["topP"], 1.0);
        assert_eq!(value["topK"], 32);
        assert_eq!(value["maxOutputTokens"], 8192);
    }

    #[test]
    fn test_default_safety_settings_cover_all_categories() {
        let settings = default_safety_settings();
        assert_eq!(settings.len(), 4);
        assert!(
            settings
                .iter()
                .all(|s| s.threshold == HarmBlockThreshold::BlockMediumAndAbove)
        );

        let value = serde_json::to_value(&settings[0]).unwrap();
        assert_eq!(value["category"], "HARM_CATEGORY_HARASSMENT");
        assert_eq!(value["threshold"], "BLOCK_MEDIUM_AND_ABOVE");
    }
}
