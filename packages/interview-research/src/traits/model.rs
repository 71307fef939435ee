//! Language model boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderResult;

/// Message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Text completion service.
///
/// The response is a single text blob and may wrap JSON in a fenced code
/// block. Nothing about its structure is guaranteed; all schema handling
/// happens in [`crate::extraction`].
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete the conversation, returning the whole response text.
    async fn complete(&self, messages: &[ChatMessage]) -> ProviderResult<String>;

    fn name(&self) -> &str;
}
