use teloxide::prelude::*;
use teloxide::types::ParseMode;
use crate::utils::markdown::escape_markdown;

/// Feedback types for different reply outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackType {
    Success,
    Warning,
    Error,
    Info,
    Prompt,
}

impl FeedbackType {
    pub fn emoji(&self) -> &'static str {
        match self {
            FeedbackType::Success => "✅",
            FeedbackType::Warning => "⚠️",
            FeedbackType::Error => "❌",
            FeedbackType::Info => "ℹ️",
            FeedbackType::Prompt => "✍️",
        }
    }
}

/// Renders a reply the way it appears in the chat, escaped for MarkdownV2.
pub fn format_feedback_message(feedback_type: FeedbackType, message: &str) -> String {
    format!("{} {}", feedback_type.emoji(), escape_markdown(message))
}

/// Centralized reply sender for one chat
pub struct CommandFeedback {
    bot: Bot,
    chat_id: ChatId,
}

impl CommandFeedback {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    /// Send immediate feedback message
    pub async fn send(&self, feedback_type: FeedbackType, message: &str) -> ResponseResult<Message> {
        self.bot
            .send_message(self.chat_id, format_feedback_message(feedback_type, message))
            .parse_mode(ParseMode::MarkdownV2)
            .await
    }
}
