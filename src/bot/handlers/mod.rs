pub mod message;

use std::sync::Arc;
use teloxide::{
    dispatching::{dialogue, dialogue::InMemStorage, UpdateHandler},
    prelude::*,
};
use crate::bot::commands::Command;
use crate::bot::dialogue::{ConversationState, DialogueController};

/// Per-chat dialogue handle; the storage maps each chat id to its own state.
pub type IntakeDialogue = Dialogue<ConversationState, InMemStorage<ConversationState>>;
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

pub struct BotHandler {
    pub controller: Arc<DialogueController>,
}

impl BotHandler {
    pub fn new(controller: Arc<DialogueController>) -> Self {
        Self { controller }
    }

    /// Dispatch tree. Expects `Arc<InMemStorage<ConversationState>>` among
    /// the dispatcher dependencies.
    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        let controller = self.controller.clone();
        let controller_text = self.controller.clone();

        dialogue::enter::<Update, InMemStorage<ConversationState>, ConversationState, _>()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, dialogue: IntakeDialogue, msg: Message, cmd: Command| {
                        let controller = controller.clone();
                        async move { message::command_handler(bot, dialogue, msg, cmd, controller).await }
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| msg.text().is_some())
                    .endpoint(move |bot: Bot, dialogue: IntakeDialogue, msg: Message| {
                        let controller = controller_text.clone();
                        async move { message::text_handler(bot, dialogue, msg, controller).await }
                    }),
            )
    }
}
