use std::sync::Arc;
use teloxide::prelude::*;
use crate::bot::commands::Command;
use crate::bot::dialogue::{DialogueController, Event, Outcome};
use crate::bot::handlers::{HandlerResult, IntakeDialogue};
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_command_start, log_step_success};

pub async fn command_handler(
    bot: Bot,
    dialogue: IntakeDialogue,
    msg: Message,
    cmd: Command,
    controller: Arc<DialogueController>,
) -> HandlerResult {
    let (user, user_id) = sender(&msg);
    let (name, event) = match cmd {
        Command::Help => ("/help", Event::Help),
        Command::Start => ("/start", Event::Start),
    };
    log_command_start(name, &user, user_id, msg.chat.id.0, None);

    drive(bot, dialogue, msg.chat.id, event, controller).await?;
    Ok(())
}

pub async fn text_handler(
    bot: Bot,
    dialogue: IntakeDialogue,
    msg: Message,
    controller: Arc<DialogueController>,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let (user, user_id) = sender(&msg);
    let previous = dialogue.get_or_default().await?.step;

    let outcome = drive(bot, dialogue, msg.chat.id, Event::Text(text.to_string()), controller).await?;

    if outcome.state.step != previous {
        log_step_success(
            &format!("{previous:?}"),
            &user,
            user_id,
            msg.chat.id.0,
            Some(&format!("next={:?}", outcome.state.step)),
        );
    }
    Ok(())
}

/// Runs one event through the controller, stores the chat's new state and
/// sends the replies in order.
async fn drive(
    bot: Bot,
    dialogue: IntakeDialogue,
    chat_id: ChatId,
    event: Event,
    controller: Arc<DialogueController>,
) -> Result<Outcome, Box<dyn std::error::Error + Send + Sync>> {
    let state = dialogue.get_or_default().await?;
    let outcome = controller.handle(state, event).await;

    if outcome.state.is_idle() {
        dialogue.exit().await?;
    } else {
        dialogue.update(outcome.state.clone()).await?;
    }

    let feedback = CommandFeedback::new(bot, chat_id);
    for reply in &outcome.replies {
        feedback.send(reply.kind, &reply.text).await?;
    }

    Ok(outcome)
}

fn sender(msg: &Message) -> (String, i64) {
    match msg.from() {
        Some(user) => (
            user.username.clone().unwrap_or_else(|| "unknown".to_string()),
            user.id.0 as i64,
        ),
        None => ("unknown".to_string(), 0),
    }
}
