//! # Profile intake dialogue
//!
//! The conversation is a linear state machine:
//!
//! ```text
//! Idle -> AwaitingName -> AwaitingAge -> AwaitingCity -> Idle
//! ```
//!
//! [`transition`] is the only place where steps change and where replies are
//! decided. It performs no I/O; persisting the profile and looking up the
//! weather are requested through [`Effect::Complete`] and carried out by
//! [`DialogueController`] against the [`ProfileRepository`] and
//! [`WeatherGateway`] seams.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::database::models::NewProfile;
use crate::services::profiles::ProfileRepository;
use crate::services::weather::WeatherGateway;
use crate::utils::feedback::FeedbackType;
use crate::utils::logging::log_validation_error;
use crate::utils::validation::{validate_age, validate_city, validate_name};

pub const GREETING: &str = "Hi! I will save a short profile for you and tell you the weather in your city.\n\nWhat is your name?";
pub const ASK_NAME_AGAIN: &str = "Please send your name as text.";
pub const ASK_AGE: &str = "How old are you?";
pub const INVALID_AGE: &str = "Invalid age, please re-enter it using digits only.";
pub const ASK_CITY: &str = "Which city do you live in?";
pub const ASK_CITY_AGAIN: &str = "Please send the name of your city.";
pub const IDLE_HINT: &str = "Send /start to fill in your profile, or /help to see what I can do.";
pub const UNKNOWN_COMMAND: &str = "Unknown command. Use /start to begin again or /help to see what I can do.";
pub const HELP: &str = "I collect your name, age and city, save them, and report the current weather in your city.\n\n/start - fill in a new profile\n/help - show this message";
pub const SAVE_FAILED: &str = "Could not save your data, please try again later.";
pub const WEATHER_FAILED: &str = "Could not retrieve the weather for your city.";
pub const SAVED: &str = "Your data has been saved.";
pub const INCOMPLETE: &str = "Something went wrong with your answers. Send /start to begin again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Step {
    #[default]
    Idle,
    AwaitingName,
    AwaitingAge,
    AwaitingCity,
}

/// Answers gathered so far in the current conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub city: Option<String>,
}

impl Collected {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.city.is_none()
    }

    /// A profile exists only once all three answers are present.
    pub fn to_profile(&self) -> Option<NewProfile> {
        Some(NewProfile {
            name: self.name.clone()?,
            age: self.age?,
            city: self.city.clone()?,
        })
    }
}

/// Per-chat dialogue state, kept by the bot's dialogue storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    pub step: Step,
    pub collected: Collected,
}

impl ConversationState {
    pub fn awaiting(step: Step, collected: Collected) -> Self {
        Self { step, collected }
    }

    pub fn is_idle(&self) -> bool {
        self.step == Step::Idle
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start,
    Help,
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub kind: FeedbackType,
    pub text: String,
}

impl Reply {
    pub fn new(kind: FeedbackType, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Reply(Reply),
    /// Run the completion procedure for this profile.
    Complete(NewProfile),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: ConversationState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn stay(state: ConversationState, kind: FeedbackType, text: &str) -> Self {
        Self {
            state,
            effects: vec![Effect::Reply(Reply::new(kind, text))],
        }
    }

    fn to(step: Step, collected: Collected, kind: FeedbackType, text: &str) -> Self {
        Self::stay(ConversationState::awaiting(step, collected), kind, text)
    }
}

pub fn transition(state: ConversationState, event: Event) -> Transition {
    match event {
        Event::Start => Transition::to(
            Step::AwaitingName,
            Collected::default(),
            FeedbackType::Prompt,
            GREETING,
        ),
        Event::Help => Transition::stay(state, FeedbackType::Info, HELP),
        Event::Text(text) => on_text(state, &text),
    }
}

/// Slash-prefixed text that did not parse as one of our commands, such as a
/// typo or a command addressed to another bot in a group.
pub fn is_command_like(text: &str) -> bool {
    text.trim_start().starts_with('/')
}

fn on_text(state: ConversationState, text: &str) -> Transition {
    if is_command_like(text) {
        return Transition::stay(state, FeedbackType::Warning, UNKNOWN_COMMAND);
    }

    let ConversationState { step, mut collected } = state;

    match step {
        Step::Idle => Transition::stay(ConversationState::default(), FeedbackType::Info, IDLE_HINT),
        Step::AwaitingName => match validate_name(text) {
            Ok(name) => {
                collected.name = Some(name);
                Transition::to(Step::AwaitingAge, collected, FeedbackType::Prompt, ASK_AGE)
            }
            Err(e) => {
                log_validation_error("name", "name", text, &e.to_string());
                Transition::to(step, collected, FeedbackType::Warning, ASK_NAME_AGAIN)
            }
        },
        Step::AwaitingAge => match validate_age(text) {
            Ok(age) => {
                collected.age = Some(age);
                Transition::to(Step::AwaitingCity, collected, FeedbackType::Prompt, ASK_CITY)
            }
            Err(e) => {
                log_validation_error("age", "age", text, &e.to_string());
                Transition::to(step, collected, FeedbackType::Warning, INVALID_AGE)
            }
        },
        Step::AwaitingCity => match validate_city(text) {
            Ok(city) => {
                collected.city = Some(city);
                let effect = match collected.to_profile() {
                    Some(profile) => Effect::Complete(profile),
                    None => {
                        warn!("Profile incomplete when city arrived: {:?}", collected);
                        Effect::Reply(Reply::new(FeedbackType::Error, INCOMPLETE))
                    }
                };
                Transition {
                    state: ConversationState::default(),
                    effects: vec![effect],
                }
            }
            Err(e) => {
                log_validation_error("city", "city", text, &e.to_string());
                Transition::to(step, collected, FeedbackType::Warning, ASK_CITY_AGAIN)
            }
        },
    }
}

/// Result of handling one event: the state to store and the replies to send,
/// in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub state: ConversationState,
    pub replies: Vec<Reply>,
}

/// Drives [`transition`] and executes its effects.
pub struct DialogueController {
    profiles: Arc<dyn ProfileRepository>,
    weather: Arc<dyn WeatherGateway>,
}

impl DialogueController {
    pub fn new(profiles: Arc<dyn ProfileRepository>, weather: Arc<dyn WeatherGateway>) -> Self {
        Self { profiles, weather }
    }

    pub async fn handle(&self, state: ConversationState, event: Event) -> Outcome {
        let Transition { state, effects } = transition(state, event);

        let mut replies = Vec::new();
        for effect in effects {
            match effect {
                Effect::Reply(reply) => replies.push(reply),
                Effect::Complete(profile) => replies.extend(self.complete(&profile).await),
            }
        }

        Outcome { state, replies }
    }

    /// Saves the profile, then reports the weather and confirms the save.
    /// Nothing here fails the caller: every error becomes a reply.
    pub async fn complete(&self, profile: &NewProfile) -> Vec<Reply> {
        let id = match self.profiles.save(profile).await {
            Ok(id) => id,
            Err(e) => {
                error!("Failed to save profile for {}: {}", profile.city, e);
                return vec![Reply::new(FeedbackType::Error, SAVE_FAILED)];
            }
        };
        info!("Profile {} saved, looking up weather for {}", id, profile.city);

        let weather = match self.weather.fetch(&profile.city).await {
            Ok(report) => Reply::new(FeedbackType::Info, report.render()),
            Err(e) => {
                warn!("Weather lookup for {} failed: {}", profile.city, e);
                Reply::new(FeedbackType::Warning, WEATHER_FAILED)
            }
        };

        vec![weather, Reply::new(FeedbackType::Success, SAVED)]
    }
}
