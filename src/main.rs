//! # Weather Intake Bot Main Entry Point
//!
//! Loads configuration, prepares the profile database, wires the dialogue
//! controller to its storage and weather collaborators, and runs the
//! Telegram bot next to the health server.

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::utils::command::BotCommands;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weather_intake_bot::bot::commands::Command;
use weather_intake_bot::bot::dialogue::{ConversationState, DialogueController};
use weather_intake_bot::bot::handlers::BotHandler;
use weather_intake_bot::config::Config;
use weather_intake_bot::database::connection::DatabaseManager;
use weather_intake_bot::services::health::HealthService;
use weather_intake_bot::services::profiles::SqliteProfileRepository;
use weather_intake_bot::services::weather::OpenWeatherClient;
use weather_intake_bot::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_intake_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing secrets end the process here, before polling starts
    let config = Config::from_env()?;

    info!("Starting Weather Intake Bot v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded - {:?}", config);

    // Initialize database
    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    db_manager.run_migrations().await?;
    let db_arc = Arc::new(db_manager);
    info!("Database initialized successfully");

    // Wire the dialogue to its collaborators
    let profiles = Arc::new(SqliteProfileRepository::new(db_arc.as_ref().clone()));
    let weather = Arc::new(OpenWeatherClient::from_config(&config)?);
    let controller = Arc::new(DialogueController::new(profiles, weather));

    // Initialize bot
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    match bot.set_my_commands(Command::bot_commands()).await {
        Ok(_) => info!("Bot commands registered"),
        Err(e) => tracing::warn!("Failed to register bot commands: {}", e),
    }
    let handler = BotHandler::new(controller);
    info!("Telegram bot initialized successfully");

    // Initialize health service
    let health_service = HealthService::new(db_arc.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    // Run both the bot and health server concurrently
    let bot_task = tokio::spawn(async move {
        let storage: Arc<InMemStorage<ConversationState>> = InMemStorage::new();
        Dispatcher::builder(bot, handler.schema())
            .dependencies(dptree::deps![storage])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    log_system_event("Application stopped", None);
    Ok(())
}
