//! # Weather Intake Bot
//!
//! A Telegram bot that walks a user through a short intake dialogue and then
//! reports the weather where they live.
//!
//! ## Features
//! - `/start` asks for name, age and city, one message at a time
//! - Age answers are validated and re-asked until they are digits only
//! - Completed profiles are stored in SQLite
//! - Current weather for the city is fetched from OpenWeatherMap
//! - Health endpoints for process supervisors

/// Telegram commands, dialogue state machine and update handlers
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database models, connections, and migrations
pub mod database;
/// Profile repository, weather gateway and health endpoints
pub mod services;
/// Utility functions for validation, formatting and logging
pub mod utils;
