use tracing::{error, info, warn, debug};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user: &str, user_id: i64, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!(
            "CMD_START: {} by {}({}) in chat {} - {}",
            command, user, user_id, chat_id, d
        ),
        None => info!(
            "CMD_START: {} by {}({}) in chat {}",
            command, user, user_id, chat_id
        ),
    }
}

/// Logs a dialogue step advancing with consistent format
pub fn log_step_success(step: &str, user: &str, user_id: i64, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!(
            "STEP_SUCCESS: {} by {}({}) in chat {} - {}",
            step, user, user_id, chat_id, d
        ),
        None => info!(
            "STEP_SUCCESS: {} by {}({}) in chat {}",
            step, user, user_id, chat_id
        ),
    }
}

/// Logs validation errors with consistent format
pub fn log_validation_error(step: &str, field: &str, value: &str, error: &str) {
    warn!(
        "VALIDATION_ERROR: {} - {} field '{}' invalid: {}",
        step, field, value, error
    );
}

/// Logs database operations with consistent format
pub fn log_database_operation(operation: &str, table: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("DB_OP: {} on {} - {}", operation, table, d),
        None => debug!("DB_OP: {} on {}", operation, table),
    }
}

/// Logs database errors with consistent format
pub fn log_database_error(operation: &str, table: &str, error: &str, details: Option<&str>) {
    match details {
        Some(d) => error!("DB_ERROR: {} on {} failed: {} - {}", operation, table, error, d),
        None => error!("DB_ERROR: {} on {} failed: {}", operation, table, error),
    }
}

/// Logs outbound HTTP failures with consistent format
pub fn log_http_error(operation: &str, error: &str, details: Option<&str>) {
    match details {
        Some(d) => warn!("HTTP_ERROR: {} failed: {} - {}", operation, error, d),
        None => warn!("HTTP_ERROR: {} failed: {}", operation, error),
    }
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
