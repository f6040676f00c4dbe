use teloxide::utils::command::BotCommands;
use weather_intake_bot::bot::commands::Command;

#[test]
fn test_start_and_help_parse() {
    assert_eq!(Command::parse("/start", "weather_bot").unwrap(), Command::Start);
    assert_eq!(Command::parse("/help", "weather_bot").unwrap(), Command::Help);
}

#[test]
fn test_commands_addressed_to_this_bot() {
    assert_eq!(Command::parse("/start@weather_bot", "weather_bot").unwrap(), Command::Start);
    assert!(Command::parse("/start@other_bot", "weather_bot").is_err());
}

#[test]
fn test_unknown_commands_and_plain_text_rejected() {
    assert!(Command::parse("/schedule", "weather_bot").is_err());
    assert!(Command::parse("Paris", "weather_bot").is_err());
    assert!(Command::parse("start", "weather_bot").is_err());
}

#[test]
fn test_both_commands_are_registered() {
    let names: Vec<String> = Command::bot_commands().into_iter().map(|c| c.command).collect();
    assert_eq!(names.len(), 2);
    assert!(names.iter().any(|n| n.ends_with("start")));
    assert!(names.iter().any(|n| n.ends_with("help")));

    let descriptions = Command::descriptions().to_string();
    assert!(descriptions.contains("Fill in a new profile"));
    assert!(descriptions.contains("Display this help message"));
}

#[test]
fn test_commands_with_trailing_text_still_parse() {
    // Deep links arrive as "/start <payload>"; they must still reset the dialogue
    assert_eq!(Command::parse("/start abc", "weather_bot").unwrap(), Command::Start);
    assert_eq!(Command::parse("/start@weather_bot ref_42", "weather_bot").unwrap(), Command::Start);
    assert_eq!(Command::parse("/help me", "weather_bot").unwrap(), Command::Help);
}
