//! Utility functions for handling Telegram MarkdownV2 formatting
//!
//! MarkdownV2 requires escaping of special characters to prevent formatting issues.
//! Every reply the bot sends goes through this module.

/// Escapes markdown special characters for MarkdownV2 parsing mode
/// 
/// This function escapes all characters that have special meaning in Telegram's
/// MarkdownV2 format to ensure they are displayed as literal text.
/// 
/// # Arguments
/// * `text` - The text to escape
/// 
/// # Returns
/// A string with all markdown special characters escaped with backslashes
/// 
/// # Example
/// ```
/// use weather_intake_bot::utils::markdown::escape_markdown;
/// 
/// let text = "Paris (FR): 21.5°C";
/// let escaped = escape_markdown(text);
/// assert_eq!(escaped, "Paris \\(FR\\): 21\\.5°C");
/// ```
pub fn escape_markdown(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('_', "\\_")
        .replace('*', "\\*")
        .replace('[', "\\[")
        .replace(']', "\\]")
        .replace('(', "\\(")
        .replace(')', "\\)")
        .replace('~', "\\~")
        .replace('`', "\\`")
        .replace('>', "\\>")
        .replace('#', "\\#")
        .replace('+', "\\+")
        .replace('-', "\\-")
        .replace('=', "\\=")
        .replace('|', "\\|")
        .replace('{', "\\{")
        .replace('}', "\\}")
        .replace('.', "\\.")
        .replace('!', "\\!")
}
