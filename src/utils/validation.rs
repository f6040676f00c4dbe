use anyhow::{anyhow, Result};

/// Accepts any text with at least one non-whitespace character.
pub fn validate_name(text: &str) -> Result<String> {
    let name = text.trim();

    if name.is_empty() {
        return Err(anyhow!("Name cannot be empty"));
    }

    Ok(name.to_string())
}

/// Accepts only strings made entirely of ASCII decimal digits.
///
/// Signs, whitespace and decimal points are rejected, so a successful parse
/// is always a non-negative integer.
pub fn validate_age(text: &str) -> Result<u32> {
    if text.is_empty() {
        return Err(anyhow!("Age cannot be empty"));
    }

    if !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(anyhow!("Age must contain digits only"));
    }

    text.parse::<u32>()
        .map_err(|_| anyhow!("Age is too large"))
}

pub fn validate_city(text: &str) -> Result<String> {
    let city = text.trim();

    if city.is_empty() {
        return Err(anyhow!("City cannot be empty"));
    }

    Ok(city.to_string())
}
