use anyhow::{Context, Result};
use inquire::{validator::Validation, Password, PasswordDisplayMode};
use std::error::Error;

/// Prompt for an access token without echoing it
pub fn prompt_access_token() -> Result<String> {
    let token_validator = |input: &str| -> Result<Validation, Box<dyn Error + Send + Sync>> {
        if input.trim().is_empty() {
            Ok(Validation::Invalid("Access token cannot be empty".into()))
        } else if input.trim().contains(char::is_whitespace) {
            Ok(Validation::Invalid("Access token cannot contain spaces".into()))
        } else {
            Ok(Validation::Valid)
        }
    };

    let token = Password::new("Webex access token:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_validator(token_validator)
        .prompt()
        .context("Failed to read access token")?;

    Ok(token.trim().to_string())
}
