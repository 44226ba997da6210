use crate::output::Output;
use color_eyre::Result;
use dialoguer::{Confirm, Password};
use std::io::IsTerminal;

/// Masked input for secrets such as the API key
pub fn prompt_secret(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Ask before a destructive action.
///
/// `--yes` skips the prompt. Without a terminal there is nobody to ask, so the
/// action is refused rather than assumed.
pub fn confirm_destructive(prompt: &str, yes: bool, output: &Output) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        output.warn("Not running interactively; pass --yes to confirm");
        return Ok(false);
    }

    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| {
            output.error(format!("Failed to read confirmation: {}", e));
            color_eyre::eyre::eyre!("Failed to read confirmation: {}", e)
        })
}
