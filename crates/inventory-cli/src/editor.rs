//! Interactive prompts
//!
//! Line-based prompts for editing products and confirming deletes.

use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Prompt for confirmation
///
/// Returns true if user confirms, false otherwise.
/// In non-interactive mode (no TTY), returns false.
pub fn confirm(prompt: &str) -> Result<bool> {
    // Check if stdin is a TTY
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let input = read_line(&mut io::stdin().lock())?;
    Ok(is_yes(&input))
}

/// Prompt with a default value, returns None if user keeps default
pub fn prompt_with_default(prompt: &str, default: &str) -> Result<Option<String>> {
    if default.is_empty() {
        print!("{}: ", prompt);
    } else {
        print!("{} [{}]: ", prompt, default);
    }
    io::stdout().flush()?;

    let input = read_line(&mut io::stdin().lock())?;
    Ok(non_empty(&input))
}

fn read_line(reader: &mut impl BufRead) -> Result<String> {
    let mut input = String::new();
    reader.read_line(&mut input)?;
    Ok(input)
}

fn is_yes(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}

fn non_empty(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        None
    } else {
        Some(input.to_string())
    }
}
