//! Validated prompts
//!
//! Each reader loops until the answer is valid; invalid input is reported
//! and asked for again, never defaulted.

use crate::crypto::SecureString;
use crate::error::TallyResult;
use crate::models::{LedgerEntry, Money};

use super::prompt::Prompt;

const RETRY_TEXT: &str = "Invalid input! Try again: ";
const RETRY_AMOUNT: &str = "Enter the amount as 123 or 123.45: ";

/// Read a non-blank line, trimmed
pub fn read_text(prompt: &mut dyn Prompt, question: &str) -> TallyResult<String> {
    let mut question = question;
    loop {
        let answer = prompt.ask(question)?;
        let trimmed = answer.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
        question = RETRY_TEXT;
    }
}

/// Read a decimal amount, rounded to two places
pub fn read_amount(prompt: &mut dyn Prompt, question: &str) -> TallyResult<Money> {
    let mut question = question;
    loop {
        let answer = prompt.ask(question)?;
        match Money::parse(&answer) {
            Ok(amount) => return Ok(amount),
            Err(_) => {
                prompt.say(&format!("{}: invalid amount!", answer.trim()))?;
                question = RETRY_AMOUNT;
            }
        }
    }
}

/// Read a menu number in `1..=max`
pub fn read_menu_choice(prompt: &mut dyn Prompt, question: &str, max: u8) -> TallyResult<u8> {
    loop {
        let answer = prompt.ask(question)?;
        match answer.trim().parse::<u8>() {
            Ok(n) if (1..=max).contains(&n) => return Ok(n),
            _ => prompt.say(&format!(
                "Enter a menu number from 1 to {}. Try again.",
                max
            ))?,
        }
    }
}

/// Read a single-letter answer, lowercased and trimmed
pub fn read_letter(prompt: &mut dyn Prompt, question: &str) -> TallyResult<String> {
    Ok(prompt.ask(question)?.trim().to_lowercase())
}

/// Read a password for a new credential; empty passwords are refused
pub fn read_new_password(prompt: &mut dyn Prompt) -> TallyResult<SecureString> {
    loop {
        let password = prompt.ask_secret("Enter a password: ")?;
        if !password.is_empty() {
            return Ok(password);
        }
        prompt.say("Password cannot be empty.")?;
    }
}

/// Read an amount followed by a description
pub fn read_entry(
    prompt: &mut dyn Prompt,
    amount_question: &str,
    description_question: &str,
) -> TallyResult<LedgerEntry> {
    let amount = read_amount(prompt, amount_question)?;
    let description = read_text(prompt, description_question)?;
    LedgerEntry::new(description, amount)
}
