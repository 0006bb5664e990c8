//! User prompts for batch CLI flows
//!
//! Selection and confirmation go through the [`Prompter`] trait so the
//! reconciliation service can be driven by a scripted double in tests.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};

pub trait Prompter: Send + Sync {
    /// Present `options` and return the chosen subset (possibly empty).
    fn select_many(&self, title: &str, options: &[String]) -> Result<Vec<String>>;

    /// Yes/no gate for destructive operations. Defaults to no.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Terminal prompter reading from stdin.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn select_many(&self, title: &str, options: &[String]) -> Result<Vec<String>> {
        println!("{title}");
        for (i, option) in options.iter().enumerate() {
            println!("  {} {}", format!("[{}]", i + 1).dimmed(), option);
        }
        print!("{} ", "Select (e.g. 1,3 or 'all', empty to skip):".yellow());
        io::stdout().flush().ok();

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read selection")?;
        let line = line.trim();

        if line.is_empty() {
            return Ok(Vec::new());
        }
        if line.eq_ignore_ascii_case("all") {
            return Ok(options.to_vec());
        }

        let mut chosen = Vec::new();
        for token in line.split([',', ' ']).filter(|t| !t.is_empty()) {
            if let Ok(n) = token.parse::<usize>() {
                if n >= 1 && n <= options.len() {
                    chosen.push(options[n - 1].clone());
                }
            }
        }
        Ok(chosen)
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        print!("{} {} ", prompt.yellow(), "[y/N]".dimmed());
        io::stdout().flush().ok();

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read confirmation")?;
        let answer = line.trim().to_ascii_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}
