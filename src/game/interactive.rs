//! Interactive stdin/stdout decision provider
//!
//! The real CLI boundary: one prompt per line, reprompting on anything
//! it cannot understand.

use crate::game::decision::DecisionProvider;
use crate::Result;
use std::io::{self, Write};

/// Prompts a human player on stdout and reads answers from stdin.
#[derive(Debug, Default)]
pub struct InteractiveProvider;

impl InteractiveProvider {
    pub fn new() -> Self {
        InteractiveProvider
    }
}

impl DecisionProvider for InteractiveProvider {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        loop {
            match self.line(prompt)?.trim().to_uppercase().as_str() {
                "Y" | "YES" => return Ok(true),
                "N" | "NO" => return Ok(false),
                _ => println!("Please respond Y or N"),
            }
        }
    }

    fn line(&mut self, prompt: &str) -> Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;
        let mut input = String::new();
        let bytes = io::stdin().read_line(&mut input)?;
        if bytes == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed").into());
        }
        Ok(input.trim_end_matches(['\r', '\n']).to_string())
    }

    fn show(&mut self, text: &str) {
        println!("{text}");
    }
}
