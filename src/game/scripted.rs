//! Scripted decision provider for deterministic tests
//!
//! Follows a predetermined script of answers and records everything it
//! is shown, so tests can drive whole games and assert on diagnostics.

use crate::error::DominionError;
use crate::game::decision::DecisionProvider;
use crate::Result;
use std::collections::VecDeque;

/// A provider that replays a fixed sequence of answers.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    answers: VecDeque<String>,
    shown: Vec<String>,
}

impl ScriptedProvider {
    pub fn new(answers: &[&str]) -> Self {
        ScriptedProvider {
            answers: answers.iter().map(|line| line.to_string()).collect(),
            shown: Vec::new(),
        }
    }

    /// Everything the engine has shown so far.
    pub fn shown(&self) -> &[String] {
        &self.shown
    }

    /// True if some shown line contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.shown.iter().any(|line| line.contains(needle))
    }

    /// Unconsumed answers; zero at the end of a well-scripted test.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_answer(&mut self, prompt: &str) -> Result<String> {
        self.answers
            .pop_front()
            .ok_or_else(|| DominionError::ScriptExhausted(prompt.to_string()))
    }
}

impl DecisionProvider for ScriptedProvider {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        loop {
            match self.next_answer(prompt)?.trim().to_uppercase().as_str() {
                "Y" | "YES" => return Ok(true),
                "N" | "NO" => return Ok(false),
                _ => self.show("Please respond Y or N"),
            }
        }
    }

    fn line(&mut self, prompt: &str) -> Result<String> {
        self.next_answer(prompt)
    }

    fn show(&mut self, text: &str) {
        self.shown.push(text.to_string());
    }
}
