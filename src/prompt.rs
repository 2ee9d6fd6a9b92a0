// Operator input - interactive prompts behind a swappable source

use std::io::{self, BufRead, Write};

use crate::error::{AppError, AppResult};

/// A source of operator answers.
///
/// Every interactive loop in the tool reads through this trait, so a closed
/// input ends the loop with [`AppError::InputClosed`] instead of spinning.
pub trait Prompter {
    /// Show `message` and return the next line, without its line terminator.
    fn ask(&mut self, message: &str) -> AppResult<String>;

    /// Like [`Prompter::ask`] but without echoing the answer.
    fn ask_secret(&mut self, message: &str) -> AppResult<String>;
}

/// Reads answers from the process's stdin, passwords from the tty
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&mut self, message: &str) -> AppResult<String> {
        print!("{}", message);
        io::stdout().flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(strip_line_ending(line))
    }

    fn ask_secret(&mut self, message: &str) -> AppResult<String> {
        rpassword::prompt_password(message).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => AppError::InputClosed,
            _ => AppError::Io(e),
        })
    }
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// Replays a fixed list of answers; runs dry with `InputClosed`
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<String>,
    asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Messages shown so far, in order
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn ask(&mut self, message: &str) -> AppResult<String> {
        self.asked.push(message.to_string());
        self.answers.pop_front().ok_or(AppError::InputClosed)
    }

    fn ask_secret(&mut self, message: &str) -> AppResult<String> {
        self.ask(message)
    }
}
