// SPDX-License-Identifier: MIT
// Copyright (c) 2020 Austin Goudge
// Copyright (c) 2026 StarTuz

use crate::dispatch::{CommandContext, Interpreter};
use crate::entry::EntrySnapshot;
use crate::response::CommandResult;

/// What the response area shows after Enter.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Enter on an empty buffer blanks the response area.
    Cleared,
    Result(CommandResult),
}

/// The message compose area input line.
///
/// Text is only interpreted on [`submit`](Self::submit); until then nothing
/// has been dispatched, so [`abort`](Self::abort) has no effect beyond
/// discarding the text.
#[derive(Debug, Default, Clone)]
pub struct ComposeBuffer {
    text: String,
}

impl ComposeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn abort(&mut self) {
        log::debug!("[Compose] aborted '{}'", self.text);
        self.text.clear();
    }

    /// Interprets the buffered text and clears the buffer regardless of outcome.
    pub fn submit(
        &mut self,
        interpreter: &Interpreter,
        snapshot: EntrySnapshot<'_>,
        context: &CommandContext,
    ) -> Submission {
        let text = std::mem::take(&mut self.text);
        if text.is_empty() {
            return Submission::Cleared;
        }
        Submission::Result(interpreter.interpret(&text, snapshot, context))
    }
}
