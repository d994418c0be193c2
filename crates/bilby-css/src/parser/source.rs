//! Source loading and `@import` splicing.
//!
//! Imports are spliced into the token stream by pushing a fresh lexer
//! frame onto a [`SourceStack`]; when a frame's tokens are exhausted the
//! stack pops it and falls through to the parent transparently. Each
//! frame carries the logical chain of imports that produced it, which is
//! what makes cycle detection possible: a frame can pop before the files
//! it imports are even pushed (a trailing `@import` is the last thing it
//! lexes), so the chain cannot be recovered from the live frames alone.

use std::collections::HashMap;

use crate::tokenizer::{Lexeme, Lexer};

/// Resolves a logical stylesheet path to its source text.
///
/// The engine performs no I/O of its own; callers supply whatever backs
/// their paths (an asset bundle, a directory, a test fixture map). Loads
/// happen synchronously, inline during parsing.
pub trait SourceLoader {
    /// Load the text behind `path`, or a human-readable reason it
    /// cannot be loaded.
    fn load(&self, path: &str) -> Result<String, String>;
}

/// A loader that resolves nothing. Every `@import` fails with a recorded
/// error; everything else parses normally.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLoader;

impl SourceLoader for NoLoader {
    fn load(&self, path: &str) -> Result<String, String> {
        let _ = path;
        Err("no source loader configured".to_owned())
    }
}

/// An in-memory loader over a path → text map.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    sources: HashMap<String, String>,
}

impl MemoryLoader {
    /// An empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: register a source under a logical path.
    #[must_use]
    pub fn with_source(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        let _ = self.sources.insert(path.into(), text.into());
        self
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &str) -> Result<String, String> {
        self.sources
            .get(path)
            .cloned()
            .ok_or_else(|| "not found".to_owned())
    }
}

/// One active source: a lexer over its text, the file it came from, and
/// the import chain that led to it (ending with its own file).
#[derive(Debug)]
struct Frame {
    lexer: Lexer,
    file: Option<String>,
    chain: Vec<String>,
}

/// An explicit stack of source cursors — a manual call stack for nested
/// lexers, so import depth never touches the real stack.
#[derive(Debug, Default)]
pub struct SourceStack {
    frames: Vec<Frame>,
}

impl SourceStack {
    /// An empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a root source. Its file name, when known, seeds the import
    /// chain for everything spliced beneath it.
    pub fn push_source(&mut self, text: &str, file: Option<String>) {
        let chain = file.iter().cloned().collect();
        self.frames.push(Frame {
            lexer: Lexer::with_source(text),
            file,
            chain,
        });
    }

    /// Push an imported source. `chain` is the importing statement's
    /// chain, captured via [`Self::active_chain`] while the importing
    /// frame was still current.
    pub fn push_import(&mut self, text: &str, path: String, mut chain: Vec<String>) {
        chain.push(path.clone());
        self.frames.push(Frame {
            lexer: Lexer::with_source(text),
            file: Some(path),
            chain,
        });
    }

    /// The import chain of the frame currently producing tokens.
    #[must_use]
    pub fn active_chain(&self) -> Vec<String> {
        self.frames
            .last()
            .map_or_else(Vec::new, |frame| frame.chain.clone())
    }

    /// True if `path` is already part of the current frame's import
    /// chain — importing it again would be a cycle.
    #[must_use]
    pub fn is_active(&self, path: &str) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| frame.chain.iter().any(|file| file == path))
    }

    /// The current frame's import chain extended with `path`, rendered
    /// for a cycle diagnostic: `a.css -> b.css -> a.css`.
    #[must_use]
    pub fn chain_with(&self, path: &str) -> String {
        let mut chain: Vec<&str> = self.frames.last().map_or_else(Vec::new, |frame| {
            frame.chain.iter().map(String::as_str).collect()
        });
        chain.push(path);
        chain.join(" -> ")
    }

    /// The file of the frame currently producing tokens.
    #[must_use]
    pub fn current_file(&self) -> Option<&str> {
        self.frames.last().and_then(|frame| frame.file.as_deref())
    }

    /// The next lexeme, falling through to parent frames as children
    /// exhaust. Returns the EOF sentinel only when the whole stack is
    /// done.
    pub fn next_lexeme(&mut self) -> Lexeme {
        loop {
            let Some(frame) = self.frames.last_mut() else {
                return Lexeme::new(crate::tokenizer::TokenKind::Eof, 0, 0, false);
            };
            let lexeme = frame.lexer.next_lexeme();
            if lexeme.is_eof() && self.frames.len() > 1 {
                let _ = self.frames.pop();
                continue;
            }
            return lexeme;
        }
    }

    /// Re-offer a lexeme to the frame currently producing tokens.
    pub fn push_back(&mut self, lexeme: Lexeme) {
        if let Some(frame) = self.frames.last_mut() {
            frame.lexer.push_back(lexeme);
        }
    }

    /// The current frame's source text between two emitted offsets,
    /// trimmed.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.frames
            .last()
            .map_or_else(String::new, |frame| frame.lexer.slice(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::TokenKind;

    #[test]
    fn exhausted_frames_fall_through_to_parent() {
        let mut stack = SourceStack::new();
        stack.push_source("outer", None);
        stack.push_source("inner", Some("inner.css".to_owned()));
        assert_eq!(stack.next_lexeme().kind, TokenKind::Ident("inner".into()));
        // Child is exhausted; the next token comes from the parent.
        assert_eq!(stack.next_lexeme().kind, TokenKind::Ident("outer".into()));
        assert!(stack.next_lexeme().is_eof());
    }

    #[test]
    fn nested_imports_extend_the_chain() {
        let mut stack = SourceStack::new();
        stack.push_source("a", Some("a.css".to_owned()));
        let chain = stack.active_chain();
        stack.push_import("b", "b.css".to_owned(), chain);
        assert!(stack.is_active("a.css"));
        assert_eq!(stack.chain_with("a.css"), "a.css -> b.css -> a.css");
        let _ = stack.next_lexeme(); // b
        let _ = stack.next_lexeme(); // a, popping b's frame
        assert!(!stack.is_active("b.css"));
    }

    #[test]
    fn import_chain_survives_frame_pops() {
        let mut stack = SourceStack::new();
        stack.push_source("", Some("a.css".to_owned()));
        let chain = stack.active_chain();
        stack.push_import("", "b.css".to_owned(), chain);
        // b's tokens end at its trailing import; capture its chain
        // before the frame pops.
        let chain = stack.active_chain();
        assert!(stack.next_lexeme().is_eof()); // pops b, drains a
        stack.push_import("c", "c.css".to_owned(), chain);
        // b's frame is gone but it is still logically being imported.
        assert!(stack.is_active("b.css"));
        assert_eq!(stack.chain_with("b.css"), "a.css -> b.css -> c.css -> b.css");
    }
}
