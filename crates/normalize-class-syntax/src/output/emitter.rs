//! Line buffer with brace-scoped indentation.
//!
//! [`Emitter::open_scope`] returns a [`Scope`] guard. Dropping the guard
//! closes the brace, so depth and braces stay paired on every exit path:
//! normal return, `?` propagation, or panic unwinding.

use std::fmt::{self, Write as _};
use std::ops::{Deref, DerefMut};

pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Append-only output lines plus the current indentation depth.
#[derive(Debug, Clone)]
pub struct Emitter {
    lines: Vec<String>,
    depth: usize,
    indent_width: usize,
    line_terminator: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self::with_layout(DEFAULT_INDENT_WIDTH, "\n")
    }

    pub fn with_layout(indent_width: usize, line_terminator: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            depth: 0,
            indent_width,
            line_terminator: line_terminator.into(),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Join the lines with the line terminator. Does not reset the buffer.
    pub fn finalize(&self) -> String {
        self.lines.join(&self.line_terminator)
    }

    fn indentation(&self) -> String {
        " ".repeat(self.indent_width * self.depth)
    }

    /// Append `text` at the current depth.
    pub fn emit_line(&mut self, text: &str) {
        let mut line = self.indentation();
        line.push_str(text);
        self.lines.push(line);
    }

    /// Append a formatted line at the current depth.
    ///
    /// ```
    /// use normalize_class_syntax::output::Emitter;
    ///
    /// let mut out = Emitter::new();
    /// out.emit_fmt(format_args!("module {}", "App"));
    /// assert_eq!(out.finalize(), "module App");
    /// ```
    pub fn emit_fmt(&mut self, args: fmt::Arguments<'_>) {
        let mut line = self.indentation();
        // Formatting into a String is infallible.
        let _ = line.write_fmt(args);
        self.lines.push(line);
    }

    /// Emit `items` as one statement spread over several lines.
    ///
    /// The first line starts with `prefix`; continuation lines are padded to
    /// align under the first item. Items are separated by `,` and the last
    /// one ends with `suffix`.
    pub fn emit_aligned(&mut self, prefix: &str, items: &[String], suffix: &str) {
        let padding = " ".repeat(prefix.len());
        let last = items.len().saturating_sub(1);
        for (i, item) in items.iter().enumerate() {
            let lead = if i == 0 { prefix } else { padding.as_str() };
            let tail = if i == last { suffix } else { "," };
            self.emit_fmt(format_args!("{lead}{item}{tail}"));
        }
    }

    /// Emit `{` and indent until the returned guard is dropped.
    pub fn open_scope(&mut self) -> Scope<'_> {
        self.emit_line("{");
        self.depth += 1;
        Scope { emitter: self }
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Open brace scope. Dedents and emits `}` on drop.
pub struct Scope<'a> {
    emitter: &'a mut Emitter,
}

impl Deref for Scope<'_> {
    type Target = Emitter;

    fn deref(&self) -> &Emitter {
        self.emitter
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Emitter {
        self.emitter
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.emitter.depth -= 1;
        self.emitter.emit_line("}");
    }
}
