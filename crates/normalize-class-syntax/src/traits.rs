//! Writer trait and translation errors.

use crate::ir::{NodeKind, SourceFile};

/// Error that can occur while translating a syntax tree.
///
/// Translation is all-or-nothing: on error no partial output is returned.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("{kind} declares no identifiers")]
    EmptyDeclaration { kind: NodeKind },

    #[error("{kind} has an empty name")]
    MissingName { kind: NodeKind },

    #[error("invalid syntax tree: {0}")]
    Json(#[from] serde_json::Error),
}

/// A writer emits a syntax tree as source code in a target language.
pub trait Writer: Send + Sync {
    /// Language identifier (e.g., "typescript").
    fn language(&self) -> &'static str;

    /// File extension for output (e.g., "ts").
    fn extension(&self) -> &'static str;

    /// Emit the tree as source code.
    fn write(&self, file: &SourceFile) -> Result<String, TranslateError>;
}
