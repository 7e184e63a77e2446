//! Declaration-level translation of class-based syntax trees.
//!
//! `normalize-class-syntax` takes an already-parsed tree of namespaces,
//! classes and members and writes it out as module-style TypeScript. It is a
//! single depth-first pass: no parsing, no semantic analysis, no type
//! inference.
//!
//! # Architecture
//!
//! ```text
//! External parser        Tree            Writer                 Output
//! ───────────────    ────────────    ─────────────────────    ──────────
//!                                    TypeScriptWriter
//! (any language) ──> SourceFile ──>    ├─ TypeMapper    ──>   lines
//!                     (ir/)            └─ Emitter/Scope
//! ```
//!
//! - [`mapping`]: source type names to output types, modifiers to visibility.
//! - [`output::Emitter`]: line buffer; [`output::Scope`] guards keep braces
//!   and indentation paired even when a visit fails.
//! - [`output::TypeScriptWriter`]: one `visit_*` method per node kind.
//!
//! # Example
//!
//! ```
//! use normalize_class_syntax::ir::{Class, Field, Modifier, SourceFile};
//! use normalize_class_syntax::output::TypeScriptWriter;
//!
//! let file = SourceFile::new(vec![
//!     Class::new(
//!         vec![Modifier::Public],
//!         "Foo",
//!         vec![Field::new(vec![Modifier::Private], "int", &["x"]).into()],
//!     )
//!     .into(),
//! ]);
//!
//! let ts = TypeScriptWriter::emit(&file).unwrap();
//! assert_eq!(ts, "public class Foo\n{\n    private x: number;\n}");
//! ```
//!
//! # Note on Translation Fidelity
//!
//! Expressions are opaque text. Return values, expression statements and
//! initializers are copied verbatim, so source-specific expression syntax
//! reaches the output unchanged.

pub mod ir;
pub mod mapping;
pub mod output;
pub mod traits;

// Re-exports: tree types
pub use ir::{
    Accessor, AccessorKind, Block, CatchClause, Class, Declaration, Declarator, Field, Member,
    Method, Modifier, Namespace, NodeKind, Parameter, Property, SourceFile, Stmt, TryStmt,
    TypeRef, VarDecl,
};

// Re-exports: mapping
pub use mapping::{
    TypeMapper, TypePattern, TypeRule, TypeTarget, Visibility, map_type, map_visibility,
};

// Re-exports: traits
pub use traits::{TranslateError, Writer};

// Re-exports: built-in writer
pub use output::{Emitter, Scope, TYPESCRIPT_WRITER, TypeScriptWriter, WriterOptions};
