//! Output writers - emit syntax trees as source code.

pub mod emitter;
pub mod typescript;

pub use emitter::{Emitter, Scope};
pub use typescript::{TYPESCRIPT_WRITER, TypeScriptWriter, TypeScriptWriterImpl, WriterOptions};
