//! TD Compiler - record-definition compiler and configuration generator
//!
//! This library compiles a small declarative record language (classes with
//! typed fields, defs deriving from classes) into a populated record store,
//! then runs a backend over the store to generate a textual artifact such as
//! a global SSH config.
//!
//! ## Architecture
//!
//! The compiler is organized into:
//! - **Frontend** (`frontend/`): lexing, parsing and inheritance resolution
//! - **Records** (`records`): the shared record store read by backends
//! - **Backends** (`backend/`): per-artifact emission (record dump, SSH config)
//! - **Common** (`common/`): shared infrastructure (errors, spans)

pub mod backend;
pub mod common;
pub mod frontend;
pub mod records;

// Re-exports for convenience
pub use backend::{Backend, BackendRegistry};
pub use common::{CompileError, CompileResult, DiagnosticReporter, Span};
pub use frontend::build_records;
pub use records::{FieldType, FieldValue, Record, RecordKeeper};
