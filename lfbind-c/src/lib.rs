//! lfbind-c - generate the C call-table interface and weak trampoline
//! bodies for a module binary
//!
//! - reads function signatures out of the binary's DWARF info via lfbind
//! - substitutes them into two template documents with literal
//!   placeholder tokens
//! - writes `<package>.h` and `<package>.c`, overwriting without asking

mod codegen;
mod templates;

pub use codegen::{GeneratedFiles, generate, render_implementation, render_interface};
pub use templates::{TemplateError, Templates};
