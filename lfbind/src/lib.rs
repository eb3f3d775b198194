//! lfbind - extract dispatchable function signatures from module binaries
//! using DWARF debug information
//!
//! - only works for modules compiled with DWARF info (e.g. gcc -g ...)
//! - only functions placed in the `.lf.funcs` section are considered
//! - signatures carry just enough typing to generate call-site-correct
//!   bindings: declared names plus a byte-size class for returns, not
//!   full C types

mod analyzer;
mod error;
mod reader;
pub mod resolver;
mod sections;
pub mod types;
mod walker;

pub use analyzer::{ModuleAnalyzer, signatures_from_dwarf};
pub use error::BindError;
pub use resolver::ResolvedType;
pub use sections::{AddressRange, FUNCTIONS_SECTION, ModuleRegions, VARIABLES_SECTION};
pub use types::{FunctionSignature, Parameter, SizeClass};
