use thiserror::Error;

/// Terminal failure modes for a binding run. Nothing here is transient, so
/// there is no retry path anywhere in the pipeline.
#[derive(Error, Debug)]
pub enum BindError {
    /// The binary carries no DWARF records at all.
    #[error("binary has no DWARF debug info, compile with -g")]
    MissingDebugInfo,

    /// A return type's declared byte size maps to no dispatch size class.
    #[error("return type byte size {0} has no dispatch size class (expected 1, 2 or 4)")]
    UnsupportedReturnSize(u64),
}
