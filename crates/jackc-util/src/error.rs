//! Fatal compile errors.
//!
//! Every category below is terminal: the compiler does not attempt recovery,
//! the first one raised aborts compilation of the current file and propagates
//! to the driver via `?`. Message text is load-bearing — downstream tooling
//! and the testable-property fixtures compare it verbatim — so it must not
//! be touched without also updating the fixtures.

use thiserror::Error;

use crate::span::Span;

/// An error raised while compiling a single Jack source file.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The parser expected one specific token value and found another.
    #[error("Expected token: {expected}. Got: {actual}")]
    TokenMismatch {
        expected: String,
        actual: String,
        span: Span,
    },

    /// The parser expected any token of a given kind (or named set) and found
    /// a token of a different kind.
    #[error("Expected token of type: {expected}. Got: {actual}")]
    KindMismatch {
        expected: String,
        actual: String,
        span: Span,
    },

    /// An identifier used in a variable position resolved in neither symbol table.
    #[error("Undefined symbol: {name}")]
    UndefinedSymbol { name: String, span: Span },
}

impl CompileError {
    pub fn span(&self) -> Span {
        match self {
            CompileError::TokenMismatch { span, .. } => *span,
            CompileError::KindMismatch { span, .. } => *span,
            CompileError::UndefinedSymbol { span, .. } => *span,
        }
    }
}

/// Result alias used throughout the compiler phases.
pub type CompileResult<T> = std::result::Result<T, CompileError>;

/// Errors at the driver/CLI boundary, each mapped to one of the two non-zero
/// exit codes in the external interface contract.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Input path could not be opened or read (exit code 2).
    #[error("could not read '{path}': {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A source file failed to compile (exit code 2, same as upstream I/O
    /// failures — the reference tool does not distinguish the two at the
    /// process boundary).
    #[error("{0}")]
    Compile(#[from] CompileError),

    /// No `.jack` files were found at the given path (exit code 1, usage error).
    #[error("no .jack files found at '{0}'")]
    NoInputFiles(std::path::PathBuf),
}

pub type DriverResult<T> = std::result::Result<T, DriverError>;
