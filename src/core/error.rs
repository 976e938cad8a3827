use thiserror::Error;

/// Errors surfaced by the clipping engine and result containers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipError {
    /// Only subject paths may be open; an open path was added as a clip.
    #[error("only subject paths may be open")]
    OpenClipPath,

    /// A tree node child index was out of range.
    #[error("child index {index} out of range for node with {count} children")]
    ChildIndexOutOfRange { index: usize, count: usize },

    /// `execute` was re-entered while a clipping run was in progress.
    #[error("clipping engine is locked by an execute in progress")]
    EngineLocked,

    /// An internal invariant of the sweep was violated. This indicates a bug
    /// in the engine or inputs that broke a documented precondition.
    #[error("internal clipping failure: {0}")]
    Internal(&'static str),
}

pub type ClipResult<T> = Result<T, ClipError>;
