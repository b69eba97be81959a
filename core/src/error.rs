use thiserror::Error;

/// Errors surfaced by the header engine.
///
/// Detection and rendering are total and never produce these; they come
/// from validating settings and from applying an edit to a document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("identity is not configured")]
    MissingIdentity,

    #[error("email is not configured")]
    MissingEmail,

    #[error("position {line}:{character} is outside the document")]
    PositionOutOfBounds { line: u32, character: u32 },
}
