use thiserror::Error;

/// Errors raised by the tape codec. Every error is local to the call that produced it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TapeError {
    /// The character has no code in either shift table of the selected codepage.
    #[error("unsupported character {character:?} at position {position}")]
    UnsupportedCharacter { character: char, position: usize },

    #[error("malformed code: {0}")]
    MalformedCode(String),

    #[error("unknown codepage '{0}' (expected 'standard' or 'us-tty')")]
    UnknownCodepage(String),
}
