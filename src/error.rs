use thiserror::Error;

#[doc = r#"
A syntactic or structural failure raised while decoding or encoding
MIDI bytes.

Carries the absolute byte position the cursor had reached when the
operation failed, plus a [`CodecErrorKind`] describing what went wrong.

Semantic problems in an otherwise well-formed file are *not* reported
through this type; those accumulate as strings from
[`validate`](crate::validate).
"#]
#[derive(Debug, Error)]
#[error("at byte {position}, {kind}")]
pub struct CodecError {
    position: usize,
    pub(crate) kind: CodecErrorKind,
}

/// A kind of failure that the decoder or encoder can produce.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecErrorKind {
    /// A bounded read ran past the end of the input.
    #[error("read of {requested} bytes exceeds the {available} remaining")]
    Underflow {
        /// How many bytes the read asked for
        requested: usize,
        /// How many bytes were left in the stream
        available: usize,
    },
    /// A data byte appeared before any status byte had been seen.
    #[error("data byte with no running status active")]
    MissingRunningStatus,
    /// A value too wide for a variable-length quantity (max 28 bits).
    #[error("value {0} does not fit in a variable-length quantity")]
    VlqOverflow(u32),
    /// A wire field that must fit in seven bits carried a wider value.
    #[error("{field} value {value} does not fit in seven bits")]
    DataByteOutOfRange {
        /// Name of the offending field
        field: &'static str,
        /// The rejected value
        value: u8,
    },
    /// A note number outside the MIDI range.
    #[error("note value {0} is outside 0..=127")]
    NoteOutOfRange(i32),
    /// A beats-per-minute value with no representable tempo.
    #[error("bpm {0} does not map to a representable tempo")]
    BpmOutOfRange(u32),
    /// A pitch name that could not be interpreted.
    #[error("unrecognized note name `{0}`")]
    UnknownNoteName(String),
}

impl CodecError {
    /// Create an error from a position and kind.
    pub const fn new(position: usize, kind: CodecErrorKind) -> Self {
        Self { position, kind }
    }

    /// Create a new underflow error.
    pub const fn underflow(position: usize, requested: usize, available: usize) -> Self {
        Self {
            position,
            kind: CodecErrorKind::Underflow {
                requested,
                available,
            },
        }
    }

    /// True if the input ended before the read completed.
    pub const fn is_underflow(&self) -> bool {
        matches!(self.kind, CodecErrorKind::Underflow { .. })
    }

    /// Returns the kind of failure.
    pub fn kind(&self) -> &CodecErrorKind {
        &self.kind
    }

    /// Returns the byte position where the failure occurred.
    pub fn position(&self) -> usize {
        self.position
    }
}

/// The codec result type (see [`CodecError`])
pub type CodecResult<T> = Result<T, CodecError>;
