use thiserror::Error;

/// Protocol-level error type for Open Protocol.
///
/// The variants deliberately distinguish structural failures (malformed
/// header, truncated body, field overflow) from the unknown-MID outcome,
/// which is a normal result for heterogeneous traffic and must stay
/// recognizable to the caller. Domain validation is not represented here:
/// `Mid::validate` returns plain messages instead of failing.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Input shorter than the header, non-ASCII, or a fixed-format numeric
    /// subfield that does not hold digits.
    #[error("malformed header: {0}")]
    MalformedHeader(String),
    /// No message type registered for the decoded MID number.
    #[error("no registered message type for MID {mid:04}")]
    UnknownMid { mid: u16 },
    /// A typed parse was attempted against the wrong message type.
    #[error("expected MID {expected:04}, found MID {actual:04}")]
    MidMismatch { expected: u16, actual: u16 },
    /// A value does not fit the declared width of its field. Raised when
    /// the value is assigned, never silently truncated.
    #[error("value `{value}` does not fit field `{field}` of width {width}")]
    FieldOverflow {
        field: String,
        value: String,
        width: usize,
    },
    /// Raw field text cannot be decoded into the requested type.
    #[error("cannot convert `{text}` to {target}")]
    Conversion { text: String, target: &'static str },
    /// The schema declares no field layout at or below the revision.
    #[error("MID {mid:04} has no field layout at or below revision {revision}")]
    UnsupportedRevision { mid: u16, revision: u16 },
    /// A setter addressed a field the active revision does not carry.
    #[error("field `{field}` is not part of the revision {revision} layout")]
    FieldNotInRevision { field: String, revision: u16 },
    /// The body ends before a mandatory field is complete.
    #[error("body ends {missing} characters short of field `{field}`")]
    TruncatedBody { field: String, missing: usize },
    /// Characters remain after the last declared field.
    #[error("body has {0} characters left over after the last field")]
    TrailingBody(usize),
    /// Two message types claimed the same MID number at registration time.
    #[error("MID {mid:04} is already registered")]
    DuplicateMid { mid: u16 },
    /// Frame exceeds the protocol's four-digit length ceiling.
    #[error("frame size exceeds limit: {0}")]
    FrameTooLarge(usize),
    /// Frame-level structural failure outside the header (framing, charset).
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
    /// Underlying IO error surfaced through the framing codec.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
