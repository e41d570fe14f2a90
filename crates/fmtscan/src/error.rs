use thiserror::Error;

/// Result type returned by every fallible operation in the crate.
pub type Result<T, E = ScanError> = core::result::Result<T, E>;

/// What went wrong during a scan.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// The input stream ran out of characters.
    #[error("end of stream")]
    EndOfStream,
    /// Malformed directive syntax or an unterminated directive.
    #[error("invalid format string")]
    InvalidFormatString,
    /// The input did not match the format or the target type.
    #[error("invalid scanned value")]
    InvalidScannedValue,
    /// An operation was attempted in a state that does not allow it.
    #[error("invalid operation")]
    InvalidOperation,
    /// The scanned value does not fit in the target type.
    #[error("value out of range")]
    ValueOutOfRange,
    /// A directive resolved to no argument, or mixed addressing modes.
    #[error("invalid argument")]
    InvalidArgument,
    /// The input stream is not valid UTF-8.
    #[error("invalid encoding")]
    InvalidEncoding,
}

/// An error with its [`ErrorKind`] and a short static message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind}: {msg}")]
pub struct ScanError {
    kind: ErrorKind,
    msg: &'static str,
}

impl ScanError {
    #[inline]
    #[must_use]
    pub const fn new(kind: ErrorKind, msg: &'static str) -> Self {
        Self { kind, msg }
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub const fn msg(&self) -> &'static str {
        self.msg
    }

    /// Whether the stream is still usable after this error.
    ///
    /// Running out of input or failing to match a value leaves the stream
    /// intact; everything else points at the format or the arguments.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::EndOfStream | ErrorKind::InvalidScannedValue | ErrorKind::ValueOutOfRange
        )
    }
}

impl From<ErrorKind> for ScanError {
    fn from(kind: ErrorKind) -> Self {
        let msg = match kind {
            ErrorKind::EndOfStream => "no more input",
            ErrorKind::InvalidFormatString => "malformed format string",
            ErrorKind::InvalidScannedValue => "input did not match",
            ErrorKind::InvalidOperation => "operation not allowed here",
            ErrorKind::ValueOutOfRange => "value does not fit the target type",
            ErrorKind::InvalidArgument => "no matching argument",
            ErrorKind::InvalidEncoding => "input is not valid UTF-8",
        };
        Self::new(kind, msg)
    }
}
