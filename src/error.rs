//! Error types.

use std::fmt;

/// Detailed cause of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// A `%` is followed by fewer than two characters.
    ///
    /// The error index points to the `%` and the fragment is the rest of the input.
    IncompleteOctet,
    /// A `%` is followed by a non-hexadecimal character.
    ///
    /// The error index points to the `%` and the fragment is the offending triple.
    InvalidOctet,
    /// A run of percent-encoded octets is not a valid byte sequence in the charset.
    ///
    /// The error index points to the first `%` of the run and the fragment is the run.
    InvalidBytes,
    /// The last UTF-16 code unit of the input is a high surrogate.
    ///
    /// The error index points to the surrogate.
    LoneHighSurrogate,
    /// A high surrogate is followed by a UTF-16 code unit that is not a low surrogate.
    ///
    /// The error index points to the high surrogate.
    UnpairedHighSurrogate,
    /// A `;`-delimited matrix parameter does not contain exactly one `=`.
    ///
    /// The error index points to the start of the parameter within its path segment.
    MalformedMatrixParam,
    /// The port is not a decimal number in the range `0..=65535`.
    ///
    /// The error index points to the start of the port.
    InvalidPort,
}

/// An error occurred when percent-encoding, percent-decoding or parsing malformed input.
///
/// The `Display` implementation renders a message quoting the offending
/// [`fragment`](Self::fragment) of the input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Error {
    pub(crate) kind: ErrorKind,
    pub(crate) index: usize,
    pub(crate) fragment: Box<str>,
    // Only set for surrogate errors.
    pub(crate) units: [u16; 2],
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, index: usize, fragment: &str) -> Self {
        Self {
            kind,
            index,
            fragment: fragment.into(),
            units: [0; 2],
        }
    }

    pub(crate) fn surrogate(kind: ErrorKind, index: usize, units: [u16; 2]) -> Self {
        let fragment = match kind {
            ErrorKind::LoneHighSurrogate => format!("\\u{:x}", units[0]),
            _ => format!("\\u{:x}\\u{:04x}", units[0], units[1]),
        };
        Self {
            kind,
            index,
            fragment: fragment.into(),
            units,
        }
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the index at which the error occurred.
    ///
    /// This is a byte index into the text being decoded, or a UTF-16 code unit
    /// index for the surrogate errors. When parsing a URL the index is relative
    /// to the start of the component (or path segment) that failed.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the offending part of the input.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (index, fragment) = (self.index, &self.fragment);
        match self.kind {
            ErrorKind::IncompleteOctet => write!(
                f,
                "Could not percent decode <{fragment}>: incomplete %-pair at position {index}"
            ),
            ErrorKind::InvalidOctet => write!(f, "Invalid %-tuple <{fragment}>"),
            ErrorKind::InvalidBytes => write!(
                f,
                "Could not percent decode <{fragment}>: invalid byte sequence at position {index}"
            ),
            ErrorKind::LoneHighSurrogate => write!(
                f,
                "Invalid UTF-16: the last character in the input string was a high surrogate ({fragment}) at position {index}"
            ),
            ErrorKind::UnpairedHighSurrogate => write!(
                f,
                "Invalid UTF-16: char {} is a high surrogate (\\u{:x}), but char {} is not a low surrogate (\\u{:04x})",
                index,
                self.units[0],
                index + 1,
                self.units[1]
            ),
            ErrorKind::MalformedMatrixParam => write!(f, "Malformed matrix param: <{fragment}>"),
            ErrorKind::InvalidPort => write!(f, "Invalid port: <{fragment}>"),
        }
    }
}

impl std::error::Error for Error {}

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;
