//! Percent-encoding utilities.
//!
//! Encoding is driven by a [`Table`] of characters left as-is (usually obtained
//! from a [`Component`]) and a text encoding from [`encoding_rs`]. Any other
//! character is converted to bytes in that encoding and each byte is written
//! as `%` followed by two upper-case hexadecimal digits.
//!
//! # Examples
//!
//! ```
//! use url_builder::{pct_enc::{self, Component}, UTF_16BE};
//!
//! assert_eq!(pct_enc::encode("snow\u{2603}man", Component::Path), "snow%E2%98%83man");
//! assert_eq!(pct_enc::encode_with("\u{2603}", Component::Path, UTF_16BE), "%26%03");
//!
//! assert_eq!(pct_enc::decode("snow%E2%98%83man")?, "snow\u{2603}man");
//! assert_eq!(pct_enc::decode_with("%26%03", UTF_16BE)?, "\u{2603}");
//! # Ok::<_, url_builder::Error>(())
//! ```

mod decoder;
mod encoder;
pub mod table;

pub use decoder::{decode, decode_with};
pub use encoder::{encode, encode_utf16, encode_with, force_encode, Component};
pub use table::Table;

use crate::error::{Error, ErrorKind, Result};
use encoding_rs::{Encoding, UTF_8};
use ref_cast::{ref_cast_custom, RefCastCustom};
use std::{borrow::Cow, fmt, hash, iter::FusedIterator, str};

/// Percent-encoded string slices.
///
/// An `EStr` is a string slice in which every `%` starts a well-formed
/// percent-encoded octet. Any other character, safe or not, may appear,
/// matching the lenient way URLs are parsed.
///
/// # Examples
///
/// Collect the parameters of a query string:
///
/// ```
/// use url_builder::pct_enc::EStr;
///
/// let query = EStr::new("name=%E5%BC%A0%E4%B8%89&speech=%C2%A1Ol%C3%A9%21")?;
/// let mut params = Vec::new();
/// for pair in query.split('&') {
///     if let Some((k, v)) = pair.split_once('=') {
///         params.push((k.decode()?.into_owned(), v.decode()?.into_owned()));
///     }
/// }
/// assert_eq!(params[0], ("name".to_owned(), "张三".to_owned()));
/// assert_eq!(params[1], ("speech".to_owned(), "¡Olé!".to_owned()));
/// # Ok::<_, url_builder::Error>(())
/// ```
#[derive(RefCastCustom)]
#[repr(transparent)]
pub struct EStr {
    inner: str,
}

impl EStr {
    /// Converts a string slice to an `EStr` slice assuming validity.
    #[ref_cast_custom]
    pub(crate) const fn new_validated(s: &str) -> &Self;

    /// An empty `EStr` slice.
    pub const EMPTY: &'static Self = Self::new_validated("");

    /// Converts a string slice to an `EStr` slice.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `%` in the string is not followed by two hexadecimal digits.
    pub fn new(s: &str) -> Result<&Self> {
        let bytes = s.as_bytes();
        let mut i = 0;
        while let Some(j) = bytes[i..].iter().position(|&x| x == b'%') {
            read_octet(s, i + j)?;
            i += j + 3;
        }
        Ok(Self::new_validated(s))
    }

    /// Yields the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Returns the length of the `EStr` slice in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Checks whether the `EStr` slice is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Decodes the `EStr` slice as UTF-8.
    ///
    /// Always **split before decoding**, as otherwise the data may be
    /// mistaken for component delimiters.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the decoded bytes are not valid UTF-8.
    pub fn decode(&self) -> Result<Cow<'_, str>> {
        self.decode_with(UTF_8)
    }

    /// Decodes the `EStr` slice with the given charset.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the decoded bytes are not valid in the charset.
    pub fn decode_with(&self, charset: &'static Encoding) -> Result<Cow<'_, str>> {
        decode_with(&self.inner, charset)
    }

    /// Returns an iterator over subslices of the `EStr` slice separated by the given delimiter.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is not a [reserved] character.
    ///
    /// [reserved]: https://datatracker.ietf.org/doc/html/rfc3986#section-2.2
    ///
    /// # Examples
    ///
    /// ```
    /// use url_builder::pct_enc::EStr;
    ///
    /// assert!(EStr::new("a,b,c")?.split(',').eq(["a", "b", "c"]));
    /// assert!(EStr::new(",")?.split(',').eq(["", ""]));
    /// assert!(EStr::EMPTY.split(',').eq([""]));
    /// # Ok::<_, url_builder::Error>(())
    /// ```
    pub fn split(&self, delim: char) -> Split<'_> {
        assert!(
            table::RESERVED.allows(delim),
            "splitting with non-reserved character"
        );
        Split {
            inner: self.inner.split(delim),
        }
    }

    /// Splits the `EStr` slice on the first occurrence of the given delimiter and
    /// returns prefix before delimiter and suffix after delimiter.
    ///
    /// Returns `None` if the delimiter is not found.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is not a [reserved] character.
    ///
    /// [reserved]: https://datatracker.ietf.org/doc/html/rfc3986#section-2.2
    #[must_use]
    pub fn split_once(&self, delim: char) -> Option<(&Self, &Self)> {
        assert!(
            table::RESERVED.allows(delim),
            "splitting with non-reserved character"
        );
        self.inner
            .split_once(delim)
            .map(|(a, b)| (Self::new_validated(a), Self::new_validated(b)))
    }
}

impl AsRef<str> for EStr {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl PartialEq for EStr {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl PartialEq<str> for EStr {
    fn eq(&self, other: &str) -> bool {
        &self.inner == other
    }
}

impl Eq for EStr {}

impl hash::Hash for EStr {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl Default for &EStr {
    /// Creates an empty `EStr` slice.
    fn default() -> Self {
        EStr::EMPTY
    }
}

impl fmt::Debug for EStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.inner, f)
    }
}

impl fmt::Display for EStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

/// An iterator over subslices of an [`EStr`] slice separated by a delimiter.
///
/// This struct is created by [`EStr::split`].
#[derive(Clone, Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Split<'a> {
    inner: str::Split<'a, char>,
}

impl<'a> Iterator for Split<'a> {
    type Item = &'a EStr;

    fn next(&mut self) -> Option<&'a EStr> {
        self.inner.next().map(EStr::new_validated)
    }
}

impl FusedIterator for Split<'_> {}

const fn gen_octet_table(hi: bool) -> [u8; 256] {
    let mut out = [0xff; 256];
    let shift = if hi { 4 } else { 0 };

    let mut i = 0;
    while i < 10 {
        out[(i + b'0') as usize] = i << shift;
        i += 1;
    }
    while i < 16 {
        out[(i - 10 + b'A') as usize] = i << shift;
        out[(i - 10 + b'a') as usize] = i << shift;
        i += 1;
    }
    out
}

const OCTET_TABLE_HI: &[u8; 256] = &gen_octet_table(true);
pub(crate) const OCTET_TABLE_LO: &[u8; 256] = &gen_octet_table(false);

/// Decodes a percent-encoded octet, assuming that the bytes are hexadecimal.
fn decode_octet(hi: u8, lo: u8) -> u8 {
    debug_assert!(hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit());
    OCTET_TABLE_HI[hi as usize] | OCTET_TABLE_LO[lo as usize]
}

/// Reads the percent-encoded octet starting at the `%` at index `i`.
fn read_octet(s: &str, i: usize) -> Result<u8> {
    debug_assert_eq!(s.as_bytes()[i], b'%');

    let mut chars = s[i + 1..].chars();
    let (Some(hi), Some(lo)) = (chars.next(), chars.next()) else {
        return Err(Error::new(ErrorKind::IncompleteOctet, i, &s[i..]));
    };
    if !(hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()) {
        let end = i + 1 + hi.len_utf8() + lo.len_utf8();
        return Err(Error::new(ErrorKind::InvalidOctet, i, &s[i..end]));
    }
    Ok(decode_octet(hi as u8, lo as u8))
}

pub(crate) fn encode_byte(x: u8) -> &'static str {
    const TABLE: &[u8; 256 * 3] = &{
        const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

        let mut i = 0;
        let mut table = [0; 256 * 3];
        while i < 256 {
            table[i * 3] = b'%';
            table[i * 3 + 1] = HEX_DIGITS[i >> 4];
            table[i * 3 + 2] = HEX_DIGITS[i & 0b1111];
            i += 1;
        }
        table
    };

    const TABLE_STR: &str = match str::from_utf8(TABLE) {
        Ok(s) => s,
        Err(_) => unreachable!(),
    };

    &TABLE_STR[x as usize * 3..x as usize * 3 + 3]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octets() {
        assert_eq!(encode_byte(0), "%00");
        assert_eq!(encode_byte(b' '), "%20");
        assert_eq!(encode_byte(0xff), "%FF");

        assert_eq!(read_octet("%2f", 0), Ok(0x2f));
        assert_eq!(read_octet("a%E2", 1), Ok(0xe2));
        assert_eq!(
            read_octet("%2", 0).unwrap_err().kind(),
            ErrorKind::IncompleteOctet
        );
        assert_eq!(read_octet("%é1", 0).unwrap_err().fragment(), "%é1");
        assert_eq!(read_octet("%é", 0).unwrap_err().fragment(), "%é");
    }

    #[test]
    fn estr() {
        assert!(EStr::new("%20a%7e").is_ok());
        assert!(EStr::new("100% sure").is_err());

        let e = EStr::new("a%2o").unwrap_err();
        assert_eq!(e.index(), 1);
        assert_eq!(e.fragment(), "%2o");

        let s = EStr::new("k=v%3D").unwrap();
        let (k, v) = s.split_once('=').unwrap();
        assert_eq!(k, "k");
        assert_eq!(v.decode().unwrap(), "v=");
        assert_eq!(s.split_once(';'), None);
    }
}
