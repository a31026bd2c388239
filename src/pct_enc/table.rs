//! Safe character tables for URL components.
//!
//! The tables follow RFC 3986 and RFC 1738 where they agree with common HTTP
//! usage, and the HTML 4 form encoding where they do not. Every table contains
//! the [`COMMON_SAFE`] characters and differs from the others only in which of
//! the reserved characters `@ : & + = ; / ?` it leaves unencoded.

/// A table specifying the characters left unencoded by the percent-encoder.
///
/// Only ASCII characters other than `%` can be allowed: everything else
/// is always percent-encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Table(u64, u64);

impl Table {
    /// Creates a table that only allows the given bytes.
    ///
    /// # Panics
    ///
    /// Panics if any of the bytes is not ASCII or is `b'%'`.
    #[must_use]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut table = 0;
        while let [cur, rem @ ..] = bytes {
            assert!(
                !matches!(cur, b'%' | 128..),
                "cannot allow non-ASCII byte or %"
            );
            table |= 1u128.wrapping_shl(*cur as u32);
            bytes = rem;
        }
        Self(table as u64, (table >> 64) as u64)
    }

    /// Combines two tables into one.
    ///
    /// Returns a new table that allows all the characters allowed
    /// by `self` or by `other`.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0, self.1 | other.1)
    }

    /// Subtracts from this table.
    ///
    /// Returns a new table that allows all the characters allowed
    /// by `self` but not allowed by `other`.
    #[must_use]
    pub const fn sub(self, other: Self) -> Self {
        Self(self.0 & !other.0, self.1 & !other.1)
    }

    /// Checks whether the table is a subset of another, i.e., `other`
    /// allows at least all the characters allowed by `self`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & other.0 == self.0 && self.1 & other.1 == self.1
    }

    #[inline]
    pub(crate) const fn allows_ascii(self, x: u8) -> bool {
        let table = if x < 64 {
            self.0
        } else if x < 128 {
            self.1
        } else {
            0
        };
        table & 1u64.wrapping_shl(x as u32) != 0
    }

    /// Checks whether the given character is left unencoded by the table.
    #[inline]
    #[must_use]
    pub const fn allows(self, ch: char) -> bool {
        ch.is_ascii() && self.allows_ascii(ch as u8)
    }

    /// Checks whether every character of the string is allowed by the table.
    #[must_use]
    pub fn allows_all(self, s: &str) -> bool {
        s.bytes().all(|x| self.allows_ascii(x))
    }
}

const fn new(bytes: &[u8]) -> Table {
    Table::new(bytes)
}

/// `ALPHA = %x41-5A / %x61-7A`
pub const ALPHA: Table = new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz");

/// `DIGIT = %x30-39`
pub const DIGIT: Table = new(b"0123456789");

/// `gen-delims = ":" / "/" / "?" / "#" / "[" / "]" / "@"`
pub const GEN_DELIMS: Table = new(b":/?#[]@");

/// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")"
///             / "*" / "+" / "," / ";" / "="`
pub const SUB_DELIMS: Table = new(b"!$&'()*+,;=");

/// `reserved = gen-delims / sub-delims`
pub const RESERVED: Table = GEN_DELIMS.or(SUB_DELIMS);

/// The baseline shared by every component: `ALPHA / DIGIT / "-" / "." / "_" / "~"
/// / "!" / "$" / "'" / "(" / ")" / "*" / ","`.
pub const COMMON_SAFE: Table = ALPHA.or(DIGIT).or(new(b"-._~!$'()*,"));

/// An RFC 3986 `reg-name`.
///
/// Not very aggressive: DNS-illegal names pass through, but the output
/// is still URI-compliant.
pub const REG_NAME: Table = COMMON_SAFE.or(new(b"&+=;"));

/// An RFC 3986 `pchar` without `;`, which starts the matrix parameters.
pub const PATH: Table = COMMON_SAFE.or(new(b"@:&+="));

/// A matrix parameter name or value (RFC 1738 section 3.3), i.e. [`PATH`] without `=`.
pub const MATRIX: Table = PATH.sub(new(b"="));

/// An RFC 3986 `query` without `+`, which the HTML 4 form encoding reads as a space.
pub const UNSTRUCTURED_QUERY: Table = COMMON_SAFE.or(new(b"@:&=;/?"));

/// An HTML 4 query parameter name or value, i.e. [`UNSTRUCTURED_QUERY`] without
/// the `&` and `=` delimiters.
pub const QUERY_PARAM: Table = UNSTRUCTURED_QUERY.sub(new(b"&="));

/// An RFC 3986 `fragment`.
pub const FRAGMENT: Table = COMMON_SAFE.or(new(b"@:&+=;/?"));
