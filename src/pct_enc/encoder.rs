use super::{encode_byte, table, Table};
use crate::error::{Error, ErrorKind, Result};
use encoding_rs::{Encoding, EncoderResult, UTF_16BE, UTF_16LE, UTF_8};
use std::borrow::Cow;

/// URL components, each with its own set of characters left unencoded.
///
/// See RFC 3986, RFC 1738 and the [HTML 4 form content type] for the rules.
///
/// [HTML 4 form content type]: http://www.w3.org/TR/html401/interact/forms.html#h-17.13.4.1
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    /// The host of a URL, when it is not an IP literal.
    RegName,
    /// A path segment.
    Path,
    /// A matrix parameter name or value.
    Matrix,
    /// A query that is not a list of `name=value` pairs.
    UnstructuredQuery,
    /// A query parameter name or value.
    QueryParam,
    /// The fragment.
    Fragment,
}

impl Component {
    /// All the components.
    pub const ALL: [Component; 6] = [
        Component::RegName,
        Component::Path,
        Component::Matrix,
        Component::UnstructuredQuery,
        Component::QueryParam,
        Component::Fragment,
    ];

    /// Returns the table of characters left unencoded in the component.
    #[must_use]
    pub const fn table(self) -> Table {
        match self {
            Component::RegName => table::REG_NAME,
            Component::Path => table::PATH,
            Component::Matrix => table::MATRIX,
            Component::UnstructuredQuery => table::UNSTRUCTURED_QUERY,
            Component::QueryParam => table::QUERY_PARAM,
            Component::Fragment => table::FRAGMENT,
        }
    }
}

impl From<Component> for Table {
    fn from(component: Component) -> Table {
        component.table()
    }
}

/// Percent-encodes a string as UTF-8, leaving the characters allowed by `set` as-is.
///
/// This function allocates only when some character needs encoding.
///
/// # Examples
///
/// ```
/// use url_builder::pct_enc::{self, Component};
///
/// assert_eq!(pct_enc::encode("a b;c", Component::Path), "a%20b%3Bc");
/// assert_eq!(pct_enc::encode("a=b", Component::Matrix), "a%3Db");
/// ```
pub fn encode(s: &str, set: impl Into<Table>) -> Cow<'_, str> {
    encode_with(s, set, UTF_8)
}

/// Percent-encodes a string with the given charset, leaving the characters
/// allowed by `set` as-is.
///
/// Characters that cannot be represented in the charset are replaced with `?`
/// before encoding.
pub fn encode_with<'a>(
    s: &'a str,
    set: impl Into<Table>,
    charset: &'static Encoding,
) -> Cow<'a, str> {
    let table = set.into();
    // Skip the allowed characters.
    let Some(i) = s.bytes().position(|x| !table.allows_ascii(x)) else {
        return Cow::Borrowed(s);
    };

    let mut buf = String::with_capacity(s.len() * 3);
    buf.push_str(&s[..i]);
    encode_to(&s[i..], table, charset, &mut buf);
    Cow::Owned(buf)
}

fn encode_to(mut s: &str, table: Table, charset: &'static Encoding, buf: &mut String) {
    while !s.is_empty() {
        // Allowed characters are ASCII, so these are always char boundaries.
        let allowed = s
            .bytes()
            .position(|x| !table.allows_ascii(x))
            .unwrap_or(s.len());
        buf.push_str(&s[..allowed]);
        s = &s[allowed..];

        let unallowed = s
            .bytes()
            .position(|x| table.allows_ascii(x))
            .unwrap_or(s.len());
        encode_run(&s[..unallowed], charset, buf);
        s = &s[unallowed..];
    }
}

/// Percent-encodes UTF-16 code units, leaving the characters allowed by `set` as-is.
///
/// Surrogate pairs are combined before encoding. A low surrogate without a preceding
/// high surrogate cannot be mapped and is replaced with `?`.
///
/// # Errors
///
/// Returns `Err` if a high surrogate is the last code unit or is not followed by
/// a low surrogate.
///
/// # Examples
///
/// ```
/// use url_builder::{pct_enc::{self, Component}, ErrorKind, UTF_8};
///
/// let clef: Vec<u16> = "clef\u{1d11e}".encode_utf16().collect();
/// assert_eq!(pct_enc::encode_utf16(&clef, Component::Path, UTF_8)?, "clef%F0%9D%84%9E");
///
/// let e = pct_enc::encode_utf16(&clef[..5], Component::Path, UTF_8).unwrap_err();
/// assert_eq!(e.kind(), ErrorKind::LoneHighSurrogate);
/// assert_eq!(e.index(), 4);
/// # Ok::<_, url_builder::Error>(())
/// ```
pub fn encode_utf16(
    units: &[u16],
    set: impl Into<Table>,
    charset: &'static Encoding,
) -> Result<String> {
    let table = set.into();
    let mut buf = String::with_capacity(units.len() * 3);
    let mut run = String::new();

    let mut i = 0;
    while i < units.len() {
        let unit = units[i];
        if unit < 0x80 && table.allows_ascii(unit as u8) {
            encode_run(&run, charset, &mut buf);
            run.clear();
            buf.push(unit as u8 as char);
            i += 1;
            continue;
        }

        let ch = match unit {
            0xd800..=0xdbff => {
                let Some(&low) = units.get(i + 1) else {
                    return Err(Error::surrogate(ErrorKind::LoneHighSurrogate, i, [unit, 0]));
                };
                if !(0xdc00..=0xdfff).contains(&low) {
                    return Err(Error::surrogate(
                        ErrorKind::UnpairedHighSurrogate,
                        i,
                        [unit, low],
                    ));
                }
                i += 1;
                let x = 0x10000 + ((u32::from(unit) - 0xd800) << 10) + (u32::from(low) - 0xdc00);
                char::from_u32(x).unwrap_or('?')
            }
            // Unmappable.
            0xdc00..=0xdfff => '?',
            _ => char::from_u32(u32::from(unit)).unwrap_or('?'),
        };
        run.push(ch);
        i += 1;
    }
    encode_run(&run, charset, &mut buf);
    Ok(buf)
}

/// Percent-encodes every character of a string with the given charset.
///
/// # Examples
///
/// ```
/// use url_builder::{pct_enc, UTF_8};
///
/// assert_eq!(pct_enc::force_encode("a/b", UTF_8), "%61%2F%62");
/// ```
#[must_use]
pub fn force_encode(s: &str, charset: &'static Encoding) -> String {
    let mut buf = String::with_capacity(s.len() * 3);
    encode_run(s, charset, &mut buf);
    buf
}

/// Converts a run of characters to bytes in the charset and writes them percent-encoded.
fn encode_run(run: &str, charset: &'static Encoding, buf: &mut String) {
    if run.is_empty() {
        return;
    }

    // `encoding_rs` only decodes UTF-16, its encoders for it output UTF-8.
    if charset == UTF_16BE || charset == UTF_16LE {
        for unit in run.encode_utf16() {
            let bytes = if charset == UTF_16BE {
                unit.to_be_bytes()
            } else {
                unit.to_le_bytes()
            };
            bytes.iter().for_each(|&x| buf.push_str(encode_byte(x)));
        }
        return;
    }

    if charset.output_encoding() == UTF_8 {
        run.bytes().for_each(|x| buf.push_str(encode_byte(x)));
        return;
    }

    let mut encoder = charset.new_encoder();
    let mut bytes = Vec::with_capacity(run.len() * 2);
    let mut src = run;
    loop {
        let (result, read) =
            encoder.encode_from_utf8_to_vec_without_replacement(src, &mut bytes, true);
        src = &src[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => {
                let additional = encoder
                    .max_buffer_length_from_utf8_without_replacement(src.len())
                    .unwrap_or(src.len() * 4 + 16);
                bytes.reserve(additional);
            }
            EncoderResult::Unmappable(_) => bytes.push(b'?'),
        }
    }
    bytes.iter().for_each(|&x| buf.push_str(encode_byte(x)));
}
