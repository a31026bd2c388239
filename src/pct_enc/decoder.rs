use super::read_octet;
use crate::{
    error::{Error, ErrorKind, Result},
    log::debug,
};
use encoding_rs::{Encoding, UTF_8};
use std::borrow::Cow;

/// Decodes a percent-encoded string as UTF-8.
///
/// Characters other than `%` are copied as-is, including `+`.
///
/// # Errors
///
/// Returns `Err` if a `%` is not followed by two hexadecimal digits
/// or if the decoded bytes are not valid UTF-8.
///
/// # Examples
///
/// ```
/// use url_builder::{pct_enc, ErrorKind};
///
/// assert_eq!(pct_enc::decode("a%2Fb+c")?, "a/b+c");
///
/// let e = pct_enc::decode("fo%2o").unwrap_err();
/// assert_eq!(e.kind(), ErrorKind::InvalidOctet);
/// assert_eq!(e.to_string(), "Invalid %-tuple <%2o>");
/// # Ok::<_, url_builder::Error>(())
/// ```
pub fn decode(s: &str) -> Result<Cow<'_, str>> {
    decode_with(s, UTF_8)
}

/// Decodes a percent-encoded string with the given charset.
///
/// Each maximal run of percent-encoded octets is decoded as a whole, so that
/// multi-byte sequences split across octets are reassembled.
///
/// # Errors
///
/// Returns `Err` if a `%` is not followed by two hexadecimal digits
/// or if the decoded bytes are not valid in the charset.
pub fn decode_with<'a>(s: &'a str, charset: &'static Encoding) -> Result<Cow<'a, str>> {
    // Skip bytes that are not '%'.
    let Some(i) = s.bytes().position(|x| x == b'%') else {
        return Ok(Cow::Borrowed(s));
    };

    let mut decoder = Decoder {
        src: s,
        charset,
        out: String::with_capacity(s.len()),
        octets: Vec::new(),
        run_start: i,
    };
    decoder.out.push_str(&s[..i]);
    decoder.run(i)?;
    Ok(Cow::Owned(decoder.out))
}

struct Decoder<'a> {
    src: &'a str,
    charset: &'static Encoding,
    out: String,
    // Octets of the current run, pending conversion to characters.
    octets: Vec<u8>,
    run_start: usize,
}

impl Decoder<'_> {
    fn run(&mut self, mut i: usize) -> Result<()> {
        let s = self.src;
        while i < s.len() {
            if s.as_bytes()[i] == b'%' {
                if self.octets.is_empty() {
                    self.run_start = i;
                }
                let x = read_octet(s, i)?;
                self.octets.push(x);
                i += 3;
            } else {
                self.flush(i)?;
                // Copy up to the next '%'.
                let end = s[i..].find('%').map_or(s.len(), |j| i + j);
                self.out.push_str(&s[i..end]);
                i = end;
            }
        }
        self.flush(s.len())
    }

    fn flush(&mut self, end: usize) -> Result<()> {
        if self.octets.is_empty() {
            return Ok(());
        }
        match self
            .charset
            .decode_without_bom_handling_and_without_replacement(&self.octets)
        {
            Some(chars) => self.out.push_str(&chars),
            None => {
                let run = &self.src[self.run_start..end];
                debug!("malformed {} sequence: {run}", self.charset.name());
                return Err(Error::new(ErrorKind::InvalidBytes, self.run_start, run));
            }
        }
        self.octets.clear();
        Ok(())
    }
}
