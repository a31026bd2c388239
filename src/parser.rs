use crate::{
    error::{Error, ErrorKind, Result},
    log::{debug, trace},
    pct_enc::EStr,
    PathSegment, Query, Url,
};
use encoding_rs::{Encoding, UTF_8};
use std::borrow::Cow;

/// A URL split into its components, not yet decoded.
///
/// Every component except the port is a validated [`EStr`] slice of the input.
/// Splitting never looks inside a component, so the decoded values are free to
/// contain any delimiter.
///
/// # Examples
///
/// ```
/// use url_builder::{RawUrl, UTF_8};
///
/// let raw = RawUrl::split("http://[::1]:8080/a;m=v?q=%20#f")?;
/// assert_eq!(raw.scheme(), "http");
/// assert_eq!(raw.host(), "[::1]");
/// assert_eq!(raw.port(), Some(8080));
/// assert_eq!(raw.path(), "/a;m=v");
/// assert_eq!(raw.query().map(|q| q.as_str()), Some("q=%20"));
/// assert_eq!(raw.fragment().map(|f| f.as_str()), Some("f"));
///
/// let url = raw.decode(UTF_8)?;
/// assert_eq!(url.query().and_then(|q| q.get("q")), Some(" "));
/// # Ok::<_, url_builder::Error>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawUrl<'a> {
    scheme: &'a str,
    host: &'a EStr,
    port: Option<u16>,
    path: &'a EStr,
    query: Option<&'a EStr>,
    fragment: Option<&'a EStr>,
}

struct Reader<'a> {
    s: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.pos).copied()
    }

    fn skip(&mut self, n: usize) {
        self.pos += n;
        debug_assert!(self.pos <= self.s.len());
    }

    // Reads up to the first of the delimiters, leaving it unread.
    fn read_until(&mut self, delims: &[u8]) -> &'a str {
        let (s, start) = (self.s, self.pos);
        self.pos = s.as_bytes()[start..]
            .iter()
            .position(|x| delims.contains(x))
            .map_or(s.len(), |i| start + i);
        &s[start..self.pos]
    }
}

impl<'a> RawUrl<'a> {
    /// Splits a URL string into its components.
    ///
    /// The input is read left to right:
    ///
    /// - The scheme ends at the first `://`. Without it, the whole input is the scheme.
    /// - The host ends at the first of `: # / ; ?`. A host starting with `[`
    ///   extends at least to the first `]` before any `/ ? #`.
    /// - After a `:`, the port ends at the first of `# / ; ?` and may be empty.
    /// - The path ends at the first of `# ?`.
    /// - After a `?`, the query ends at the first `#`.
    /// - After a `#`, the rest is the fragment.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a component contains a malformed percent-encoded octet or if
    /// the port is not a number in the range `0..=65535`. The error index is
    /// relative to the start of the component.
    pub fn split(s: &'a str) -> Result<Self> {
        let Some((scheme, rest)) = s.split_once("://") else {
            return Ok(RawUrl::from_scheme(s));
        };
        let mut reader = Reader { s: rest, pos: 0 };

        if reader.peek() == Some(b'[') {
            let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
            if let Some(i) = rest[..end].find(']') {
                reader.skip(i + 1);
            }
        }
        reader.read_until(b":#/;?");
        let host = EStr::new(&rest[..reader.pos])?;

        let mut port = None;
        if reader.peek() == Some(b':') {
            reader.skip(1);
            let text = reader.read_until(b"#/;?");
            port = parse_port(text)?;
        }

        let path = EStr::new(reader.read_until(b"#?"))?;

        let mut query = None;
        if reader.peek() == Some(b'?') {
            reader.skip(1);
            query = Some(EStr::new(reader.read_until(b"#"))?);
        }

        let mut fragment = None;
        if reader.peek() == Some(b'#') {
            reader.skip(1);
            fragment = Some(EStr::new(&rest[reader.pos..])?);
        }

        let raw = RawUrl {
            scheme,
            host,
            port,
            path,
            query,
            fragment,
        };
        trace!("split {s:?} into {raw:?}");
        Ok(raw)
    }

    fn from_scheme(scheme: &'a str) -> Self {
        RawUrl {
            scheme,
            host: EStr::EMPTY,
            port: None,
            path: EStr::EMPTY,
            query: None,
            fragment: None,
        }
    }

    /// Creates a `RawUrl` from components that were split elsewhere,
    /// such as by another URL library.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a component contains a malformed percent-encoded octet.
    pub fn from_parts(
        scheme: &'a str,
        host: &'a str,
        port: Option<u16>,
        path: &'a str,
        query: Option<&'a str>,
        fragment: Option<&'a str>,
    ) -> Result<Self> {
        Ok(RawUrl {
            scheme,
            host: EStr::new(host)?,
            port,
            path: EStr::new(path)?,
            query: query.map(EStr::new).transpose()?,
            fragment: fragment.map(EStr::new).transpose()?,
        })
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> &'a str {
        self.scheme
    }

    /// Returns the encoded host.
    #[must_use]
    pub fn host(&self) -> &'a EStr {
        self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the encoded path, including matrix parameters.
    #[must_use]
    pub fn path(&self) -> &'a EStr {
        self.path
    }

    /// Returns the encoded query.
    #[must_use]
    pub fn query(&self) -> Option<&'a EStr> {
        self.query
    }

    /// Returns the encoded fragment.
    #[must_use]
    pub fn fragment(&self) -> Option<&'a EStr> {
        self.fragment
    }

    /// Decodes the components into a [`Url`].
    ///
    /// The host is always decoded as UTF-8 and the other components with the
    /// given charset.
    ///
    /// The path is split on `/` with empty segments dropped. Each segment is
    /// split on `;` into its name and matrix parameters, with empty parameters
    /// dropped. The query is structured only when every `&`-separated chunk
    /// contains exactly one `=`. An empty query is no query.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a matrix parameter does not contain exactly one `=`
    /// or if decoded bytes are not valid in the charset.
    pub fn decode(&self, charset: &'static Encoding) -> Result<Url> {
        let host = self.host.decode_with(UTF_8)?.into_owned();

        let path = self
            .path
            .split('/')
            .filter(|seg| !seg.is_empty())
            .map(|seg| decode_segment(seg, charset))
            .collect::<Result<_>>()?;

        let query = match self.query {
            Some(query) if !query.is_empty() => Some(decode_query(query, charset)?),
            _ => None,
        };

        let fragment = match self.fragment {
            Some(fragment) => Some(decode_owned(fragment, charset)?),
            None => None,
        };

        Ok(Url {
            scheme: self.scheme.to_owned(),
            host,
            port: self.port,
            path,
            query,
            fragment,
        })
    }
}

fn parse_port(text: &str) -> Result<Option<u16>> {
    if text.is_empty() {
        return Ok(None);
    }
    if !text.bytes().all(|x| x.is_ascii_digit()) {
        return Err(Error::new(ErrorKind::InvalidPort, 0, text));
    }
    text.parse()
        .map(Some)
        .map_err(|_| Error::new(ErrorKind::InvalidPort, 0, text))
}

fn decode_owned(s: &EStr, charset: &'static Encoding) -> Result<String> {
    s.decode_with(charset).map(Cow::into_owned)
}

fn decode_segment(seg: &EStr, charset: &'static Encoding) -> Result<PathSegment> {
    let mut chunks = seg.split(';');
    let name = chunks.next().unwrap_or_default();

    let mut params = Vec::new();
    let mut offset = name.len() + 1;
    for chunk in chunks {
        let start = offset;
        offset += chunk.len() + 1;
        if chunk.is_empty() {
            continue;
        }

        match chunk.split_once('=') {
            Some((k, v)) if !v.as_str().contains('=') => {
                params.push((decode_owned(k, charset)?, decode_owned(v, charset)?));
            }
            _ => {
                return Err(Error::new(
                    ErrorKind::MalformedMatrixParam,
                    start,
                    chunk.as_str(),
                ))
            }
        }
    }
    Ok(PathSegment::with_matrix(decode_owned(name, charset)?, params))
}

fn decode_query(query: &EStr, charset: &'static Encoding) -> Result<Query> {
    let pairs: Option<Vec<_>> = query
        .split('&')
        .map(|chunk| {
            chunk
                .split_once('=')
                .filter(|(_, v)| !v.as_str().contains('='))
        })
        .collect();

    let Some(pairs) = pairs else {
        debug!("query {query:?} is not a list of name=value pairs, leaving it unstructured");
        return Ok(Query::Unstructured(decode_owned(query, charset)?));
    };

    pairs
        .into_iter()
        .map(|(k, v)| Ok((decode_owned(k, charset)?, decode_owned(v, charset)?)))
        .collect::<Result<_>>()
        .map(Query::Structured)
}
