use crate::{build::Builder, error::Result, parser::RawUrl, Error};
use encoding_rs::{Encoding, UTF_8};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A URL of the form `scheme://host:port/path;matrix?query#fragment`.
///
/// Every component is stored decoded. Percent-encoding happens when the URL
/// is serialized and percent-decoding when it is parsed, with a separate set
/// of safe characters for each component.
///
/// # Examples
///
/// Parse and inspect a URL:
///
/// ```
/// use url_builder::{Query, Url};
///
/// let url = Url::parse("https://foo.com:8080/a%20b;k=v?q=1&q=2#frag")?;
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host(), "foo.com");
/// assert_eq!(url.port(), Some(8080));
/// assert_eq!(url.path()[0].segment(), "a b");
/// assert_eq!(url.path()[0].matrix_params(), [("k".to_owned(), "v".to_owned())]);
/// assert_eq!(url.query().and_then(|q| q.get("q")), Some("1"));
/// assert_eq!(url.fragment(), Some("frag"));
///
/// assert_eq!(url.to_url_string(), "https://foo.com:8080/a%20b;k=v?q=1&q=2#frag");
/// # Ok::<_, url_builder::Error>(())
/// ```
///
/// Build a URL from scratch:
///
/// ```
/// use url_builder::Url;
///
/// let url = Url::builder("http", "foo.com")
///     .segment("seg/;?ment")
///     .query_param("foo", "bar&=#baz")
///     .fragment("#frag/?")
///     .build();
/// assert_eq!(
///     url.to_url_string(),
///     "http://foo.com/seg%2F%3B%3Fment?foo=bar%26%3D%23baz#%23frag/?"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Url {
    pub(crate) scheme: String,
    pub(crate) host: String,
    pub(crate) port: Option<u16>,
    pub(crate) path: Vec<PathSegment>,
    pub(crate) query: Option<Query>,
    pub(crate) fragment: Option<String>,
}

impl Url {
    /// Parses a URL from a string, decoding components as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a component contains a malformed percent-encoded
    /// octet, if a matrix parameter is not a single `name=value` pair or if
    /// the port is not a number.
    pub fn parse(s: &str) -> Result<Self> {
        Self::parse_with(s, UTF_8)
    }

    /// Parses a URL from a string, decoding components other than the host
    /// with the given charset.
    ///
    /// The host is always decoded as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns `Err` on the same conditions as [`parse`](Self::parse), or if
    /// decoded bytes are not valid in the charset.
    pub fn parse_with(s: &str, charset: &'static Encoding) -> Result<Self> {
        RawUrl::split(s)?.decode(charset)
    }

    /// Creates a builder for a URL with the given scheme and host.
    pub fn builder(scheme: impl Into<String>, host: impl Into<String>) -> Builder {
        Builder::new(scheme.into(), host.into())
    }

    /// Converts the URL into a builder for editing.
    pub fn into_builder(self) -> Builder {
        Builder::from(self)
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the decoded host.
    ///
    /// An IPv6 host keeps its enclosing square brackets.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the path segments.
    #[must_use]
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// Returns the query.
    #[must_use]
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Returns the decoded fragment.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }
}

impl FromStr for Url {
    type Err = Error;

    /// Equivalent to [`Url::parse`].
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Url {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_url_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Url {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Url::parse(&s)
            .map_err(|e| de::Error::custom(format_args!("failed to parse {s:?} as URL: {e}")))
    }
}

/// A path segment with its matrix parameters.
///
/// A segment with an empty name and some matrix parameters is rendered as
/// `/;name=value`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PathSegment {
    segment: String,
    matrix_params: Vec<(String, String)>,
}

impl PathSegment {
    /// Creates a path segment without matrix parameters.
    pub fn new(segment: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            matrix_params: Vec::new(),
        }
    }

    /// Creates a path segment with the given matrix parameters, in order.
    pub fn with_matrix<I, K, V>(segment: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            segment: segment.into(),
            matrix_params: collect_pairs(params),
        }
    }

    /// Returns the decoded segment.
    #[must_use]
    pub fn segment(&self) -> &str {
        &self.segment
    }

    /// Returns the decoded matrix parameters.
    #[must_use]
    pub fn matrix_params(&self) -> &[(String, String)] {
        &self.matrix_params
    }
}

impl From<&str> for PathSegment {
    fn from(segment: &str) -> Self {
        Self::new(segment)
    }
}

impl From<String> for PathSegment {
    fn from(segment: String) -> Self {
        Self::new(segment)
    }
}

/// The query of a URL.
///
/// Query parameters are a convention of [HTML 4 forms] rather than a part of
/// URL syntax, so a query that cannot be split into `name=value` pairs is kept
/// as a whole.
///
/// [HTML 4 forms]: http://www.w3.org/TR/html401/interact/forms.html#form-content-type
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Query {
    /// Decoded `name=value` pairs, in order and with duplicates.
    Structured(Vec<(String, String)>),
    /// A decoded query of arbitrary structure.
    Unstructured(String),
}

impl Query {
    /// Creates a structured query from `name=value` pairs.
    pub fn structured<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Query::Structured(collect_pairs(params))
    }

    /// Creates an unstructured query.
    pub fn unstructured(query: impl Into<String>) -> Self {
        Query::Unstructured(query.into())
    }

    /// Returns the parameters of a structured query.
    #[must_use]
    pub fn params(&self) -> Option<&[(String, String)]> {
        match self {
            Query::Structured(params) => Some(params),
            Query::Unstructured(_) => None,
        }
    }

    /// Returns the value of the first parameter with the given name in a structured query.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params()?
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

pub(crate) fn collect_pairs<I, K, V>(pairs: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
