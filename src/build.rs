//! Fluent URL building.

use crate::{url::collect_pairs, PathSegment, Query, Url};

/// A builder for [`Url`].
///
/// This struct is created by [`Url::builder`] and [`Url::into_builder`].
/// Components are given decoded and encoded on serialization.
///
/// # Examples
///
/// ```
/// use url_builder::Url;
///
/// let url = Url::builder("https", "foo.com")
///     .port(3333)
///     .segment_with_matrix("ba r", [("mtx1", "val1")])
///     .segments(["seg 3", "x"])
///     .query_param("q1", "v1")
///     .query_param("q2", "v 2")
///     .fragment("it's a fragment")
///     .build();
///
/// assert_eq!(
///     url.to_url_string(),
///     "https://foo.com:3333/ba%20r;mtx1=val1/seg%203/x?q1=v1&q2=v%202#it's%20a%20fragment"
/// );
///
/// let url = url.into_builder().reset_path().unstructured_query("a b").build();
/// assert_eq!(url.to_url_string(), "https://foo.com:3333?a%20b#it's%20a%20fragment");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct Builder {
    url: Url,
}

impl Builder {
    pub(crate) fn new(scheme: String, host: String) -> Self {
        Builder {
            url: Url {
                scheme,
                host,
                ..Url::default()
            },
        }
    }

    /// Sets the scheme.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.url.scheme = scheme.into();
        self
    }

    /// Sets the decoded host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.url.host = host.into();
        self
    }

    /// Sets the port.
    pub fn port(mut self, port: u16) -> Self {
        self.url.port = Some(port);
        self
    }

    /// Removes the port.
    pub fn reset_port(mut self) -> Self {
        self.url.port = None;
        self
    }

    /// Appends a path segment.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.url.path.push(PathSegment::new(segment));
        self
    }

    /// Appends a path segment with matrix parameters.
    pub fn segment_with_matrix<I, K, V>(mut self, segment: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.url
            .path
            .push(PathSegment::with_matrix(segment, params));
        self
    }

    /// Appends path segments.
    pub fn segments<I>(mut self, segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PathSegment>,
    {
        self.url.path.extend(segments.into_iter().map(Into::into));
        self
    }

    /// Removes all path segments.
    pub fn reset_path(mut self) -> Self {
        self.url.path.clear();
        self
    }

    /// Replaces the query with the given parameters.
    pub fn query_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.url.query = Some(Query::Structured(collect_pairs(params)));
        self
    }

    /// Appends a query parameter.
    ///
    /// An unstructured query is replaced.
    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let pair = (name.into(), value.into());
        match &mut self.url.query {
            Some(Query::Structured(params)) => params.push(pair),
            query => *query = Some(Query::Structured(vec![pair])),
        }
        self
    }

    /// Replaces the query with a query of arbitrary structure.
    pub fn unstructured_query(mut self, query: impl Into<String>) -> Self {
        self.url.query = Some(Query::Unstructured(query.into()));
        self
    }

    /// Removes the query.
    pub fn reset_query(mut self) -> Self {
        self.url.query = None;
        self
    }

    /// Sets the decoded fragment.
    pub fn fragment(mut self, fragment: impl Into<String>) -> Self {
        self.url.fragment = Some(fragment.into());
        self
    }

    /// Removes the fragment.
    pub fn reset_fragment(mut self) -> Self {
        self.url.fragment = None;
        self
    }

    /// Builds the URL.
    #[must_use]
    pub fn build(self) -> Url {
        self.url
    }

    /// Builds the URL and serializes it.
    #[must_use]
    pub fn to_url_string(&self) -> String {
        self.url.to_url_string()
    }
}

impl From<Url> for Builder {
    fn from(url: Url) -> Self {
        Builder { url }
    }
}
