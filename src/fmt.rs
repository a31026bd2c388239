use crate::{
    ip,
    pct_enc::{encode, encode_with, Component},
    Query, Url,
};
use encoding_rs::{Encoding, UTF_8};
use std::fmt;

impl Url {
    /// Serializes the URL, encoding components as UTF-8.
    ///
    /// The output is valid RFC 3986 syntax. The path is empty when there are
    /// no segments and has no trailing slash.
    #[must_use]
    pub fn to_url_string(&self) -> String {
        self.encode_with(UTF_8, false)
    }

    /// Serializes the URL with a `/` after the last path segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use url_builder::Url;
    ///
    /// let url = Url::parse("https://foo.com/a/b/c?foo=bar")?;
    /// assert_eq!(url.to_url_string_with_trailing_slash(), "https://foo.com/a/b/c/?foo=bar");
    /// # Ok::<_, url_builder::Error>(())
    /// ```
    #[must_use]
    pub fn to_url_string_with_trailing_slash(&self) -> String {
        self.encode_with(UTF_8, true)
    }

    /// Serializes the URL, encoding components other than the host with the given charset.
    ///
    /// A host that is an IPv4 address or a bracketed IPv6 address is written
    /// as-is. Any other host is encoded as UTF-8.
    #[must_use]
    pub fn encode_with(&self, charset: &'static Encoding, force_trailing_slash: bool) -> String {
        let mut buf = String::with_capacity(self.scheme.len() + self.host.len() + 16);
        buf.push_str(&self.scheme);
        buf.push_str("://");

        if ip::is_v4_literal(&self.host) || ip::is_v6_literal(&self.host) {
            buf.push_str(&self.host);
        } else {
            buf.push_str(&encode(&self.host, Component::RegName));
        }

        if let Some(port) = self.port {
            buf.push(':');
            buf.push_str(&port.to_string());
        }

        for seg in &self.path {
            buf.push('/');
            buf.push_str(&encode_with(seg.segment(), Component::Path, charset));
            for (name, value) in seg.matrix_params() {
                buf.push(';');
                buf.push_str(&encode_with(name, Component::Matrix, charset));
                buf.push('=');
                buf.push_str(&encode_with(value, Component::Matrix, charset));
            }
        }

        if force_trailing_slash {
            buf.push('/');
        }

        match &self.query {
            Some(Query::Structured(params)) => {
                buf.push('?');
                for (i, (name, value)) in params.iter().enumerate() {
                    if i != 0 {
                        buf.push('&');
                    }
                    buf.push_str(&encode_with(name, Component::QueryParam, charset));
                    buf.push('=');
                    buf.push_str(&encode_with(value, Component::QueryParam, charset));
                }
            }
            Some(Query::Unstructured(query)) => {
                buf.push('?');
                buf.push_str(&encode_with(query, Component::UnstructuredQuery, charset));
            }
            None => {}
        }

        if let Some(fragment) = &self.fragment {
            buf.push('#');
            buf.push_str(&encode_with(fragment, Component::Fragment, charset));
        }
        buf
    }
}

impl fmt::Display for Url {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_url_string())
    }
}
