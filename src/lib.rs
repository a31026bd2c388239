#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms)]

//! An HTTP-oriented URL model with a charset-aware percent-codec.
//!
//! URLs are parsed into a [`Url`] holding decoded components: scheme, host,
//! port, path segments with [matrix parameters], a [`Query`] and a fragment.
//! Serializing a `Url` percent-encodes each component with its own set of safe
//! characters, following [RFC 3986], [RFC 1738] and the [HTML 4] form encoding
//! for query strings, so that the output is what HTTP servers expect.
//!
//! [matrix parameters]: https://datatracker.ietf.org/doc/html/rfc1738#section-3.3
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//! [RFC 1738]: https://datatracker.ietf.org/doc/html/rfc1738/
//! [HTML 4]: http://www.w3.org/TR/html401/interact/forms.html#form-content-type
//!
//! This is not a general URI parser. Parsing is lenient, empty path segments
//! are dropped and no normalization is done beyond that.
//!
//! # Examples
//!
//! ```
//! use url_builder::{Query, Url};
//!
//! let s = "https://foo.bar.com:3333/foo/ba%20r;mtx1=val1;mtx2=val%202/seg%203;m2=v2?q1=v1&q2=v%202#zomg%20it's%20a%20fragment";
//! let url = Url::parse(s)?;
//! assert_eq!(url.path()[1].segment(), "ba r");
//! assert_eq!(url.query(), Some(&Query::structured([("q1", "v1"), ("q2", "v 2")])));
//! assert_eq!(url.to_url_string(), s);
//!
//! // Not a list of name=value pairs.
//! let url = Url::parse("http://foo.com/foo?q1=v1=v2")?;
//! assert_eq!(url.query(), Some(&Query::unstructured("q1=v1=v2")));
//! # Ok::<_, url_builder::Error>(())
//! ```
//!
//! # Charsets
//!
//! Text encodings are [`Encoding`]s from the [`encoding_rs`] crate. UTF-8 is used
//! unless one is passed to a `*_with` function. The host is always UTF-8.
//!
//! # Feature flags
//!
//! All features are disabled by default.
//!
//! - `serde`: Implements `Serialize` and `Deserialize` for [`Url`].
//!
//! - `log`: Emits diagnostics through the [`log`](https://docs.rs/log) crate.

mod build;
mod error;
mod fmt;
mod ip;
mod log;
mod parser;
mod url;

pub mod pct_enc;

pub use build::Builder;
pub use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
pub use error::{Error, ErrorKind};
pub use parser::RawUrl;
pub use url::{PathSegment, Query, Url};
