use url_builder::{Url, UTF_16BE};

const CASES: &[(&str, &str)] = &[
    (
        "https://foo.bar.com:3333/foo/ba%20r;mtx1=val1;mtx2=val%202/seg%203;m2=v2?q1=v1&q2=v%202#zomg%20it's%20a%20fragment",
        "",
    ),
    ("http://foo.com", ""),
    ("http://foo.com/", "http://foo.com"),
    ("http://foo.com:1234", ""),
    ("http://foo.com/foo//", "http://foo.com/foo"),
    ("http://f%20oo.com/bar", ""),
    ("http://foo.com/foo/b%20ar", ""),
    ("http://foo.com/foo;m1=v1;m%202=v%202", ""),
    ("http://foo.com/foo?q%201=v%202&q2=v2", ""),
    ("http://foo.com/foo?q1=%3Dv1&%26q2=v2", ""),
    ("http://foo.com/foo#b%20ar", ""),
    ("http://foo.com/foo/;m1=v1", ""),
    ("http://foo.com/;m1=v1", ""),
    ("http://foo.com/;m1=v1;m2=v2", ""),
    ("http://foo.com/foo;", "http://foo.com/foo"),
    ("http://foo.com/foo?q1=v1=v2", ""),
    ("http://foo.com/foo?q1=v1&q2", ""),
    ("http://foo.com/foo?query==&%23", ""),
    ("https://localhost/schedules/21%2F5/delete", ""),
    ("http://127.0.0.1", ""),
    ("http://[::1]", ""),
    ("http://[::1]:8080/a", ""),
    ("http://foo.com#", ""),
    ("http://foo.com?", "http://foo.com"),
    ("http://foo.com/a%2b+b", "http://foo.com/a++b"),
    ("http://foo.com;m=v", "http://foo.com/;m=v"),
];

#[test]
fn round_trip() {
    for &(input, expected) in CASES {
        let expected = if expected.is_empty() { input } else { expected };
        let url = Url::parse(input).unwrap();
        assert_eq!(url.to_url_string(), expected, "{input}");

        // Serialized output is stable.
        let again: Url = expected.parse().unwrap();
        assert_eq!(again.to_url_string(), expected, "{input}");
    }
}

#[test]
fn slash_in_path_segment() {
    let url = Url::builder("https", "localhost")
        .segments(["schedules", "21/5", "delete"])
        .build();
    let s = url.to_url_string();
    assert_eq!(s, "https://localhost/schedules/21%2F5/delete");
    assert_eq!(Url::parse(&s).unwrap(), url);
}

#[test]
fn round_trip_with_charset() {
    let url = Url::builder("http", "foo.com")
        .segment_with_matrix("\u{2603}", [("k", "\u{1d11e}")])
        .query_param("\u{e9}", "v")
        .fragment("\u{2603}")
        .build();
    let s = url.encode_with(UTF_16BE, false);
    assert_eq!(
        s,
        "http://foo.com/%26%03;k=%D8%34%DD%1E?%00%E9=v#%26%03"
    );
    assert_eq!(Url::parse_with(&s, UTF_16BE).unwrap(), url);
}

#[cfg(feature = "serde")]
#[test]
fn serde() {
    let url = Url::parse("http://foo.com/a?b=c").unwrap();
    let value = serde::de::value::StrDeserializer::<serde::de::value::Error>::new(
        "http://foo.com/a?b=c",
    );
    assert_eq!(<Url as serde::Deserialize>::deserialize(value).unwrap(), url);
}
