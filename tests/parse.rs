use url_builder::{ErrorKind, PathSegment, Query, Url, UTF_16BE};

fn seg(segment: &str, params: &[(&str, &str)]) -> PathSegment {
    PathSegment::with_matrix(segment, params.iter().copied())
}

#[test]
fn parse_all_parts() {
    let u = Url::parse(
        "https://foo.bar.com:3333/foo/ba%20r;mtx1=val1;mtx2=val%202/seg%203;m2=v2?q1=v1&q2=v%202#zomg%20it's%20a%20fragment",
    )
    .unwrap();
    assert_eq!(u.scheme(), "https");
    assert_eq!(u.host(), "foo.bar.com");
    assert_eq!(u.port(), Some(3333));
    assert_eq!(
        u.path(),
        [
            seg("foo", &[]),
            seg("ba r", &[("mtx1", "val1"), ("mtx2", "val 2")]),
            seg("seg 3", &[("m2", "v2")]),
        ]
    );
    assert_eq!(
        u.query(),
        Some(&Query::structured([("q1", "v1"), ("q2", "v 2")]))
    );
    assert_eq!(u.fragment(), Some("zomg it's a fragment"));
}

#[test]
fn parse_minimal() {
    let u = Url::parse("http://foo.com").unwrap();
    assert_eq!(u, Url::builder("http", "foo.com").build());

    let u = Url::parse("http://foo.com/").unwrap();
    assert!(u.path().is_empty());

    let u = Url::parse("http://foo.com:").unwrap();
    assert_eq!(u.port(), None);

    // No "://".
    let u = Url::parse("foo").unwrap();
    assert_eq!(u.scheme(), "foo");
    assert_eq!(u.host(), "");
}

#[test]
fn parse_path() {
    let u = Url::parse("http://foo.com/foo//bar/").unwrap();
    assert_eq!(u.path(), [seg("foo", &[]), seg("bar", &[])]);

    let u = Url::parse("http://foo.com/foo;").unwrap();
    assert_eq!(u.path(), [seg("foo", &[])]);

    let u = Url::parse("http://foo.com/foo;;m=v;").unwrap();
    assert_eq!(u.path(), [seg("foo", &[("m", "v")])]);

    let u = Url::parse("http://foo.com/;m1=v1;m1=v2").unwrap();
    assert_eq!(u.path(), [seg("", &[("m1", "v1"), ("m1", "v2")])]);

    let u = Url::parse("http://foo.com/foo/;m1=").unwrap();
    assert_eq!(u.path(), [seg("foo", &[]), seg("", &[("m1", "")])]);

    // Delimiters are decoded after splitting.
    let u = Url::parse("https://localhost/schedules/21%2F5/a%3Bb%3Dc").unwrap();
    assert_eq!(
        u.path(),
        [seg("schedules", &[]), seg("21/5", &[]), seg("a;b=c", &[])]
    );

    // `+` is not a space.
    let u = Url::parse("http://foo.com/a+b").unwrap();
    assert_eq!(u.path()[0].segment(), "a+b");
}

#[test]
fn parse_query() {
    let u = Url::parse("http://foo.com?foo=bar&foo=bar2").unwrap();
    assert_eq!(
        u.query(),
        Some(&Query::structured([("foo", "bar"), ("foo", "bar2")]))
    );
    assert_eq!(u.query().and_then(|q| q.get("foo")), Some("bar"));

    let u = Url::parse("http://foo.com/foo?q1=v1=v2").unwrap();
    assert_eq!(u.query(), Some(&Query::unstructured("q1=v1=v2")));
    assert_eq!(u.query().and_then(Query::params), None);

    let u = Url::parse("http://foo.com/foo?q1=v1&q2").unwrap();
    assert_eq!(u.query(), Some(&Query::unstructured("q1=v1&q2")));

    let u = Url::parse("http://foo.com/foo?query==&%23").unwrap();
    assert_eq!(u.query(), Some(&Query::unstructured("query==&#")));

    let u = Url::parse("http://foo.com/foo?q1=%3Dv1&%26q2=v2").unwrap();
    assert_eq!(
        u.query(),
        Some(&Query::structured([("q1", "=v1"), ("&q2", "v2")]))
    );

    let u = Url::parse("http://foo.com?").unwrap();
    assert_eq!(u.query(), None);

    let u = Url::parse("http://foo.com?#").unwrap();
    assert_eq!(u.query(), None);
    assert_eq!(u.fragment(), Some(""));
}

#[test]
fn parse_host() {
    let u = Url::parse("http://snow%E2%98%83man:80").unwrap();
    assert_eq!(u.host(), "snow\u{2603}man");

    let u = Url::parse("http://[2001:db8::7]:8080/c=GB").unwrap();
    assert_eq!(u.host(), "[2001:db8::7]");
    assert_eq!(u.port(), Some(8080));
    assert_eq!(u.path(), [seg("c=GB", &[])]);

    // An unclosed bracket stops at the path.
    let u = Url::parse("http://[foo/bar]?q=1").unwrap();
    assert_eq!(u.host(), "[foo");
    assert_eq!(u.path(), [seg("bar]", &[])]);
    assert_eq!(u.query(), Some(&Query::structured([("q", "1")])));

    let u = Url::parse("http://127.0.0.1?q").unwrap();
    assert_eq!(u.host(), "127.0.0.1");
    assert_eq!(u.query(), Some(&Query::unstructured("q")));
}

#[test]
fn parse_with_charset() {
    let u = Url::parse_with("http://snow%E2%98%83man/%26%03?%26%03=%D8%34%DD%1E#%26%03", UTF_16BE)
        .unwrap();
    // The host is always UTF-8.
    assert_eq!(u.host(), "snow\u{2603}man");
    assert_eq!(u.path()[0].segment(), "\u{2603}");
    assert_eq!(
        u.query(),
        Some(&Query::structured([("\u{2603}", "\u{1d11e}")]))
    );
    assert_eq!(u.fragment(), Some("\u{2603}"));
}

#[test]
fn parse_error() {
    let e = Url::parse("http://foo.com/fo%2o").unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidOctet);
    assert_eq!(e.to_string(), "Invalid %-tuple <%2o>");

    let e = Url::parse("http://foo.com/foo;m1=v1=v2").unwrap_err();
    assert_eq!(e.kind(), ErrorKind::MalformedMatrixParam);
    assert_eq!(e.to_string(), "Malformed matrix param: <m1=v1=v2>");

    let e = Url::parse("http://foo.com/foo;m1").unwrap_err();
    assert_eq!(e.kind(), ErrorKind::MalformedMatrixParam);
    assert_eq!(e.fragment(), "m1");

    let e = Url::parse("http://foo.com:http/").unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidPort);

    let e = Url::parse("http://foo.com/%E2%98").unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidBytes);

    let e = Url::parse("http://foo.com?q=%").unwrap_err();
    assert_eq!(e.kind(), ErrorKind::IncompleteOctet);
    assert_eq!(e.index(), 2);

    assert!("http://foo.com#%zz".parse::<Url>().is_err());
}
