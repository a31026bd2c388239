#![no_main]
use libfuzzer_sys::fuzz_target;
use url_builder::Url;

fuzz_target!(|data: &str| {
    let Ok(url) = Url::parse(data) else {
        return;
    };
    let s = url.to_url_string();
    let reparsed = Url::parse(&s).unwrap();
    // The query may switch from unstructured to structured, but not the text.
    assert_eq!(s, reparsed.to_url_string());
});
