#![no_main]
use libfuzzer_sys::fuzz_target;
use url_builder::{
    pct_enc::{self, Component},
    UTF_16BE,
};

fuzz_target!(|data: &str| {
    for component in Component::ALL {
        let encoded = pct_enc::encode(data, component);
        assert_eq!(data, pct_enc::decode(&encoded).unwrap());

        let encoded = pct_enc::encode_with(data, component, UTF_16BE);
        assert_eq!(data, pct_enc::decode_with(&encoded, UTF_16BE).unwrap());
    }

    let forced = pct_enc::force_encode(data, url_builder::UTF_8);
    assert_eq!(forced.len(), data.len() * 3);
    assert_eq!(data, pct_enc::decode(&forced).unwrap());
});
