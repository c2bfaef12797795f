#![no_main]

use libfuzzer_sys::fuzz_target;
use nova_access_format::{parse_with, to_string, FormatConfig};

const MAX_INPUT_SIZE: usize = 256 * 1024;

fuzz_target!(|data: &[u8]| {
    let data = &data[..data.len().min(MAX_INPUT_SIZE)];
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Goal: never panic on malformed input, and anything accepted must survive a
    // write/read cycle unchanged.
    let Ok(parsed) = parse_with(text, &FormatConfig::lenient()) else {
        return;
    };
    let written = to_string(&parsed.set);
    let reread = nova_access_format::parse(&written).expect("written output must parse");
    assert_eq!(reread, parsed.set);
});
