#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use npm_locate::index::{PackageRecord, decode_line, encode_record};

#[derive(Arbitrary, Debug)]
struct Input {
    name: String,
    description: String,
    keywords: Vec<String>,
    raw_line: String,
}

fuzz_target!(|input: Input| {
    // Decoding arbitrary text must never panic
    let _ = decode_line(&input.raw_line);

    let record = PackageRecord {
        name: input.name,
        description: input.description,
        keywords: input.keywords,
    };
    let line = encode_record(&record);
    assert!(!line.contains('\n') && !line.contains('\r'));

    // Without spaces or pipes the name can't collide with the delimiter
    if !record.name.contains([' ', '|', '\n', '\r']) {
        assert_eq!(decode_line(&line).name, record.name);
    }
});
