#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary coded input may decode to anything - that's OK
    // We're looking for panics/crashes, not errors
    let all = lzs::decompress_all(data);
    let _ = lzs::decompress_all_with_header(data);

    // A bounded decode must agree with the unbounded one on its prefix
    if data.len() >= 2 {
        let max = u16::from_le_bytes([data[0], data[1]]) as usize;
        let bounded = lzs::decompress(data, max);
        if !bounded.is_empty() {
            assert_eq!(bounded.as_slice(), &all[..bounded.len()]);
        }
    }
});
