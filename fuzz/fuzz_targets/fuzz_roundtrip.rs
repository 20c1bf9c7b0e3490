#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Limit data size to avoid slowdowns
    let data = if data.len() > 64 * 1024 { &data[..64 * 1024] } else { data };

    let coded = lzs::compress(data);
    assert_eq!(lzs::decompress_all(&coded), data, "Round-trip mismatch");

    let framed = lzs::compress_with_header(data);
    assert_eq!(lzs::decompress_all_with_header(&framed), data, "Framed round-trip mismatch");
});
