//! End-to-end integration tests for lzs.
//!
//! Exercises the public entry points with synthetic data.

use std::process::Command;

use lzs::{
    compress, compress_with_header, compress_with_stats, decompress, decompress_all,
    decompress_all_with_header, decompress_all_with_length, try_decompress,
    try_decompress_all_with_header, BatchCodec, BatchConfig, Error, Token, TokenReader,
};

// ============================================================================
// Test Data Generators
// ============================================================================

/// Generate random data using a simple PRNG
fn generate_random_data(size: usize, seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let mut state = seed;
    for _ in 0..size {
        // Simple xorshift PRNG
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        data.push((state & 0xFF) as u8);
    }
    data
}

/// Generate highly repetitive data (good compression)
fn generate_repetitive_data(size: usize) -> Vec<u8> {
    let pattern = b"ABCDABCDABCDABCD";
    pattern.iter().cycle().take(size).copied().collect()
}

/// Generate data with mixed patterns (moderate compression)
fn generate_mixed_data(size: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size);
    let patterns = [
        b"VERTEX 0.125 0.500 -1.000\n".as_slice(),
        b"\x00\x00\x80\x3f\x00\x00\x00\x00".as_slice(),
        b"BONE pelvis parent=root\n".as_slice(),
    ];

    let mut noise = generate_random_data(size / 8 + 1, 4242).into_iter();
    let mut pattern_idx = 0;
    while data.len() < size {
        let pattern = patterns[pattern_idx % patterns.len()];
        let remaining = size - data.len();
        let chunk_size = remaining.min(pattern.len());
        data.extend_from_slice(&pattern[..chunk_size]);
        if let Some(b) = noise.next() {
            if data.len() < size {
                data.push(b);
            }
        }
        pattern_idx += 1;
    }
    data
}

fn round_trip(data: &[u8]) {
    let coded = compress(data);
    assert_eq!(decompress_all(&coded), data, "round trip failed for {} bytes", data.len());
}

// ============================================================================
// Round Trip
// ============================================================================

#[test]
fn test_round_trip_empty() {
    assert!(compress(&[]).is_empty());
    assert!(decompress_all(&[]).is_empty());
}

#[test]
fn test_round_trip_single_byte() {
    round_trip(&[0x42]);
    round_trip(&[0x00]);
}

#[test]
fn test_round_trip_short_inputs() {
    for len in 1..64 {
        round_trip(&generate_random_data(len, len as u64 + 1));
        round_trip(&generate_repetitive_data(len));
    }
}

#[test]
fn test_round_trip_exactly_one_window() {
    round_trip(&generate_mixed_data(4096));
}

#[test]
fn test_round_trip_larger_than_window() {
    round_trip(&generate_random_data(20_000, 12345));
    round_trip(&generate_mixed_data(50_000));
    round_trip(&generate_repetitive_data(10_000));
}

#[test]
fn test_round_trip_no_repeats() {
    let data: Vec<u8> = (0..=255u8).collect();
    let coded = compress(&data);
    // Nothing repeats: every token is a literal, one control byte per 8
    assert_eq!(coded.len(), 256 + 32);
    assert_eq!(decompress_all(&coded), data);
}

#[test]
fn test_round_trip_long_runs() {
    let mut data = vec![0xAA; 3000];
    data.extend(vec![0x00; 5000]);
    data.extend(generate_random_data(100, 7));
    data.extend(vec![0xFF; 9000]);
    round_trip(&data);
}

#[test]
fn test_round_trip_distant_repeat() {
    // A phrase repeated just inside and just outside the window
    let phrase = b"skeleton::bone[12].rotation";
    let mut data = phrase.to_vec();
    data.extend(generate_random_data(4000, 99));
    data.extend_from_slice(phrase);
    data.extend(generate_random_data(200, 100));
    data.extend_from_slice(phrase);
    round_trip(&data);
}

// ============================================================================
// Bounded Decode
// ============================================================================

#[test]
fn test_bounded_decode_returns_prefix() {
    let data = generate_mixed_data(10_000);
    let coded = compress(&data);
    for max in [0, 1, 17, 18, 19, 100, 4095, 4096, 9_999, 10_000, 15_000] {
        let out = decompress(&coded, max);
        let expected = max.min(data.len());
        assert_eq!(out.len(), expected, "max = {}", max);
        assert_eq!(out, &data[..expected]);
    }
}

#[test]
fn test_bounded_decode_inside_run() {
    let data = vec![b'z'; 5000];
    let coded = compress(&data);
    for max in [1, 2, 3, 10, 19, 20, 4999] {
        assert_eq!(decompress(&coded, max), vec![b'z'; max]);
    }
}

// ============================================================================
// Framing
// ============================================================================

#[test]
fn test_framing_inverse() {
    for data in [Vec::new(), vec![1], generate_mixed_data(7000), generate_random_data(5000, 3)] {
        let framed = compress_with_header(&data);
        let coded_len = u32::from_le_bytes([framed[0], framed[1], framed[2], framed[3]]);
        assert_eq!(coded_len as usize, framed.len() - 4);
        assert_eq!(decompress_all_with_header(&framed), data);
    }
}

#[test]
fn test_framing_empty_input_is_bare_header() {
    assert_eq!(compress_with_header(&[]), vec![0, 0, 0, 0]);
}

#[test]
fn test_malformed_header_returns_empty() {
    assert!(decompress_all_with_header(&[]).is_empty());
    assert!(decompress_all_with_header(&[0x01, 0x00, 0x00]).is_empty());

    let mut framed = compress_with_header(&generate_mixed_data(2000));
    framed.push(0x00);
    assert!(decompress_all_with_header(&framed).is_empty());

    framed.truncate(framed.len() - 2);
    assert!(decompress_all_with_header(&framed).is_empty());
}

#[test]
fn test_malformed_header_errors() {
    assert!(matches!(try_decompress_all_with_header(&[0x00]), Err(Error::HeaderTooShort(1))));
    assert!(matches!(
        try_decompress_all_with_header(&[0x02, 0x00, 0x00, 0x00, 0x01]),
        Err(Error::LengthMismatch { expected: 2, found: 1 })
    ));
}

// ============================================================================
// Guards and Malformed Input
// ============================================================================

#[test]
fn test_expansion_ratio_guard() {
    let garbage = generate_random_data(3, 555);
    // 3 coded bytes allow at most 2000 * 3 - 10 output bytes
    assert!(decompress(&garbage, 6000).is_empty());
    assert!(matches!(
        try_decompress(&garbage, 6000),
        Err(Error::ExpansionRatioExceeded { requested: 6000, coded_len: 3 })
    ));
    assert!(try_decompress(&garbage, 5990).is_ok());
    assert!(decompress(&[], 0).is_empty());
}

#[test]
fn test_truncated_stream_yields_prefix() {
    let data = generate_mixed_data(3000);
    let coded = compress(&data);
    for cut in [1, 2, 3, coded.len() / 2, coded.len() - 1] {
        let out = decompress_all(&coded[..cut]);
        assert!(out.len() <= data.len());
        assert_eq!(out, &data[..out.len()], "cut at {}", cut);
    }
}

#[test]
fn test_explicit_length_limits_coded_input() {
    let data = generate_mixed_data(3000);
    let coded = compress(&data);
    assert_eq!(decompress_all_with_length(&coded, coded.len()), data);
    assert_eq!(decompress_all_with_length(&coded, usize::MAX), data);
    let half = decompress_all_with_length(&coded, coded.len() / 2);
    assert_eq!(half, decompress_all(&coded[..coded.len() / 2]));
}

#[test]
fn test_garbage_never_panics() {
    for seed in 1..200u64 {
        let garbage = generate_random_data(seed as usize * 7, seed);
        let _ = decompress_all(&garbage);
        let _ = decompress(&garbage, 1000);
        let _ = decompress_all_with_header(&garbage);
    }
}

// ============================================================================
// Wire Format
// ============================================================================

#[test]
fn test_run_length_compresses_dramatically() {
    let data = vec![0x7E; 5000];
    let (coded, stats) = compress_with_stats(&data);
    assert!(coded.len() < 700, "coded {} bytes", coded.len());
    assert_eq!(stats.literals, 1);
    assert_eq!(decompress_all(&coded), data);
}

#[test]
fn test_run_uses_self_overlapping_match() {
    let coded = compress(&[b'r'; 40]);
    let tokens: Vec<Token> = TokenReader::new(&coded).collect();
    assert_eq!(tokens[0], Token::Literal(b'r'));
    // The first match starts at the literal just written and overlaps its own output
    assert_eq!(tokens[1], Token::Match { position: 4078, length: 18 });
}

#[test]
fn test_literal_fallback_for_increasing_bytes() {
    let coded = compress(&[0x10, 0x11, 0x12]);
    assert_eq!(coded, vec![0b0000_0111, 0x10, 0x11, 0x12]);
}

#[test]
fn test_known_vector() {
    // Six literals, then a 12-byte match back to window position 4078 (0xFEE)
    let coded = compress(b"abcdefabcdefabcdef");
    assert_eq!(coded, vec![0x3F, b'a', b'b', b'c', b'd', b'e', b'f', 0xEE, 0xF9]);
    assert_eq!(decompress_all(&coded), b"abcdefabcdefabcdef");
}

#[test]
fn test_compression_is_deterministic() {
    let data = generate_mixed_data(30_000);
    assert_eq!(compress(&data), compress(&data));
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_concurrent_calls_are_independent() {
    let inputs: Vec<Vec<u8>> =
        (0..16).map(|i| generate_mixed_data(5000 + i * 311)).collect();
    let expected: Vec<Vec<u8>> = inputs.iter().map(|d| compress(d)).collect();

    crossbeam::scope(|scope| {
        for (input, coded) in inputs.iter().zip(&expected) {
            scope.spawn(move |_| {
                for _ in 0..4 {
                    assert_eq!(&compress(input), coded);
                    assert_eq!(&decompress_all(coded), input);
                }
            });
        }
    })
    .unwrap();
}

#[test]
fn test_batch_auto_threads() {
    let inputs: Vec<Vec<u8>> = (0..25).map(|i| generate_random_data(1000 + i * 50, i as u64 + 1)).collect();
    let codec = BatchCodec::new(BatchConfig::default());
    let coded = codec.compress_all(&inputs).unwrap();
    assert_eq!(codec.decompress_all(&coded).unwrap(), inputs);
}

// ============================================================================
// Binary CLI Tests (if binary is built)
// ============================================================================

#[test]
#[ignore] // Run with --ignored flag when binary is available
fn test_cli_round_trip() {
    let data = generate_mixed_data(20_000);
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join("asset.bin");
    let lzs_path = dir.path().join("asset.lzs");
    let out_path = dir.path().join("asset.out");
    std::fs::write(&raw_path, &data).unwrap();

    let status = Command::new("cargo")
        .args(["run", "--bin", "lzs", "--", "--header", "--verify", "-i"])
        .arg(&raw_path)
        .arg("-o")
        .arg(&lzs_path)
        .status()
        .expect("Failed to run CLI");
    assert!(status.success());

    let framed = std::fs::read(&lzs_path).unwrap();
    assert_eq!(framed, compress_with_header(&data));

    let status = Command::new("cargo")
        .args(["run", "--bin", "lzs", "--", "-d", "--header", "-i"])
        .arg(&lzs_path)
        .arg("-o")
        .arg(&out_path)
        .status()
        .expect("Failed to run CLI");
    assert!(status.success());
    assert_eq!(std::fs::read(&out_path).unwrap(), data);
}

#[test]
#[ignore] // Run with --ignored flag when binary is available
fn test_cli_rejects_bad_header() {
    let dir = tempfile::tempdir().unwrap();
    let bad_path = dir.path().join("bad.lzs");
    std::fs::write(&bad_path, [0x10, 0x00, 0x00, 0x00, 0x01]).unwrap();

    let output = Command::new("cargo")
        .args(["run", "--bin", "lzs", "--", "-d", "--header", "-i"])
        .arg(&bad_path)
        .arg("-o")
        .arg(dir.path().join("bad.out"))
        .output()
        .expect("Failed to run CLI");

    assert!(!output.status.success(), "CLI should fail on a mismatched length prefix");
}
