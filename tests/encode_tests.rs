//! Tests for the LZWd block encoder
//!
//! These tests exercise the dictionary and the double-lookahead encoder
//! through the public API on hand-checked inputs.

use lzwd::encode::slot_hash;
use lzwd::{
    encode_block, Code, Dictionary, DictionarySize, Encoder, EncoderOptions, LzwdError, Pattern,
    TraceLevel,
};

/// Deterministic pseudo-random bytes
fn noise(len: usize, mut seed: u32) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            (seed >> 16) as u8
        })
        .collect()
}

/// Test the reference examples
#[test]
fn test_reference_examples() -> Result<(), Box<dyn std::error::Error>> {
    let codes = encode_block(b"ABABABAB", DictionarySize::Size4K)?;
    assert_eq!(codes, vec![65, 66, 256, 258]);
    assert!(codes[2..].iter().all(|&c| c >= 256));

    let codes = encode_block(b"aaa", DictionarySize::Size4K)?;
    assert_eq!(codes, vec![97, 256]);

    let codes = encode_block(b"hello", DictionarySize::Size4K)?;
    assert_eq!(codes, b"hello".iter().map(|&b| b as Code).collect::<Vec<_>>());

    Ok(())
}

/// Test that every byte value once in order maps to itself
#[test]
fn test_all_bytes_ascending() -> Result<(), Box<dyn std::error::Error>> {
    let data: Vec<u8> = (0..=255).collect();
    for dict_size in [
        DictionarySize::Size1K,
        DictionarySize::Size2K,
        DictionarySize::Size4K,
    ] {
        let codes = encode_block(&data, dict_size)?;
        let expected: Vec<Code> = data.iter().map(|&b| b as Code).collect();
        assert_eq!(codes, expected);
    }
    Ok(())
}

/// Test the classic LZW sample
#[test]
fn test_tobeornot() -> Result<(), Box<dyn std::error::Error>> {
    let data = b"TOBEORNOTTOBEORTOBEORNOT";
    let encoder = Encoder::default();
    let (codes, book) = encoder.encode_with_codebook(data)?;

    assert_eq!(codes.len(), 16);
    assert_eq!(book.generations(), 1);
    assert_eq!(book.resolve(&codes)?, data);
    Ok(())
}

/// Test that a run is absorbed by the growing lookahead
#[test]
fn test_long_run() -> Result<(), Box<dyn std::error::Error>> {
    let data = vec![b'X'; 500];
    let codes = encode_block(&data, DictionarySize::Size2K)?;
    assert_eq!(codes.len(), 14);
    Ok(())
}

/// Test a fresh dictionary
#[test]
fn test_fresh_dictionary() {
    for dict_size in [
        DictionarySize::Size1K,
        DictionarySize::Size2K,
        DictionarySize::Size4K,
    ] {
        let dict = Dictionary::new(dict_size);
        assert_eq!(dict.len(), 256);
        assert_eq!(dict.pattern_count(), 0);
        for b in 0..=255u8 {
            assert_eq!(dict.lookup(&[b]), Some(b as Code));
        }
        assert_eq!(dict.lookup(b"AB"), None);
        assert_eq!(dict.lookup(&[0, 0]), None);
    }
}

/// Test that colliding patterns are all reachable and reset drops them
#[test]
fn test_dictionary_collisions_and_reset() {
    let mut dict = Dictionary::new(DictionarySize::Size1K);

    // Both hash to the same slot: the zero symbol discards the prefix
    let first = Pattern::new(&[7, 0, 3]).unwrap();
    let second = Pattern::new(&[0, 3]).unwrap();
    assert_eq!(dict.slot_of(first.symbols()), dict.slot_of(second.symbols()));

    dict.insert(first, 256);
    dict.insert(second, 257);
    assert_eq!(dict.lookup(&[7, 0, 3]), Some(256));
    assert_eq!(dict.lookup(&[0, 3]), Some(257));

    let slot = slot_hash(&[0, 3], 1024);
    let chain = dict.chain_codes(slot);
    assert!(chain.ends_with(&[256, 257]));

    dict.reset();
    assert_eq!(dict.lookup(&[7, 0, 3]), None);
    assert_eq!(dict.lookup(&[0, 3]), None);
    assert_eq!(dict.lookup(&[3]), Some(3));
    assert_eq!(dict.pattern_count(), 0);
}

/// Test behavior when the code space runs out
#[test]
fn test_overflow_reset() -> Result<(), Box<dyn std::error::Error>> {
    let data = noise(5000, 42);
    let encoder = Encoder::new(EncoderOptions::new(DictionarySize::Size1K));
    let mut codes = Vec::new();
    let stats = encoder.encode_into(&data, &mut codes)?;

    assert!(stats.resets >= 1);
    assert!(codes.iter().all(|&c| c < 1024));

    let (same, book) = encoder.encode_with_codebook(&data)?;
    assert_eq!(same, codes);
    assert_eq!(book.generations(), stats.resets + 1);
    assert_eq!(book.resolve(&codes)?, data);

    // A 4K dictionary needs fewer generations for the same input
    let (_, big) = Encoder::default().encode_with_codebook(&data)?;
    assert!(big.generations() <= book.generations());
    Ok(())
}

/// Test that empty blocks are rejected
#[test]
fn test_empty_block() {
    assert!(matches!(
        encode_block(b"", DictionarySize::Size4K),
        Err(LzwdError::EmptyBlock)
    ));
    assert!(matches!(
        Encoder::default().encode_with_codebook(b""),
        Err(LzwdError::EmptyBlock)
    ));
}

/// Test that tracing does not change the output
#[test]
fn test_trace_is_transparent() -> Result<(), Box<dyn std::error::Error>> {
    let data = noise(3000, 5);
    let quiet = Encoder::new(EncoderOptions::new(DictionarySize::Size1K));
    let chatty = Encoder::new(
        EncoderOptions::new(DictionarySize::Size1K).with_trace(TraceLevel::Patterns),
    );
    assert_eq!(quiet.encode(&data)?, chatty.encode(&data)?);
    Ok(())
}

/// Test that text compresses
#[test]
fn test_text_compresses() -> Result<(), Box<dyn std::error::Error>> {
    let text = "It was the best of times, it was the worst of times, it was the age of wisdom, \
                it was the age of foolishness, it was the epoch of belief, it was the epoch of \
                incredulity, it was the season of Light, it was the season of Darkness"
        .repeat(10);
    let codes = encode_block(text.as_bytes(), DictionarySize::Size4K)?;

    // Two bytes per code on the wire: a real saving means fewer than half
    assert!(codes.len() * 2 < text.len());
    println!("{} bytes -> {} codes", text.len(), codes.len());
    Ok(())
}
