//! Property-based tests for the RNC1 packer and unpacker
//!
//! These tests use randomized inputs to verify correctness across a wide range
//! of data patterns and edge cases.

use proptest::prelude::*;
use rnc::pack::{HuffmanTable, MAX_CODE_LENGTH};
use rnc::{crc16, pack_bytes, pack_verified, unpack_bytes, RncHeader, HEADER_SIZE};

proptest! {
    #[test]
    fn test_unpacking_never_panics(data in prop::collection::vec(any::<u8>(), 0..1000)) {
        // Random bytes are almost never a valid file, but must only produce errors
        let _ = unpack_bytes(&data);
    }
}

proptest! {
    #[test]
    fn test_corrupted_body_never_panics(
        data in prop::collection::vec(any::<u8>(), 1..500),
        index in any::<prop::sample::Index>(),
        flip in 1..=255u8,
    ) {
        let mut packed = pack_bytes(&data).unwrap();
        let body_len = packed.len() - HEADER_SIZE;
        let at = HEADER_SIZE + index.index(body_len);
        packed[at] ^= flip;

        // Fix the body CRC so the decoder itself sees the damage
        let crc = crc16(&packed[HEADER_SIZE..]);
        packed[14..16].copy_from_slice(&crc.to_be_bytes());
        let _ = unpack_bytes(&packed);
    }
}

proptest! {
    #[test]
    fn test_small_inputs(data in prop::collection::vec(any::<u8>(), 0..10)) {
        let packed = pack_verified(&data).unwrap();
        prop_assert_eq!(unpack_bytes(&packed.data).unwrap(), data);
    }
}

proptest! {
    #[test]
    fn test_round_trip(data in prop::collection::vec(any::<u8>(), 0..4000)) {
        let packed = pack_bytes(&data).unwrap();
        let header = RncHeader::parse(&packed).unwrap();

        prop_assert_eq!(header.unpacked_len as usize, data.len());
        prop_assert_eq!(header.packed_len as usize, packed.len() - HEADER_SIZE);
        prop_assert_eq!(header.unpacked_crc, crc16(&data));
        prop_assert_eq!(header.packed_crc, crc16(&packed[HEADER_SIZE..]));
        prop_assert_eq!(unpack_bytes(&packed).unwrap(), data);
    }
}

proptest! {
    #[test]
    fn test_repetitive_patterns(
        pattern in prop::collection::vec(any::<u8>(), 1..20),
        repeat_count in 2..200usize
    ) {
        let data: Vec<u8> = pattern
            .iter()
            .copied()
            .cycle()
            .take(pattern.len() * repeat_count)
            .collect();

        let packed = pack_verified(&data).unwrap();
        prop_assert_eq!(unpack_bytes(&packed.data).unwrap(), data);
    }
}

proptest! {
    #[test]
    fn test_text_round_trip(
        data in prop::collection::vec(prop::char::range(' ', '~'), 10..3000)
    ) {
        let text: Vec<u8> = data.into_iter().map(|c| c as u8).collect();
        let packed = pack_verified(&text).unwrap();
        prop_assert_eq!(unpack_bytes(&packed.data).unwrap(), text);
    }
}

proptest! {
    #[test]
    fn test_huffman_tables_are_prefix_codes(
        freqs in prop::collection::vec(0..1000u32, 16)
    ) {
        // Values below 65536 only ever use the first 16 length classes
        let mut frequencies = [0u32; 32];
        frequencies[..16].copy_from_slice(&freqs);
        let table = HuffmanTable::build(&frequencies);

        let codes: Vec<_> = table.codes().iter().filter(|c| c.length > 0).collect();
        prop_assert_eq!(codes.len(), freqs.iter().filter(|&&f| f > 0).count());
        for (i, a) in codes.iter().enumerate() {
            prop_assert!(a.length <= MAX_CODE_LENGTH);
            for b in codes.iter().skip(i + 1) {
                let mask = (1u32 << a.length.min(b.length)) - 1;
                prop_assert_ne!(a.code & mask, b.code & mask);
            }
        }
    }
}
