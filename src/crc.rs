//! CRC-16 checksum used by the RNC1 header
//!
//! Reflected CRC-16 with polynomial 0xA001, initial value 0 and no final xor.
//! The same routine covers both the packed body and the original data.

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut val = i as u16;
        let mut bit = 0;
        while bit < 8 {
            if val & 1 != 0 {
                val = (val >> 1) ^ 0xA001;
            } else {
                val >>= 1;
            }
            bit += 1;
        }
        table[i] = val;
        i += 1;
    }
    table
}

static CRC_TABLE: [u16; 256] = build_table();

/// Compute the RNC CRC-16 of `data`
pub fn crc16(data: &[u8]) -> u16 {
    data.iter().fold(0u16, |crc, &byte| {
        let crc = crc ^ byte as u16;
        (crc >> 8) ^ CRC_TABLE[(crc & 0xFF) as usize]
    })
}
