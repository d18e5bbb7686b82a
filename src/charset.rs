// BD1 14 segment layout, in logical bit order (the wiring is applied later by `remap`)
//
//         2
//     ---------
//    |\   |3  /|
//  0 | \6 |  /7| 1
//    |  \ | /  |
//     -F-- --E-
//    |  / | \  |
//  D | /4 |A \B| 5
//    |/   |   \|
//     ---------  C
//         9
//
// Bit 8 is the flash mark, bit C the decimal point.

/// Number of entries in the character table
pub const CHARSET_LEN: usize = 64;

/// Logical bit set on a cell carrying the flash mark
pub const FLASH_BIT: u16 = 1 << 8;
/// Logical bit for the decimal point / semicolon tail
pub const POINT_BIT: u16 = 1 << 12;

// In-band codes inside the character stream
pub const CODE_FLASH: u8 = 0x25;
pub const CODE_UNDEFINED: u8 = 0x26;
pub const CODE_SEMICOLON: u8 = 0x2C;
pub const CODE_POINT: u8 = 0x2E;
pub const CODE_USER_GLYPH: u8 = 0x3A;
pub const CODE_DUMMY: u8 = 0x3B;

const CHARSET: [u16; CHARSET_LEN] = [
    0xA626, // @
    0xE027, // A
    0x462E, // B
    0x2205, // C
    0x062E, // D
    0xA205, // E
    0xA005, // F
    0x6225, // G
    0xE023, // H
    0x060C, // I
    0x2222, // J
    0xA881, // K
    0x2201, // L
    0x20E3, // M
    0x2863, // N
    0x2227, // O
    0xE007, // P
    0x2A27, // Q
    0xE807, // R
    0xC225, // S
    0x040C, // T
    0x2223, // U
    0x2091, // V
    0x2833, // W
    0x08D0, // X
    0x04C0, // Y
    0x0294, // Z
    0x2205, // [
    0x0840, // \
    0x0226, // ]
    0x0810, // ^
    0x0200, // _
    0x0000, // space
    0xC290, // pound
    0x0009, // "
    0xC62A, // #
    0xC62D, // $
    0x0100, // flash mark
    0x0000, // not defined
    0x0080, // '
    0x0880, // (
    0x0050, // )
    0xCCD8, // *
    0xC408, // +
    0x1000, // ,
    0xC000, // -
    0x1000, // .
    0x0090, // /
    0x22B7, // 0
    0x0408, // 1
    0xE206, // 2
    0xC226, // 3
    0xC023, // 4
    0xC225, // 5
    0xE225, // 6
    0x0026, // 7
    0xE227, // 8
    0xC227, // 9
    0xFFFF, // user defined
    0x0000, // dummy
    0x0290, // <
    0xC200, // =
    0x0A40, // >
    0x4406, // ?
];

// Physical bit 15 down to bit 0, each taking the logical bit listed.
const WIRING: [u8; 16] = [8, 12, 11, 7, 6, 4, 10, 3, 14, 15, 0, 13, 9, 5, 1, 2];

/// Looks up the logical segment pattern for a character code. Only the low
/// six bits of `code` select the entry.
pub fn pattern(code: u8) -> u16 {
    CHARSET[(code & 0x3F) as usize]
}

/// True when `code` lands on a row the datasheet leaves without a glyph.
pub fn is_undefined(code: u8) -> bool {
    code > 0x3F || code == CODE_UNDEFINED
}

/// Converts a logical segment pattern to the physical output wiring.
pub fn remap(logical: u16) -> u16 {
    let mut physical = 0;
    for (i, &source) in WIRING.iter().enumerate() {
        if logical & (1 << source) != 0 {
            physical |= 1 << (15 - i);
        }
    }
    physical
}

/// Inverse of [`remap`], for hosts that draw segments from output values.
pub fn unmap(physical: u16) -> u16 {
    let mut logical = 0;
    for (i, &source) in WIRING.iter().enumerate() {
        if physical & (1 << (15 - i)) != 0 {
            logical |= 1 << source;
        }
    }
    logical
}

/// Maps a printable character to its 6-bit code.
///
/// The table is laid out like ASCII 0x40-0x5F followed by 0x20-0x3F, so
/// lowercase letters fold onto uppercase. Characters outside that range,
/// and the in-band control rows, have no code.
pub fn code_for(c: char) -> Option<u8> {
    let c = c.to_ascii_uppercase();
    if !c.is_ascii() {
        return None;
    }
    let code = match c as u8 {
        b @ 0x40..=0x5F => b - 0x40,
        b @ 0x20..=0x3F => b,
        _ => return None,
    };
    match code {
        CODE_FLASH | CODE_UNDEFINED | CODE_USER_GLYPH | CODE_DUMMY => None,
        _ => Some(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_follows_wiring() {
        assert_eq!(remap(FLASH_BIT), 1 << 15);
        assert_eq!(remap(POINT_BIT), 1 << 14);
        assert_eq!(remap(1 << 2), 1 << 0);
        assert_eq!(remap(1 << 1), 1 << 1);
        assert_eq!(remap(0xFFFF), 0xFFFF);
        assert_eq!(remap(0), 0);
    }

    #[test]
    fn unmap_inverts_remap() {
        for i in 0..16 {
            let bit = 1u16 << i;
            assert_eq!(unmap(remap(bit)), bit);
        }
        assert_eq!(unmap(remap(0xA626)), 0xA626);
    }

    #[test]
    fn pattern_masks_to_six_bits() {
        assert_eq!(pattern(0x01), 0xE027);
        assert_eq!(pattern(0x41), 0xE027);
        assert_eq!(pattern(0x30), 0x22B7);
        assert_eq!(pattern(0x3A), 0xFFFF);
    }

    #[test]
    fn undefined_rows() {
        assert!(is_undefined(0x40));
        assert!(is_undefined(CODE_UNDEFINED));
        assert!(!is_undefined(0x3F));
    }

    #[test]
    fn code_for_ascii() {
        assert_eq!(code_for('A'), Some(0x01));
        assert_eq!(code_for('a'), Some(0x01));
        assert_eq!(code_for('@'), Some(0x00));
        assert_eq!(code_for(' '), Some(0x20));
        assert_eq!(code_for('0'), Some(0x30));
        assert_eq!(code_for('.'), Some(CODE_POINT));
        assert_eq!(code_for('%'), None);
        assert_eq!(code_for(':'), None);
        assert_eq!(code_for('é'), None);
        assert_eq!(code_for('\n'), None);
    }
}
