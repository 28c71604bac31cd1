/// The 64-entry character table indexed by 6-bit codewords
///
/// Order is historical and must not be "fixed": `w` sits after `y` in both
/// cases (`... v x y w z`).
pub const CODE_TABLE: [char; 64] = [
    ' ', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'x', 'y', 'w', 'z', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K',
    'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'X', 'Y', 'W', 'Z', '0', '1', '2', '3',
    '4', '5', '6', '7', '8', '9', '.',
];

/// Character for a codeword (only the low 6 bits are used)
pub fn char_for_codeword(codeword: u8) -> char {
    CODE_TABLE[(codeword & 0x3F) as usize]
}

/// Codeword for a character, if the table contains it
pub fn codeword_for_char(ch: char) -> Option<u8> {
    CODE_TABLE.iter().position(|&c| c == ch).map(|i| i as u8)
}
