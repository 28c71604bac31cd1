/// Pairing of 3-bit cell codes into 6-bit codewords and text
use crate::decoder::tables::char_for_codeword;
use tracing::debug;

/// Result of assembling a code sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembled {
    /// Decoded characters, one per code pair
    pub text: String,
    /// True when an unpaired trailing code was discarded
    pub dropped_trailing: bool,
}

/// Combine two 3-bit codes into a codeword; the first is the high half
pub fn codeword(high: u8, low: u8) -> u8 {
    ((high & 0b111) << 3) | (low & 0b111)
}

/// Split a codeword into its (high, low) 3-bit codes
pub fn split_codeword(codeword: u8) -> (u8, u8) {
    ((codeword >> 3) & 0b111, codeword & 0b111)
}

/// Decode a row-major sequence of 3-bit cell codes into text
///
/// An odd trailing code has no partner and is dropped.
pub fn assemble(codes: &[u8]) -> Assembled {
    let pairs = codes.chunks_exact(2);
    let dropped_trailing = !pairs.remainder().is_empty();
    if dropped_trailing {
        debug!(cells = codes.len(), "dropping unpaired trailing cell");
    }

    let text = pairs
        .map(|pair| char_for_codeword(codeword(pair[0], pair[1])))
        .collect();

    Assembled {
        text,
        dropped_trailing,
    }
}
