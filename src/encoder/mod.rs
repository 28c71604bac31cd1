//! Symbol encoding: text to cell codes, and cell codes to pixels
//!
//! This is the inverse of the decode pipeline and exists to produce
//! symbols for printing, fixtures and benchmarks.

pub mod render;

use crate::decoder::bitstream::split_codeword;
use crate::decoder::tables::codeword_for_char;
use crate::error::EncodeError;
use crate::models::grid::{CAPACITY, DATA_CELLS};

pub use render::render_symbol;

/// Codeword used to fill unused capacity (a space)
const PAD_CODEWORD: u8 = 0;

/// Map `text` to one 3-bit code per data cell, in row-major scan order
///
/// Unused capacity is filled with spaces and the final unpaired cell is
/// black, so the result always has one code per data cell.
pub fn encode_cells(text: &str) -> Result<Vec<u8>, EncodeError> {
    let len = text.chars().count();
    if len > CAPACITY {
        return Err(EncodeError::MessageTooLong {
            len,
            capacity: CAPACITY,
        });
    }

    let mut codes = Vec::with_capacity(DATA_CELLS);
    for (position, ch) in text.chars().enumerate() {
        let cw = codeword_for_char(ch).ok_or(EncodeError::UnsupportedCharacter { ch, position })?;
        let (hi, lo) = split_codeword(cw);
        codes.push(hi);
        codes.push(lo);
    }

    let (pad_hi, pad_lo) = split_codeword(PAD_CODEWORD);
    while codes.len() + 2 <= DATA_CELLS {
        codes.push(pad_hi);
        codes.push(pad_lo);
    }
    codes.resize(DATA_CELLS, 0);

    Ok(codes)
}

/// `text` padded with spaces to the full symbol capacity, as decoding returns it
pub fn padded(text: &str) -> String {
    let len = text.chars().count();
    let mut out = String::with_capacity(CAPACITY.max(len));
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', CAPACITY.saturating_sub(len)));
    out
}
