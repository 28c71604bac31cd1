use thiserror::Error;

/// Reasons a symbol cannot be decoded
///
/// Each variant reflects a property of the input image, so retrying the
/// same image yields the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The marker detector did not find exactly three fiducials
    #[error("expected 3 markers, found {found}")]
    MarkerCount {
        /// Number of circles accepted by the detector
        found: usize,
    },

    /// The three markers are too unevenly spaced to belong to one symbol
    #[error("marker distances too unbalanced (max/min ratio {ratio:.2})")]
    UnbalancedGeometry {
        /// Ratio of the longest to the shortest pairwise distance
        ratio: f32,
    },

    /// No marker sits at a right angle to the other two
    #[error("no marker forms a right angle with the other two")]
    NoRightAngle,

    /// The rectification transform could not be solved or inverted
    #[error("marker positions do not define an invertible transform")]
    DegenerateTransform,

    /// No non-background pixels were found when locating the grid
    #[error("no symbol content found in image")]
    EmptyRegion,

    /// A raw pixel buffer does not match its declared dimensions
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize {
        /// width * height * 3 (`usize::MAX` when that overflows)
        expected: usize,
        /// Length of the buffer supplied
        actual: usize,
    },
}

/// Reasons a message cannot be encoded into a symbol
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The character has no entry in the code table
    #[error("character {ch:?} at position {position} is not in the code table")]
    UnsupportedCharacter {
        /// Offending character
        ch: char,
        /// Character index within the message
        position: usize,
    },

    /// The message does not fit in one symbol
    #[error("message has {len} characters, symbol capacity is {capacity}")]
    MessageTooLong {
        /// Message length in characters
        len: usize,
        /// Maximum characters per symbol
        capacity: usize,
    },
}
