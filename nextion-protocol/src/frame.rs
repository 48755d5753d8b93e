//! Frame validation for display-originated messages.
//!
//! Frame format:
//! - CODE (1 byte): return code identifying the message kind
//! - PAYLOAD (0+ bytes): kind-specific data
//! - TERMINATOR (3 bytes): 0xFF 0xFF 0xFF
//!
//! A frame handed to this module is already delimited; nothing here scans a
//! byte stream or keeps state between calls.

use core::fmt;

/// End-of-frame marker
pub const TERMINATOR: [u8; 3] = [0xFF; 3];

/// Largest frame the display can emit (size of its serial buffer)
pub const MAX_FRAME_SIZE: usize = 1024;

/// Longest string payload (MAX_FRAME_SIZE minus CODE and TERMINATOR)
pub const MAX_STRING_LEN: usize = MAX_FRAME_SIZE - 1 - TERMINATOR.len();

/// Errors that can occur while validating or encoding a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Last three bytes are not all 0xFF
    MissingTerminator,
    /// Fixed-length frame has the wrong byte count
    LengthMismatch { expected: usize, actual: usize },
    /// First byte does not belong to the decoder that was invoked
    DiscriminantMismatch { expected: u8, actual: u8 },
    /// A two-valued state byte holds neither value
    InvalidEnum { field: &'static str, value: u8 },
    /// String payload is not valid UTF-8
    InvalidEncoding,
    /// String payload exceeds MAX_STRING_LEN
    PayloadTooLarge,
    /// Buffer too small for encoding
    BufferTooSmall,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::MissingTerminator => write!(f, "frame must end with 0xff 0xff 0xff"),
            FrameError::LengthMismatch { expected, actual } => {
                write!(f, "frame must have {} bytes not {}", expected, actual)
            }
            FrameError::DiscriminantMismatch { expected, actual } => write!(
                f,
                "frame must have {:#04x} as first byte not {:#04x}",
                expected, actual
            ),
            FrameError::InvalidEnum { field, value } => {
                write!(f, "invalid value {:#04x} for {}", value, field)
            }
            FrameError::InvalidEncoding => write!(f, "string payload is not valid UTF-8"),
            FrameError::PayloadTooLarge => write!(f, "string payload too large"),
            FrameError::BufferTooSmall => write!(f, "buffer too small"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FrameError {}

/// Length rule for a frame kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameLength {
    /// Frame must be exactly this many bytes, terminator included
    Fixed(usize),
    /// Payload length varies; only the terminator bounds the frame
    Variable,
}

/// Check that the frame ends with the terminator
pub fn check_terminator(frame: &[u8]) -> Result<(), FrameError> {
    if frame.ends_with(&TERMINATOR) {
        Ok(())
    } else {
        Err(FrameError::MissingTerminator)
    }
}

/// Check the frame's byte count against a length rule
pub fn check_length(frame: &[u8], expected: FrameLength) -> Result<(), FrameError> {
    match expected {
        FrameLength::Fixed(expected) if frame.len() != expected => {
            Err(FrameError::LengthMismatch {
                expected,
                actual: frame.len(),
            })
        }
        _ => Ok(()),
    }
}

/// Check that byte 0 is the expected return code
///
/// An empty frame reports an actual discriminant of 0; callers run the
/// terminator check first, which rejects empty frames.
pub fn check_discriminant(frame: &[u8], expected: u8) -> Result<(), FrameError> {
    let actual = frame.first().copied().unwrap_or_default();
    if actual == expected && !frame.is_empty() {
        Ok(())
    } else {
        Err(FrameError::DiscriminantMismatch { expected, actual })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminator_present() {
        assert_eq!(check_terminator(&[0x66, 0x00, 0xFF, 0xFF, 0xFF]), Ok(()));
        assert_eq!(check_terminator(&[0xFF, 0xFF, 0xFF]), Ok(()));
    }

    #[test]
    fn test_terminator_missing() {
        assert_eq!(
            check_terminator(&[0x66, 0x00, 0xFF, 0xFF]),
            Err(FrameError::MissingTerminator)
        );
        assert_eq!(
            check_terminator(&[0x66, 0x00, 0xFF, 0xFE, 0xFF]),
            Err(FrameError::MissingTerminator)
        );
    }

    #[test]
    fn test_terminator_short_frames() {
        assert_eq!(check_terminator(&[]), Err(FrameError::MissingTerminator));
        assert_eq!(check_terminator(&[0xFF]), Err(FrameError::MissingTerminator));
        assert_eq!(
            check_terminator(&[0xFF, 0xFF]),
            Err(FrameError::MissingTerminator)
        );
    }

    #[test]
    fn test_fixed_length() {
        let frame = [0x66, 0x03, 0xFF, 0xFF, 0xFF];
        assert_eq!(check_length(&frame, FrameLength::Fixed(5)), Ok(()));
        assert_eq!(
            check_length(&frame, FrameLength::Fixed(7)),
            Err(FrameError::LengthMismatch {
                expected: 7,
                actual: 5
            })
        );
    }

    #[test]
    fn test_variable_length_skips_check() {
        assert_eq!(check_length(&[], FrameLength::Variable), Ok(()));
        assert_eq!(check_length(&[0u8; 64], FrameLength::Variable), Ok(()));
    }

    #[test]
    fn test_discriminant() {
        assert_eq!(check_discriminant(&[0x70, 0xFF, 0xFF, 0xFF], 0x70), Ok(()));
        assert_eq!(
            check_discriminant(&[0x71, 0xFF, 0xFF, 0xFF], 0x70),
            Err(FrameError::DiscriminantMismatch {
                expected: 0x70,
                actual: 0x71
            })
        );
    }

    #[test]
    fn test_discriminant_empty_frame() {
        assert_eq!(
            check_discriminant(&[], 0x00),
            Err(FrameError::DiscriminantMismatch {
                expected: 0x00,
                actual: 0x00
            })
        );
    }
}
