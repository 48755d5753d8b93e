//! Dispatch from return code to event decoder
//!
//! The decoder table is a `static` array indexed by the frame's first byte,
//! built at compile time. Lookups are a single index; there is no runtime
//! registration and nothing to lock.

use core::fmt;

use crate::codes::ReturnCode;
use crate::events::{
    CurrentPageIdEvent, Event, EventFrame, NumberEvent, PositionEvent, SleepPositionEvent,
    StringEvent, TouchEvent,
};
use crate::frame::FrameError;

/// Errors returned by [`decode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// Zero-length input
    EmptyFrame,
    /// First byte has no registered decoder
    UnknownDiscriminant(u8),
    /// The selected decoder rejected the frame
    Frame(FrameError),
}

impl From<FrameError> for RegistryError {
    fn from(err: FrameError) -> Self {
        RegistryError::Frame(err)
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::EmptyFrame => write!(f, "empty frame"),
            RegistryError::UnknownDiscriminant(code) => {
                write!(f, "no event decoder for return code {:#04x}", code)
            }
            RegistryError::Frame(err) => write!(f, "malformed frame: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::Frame(err) => Some(err),
            _ => None,
        }
    }
}

type DecodeFn = fn(&[u8]) -> Result<Event, FrameError>;

fn decode_as<E: EventFrame + Into<Event>>(frame: &[u8]) -> Result<Event, FrameError> {
    E::parse(frame).map(Into::into)
}

const fn build_table() -> [Option<DecodeFn>; 256] {
    let mut table: [Option<DecodeFn>; 256] = [None; 256];
    table[ReturnCode::EventTouchHead.to_byte() as usize] = Some(decode_as::<TouchEvent>);
    table[ReturnCode::CurrentPageIdHead.to_byte() as usize] =
        Some(decode_as::<CurrentPageIdEvent>);
    table[ReturnCode::EventPositionHead.to_byte() as usize] = Some(decode_as::<PositionEvent>);
    table[ReturnCode::EventSleepPositionHead.to_byte() as usize] =
        Some(decode_as::<SleepPositionEvent>);
    table[ReturnCode::StringHead.to_byte() as usize] = Some(decode_as::<StringEvent>);
    table[ReturnCode::NumberHead.to_byte() as usize] = Some(decode_as::<NumberEvent>);
    table
}

static DECODERS: [Option<DecodeFn>; 256] = build_table();

/// Returns true if frames starting with `code` can be decoded
pub fn is_decodable(code: u8) -> bool {
    DECODERS[code as usize].is_some()
}

/// Decode a complete frame into an event
///
/// The decoder is chosen by the first byte. Decoder errors are returned
/// unchanged inside [`RegistryError::Frame`].
pub fn decode(frame: &[u8]) -> Result<Event, RegistryError> {
    let code = *frame.first().ok_or(RegistryError::EmptyFrame)?;

    let Some(decoder) = DECODERS[code as usize] else {
        #[cfg(feature = "defmt")]
        defmt::debug!("no decoder for return code {=u8:#x}", code);
        return Err(RegistryError::UnknownDiscriminant(code));
    };

    #[cfg(feature = "defmt")]
    defmt::trace!("decoding frame code={=u8:#x} len={=usize}", code, frame.len());

    decoder(frame).map_err(|err| {
        #[cfg(feature = "defmt")]
        defmt::debug!("rejected frame code={=u8:#x}: {}", code, err);
        RegistryError::from(err)
    })
}
