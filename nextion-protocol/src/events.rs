//! Event frames pushed by the display
//!
//! Each variant knows its return code and length rule. Parsing always runs
//! the same sequence: terminator, length, discriminant, then fields.
//!
//! Wire layouts:
//! ```text
//! Touch:          [0x65][pid][cid][touch][FF FF FF]                 7 bytes
//! CurrentPageId:  [0x66][pid][FF FF FF]                             5 bytes
//! Position:       [0x67][x_hi][x_lo][y_hi][y_lo][touch][FF FF FF]   9 bytes
//! SleepPosition:  [0x68][x_hi][x_lo][y_hi][y_lo][touch][FF FF FF]   9 bytes
//! String:         [0x70][utf8 bytes...][FF FF FF]                   variable
//! Number:         [0x71][b0][b1][b2][b3][FF FF FF]                  8 bytes
//! ```

use crate::codes::ReturnCode;
use crate::frame::{
    check_discriminant, check_length, check_terminator, FrameError, FrameLength, MAX_FRAME_SIZE,
    MAX_STRING_LEN, TERMINATOR,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Encoded frame buffer
pub type FrameBuf = heapless::Vec<u8, MAX_FRAME_SIZE>;

/// Text carried by a string event
pub type EventText = heapless::String<MAX_STRING_LEN>;

/// Touch transition reported with touch and coordinate events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TouchState {
    Release,
    Press,
}

// Wire format values
const TOUCH_RELEASE: u8 = 0x00;
const TOUCH_PRESS: u8 = 0x01;

impl TouchState {
    /// Parse a touch state from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            TOUCH_RELEASE => Some(TouchState::Release),
            TOUCH_PRESS => Some(TouchState::Press),
            _ => None,
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            TouchState::Release => TOUCH_RELEASE,
            TouchState::Press => TOUCH_PRESS,
        }
    }

    /// Returns true for a press transition
    pub fn is_press(&self) -> bool {
        matches!(self, TouchState::Press)
    }
}

fn decode_touch(byte: u8) -> Result<TouchState, FrameError> {
    TouchState::from_byte(byte).ok_or(FrameError::InvalidEnum {
        field: "touch_state",
        value: byte,
    })
}

fn push(out: &mut FrameBuf, bytes: &[u8]) -> Result<(), FrameError> {
    out.extend_from_slice(bytes)
        .map_err(|_| FrameError::BufferTooSmall)
}

/// A frame kind with a fixed return code and length rule
///
/// `read_fields` and `write_fields` cover only the bytes between the
/// return code and the terminator; `parse` and `to_frame` add the rest.
pub trait EventFrame: Sized {
    /// Return code heading this frame kind
    const CODE: ReturnCode;
    /// Length rule, terminator included
    const LENGTH: FrameLength;

    /// Extract fields from a frame that already passed validation
    fn read_fields(frame: &[u8]) -> Result<Self, FrameError>;

    /// Append the payload bytes for this event
    fn write_fields(&self, out: &mut FrameBuf) -> Result<(), FrameError>;

    /// Validate and decode a complete frame
    fn parse(frame: &[u8]) -> Result<Self, FrameError> {
        check_terminator(frame)?;
        check_length(frame, Self::LENGTH)?;
        check_discriminant(frame, Self::CODE.to_byte())?;
        Self::read_fields(frame)
    }

    /// Encode this event as a complete frame
    fn to_frame(&self) -> Result<FrameBuf, FrameError> {
        let mut out = FrameBuf::new();
        push(&mut out, &[Self::CODE.to_byte()])?;
        self.write_fields(&mut out)?;
        push(&mut out, &TERMINATOR)?;
        Ok(out)
    }
}

#[cfg(feature = "serde")]
fn code_of<E: EventFrame>() -> ReturnCode {
    E::CODE
}

/// Returned when a fixed-length layout does not fit the slice
fn short_frame<E: EventFrame>(frame: &[u8]) -> FrameError {
    match E::LENGTH {
        FrameLength::Fixed(expected) => FrameError::LengthMismatch {
            expected,
            actual: frame.len(),
        },
        FrameLength::Variable => FrameError::MissingTerminator,
    }
}

/// Component pressed or released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchEvent {
    #[cfg_attr(feature = "serde", serde(skip, default = "code_of::<TouchEvent>"))]
    code: ReturnCode,
    pub page_id: u8,
    pub component_id: u8,
    pub touch_state: TouchState,
}

impl TouchEvent {
    /// Create a touch event for a component on a page
    pub fn new(page_id: u8, component_id: u8, touch_state: TouchState) -> Self {
        Self {
            code: Self::CODE,
            page_id,
            component_id,
            touch_state,
        }
    }

    /// Return code this event is framed with
    pub fn code(&self) -> ReturnCode {
        self.code
    }
}

impl EventFrame for TouchEvent {
    const CODE: ReturnCode = ReturnCode::EventTouchHead;
    const LENGTH: FrameLength = FrameLength::Fixed(7);

    fn read_fields(frame: &[u8]) -> Result<Self, FrameError> {
        let &[_, page_id, component_id, touch, ..] = frame else {
            return Err(short_frame::<Self>(frame));
        };
        Ok(Self::new(page_id, component_id, decode_touch(touch)?))
    }

    fn write_fields(&self, out: &mut FrameBuf) -> Result<(), FrameError> {
        push(
            out,
            &[self.page_id, self.component_id, self.touch_state.to_byte()],
        )
    }
}

/// Current page, sent in reply to `sendme`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurrentPageIdEvent {
    #[cfg_attr(feature = "serde", serde(skip, default = "code_of::<CurrentPageIdEvent>"))]
    code: ReturnCode,
    pub page_id: u8,
}

impl CurrentPageIdEvent {
    /// Create a current-page event
    pub fn new(page_id: u8) -> Self {
        Self {
            code: Self::CODE,
            page_id,
        }
    }

    /// Return code this event is framed with
    pub fn code(&self) -> ReturnCode {
        self.code
    }
}

impl EventFrame for CurrentPageIdEvent {
    const CODE: ReturnCode = ReturnCode::CurrentPageIdHead;
    const LENGTH: FrameLength = FrameLength::Fixed(5);

    fn read_fields(frame: &[u8]) -> Result<Self, FrameError> {
        let &[_, page_id, ..] = frame else {
            return Err(short_frame::<Self>(frame));
        };
        Ok(Self::new(page_id))
    }

    fn write_fields(&self, out: &mut FrameBuf) -> Result<(), FrameError> {
        push(out, &[self.page_id])
    }
}

/// Coordinates are big-endian u16 pairs followed by the touch state
fn read_position(frame: &[u8]) -> Option<Result<(u16, u16, TouchState), FrameError>> {
    let &[_, x_hi, x_lo, y_hi, y_lo, touch, ..] = frame else {
        return None;
    };
    let x = u16::from_be_bytes([x_hi, x_lo]);
    let y = u16::from_be_bytes([y_hi, y_lo]);
    Some(decode_touch(touch).map(|state| (x, y, state)))
}

fn write_position(
    out: &mut FrameBuf,
    x: u16,
    y: u16,
    touch_state: TouchState,
) -> Result<(), FrameError> {
    let [x_hi, x_lo] = x.to_be_bytes();
    let [y_hi, y_lo] = y.to_be_bytes();
    push(out, &[x_hi, x_lo, y_hi, y_lo, touch_state.to_byte()])
}

/// Touch coordinate (sent when `sendxy=1`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositionEvent {
    #[cfg_attr(feature = "serde", serde(skip, default = "code_of::<PositionEvent>"))]
    code: ReturnCode,
    pub x: u16,
    pub y: u16,
    pub touch_state: TouchState,
}

impl PositionEvent {
    /// Create a touch coordinate event
    pub fn new(x: u16, y: u16, touch_state: TouchState) -> Self {
        Self {
            code: Self::CODE,
            x,
            y,
            touch_state,
        }
    }

    /// Return code this event is framed with
    pub fn code(&self) -> ReturnCode {
        self.code
    }
}

impl EventFrame for PositionEvent {
    const CODE: ReturnCode = ReturnCode::EventPositionHead;
    const LENGTH: FrameLength = FrameLength::Fixed(9);

    fn read_fields(frame: &[u8]) -> Result<Self, FrameError> {
        let (x, y, state) = read_position(frame).ok_or_else(|| short_frame::<Self>(frame))??;
        Ok(Self::new(x, y, state))
    }

    fn write_fields(&self, out: &mut FrameBuf) -> Result<(), FrameError> {
        write_position(out, self.x, self.y, self.touch_state)
    }
}

/// Touch coordinate reported while the display sleeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SleepPositionEvent {
    #[cfg_attr(feature = "serde", serde(skip, default = "code_of::<SleepPositionEvent>"))]
    code: ReturnCode,
    pub x: u16,
    pub y: u16,
    pub touch_state: TouchState,
}

impl SleepPositionEvent {
    /// Create a sleep-mode touch coordinate event
    pub fn new(x: u16, y: u16, touch_state: TouchState) -> Self {
        Self {
            code: Self::CODE,
            x,
            y,
            touch_state,
        }
    }

    /// Return code this event is framed with
    pub fn code(&self) -> ReturnCode {
        self.code
    }
}

impl EventFrame for SleepPositionEvent {
    const CODE: ReturnCode = ReturnCode::EventSleepPositionHead;
    const LENGTH: FrameLength = FrameLength::Fixed(9);

    fn read_fields(frame: &[u8]) -> Result<Self, FrameError> {
        let (x, y, state) = read_position(frame).ok_or_else(|| short_frame::<Self>(frame))??;
        Ok(Self::new(x, y, state))
    }

    fn write_fields(&self, out: &mut FrameBuf) -> Result<(), FrameError> {
        write_position(out, self.x, self.y, self.touch_state)
    }
}

/// String variable data (reply to `get` on a text attribute)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StringEvent {
    #[cfg_attr(feature = "serde", serde(skip, default = "code_of::<StringEvent>"))]
    code: ReturnCode,
    pub value: EventText,
}

impl StringEvent {
    /// Create a string event, failing if `text` exceeds MAX_STRING_LEN
    pub fn new(text: &str) -> Result<Self, FrameError> {
        let mut value = EventText::new();
        value
            .push_str(text)
            .map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self {
            code: Self::CODE,
            value,
        })
    }

    /// Text payload
    pub fn as_str(&self) -> &str {
        self.value.as_str()
    }

    /// Return code this event is framed with
    pub fn code(&self) -> ReturnCode {
        self.code
    }
}

impl EventFrame for StringEvent {
    const CODE: ReturnCode = ReturnCode::StringHead;
    const LENGTH: FrameLength = FrameLength::Variable;

    fn read_fields(frame: &[u8]) -> Result<Self, FrameError> {
        let end = frame.len().saturating_sub(TERMINATOR.len());
        let payload = frame.get(1..end).unwrap_or_default();
        let text = core::str::from_utf8(payload).map_err(|_| FrameError::InvalidEncoding)?;
        Self::new(text)
    }

    fn write_fields(&self, out: &mut FrameBuf) -> Result<(), FrameError> {
        push(out, self.value.as_bytes())
    }
}

/// Numeric variable data (reply to `get` on a numeric attribute)
///
/// The display sends one little-endian 32-bit word; `signed_value` is the
/// same bits read as two's complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumberEvent {
    #[cfg_attr(feature = "serde", serde(skip, default = "code_of::<NumberEvent>"))]
    code: ReturnCode,
    pub value: u32,
    pub signed_value: i32,
}

impl NumberEvent {
    /// Create a number event from the unsigned wire value
    pub fn new(value: u32) -> Self {
        Self {
            code: Self::CODE,
            value,
            signed_value: value as i32,
        }
    }

    /// Create a number event from a signed value
    pub fn from_signed(signed_value: i32) -> Self {
        Self::new(signed_value as u32)
    }

    /// Return code this event is framed with
    pub fn code(&self) -> ReturnCode {
        self.code
    }
}

impl EventFrame for NumberEvent {
    const CODE: ReturnCode = ReturnCode::NumberHead;
    const LENGTH: FrameLength = FrameLength::Fixed(8);

    fn read_fields(frame: &[u8]) -> Result<Self, FrameError> {
        let &[_, b0, b1, b2, b3, ..] = frame else {
            return Err(short_frame::<Self>(frame));
        };
        Ok(Self::new(u32::from_le_bytes([b0, b1, b2, b3])))
    }

    fn write_fields(&self, out: &mut FrameBuf) -> Result<(), FrameError> {
        push(out, &self.value.to_le_bytes())
    }
}

/// Any decoded event
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Event {
    Touch(TouchEvent),
    CurrentPageId(CurrentPageIdEvent),
    Position(PositionEvent),
    SleepPosition(SleepPositionEvent),
    String(StringEvent),
    Number(NumberEvent),
}

impl Event {
    /// Return code the event was decoded from
    pub fn code(&self) -> ReturnCode {
        match self {
            Event::Touch(e) => e.code(),
            Event::CurrentPageId(e) => e.code(),
            Event::Position(e) => e.code(),
            Event::SleepPosition(e) => e.code(),
            Event::String(e) => e.code(),
            Event::Number(e) => e.code(),
        }
    }

    /// Touch state, for the variants that carry one
    pub fn touch_state(&self) -> Option<TouchState> {
        match self {
            Event::Touch(e) => Some(e.touch_state),
            Event::Position(e) => Some(e.touch_state),
            Event::SleepPosition(e) => Some(e.touch_state),
            _ => None,
        }
    }

    /// Encode this event into a frame buffer
    pub fn encode_to_vec(&self) -> Result<FrameBuf, FrameError> {
        match self {
            Event::Touch(e) => e.to_frame(),
            Event::CurrentPageId(e) => e.to_frame(),
            Event::Position(e) => e.to_frame(),
            Event::SleepPosition(e) => e.to_frame(),
            Event::String(e) => e.to_frame(),
            Event::Number(e) => e.to_frame(),
        }
    }

    /// Encode this event into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame = self.encode_to_vec()?;
        let dest = buffer
            .get_mut(..frame.len())
            .ok_or(FrameError::BufferTooSmall)?;
        dest.copy_from_slice(&frame);
        Ok(frame.len())
    }
}

impl From<TouchEvent> for Event {
    fn from(event: TouchEvent) -> Self {
        Event::Touch(event)
    }
}

impl From<CurrentPageIdEvent> for Event {
    fn from(event: CurrentPageIdEvent) -> Self {
        Event::CurrentPageId(event)
    }
}

impl From<PositionEvent> for Event {
    fn from(event: PositionEvent) -> Self {
        Event::Position(event)
    }
}

impl From<SleepPositionEvent> for Event {
    fn from(event: SleepPositionEvent) -> Self {
        Event::SleepPosition(event)
    }
}

impl From<StringEvent> for Event {
    fn from(event: StringEvent) -> Self {
        Event::String(event)
    }
}

impl From<NumberEvent> for Event {
    fn from(event: NumberEvent) -> Self {
        Event::Number(event)
    }
}
