//! Return codes sent by the display
//!
//! Every frame the display emits starts with one of these bytes. Codes fall
//! into three groups:
//! - Instruction results: replies to a command sent by the host
//! - Event heads: asynchronous notifications carrying a payload
//! - Device notifications: payload-less status changes (sleep, wakeup, ...)

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Recognized return codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum ReturnCode {
    InvalidInstruction = 0x00,
    InstructionSuccessful = 0x01,
    InvalidComponentId = 0x02,
    InvalidPageId = 0x03,
    InvalidPictureId = 0x04,
    InvalidFontId = 0x05,
    InvalidBaudRate = 0x11,
    InvalidCurveControl = 0x12,
    InvalidVariableName = 0x1A,
    InvalidVariableOperation = 0x1B,
    AssignmentFailed = 0x1C,
    EepromOperationFailed = 0x1D,
    InvalidParameterQuantity = 0x1E,
    IoOperationFailed = 0x1F,
    UndefinedEscapeCharacters = 0x20,
    VariableNameTooLong = 0x23,
    SerialBufferOverflow = 0x24,
    /// Component pressed or released
    EventTouchHead = 0x65,
    /// Reply to `sendme`
    CurrentPageIdHead = 0x66,
    /// Touch coordinate (requires `sendxy=1`)
    EventPositionHead = 0x67,
    /// Touch coordinate while in sleep mode
    EventSleepPositionHead = 0x68,
    /// String variable data
    StringHead = 0x70,
    /// Numeric variable data
    NumberHead = 0x71,
    /// Display entered sleep mode
    EventSleep = 0x86,
    /// Display woke up
    EventWakeup = 0x87,
    /// Power-on initialization finished
    EventLaunched = 0x88,
    /// Started a microSD firmware upgrade
    EventUpgraded = 0x89,
    TransparentDataFinished = 0xFD,
    TransparentDataReady = 0xFE,
}

impl ReturnCode {
    /// Parse a return code from its wire format byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        let code = match byte {
            0x00 => ReturnCode::InvalidInstruction,
            0x01 => ReturnCode::InstructionSuccessful,
            0x02 => ReturnCode::InvalidComponentId,
            0x03 => ReturnCode::InvalidPageId,
            0x04 => ReturnCode::InvalidPictureId,
            0x05 => ReturnCode::InvalidFontId,
            0x11 => ReturnCode::InvalidBaudRate,
            0x12 => ReturnCode::InvalidCurveControl,
            0x1A => ReturnCode::InvalidVariableName,
            0x1B => ReturnCode::InvalidVariableOperation,
            0x1C => ReturnCode::AssignmentFailed,
            0x1D => ReturnCode::EepromOperationFailed,
            0x1E => ReturnCode::InvalidParameterQuantity,
            0x1F => ReturnCode::IoOperationFailed,
            0x20 => ReturnCode::UndefinedEscapeCharacters,
            0x23 => ReturnCode::VariableNameTooLong,
            0x24 => ReturnCode::SerialBufferOverflow,
            0x65 => ReturnCode::EventTouchHead,
            0x66 => ReturnCode::CurrentPageIdHead,
            0x67 => ReturnCode::EventPositionHead,
            0x68 => ReturnCode::EventSleepPositionHead,
            0x70 => ReturnCode::StringHead,
            0x71 => ReturnCode::NumberHead,
            0x86 => ReturnCode::EventSleep,
            0x87 => ReturnCode::EventWakeup,
            0x88 => ReturnCode::EventLaunched,
            0x89 => ReturnCode::EventUpgraded,
            0xFD => ReturnCode::TransparentDataFinished,
            0xFE => ReturnCode::TransparentDataReady,
            _ => return None,
        };
        Some(code)
    }

    /// Convert to wire format byte
    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    /// Returns true for the codes that head an event frame with a payload
    pub fn is_event_head(&self) -> bool {
        matches!(
            self,
            ReturnCode::EventTouchHead
                | ReturnCode::CurrentPageIdHead
                | ReturnCode::EventPositionHead
                | ReturnCode::EventSleepPositionHead
                | ReturnCode::StringHead
                | ReturnCode::NumberHead
        )
    }

    /// Returns true if this code answers a host instruction
    pub fn is_instruction_result(&self) -> bool {
        self.to_byte() <= 0x24
    }

    /// Returns true if this code reports a failed instruction
    pub fn is_error(&self) -> bool {
        self.is_instruction_result() && *self != ReturnCode::InstructionSuccessful
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for byte in 0..=u8::MAX {
            if let Some(code) = ReturnCode::from_byte(byte) {
                assert_eq!(code.to_byte(), byte);
            }
        }
    }

    #[test]
    fn test_unknown_code() {
        assert!(ReturnCode::from_byte(0x99).is_none());
        assert!(ReturnCode::from_byte(0xFF).is_none());
        assert!(ReturnCode::from_byte(0x06).is_none());
    }

    #[test]
    fn test_event_heads() {
        let heads = [0x65, 0x66, 0x67, 0x68, 0x70, 0x71];
        for byte in 0..=u8::MAX {
            if let Some(code) = ReturnCode::from_byte(byte) {
                assert_eq!(code.is_event_head(), heads.contains(&byte));
            }
        }
    }

    #[test]
    fn test_instruction_results() {
        assert!(ReturnCode::InstructionSuccessful.is_instruction_result());
        assert!(!ReturnCode::InstructionSuccessful.is_error());
        assert!(ReturnCode::InvalidPageId.is_error());
        assert!(ReturnCode::SerialBufferOverflow.is_error());
        assert!(!ReturnCode::EventSleep.is_instruction_result());
        assert!(!ReturnCode::StringHead.is_error());
    }
}
