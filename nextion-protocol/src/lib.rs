//! Nextion Display Event Protocol
//!
//! This crate decodes the asynchronous notification frames a Nextion HMI
//! display pushes over its UART link (touch, page change, touch
//! coordinates, string and numeric replies) into typed events.
//!
//! # Protocol Overview
//!
//! Every display-originated frame has the same shape:
//! ```text
//! ┌──────┬─────────────┬────────────────┐
//! │ CODE │ PAYLOAD     │ TERMINATOR     │
//! │ 1B   │ 0–1020B     │ 0xFF 0xFF 0xFF │
//! └──────┴─────────────┴────────────────┘
//! ```
//!
//! The transport layer delimits frames; [`decode`] takes one complete frame
//! and returns an [`Event`] or an error. Decoding is pure and keeps no state,
//! so frames can be decoded from any number of threads at once.
//!
//! ```
//! use nextion_protocol::{decode, Event, TouchState};
//!
//! let event = decode(&[0x65, 0x01, 0x02, 0x01, 0xFF, 0xFF, 0xFF]).unwrap();
//! match event {
//!     Event::Touch(touch) => {
//!         assert_eq!((touch.page_id, touch.component_id), (1, 2));
//!         assert_eq!(touch.touch_state, TouchState::Press);
//!     }
//!     _ => unreachable!(),
//! }
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod codes;
pub mod events;
pub mod frame;
pub mod registry;

pub use codes::ReturnCode;
pub use events::{
    CurrentPageIdEvent, Event, EventFrame, EventText, FrameBuf, NumberEvent, PositionEvent,
    SleepPositionEvent, StringEvent, TouchEvent, TouchState,
};
pub use frame::{
    check_discriminant, check_length, check_terminator, FrameError, FrameLength, MAX_FRAME_SIZE,
    MAX_STRING_LEN, TERMINATOR,
};
pub use registry::{decode, is_decodable, RegistryError};
