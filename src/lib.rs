//! # Overview
//!
//! `midly_serial` decodes raw MIDI byte streams, as received from a UART wired to a MIDI port, one
//! byte at a time.
//! It never allocates, never blocks, and does a constant amount of work per byte, which makes it
//! suitable for calling straight from a receive interrupt.
//!
//! Completed messages are dispatched to handlers registered per [`EventKind`](enum.EventKind.html):
//!
//! ```rust
//! use core::cell::Cell;
//! use midly_serial::{num::{u4, u7}, EventKind, Receiver};
//!
//! let notes = Cell::new(0);
//! let on_note_on = |_channel: u4, _key: u7, _vel: u7| notes.set(notes.get() + 1);
//!
//! let mut midi = Receiver::new();
//! midi.register_handler(EventKind::NoteOn, Some(&on_note_on));
//!
//! // Note on, then a second note on through running status, with a timing clock in between.
//! for &byte in &[0x90, 0x3C, 0x40, 0x3E, 0xF8, 0x40] {
//!     midi.receive(byte).unwrap();
//! }
//! assert_eq!(notes.get(), 2);
//! ```
//!
//! # Streams and registries
//!
//! The decoding state lives in a [`MidiStream`](struct.MidiStream.html) and the handlers live in a
//! [`Registry`](struct.Registry.html).
//! [`Receiver`](struct.Receiver.html) bundles one of each, but several streams (for example, one
//! per MIDI input port) may share a single registry.
//!
//! # Supported messages
//!
//! - All 8 System Realtime status bytes (`0xF8 ..= 0xFF`), which are dispatched immediately and
//!   never interfere with the message being assembled.
//! - All 7 Channel Voice messages (`0x80 ..= 0xEF`), including running status.
//!
//! System Common and System Exclusive messages (`0xF0 ..= 0xF7`) are skipped.
//! They do however end any running status, so their data bytes are never misattributed to a
//! channel message.
//!
//! # Errors
//!
//! Functions return [`Result`](type.Result.html)s, which can be turned into the signed status
//! codes embedded code often prefers through [`StatusExt`](trait.StatusExt.html).
//!
//! # About features
//!
//! The crate is always `no_std` and allocation-free.
//!
//! - The `std` feature integrates the error type with `std::error::Error`.
//! - The `defmt` feature emits decoder diagnostics through `defmt` and derives `defmt::Format`
//!   on the public types.
//! - The `log` feature emits decoder diagnostics through the `log` facade.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

macro_rules! bail {
    ($err:expr) => {{
        return Err($err.into());
    }};
}

/// Diagnostics go to whichever logger is enabled, and compile to nothing otherwise.
macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::trace!($($arg)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        log::trace!($($arg)*);
    }};
}
macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
        #[cfg(all(feature = "log", not(feature = "defmt")))]
        log::debug!($($arg)*);
    }};
}

mod prelude {
    pub(crate) use crate::{
        error::{Error, Result},
        primitive::{u4, u7},
    };
    pub(crate) use core::{fmt, mem};
}

mod error;
mod event;
mod primitive;
mod receiver;
mod registry;
mod stream;

pub use crate::{
    error::{
        Error, Result, StatusExt, STATUS_BAD_CHANNEL_STATE, STATUS_BAD_EVENT_HANDLER, STATUS_OK,
    },
    event::EventKind,
    receiver::Receiver,
    registry::{Handler, Registry},
    stream::MidiStream,
};

/// Exotically-sized integers used by the MIDI standard.
pub mod num {
    pub use crate::primitive::{u4, u7};
}

/// The bit rate of a standard MIDI serial link: 31.25 kbaud, 8-N-1.
///
/// The decoder does not use this value.
/// It is provided as a convenience, and as a reminder, for configuring the UART that feeds it.
pub const BAUD_RATE: u32 = 31_250;
