//! The byte-at-a-time decoder for raw, undelimited MIDI streams.
//!
//! A raw MIDI stream, as it comes out of a UART wired to a MIDI DIN port, has no delimiters in
//! between messages.
//! Messages are told apart by their status byte (top bit set), and to save bandwidth a sender may
//! omit the status byte of a channel message if it matches the previous one ("running status").
//! On top of that, single-byte System Realtime messages may be spliced in anywhere, even in
//! between the data bytes of another message.
//!
//! [`MidiStream`](struct.MidiStream.html) handles all of these quirks, one byte per call, without
//! allocating and in constant time.

use crate::{event::EventKind, prelude::*, registry::Registry};
use heapless::Vec;

/// The most data bytes any supported message carries.
const MAX_DATA: usize = 2;

/// A streaming raw MIDI decoder.
/// This decoder takes raw MIDI bytes, *not* `.mid` files!
///
/// Every byte received from the wire must be passed to [`receive`](#method.receive), in arrival
/// order.
/// Completed events are dispatched through a [`Registry`](struct.Registry.html) before `receive`
/// returns.
///
/// Each independent stream needs its own `MidiStream`, but any number of them may share a
/// `Registry`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MidiStream {
    /// The last channel status byte, reused by data bytes until another status byte arrives.
    status: Option<u8>,
    /// Data bytes received so far for the message in progress.
    data: Vec<u7, MAX_DATA>,
}
impl MidiStream {
    /// Create a fresh decoder, with no running status.
    #[inline]
    pub const fn new() -> MidiStream {
        MidiStream {
            status: None,
            data: Vec::new(),
        }
    }

    /// The current running status, if any.
    ///
    /// This is always a channel status byte, in the range `0x80 ..= 0xEF`.
    #[inline]
    pub fn running_status(&self) -> Option<u8> {
        self.status
    }

    /// Data bytes received so far for the message in progress.
    #[inline]
    pub fn pending(&self) -> &[u7] {
        &self.data
    }

    /// The amount of data bytes the message in progress needs in total, or `0` when idle.
    #[inline]
    pub fn expected(&self) -> usize {
        self.status
            .and_then(EventKind::from_status)
            .map(EventKind::data_len)
            .unwrap_or(0)
    }

    /// Drop the running status and any partially received message.
    ///
    /// Useful when the transport reports an error or reconnects, since whatever was in flight
    /// cannot be trusted.
    #[inline]
    pub fn reset(&mut self) {
        self.status = None;
        self.data.clear();
    }

    /// Process a single byte that arrived from the wire.
    ///
    /// On success, returns the number of handlers invoked as a consequence of this byte, which is
    /// either `0` or `1`.
    ///
    /// Fails with `BadChannelState` if a data byte arrives with no running status to attach it
    /// to.
    /// In that case the decoder state is left unchanged and the byte is dropped; the decoder
    /// recovers on its own as soon as a status byte arrives.
    pub fn receive(&mut self, byte: u8, registry: &Registry) -> Result<u8> {
        match byte {
            0xF8..=0xFF => {
                // System Realtime
                // These single-byte events are intended to transmit quick time-sensitive events,
                // and they should be invisible to other messages (that means, they don't alter any
                // decoder state).
                // They can appear in between the status and data bytes of other messages, and even
                // in between the data bytes of other messages.
                Ok(match EventKind::from_status(byte) {
                    Some(kind) => fire(registry, kind, u4::new(0), u7::new(0), u7::new(0)),
                    None => 0,
                })
            }
            0x80..=0xEF => {
                // Channel Voice
                // Starts a new message, which becomes the running status.
                trace!("running status {:#x}", byte);
                self.status = Some(byte);
                self.data.clear();
                Ok(0)
            }
            0x00..=0x7F => {
                // Data byte
                let status = match self.status {
                    Some(status) => status,
                    None => bail!(Error::BadChannelState),
                };
                let kind = match EventKind::from_status(status) {
                    Some(kind) => kind,
                    None => bail!(Error::BadChannelState),
                };
                // The buffer is always emptied as soon as it holds `data_len` bytes, and
                // `data_len <= MAX_DATA`, so there is always room for one more.
                let pushed = self.data.push(u7::new(byte));
                debug_assert!(pushed.is_ok(), "pending data overflow");
                if self.data.len() < kind.data_len() {
                    // Message still assembling
                    return Ok(0);
                }
                let channel = u4::new(status);
                let data1 = self.data[0];
                let data2 = self.data.get(1).copied().unwrap_or_default();
                // Carry on running status, so that the next data byte starts a new message of
                // the same kind.
                self.data.clear();
                Ok(fire(registry, kind, channel, data1, data2))
            }
            _ => {
                // System Common / System Exclusive
                // Not supported, but it does end any running status: data bytes that follow
                // belong to this message, not to the previous channel message.
                debug!("dropping running status on system common byte {:#x}", byte);
                self.reset();
                Ok(0)
            }
        }
    }

    /// Feeds a slice of bytes to the decoder, returning the total number of handlers invoked.
    ///
    /// Calling `feed` with many small slices is equivalent to calling `feed` with one large
    /// concatenation of them all.
    ///
    /// Unlike [`receive`](#method.receive), this method resynchronizes on its own: data bytes
    /// that arrive with no running status are discarded until a status byte shows up.
    pub fn feed(&mut self, bytes: &[u8], registry: &Registry) -> usize {
        let mut fired = 0;
        for &byte in bytes {
            match self.receive(byte, registry) {
                Ok(count) => fired += count as usize,
                Err(_err) => {
                    debug!("discarding data byte {:#x}: {}", byte, _err);
                }
            }
        }
        fired
    }
}

#[inline]
fn fire(registry: &Registry, kind: EventKind, channel: u4, data1: u7, data2: u7) -> u8 {
    registry.dispatch(kind, channel, data1, data2) as u8
}
