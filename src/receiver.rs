//! A single-stream decoder bundled with its own handler table.
//!
//! This is the shape most firmware wants: one UART, one decoder, a handful of callbacks.
//! Firmware that decodes several ports with the same handlers should pair one
//! [`Registry`](../struct.Registry.html) with several [`MidiStream`](../struct.MidiStream.html)s
//! instead.

use crate::{
    error::StatusExt,
    event::EventKind,
    prelude::*,
    registry::{Handler, Registry},
    stream::MidiStream,
};

/// A [`MidiStream`](struct.MidiStream.html) together with the
/// [`Registry`](struct.Registry.html) it dispatches to.
///
/// ```rust
/// use core::sync::atomic::{AtomicU8, Ordering};
/// use midly_serial::{num::{u4, u7}, EventKind, Receiver};
///
/// static LAST_KEY: AtomicU8 = AtomicU8::new(0);
///
/// fn on_note_on(_channel: u4, key: u7, _vel: u7) {
///     LAST_KEY.store(key.as_int(), Ordering::Relaxed);
/// }
///
/// let mut midi = Receiver::new();
/// midi.register_handler(EventKind::NoteOn, Some(&on_note_on));
/// for &byte in &[0x90, 0x3C, 0x40] {
///     midi.receive(byte).unwrap();
/// }
/// assert_eq!(LAST_KEY.load(Ordering::Relaxed), 0x3C);
/// ```
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Receiver<'a> {
    stream: MidiStream,
    registry: Registry<'a>,
}
impl<'a> Receiver<'a> {
    /// Create a receiver with no running status and no handlers.
    #[inline]
    pub const fn new() -> Receiver<'a> {
        Receiver {
            stream: MidiStream::new(),
            registry: Registry::new(),
        }
    }

    /// Register a handler for `kind`, or clear the slot with `None`.
    ///
    /// Returns the previously registered handler.
    #[inline]
    pub fn register_handler(
        &mut self,
        kind: EventKind,
        handler: Option<Handler<'a>>,
    ) -> Option<Handler<'a>> {
        self.registry.register(kind, handler)
    }

    /// Register a handler by raw event kind index.
    ///
    /// Fails with `BadEventHandler` if `index` is not below
    /// [`EventKind::COUNT`](enum.EventKind.html#associatedconstant.COUNT).
    #[inline]
    pub fn register_handler_index(
        &mut self,
        index: u8,
        handler: Option<Handler<'a>>,
    ) -> Result<()> {
        self.registry.register_index(index, handler)
    }

    /// Process a byte that arrived from the wire.
    ///
    /// See [`MidiStream::receive`](struct.MidiStream.html#method.receive).
    #[inline]
    pub fn receive(&mut self, byte: u8) -> Result<u8> {
        self.stream.receive(byte, &self.registry)
    }

    /// Process a byte, reporting the outcome as a signed status code.
    ///
    /// Non-negative values are the number of handlers invoked, negative values are error codes
    /// (see [`Error::code`](enum.Error.html#method.code)).
    #[inline]
    pub fn receive_status(&mut self, byte: u8) -> i8 {
        self.receive(byte).status()
    }

    /// Process a slice of bytes, discarding desynchronized data bytes.
    ///
    /// See [`MidiStream::feed`](struct.MidiStream.html#method.feed).
    #[inline]
    pub fn feed(&mut self, bytes: &[u8]) -> usize {
        self.stream.feed(bytes, &self.registry)
    }

    /// Drop the running status and any partially received message, keeping the handlers.
    #[inline]
    pub fn reset(&mut self) {
        self.stream.reset()
    }

    /// The decoder state.
    #[inline]
    pub fn stream(&self) -> &MidiStream {
        &self.stream
    }

    /// The handler table.
    #[inline]
    pub fn registry(&self) -> &Registry<'a> {
        &self.registry
    }

    /// Mutable access to the handler table.
    #[inline]
    pub fn registry_mut(&mut self) -> &mut Registry<'a> {
        &mut self.registry
    }
}
