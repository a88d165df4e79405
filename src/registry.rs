//! The fixed-size table of event handlers.

use crate::{event::EventKind, prelude::*};

/// A callback invoked with the channel and both data bytes of a completed event.
///
/// Realtime events are dispatched with channel `0` and zero data.
/// One-byte channel events (program change, channel aftertouch) get a zero second data byte.
///
/// Handlers run synchronously inside the byte that completed their event, so they should be
/// quick.
/// Plain functions and non-capturing closures can be registered as `&'static` handlers; state can
/// be shared with handlers through `Cell`s, atomics or similar.
pub type Handler<'a> = &'a dyn Fn(u4, u7, u7);

/// Maps every [`EventKind`](enum.EventKind.html) to an optional handler.
///
/// There is exactly one slot per event kind.
/// Registering a handler replaces whatever was in the slot, and registering `None` clears it.
/// Dispatching to an empty slot is a silent no-op.
///
/// A `Registry` can be shared by any number of [`MidiStream`](struct.MidiStream.html)s.
#[derive(Copy, Clone, Default)]
pub struct Registry<'a> {
    slots: [Option<Handler<'a>>; EventKind::COUNT],
}
impl<'a> Registry<'a> {
    /// Create a registry with every slot empty.
    #[inline]
    pub const fn new() -> Registry<'a> {
        Registry {
            slots: [None; EventKind::COUNT],
        }
    }

    /// Store a handler in the slot for `kind`, or clear it if `handler` is `None`.
    ///
    /// Returns the handler that was previously in the slot.
    #[inline]
    pub fn register(
        &mut self,
        kind: EventKind,
        handler: Option<Handler<'a>>,
    ) -> Option<Handler<'a>> {
        mem::replace(&mut self.slots[kind.index()], handler)
    }

    /// Store a handler in the slot for the event kind with the given raw index.
    ///
    /// Fails with `BadEventHandler` if the index does not name an event kind, leaving the
    /// registry untouched.
    pub fn register_index(&mut self, index: u8, handler: Option<Handler<'a>>) -> Result<()> {
        let kind = match EventKind::from_index(index) {
            Some(kind) => kind,
            None => {
                debug!("rejected handler for out-of-range event kind {}", index);
                bail!(Error::BadEventHandler)
            }
        };
        self.register(kind, handler);
        Ok(())
    }

    /// Clear the slot for `kind`, returning the handler that was there.
    #[inline]
    pub fn unregister(&mut self, kind: EventKind) -> Option<Handler<'a>> {
        self.register(kind, None)
    }

    /// Clear every slot.
    #[inline]
    pub fn clear(&mut self) {
        self.slots = [None; EventKind::COUNT];
    }

    /// Whether a handler is registered for `kind`.
    #[inline]
    pub fn is_registered(&self, kind: EventKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    /// The event kinds that currently have a handler, in index order.
    pub fn registered(&self) -> impl Iterator<Item = EventKind> + '_ {
        EventKind::ALL
            .into_iter()
            .filter(move |kind| self.is_registered(*kind))
    }

    /// Get the handler registered for `kind`.
    #[inline]
    pub fn get(&self, kind: EventKind) -> Option<Handler<'a>> {
        self.slots[kind.index()]
    }

    /// Invoke the handler for `kind`, if there is one.
    ///
    /// Returns whether a handler was invoked.
    #[inline]
    pub fn dispatch(&self, kind: EventKind, channel: u4, data1: u7, data2: u7) -> bool {
        match self.slots[kind.index()] {
            Some(handler) => {
                handler(channel, data1, data2);
                true
            }
            None => false,
        }
    }
}
impl fmt::Debug for Registry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.registered()).finish()
    }
}
#[cfg(feature = "defmt")]
impl defmt::Format for Registry<'_> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Registry[");
        for (i, kind) in self.registered().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", kind);
        }
        defmt::write!(f, "]");
    }
}
