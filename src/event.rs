//! The closed set of events the decoder can dispatch.

use crate::prelude::*;

/// Every kind of event a handler can be registered for.
///
/// There are two families:
///
/// - System Realtime events (status bytes `0xF8 ..= 0xFF`) are single bytes with no data.
///   They can show up anywhere in a stream, even in between the data bytes of another message,
///   and are dispatched with a zero channel and zero data.
/// - Channel Voice events (status bytes `0x80 ..= 0xEF`) carry a channel in the low nibble of
///   their status byte, followed by one or two data bytes.
///
/// The declaration order is significant: it defines the [`index`](#method.index) of each kind,
/// which is the value used by raw-index handler registration.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum EventKind {
    /// `0xF8`. If sent, they should be sent 24 times per quarter note.
    TimingClock = 0,
    /// `0xF9`. Undefined by the MIDI spec.
    ReservedF9,
    /// `0xFA`. Request the device to start playing at position 0.
    Start,
    /// `0xFB`. Request the device to continue playing without resetting the position.
    Continue,
    /// `0xFC`. Request the device to stop playing, but keep track of the position where it
    /// stopped.
    Stop,
    /// `0xFD`. Undefined by the MIDI spec.
    ReservedFD,
    /// `0xFE`. Once one of these messages is transmitted, a message should arrive every 300ms or
    /// else the connection is considered broken.
    ActiveSensing,
    /// `0xFF`. Request the device to reset itself.
    ///
    /// Note that the decoder itself does not reset on this message: like every realtime message
    /// it is invisible to the message being assembled.
    Reset,

    /// `0x8n`. Stop playing a note. Data: key, velocity.
    NoteOff,
    /// `0x9n`. Start playing a note. Data: key, velocity.
    NoteOn,
    /// `0xAn`. Modify the velocity of a note after it has been played. Data: key, pressure.
    PolyAftertouch,
    /// `0xBn`. Modify the value of a controller. Data: controller, value.
    ControlChange,
    /// `0xCn`. Change the program of the channel. Data: program.
    ProgramChange,
    /// `0xDn`. Change the pressure of every note on the channel. Data: pressure.
    ChannelAftertouch,
    /// `0xEn`. Bend the pitch of the channel. Data: low 7 bits, high 7 bits.
    PitchBend,
}
impl EventKind {
    /// The amount of event kinds.
    pub const COUNT: usize = 15;

    /// All event kinds, in index order.
    pub const ALL: [EventKind; EventKind::COUNT] = {
        use EventKind::*;
        [
            TimingClock,
            ReservedF9,
            Start,
            Continue,
            Stop,
            ReservedFD,
            ActiveSensing,
            Reset,
            NoteOff,
            NoteOn,
            PolyAftertouch,
            ControlChange,
            ProgramChange,
            ChannelAftertouch,
            PitchBend,
        ]
    };

    /// The position of this kind within [`ALL`](#associatedconstant.ALL).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Get the event kind at a raw index, if the index is in range.
    #[inline]
    pub const fn from_index(index: u8) -> Option<EventKind> {
        if (index as usize) < EventKind::COUNT {
            Some(EventKind::ALL[index as usize])
        } else {
            None
        }
    }

    /// Classify a status byte.
    ///
    /// Returns `None` for data bytes and for the System Common range `0xF0 ..= 0xF7`, which
    /// have no event kind.
    #[inline]
    pub const fn from_status(status: u8) -> Option<EventKind> {
        use EventKind::*;
        Some(match status {
            0xF8 => TimingClock,
            0xF9 => ReservedF9,
            0xFA => Start,
            0xFB => Continue,
            0xFC => Stop,
            0xFD => ReservedFD,
            0xFE => ActiveSensing,
            0xFF => Reset,
            0x80..=0x8F => NoteOff,
            0x90..=0x9F => NoteOn,
            0xA0..=0xAF => PolyAftertouch,
            0xB0..=0xBF => ControlChange,
            0xC0..=0xCF => ProgramChange,
            0xD0..=0xDF => ChannelAftertouch,
            0xE0..=0xEF => PitchBend,
            _ => return None,
        })
    }

    /// Whether this is a one-byte System Realtime event.
    #[inline]
    pub const fn is_realtime(self) -> bool {
        self.index() < EventKind::NoteOff.index()
    }

    /// Whether this is a Channel Voice event.
    #[inline]
    pub const fn is_channel(self) -> bool {
        !self.is_realtime()
    }

    /// The amount of data bytes that follow the status byte.
    ///
    /// Realtime events have no data.
    #[inline]
    pub const fn data_len(self) -> usize {
        use EventKind::*;
        match self {
            ProgramChange | ChannelAftertouch => 1,
            NoteOff | NoteOn | PolyAftertouch | ControlChange | PitchBend => 2,
            _ => 0,
        }
    }

    /// The complete status byte of a realtime event.
    ///
    /// Returns `None` for channel events, whose status byte depends on the channel.
    #[inline]
    pub const fn status_byte(self) -> Option<u8> {
        if self.is_realtime() {
            Some(0xF8 + self.index() as u8)
        } else {
            None
        }
    }

    /// The high nibble of a channel event's status byte.
    ///
    /// Returns `None` for realtime events.
    #[inline]
    pub const fn status_nibble(self) -> Option<u8> {
        if self.is_channel() {
            Some(0x8 + (self.index() - EventKind::NoteOff.index()) as u8)
        } else {
            None
        }
    }

    /// Build the status byte for a channel event on the given channel.
    ///
    /// Returns `None` for realtime events.
    #[inline]
    pub fn channel_status(self, channel: u4) -> Option<u8> {
        self.status_nibble()
            .map(|nibble| nibble << 4 | channel.as_int())
    }
}
impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
