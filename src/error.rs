//! Error and status-code plumbing.
//!
//! Errors are reported to the immediate caller and never retried.
//! Embedded callers that speak in signed status codes can convert any result through
//! [`StatusExt`](trait.StatusExt.html).

use thiserror::Error;

/// Status code for a successful operation.
pub const STATUS_OK: i8 = 0;
/// Status code for a registration that referenced an event kind outside the valid set.
pub const STATUS_BAD_EVENT_HANDLER: i8 = -1;
/// Status code for a data byte that arrived with no running status established.
pub const STATUS_BAD_CHANNEL_STATE: i8 = -2;

/// The errors this crate produces.
///
/// Neither error corrupts decoder state: the operation that failed left everything as it was.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A handler registration referenced an event kind index outside the 15 defined kinds.
    #[error("invalid event kind for handler registration")]
    BadEventHandler,
    /// A data byte arrived while no running status was established.
    ///
    /// The stream is desynchronized, or the decoder was attached mid-message.
    /// The caller decides whether to discard bytes until a status byte shows up.
    #[error("data byte received with no running status")]
    BadChannelState,
}
impl Error {
    /// The negative status code associated with this error.
    #[inline]
    pub const fn code(self) -> i8 {
        match self {
            Error::BadEventHandler => STATUS_BAD_EVENT_HANDLER,
            Error::BadChannelState => STATUS_BAD_CHANNEL_STATE,
        }
    }

    /// Recover an error from its status code, if the code denotes one.
    #[inline]
    pub const fn from_code(code: i8) -> Option<Error> {
        match code {
            STATUS_BAD_EVENT_HANDLER => Some(Error::BadEventHandler),
            STATUS_BAD_CHANNEL_STATE => Some(Error::BadChannelState),
            _ => None,
        }
    }
}

/// Render results as the signed status codes used on the C-shaped boundary.
///
/// Non-negative codes carry the success value (a callback count, or `0` for unit results).
/// Negative codes are [`Error::code`](enum.Error.html#method.code).
pub trait StatusExt {
    fn status(self) -> i8;
}
impl StatusExt for Result<()> {
    #[inline]
    fn status(self) -> i8 {
        match self {
            Ok(()) => STATUS_OK,
            Err(err) => err.code(),
        }
    }
}
impl StatusExt for Result<u8> {
    #[inline]
    fn status(self) -> i8 {
        match self {
            // At most one callback fires per byte, so the count always fits.
            Ok(count) => count.min(i8::MAX as u8) as i8,
            Err(err) => err.code(),
        }
    }
}

/// The result type used by the decoder.
pub type Result<T> = StdResult<T, Error>;
pub(crate) use core::result::Result as StdResult;
