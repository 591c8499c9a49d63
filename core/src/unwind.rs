//! The single boundary where unwinding, including a [`Panic`](crate::Panic), is turned into an ordinary [`Error`].

use std::any::Any;

use tracing::debug;

use crate::error::Error;
use crate::outcome::Outcome;
use crate::panic::Panic;

/// Runs `f`, wrapping its return value in `Ok`, or normalizing anything it unwinds with into `Err`.
///
/// See [`Error::from_payload`] for how payloads are normalized; a panic is demoted into an error caused by the original
/// panic.
pub fn catch_unwind<T>(f: impl FnOnce() -> T) -> Outcome<T, Error> {
  match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
    Ok(value) => Outcome::Ok(value),
    Err(payload) => Outcome::Err(demote(payload)),
  }
}

/// Normalizes an unwinding `payload` caught at an unwind boundary into an [`Error`].
pub fn demote(payload: Box<dyn Any + Send>) -> Error {
  let was_panic = Panic::is_payload(payload.as_ref());
  let error = Error::from_payload(payload);
  debug!(error = error.message(), was_panic, "caught unwinding payload at unwind boundary");
  error
}
