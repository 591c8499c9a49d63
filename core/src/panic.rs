use std::any::Any;
use std::fmt::{self, Debug, Formatter};

use thiserror::Error;

/// Owned, type-erased value that caused a [`Panic`] or an [`Error`](crate::Error).
///
/// The value is carried verbatim: it is never stringified, and can be [downcast](Self::downcast_ref) back to its
/// original type.
pub struct Cause(Box<dyn Any + Send>);
impl Cause {
  #[inline]
  pub fn new<C: Any + Send>(cause: C) -> Self {
    Self(Box::new(cause))
  }
  /// Creates a cause from an unwinding payload, as returned by [`std::panic::catch_unwind`], without boxing it again.
  #[inline]
  pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
    Self(payload)
  }
  #[inline]
  pub fn into_payload(self) -> Box<dyn Any + Send> {
    self.0
  }

  #[inline]
  pub fn is<C: Any>(&self) -> bool { self.0.is::<C>() }
  #[inline]
  pub fn downcast_ref<C: Any>(&self) -> Option<&C> { self.0.downcast_ref() }
  #[inline]
  pub fn downcast<C: Any>(self) -> Result<C, Self> {
    self.0.downcast().map(|c| *c).map_err(Self)
  }

  /// Returns a human-readable message for causes that carry one: string slices, strings, panics, and errors.
  pub fn message(&self) -> Option<&str> {
    payload_message(self.0.as_ref())
  }
}
impl Debug for Cause {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self.message() {
      Some(message) => f.debug_tuple("Cause").field(&message).finish(),
      None => f.write_str("Cause(<opaque>)"),
    }
  }
}

pub(crate) fn payload_message(payload: &(dyn Any + Send)) -> Option<&str> {
  if let Some(message) = payload.downcast_ref::<&'static str>() {
    Some(message)
  } else if let Some(message) = payload.downcast_ref::<String>() {
    Some(message.as_str())
  } else if let Some(panic) = payload.downcast_ref::<Panic>() {
    Some(panic.message())
  } else if let Some(error) = payload.downcast_ref::<crate::Error>() {
    Some(error.message())
  } else {
    None
  }
}


/// Unrecoverable contract violation, such as unwrapping the wrong variant.
///
/// A panic is never returned as an [`Outcome`](crate::Outcome); it is [raised](Self::raise) by unwinding with the
/// panic itself as payload. Combinators never catch it. Only the unwind boundary ([`catch_unwind`](crate::catch_unwind))
/// captures it, and only to demote it into an [`Error`](crate::Error).
#[derive(Default, Error)]
#[error("{message}")]
pub struct Panic {
  message: String,
  cause: Option<Cause>,
}
impl Panic {
  pub const NAME: &'static str = "Panic";

  #[inline]
  pub fn new(message: impl Into<String>) -> Self {
    Self { message: message.into(), cause: None }
  }
  #[inline]
  pub fn with_cause<C: Any + Send>(self, cause: C) -> Self {
    self.caused_by(Cause::new(cause))
  }
  #[inline]
  pub fn caused_by(mut self, cause: Cause) -> Self {
    self.cause = Some(cause);
    self
  }

  #[inline]
  pub fn name(&self) -> &'static str { Self::NAME }
  #[inline]
  pub fn message(&self) -> &str { &self.message }
  #[inline]
  pub fn cause(&self) -> Option<&Cause> { self.cause.as_ref() }
  #[inline]
  pub fn into_cause(self) -> Option<Cause> { self.cause }

  /// Unwinds the current thread with this panic as the payload.
  #[track_caller]
  pub fn raise(self) -> ! {
    std::panic::panic_any(self)
  }

  /// Returns whether `payload`, as caught by an unwind guard, is a [`Panic`].
  #[inline]
  pub fn is_payload(payload: &(dyn Any + Send)) -> bool {
    payload.is::<Panic>()
  }
}
impl Debug for Panic {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.debug_struct("Panic")
      .field("message", &self.message)
      .field("cause", &self.cause)
      .finish()
  }
}

/// Raises a [`Panic`] with `message` and the payload of the unexpected variant as its cause.
#[cold]
#[track_caller]
pub(crate) fn raise_with_cause<C: Any + Send>(message: &str, cause: C) -> ! {
  Panic::new(message).with_cause(cause).raise()
}

#[cold]
#[track_caller]
pub(crate) fn raise(message: &str) -> ! {
  Panic::new(message).raise()
}
