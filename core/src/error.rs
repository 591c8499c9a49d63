use std::any::Any;
use std::fmt::{self, Debug, Display, Formatter};

use crate::panic::{payload_message, Cause, Panic};

/// Ordinary, recoverable error produced by the unwind boundary from anything that unwound.
///
/// The original payload is kept as the [cause](Self::cause); when it is a [`Panic`] or another [`Error`] it is also
/// exposed through [`std::error::Error::source`].
pub struct Error {
  message: String,
  cause: Option<Cause>,
}
impl Error {
  pub const NAME: &'static str = "Error";

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

  /// Normalizes an unwinding `payload` into an error.
  ///
  /// - A [`Panic`] is demoted: the error takes over its message, and the panic itself becomes the cause.
  /// - An [`Error`] is passed through.
  /// - Anything else is wrapped, with its message if it is a string, and becomes the cause.
  pub fn from_payload(payload: Box<dyn Any + Send>) -> Self {
    let payload = match payload.downcast::<Error>() {
      Ok(error) => return *error,
      Err(payload) => payload,
    };
    let message = payload_message(payload.as_ref()).unwrap_or(UNKNOWN_PAYLOAD).to_owned();
    Self::new(message).caused_by(Cause::from_payload(payload))
  }
}

pub(crate) const UNKNOWN_PAYLOAD: &str = "unknown panic payload";

impl Display for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(&self.message)
  }
}
impl Debug for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.debug_struct("Error")
      .field("message", &self.message)
      .field("cause", &self.cause)
      .finish()
  }
}
impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    let cause = self.cause.as_ref()?;
    if let Some(panic) = cause.downcast_ref::<Panic>() {
      Some(panic)
    } else if let Some(error) = cause.downcast_ref::<Error>() {
      Some(error)
    } else {
      None
    }
  }
}
