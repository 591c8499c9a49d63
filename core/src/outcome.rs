use std::any::Any;
use std::fmt::{self, Display, Formatter};

use crate::maybe::Maybe;
use crate::panic::{self, Cause, Panic};

/// Success-or-failure: either [`Ok`](Outcome::Ok) with a value, or [`Err`](Outcome::Err) with an error.
///
/// The error type is not constrained; it is the caller's domain error. Combinators never panic and never catch a
/// panic raised by a callback. Forcing a value out of the wrong variant raises a [`Panic`] whose cause is the payload of
/// the variant that was actually present.
///
/// Ordering follows `std::result::Result`: any `Ok` sorts before any `Err`, and values of the same variant compare by
/// payload.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome<T, E> {
  Ok(T),
  Err(E),
}

#[inline]
pub const fn ok<T, E>(value: T) -> Outcome<T, E> { Outcome::Ok(value) }
#[inline]
pub const fn err<T, E>(error: E) -> Outcome<T, E> { Outcome::Err(error) }

impl<T, E> Outcome<T, E> {
  #[inline]
  pub fn from_result(result: Result<T, E>) -> Self {
    match result {
      Ok(value) => Self::Ok(value),
      Err(error) => Self::Err(error),
    }
  }
  /// Converts into a std `Result`, for use with the `?` operator.
  #[inline]
  pub fn into_result(self) -> Result<T, E> {
    match self {
      Self::Ok(value) => Ok(value),
      Self::Err(error) => Err(error),
    }
  }

  /// Runs `f`, turning anything it unwinds with into `Err` after mapping it with `map_cause`.
  ///
  /// A [`Panic`] is never captured: it is resumed unchanged.
  pub fn from_throwable_with(f: impl FnOnce() -> T, map_cause: impl FnOnce(Cause) -> E) -> Self {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
      Ok(value) => Self::Ok(value),
      Err(payload) if Panic::is_payload(payload.as_ref()) => std::panic::resume_unwind(payload),
      Err(payload) => Self::Err(map_cause(Cause::from_payload(payload))),
    }
  }

  #[inline]
  pub const fn is_ok(&self) -> bool { matches!(self, Self::Ok(_)) }
  #[inline]
  pub const fn is_err(&self) -> bool { !self.is_ok() }
  #[inline]
  pub fn is_ok_and(self, f: impl FnOnce(T) -> bool) -> bool {
    match self {
      Self::Ok(value) => f(value),
      Self::Err(_) => false,
    }
  }
  #[inline]
  pub fn is_err_and(self, f: impl FnOnce(E) -> bool) -> bool {
    match self {
      Self::Ok(_) => false,
      Self::Err(error) => f(error),
    }
  }

  #[inline]
  pub const fn as_ref(&self) -> Outcome<&T, &E> {
    match self {
      Self::Ok(value) => Outcome::Ok(value),
      Self::Err(error) => Outcome::Err(error),
    }
  }
  #[inline]
  pub fn as_mut(&mut self) -> Outcome<&mut T, &mut E> {
    match self {
      Self::Ok(value) => Outcome::Ok(value),
      Self::Err(error) => Outcome::Err(error),
    }
  }

  /// Applies `f` to the value if `Ok`; an `Err` is passed on untouched.
  #[inline]
  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U, E> {
    match self {
      Self::Ok(value) => Outcome::Ok(f(value)),
      Self::Err(error) => Outcome::Err(error),
    }
  }
  /// Applies `f` to the error if `Err`; an `Ok` is passed on untouched.
  #[inline]
  pub fn map_err<F>(self, f: impl FnOnce(E) -> F) -> Outcome<T, F> {
    match self {
      Self::Ok(value) => Outcome::Ok(value),
      Self::Err(error) => Outcome::Err(f(error)),
    }
  }
  #[inline]
  pub fn map_or<U>(self, default: U, f: impl FnOnce(T) -> U) -> U {
    match self {
      Self::Ok(value) => f(value),
      Self::Err(_) => default,
    }
  }
  #[inline]
  pub fn map_or_else<U>(self, default: impl FnOnce(E) -> U, f: impl FnOnce(T) -> U) -> U {
    match self {
      Self::Ok(value) => f(value),
      Self::Err(error) => default(error),
    }
  }
  #[inline]
  pub fn inspect(self, f: impl FnOnce(&T)) -> Self {
    if let Self::Ok(value) = &self {
      f(value);
    }
    self
  }
  #[inline]
  pub fn inspect_err(self, f: impl FnOnce(&E)) -> Self {
    if let Self::Err(error) = &self {
      f(error);
    }
    self
  }

  #[inline]
  pub fn and<U>(self, other: Outcome<U, E>) -> Outcome<U, E> {
    match self {
      Self::Ok(_) => other,
      Self::Err(error) => Outcome::Err(error),
    }
  }
  /// Chains a fallible operation, short-circuiting on the first `Err`.
  #[inline]
  pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U, E>) -> Outcome<U, E> {
    match self {
      Self::Ok(value) => f(value),
      Self::Err(error) => Outcome::Err(error),
    }
  }
  #[inline]
  pub fn or<F>(self, other: Outcome<T, F>) -> Outcome<T, F> {
    match self {
      Self::Ok(value) => Outcome::Ok(value),
      Self::Err(_) => other,
    }
  }
  /// Recovers from an `Err`, short-circuiting on the first `Ok`.
  #[inline]
  pub fn or_else<F>(self, f: impl FnOnce(E) -> Outcome<T, F>) -> Outcome<T, F> {
    match self {
      Self::Ok(value) => Outcome::Ok(value),
      Self::Err(error) => f(error),
    }
  }

  /// Returns the value, or raises a [`Panic`] with the error as its cause.
  #[inline]
  #[track_caller]
  pub fn unwrap(self) -> T where E: Any + Send {
    self.expect("called `Outcome::unwrap()` on an `Err` value")
  }
  /// Returns the value, or raises a [`Panic`] with `message` and the error as its cause.
  #[inline]
  #[track_caller]
  pub fn expect(self, message: &str) -> T where E: Any + Send {
    match self {
      Self::Ok(value) => value,
      Self::Err(error) => panic::raise_with_cause(message, error),
    }
  }
  /// Returns the error, or raises a [`Panic`] with the value as its cause.
  #[inline]
  #[track_caller]
  pub fn unwrap_err(self) -> E where T: Any + Send {
    self.expect_err("called `Outcome::unwrap_err()` on an `Ok` value")
  }
  /// Returns the error, or raises a [`Panic`] with `message` and the value as its cause.
  #[inline]
  #[track_caller]
  pub fn expect_err(self, message: &str) -> E where T: Any + Send {
    match self {
      Self::Ok(value) => panic::raise_with_cause(message, value),
      Self::Err(error) => error,
    }
  }
  #[inline]
  pub fn unwrap_or(self, default: T) -> T {
    match self {
      Self::Ok(value) => value,
      Self::Err(_) => default,
    }
  }
  #[inline]
  pub fn unwrap_or_else(self, f: impl FnOnce(E) -> T) -> T {
    match self {
      Self::Ok(value) => value,
      Self::Err(error) => f(error),
    }
  }
  #[inline]
  pub fn unwrap_or_default(self) -> T where T: Default {
    self.unwrap_or_else(|_| T::default())
  }

  /// Projects onto the value, discarding the error.
  #[inline]
  pub fn ok(self) -> Maybe<T> {
    match self {
      Self::Ok(value) => Maybe::Some(value),
      Self::Err(_) => Maybe::None,
    }
  }
  /// Projects onto the error, discarding the value.
  #[inline]
  pub fn err(self) -> Maybe<E> {
    match self {
      Self::Ok(_) => Maybe::None,
      Self::Err(error) => Maybe::Some(error),
    }
  }

  /// Consumes `self` by exhaustive case analysis.
  #[inline]
  pub fn match_with<U>(self, ok: impl FnOnce(T) -> U, err: impl FnOnce(E) -> U) -> U {
    match self {
      Self::Ok(value) => ok(value),
      Self::Err(error) => err(error),
    }
  }

  #[inline]
  pub fn iter(&self) -> std::option::IntoIter<&T> {
    self.as_ref().ok().into_iter()
  }
}

impl<T> Outcome<T, Cause> {
  /// Runs `f`, capturing anything it unwinds with, except a [`Panic`], as the error.
  #[inline]
  pub fn from_throwable(f: impl FnOnce() -> T) -> Self {
    Self::from_throwable_with(f, |cause| cause)
  }
}

impl<T, F, E> Outcome<Outcome<T, F>, E> {
  /// Removes exactly one level of nesting; the inner error is converted into the outer one.
  #[inline]
  pub fn flatten(self) -> Outcome<T, E> where F: Into<E> {
    match self {
      Self::Ok(Outcome::Ok(value)) => Outcome::Ok(value),
      Self::Ok(Outcome::Err(error)) => Outcome::Err(error.into()),
      Self::Err(error) => Outcome::Err(error),
    }
  }
}

impl<T, E> Outcome<Maybe<T>, E> {
  #[inline]
  pub fn transpose(self) -> Maybe<Outcome<T, E>> {
    match self {
      Self::Ok(Maybe::Some(value)) => Maybe::Some(Outcome::Ok(value)),
      Self::Ok(Maybe::None) => Maybe::None,
      Self::Err(error) => Maybe::Some(Outcome::Err(error)),
    }
  }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
  #[inline]
  fn from(result: Result<T, E>) -> Self { Self::from_result(result) }
}
impl<T, E> From<Outcome<T, E>> for Result<T, E> {
  #[inline]
  fn from(outcome: Outcome<T, E>) -> Self { outcome.into_result() }
}

/// Collects into `Ok` of all values, or stops at the first `Err`.
impl<A, E, V: FromIterator<A>> FromIterator<Outcome<A, E>> for Outcome<V, E> {
  fn from_iter<I: IntoIterator<Item=Outcome<A, E>>>(iter: I) -> Self {
    Self::from_result(iter.into_iter().map(Outcome::into_result).collect())
  }
}

impl<T, E> IntoIterator for Outcome<T, E> {
  type Item = T;
  type IntoIter = std::option::IntoIter<T>;
  #[inline]
  fn into_iter(self) -> Self::IntoIter { self.ok().into_iter() }
}

impl<T: Display, E: Display> Display for Outcome<T, E> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Self::Ok(value) => write!(f, "Ok({value})"),
      Self::Err(error) => write!(f, "Err({error})"),
    }
  }
}
