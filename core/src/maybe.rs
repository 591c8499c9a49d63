use std::fmt::{self, Display, Formatter};

use crate::outcome::Outcome;
use crate::panic;

/// Value-or-absence: either [`Some`](Maybe::Some) value, or [`None`](Maybe::None).
///
/// The variant of a `Maybe` never changes after construction. Navigating through the combinators never panics;
/// forcing the value out of a `None` with [`unwrap`](Self::unwrap) or [`expect`](Self::expect) raises a
/// [`Panic`](crate::Panic).
///
/// Ordering follows `std::option::Option`: `None` sorts before any `Some`, and `Some` values compare by payload.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Maybe<T> {
  None,
  Some(T),
}
impl<T> Default for Maybe<T> {
  #[inline]
  fn default() -> Self { Self::None }
}

#[inline]
pub const fn some<T>(value: T) -> Maybe<T> { Maybe::Some(value) }
#[inline]
pub const fn none<T>() -> Maybe<T> { Maybe::None }

impl<T> Maybe<T> {
  /// Converts a native "no value" sentinel into a `Maybe`.
  #[inline]
  pub fn from_nullish(value: Option<T>) -> Self {
    match value {
      Some(value) => Self::Some(value),
      None => Self::None,
    }
  }
  #[inline]
  pub fn into_option(self) -> Option<T> {
    match self {
      Self::Some(value) => Some(value),
      Self::None => None,
    }
  }

  #[inline]
  pub const fn is_some(&self) -> bool { matches!(self, Self::Some(_)) }
  #[inline]
  pub const fn is_none(&self) -> bool { !self.is_some() }
  #[inline]
  pub fn is_some_and(self, f: impl FnOnce(T) -> bool) -> bool {
    match self {
      Self::Some(value) => f(value),
      Self::None => false,
    }
  }
  #[inline]
  pub fn is_none_or(self, f: impl FnOnce(T) -> bool) -> bool {
    match self {
      Self::Some(value) => f(value),
      Self::None => true,
    }
  }

  #[inline]
  pub const fn as_ref(&self) -> Maybe<&T> {
    match self {
      Self::Some(value) => Maybe::Some(value),
      Self::None => Maybe::None,
    }
  }
  #[inline]
  pub fn as_mut(&mut self) -> Maybe<&mut T> {
    match self {
      Self::Some(value) => Maybe::Some(value),
      Self::None => Maybe::None,
    }
  }

  /// Applies `f` to the value if `Some`; `None` is propagated untouched.
  #[inline]
  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Maybe<U> {
    match self {
      Self::Some(value) => Maybe::Some(f(value)),
      Self::None => Maybe::None,
    }
  }
  #[inline]
  pub fn map_or<U>(self, default: U, f: impl FnOnce(T) -> U) -> U {
    match self {
      Self::Some(value) => f(value),
      Self::None => default,
    }
  }
  #[inline]
  pub fn map_or_else<U>(self, default: impl FnOnce() -> U, f: impl FnOnce(T) -> U) -> U {
    match self {
      Self::Some(value) => f(value),
      Self::None => default(),
    }
  }
  #[inline]
  pub fn inspect(self, f: impl FnOnce(&T)) -> Self {
    if let Self::Some(value) = &self {
      f(value);
    }
    self
  }

  #[inline]
  pub fn and<U>(self, other: Maybe<U>) -> Maybe<U> {
    match self {
      Self::Some(_) => other,
      Self::None => Maybe::None,
    }
  }
  /// Chains an operation that can itself produce absence.
  #[inline]
  pub fn and_then<U>(self, f: impl FnOnce(T) -> Maybe<U>) -> Maybe<U> {
    match self {
      Self::Some(value) => f(value),
      Self::None => Maybe::None,
    }
  }
  /// Narrows `Some` to `None` when `predicate` returns false.
  #[inline]
  pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
    match self {
      Self::Some(value) if predicate(&value) => Self::Some(value),
      _ => Self::None,
    }
  }

  #[inline]
  pub fn or(self, other: Self) -> Self {
    match self {
      Self::Some(_) => self,
      Self::None => other,
    }
  }
  #[inline]
  pub fn or_else(self, f: impl FnOnce() -> Self) -> Self {
    match self {
      Self::Some(_) => self,
      Self::None => f(),
    }
  }
  /// Returns `Some` iff exactly one of `self` and `other` is `Some`.
  #[inline]
  pub fn xor(self, other: Self) -> Self {
    match (self, other) {
      (Self::Some(value), Self::None) | (Self::None, Self::Some(value)) => Self::Some(value),
      _ => Self::None,
    }
  }
  #[inline]
  pub fn zip<U>(self, other: Maybe<U>) -> Maybe<(T, U)> {
    match (self, other) {
      (Self::Some(a), Maybe::Some(b)) => Maybe::Some((a, b)),
      _ => Maybe::None,
    }
  }

  /// Returns the value, or raises a [`Panic`](crate::Panic) when called on `None`.
  #[inline]
  #[track_caller]
  pub fn unwrap(self) -> T {
    match self {
      Self::Some(value) => value,
      Self::None => panic::raise("called `Maybe::unwrap()` on a `None` value"),
    }
  }
  /// Returns the value, or raises a [`Panic`](crate::Panic) with `message` when called on `None`.
  #[inline]
  #[track_caller]
  pub fn expect(self, message: &str) -> T {
    match self {
      Self::Some(value) => value,
      Self::None => panic::raise(message),
    }
  }
  #[inline]
  pub fn unwrap_or(self, default: T) -> T {
    match self {
      Self::Some(value) => value,
      Self::None => default,
    }
  }
  #[inline]
  pub fn unwrap_or_else(self, f: impl FnOnce() -> T) -> T {
    match self {
      Self::Some(value) => value,
      Self::None => f(),
    }
  }
  #[inline]
  pub fn unwrap_or_default(self) -> T where T: Default {
    self.unwrap_or_else(T::default)
  }

  #[inline]
  pub fn ok_or<E>(self, error: E) -> Outcome<T, E> {
    match self {
      Self::Some(value) => Outcome::Ok(value),
      Self::None => Outcome::Err(error),
    }
  }
  #[inline]
  pub fn ok_or_else<E>(self, f: impl FnOnce() -> E) -> Outcome<T, E> {
    match self {
      Self::Some(value) => Outcome::Ok(value),
      Self::None => Outcome::Err(f()),
    }
  }

  /// Consumes `self` by exhaustive case analysis.
  #[inline]
  pub fn match_with<U>(self, some: impl FnOnce(T) -> U, none: impl FnOnce() -> U) -> U {
    match self {
      Self::Some(value) => some(value),
      Self::None => none(),
    }
  }

  #[inline]
  pub fn iter(&self) -> std::option::IntoIter<&T> {
    self.as_ref().into_option().into_iter()
  }
}

impl<T> Maybe<Maybe<T>> {
  /// Removes exactly one level of nesting.
  #[inline]
  pub fn flatten(self) -> Maybe<T> {
    self.and_then(|inner| inner)
  }
}

impl<T, E> Maybe<Outcome<T, E>> {
  #[inline]
  pub fn transpose(self) -> Outcome<Maybe<T>, E> {
    match self {
      Self::Some(Outcome::Ok(value)) => Outcome::Ok(Maybe::Some(value)),
      Self::Some(Outcome::Err(error)) => Outcome::Err(error),
      Self::None => Outcome::Ok(Maybe::None),
    }
  }
}

impl<T> From<Option<T>> for Maybe<T> {
  #[inline]
  fn from(value: Option<T>) -> Self { Self::from_nullish(value) }
}
impl<T> From<Maybe<T>> for Option<T> {
  #[inline]
  fn from(value: Maybe<T>) -> Self { value.into_option() }
}

impl<T> IntoIterator for Maybe<T> {
  type Item = T;
  type IntoIter = std::option::IntoIter<T>;
  #[inline]
  fn into_iter(self) -> Self::IntoIter { self.into_option().into_iter() }
}
impl<'a, T> IntoIterator for &'a Maybe<T> {
  type Item = &'a T;
  type IntoIter = std::option::IntoIter<&'a T>;
  #[inline]
  fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<T: Display> Display for Maybe<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Self::Some(value) => write!(f, "Some({value})"),
      Self::None => f.write_str("None"),
    }
  }
}

// `Some(v)` projects to `v`, `None` projects to `null`.
#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Maybe<T> {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Self::Some(value) => serializer.serialize_some(value),
      Self::None => serializer.serialize_none(),
    }
  }
}
#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for Maybe<T> {
  fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Option::<T>::deserialize(deserializer).map(Self::from_nullish)
  }
}
