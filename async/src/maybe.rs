use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use rop_core::{Maybe, Outcome};

use crate::outcome::AsyncOutcome;
use crate::util::maybe_send::{BoxFuture, MaybeSend, MaybeSendFuture};

/// A [`Maybe`] that is still being computed.
///
/// Like [`AsyncOutcome`], awaiting it produces the `Maybe`, and each combinator awaits the wrapped computation once and
/// wraps the result again.
#[must_use = "an async maybe does nothing unless awaited"]
pub struct AsyncMaybe<'a, T> {
  inner: BoxFuture<'a, Maybe<T>>,
}

#[inline]
pub fn async_some<'a, T: MaybeSend + 'a>(value: T) -> AsyncMaybe<'a, T> {
  AsyncMaybe::from_maybe(Maybe::Some(value))
}
#[inline]
pub fn async_none<'a, T: MaybeSend + 'a>() -> AsyncMaybe<'a, T> {
  AsyncMaybe::from_maybe(Maybe::None)
}

impl<'a, T: MaybeSend + 'a> AsyncMaybe<'a, T> {
  /// Wraps a computation of a maybe. This may be another `AsyncMaybe`.
  #[inline]
  pub fn new(computation: impl Future<Output=Maybe<T>> + MaybeSend + 'a) -> Self {
    Self { inner: computation.boxed_maybe_send() }
  }
  #[inline]
  pub fn from_maybe(maybe: Maybe<T>) -> Self {
    Self::new(std::future::ready(maybe))
  }
  /// Wraps a computation that produces a std `Option`.
  #[inline]
  pub fn from_future(computation: impl Future<Output=Option<T>> + MaybeSend + 'a) -> Self {
    Self::new(async move { Maybe::from_nullish(computation.await) })
  }

  #[inline]
  pub fn is_some(self) -> impl Future<Output=bool> + MaybeSend + 'a {
    async move { self.await.is_some() }
  }
  #[inline]
  pub fn is_none(self) -> impl Future<Output=bool> + MaybeSend + 'a {
    async move { self.await.is_none() }
  }
  pub fn is_some_and(self, f: impl FnOnce(T) -> bool + MaybeSend + 'a) -> impl Future<Output=bool> + MaybeSend + 'a {
    async move { self.await.is_some_and(f) }
  }
  pub fn is_none_or(self, f: impl FnOnce(T) -> bool + MaybeSend + 'a) -> impl Future<Output=bool> + MaybeSend + 'a {
    async move { self.await.is_none_or(f) }
  }

  pub fn map<U: MaybeSend + 'a>(self, f: impl FnOnce(T) -> U + MaybeSend + 'a) -> AsyncMaybe<'a, U> {
    AsyncMaybe::new(async move { self.await.map(f) })
  }
  pub fn map_async<U: MaybeSend + 'a, Fut>(self, f: impl FnOnce(T) -> Fut + MaybeSend + 'a) -> AsyncMaybe<'a, U> where
    Fut: Future<Output=U> + MaybeSend + 'a,
  {
    AsyncMaybe::new(async move {
      match self.await {
        Maybe::Some(value) => Maybe::Some(f(value).await),
        Maybe::None => Maybe::None,
      }
    })
  }
  pub fn map_or<U: MaybeSend + 'a>(
    self,
    default: U,
    f: impl FnOnce(T) -> U + MaybeSend + 'a,
  ) -> impl Future<Output=U> + MaybeSend + 'a {
    async move { self.await.map_or(default, f) }
  }
  pub fn map_or_else<U: MaybeSend + 'a>(
    self,
    default: impl FnOnce() -> U + MaybeSend + 'a,
    f: impl FnOnce(T) -> U + MaybeSend + 'a,
  ) -> impl Future<Output=U> + MaybeSend + 'a {
    async move { self.await.map_or_else(default, f) }
  }
  pub fn inspect(self, f: impl FnOnce(&T) + MaybeSend + 'a) -> Self {
    Self::new(async move { self.await.inspect(f) })
  }

  pub fn and<U: MaybeSend + 'a>(self, other: Maybe<U>) -> AsyncMaybe<'a, U> {
    AsyncMaybe::new(async move { self.await.and(other) })
  }
  pub fn and_then<U: MaybeSend + 'a>(self, f: impl FnOnce(T) -> Maybe<U> + MaybeSend + 'a) -> AsyncMaybe<'a, U> {
    AsyncMaybe::new(async move { self.await.and_then(f) })
  }
  pub fn and_then_async<U: MaybeSend + 'a, Fut>(self, f: impl FnOnce(T) -> Fut + MaybeSend + 'a) -> AsyncMaybe<'a, U> where
    Fut: Future<Output=Maybe<U>> + MaybeSend + 'a,
  {
    AsyncMaybe::new(async move {
      match self.await {
        Maybe::Some(value) => f(value).await,
        Maybe::None => Maybe::None,
      }
    })
  }
  pub fn filter(self, predicate: impl FnOnce(&T) -> bool + MaybeSend + 'a) -> Self {
    Self::new(async move { self.await.filter(predicate) })
  }
  pub fn or(self, other: Maybe<T>) -> Self {
    Self::new(async move { self.await.or(other) })
  }
  pub fn or_else(self, f: impl FnOnce() -> Maybe<T> + MaybeSend + 'a) -> Self {
    Self::new(async move { self.await.or_else(f) })
  }
  pub fn xor(self, other: Maybe<T>) -> Self {
    Self::new(async move { self.await.xor(other) })
  }
  pub fn zip<U: MaybeSend + 'a>(self, other: Maybe<U>) -> AsyncMaybe<'a, (T, U)> {
    AsyncMaybe::new(async move { self.await.zip(other) })
  }

  pub fn unwrap(self) -> impl Future<Output=T> + MaybeSend + 'a {
    async move { self.await.unwrap() }
  }
  pub fn expect(self, message: impl Into<String>) -> impl Future<Output=T> + MaybeSend + 'a {
    let message = message.into();
    async move { self.await.expect(&message) }
  }
  pub fn unwrap_or(self, default: T) -> impl Future<Output=T> + MaybeSend + 'a {
    async move { self.await.unwrap_or(default) }
  }
  pub fn unwrap_or_else(self, f: impl FnOnce() -> T + MaybeSend + 'a) -> impl Future<Output=T> + MaybeSend + 'a {
    async move { self.await.unwrap_or_else(f) }
  }
  pub fn unwrap_or_default(self) -> impl Future<Output=T> + MaybeSend + 'a where T: Default {
    async move { self.await.unwrap_or_default() }
  }

  pub fn ok_or<E: MaybeSend + 'a>(self, error: E) -> AsyncOutcome<'a, T, E> {
    AsyncOutcome::new(async move { self.await.ok_or(error) })
  }
  pub fn ok_or_else<E: MaybeSend + 'a>(self, f: impl FnOnce() -> E + MaybeSend + 'a) -> AsyncOutcome<'a, T, E> {
    AsyncOutcome::new(async move { self.await.ok_or_else(f) })
  }

  pub fn match_with<U: MaybeSend + 'a>(
    self,
    some: impl FnOnce(T) -> U + MaybeSend + 'a,
    none: impl FnOnce() -> U + MaybeSend + 'a,
  ) -> impl Future<Output=U> + MaybeSend + 'a {
    async move { self.await.match_with(some, none) }
  }

  pub fn into_option(self) -> impl Future<Output=Option<T>> + MaybeSend + 'a {
    async move { self.await.into_option() }
  }
}

impl<'a, T: MaybeSend + 'a> AsyncMaybe<'a, Maybe<T>> {
  pub fn flatten(self) -> AsyncMaybe<'a, T> {
    AsyncMaybe::new(async move { self.await.flatten() })
  }
}

impl<'a, T: MaybeSend + 'a, E: MaybeSend + 'a> AsyncMaybe<'a, Outcome<T, E>> {
  pub fn transpose(self) -> AsyncOutcome<'a, Maybe<T>, E> {
    AsyncOutcome::new(async move { self.await.transpose() })
  }
}

impl<'a, T: MaybeSend + 'a> From<Maybe<T>> for AsyncMaybe<'a, T> {
  #[inline]
  fn from(maybe: Maybe<T>) -> Self { Self::from_maybe(maybe) }
}

impl<T> Future for AsyncMaybe<'_, T> {
  type Output = Maybe<T>;

  #[inline]
  fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Maybe<T>> {
    self.inner.as_mut().poll(cx)
  }
}

impl<T> Debug for AsyncMaybe<'_, T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str("AsyncMaybe(<pending>)")
  }
}


#[cfg(test)]
mod tests {
  use std::time::Duration;

  use rop_core::{err, none, ok, some};

  use super::*;

  #[tokio::test]
  async fn map_and_filter_over_pending_value() {
    let value = AsyncMaybe::new(async {
      tokio::time::sleep(Duration::from_millis(1)).await;
      some(4)
    });
    assert_eq!(value.map(|x| x * 2).filter(|x| *x > 5).await, some(8));
    assert_eq!(async_some(2).filter(|x| *x > 5).await, none());
  }

  #[tokio::test]
  async fn predicates_and_defaults() {
    assert!(async_some(3).is_some_and(|x| x > 2).await);
    assert!(!async_none::<i32>().is_some_and(|_| true).await);
    assert!(async_none::<i32>().is_none_or(|_| false).await);
    assert!(!async_some(1).is_none_or(|x| x > 2).await);
    assert_eq!(async_some(2).map_or(0, |x| x * 3).await, 6);
    assert_eq!(async_none::<i32>().map_or_else(|| -1, |x| x * 3).await, -1);
  }

  #[tokio::test]
  async fn map_async_awaits_callback() {
    let value = async_some(2)
      .map_async(|x| async move {
        tokio::time::sleep(Duration::from_millis(1)).await;
        x + 1
      })
      .await;
    assert_eq!(value, some(3));
    assert_eq!(async_none::<i32>().map_async(|x| async move { x + 1 }).await, none());
  }

  #[tokio::test]
  async fn zip_and_transpose() {
    assert_eq!(async_some(1).zip(some("a")).await, some((1, "a")));
    assert_eq!(async_some(1).zip(none::<&str>()).await, none());
    assert_eq!(async_some(ok::<i32, &str>(1)).transpose().await, ok(some(1)));
    assert_eq!(async_some(err::<i32, &str>("e")).transpose().await, err("e"));
    assert_eq!(async_none::<Outcome<i32, &str>>().transpose().await, ok(none()));
  }

  #[tokio::test]
  async fn into_option_converts_to_std() {
    assert_eq!(async_some(1).into_option().await, Some(1));
    assert_eq!(async_none::<i32>().into_option().await, None);
  }

  #[tokio::test]
  async fn fallbacks() {
    assert_eq!(async_none().or(some(1)).await, some(1));
    assert_eq!(async_some(2).xor(some(2)).await, none());
    assert_eq!(async_none::<i32>().or_else(|| some(3)).unwrap_or(0).await, 3);
  }

  #[tokio::test]
  async fn bridges_into_async_outcome() {
    assert_eq!(async_some(1).ok_or("missing").await, ok(1));
    assert_eq!(async_none::<i32>().ok_or_else(|| "missing").await, err("missing"));
  }

  #[tokio::test]
  async fn and_then_async_chains_absence() {
    let value = async_some(3)
      .and_then_async(|x| async move { if x > 2 { some(x) } else { none() } })
      .and_then(|x| some(x + 1))
      .await;
    assert_eq!(value, some(4));
  }

  #[tokio::test]
  async fn from_future_converts_std_option() {
    assert_eq!(AsyncMaybe::from_future(async { Some("a") }).await, some("a"));
    assert_eq!(AsyncMaybe::<i32>::from_future(async { None }).match_with(|_| 1, || 0).await, 0);
  }
}
