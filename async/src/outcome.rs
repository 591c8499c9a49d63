use std::any::Any;
use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use rop_core::{Maybe, Outcome};

use crate::maybe::AsyncMaybe;
use crate::util::maybe_send::{BoxFuture, MaybeSend, MaybeSendFuture};

/// An [`Outcome`] that is still being computed.
///
/// Awaiting it produces the `Outcome`. It also exposes the combinators of `Outcome`: each one awaits the wrapped
/// computation once, applies the synchronous combinator, and wraps the result again, so that chains can be written
/// without intermediate awaits. Nothing runs until the final wrapper is awaited.
///
/// A panic raised while computing the outcome is not turned into an `Err`; use
/// [`catch_unwind_async`](crate::catch_unwind_async) for that.
#[must_use = "an async outcome does nothing unless awaited"]
pub struct AsyncOutcome<'a, T, E> {
  inner: BoxFuture<'a, Outcome<T, E>>,
}

#[inline]
pub fn async_ok<'a, T: MaybeSend + 'a, E: MaybeSend + 'a>(value: T) -> AsyncOutcome<'a, T, E> {
  AsyncOutcome::from_outcome(Outcome::Ok(value))
}
#[inline]
pub fn async_err<'a, T: MaybeSend + 'a, E: MaybeSend + 'a>(error: E) -> AsyncOutcome<'a, T, E> {
  AsyncOutcome::from_outcome(Outcome::Err(error))
}

impl<'a, T: MaybeSend + 'a, E: MaybeSend + 'a> AsyncOutcome<'a, T, E> {
  /// Wraps a computation of an outcome. This may be another `AsyncOutcome`.
  #[inline]
  pub fn new(computation: impl Future<Output=Outcome<T, E>> + MaybeSend + 'a) -> Self {
    Self { inner: computation.boxed_maybe_send() }
  }
  /// Wraps an already computed outcome.
  #[inline]
  pub fn from_outcome(outcome: Outcome<T, E>) -> Self {
    Self::new(std::future::ready(outcome))
  }
  /// Wraps a computation that produces a std `Result`.
  #[inline]
  pub fn from_future(computation: impl Future<Output=Result<T, E>> + MaybeSend + 'a) -> Self {
    Self::new(async move { Outcome::from_result(computation.await) })
  }
  #[inline]
  pub fn is_ok(self) -> impl Future<Output=bool> + MaybeSend + 'a {
    async move { self.await.is_ok() }
  }
  #[inline]
  pub fn is_err(self) -> impl Future<Output=bool> + MaybeSend + 'a {
    async move { self.await.is_err() }
  }
  pub fn is_ok_and(self, f: impl FnOnce(T) -> bool + MaybeSend + 'a) -> impl Future<Output=bool> + MaybeSend + 'a {
    async move { self.await.is_ok_and(f) }
  }
  pub fn is_err_and(self, f: impl FnOnce(E) -> bool + MaybeSend + 'a) -> impl Future<Output=bool> + MaybeSend + 'a {
    async move { self.await.is_err_and(f) }
  }

  pub fn map<U: MaybeSend + 'a>(self, f: impl FnOnce(T) -> U + MaybeSend + 'a) -> AsyncOutcome<'a, U, E> {
    AsyncOutcome::new(async move { self.await.map(f) })
  }
  /// Like [`map`](Self::map), with `f` producing the new value asynchronously.
  pub fn map_async<U: MaybeSend + 'a, Fut>(self, f: impl FnOnce(T) -> Fut + MaybeSend + 'a) -> AsyncOutcome<'a, U, E> where
    Fut: Future<Output=U> + MaybeSend + 'a,
  {
    AsyncOutcome::new(async move {
      match self.await {
        Outcome::Ok(value) => Outcome::Ok(f(value).await),
        Outcome::Err(error) => Outcome::Err(error),
      }
    })
  }
  pub fn map_err<F: MaybeSend + 'a>(self, f: impl FnOnce(E) -> F + MaybeSend + 'a) -> AsyncOutcome<'a, T, F> {
    AsyncOutcome::new(async move { self.await.map_err(f) })
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
    default: impl FnOnce(E) -> U + MaybeSend + 'a,
    f: impl FnOnce(T) -> U + MaybeSend + 'a,
  ) -> impl Future<Output=U> + MaybeSend + 'a {
    async move { self.await.map_or_else(default, f) }
  }
  pub fn inspect(self, f: impl FnOnce(&T) + MaybeSend + 'a) -> Self {
    Self::new(async move { self.await.inspect(f) })
  }
  pub fn inspect_err(self, f: impl FnOnce(&E) + MaybeSend + 'a) -> Self {
    Self::new(async move { self.await.inspect_err(f) })
  }

  pub fn and<U: MaybeSend + 'a>(self, other: Outcome<U, E>) -> AsyncOutcome<'a, U, E> {
    AsyncOutcome::new(async move { self.await.and(other) })
  }
  pub fn and_then<U: MaybeSend + 'a>(self, f: impl FnOnce(T) -> Outcome<U, E> + MaybeSend + 'a) -> AsyncOutcome<'a, U, E> {
    AsyncOutcome::new(async move { self.await.and_then(f) })
  }
  /// Like [`and_then`](Self::and_then), with `f` producing a computation of the next outcome, such as another
  /// `AsyncOutcome`.
  pub fn and_then_async<U: MaybeSend + 'a, Fut>(self, f: impl FnOnce(T) -> Fut + MaybeSend + 'a) -> AsyncOutcome<'a, U, E> where
    Fut: Future<Output=Outcome<U, E>> + MaybeSend + 'a,
  {
    AsyncOutcome::new(async move {
      match self.await {
        Outcome::Ok(value) => f(value).await,
        Outcome::Err(error) => Outcome::Err(error),
      }
    })
  }
  pub fn or<F: MaybeSend + 'a>(self, other: Outcome<T, F>) -> AsyncOutcome<'a, T, F> {
    AsyncOutcome::new(async move { self.await.or(other) })
  }
  pub fn or_else<F: MaybeSend + 'a>(self, f: impl FnOnce(E) -> Outcome<T, F> + MaybeSend + 'a) -> AsyncOutcome<'a, T, F> {
    AsyncOutcome::new(async move { self.await.or_else(f) })
  }
  /// Like [`or_else`](Self::or_else), with `f` producing a computation of the recovered outcome.
  pub fn or_else_async<F: MaybeSend + 'a, Fut>(self, f: impl FnOnce(E) -> Fut + MaybeSend + 'a) -> AsyncOutcome<'a, T, F> where
    Fut: Future<Output=Outcome<T, F>> + MaybeSend + 'a,
  {
    AsyncOutcome::new(async move {
      match self.await {
        Outcome::Ok(value) => Outcome::Ok(value),
        Outcome::Err(error) => f(error).await,
      }
    })
  }

  pub fn unwrap(self) -> impl Future<Output=T> + MaybeSend + 'a where E: Any + Send {
    async move { self.await.unwrap() }
  }
  pub fn expect(self, message: impl Into<String>) -> impl Future<Output=T> + MaybeSend + 'a where E: Any + Send {
    let message = message.into();
    async move { self.await.expect(&message) }
  }
  pub fn unwrap_err(self) -> impl Future<Output=E> + MaybeSend + 'a where T: Any + Send {
    async move { self.await.unwrap_err() }
  }
  pub fn expect_err(self, message: impl Into<String>) -> impl Future<Output=E> + MaybeSend + 'a where T: Any + Send {
    let message = message.into();
    async move { self.await.expect_err(&message) }
  }
  pub fn unwrap_or(self, default: T) -> impl Future<Output=T> + MaybeSend + 'a {
    async move { self.await.unwrap_or(default) }
  }
  pub fn unwrap_or_else(self, f: impl FnOnce(E) -> T + MaybeSend + 'a) -> impl Future<Output=T> + MaybeSend + 'a {
    async move { self.await.unwrap_or_else(f) }
  }
  pub fn unwrap_or_default(self) -> impl Future<Output=T> + MaybeSend + 'a where T: Default {
    async move { self.await.unwrap_or_default() }
  }

  pub fn ok(self) -> AsyncMaybe<'a, T> {
    AsyncMaybe::new(async move { self.await.ok() })
  }
  pub fn err(self) -> AsyncMaybe<'a, E> {
    AsyncMaybe::new(async move { self.await.err() })
  }

  pub fn match_with<U: MaybeSend + 'a>(
    self,
    ok: impl FnOnce(T) -> U + MaybeSend + 'a,
    err: impl FnOnce(E) -> U + MaybeSend + 'a,
  ) -> impl Future<Output=U> + MaybeSend + 'a {
    async move { self.await.match_with(ok, err) }
  }

  pub fn into_result(self) -> impl Future<Output=Result<T, E>> + MaybeSend + 'a {
    async move { self.await.into_result() }
  }
}

impl<'a, T: MaybeSend + 'a, F: MaybeSend + 'a, E: MaybeSend + 'a> AsyncOutcome<'a, Outcome<T, F>, E> {
  /// Removes exactly one level of nesting; the inner error is converted into the outer one.
  pub fn flatten(self) -> AsyncOutcome<'a, T, E> where F: Into<E> {
    AsyncOutcome::new(async move { self.await.flatten() })
  }
}

impl<'a, T: MaybeSend + 'a, E: MaybeSend + 'a> AsyncOutcome<'a, Maybe<T>, E> {
  pub fn transpose(self) -> AsyncMaybe<'a, Outcome<T, E>> {
    AsyncMaybe::new(async move { self.await.transpose() })
  }
}

impl<'a, T: MaybeSend + 'a, E: MaybeSend + 'a> From<Outcome<T, E>> for AsyncOutcome<'a, T, E> {
  #[inline]
  fn from(outcome: Outcome<T, E>) -> Self { Self::from_outcome(outcome) }
}

impl<T, E> Future for AsyncOutcome<'_, T, E> {
  type Output = Outcome<T, E>;

  #[inline]
  fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Outcome<T, E>> {
    self.inner.as_mut().poll(cx)
  }
}

impl<T, E> Debug for AsyncOutcome<'_, T, E> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str("AsyncOutcome(<pending>)")
  }
}


#[cfg(test)]
mod tests {
  use std::sync::Arc;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::time::Duration;

  use rop_core::{err, ok, some};

  use super::*;

  #[tokio::test]
  async fn map_over_pending_outcome() {
    let outcome = AsyncOutcome::new(async { ok::<i32, &str>(1) }).map(|x| x + 1).await;
    assert_eq!(outcome, ok(2));
  }

  #[tokio::test]
  async fn wrapping_another_async_outcome_is_transparent() {
    let inner = async_ok::<i32, &str>(5);
    assert_eq!(AsyncOutcome::new(inner).await, ok(5));
  }

  #[tokio::test]
  async fn chains_without_intermediate_awaits() {
    let outcome = async_ok::<i32, &str>(2)
      .map(|x| x * 10)
      .and_then(|x| if x > 10 { ok(x) } else { err("too small") })
      .and_then_async(|x| async_ok(x + 1))
      .map_err(|e| e.len())
      .await;
    assert_eq!(outcome, ok(21));
  }

  #[tokio::test]
  async fn short_circuits_on_err() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();
    let outcome = async_err::<i32, &str>("first")
      .and_then(move |x| { counted.fetch_add(1, Ordering::SeqCst); ok(x) })
      .or_else(|e| if e == "first" { err::<i32, String>(format!("{e}!")) } else { ok(0) })
      .await;
    assert_eq!(outcome, err("first!".to_owned()));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn or_else_async_recovers() {
    let outcome = async_err::<i32, &str>("e")
      .or_else_async(|_| async { ok::<i32, ()>(7) })
      .await;
    assert_eq!(outcome, ok(7));
  }

  #[tokio::test]
  async fn extraction() {
    assert_eq!(async_err::<i32, &str>("e").unwrap_or(3).await, 3);
    assert_eq!(async_ok::<i32, &str>(1).unwrap().await, 1);
    assert_eq!(async_err::<i32, &str>("e").unwrap_err().await, "e");
    assert_eq!(async_ok::<i32, &str>(4).map_or(0, |x| x * 2).await, 8);
    assert!(async_ok::<i32, &str>(4).is_ok().await);
    assert_eq!(async_err::<i32, &str>("e").match_with(|_| "ok", |_| "err").await, "err");
  }

  #[tokio::test]
  async fn predicates() {
    assert!(async_ok::<i32, &str>(3).is_ok_and(|x| x > 2).await);
    assert!(!async_err::<i32, &str>("e").is_ok_and(|_| true).await);
    assert!(async_err::<i32, &str>("e").is_err_and(|e| e == "e").await);
    assert!(!async_ok::<i32, &str>(1).is_err_and(|_| true).await);
  }

  #[tokio::test]
  async fn map_async_awaits_callback() {
    let outcome = async_ok::<i32, &str>(2)
      .map_async(|x| async move {
        tokio::time::sleep(Duration::from_millis(1)).await;
        x * 5
      })
      .await;
    assert_eq!(outcome, ok(10));
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = calls.clone();
    let outcome = async_err::<i32, &str>("e")
      .map_async(move |x| async move { counted.fetch_add(1, Ordering::SeqCst); x })
      .await;
    assert_eq!(outcome, err("e"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn inspect_sees_matching_variant_only() {
    let values = Arc::new(AtomicUsize::new(0));
    let errors = Arc::new(AtomicUsize::new(0));
    let (v, e) = (values.clone(), errors.clone());
    let outcome = async_ok::<i32, &str>(1)
      .inspect(move |_| { v.fetch_add(1, Ordering::SeqCst); })
      .inspect_err(move |_| { e.fetch_add(1, Ordering::SeqCst); })
      .await;
    assert_eq!(outcome, ok(1));
    assert_eq!(values.load(Ordering::SeqCst), 1);
    assert_eq!(errors.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn transpose_into_async_maybe() {
    assert_eq!(async_ok::<Maybe<i32>, &str>(some(1)).transpose().await, some(ok(1)));
    assert_eq!(async_ok::<Maybe<i32>, &str>(Maybe::None).transpose().await, Maybe::None);
    assert_eq!(async_err::<Maybe<i32>, &str>("e").transpose().await, some(err("e")));
  }

  #[tokio::test]
  async fn projections() {
    assert_eq!(async_ok::<i32, &str>(1).ok().await, some(1));
    assert!(async_ok::<i32, &str>(1).err().await.is_none());
  }

  #[tokio::test]
  async fn flatten_removes_one_level() {
    let nested = async_ok::<Outcome<i32, &str>, &str>(ok(1));
    assert_eq!(nested.flatten().await, ok(1));
  }

  #[tokio::test]
  async fn from_future_converts_std_result() {
    let outcome = AsyncOutcome::from_future(async { "12".parse::<i32>() }).map(|x| x + 1).await;
    assert_eq!(outcome, ok(13));
  }
}
