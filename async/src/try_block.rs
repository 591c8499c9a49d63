use std::future::Future;

use rop_core::{Checkpoints, Outcome, TryBlock};

use crate::outcome::AsyncOutcome;
use crate::util::maybe_send::MaybeSend;

/// Runs the body of a try block asynchronously, resolving to the first failed checkpoint's error, or to the body's
/// outcome.
///
/// Unlike [`rop_core::try_block`], the body may await pending computations between checkpoints, usually through
/// [`Checkpoints::check_async`]. The body does not start until the returned outcome is awaited.
#[inline]
pub fn try_block<'a, T, E, Fut>(body: impl FnOnce(Checkpoints<E>) -> Fut) -> AsyncOutcome<'a, T, E> where
  T: MaybeSend + 'a,
  E: MaybeSend + 'a,
  Fut: Future<Output=Outcome<T, E>> + MaybeSend + 'a,
{
  AsyncOutcome::new(TryBlock::new(body))
}


#[cfg(test)]
mod tests {
  use std::panic::AssertUnwindSafe;
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Arc;
  use std::time::Duration;

  use futures::FutureExt;
  use rop_core::{err, ok, Panic};

  use crate::outcome::{async_err, async_ok};

  use super::*;

  fn delayed_ok(millis: u64, value: i32) -> AsyncOutcome<'static, i32, &'static str> {
    AsyncOutcome::new(async move {
      tokio::time::sleep(Duration::from_millis(millis)).await;
      ok(value)
    })
  }

  #[tokio::test]
  async fn awaits_pending_computations_between_checkpoints() {
    let outcome = try_block(|co| async move {
      let a = co.check_async(delayed_ok(5, 1)).await;
      let b = co.check_async(delayed_ok(1, 2)).await;
      let c = co.check(ok::<i32, &str>(3)).await;
      ok::<i32, &str>(a + b + c)
    }).await;
    assert_eq!(outcome, ok(6));
  }

  #[tokio::test]
  async fn stops_at_first_failed_checkpoint() {
    let counter = Arc::new(AtomicUsize::new(0));
    let steps = counter.clone();
    let outcome: Outcome<i32, &str> = try_block(|co| async move {
      let a = co.check_async(async_ok::<i32, &str>(1)).await;
      steps.fetch_add(1, Ordering::SeqCst);
      let b = co.check_async(async_err::<i32, &str>("boom")).await;
      steps.fetch_add(1, Ordering::SeqCst);
      ok(a + b)
    }).await;
    assert_eq!(outcome, err("boom"));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn body_does_not_run_until_awaited() {
    let counter = Arc::new(AtomicUsize::new(0));
    let steps = counter.clone();
    let block = try_block(|_co: Checkpoints<()>| async move {
      steps.fetch_add(1, Ordering::SeqCst);
      ok::<(), ()>(())
    });
    assert_eq!(counter.load(Ordering::SeqCst), 0);
    assert_eq!(block.await, ok(()));
    assert_eq!(counter.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn combinators_apply_to_block_outcome() {
    let doubled = try_block(|co| async move {
      let value = co.check_async(delayed_ok(1, 21)).await;
      ok::<i32, &str>(value)
    }).map(|x| x * 2).await;
    assert_eq!(doubled, ok(42));
  }

  #[tokio::test]
  async fn foreign_panic_after_suspension_is_wrapped_into_panic() {
    let block = try_block(|co| async move {
      let value = co.check_async(delayed_ok(1, 1)).await;
      if value == 1 {
        panic!("unexpected {value}");
      }
      ok::<i32, &str>(value)
    });
    let payload = AssertUnwindSafe(block).catch_unwind().await.unwrap_err();
    let panic = payload.downcast::<Panic>().unwrap();
    assert_eq!(panic.message(), "unexpected 1");
    assert!(panic.cause().is_some_and(|c| c.is::<String>()));
  }
}
