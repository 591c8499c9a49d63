//! Early-return emulation: a block of code that stops at the first failed checkpoint.
//!
//! The block is an `async` body that receives a [`Checkpoints`] handle. Every `co.check(outcome).await` is a
//! checkpoint: an `Ok` resumes the body with the unwrapped value, an `Err` records the error and suspends the body for
//! good. The driver ([`TryBlock`]) then reports that error and drops the body without resuming it. When the body returns,
//! its own [`Outcome`] is reported.
//!
//! Checkpoint errors are converted into the block error with [`Into`], so a block can checkpoint several error types as
//! long as the block error has a `From` conversion for each of them.

use std::any::Any;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};

use tracing::{debug, trace};

use crate::outcome::Outcome;
use crate::panic::{self, payload_message, Cause, Panic};

/// Handle given to the body of a try block, used to create checkpoints.
pub struct Checkpoints<E> {
  failure: Arc<Mutex<Option<E>>>,
}
impl<E> Clone for Checkpoints<E> {
  #[inline]
  fn clone(&self) -> Self { Self { failure: self.failure.clone() } }
}
impl<E> Checkpoints<E> {
  fn new() -> Self {
    Self { failure: Arc::new(Mutex::new(None)) }
  }

  /// Creates a checkpoint for `outcome`. Awaiting it produces the value of an `Ok`; on an `Err` the body never
  /// continues past the await.
  #[inline]
  pub fn check<T, F: Into<E>>(&self, outcome: Outcome<T, F>) -> Checkpoint<T, E> {
    Checkpoint { outcome: Some(outcome.map_err(Into::into)), failure: self.failure.clone() }
  }
  /// Awaits `computation` and creates a checkpoint for the outcome it produces.
  pub async fn check_async<T, F: Into<E>>(&self, computation: impl IntoFuture<Output=Outcome<T, F>>) -> T {
    self.check(computation.await).await
  }

  fn take_failure(&self) -> Option<E> {
    self.failure.lock().unwrap_or_else(PoisonError::into_inner).take()
  }
}

/// Future of a single checkpoint, created by [`Checkpoints::check`].
#[must_use = "a checkpoint does nothing unless awaited"]
pub struct Checkpoint<T, E> {
  outcome: Option<Outcome<T, E>>,
  failure: Arc<Mutex<Option<E>>>,
}
// The outcome is moved out on poll and never pinned.
impl<T, E> Unpin for Checkpoint<T, E> {}
impl<T, E> Future for Checkpoint<T, E> {
  type Output = T;

  fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<T> {
    match self.outcome.take() {
      Some(Outcome::Ok(value)) => Poll::Ready(value),
      Some(Outcome::Err(error)) => {
        let mut failure = self.failure.lock().unwrap_or_else(PoisonError::into_inner);
        if failure.is_none() {
          *failure = Some(error);
        }
        Poll::Pending
      }
      None => Poll::Pending,
    }
  }
}


/// Drives the body of a try block to its final [`Outcome`].
///
/// This is a future; awaiting it drives the asynchronous variant. [`try_block`] drives the synchronous variant.
///
/// Unwinding out of the body is never turned into an `Err`. A [`Panic`] passes through unchanged; any other payload is
/// wrapped into a new [`Panic`] caused by the original payload, and that panic is resumed.
#[must_use = "a try block does nothing unless driven"]
pub struct TryBlock<Fut, E> {
  body: Option<Pin<Box<Fut>>>,
  checkpoints: Checkpoints<E>,
}
impl<Fut, E> TryBlock<Fut, E> {
  pub fn new(body: impl FnOnce(Checkpoints<E>) -> Fut) -> Self {
    let checkpoints = Checkpoints::new();
    let body = Box::pin(body(checkpoints.clone()));
    Self { body: Some(body), checkpoints }
  }
}
impl<T, E, Fut: Future<Output=Outcome<T, E>>> Future for TryBlock<Fut, E> {
  type Output = Outcome<T, E>;

  fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Outcome<T, E>> {
    let this = &mut *self;
    let Some(body) = this.body.as_mut() else {
      panic::raise("try block polled after it completed");
    };
    let poll = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| body.as_mut().poll(cx))) {
      Ok(poll) => poll,
      Err(payload) => {
        this.body = None;
        resume_as_panic(payload)
      }
    };
    if let Some(error) = this.checkpoints.take_failure() {
      trace!("try block short-circuited at a failed checkpoint");
      this.body = None;
      return Poll::Ready(Outcome::Err(error));
    }
    if poll.is_ready() {
      this.body = None;
    }
    poll
  }
}

/// Resumes unwinding with `payload` if it is a [`Panic`], otherwise with a new [`Panic`] caused by `payload`.
pub fn resume_as_panic(payload: Box<dyn Any + Send>) -> ! {
  if Panic::is_payload(payload.as_ref()) {
    std::panic::resume_unwind(payload)
  }
  let message = payload_message(payload.as_ref()).unwrap_or("unexpected panic in try block").to_owned();
  debug!(payload = %message, "wrapping unexpected unwinding payload of try block into a panic");
  let panic = Panic::new(message).caused_by(Cause::from_payload(payload));
  std::panic::resume_unwind(Box::new(panic))
}

/// Runs the body of a try block synchronously, returning the first failed checkpoint's error, or the body's outcome.
///
/// The body may only await checkpoints (and other computations that are already resolved). Awaiting a pending
/// computation raises a [`Panic`]; use the asynchronous driver for those.
pub fn try_block<T, E, Fut: Future<Output=Outcome<T, E>>>(body: impl FnOnce(Checkpoints<E>) -> Fut) -> Outcome<T, E> {
  let mut block = TryBlock::new(body);
  let mut cx = Context::from_waker(futures::task::noop_waker_ref());
  match Pin::new(&mut block).poll(&mut cx) {
    Poll::Ready(outcome) => outcome,
    Poll::Pending => panic::raise("synchronous try block awaited a pending computation"),
  }
}
