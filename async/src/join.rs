//! Aggregate joins over several computations of outcomes.
//!
//! All inputs are driven concurrently on the task that awaits the join; nothing is spawned. The reported outcome is
//! well-defined even though the order in which inputs complete is not:
//!
//! - [`all`] reports `Ok` of every value in input order, or the first `Err` in completion order.
//! - [`all_settled`] reports every outcome in input order.
//! - [`any`] reports the first `Ok` in completion order, or `Err` of every error in input order.
//! - [`race`] reports whichever outcome completes first.
//!
//! A join that decides early does not stop its undecided inputs by itself. The `*_with_remaining` variants hand them
//! back as [`Remaining`], which can be driven to completion with [`Remaining::settle`] or polled as a stream. The plain
//! variants drop them, which stops inputs that are plain futures; spawned tasks passed in through their join handles
//! keep running either way.

use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{FuturesUnordered, Stream, StreamExt};
use futures::FutureExt;
use rop_core::{Outcome, Panic};
use tracing::trace;

use crate::outcome::AsyncOutcome;
use crate::util::maybe_send::{BoxFuture, MaybeSend, MaybeSendFuture};

/// Inputs of a join that were still pending when the join decided its outcome.
///
/// Dropping it drops those inputs.
#[must_use = "remaining inputs are dropped unless settled or polled"]
pub struct Remaining<'a, T, E> {
  pending: FuturesUnordered<BoxFuture<'a, (usize, Outcome<T, E>)>>,
}
impl<'a, T: MaybeSend + 'a, E: MaybeSend + 'a> Remaining<'a, T, E> {
  fn new<I>(inputs: I) -> Self where
    I: IntoIterator,
    I::Item: Future<Output=Outcome<T, E>> + MaybeSend + 'a,
  {
    let pending = inputs.into_iter()
      .enumerate()
      .map(|(index, input)| input.map(move |outcome| (index, outcome)).boxed_maybe_send())
      .collect();
    Self { pending }
  }

  #[inline]
  pub fn len(&self) -> usize { self.pending.len() }
  #[inline]
  pub fn is_empty(&self) -> bool { self.pending.is_empty() }

  /// Drives every remaining input to completion, resolving to their outcomes tagged with their input index, in input
  /// order.
  pub fn settle(self) -> BoxFuture<'a, Vec<(usize, Outcome<T, E>)>> {
    let pending = self.pending;
    async move {
      let mut settled: Vec<_> = pending.collect().await;
      settled.sort_by_key(|(index, _)| *index);
      settled
    }.boxed_maybe_send()
  }
}
impl<T, E> Stream for Remaining<'_, T, E> {
  type Item = (usize, Outcome<T, E>);

  #[inline]
  fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
    self.pending.poll_next_unpin(cx)
  }
}
impl<T, E> Debug for Remaining<'_, T, E> {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.debug_struct("Remaining").field("len", &self.pending.len()).finish()
  }
}

/// Like [`all`], also resolving to the inputs that were still pending when the first `Err` completed.
pub fn all_with_remaining<'a, T, E, I>(inputs: I) -> BoxFuture<'a, (Outcome<Vec<T>, E>, Remaining<'a, T, E>)> where
  T: MaybeSend + 'a,
  E: MaybeSend + 'a,
  I: IntoIterator,
  I::Item: Future<Output=Outcome<T, E>> + MaybeSend + 'a,
{
  let mut remaining = Remaining::new(inputs);
  async move {
    let mut values: Vec<Option<T>> = std::iter::repeat_with(|| None).take(remaining.len()).collect();
    while let Some((index, outcome)) = remaining.next().await {
      match outcome {
        Outcome::Ok(value) => values[index] = Some(value),
        Outcome::Err(error) => {
          trace!(index, remaining = remaining.len(), "all: input resolved to `Err`");
          return (Outcome::Err(error), remaining);
        }
      }
    }
    (Outcome::Ok(values.into_iter().flatten().collect()), remaining)
  }.boxed_maybe_send()
}

/// Resolves to `Ok` of all values in input order if every input resolves to `Ok`, or to the first `Err` in completion
/// order otherwise. An empty input resolves to `Ok` of an empty vector.
pub fn all<'a, T, E, I>(inputs: I) -> AsyncOutcome<'a, Vec<T>, E> where
  T: MaybeSend + 'a,
  E: MaybeSend + 'a,
  I: IntoIterator,
  I::Item: Future<Output=Outcome<T, E>> + MaybeSend + 'a,
{
  AsyncOutcome::new(all_with_remaining(inputs).map(|(outcome, _)| outcome))
}

/// Resolves to the outcome of every input, in input order.
pub fn all_settled<'a, T, E, I>(inputs: I) -> BoxFuture<'a, Vec<Outcome<T, E>>> where
  T: MaybeSend + 'a,
  E: MaybeSend + 'a,
  I: IntoIterator,
  I::Item: Future<Output=Outcome<T, E>> + MaybeSend + 'a,
{
  futures::future::join_all(inputs).boxed_maybe_send()
}

/// Like [`any`], also resolving to the inputs that were still pending when the first `Ok` completed.
pub fn any_with_remaining<'a, T, E, I>(inputs: I) -> BoxFuture<'a, (Outcome<T, Vec<E>>, Remaining<'a, T, E>)> where
  T: MaybeSend + 'a,
  E: MaybeSend + 'a,
  I: IntoIterator,
  I::Item: Future<Output=Outcome<T, E>> + MaybeSend + 'a,
{
  let mut remaining = Remaining::new(inputs);
  async move {
    let mut errors: Vec<Option<E>> = std::iter::repeat_with(|| None).take(remaining.len()).collect();
    while let Some((index, outcome)) = remaining.next().await {
      match outcome {
        Outcome::Ok(value) => {
          trace!(index, remaining = remaining.len(), "any: input resolved to `Ok`");
          return (Outcome::Ok(value), remaining);
        }
        Outcome::Err(error) => errors[index] = Some(error),
      }
    }
    (Outcome::Err(errors.into_iter().flatten().collect()), remaining)
  }.boxed_maybe_send()
}

/// Resolves to the first `Ok` in completion order, or, if every input resolves to `Err`, to `Err` of all errors in
/// input order. An empty input resolves to `Err` of an empty vector.
pub fn any<'a, T, E, I>(inputs: I) -> AsyncOutcome<'a, T, Vec<E>> where
  T: MaybeSend + 'a,
  E: MaybeSend + 'a,
  I: IntoIterator,
  I::Item: Future<Output=Outcome<T, E>> + MaybeSend + 'a,
{
  AsyncOutcome::new(any_with_remaining(inputs).map(|(outcome, _)| outcome))
}

/// Like [`race`], also resolving to the inputs that were still pending when the first one completed.
pub fn race_with_remaining<'a, T, E, I>(inputs: I) -> BoxFuture<'a, (Outcome<T, E>, Remaining<'a, T, E>)> where
  T: MaybeSend + 'a,
  E: MaybeSend + 'a,
  I: IntoIterator,
  I::Item: Future<Output=Outcome<T, E>> + MaybeSend + 'a,
{
  let mut remaining = Remaining::new(inputs);
  async move {
    match remaining.next().await {
      Some((index, outcome)) => {
        trace!(index, is_ok = outcome.is_ok(), "race: first input resolved");
        (outcome, remaining)
      }
      None => Panic::new("race requires at least one input").raise(),
    }
  }.boxed_maybe_send()
}

/// Resolves to the outcome of whichever input completes first.
///
/// A race needs at least one input: awaiting a race over an empty input raises a [`Panic`], as it could never resolve.
pub fn race<'a, T, E, I>(inputs: I) -> AsyncOutcome<'a, T, E> where
  T: MaybeSend + 'a,
  E: MaybeSend + 'a,
  I: IntoIterator,
  I::Item: Future<Output=Outcome<T, E>> + MaybeSend + 'a,
{
  AsyncOutcome::new(race_with_remaining(inputs).map(|(outcome, _)| outcome))
}
