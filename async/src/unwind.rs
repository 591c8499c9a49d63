use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use rop_core::unwind::demote;
use rop_core::{Error, Outcome};

use crate::outcome::AsyncOutcome;
use crate::util::maybe_send::MaybeSend;

/// Awaits `computation`, wrapping its output in `Ok`, or normalizing anything it unwinds with while being polled into
/// `Err`, like [`rop_core::catch_unwind`] does for synchronous code.
pub fn catch_unwind_async<'a, T: MaybeSend + 'a>(
  computation: impl Future<Output=T> + MaybeSend + 'a,
) -> AsyncOutcome<'a, T, Error> {
  AsyncOutcome::new(async move {
    match AssertUnwindSafe(computation).catch_unwind().await {
      Ok(value) => Outcome::Ok(value),
      Err(payload) => Outcome::Err(demote(payload)),
    }
  })
}
