use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::panic::Panic;

/// Runs `f`, which must raise a [`Panic`], and returns that panic.
#[track_caller]
pub(crate) fn catch_panic<R>(f: impl FnOnce() -> R) -> Panic {
  match catch_unwind(AssertUnwindSafe(f)) {
    Ok(_) => panic!("expected a panic to be raised"),
    Err(payload) => match payload.downcast::<Panic>() {
      Ok(panic) => *panic,
      Err(payload) => panic!("expected a `Panic` payload, got {payload:?}"),
    },
  }
}
