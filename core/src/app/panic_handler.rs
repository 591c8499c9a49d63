use std::panic;

use crate::panic::Panic;

/// Installs a panic hook that reports [`Panic`] payloads through `tracing`, including their cause.
///
/// Any other payload is passed on to the hook that was installed before.
pub fn install_panic_handler() {
  let previous = panic::take_hook();
  panic::set_hook(Box::new(move |info| {
    match info.payload().downcast_ref::<Panic>() {
      Some(panic) => tracing::error!(
        panic = panic.message(),
        cause = ?panic.cause(),
        location = ?info.location(),
        "raised panic"
      ),
      None => previous(info),
    }
  }));
}
