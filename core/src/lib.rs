//! Success-or-failure ([`Outcome`]) and value-or-absence ([`Maybe`]) as plain values, with combinators to transform
//! and chain them, a [try block](crate::try_block::try_block) that stops at the first failure, and an [unwind boundary](catch_unwind)
//! that turns unwinding into an ordinary [`Error`].

pub mod panic;
pub mod error;
pub mod maybe;
pub mod outcome;
pub mod try_block;
pub mod unwind;

pub mod app;

#[cfg(test)]
mod test_util;

pub use error::Error;
pub use maybe::{Maybe, none, some};
pub use outcome::{err, ok, Outcome};
pub use panic::{Cause, Panic};
pub use try_block::{Checkpoint, Checkpoints, try_block, TryBlock};
pub use unwind::catch_unwind;
