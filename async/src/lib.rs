//! Asynchronous counterparts of [`rop_core`]: outcomes and maybes that are still being computed, joins over several of
//! them, an asynchronous try block, and an asynchronous unwind boundary.

pub mod util;
pub mod outcome;
pub mod maybe;
pub mod join;
pub mod try_block;
pub mod unwind;

pub use join::{all, all_settled, all_with_remaining, any, any_with_remaining, race, race_with_remaining, Remaining};
pub use maybe::{async_none, async_some, AsyncMaybe};
pub use outcome::{async_err, async_ok, AsyncOutcome};
pub use try_block::try_block;
pub use unwind::catch_unwind_async;
