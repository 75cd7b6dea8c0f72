//! Game clock.
//!
//! One countdown per player, one background timer per session. The timer
//! thread only posts messages; the engine drains them on its own thread.

pub mod countdown;

pub use countdown::{Clock, ClockEvent, TimeWarning};
