//! Time subsystem.
//!
//! Animation clocks are driven with explicit instants so tests can step them;
//! the runtime hands each frame its own `Instant` through `FrameCtx::now`.

mod stopwatch;

pub use stopwatch::Stopwatch;
