//! Platform abstraction layer
//!
//! Wall-clock plumbing that the deterministic core must not depend on:
//! - Countdown driven by real time

pub mod timer;

pub use timer::TokioClock;
