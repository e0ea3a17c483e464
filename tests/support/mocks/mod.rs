// tests/support/mocks/mod.rs
//! Deterministic collaborators injected into the repositories under test.
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod events;
pub mod time;

pub use events::CapturingEventSink;
pub use time::{FixedClock, fixed_now};
