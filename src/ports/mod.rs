// src/ports/mod.rs
pub mod events;
pub mod time;
pub mod util;

pub use events::{DomainEvent, EventSink};
pub use time::Clock;
pub use util::SlugGenerator;
