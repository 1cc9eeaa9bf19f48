pub mod interval;
pub mod queue;
pub mod schedule;
pub mod time;

#[cfg(test)]
mod time_tests;

pub use interval::*;
pub use queue::*;
pub use schedule::*;
pub use time::*;
