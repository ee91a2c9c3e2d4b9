mod random;
pub use random::RandomPacer;

mod range;
pub use range::{ConfigError, DelayRange};

use std::time::Duration;

/// Source of the wait applied before each node expansion.
pub trait Pacer {
    fn next_delay(&mut self) -> Duration;
}
