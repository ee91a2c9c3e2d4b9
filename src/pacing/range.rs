use std::time::Duration;

use rand::Rng;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid delay range: min {min}s is greater than max {max}s")]
    InvalidConfiguration { min: f64, max: f64 },
    #[error("Invalid delay bound: {0}s (must be non-negative and fit in a Duration)")]
    InvalidBound(f64),
}

/// Inclusive `[min, max]` range of seconds a delay is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayRange {
    min: f64,
    max: f64,
}

impl DelayRange {
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        for bound in [min, max] {
            // also rules out NaN, infinities and negatives
            if Duration::try_from_secs_f64(bound).is_err() {
                return Err(ConfigError::InvalidBound(bound));
            }
        }
        if min > max {
            return Err(ConfigError::InvalidConfiguration { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Uniform draw, in seconds.
    pub fn sample(&self, rng: &mut impl Rng) -> f64 {
        rng.gen_range(self.min..=self.max)
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self { min: 1.0, max: 3.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_default_range() {
        let range = DelayRange::default();
        assert_eq!((range.min(), range.max()), (1.0, 3.0));
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert_eq!(
            DelayRange::new(3.0, 1.0),
            Err(ConfigError::InvalidConfiguration { min: 3.0, max: 1.0 })
        );
    }

    #[test]
    fn test_bad_bounds_rejected() {
        assert_eq!(
            DelayRange::new(-0.5, 1.0),
            Err(ConfigError::InvalidBound(-0.5))
        );
        assert!(DelayRange::new(0.0, f64::NAN).is_err());
        assert!(DelayRange::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_unrepresentable_bound_rejected() {
        assert_eq!(
            DelayRange::new(1e20, 1e20),
            Err(ConfigError::InvalidBound(1e20))
        );
        assert_eq!(
            DelayRange::new(0.0, 1e20),
            Err(ConfigError::InvalidBound(1e20))
        );
    }

    #[test]
    fn test_degenerate_range() {
        let range = DelayRange::new(0.0, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(range.sample(&mut rng), 0.0);
        }
    }
}
