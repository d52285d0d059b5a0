//! Process-wide configuration of the relationship engine.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{ConfigError, Result};
use crate::math::DEFAULT_EPSILON;

/// Offset used by the ray rotation tier. Epsilon must stay well below it.
pub const RAY_OFFSET: f64 = 1.0 / 4_194_304.0; // 2^-22

// Bit pattern of the configured epsilon; zero means "use the default".
static EPSILON_BITS: AtomicU64 = AtomicU64::new(0);

/// Returns the process-wide epsilon.
#[must_use]
pub fn epsilon() -> f64 {
    match EPSILON_BITS.load(Ordering::Relaxed) {
        0 => DEFAULT_EPSILON,
        bits => f64::from_bits(bits),
    }
}

/// Replaces the process-wide epsilon.
///
/// Relationships snapshot the epsilon when they are created, so existing
/// relationship objects keep their value.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEpsilon`] unless `value` is finite,
/// positive and smaller than [`RAY_OFFSET`].
pub fn set_epsilon(value: f64) -> Result<()> {
    Config::new(value)?;
    EPSILON_BITS.store(value.to_bits(), Ordering::Relaxed);
    Ok(())
}

/// Restores the default epsilon.
pub fn reset_epsilon() {
    EPSILON_BITS.store(0, Ordering::Relaxed);
}

/// Tolerance settings handed to every comparison in the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    epsilon: f64,
}

impl Config {
    /// Creates a configuration with an explicit epsilon.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEpsilon`] unless `epsilon` is finite,
    /// positive and smaller than [`RAY_OFFSET`].
    pub fn new(epsilon: f64) -> Result<Self> {
        if !epsilon.is_finite() || epsilon <= 0.0 || epsilon >= RAY_OFFSET {
            return Err(ConfigError::InvalidEpsilon {
                value: epsilon,
                max: RAY_OFFSET,
            }
            .into());
        }
        Ok(Self { epsilon })
    }

    /// Snapshot of the process-wide configuration.
    #[must_use]
    pub fn global() -> Self {
        Self { epsilon: epsilon() }
    }

    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unusable_epsilon() {
        assert!(Config::new(0.0).is_err());
        assert!(Config::new(-1e-9).is_err());
        assert!(Config::new(f64::NAN).is_err());
        assert!(Config::new(1e-3).is_err());
        assert!(Config::new(1e-9).is_ok());
    }

    #[test]
    fn default_matches_engine_default() {
        assert!((Config::default().epsilon() - DEFAULT_EPSILON).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_global_epsilon_leaves_value_untouched() {
        let before = epsilon();
        assert!(set_epsilon(f64::INFINITY).is_err());
        assert!((epsilon() - before).abs() < f64::EPSILON);
    }
}
