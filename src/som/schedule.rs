//! Exponential decay schedule for learning rate and neighbourhood radius.

use crate::error::{KohonenError, Result};

/// Time-decay schedule shared by the learning rate and the radius.
///
/// With `sigma_0 = max(width, height) / 2` and
/// `lambda = n_iterations / ln(sigma_0)`, iteration `t` trains with
/// `sigma_t = sigma_0 * exp(-t / lambda)` and
/// `alpha_t = learning_rate * exp(-t / lambda)`. Both decay monotonically
/// towards zero, so updates localise and weaken as training progresses.
#[derive(Debug, Clone, Copy)]
pub struct DecaySchedule {
    sigma_0: f64,
    lambda: f64,
    learning_rate: f64,
}

impl DecaySchedule {
    /// Builds the schedule for a training run.
    ///
    /// `max(width, height) <= 2` puts `sigma_0` at or below 1, where
    /// `ln(sigma_0)` stops being a usable divisor; such grids are rejected
    /// here as well as at model construction.
    pub fn new(
        n_iterations: usize,
        width: usize,
        height: usize,
        learning_rate: f64,
    ) -> Result<Self> {
        if n_iterations == 0 {
            return Err(KohonenError::Config(
                "Number of iterations must be positive".to_string(),
            ));
        }
        let sigma_0 = width.max(height) as f64 / 2.0;
        if sigma_0 <= 1.0 {
            return Err(KohonenError::Config(format!(
                "Grid {width}x{height} is too small for the decay schedule; \
                 the larger dimension must be at least 3"
            )));
        }

        Ok(Self {
            sigma_0,
            lambda: n_iterations as f64 / sigma_0.ln(),
            learning_rate,
        })
    }

    /// Learning rate and radius `(alpha_t, sigma_t)` for iteration `t`.
    #[inline]
    pub fn at(&self, t: usize) -> (f64, f64) {
        let decay = (-(t as f64) / self.lambda).exp();
        (self.learning_rate * decay, self.sigma_0 * decay)
    }

    /// Initial neighbourhood radius.
    #[inline]
    pub fn sigma_0(&self) -> f64 {
        self.sigma_0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values() {
        let schedule = DecaySchedule::new(1000, 10, 6, 0.1).unwrap();
        let (alpha_0, sigma_0) = schedule.at(0);

        assert!((alpha_0 - 0.1).abs() < 1e-12);
        assert!((sigma_0 - 5.0).abs() < 1e-12);
        assert!((schedule.sigma_0() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_uses_larger_dimension() {
        let schedule = DecaySchedule::new(1000, 4, 12, 0.1).unwrap();
        assert!((schedule.sigma_0() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_monotonic_decay() {
        let schedule = DecaySchedule::new(500, 10, 10, 0.1).unwrap();
        let mut prev = schedule.at(0);
        for t in 1..500 {
            let cur = schedule.at(t);
            assert!(cur.0 <= prev.0, "alpha increased at t={t}");
            assert!(cur.1 <= prev.1, "sigma increased at t={t}");
            assert!(cur.0 > 0.0 && cur.1 > 0.0);
            prev = cur;
        }
    }

    #[test]
    fn test_known_decay_value() {
        // sigma_0 = 5, lambda = 100 / ln(5); at t = 100 the decay factor
        // is exactly exp(-ln(5)) = 1/5.
        let schedule = DecaySchedule::new(100, 10, 10, 0.1).unwrap();
        let (alpha, sigma) = schedule.at(100);
        assert!((sigma - 1.0).abs() < 1e-12);
        assert!((alpha - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_grid_rejected() {
        assert!(DecaySchedule::new(100, 2, 2, 0.1).is_err());
        assert!(DecaySchedule::new(100, 1, 1, 0.1).is_err());
        assert!(DecaySchedule::new(100, 3, 1, 0.1).is_ok());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(DecaySchedule::new(0, 10, 10, 0.1).is_err());
    }
}
