//! Training orchestration for the Self-Organising Map.

use crate::error::{KohonenError, Result};
use crate::som::{DecaySchedule, Som};
use log::info;
use ndarray::{ArrayView1, ArrayView2};
use std::sync::atomic::{AtomicBool, Ordering};

/// Iterations between progress log lines.
const PROGRESS_INTERVAL: usize = 100;

impl Som {
    /// Trains the map on a dataset of shape `(n_samples, input_dim)`.
    ///
    /// Each iteration computes the decayed `(alpha_t, sigma_t)`, selects the
    /// working batch (the whole dataset, or `batch_size` samples drawn
    /// without replacement from the model's generator), and folds the batch
    /// through BMU search, neighbourhood computation, and weight update one
    /// sample at a time. Each sample sees the grid as left by the previous
    /// one; this ordered fold is the Kohonen algorithm itself and must not
    /// be parallelised across samples or iterations.
    ///
    /// Runs for exactly `n_iterations` iterations; there is no convergence
    /// check. All validation happens before the first weight is touched.
    pub fn fit(
        &mut self,
        data: ArrayView2<'_, f64>,
        n_iterations: usize,
        batch_size: Option<usize>,
    ) -> Result<&mut Self> {
        self.fit_inner(data, n_iterations, batch_size, None)
    }

    /// Like [`fit`](Self::fit), with a cooperative cancellation flag.
    ///
    /// The flag is checked between iterations; once set, training stops
    /// cleanly and the partially trained map is kept. The per-sample update
    /// chain is never interrupted mid-iteration.
    pub fn fit_with_cancel(
        &mut self,
        data: ArrayView2<'_, f64>,
        n_iterations: usize,
        batch_size: Option<usize>,
        cancel: &AtomicBool,
    ) -> Result<&mut Self> {
        self.fit_inner(data, n_iterations, batch_size, Some(cancel))
    }

    fn fit_inner(
        &mut self,
        data: ArrayView2<'_, f64>,
        n_iterations: usize,
        batch_size: Option<usize>,
        cancel: Option<&AtomicBool>,
    ) -> Result<&mut Self> {
        if data.ncols() != self.input_dim {
            return Err(KohonenError::DimensionMismatch {
                expected: self.input_dim,
                actual: data.ncols(),
            });
        }
        let n_samples = data.nrows();
        if n_samples == 0 {
            return Err(KohonenError::Training(
                "Cannot train on an empty dataset".to_string(),
            ));
        }
        if let Some(batch) = batch_size {
            if batch == 0 {
                return Err(KohonenError::Config(
                    "Batch size must be positive".to_string(),
                ));
            }
            if batch > n_samples {
                return Err(KohonenError::Training(format!(
                    "Batch size {batch} exceeds dataset size {n_samples}; \
                     samples are drawn without replacement"
                )));
            }
        }
        let schedule =
            DecaySchedule::new(n_iterations, self.width, self.height, self.learning_rate)?;

        info!(
            "Starting training: {} iterations, {} samples, batch size {:?}",
            n_iterations, n_samples, batch_size
        );

        for t in 0..n_iterations {
            if let Some(flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    info!("Training cancelled after {}/{} iterations", t, n_iterations);
                    return Ok(self);
                }
            }

            let (alpha_t, sigma_t) = schedule.at(t);

            match batch_size {
                Some(batch) => {
                    let indices = rand::seq::index::sample(&mut self.rng, n_samples, batch);
                    for idx in indices {
                        self.train_sample(data.row(idx), alpha_t, sigma_t);
                    }
                }
                None => {
                    for sample in data.rows() {
                        self.train_sample(sample, alpha_t, sigma_t);
                    }
                }
            }

            if (t + 1) % PROGRESS_INTERVAL == 0 || t + 1 == n_iterations {
                info!(
                    "Iteration {}/{}: alpha={:.4}, sigma={:.2}",
                    t + 1,
                    n_iterations,
                    alpha_t,
                    sigma_t
                );
            }
        }

        info!("Training completed");
        Ok(self)
    }

    /// One atomic training step: BMU search, neighbourhood, weight update.
    fn train_sample(&mut self, sample: ArrayView1<'_, f64>, alpha_t: f64, sigma_t: f64) {
        let bmu = self.find_bmu(sample);
        let influence = self.neighbourhood(bmu, sigma_t);
        self.update(sample, alpha_t, &influence);
    }
}
