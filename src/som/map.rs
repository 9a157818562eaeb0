//! Self-Organising Map model and inference.

use crate::config::SomConfig;
use crate::error::{KohonenError, Result};
use ndarray::{s, Array2, Array3, ArrayView1, ArrayView2, ArrayView3, Axis, Zip};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// A Self-Organising Map trained with the classical Kohonen algorithm.
///
/// The map is a 2D lattice of prototype vectors. Training pulls the
/// prototype of the best-matching cell (and, with decaying strength, its
/// lattice neighbours) towards each input sample, so that nearby cells come
/// to represent similar regions of the input space.
#[derive(Debug, Clone)]
pub struct Som {
    /// Grid width in lattice cells.
    pub(crate) width: usize,
    /// Grid height in lattice cells.
    pub(crate) height: usize,
    /// Dimensionality of inputs and prototypes.
    pub(crate) input_dim: usize,
    /// Initial learning rate.
    pub(crate) learning_rate: f64,
    /// Prototype vectors, shape `(width, height, input_dim)`.
    pub(crate) weights: Array3<f64>,
    /// Lattice x position per cell, shape `(width, height)`.
    pub(crate) x_coords: Array2<f64>,
    /// Lattice y position per cell, shape `(width, height)`.
    pub(crate) y_coords: Array2<f64>,
    /// Model-owned generator; drives initialisation and batch sampling.
    pub(crate) rng: ChaCha8Rng,
}

impl Som {
    /// Creates a new map with weights drawn uniformly from `[0, 1)`.
    ///
    /// With `random_state` set, construction and every subsequent training
    /// run on this instance are fully reproducible.
    pub fn new(
        width: usize,
        height: usize,
        input_dim: usize,
        learning_rate: f64,
        random_state: Option<u64>,
    ) -> Result<Self> {
        Self::from_config(&SomConfig {
            width,
            height,
            input_dim,
            learning_rate,
            random_state,
            ..SomConfig::default()
        })
    }

    /// Creates a new map from a configuration object.
    pub fn from_config(config: &SomConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.random_state {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let (width, height, input_dim) = (config.width, config.height, config.input_dim);
        let weights = Array3::from_shape_fn((width, height, input_dim), |_| rng.gen::<f64>());
        let x_coords = Array2::from_shape_fn((width, height), |(x, _)| x as f64);
        let y_coords = Array2::from_shape_fn((width, height), |(_, y)| y as f64);

        Ok(Self {
            width,
            height,
            input_dim,
            learning_rate: config.learning_rate,
            weights,
            x_coords,
            y_coords,
            rng,
        })
    }

    /// Grid width in lattice cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in lattice cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Dimensionality of input vectors and prototypes.
    #[inline]
    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// Initial learning rate.
    #[inline]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Read-only view of the weight grid, shape `(width, height, input_dim)`.
    #[inline]
    pub fn weights(&self) -> ArrayView3<'_, f64> {
        self.weights.view()
    }

    /// Finds the Best Matching Unit (BMU) for an input vector.
    ///
    /// Scans every cell and returns the lattice coordinates of the prototype
    /// with the smallest squared Euclidean distance to the sample.
    /// Equidistant candidates resolve to the first minimum in row-major
    /// (x-major) order, i.e. the lexicographically smallest `(x, y)`.
    pub fn find_bmu(&self, sample: ArrayView1<'_, f64>) -> (usize, usize) {
        debug_assert_eq!(
            sample.len(),
            self.input_dim,
            "Sample and prototype dimensions must match"
        );

        let mut best = (0, 0);
        let mut best_dist = f64::INFINITY;
        for x in 0..self.width {
            for y in 0..self.height {
                let dist = self.cell_distance_squared(x, y, sample);
                if dist < best_dist {
                    best_dist = dist;
                    best = (x, y);
                }
            }
        }
        best
    }

    /// Finds the BMU with the distance reduction spread over a thread pool.
    ///
    /// Returns exactly what [`find_bmu`](Self::find_bmu) returns, including
    /// the row-major tie-break: candidates are compared by
    /// `(distance, flat index)` so the reduction order cannot change the
    /// winner. Worth it for large maps.
    pub fn find_bmu_parallel(&self, sample: ArrayView1<'_, f64>) -> (usize, usize) {
        debug_assert_eq!(
            sample.len(),
            self.input_dim,
            "Sample and prototype dimensions must match"
        );

        let flat = (0..self.width * self.height)
            .into_par_iter()
            .map(|i| {
                let (x, y) = (i / self.height, i % self.height);
                (i, self.cell_distance_squared(x, y, sample))
            })
            .min_by(|(ia, da), (ib, db)| da.partial_cmp(db).unwrap().then(ia.cmp(ib)))
            .map(|(i, _)| i)
            .unwrap_or(0);

        (flat / self.height, flat % self.height)
    }

    #[inline]
    fn cell_distance_squared(&self, x: usize, y: usize, sample: ArrayView1<'_, f64>) -> f64 {
        self.weights
            .slice(s![x, y, ..])
            .iter()
            .zip(sample.iter())
            .map(|(w, v)| (w - v).powi(2))
            .sum()
    }

    /// Computes the Gaussian neighbourhood influence of a BMU over the grid.
    ///
    /// For each cell the planar lattice distance `d` to the BMU gives an
    /// influence of `exp(-d^2 / (2 * sigma^2))`: a `(width, height)` array of
    /// values in `(0, 1]`, exactly 1 at the BMU and decaying with distance.
    pub fn neighbourhood(&self, bmu: (usize, usize), sigma: f64) -> Array2<f64> {
        let (bmu_x, bmu_y) = (bmu.0 as f64, bmu.1 as f64);
        let two_sigma_sq = 2.0 * sigma * sigma;

        let mut influence = Array2::zeros((self.width, self.height));
        Zip::from(&mut influence)
            .and(&self.x_coords)
            .and(&self.y_coords)
            .for_each(|theta, &x, &y| {
                let dist_sq = (x - bmu_x).powi(2) + (y - bmu_y).powi(2);
                *theta = (-dist_sq / two_sigma_sq).exp();
            });
        influence
    }

    /// Pulls every prototype towards the sample, scaled by the learning rate
    /// and the per-cell neighbourhood influence.
    ///
    /// `w += alpha * theta * (sample - w)`, componentwise and in place.
    pub fn update(&mut self, sample: ArrayView1<'_, f64>, alpha: f64, influence: &Array2<f64>) {
        Zip::from(self.weights.lanes_mut(Axis(2)))
            .and(influence)
            .for_each(|mut prototype, &theta| {
                let step = alpha * theta;
                Zip::from(&mut prototype)
                    .and(&sample)
                    .for_each(|w, &v| *w += step * (v - *w));
            });
    }

    /// Maps each input row to the lattice coordinates of its BMU.
    ///
    /// Pure read-only query of the current grid state: rows are independent
    /// (their BMU searches run on the rayon pool) and output order follows
    /// input order. Returns an `(n, 2)` array of `(x, y)` pairs, integer
    /// valued but stored as floats.
    pub fn transform(&self, data: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        if data.ncols() != self.input_dim {
            return Err(KohonenError::DimensionMismatch {
                expected: self.input_dim,
                actual: data.ncols(),
            });
        }

        let bmus: Vec<(usize, usize)> = (0..data.nrows())
            .into_par_iter()
            .map(|i| self.find_bmu(data.row(i)))
            .collect();

        let mut coordinates = Array2::zeros((data.nrows(), 2));
        for (i, (x, y)) in bmus.into_iter().enumerate() {
            coordinates[[i, 0]] = x as f64;
            coordinates[[i, 1]] = y as f64;
        }
        Ok(coordinates)
    }
}
