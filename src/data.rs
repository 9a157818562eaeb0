//! Dataset generation and loading.

use crate::error::{KohonenError, Result};
use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Generates a dataset of uniform random samples in `[0, 1)`.
///
/// With `random_state` set, the output is fully reproducible.
pub fn generate(
    n_samples: usize,
    n_features: usize,
    random_state: Option<u64>,
) -> Result<Array2<f64>> {
    if n_samples == 0 || n_features == 0 {
        return Err(KohonenError::Data(format!(
            "Cannot generate a {n_samples}x{n_features} dataset; \
             both dimensions must be positive"
        )));
    }

    let mut rng = match random_state {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    Ok(Array2::from_shape_fn((n_samples, n_features), |_| {
        rng.gen::<f64>()
    }))
}

/// Loads a dataset from a JSON file holding an array of numeric rows.
///
/// Every row must have the same, non-zero length.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Array2<f64>> {
    let file = File::open(path)?;
    let rows: Vec<Vec<f64>> = serde_json::from_reader(BufReader::new(file))?;

    let n_samples = rows.len();
    if n_samples == 0 {
        return Err(KohonenError::Data("Dataset file is empty".to_string()));
    }
    let n_features = rows[0].len();
    if n_features == 0 {
        return Err(KohonenError::Data(
            "Dataset rows must not be empty".to_string(),
        ));
    }
    for (i, row) in rows.iter().enumerate() {
        if row.len() != n_features {
            return Err(KohonenError::Data(format!(
                "Ragged dataset: row {} has {} values, expected {}",
                i,
                row.len(),
                n_features
            )));
        }
    }

    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((n_samples, n_features), flat)
        .map_err(|e| KohonenError::Data(e.to_string()))
}

/// Rescales the dataset in place to `[0, 1]` by its global min and max.
///
/// A constant dataset (zero range) is left unchanged.
pub fn min_max_normalise(data: &mut Array2<f64>) {
    let min = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range > 0.0 {
        data.mapv_inplace(|v| (v - min) / range);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_generate_shape_and_range() {
        let data = generate(50, 4, Some(42)).unwrap();
        assert_eq!(data.dim(), (50, 4));
        assert!(data.iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn test_generate_is_deterministic_under_seed() {
        let a = generate(20, 3, Some(42)).unwrap();
        let b = generate(20, 3, Some(42)).unwrap();
        assert_eq!(a, b);

        let c = generate(20, 3, Some(43)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_generate_rejects_degenerate_shapes() {
        assert!(generate(0, 3, None).is_err());
        assert!(generate(10, 0, None).is_err());
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let mut file = File::create(&path).unwrap();
        write!(file, "[[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]]").unwrap();

        let data = load_json(&path).unwrap();
        assert_eq!(data.dim(), (2, 3));
        assert_eq!(data[[1, 2]], 5.0);
    }

    #[test]
    fn test_load_json_rejects_ragged_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ragged.json");
        let mut file = File::create(&path).unwrap();
        write!(file, "[[0.0, 1.0], [2.0]]").unwrap();

        assert!(load_json(&path).is_err());
    }

    #[test]
    fn test_load_json_rejects_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        let mut file = File::create(&path).unwrap();
        write!(file, "[]").unwrap();

        assert!(load_json(&path).is_err());
    }

    #[test]
    fn test_min_max_normalise() {
        let mut data = Array2::from_shape_vec((2, 2), vec![2.0, 4.0, 6.0, 10.0]).unwrap();
        min_max_normalise(&mut data);

        assert_eq!(data[[0, 0]], 0.0);
        assert_eq!(data[[1, 1]], 1.0);
        assert!((data[[0, 1]] - 0.25).abs() < 1e-12);
        assert!((data[[1, 0]] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalise_constant_data_unchanged() {
        let mut data = Array2::from_elem((3, 3), 7.0);
        min_max_normalise(&mut data);
        assert!(data.iter().all(|&v| v == 7.0));
    }
}
