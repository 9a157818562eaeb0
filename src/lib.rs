//! # Kohonen - Self-Organising Map engine
//!
//! A Rust implementation of the classical Kohonen Self-Organising Map: a 2D
//! lattice of prototype vectors trained by competitive learning so that
//! nearby lattice cells come to represent similar regions of the input space.
//!
//! ## Overview
//!
//! Training repeatedly picks samples, finds each sample's best-matching unit
//! (BMU), and pulls the BMU's prototype and its lattice neighbours towards
//! the sample. Both the learning rate and the neighbourhood radius decay
//! exponentially, so the map first orders globally, then fine-tunes locally.
//! A trained map answers `transform` queries, mapping new vectors to the
//! lattice coordinates of their BMU.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kohonen::{data, Som};
//!
//! // 10x10 map over 3-dimensional inputs, reproducible under seed 42
//! let mut som = Som::new(10, 10, 3, 0.1, Some(42))?;
//!
//! // Train on 100 random samples for 1000 iterations, mini-batches of 32
//! let dataset = data::generate(100, 3, Some(42))?;
//! som.fit(dataset.view(), 1000, Some(32))?;
//!
//! // Map vectors to lattice coordinates
//! let coordinates = som.transform(dataset.view())?;
//! ```
//!
//! ## Architecture
//!
//! - [`som`] - the training and inference engine
//! - [`config`] - configuration objects with validation and JSON file I/O
//! - [`data`] - dataset generation, loading, and normalisation
//! - [`render`] - weight grid rendering to images

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod data;
pub mod error;
pub mod render;
pub mod som;

// Re-export commonly used types
pub use config::{Config, DataConfig, RenderConfig, SomConfig};
pub use error::{KohonenError, Result};
pub use som::{DecaySchedule, Som};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
