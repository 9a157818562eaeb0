//! Self-Organising Map (SOM) core.
//!
//! This module contains the training and inference engine:
//!
//! - **Model & inference**: the weight grid, BMU search, and the
//!   vector-to-coordinate mapping (map.rs)
//! - **Schedule**: exponential decay of learning rate and neighbourhood
//!   radius (schedule.rs)
//! - **Training**: iteration and mini-batch orchestration (training.rs)

mod map;
mod schedule;
mod training;

pub use map::Som;
pub use schedule::DecaySchedule;
