//! Match-winner prediction from champion picks and first-objective flags.
//!
//! The pipeline is a chain of pure steps over immutable data:
//! [`data::loader`] reads matches and the champion catalog,
//! [`features::encoder`] one-hot encodes picks, [`model::split`] makes a
//! seeded holdout split, [`model::forest`] fits a random forest and
//! [`analysis::evaluator`] scores it. [`analysis::win_rate`] works on the
//! raw matches independently of the model.
pub mod analysis;
pub mod config;
pub mod data;
pub mod display;
pub mod error;
pub mod features;
pub mod model;
