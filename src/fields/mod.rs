//! Normalised fields compared by the refinement search.
//!
//! - [`edge_potential`]: signed attraction field from a rendered projection,
//!   positive on the model's edges and negative in a halo around them.
//! - [`observation_field`]: smoothed event surface min-max normalised to `[0, 1]`.
//! - [`similarity_score`]: plain cross-correlation of the two.

pub mod edge_potential;
pub mod observation;
pub mod similarity;

pub use edge_potential::{edge_potential, EdgePotentialOptions};
pub use observation::{observation_field, ObservationOptions};
pub use similarity::similarity_score;
