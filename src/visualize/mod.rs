//! Debug renderings. Nothing here feeds back into the search.

pub mod grid;
pub mod overlay;

pub use grid::{compose_candidate_grid, draw_score_bar};
pub use overlay::overlay_fields;
