//! 2D affine image warps standing in for re-rendering at a perturbed pose.

pub mod affine;

pub use affine::{warp_affine, AffineMap};
