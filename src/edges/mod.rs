//! Edge detection used to turn a rendered silhouette into a binary edge map.
//!
//! - Sobel gradients with replicated borders and L1 magnitude.
//! - Canny: direction-aligned non-maximum suppression followed by
//!   8-connected hysteresis between a low and a high threshold.
//!
//! Thresholds are expressed on the raw 8-bit intensity scale (a unit step
//! between 0 and 255 gives an L1 magnitude of 1020).

pub mod canny;
pub mod grad;

pub use canny::{canny, CannyParams};
pub use grad::{sobel_gradients, Grad};
