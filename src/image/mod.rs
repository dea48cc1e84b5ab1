//! Single-channel image containers used throughout the refinement pipeline.
//!
//! - [`ImageU8`]: borrowed 8-bit view over externally owned pixels (event
//!   surfaces, rendered silhouettes).
//! - [`GrayImageU8`]: owned 8-bit buffer returned by collaborators.
//! - [`ImageF32`]: owned float buffer for fields, warps and visualisations.
//!
//! All buffers are row-major; only [`ImageU8`] may carry a stride larger than
//! its width.
pub mod f32;
pub mod io;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::u8::{GrayImageU8, ImageU8};

/// Read access to rows of a single-channel image.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn row(&self, y: usize) -> &[Self::Pixel];

    fn dims(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    fn same_size<O: ImageView>(&self, other: &O) -> bool {
        self.dims() == other.dims()
    }
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];
}

/// Run `f(y, row)` over every row of `img`.
///
/// With the `parallel` feature rows are distributed over the rayon pool; each
/// row is written by exactly one call, so output does not depend on
/// scheduling.
pub(crate) fn for_each_row_mut<F>(img: &mut ImageF32, f: F)
where
    F: Fn(usize, &mut [f32]) + Send + Sync,
{
    if img.w == 0 || img.h == 0 {
        return;
    }
    let w = img.w;
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        img.data
            .par_chunks_mut(w)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }
    #[cfg(not(feature = "parallel"))]
    {
        img.data
            .chunks_mut(w)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }
}
