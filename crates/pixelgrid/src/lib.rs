//! # pixelgrid
//!
//! Convert raster images into color-quantized pattern grids for cross-stitch
//! and beading-style work.
//!
//! ## Pipeline
//!
//! - **Resampler**: maps the source image onto a `cols × rows` grid with
//!   area-averaged downscaling, honoring zoom and pan
//! - **Quantizer**: reduces the sampled colors to a bounded palette of exactly
//!   `k` colors (bucket-and-merge/split, frequency-ordered)
//! - **Nearest-color mapper**: snaps each cell to its closest palette entry
//! - **Grid assembler**: the single entry point tying the steps together
//!
//! ## Quick Start
//!
//! ```
//! use pixelgrid::{build_grid, GridSpec, PixelBuffer, Rgb};
//!
//! // A 4x2 solid-red image (RGBA bytes, alpha is ignored).
//! let rgba: Vec<u8> = [255u8, 0, 0, 255].repeat(8);
//! let image = PixelBuffer::from_rgba(&rgba, 4, 2)?;
//!
//! let spec = GridSpec {
//!     cols: 4,
//!     palette_size: 2,
//!     ..Default::default()
//! };
//! let grid = build_grid(&image, &spec)?;
//! assert_eq!((grid.cols(), grid.rows()), (4, 2));
//! assert_eq!(grid.cell(0, 0), Rgb::new(255, 0, 0));
//! # Ok::<(), pixelgrid::GridError>(())
//! ```
//!
//! Every call recomputes the full pipeline from the image and the spec; the
//! crate holds no state between calls. Callers driving it from interactive
//! controls are expected to debounce and keep only the latest result.

use thiserror::Error;

pub mod color;
pub mod grid;
pub mod quantize;
pub mod resample;

pub use color::Rgb;
pub use grid::{build_grid, build_grid_seeded, Grid, GridSpec};
pub use quantize::{nearest_color, quantize, quantize_with_rng};
pub use resample::{resample, PixelBuffer};

/// Errors that can occur while building a grid.
#[derive(Debug, Error)]
pub enum GridError {
    /// Grid columns or palette size of zero
    #[error("invalid grid spec: cols={cols}, palette_size={palette_size} (both must be >= 1)")]
    InvalidSpec { cols: usize, palette_size: usize },

    /// Pixel data length doesn't match the stated dimensions
    #[error("buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// Result type for grid operations.
pub type Result<T> = core::result::Result<T, GridError>;
