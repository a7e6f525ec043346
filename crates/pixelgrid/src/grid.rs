//! Grid assembly: the pipeline's single public entry point.
//!
//! `build_grid` runs resample → quantize → nearest-map and returns the final
//! `rows × cols` grid of palette colors. There is no caching between calls;
//! every parameter change recomputes the whole pipeline, which stays cheap
//! because grids are at most a few thousand cells.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::quantize::{nearest_color, quantize, quantize_with_rng};
use crate::resample::{resample, PixelBuffer};
use crate::{GridError, Result, Rgb};

/// Parameters for one grid computation.
///
/// Row count is not part of the spec; it is derived from `cols` and the source
/// image's aspect ratio (see [`GridSpec::derived_rows`]). All fields are small
/// integers so a spec round-trips losslessly through query parameters or
/// command lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    /// Number of grid columns. Must be ≥ 1.
    pub cols: usize,
    /// Maximum number of palette colors. Must be ≥ 1.
    pub palette_size: usize,
    /// Zoom percent: 100 = no zoom, > 100 zooms in, < 100 zooms out.
    pub zoom_percent: u32,
    /// Horizontal pan in percent, -100 to 100.
    pub pan_x_percent: i32,
    /// Vertical pan in percent, -100 to 100.
    pub pan_y_percent: i32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            cols: 10,
            palette_size: 3,
            zoom_percent: 100,
            pan_x_percent: 0,
            pan_y_percent: 0,
        }
    }
}

impl GridSpec {
    /// Row count derived from the column count and the image aspect ratio:
    /// `max(1, round(cols * height / width))`. A zero-width image yields 1.
    pub fn derived_rows(&self, image_width: usize, image_height: usize) -> usize {
        if image_width == 0 {
            return 1;
        }
        let aspect = image_height as f64 / image_width as f64;
        ((self.cols as f64 * aspect).round() as usize).max(1)
    }

    fn validate(&self) -> Result<()> {
        if self.cols == 0 || self.palette_size == 0 {
            return Err(GridError::InvalidSpec {
                cols: self.cols,
                palette_size: self.palette_size,
            });
        }
        Ok(())
    }
}

/// The assembled pattern: `rows × cols` cells of palette colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Rgb>,
    palette: Vec<Rgb>,
}

impl Grid {
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Row-major cell slice of length `rows * cols`.
    #[inline]
    pub fn cells(&self) -> &[Rgb] {
        &self.cells
    }

    /// Cell at `(row, col)`. Panics if out of bounds.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Rgb {
        self.cells[row * self.cols + col]
    }

    /// The quantized palette the cells were mapped onto, in the quantizer's
    /// frequency order. Not every entry is necessarily used by a cell.
    #[inline]
    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }
}

/// Builds the color-quantized grid for `image` under `spec`.
///
/// Steps: derive rows from the aspect ratio, resample the image into a
/// `cols × rows` buffer, quantize the sampled colors down to
/// `spec.palette_size`, then snap every cell to its nearest palette color.
///
/// The quantizer's fill phase (only active when the image has fewer natural
/// color clusters than `palette_size`) uses ambient randomness; use
/// [`build_grid_seeded`] for bit-reproducible output.
///
/// # Errors
/// Returns [`GridError::InvalidSpec`] if `cols` or `palette_size` is zero.
pub fn build_grid(image: &PixelBuffer, spec: &GridSpec) -> Result<Grid> {
    spec.validate()?;
    let sampled = resample_for(image, spec);
    let palette = quantize(sampled.pixels(), spec.palette_size);
    Ok(assemble(sampled, palette))
}

/// [`build_grid`] with a seeded random source, making the quantizer's fill
/// phase (and therefore the whole grid) reproducible for a given seed.
pub fn build_grid_seeded(image: &PixelBuffer, spec: &GridSpec, seed: u64) -> Result<Grid> {
    spec.validate()?;
    let sampled = resample_for(image, spec);
    let mut rng = StdRng::seed_from_u64(seed);
    let palette = quantize_with_rng(sampled.pixels(), spec.palette_size, &mut rng);
    Ok(assemble(sampled, palette))
}

fn resample_for(image: &PixelBuffer, spec: &GridSpec) -> PixelBuffer {
    let rows = spec.derived_rows(image.width(), image.height());
    resample(
        image,
        spec.cols,
        rows,
        spec.zoom_percent,
        spec.pan_x_percent,
        spec.pan_y_percent,
    )
}

fn assemble(sampled: PixelBuffer, palette: Vec<Rgb>) -> Grid {
    let cells = sampled
        .pixels()
        .iter()
        .map(|&c| nearest_color(c, &palette))
        .collect();
    Grid {
        cols: sampled.width(),
        rows: sampled.height(),
        cells,
        palette,
    }
}
