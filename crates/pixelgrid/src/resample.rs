//! Geometric resampling: maps a source image onto the output grid.
//!
//! The resampler takes an arbitrary-size [`PixelBuffer`] and produces one
//! representative color per grid cell, honoring a zoom factor and a 2D pan
//! offset. Downscaling uses a fractional-coverage box filter (area averaging)
//! rather than nearest-neighbor sampling, so thin features still contribute to
//! the cells they pass through.

use crate::{GridError, Result, Rgb};

/// A rectangular, row-major RGB pixel buffer.
///
/// Produced externally from a decoded image (alpha, if present in the source
/// bytes, is dropped at construction). The pipeline never mutates a buffer it
/// was given; resampling returns a fresh one.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    /// Creates an all-black buffer of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width * height],
        }
    }

    /// Creates a buffer from row-major pixels.
    ///
    /// # Errors
    /// Returns [`GridError::BufferSizeMismatch`] if `pixels.len()` is not
    /// `width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self> {
        let expected = width * height;
        if pixels.len() != expected {
            return Err(GridError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates a buffer from raw RGBA bytes (4 bytes per pixel), dropping the
    /// alpha channel.
    ///
    /// # Errors
    /// Returns [`GridError::BufferSizeMismatch`] if `rgba.len()` is not
    /// `width * height * 4`.
    pub fn from_rgba(rgba: &[u8], width: usize, height: usize) -> Result<Self> {
        let expected = width * height * 4;
        if rgba.len() != expected {
            return Err(GridError::BufferSizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        let pixels = rgba
            .chunks_exact(4)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major pixel slice.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixel at `(x, y)`. Panics if out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }
}

/// Resamples `image` into a `cols × rows` buffer under the given zoom and pan.
///
/// Zoom and pan select the source window that gets mapped onto the output:
///
/// - `zoom_percent == 100`, pan `(0, 0)`: the whole image, scaled (fast path).
/// - `zoom_percent == 100`, nonzero pan: a crop window of `cols × rows` source
///   pixels at `pan/100 * dimension`, clamped to the image; copied 1:1 with no
///   scaling. If the image is smaller than the window, the window shrinks and
///   uncovered cells stay black.
/// - `zoom_percent > 100`: a centered window of `dimension / (zoom/100)` source
///   pixels; pan shifts its center by `pan/100 * maxOffset` where
///   `maxOffset = (dimension - window) / 2`, so ±100% reaches the window's
///   extreme. Clamped, then scaled to the output.
/// - `zoom_percent < 100`: the whole image scaled to the output; pan has no
///   effect here since the window already covers the full image.
///
/// A zero-dimension source produces an all-black output rather than dividing
/// by zero.
pub fn resample(
    image: &PixelBuffer,
    cols: usize,
    rows: usize,
    zoom_percent: u32,
    pan_x_percent: i32,
    pan_y_percent: i32,
) -> PixelBuffer {
    if cols == 0 || rows == 0 || image.width() == 0 || image.height() == 0 {
        return PixelBuffer::new(cols, rows);
    }

    let w = image.width() as f64;
    let h = image.height() as f64;
    let scale = zoom_percent as f64 / 100.0;
    let no_zoom = zoom_percent == 100;

    if no_zoom && pan_x_percent == 0 && pan_y_percent == 0 {
        scale_window(image, 0.0, 0.0, w, h, cols, rows)
    } else if no_zoom {
        crop_copy(image, cols, rows, pan_x_percent, pan_y_percent)
    } else if scale > 1.0 {
        let src_w = w / scale;
        let src_h = h / scale;
        let max_off_x = (w - src_w) / 2.0;
        let max_off_y = (h - src_h) / 2.0;
        let sx = (max_off_x + pan_x_percent as f64 / 100.0 * max_off_x).clamp(0.0, w - src_w);
        let sy = (max_off_y + pan_y_percent as f64 / 100.0 * max_off_y).clamp(0.0, h - src_h);
        scale_window(image, sx, sy, src_w, src_h, cols, rows)
    } else {
        scale_window(image, 0.0, 0.0, w, h, cols, rows)
    }
}

/// Offset-only branch: copies a `cols × rows` source window 1:1, filling any
/// uncovered output cells with black.
fn crop_copy(
    image: &PixelBuffer,
    cols: usize,
    rows: usize,
    pan_x_percent: i32,
    pan_y_percent: i32,
) -> PixelBuffer {
    let w = image.width();
    let h = image.height();

    let off_x = pan_x_percent as f64 / 100.0 * w as f64;
    let off_y = pan_y_percent as f64 / 100.0 * h as f64;
    let sx = off_x.clamp(0.0, w.saturating_sub(cols) as f64) as usize;
    let sy = off_y.clamp(0.0, h.saturating_sub(rows) as f64) as usize;
    let copy_w = cols.min(w - sx);
    let copy_h = rows.min(h - sy);

    let mut out = PixelBuffer::new(cols, rows);
    for y in 0..copy_h {
        for x in 0..copy_w {
            out.pixels[y * cols + x] = image.get(sx + x, sy + y);
        }
    }
    out
}

/// Scales the source window `(wx, wy, ww, wh)` onto a `cols × rows` output
/// with a fractional-coverage box filter.
///
/// Each output cell averages every source pixel its window footprint touches,
/// weighted by the overlap area. When the window maps cells 1:1 onto source
/// pixels every weight is exactly 1, so a no-op resample is pixel-exact.
/// Sub-pixel footprints (strong zoom on a tiny image) degenerate to the single
/// covering pixel.
fn scale_window(
    image: &PixelBuffer,
    wx: f64,
    wy: f64,
    ww: f64,
    wh: f64,
    cols: usize,
    rows: usize,
) -> PixelBuffer {
    let iw = image.width();
    let ih = image.height();
    let mut pixels = Vec::with_capacity(cols * rows);

    for ty in 0..rows {
        let y0 = wy + ty as f64 * wh / rows as f64;
        let y1 = wy + (ty + 1) as f64 * wh / rows as f64;
        let py0 = (y0.floor().max(0.0)) as usize;
        let py1 = (y1.ceil().min(ih as f64)) as usize;

        for tx in 0..cols {
            let x0 = wx + tx as f64 * ww / cols as f64;
            let x1 = wx + (tx + 1) as f64 * ww / cols as f64;
            let px0 = (x0.floor().max(0.0)) as usize;
            let px1 = (x1.ceil().min(iw as f64)) as usize;

            let mut sum_r = 0.0;
            let mut sum_g = 0.0;
            let mut sum_b = 0.0;
            let mut weight_sum = 0.0;

            for py in py0..py1 {
                let cover_y = (y1.min(py as f64 + 1.0) - y0.max(py as f64)).max(0.0);
                if cover_y == 0.0 {
                    continue;
                }
                for px in px0..px1 {
                    let cover_x = (x1.min(px as f64 + 1.0) - x0.max(px as f64)).max(0.0);
                    if cover_x == 0.0 {
                        continue;
                    }
                    let weight = cover_x * cover_y;
                    let p = image.get(px, py);
                    sum_r += p.r as f64 * weight;
                    sum_g += p.g as f64 * weight;
                    sum_b += p.b as f64 * weight;
                    weight_sum += weight;
                }
            }

            if weight_sum > 0.0 {
                pixels.push(Rgb::new(
                    (sum_r / weight_sum).round() as u8,
                    (sum_g / weight_sum).round() as u8,
                    (sum_b / weight_sum).round() as u8,
                ));
            } else {
                pixels.push(Rgb::BLACK);
            }
        }
    }

    PixelBuffer {
        width: cols,
        height: rows,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(width: usize, height: usize) -> PixelBuffer {
        let pixels = (0..width * height)
            .map(|i| {
                let (x, y) = (i % width, i / width);
                if (x + y) % 2 == 0 {
                    Rgb::new(255, 255, 255)
                } else {
                    Rgb::BLACK
                }
            })
            .collect();
        PixelBuffer::from_pixels(width, height, pixels).unwrap()
    }

    #[test]
    fn test_noop_resample_is_identity() {
        let img = checkerboard(8, 6);
        let out = resample(&img, 8, 6, 100, 0, 0);
        assert_eq!(out.pixels(), img.pixels());
    }

    #[test]
    fn test_zero_dimension_source_is_black() {
        let img = PixelBuffer::new(0, 10);
        let out = resample(&img, 4, 4, 100, 0, 0);
        assert_eq!(out.width(), 4);
        assert_eq!(out.height(), 4);
        assert!(out.pixels().iter().all(|&p| p == Rgb::BLACK));
    }

    #[test]
    fn test_downscale_averages_regions() {
        // Left half red, right half blue; the output keeps the halves apart.
        let pixels = (0..10)
            .flat_map(|_| {
                let mut row = vec![Rgb::new(255, 0, 0); 5];
                row.extend(vec![Rgb::new(0, 0, 255); 5]);
                row
            })
            .collect::<Vec<_>>();
        let img = PixelBuffer::from_pixels(10, 10, pixels).unwrap();
        let out = resample(&img, 2, 2, 100, 0, 0);
        assert_eq!(out.get(0, 0), Rgb::new(255, 0, 0));
        assert_eq!(out.get(1, 0), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_offset_crop_copies_window() {
        // 4x4 gradient-ish image, 2x2 output panned fully right/down.
        let pixels = (0..16).map(|i| Rgb::new(i as u8 * 16, 0, 0)).collect();
        let img = PixelBuffer::from_pixels(4, 4, pixels).unwrap();
        let out = resample(&img, 2, 2, 100, 100, 100);
        // Window clamps to the bottom-right 2x2 block.
        assert_eq!(out.get(0, 0), img.get(2, 2));
        assert_eq!(out.get(1, 1), img.get(3, 3));
    }

    #[test]
    fn test_offset_crop_smaller_source_fills_black() {
        let img = checkerboard(2, 2);
        let out = resample(&img, 4, 4, 100, 50, 0);
        // Source window shrinks to 2x2 at the origin; the rest stays black.
        assert_eq!(out.get(0, 0), img.get(0, 0));
        assert_eq!(out.get(3, 3), Rgb::BLACK);
    }

    #[test]
    fn test_zoom_in_crops_center() {
        // Border white, center 2x2 black. 200% zoom on 4x4 leaves only the center.
        let mut pixels = vec![Rgb::new(255, 255, 255); 16];
        for y in 1..3 {
            for x in 1..3 {
                pixels[y * 4 + x] = Rgb::BLACK;
            }
        }
        let img = PixelBuffer::from_pixels(4, 4, pixels).unwrap();
        let out = resample(&img, 2, 2, 200, 0, 0);
        assert!(out.pixels().iter().all(|&p| p == Rgb::BLACK));
    }

    #[test]
    fn test_zoom_out_ignores_pan() {
        let img = checkerboard(8, 8);
        let panned = resample(&img, 4, 4, 50, 80, -80);
        let centered = resample(&img, 4, 4, 50, 0, 0);
        assert_eq!(panned.pixels(), centered.pixels());
    }

    #[test]
    fn test_from_rgba_drops_alpha() {
        let rgba = [10u8, 20, 30, 0, 40, 50, 60, 255];
        let buf = PixelBuffer::from_rgba(&rgba, 2, 1).unwrap();
        assert_eq!(buf.get(0, 0), Rgb::new(10, 20, 30));
        assert_eq!(buf.get(1, 0), Rgb::new(40, 50, 60));
    }

    #[test]
    fn test_from_rgba_size_mismatch() {
        assert!(PixelBuffer::from_rgba(&[0u8; 12], 2, 2).is_err());
    }
}
