//! Renders an assembled grid to a PNG-ready image: colored cells, optional
//! grid lines, and numbered row/column label gutters like the printable
//! patterns the original tool exports.

use image::{Rgb, RgbImage};
use pixelgrid::Grid;

/// Cells smaller than this leave no room for grid lines or labels.
pub const MIN_CELL_SIZE: u32 = 8;

const LABEL_WIDTH: u32 = 50;
const LABEL_HEIGHT: u32 = 30;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
/// Label gutter background (#ffe0ec).
const LABEL_BACKGROUND: Rgb<u8> = Rgb([255, 224, 236]);
/// Label text and grid line color (#ff6b9d).
const ACCENT: Rgb<u8> = Rgb([255, 107, 157]);
/// Grid lines are drawn at 20% opacity over the cell color.
const GRID_LINE_ALPHA: f32 = 0.2;

/// 5x7 digit glyphs, one row per byte, low 5 bits used.
const DIGITS: [[u8; 7]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110], // 0
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 1
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111], // 2
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110], // 3
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010], // 4
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110], // 5
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110], // 6
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000], // 7
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110], // 8
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100], // 9
];

/// Draws the grid as an image, one `cell_size` square per cell.
///
/// With `labels`, a gutter band along the top and left carries 1-based
/// column and row numbers; with `grid_lines`, a one-pixel accent border is
/// blended over each cell's edge.
pub fn render_pattern(grid: &Grid, cell_size: u32, grid_lines: bool, labels: bool) -> RgbImage {
    let cols = grid.cols() as u32;
    let rows = grid.rows() as u32;
    let (off_x, off_y) = if labels {
        (LABEL_WIDTH, LABEL_HEIGHT)
    } else {
        (0, 0)
    };

    let mut img = RgbImage::from_pixel(
        off_x + cols * cell_size,
        off_y + rows * cell_size,
        WHITE,
    );

    if labels {
        for col in 0..cols {
            let x = off_x + col * cell_size;
            fill_rect(&mut img, x, 0, cell_size, LABEL_HEIGHT, LABEL_BACKGROUND);
            draw_number(&mut img, col + 1, x, 0, cell_size, LABEL_HEIGHT);
        }
        for row in 0..rows {
            let y = off_y + row * cell_size;
            fill_rect(&mut img, 0, y, LABEL_WIDTH, cell_size, LABEL_BACKGROUND);
            draw_number(&mut img, row + 1, 0, y, LABEL_WIDTH, cell_size);
        }
    }

    for row in 0..rows {
        for col in 0..cols {
            let c = grid.cell(row as usize, col as usize);
            let x = off_x + col * cell_size;
            let y = off_y + row * cell_size;
            fill_rect(&mut img, x, y, cell_size, cell_size, Rgb([c.r, c.g, c.b]));
            if grid_lines {
                draw_cell_border(&mut img, x, y, cell_size);
            }
        }
    }

    img
}

fn fill_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    for py in y..y + h {
        for px in x..x + w {
            img.put_pixel(px, py, color);
        }
    }
}

/// Blends the accent color over one pixel at the grid-line opacity.
fn blend_line(img: &mut RgbImage, x: u32, y: u32) {
    let dst = img.get_pixel(x, y);
    let mix = |d: u8, s: u8| {
        (d as f32 * (1.0 - GRID_LINE_ALPHA) + s as f32 * GRID_LINE_ALPHA).round() as u8
    };
    img.put_pixel(
        x,
        y,
        Rgb([
            mix(dst[0], ACCENT[0]),
            mix(dst[1], ACCENT[1]),
            mix(dst[2], ACCENT[2]),
        ]),
    );
}

fn draw_cell_border(img: &mut RgbImage, x: u32, y: u32, size: u32) {
    for i in 0..size {
        blend_line(img, x + i, y);
        blend_line(img, x + i, y + size - 1);
    }
    for i in 1..size.saturating_sub(1) {
        blend_line(img, x, y + i);
        blend_line(img, x + size - 1, y + i);
    }
}

/// Draws `n` centered in the band at `(x, y)` of size `w x h` using the
/// embedded digit glyphs, scaled to fit the band.
fn draw_number(img: &mut RgbImage, n: u32, x: u32, y: u32, w: u32, h: u32) {
    let digits: Vec<u32> = {
        let mut v = Vec::new();
        let mut n = n;
        loop {
            v.push(n % 10);
            n /= 10;
            if n == 0 {
                break;
            }
        }
        v.reverse();
        v
    };

    let count = digits.len() as u32;
    // Glyphs are 5x7 with one scaled column of spacing between digits.
    let scale = (h / 12).min(w / (count * 6)).max(1);
    let total_w = count * 5 * scale + (count - 1) * scale;
    let total_h = 7 * scale;
    if total_w > w || total_h > h {
        return; // band too small for the label, skip rather than overflow
    }
    let mut cursor_x = x + (w - total_w) / 2;
    let origin_y = y + (h - total_h) / 2;

    for digit in digits {
        let glyph = &DIGITS[digit as usize];
        for (gy, bits) in glyph.iter().enumerate() {
            for gx in 0..5u32 {
                if bits & (1 << (4 - gx)) != 0 {
                    fill_rect(
                        img,
                        cursor_x + gx * scale,
                        origin_y + gy as u32 * scale,
                        scale,
                        scale,
                        ACCENT,
                    );
                }
            }
        }
        cursor_x += 6 * scale;
    }
}
