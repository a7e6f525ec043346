//! Color quantization: reduces an unbounded multiset of sampled colors to a
//! bounded palette of exactly `k` representatives.
//!
//! The algorithm is a bucket-and-merge/split approximation of k-means: colors
//! are binned into an axis-aligned RGB grid, the closest bucket means are
//! merged down to `k`, and if binning produced fewer than `k` natural clusters
//! the palette is padded by farthest-point sampling. It trades optimality for
//! bounded time and an exact palette size, which is what interactive
//! slider-driven recomputation needs.

use std::collections::HashMap;

use rand::Rng;

use crate::Rgb;

/// Candidate draws per palette slot in the farthest-point fill phase.
const FILL_SAMPLE_LIMIT: usize = 50;

/// Per-bucket accumulator for the binning pass.
#[derive(Default)]
struct Bucket {
    sum_r: u64,
    sum_g: u64,
    sum_b: u64,
    count: u64,
}

/// A palette entry weighted by how many source pixels mapped to it.
#[derive(Clone, Copy)]
struct WeightedColor {
    color: Rgb,
    count: u64,
}

/// Reduces `colors` to exactly `k` representative colors.
///
/// Returns an empty vector only when `colors` is empty; otherwise the result
/// has exactly `k` entries for any `k ≥ 1` (for `k == 1`, the single entry is
/// the componentwise rounded mean of the input). Entries are ordered by the
/// quantizer's internal frequency order, most common clusters first.
///
/// The fill phase draws random candidates from ambient thread entropy, so
/// results are not byte-reproducible across runs when fewer than `k` natural
/// clusters exist. Use [`quantize_with_rng`] with a seeded generator for
/// reproducible output.
pub fn quantize(colors: &[Rgb], k: usize) -> Vec<Rgb> {
    quantize_with_rng(colors, k, &mut rand::thread_rng())
}

/// [`quantize`] with an injected random source for the fill phase.
///
/// The bucket-and-merge phases are fully deterministic; `rng` is only
/// consulted when the palette has to be padded up to `k`.
pub fn quantize_with_rng<R: Rng + ?Sized>(colors: &[Rgb], k: usize, rng: &mut R) -> Vec<Rgb> {
    if colors.is_empty() {
        return Vec::new();
    }
    if k <= 1 {
        return vec![mean_color(colors)];
    }

    // Per-channel bounds; a constant channel gets the full 0-255 range so the
    // bin math below never divides by zero.
    let mut min = [255u8; 3];
    let mut max = [0u8; 3];
    for c in colors {
        let ch = [c.r, c.g, c.b];
        for i in 0..3 {
            min[i] = min[i].min(ch[i]);
            max[i] = max[i].max(ch[i]);
        }
    }
    let range: [f64; 3] = std::array::from_fn(|i| {
        if max[i] > min[i] {
            (max[i] - min[i]) as f64
        } else {
            255.0
        }
    });

    let bins = (k as f64).powf(1.0 / 3.0).ceil() as usize;
    let bin_size: [f64; 3] = std::array::from_fn(|i| (range[i] / bins as f64).max(1.0));

    let mut buckets: HashMap<(u8, u8, u8), Bucket> = HashMap::new();
    for c in colors {
        let key = (
            bin_index(c.r, min[0], bin_size[0], bins),
            bin_index(c.g, min[1], bin_size[1], bins),
            bin_index(c.b, min[2], bin_size[2], bins),
        );
        let bucket = buckets.entry(key).or_default();
        bucket.sum_r += c.r as u64;
        bucket.sum_g += c.g as u64;
        bucket.sum_b += c.b as u64;
        bucket.count += 1;
    }

    let mut palette: Vec<WeightedColor> = buckets
        .values()
        .map(|b| WeightedColor {
            color: Rgb::new(
                round_div(b.sum_r, b.count),
                round_div(b.sum_g, b.count),
                round_div(b.sum_b, b.count),
            ),
            count: b.count,
        })
        .collect();

    // Descending frequency; color as tie-break so the order (and everything
    // downstream of it) does not depend on HashMap iteration order.
    palette.sort_unstable_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| <[u8; 3]>::from(a.color).cmp(&<[u8; 3]>::from(b.color)))
    });

    merge_closest(&mut palette, k);
    fill_farthest(&mut palette, colors, k, &min, &range, rng);

    palette.truncate(k);
    palette.into_iter().map(|w| w.color).collect()
}

/// Merge phase: while more than `k` entries remain, replace the closest pair
/// with its count-weighted mean. O(b²) per step, but b is bounded by the bin
/// grid size.
fn merge_closest(palette: &mut Vec<WeightedColor>, k: usize) {
    while palette.len() > k {
        let mut best = (0, 1);
        let mut best_dist = u32::MAX;
        for i in 0..palette.len() - 1 {
            for j in i + 1..palette.len() {
                let dist = palette[i].color.distance_squared(palette[j].color);
                if dist < best_dist {
                    best_dist = dist;
                    best = (i, j);
                }
            }
        }
        let (a, b) = (palette[best.0], palette[best.1]);
        let total = a.count + b.count;
        palette[best.0] = WeightedColor {
            color: Rgb::new(
                weighted_mean(a.color.r, a.count, b.color.r, b.count),
                weighted_mean(a.color.g, a.count, b.color.g, b.count),
                weighted_mean(a.color.b, a.count, b.color.b, b.count),
            ),
            count: total,
        };
        palette.remove(best.1);
    }
}

/// Split/fill phase: while fewer than `k` entries exist, pick the color most
/// under-represented by the current palette via maximin ("farthest point")
/// sampling over up to [`FILL_SAMPLE_LIMIT`] random draws. Degenerate input
/// falls back to evenly-spaced synthetic colors along the channel ranges.
fn fill_farthest<R: Rng + ?Sized>(
    palette: &mut Vec<WeightedColor>,
    colors: &[Rgb],
    k: usize,
    min: &[u8; 3],
    range: &[f64; 3],
    rng: &mut R,
) {
    let existing = palette.len();
    let sample_size = colors.len().min(FILL_SAMPLE_LIMIT);

    while palette.len() < k {
        let mut best: Option<Rgb> = None;
        let mut best_min_dist = 0u32;

        for _ in 0..sample_size {
            let candidate = colors[rng.gen_range(0..colors.len())];
            let min_dist = palette
                .iter()
                .map(|w| candidate.distance_squared(w.color))
                .min()
                .unwrap_or(u32::MAX);
            if best.is_none() || min_dist > best_min_dist {
                best = Some(candidate);
                best_min_dist = min_dist;
            }
        }

        let color = best.unwrap_or_else(|| {
            let step = (palette.len() - existing) as f64;
            Rgb::new(
                (min[0] as f64 + step * range[0] / k as f64).floor() as u8,
                (min[1] as f64 + step * range[1] / k as f64).floor() as u8,
                (min[2] as f64 + step * range[2] / k as f64).floor() as u8,
            )
        });
        palette.push(WeightedColor { color, count: 1 });
    }
}

/// Returns the palette entry closest to `color` by squared Euclidean
/// distance. Ties resolve to the earliest entry, so the result is stable for
/// a given palette order.
///
/// An empty palette yields black; the grid assembler never produces one
/// (`palette_size ≥ 1` is enforced at its boundary).
pub fn nearest_color(color: Rgb, palette: &[Rgb]) -> Rgb {
    let Some(&first) = palette.first() else {
        return Rgb::BLACK;
    };
    let mut nearest = first;
    let mut min_dist = color.distance_squared(first);
    for &p in &palette[1..] {
        let dist = color.distance_squared(p);
        if dist < min_dist {
            min_dist = dist;
            nearest = p;
        }
    }
    nearest
}

/// Componentwise rounded mean of all colors.
fn mean_color(colors: &[Rgb]) -> Rgb {
    let mut sum = [0u64; 3];
    for c in colors {
        sum[0] += c.r as u64;
        sum[1] += c.g as u64;
        sum[2] += c.b as u64;
    }
    let len = colors.len() as u64;
    Rgb::new(
        round_div(sum[0], len),
        round_div(sum[1], len),
        round_div(sum[2], len),
    )
}

#[inline]
fn bin_index(value: u8, min: u8, bin_size: f64, bins: usize) -> u8 {
    (((value - min) as f64 / bin_size) as usize).min(bins - 1) as u8
}

#[inline]
fn round_div(sum: u64, count: u64) -> u8 {
    (sum as f64 / count as f64).round() as u8
}

#[inline]
fn weighted_mean(a: u8, a_count: u64, b: u8, b_count: u64) -> u8 {
    let total = (a_count + b_count) as f64;
    ((a as f64 * a_count as f64 + b as f64 * b_count as f64) / total).round() as u8
}
