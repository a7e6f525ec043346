use pixelgrid::*;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn noisy_image_colors(n: usize, seed: u64) -> Vec<Rgb> {
    // Deterministic pseudo-noise so the suite stays reproducible.
    use rand::Rng;
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Rgb::new(rng.gen(), rng.gen(), rng.gen()))
        .collect()
}

#[test]
fn test_exact_palette_size_across_k() {
    let colors = noisy_image_colors(5000, 99);
    for k in [1, 2, 3, 7, 8, 16, 27, 32] {
        let palette = quantize_with_rng(&colors, k, &mut StdRng::seed_from_u64(1));
        assert_eq!(palette.len(), k, "palette must have exactly k={k} colors");
    }
}

#[test]
fn test_exact_palette_size_exceeds_distinct_colors() {
    // Fewer distinct colors than k: the split/fill phase must still pad the
    // palette to exactly k.
    let mut colors = vec![Rgb::new(200, 0, 0); 30];
    colors.extend(vec![Rgb::new(0, 200, 0); 20]);
    let palette = quantize_with_rng(&colors, 10, &mut StdRng::seed_from_u64(2));
    assert_eq!(palette.len(), 10);
    // Both real clusters survive, frequency-ordered ahead of the filler.
    assert_eq!(palette[0], Rgb::new(200, 0, 0));
    assert_eq!(palette[1], Rgb::new(0, 200, 0));
}

#[test]
fn test_k_one_is_rounded_mean() {
    let colors = [
        Rgb::new(0, 10, 255),
        Rgb::new(1, 10, 0),
        Rgb::new(1, 10, 0),
    ];
    // r: 2/3 rounds to 1, g: exact, b: 255/3 = 85.
    assert_eq!(quantize(&colors, 1), vec![Rgb::new(1, 10, 85)]);
}

#[test]
fn test_empty_input_yields_empty_palette() {
    assert_eq!(quantize(&[], 8), Vec::<Rgb>::new());
}

#[test]
fn test_dominant_clusters_preserved() {
    // A heavily skewed two-cluster input quantized to k=2 must keep both
    // cluster means rather than splitting the dominant one.
    let mut colors = vec![Rgb::new(10, 10, 10); 9000];
    colors.extend(vec![Rgb::new(245, 245, 245); 1000]);
    let palette = quantize(&colors, 2);
    assert_eq!(palette, vec![Rgb::new(10, 10, 10), Rgb::new(245, 245, 245)]);
}

#[test]
fn test_palette_entries_come_from_input_space() {
    // Merge means and fill samples stay inside the input's channel bounds.
    let colors: Vec<Rgb> = (0..500)
        .map(|i| Rgb::new(100 + (i % 50) as u8, 30, 200 + (i % 20) as u8))
        .collect();
    let palette = quantize_with_rng(&colors, 12, &mut StdRng::seed_from_u64(3));
    for c in &palette {
        assert!((100..150).contains(&c.r), "r out of input range: {c:?}");
        assert_eq!(c.g, 30);
        assert!((200..220).contains(&c.b), "b out of input range: {c:?}");
    }
}
