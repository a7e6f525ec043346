//! pixelgrid - Turn images into cross-stitch pattern grids
//!
//! A command-line tool that downsamples an image into a labeled, color-reduced
//! grid suitable for cross-stitch or bead work.

mod render;

use clap::{Parser, Subcommand};
use pixelgrid::{build_grid, build_grid_seeded, GridSpec, PixelBuffer};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pixelgrid")]
#[command(version)]
#[command(about = "Turn images into cross-stitch pattern grids", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Grid parameters shared by the subcommands that run the pipeline.
#[derive(clap::Args)]
struct GridArgs {
    /// Number of grid columns (1-100); rows follow the image aspect ratio
    #[arg(short = 'c', long, default_value = "10")]
    cols: usize,

    /// Maximum number of palette colors (1-32)
    #[arg(short = 'k', long, default_value = "3")]
    colors: usize,

    /// Zoom percent (50-300, 100 = no zoom)
    #[arg(short, long, default_value = "100")]
    zoom: u32,

    /// Horizontal pan percent (-100 to 100)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pan_x: i32,

    /// Vertical pan percent (-100 to 100)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pan_y: i32,

    /// Seed for the quantizer's fill phase, for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

impl GridArgs {
    /// Clamps everything to the supported ranges (the same bounds the
    /// original slider UI enforces) and builds the spec the core expects.
    fn to_spec(&self) -> GridSpec {
        GridSpec {
            cols: self.cols.clamp(1, 100),
            palette_size: self.colors.clamp(1, 32),
            zoom_percent: self.zoom.clamp(50, 300),
            pan_x_percent: self.pan_x.clamp(-100, 100),
            pan_y_percent: self.pan_y.clamp(-100, 100),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render an image as a pattern grid PNG
    Generate {
        /// Input image file (PNG, JPEG, GIF, WebP)
        input: PathBuf,

        /// Output PNG file (default: input with .grid.png extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        grid: GridArgs,

        /// Size of each rendered cell in pixels
        #[arg(long, default_value = "30")]
        cell_size: u32,

        /// Draw grid lines between cells
        #[arg(long)]
        grid_lines: bool,

        /// Skip the numbered row/column label gutters
        #[arg(long)]
        no_labels: bool,
    },

    /// Print the quantized palette for an image
    Palette {
        /// Input image file (PNG, JPEG, GIF, WebP)
        input: PathBuf,

        #[command(flatten)]
        grid: GridArgs,
    },

    /// Print the shareable parameter string for a grid configuration
    Share {
        #[command(flatten)]
        grid: GridArgs,

        /// Include grid lines in the shared view
        #[arg(long)]
        grid_lines: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            grid,
            cell_size,
            grid_lines,
            no_labels,
        } => {
            let (image, width, height) = load_image(&input)?;
            let spec = grid.to_spec();

            eprintln!(
                "Building grid from '{}' ({}x{}) with {} cols, {} colors",
                input.display(),
                width,
                height,
                spec.cols,
                spec.palette_size
            );

            let result = match grid.seed {
                Some(seed) => build_grid_seeded(&image, &spec, seed)?,
                None => build_grid(&image, &spec)?,
            };

            let pattern = render::render_pattern(
                &result,
                cell_size.max(render::MIN_CELL_SIZE),
                grid_lines,
                !no_labels,
            );

            let output_path = output.unwrap_or_else(|| {
                let mut p = input.clone();
                p.set_extension("grid.png");
                p
            });
            pattern.save(&output_path)?;

            eprintln!(
                "Grid: {} x {} -> '{}'",
                result.cols(),
                result.rows(),
                output_path.display()
            );
        }

        Commands::Palette { input, grid } => {
            let (image, _, _) = load_image(&input)?;
            let spec = grid.to_spec();

            let result = match grid.seed {
                Some(seed) => build_grid_seeded(&image, &spec, seed)?,
                None => build_grid(&image, &spec)?,
            };

            eprintln!(
                "Palette for '{}' ({} colors, {} x {} cells):",
                input.display(),
                result.palette().len(),
                result.cols(),
                result.rows()
            );
            for color in result.palette() {
                let cells = result.cells().iter().filter(|&&c| c == *color).count();
                println!("#{:02X}{:02X}{:02X}  {} cells", color.r, color.g, color.b, cells);
            }
        }

        Commands::Share { grid, grid_lines } => {
            let spec = grid.to_spec();
            // Same parameter names the web UI round-trips through its URLs.
            println!(
                "cols={}&maxColors={}&scale={}&offsetX={}&offsetY={}&gridLines={}",
                spec.cols,
                spec.palette_size,
                spec.zoom_percent,
                spec.pan_x_percent,
                spec.pan_y_percent,
                if grid_lines { 1 } else { 0 }
            );
        }
    }

    Ok(())
}

fn load_image(input: &PathBuf) -> Result<(PixelBuffer, u32, u32), Box<dyn std::error::Error>> {
    let img = image::open(input)
        .map_err(|e| format!("Failed to open '{}': {}", input.display(), e))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let buffer = PixelBuffer::from_rgba(rgba.as_raw(), width as usize, height as usize)?;
    Ok((buffer, width, height))
}
