//! terrainmarch CLI - raymarched fractal terrain renderer.
//!
//! Renders the fractal heightfield to a PNG, or writes a quick top-down
//! preview of the underlying noise.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;

use terrainmarch::config::{RenderConfig, BACKGROUND_SKY, BACKGROUND_TRANSPARENT};
use terrainmarch::export::{export_gray_png, export_png, PngExportOptions};
use terrainmarch::noise::{NoiseConfig, NoiseSource};
use terrainmarch::render::Renderer;
use terrainmarch::terrain::{render_preview, HeightField, PreviewConfig};

/// Raymarched fractal terrain renderer.
#[derive(Parser)]
#[command(name = "terrainmarch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Raymarch the terrain and write a PNG.
    Render {
        #[command(flatten)]
        scene: SceneArgs,

        /// Output PNG path.
        #[arg(short, long, default_value = "image.png")]
        output: PathBuf,
    },

    /// Write a top-down grayscale preview of the terrain noise.
    Preview {
        /// Preview width in pixels.
        #[arg(long, default_value = "512")]
        width: u32,

        /// Preview height in pixels.
        #[arg(long, default_value = "512")]
        height: u32,

        /// Noise seed.
        #[arg(short, long, default_value = "111")]
        seed: u32,

        /// Number of rotated octaves.
        #[arg(long, default_value = "5")]
        octaves: u32,

        /// Output PNG path.
        #[arg(short, long, default_value = "preview.png")]
        output: PathBuf,
    },

    /// Print the camera basis and output size for a configuration.
    Info {
        #[command(flatten)]
        scene: SceneArgs,
    },
}

/// Scene options shared by `render` and `info`; flags override the config file.
#[derive(clap::Args)]
struct SceneArgs {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Noise seed.
    #[arg(short, long)]
    seed: Option<u32>,

    /// Field of view in degrees.
    #[arg(long)]
    fov: Option<f64>,

    /// Number of terrain octaves.
    #[arg(long)]
    octaves: Option<u32>,

    /// Vertical exaggeration of the terrain.
    #[arg(long)]
    exaggeration: Option<f64>,

    /// Colour of pixels that miss the terrain.
    #[arg(long)]
    background: Option<Background>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Background {
    /// Fully transparent.
    Transparent,
    /// Opaque dusk blue.
    Sky,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render { scene, output } => {
            let config = load_scene(&scene);
            run_render(config, &output);
        }
        Commands::Preview {
            width,
            height,
            seed,
            octaves,
            output,
        } => {
            run_preview(width, height, seed, octaves, &output);
        }
        Commands::Info { scene } => {
            let config = load_scene(&scene);
            run_info(config);
        }
    }
}

fn load_scene(args: &SceneArgs) -> RenderConfig {
    let mut config = match &args.config {
        Some(path) => RenderConfig::from_toml_file(path).unwrap_or_else(|e| {
            eprintln!("Error loading {}: {}", path.display(), e);
            std::process::exit(1);
        }),
        None => RenderConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(seed) = args.seed {
        config.noise.seed = seed;
    }
    if let Some(fov) = args.fov {
        config.camera.fov_deg = fov;
    }
    if let Some(octaves) = args.octaves {
        config.terrain.octaves = octaves;
    }
    if let Some(exaggeration) = args.exaggeration {
        config.terrain.height_exaggeration = exaggeration;
    }
    if let Some(background) = args.background {
        config.background = match background {
            Background::Transparent => BACKGROUND_TRANSPARENT,
            Background::Sky => BACKGROUND_SKY,
        };
    }

    config
}

fn build_renderer(config: RenderConfig) -> Renderer {
    Renderer::new(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}

fn run_render(config: RenderConfig, output: &Path) {
    println!("terrainmarch - Raymarched Terrain Renderer");
    println!("==========================================");
    println!("Resolution: {}x{}", config.width, config.height);
    println!("Seed: {}", config.noise.seed);
    println!("Output: {}", output.display());

    let start = Instant::now();
    let renderer = build_renderer(config);

    println!("\nRendering...");
    let img = renderer.render();
    println!("Rendering completed in {:.2?}", start.elapsed());

    let covered = img.pixels().filter(|p| p.0[3] == 255).count();
    let total = img.width() as usize * img.height() as usize;
    println!(
        "Terrain coverage: {:.1}% of pixels",
        covered as f64 / total as f64 * 100.0
    );

    println!("\nExporting PNG...");
    export_png(&img, output, &PngExportOptions::default()).unwrap_or_else(|e| {
        eprintln!("Error exporting PNG: {}", e);
        std::process::exit(1);
    });

    println!("\nTotal time: {:.2?}", start.elapsed());
    println!("Done!");
}

fn run_preview(width: u32, height: u32, seed: u32, octaves: u32, output: &Path) {
    if width == 0 || height == 0 {
        eprintln!("Error: Preview dimensions must be positive");
        std::process::exit(1);
    }

    let noise = NoiseSource::new(&NoiseConfig::with_seed(seed));
    let preview_config = PreviewConfig {
        octaves,
        ..Default::default()
    };

    let start = Instant::now();
    let img = render_preview(&noise, &preview_config, width, height);
    export_gray_png(&img, output, &PngExportOptions::default()).unwrap_or_else(|e| {
        eprintln!("Error exporting preview: {}", e);
        std::process::exit(1);
    });

    println!(
        "Preview {}x{} (seed {}) written to {} in {:.2?}",
        width,
        height,
        seed,
        output.display(),
        start.elapsed()
    );
}

fn run_info(config: RenderConfig) {
    let renderer = build_renderer(config);
    let config = renderer.config();
    let camera = renderer.camera();
    let plane = camera.image_plane(config.width, config.height);

    let pixels = config.width as u64 * config.height as u64;
    let bytes = pixels * 4;

    println!("terrainmarch - Scene Info");
    println!("=========================");
    println!();
    println!("Resolution: {}x{} ({} pixels)", config.width, config.height, pixels);
    println!("Image buffer: {} bytes ({:.2} MB)", bytes, bytes as f64 / 1024.0 / 1024.0);
    println!();
    println!("Camera:");
    println!("  Position:  {:.4}", camera.position);
    println!("  Look-at:   {:.4}", camera.look_at);
    println!("  Distance:  {:.4}", camera.distance);
    println!("  Forward:   {:.4}", camera.forward);
    println!("  u:         {:.4}", camera.u);
    println!("  v:         {:.4}", camera.v);
    println!("  FOV:       {} deg", camera.fov_deg);
    println!("  Pixel:     dx={:.6} dy={:.6}", plane.dx, plane.dy);
    println!();
    let terrain = renderer.terrain().config();
    println!("Terrain:");
    println!("  Seed:         {}", config.noise.seed);
    println!("  Octaves:      {}", terrain.octaves);
    println!("  Scale:        {}", terrain.horizontal_scale);
    println!("  Exaggeration: {}", terrain.height_exaggeration);
    println!(
        "  Height at look-at: {:.4}",
        renderer.terrain().height(camera.look_at.x, camera.look_at.z)
    );
    println!();
    println!("March: t in [{}, {}]", config.march.min_t, config.march.max_t);
}
