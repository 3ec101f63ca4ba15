use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "recolor", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tint an image with a color through a blend mode.
    Tint(TintArgs),
    /// Fill an image's silhouette with a flat color.
    Flat(FlatArgs),
    /// Rotate the hue of every visible pixel.
    Hue(HueArgs),
    /// Render a color swatch for a hex color or any key string.
    Swatch(SwatchArgs),
    /// Compare two images pixel by pixel.
    Diff(DiffArgs),
    /// Run every job of a JSON manifest in parallel.
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
struct IoArgs {
    /// Input `.png` or `.svg`.
    input: PathBuf,

    /// Output PNG path.
    output: PathBuf,

    /// SVG raster width (requires --height).
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// SVG raster height (requires --width).
    #[arg(long, requires = "width")]
    height: Option<u32>,
}

impl IoArgs {
    fn job(&self, transform: recolor::Transform) -> recolor::RecolorJob {
        recolor::RecolorJob {
            input: self.input.clone(),
            output: self.output.clone(),
            transform,
            size: self.width.zip(self.height),
        }
    }
}

#[derive(Args, Debug)]
struct TintArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Tint color, `#RRGGBB` or `#RRGGBBAA`.
    color: String,

    /// Blend mode; unknown names fall back to multiply.
    #[arg(default_value = "multiply")]
    mode: String,
}

#[derive(Args, Debug)]
struct FlatArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Fill color, `#RRGGBB` or `#RRGGBBAA`.
    color: String,
}

#[derive(Args, Debug)]
struct HueArgs {
    #[command(flatten)]
    io: IoArgs,

    /// Hue rotation in degrees (any sign).
    #[arg(allow_negative_numbers = true)]
    degrees: f64,
}

#[derive(Args, Debug)]
struct SwatchArgs {
    /// Hex color or any key string.
    key: String,

    /// Output PNG path.
    output: PathBuf,

    #[arg(long, default_value_t = recolor::DEFAULT_SWATCH_SIZE.0)]
    width: u32,

    #[arg(long, default_value_t = recolor::DEFAULT_SWATCH_SIZE.1)]
    height: u32,
}

#[derive(Args, Debug)]
struct DiffArgs {
    a: PathBuf,
    b: PathBuf,

    /// Per-channel difference treated as equal.
    #[arg(long, default_value_t = 0)]
    tolerance: u8,

    /// Write the difference mask to this PNG.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Manifest JSON.
    manifest: PathBuf,

    /// Override the manifest's worker thread count.
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Tint(args) => cmd_tint(args),
        Command::Flat(args) => cmd_flat(args),
        Command::Hue(args) => cmd_hue(args),
        Command::Swatch(args) => cmd_swatch(args),
        Command::Diff(args) => cmd_diff(args),
        Command::Batch(args) => cmd_batch(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_color(text: &str) -> anyhow::Result<recolor::Color> {
    recolor::parse_hex_color(text).with_context(|| format!("parse color '{text}'"))
}

fn run(job: &recolor::RecolorJob) -> anyhow::Result<()> {
    recolor::run_job(job)
        .with_context(|| format!("recolor '{}'", job.input.display()))?;
    eprintln!("wrote {}", job.output.display());
    Ok(())
}

fn cmd_tint(args: TintArgs) -> anyhow::Result<()> {
    let transform = recolor::Transform::Tint {
        color: parse_color(&args.color)?,
        mode: recolor::BlendMode::from_name(&args.mode),
    };
    run(&args.io.job(transform))
}

fn cmd_flat(args: FlatArgs) -> anyhow::Result<()> {
    let transform = recolor::Transform::Flat {
        color: parse_color(&args.color)?,
    };
    run(&args.io.job(transform))
}

fn cmd_hue(args: HueArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.degrees.is_finite(), "hue shift must be finite");
    let transform = recolor::Transform::HueShift {
        degrees: args.degrees,
    };
    run(&args.io.job(transform))
}

fn cmd_swatch(args: SwatchArgs) -> anyhow::Result<()> {
    let color = recolor::color_from_key(&args.key);
    let buf = recolor::render_swatch(color, args.width, args.height)?;
    recolor::write_atomic(&buf, &args.output)?;
    eprintln!("{} -> {}", args.key, color.to_hex());
    eprintln!("wrote {}", args.output.display());
    Ok(())
}

fn cmd_diff(args: DiffArgs) -> anyhow::Result<()> {
    let a = load(&args.a)?;
    let b = load(&args.b)?;
    let report = recolor::compare_buffers(&a, &b, args.tolerance)?;

    println!(
        "pixels_changed={} max_channel_delta={}",
        report.pixels_changed, report.max_channel_delta
    );
    if let Some(out) = &args.out {
        recolor::write_atomic(&report.diff, out)?;
        eprintln!("wrote {}", out.display());
    }
    anyhow::ensure!(
        report.is_identical(),
        "images differ in {} pixel(s)",
        report.pixels_changed
    );
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let manifest = recolor::Manifest::load(&args.manifest)?;
    let threads = args.threads.or(manifest.threads);
    let report = recolor::run_batch(&manifest.jobs, threads)?;

    for out in &report.succeeded {
        eprintln!("wrote {}", out.display());
    }
    for (input, err) in &report.failed {
        eprintln!("failed {}: {err}", input.display());
    }
    anyhow::ensure!(
        report.is_success(),
        "{} of {} job(s) failed",
        report.failed.len(),
        manifest.jobs.len()
    );
    Ok(())
}

fn load(path: &Path) -> anyhow::Result<recolor::PixelBuffer> {
    recolor::load_image(path, None).with_context(|| format!("load '{}'", path.display()))
}
