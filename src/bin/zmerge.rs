use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "zmerge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge the layers of a manifest into one image.
    Merge(MergeArgs),
    /// Load and validate a manifest, then print a layer summary.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct MergeArgs {
    /// Layer manifest JSON.
    #[arg(long)]
    manifest: PathBuf,

    /// Output image path (PNG unless the extension says otherwise).
    #[arg(long)]
    out: PathBuf,

    /// Treat larger depth values as nearer.
    #[arg(long, default_value_t = false)]
    invert_depth: bool,

    /// Grow each depth pass by one pixel before merging.
    #[arg(long, default_value_t = false)]
    expand_depth: bool,

    /// Composite pixels in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Minimum pixels per parallel task.
    #[arg(long, default_value_t = 4096)]
    chunk_pixels: usize,

    /// Output bits per channel (8 or 16).
    #[arg(long, default_value_t = 16)]
    bit_depth: u8,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Layer manifest JSON.
    #[arg(long)]
    manifest: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Merge(args) => cmd_merge(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let bit_depth = zmerge::BitDepth::from_bits(args.bit_depth)?;
    let settings = zmerge::MergeSettings {
        depth_order: if args.invert_depth {
            zmerge::DepthOrder::FarIsSmall
        } else {
            zmerge::DepthOrder::NearIsSmall
        },
        expand_depth: args.expand_depth,
        threading: zmerge::CompositeThreading {
            parallel: args.parallel,
            threads: args.threads,
            chunk_pixels: args.chunk_pixels,
        },
    };

    let manifest = zmerge::Manifest::from_path(&args.manifest)?;
    let layers = zmerge::load_layers(&manifest, &settings)?;
    let image = zmerge::composite(&layers, &settings)?;
    zmerge::write_image(&image, &args.out, bit_depth)
        .with_context(|| format!("save merge result '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let manifest = zmerge::Manifest::from_path(&args.manifest)?;
    let modes = manifest.modes()?;
    let layers = zmerge::load_layers(&manifest, &zmerge::MergeSettings::default())?;
    let resolution = zmerge::check_resolutions(&layers)?;

    println!("layers:     {}", layers.len());
    println!("resolution: {resolution}");
    for (i, (spec, mode)) in manifest.layers.iter().zip(modes).enumerate() {
        println!(
            "  [{i}] {mode:<8} color={} depth={}",
            spec.color.display(),
            spec.depth.display()
        );
    }
    Ok(())
}
