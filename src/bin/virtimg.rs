use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use virtimg::{IPoint, MaterializeOpts, Recipe, VirtualImage};

#[derive(Parser, Debug)]
#[command(name = "virtimg", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a JSON recipe to a PNG.
    Render(RenderArgs),
    /// Compare two images pixel by pixel.
    Equals(EqualsArgs),
    /// Find the first placement of a needle image inside a haystack image.
    Search(SearchArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input recipe JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Output channel depth.
    #[arg(long, value_enum, default_value_t = Depth::Eight)]
    depth: Depth,

    /// Evaluate rows in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker thread count for --parallel.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct EqualsArgs {
    /// First image.
    a: PathBuf,
    /// Second image.
    b: PathBuf,
}

#[derive(Parser, Debug)]
struct SearchArgs {
    /// Image to search in.
    #[arg(long)]
    haystack: PathBuf,

    /// Image to search for.
    #[arg(long)]
    needle: PathBuf,

    /// First column to scan.
    #[arg(long, default_value_t = 0)]
    from_x: i32,

    /// First row to scan.
    #[arg(long, default_value_t = 0)]
    from_y: i32,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Depth {
    #[value(name = "8")]
    Eight,
    #[value(name = "16")]
    Sixteen,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Equals(args) => cmd_equals(args),
        Command::Search(args) => cmd_search(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_rgba16(path: &Path) -> anyhow::Result<virtimg::Rgba16Buffer> {
    let img = image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
    Ok(img.into_rgba16())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let recipe = Recipe::load(&args.in_path)?;
    let base_dir = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let graph = recipe.build(base_dir).context("build recipe graph")?;
    tracing::info!(bounds = ?graph.bounds(), "built recipe graph");

    let opts = MaterializeOpts {
        parallel: args.parallel,
        threads: args.threads,
    };

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let written = match args.depth {
        Depth::Eight => virtimg::materialize_rgba8(graph.as_ref(), opts)?
            .save_with_format(&args.out, image::ImageFormat::Png),
        Depth::Sixteen => virtimg::materialize_rgba16(graph.as_ref(), opts)?
            .save_with_format(&args.out, image::ImageFormat::Png),
    };
    written.with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_equals(args: EqualsArgs) -> anyhow::Result<()> {
    let a = load_rgba16(&args.a)?;
    let b = load_rgba16(&args.b)?;
    if virtimg::equals(&a, &b) {
        println!("equal");
        Ok(())
    } else {
        println!("different");
        std::process::exit(1);
    }
}

fn cmd_search(args: SearchArgs) -> anyhow::Result<()> {
    let haystack = load_rgba16(&args.haystack)?;
    let needle = load_rgba16(&args.needle)?;
    match virtimg::search(&haystack, IPoint::new(args.from_x, args.from_y), &needle) {
        Some(p) => println!("found {} {}", p.x, p.y),
        None => println!("not found"),
    }
    Ok(())
}
