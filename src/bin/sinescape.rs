use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sinescape::{
    AnimationRequest, AnimationSink, ApngAnimationEncoder, DirectorySink, GifAnimationEncoder,
    RenderThreading, Scene,
};

#[derive(Parser, Debug)]
#[command(name = "sinescape", version)]
struct Cli {
    /// Log debug details (loop duration, frame counts) to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write every frame of the loop as `frame-{i}.png`.
    Frames(FramesArgs),
    /// Write the loop as one animated PNG (or GIF for a `.gif` output).
    Animate(AnimateArgs),
}

#[derive(Parser, Debug)]
struct ThreadingArgs {
    /// Render frames on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel` (defaults to the number of CPUs).
    #[arg(long)]
    threads: Option<usize>,
}

impl ThreadingArgs {
    fn to_threading(&self) -> RenderThreading {
        RenderThreading {
            parallel: self.parallel,
            threads: self.threads,
            ..RenderThreading::default()
        }
    }
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory, created when missing.
    #[arg(long)]
    out_dir: PathBuf,

    #[command(flatten)]
    threading: ThreadingArgs,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path; `.gif` selects GIF, anything else writes APNG.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    threading: ThreadingArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Animate(args) => cmd_animate(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_request(path: &Path) -> anyhow::Result<AnimationRequest<image::RgbaImage>> {
    let scene = Scene::load(path).with_context(|| format!("load scene '{}'", path.display()))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let req = scene
        .into_request(base_dir)
        .with_context(|| format!("prepare scene '{}'", path.display()))?;
    Ok(req)
}

fn is_gif(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gif"))
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let req = read_request(&args.in_path)?;
    let sink = DirectorySink::create(&args.out_dir)?;
    let written = req
        .render_to(sink, &args.threading.to_threading())
        .with_context(|| format!("write frames to '{}'", args.out_dir.display()))?;

    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let req = read_request(&args.in_path)?;
    let (width, height) = req.background.dimensions();
    let threading = args.threading.to_threading();
    let rendered = if is_gif(&args.out) {
        req.render_to(
            AnimationSink::new(GifAnimationEncoder::default(), width, height),
            &threading,
        )
    } else {
        req.render_to(
            AnimationSink::new(ApngAnimationEncoder, width, height),
            &threading,
        )
    };
    let bytes = rendered.context("encode animation")?;

    if bytes.is_empty() {
        eprintln!("0 frames in loop, nothing written to {}", args.out.display());
        return Ok(());
    }

    if let Some(parent) = args.out.parent() {
        sinescape::ensure_dir(parent)?;
    }
    std::fs::write(&args.out, &bytes)
        .with_context(|| format!("write animation '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
