use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "foldbox", version)]
struct Cli {
    /// Log rebuilds and clamping to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every panel pose at one fold progress as JSON.
    Poses(PosesArgs),
    /// Print derived dimensions and areas as JSON.
    Metrics(BoxArgs),
    /// Write the flat die-cut net as SVG.
    Flat(FlatArgs),
    /// Print one pose snapshot per frame of a fold or unfold as JSON lines.
    Animate(AnimateArgs),
}

#[derive(Args, Debug)]
struct BoxArgs {
    /// Box config JSON; missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    top_width: Option<f64>,

    #[arg(long)]
    bottom_width: Option<f64>,

    #[arg(long)]
    height: Option<f64>,

    #[arg(long)]
    depth: Option<f64>,

    #[arg(long)]
    flap_width: Option<f64>,

    /// Easing curve applied to the fold progress.
    #[arg(long, value_enum)]
    ease: Option<foldbox::Ease>,
}

#[derive(Args, Debug)]
struct PosesArgs {
    #[command(flatten)]
    box_args: BoxArgs,

    /// Fold progress, clamped to [0, 1]. Overrides the config value.
    #[arg(long)]
    progress: Option<f64>,

    /// Emit world-space poses instead of parent-relative ones.
    #[arg(long)]
    world: bool,
}

#[derive(Args, Debug)]
struct FlatArgs {
    #[command(flatten)]
    box_args: BoxArgs,

    /// Output SVG path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long, default_value_t = 5.0)]
    margin: f64,
}

#[derive(Args, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    box_args: BoxArgs,

    /// Frames per pass.
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Run from closed to flat.
    #[arg(long)]
    unfold: bool,

    /// Number of full passes to emit; only meaningful with a looping mode.
    #[arg(long, default_value_t = 1)]
    passes: u64,

    #[arg(long = "loop", value_enum, default_value_t = LoopChoice::Once)]
    loop_mode: LoopChoice,

    /// Emit world-space poses.
    #[arg(long)]
    world: bool,

    /// Output path for the JSON lines; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LoopChoice {
    Once,
    Repeat,
    PingPong,
}

impl From<LoopChoice> for foldbox::LoopMode {
    fn from(v: LoopChoice) -> Self {
        match v {
            LoopChoice::Once => Self::Once,
            LoopChoice::Repeat => Self::Repeat,
            LoopChoice::PingPong => Self::PingPong,
        }
    }
}

#[derive(serde::Serialize)]
struct FrameRecord<'a> {
    frame: u64,
    progress: f64,
    poses: &'a foldbox::PoseTable,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Poses(args) => cmd_poses(args),
        Command::Metrics(args) => cmd_metrics(args),
        Command::Flat(args) => cmd_flat(args),
        Command::Animate(args) => cmd_animate(args),
    }
}

fn read_config(args: &BoxArgs) -> anyhow::Result<foldbox::FoldConfig> {
    let mut cfg = match &args.config {
        Some(path) => foldbox::FoldConfig::load(path)
            .with_context(|| format!("load box config '{}'", path.display()))?,
        None => foldbox::FoldConfig::default(),
    };

    let p = &mut cfg.parameters;
    for (slot, value) in [
        (&mut p.top_width, args.top_width),
        (&mut p.bottom_width, args.bottom_width),
        (&mut p.height, args.height),
        (&mut p.depth, args.depth),
        (&mut p.flap_width, args.flap_width),
    ] {
        if let Some(v) = value {
            *slot = v;
        }
    }
    if let Some(ease) = args.ease {
        cfg.ease = ease;
    }
    Ok(cfg)
}

fn make_box(args: &BoxArgs) -> anyhow::Result<foldbox::FoldBox> {
    let cfg = read_config(args)?;
    foldbox::FoldBox::from_config(&cfg).with_context(|| "build box")
}

fn cmd_poses(args: PosesArgs) -> anyhow::Result<()> {
    let mut b = make_box(&args.box_args)?;
    if let Some(progress) = args.progress {
        b.set_progress(progress);
    }
    let poses = if args.world {
        b.world_poses()
    } else {
        b.poses().clone()
    };
    let json = serde_json::to_string_pretty(&poses).with_context(|| "serialize poses")?;
    println!("{json}");
    Ok(())
}

fn cmd_metrics(args: BoxArgs) -> anyhow::Result<()> {
    let b = make_box(&args)?;
    let metrics = b.hierarchy().metrics;
    let json = serde_json::json!({
        "parameters": b.parameters(),
        "slant_height": metrics.slant_height,
        "slant_angle_deg": metrics.slant_angle.to_degrees(),
        "dimensions": b.dimensions(),
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn cmd_flat(args: FlatArgs) -> anyhow::Result<()> {
    if !args.margin.is_finite() || args.margin < 0.0 {
        anyhow::bail!("margin must be a finite value >= 0 (got {})", args.margin);
    }
    let b = make_box(&args.box_args)?;
    let svg = b.flat_layout().to_svg(args.margin);
    match &args.out {
        Some(path) => {
            create_parent_dir(path)?;
            std::fs::write(path, svg).with_context(|| format!("write svg '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => print!("{svg}"),
    }
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let mut b = make_box(&args.box_args)?;
    let anim = if args.unfold {
        foldbox::FoldAnimation::unfold(args.frames)?
    } else {
        foldbox::FoldAnimation::fold(args.frames)?
    }
    .with_loop(args.loop_mode.into());

    let mut out: Box<dyn std::io::Write> = match &args.out {
        Some(path) => {
            create_parent_dir(path)?;
            let f = std::fs::File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            Box::new(std::io::BufWriter::new(f))
        }
        None => Box::new(std::io::stdout().lock()),
    };

    let last = args.frames.saturating_mul(args.passes.max(1));
    for frame in 0..=last {
        let progress = anim.progress_at(foldbox::FrameIndex(frame));
        b.set_progress(progress);
        let world;
        let poses = if args.world {
            world = b.world_poses();
            &world
        } else {
            b.poses()
        };
        let record = FrameRecord {
            frame,
            progress,
            poses,
        };
        serde_json::to_writer(&mut out, &record).with_context(|| "serialize frame")?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    if let Some(path) = &args.out {
        eprintln!("wrote {} frames to {}", last + 1, path.display());
    }
    Ok(())
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
