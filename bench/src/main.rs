use std::time::{Duration, Instant};

use serde_json::json;

#[derive(Clone, Debug)]
struct BenchArgs {
    frames: u64,
    warmup: u32,
    repeats: u32,
    rebuilds: u32,
}

#[derive(Clone, Debug, Default)]
struct RunMetrics {
    progress_total: Duration,
    rebuild_total: Duration,
    world_total: Duration,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = parse_args()?;
    if args.frames == 0 || args.repeats == 0 {
        anyhow::bail!("--frames and --repeats must be > 0");
    }

    let anim = foldbox::FoldAnimation::fold(args.frames)?.with_loop(foldbox::LoopMode::PingPong);
    let mut b = foldbox::FoldBox::default();

    for _ in 0..args.warmup {
        run_once(&mut b, &anim, &args)?;
    }

    let mut runs = Vec::with_capacity(args.repeats as usize);
    let mut last = None;
    for _ in 0..args.repeats {
        let m = run_once(&mut b, &anim, &args)?;
        let fp = foldbox::fingerprint_poses(b.poses());
        if let Some(prev) = last
            && prev != fp
        {
            anyhow::bail!("pose fingerprint drifted between repeats");
        }
        last = Some(fp);
        runs.push(m);
    }

    let steps = (2 * args.frames + 1) as f64;
    let per = |f: fn(&RunMetrics) -> Duration, n: f64| -> Vec<f64> {
        runs.iter().map(|m| f(m).as_secs_f64() * 1e9 / n).collect()
    };
    let report = json!({
        "frames": args.frames,
        "repeats": args.repeats,
        "rebuilds": args.rebuilds,
        "set_progress_ns": summarize(per(|m| m.progress_total, steps)),
        "world_ns": summarize(per(|m| m.world_total, steps)),
        "set_parameters_ns": summarize(per(|m| m.rebuild_total, f64::from(args.rebuilds.max(1)))),
        "fingerprint": last,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_once(
    b: &mut foldbox::FoldBox,
    anim: &foldbox::FoldAnimation,
    args: &BenchArgs,
) -> anyhow::Result<RunMetrics> {
    let mut m = RunMetrics::default();

    // One full fold-then-unfold cycle.
    for frame in 0..=2 * anim.duration_frames {
        let progress = anim.progress_at(foldbox::FrameIndex(frame));
        let t0 = Instant::now();
        b.set_progress(progress);
        m.progress_total += t0.elapsed();

        let t1 = Instant::now();
        std::hint::black_box(b.world_poses());
        m.world_total += t1.elapsed();
    }

    let base = foldbox::BoxParameters::default();
    for i in 0..args.rebuilds {
        let params = foldbox::BoxParameters {
            depth: base.depth + f64::from(i % 10),
            ..base
        };
        let t0 = Instant::now();
        b.set_parameters(params)?;
        m.rebuild_total += t0.elapsed();
    }
    b.set_parameters(base)?;
    b.set_progress(0.5);
    Ok(m)
}

fn summarize(mut xs: Vec<f64>) -> serde_json::Value {
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n == 0 {
        return json!(null);
    }
    let mean = xs.iter().sum::<f64>() / n as f64;
    json!({
        "min": xs[0],
        "p50": xs[n / 2],
        "p90": xs[(n * 9 / 10).min(n - 1)],
        "max": xs[n - 1],
        "mean": mean,
    })
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = std::env::args().skip(1);

    let mut out = BenchArgs {
        frames: 240,
        warmup: 3,
        repeats: 100,
        rebuilds: 50,
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--frames" => out.frames = u64::from(parse_u32(args.next(), "--frames")?),
            "--warmup" => out.warmup = parse_u32(args.next(), "--warmup")?,
            "--repeats" => out.repeats = parse_u32(args.next(), "--repeats")?,
            "--rebuilds" => out.rebuilds = parse_u32(args.next(), "--rebuilds")?,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => anyhow::bail!("unknown arg '{a}' (try --help)"),
        }
    }

    Ok(out)
}

fn parse_u32(v: Option<String>, flag: &str) -> anyhow::Result<u32> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<u32>()
        .map_err(|e| anyhow::anyhow!("invalid value for {flag}: '{v}' ({e})"))
}

fn print_help() {
    eprintln!(
        "foldbox-bench\n\n\
         Times pose recomputation over a ping-pong fold and parameter rebuilds.\n\n\
         Options:\n  \
         --frames <n>    frames per fold pass (default 240)\n  \
         --warmup <n>    untimed runs (default 3)\n  \
         --repeats <n>   timed runs (default 100)\n  \
         --rebuilds <n>  set_parameters calls per run (default 50)\n"
    );
}
