use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "choreo", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved schedule as JSON.
    Schedule(ScheduleArgs),
    /// Print every evaluated property at one time as JSON.
    Sample(SampleArgs),
    /// Render one time of the show as a PNG.
    Frame(FrameArgs),
    /// Simulate a session (optionally with a resize) and report the writes.
    Play(PlayArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1200.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Show config JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stage JSON (text groups, panel elements). The built-in demo stage is used when omitted.
    #[arg(long)]
    stage: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ScheduleArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Write to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print only the fingerprint.
    #[arg(long)]
    fingerprint: bool,
}

#[derive(Args, Debug)]
struct SampleArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Timeline-local time in seconds.
    #[arg(long)]
    time: f64,

    /// Write to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Timeline-local time in seconds.
    #[arg(long)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Output image width (defaults to half the viewport width).
    #[arg(long)]
    image_width: Option<u32>,

    /// Output image height (defaults to half the viewport height).
    #[arg(long)]
    image_height: Option<u32>,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Ticks per second.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Simulated run time in seconds.
    #[arg(long, default_value_t = 5.0)]
    seconds: f64,

    /// Host time of a simulated resize.
    #[arg(long, requires = "resize_to")]
    resize_at: Option<f64>,

    /// New viewport as `WIDTHxHEIGHT`.
    #[arg(long, requires = "resize_at", value_parser = parse_size)]
    resize_to: Option<(f64, f64)>,
}

fn parse_size(s: &str) -> Result<(f64, f64), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w = w.trim().parse::<f64>().map_err(|e| format!("width: {e}"))?;
    let h = h.trim().parse::<f64>().map_err(|e| format!("height: {e}"))?;
    Ok((w, h))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Schedule(args) => cmd_schedule(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Play(args) => cmd_play(args),
    }
}

struct Loaded {
    config: choreo::ShowConfig,
    stage: choreo::StaticStage,
}

fn load(common: &CommonArgs) -> anyhow::Result<Loaded> {
    let config = match &common.config {
        Some(p) => choreo::ShowConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => choreo::ShowConfig::default(),
    };
    config.validate().context("validate config")?;

    let def = match &common.stage {
        Some(p) => choreo::StageDef::from_path(p)
            .with_context(|| format!("load stage '{}'", p.display()))?,
        None => choreo::StageDef::demo(),
    };
    let def = choreo::StageDef {
        width: common.width,
        height: common.height,
        ..def
    };
    let stage = def.into_stage().context("build stage")?;
    Ok(Loaded { config, stage })
}

fn build(loaded: &Loaded) -> anyhow::Result<choreo::BuiltShow> {
    use choreo::Stage as _;

    let panel_count = loaded.config.panel_count;
    let metrics = choreo::ViewportMetrics::compute(loaded.stage.viewport(), panel_count)?;
    let registry = choreo::TargetRegistry::resolve(&loaded.stage, panel_count);
    let built = choreo::build_show(choreo::TimelineId(1), &loaded.config, &metrics, &registry)
        .context("build show timeline")?;
    Ok(built)
}

fn emit(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(p) => {
            if let Some(parent) = p.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(p, text).with_context(|| format!("write '{}'", p.display()))?;
            eprintln!("wrote {}", p.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}").context("write stdout")?;
        }
    }
    Ok(())
}

fn cmd_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    let loaded = load(&args.common)?;
    let schedule = build(&loaded)?.timeline.schedule();
    let text = if args.fingerprint {
        format!("{:016x}", schedule.fingerprint())
    } else {
        schedule.to_json_pretty()?
    };
    emit(args.out.as_deref(), &text)
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let loaded = load(&args.common)?;
    let frame = build(&loaded)?.timeline.sample(args.time);
    let text = serde_json::to_string_pretty(&frame.snapshot()).context("serialize sample")?;
    emit(args.out.as_deref(), &text)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    use choreo::Stage as _;

    let loaded = load(&args.common)?;
    let frame = build(&loaded)?.timeline.sample(args.time);
    let viewport = loaded.stage.viewport();
    let opts = choreo::PreviewOpts {
        width: args
            .image_width
            .unwrap_or_else(|| ((viewport.width / 2.0).round() as u32).max(1)),
        height: args
            .image_height
            .unwrap_or_else(|| ((viewport.height / 2.0).round() as u32).max(1)),
        ..choreo::PreviewOpts::default()
    };
    let img = choreo::render_panels(&frame, viewport, loaded.config.panel_count, &opts)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    img.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

#[derive(serde::Serialize)]
struct PlayReport {
    ticks: u64,
    writes: usize,
    rebuilds: u64,
    final_timeline: Option<u64>,
    retired_timelines: Vec<u64>,
    stale_writes: usize,
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    if !(args.fps.is_finite() && args.fps > 0.0) {
        anyhow::bail!("--fps must be > 0");
    }
    if !(args.seconds.is_finite() && args.seconds >= 0.0) {
        anyhow::bail!("--seconds must be >= 0");
    }

    let loaded = load(&args.common)?;
    let mut session = choreo::ShowSession::new(loaded.config, loaded.stage)?;
    if !session.attach(0.0)? {
        session.activate(0.0)?;
    }

    let mut report = PlayReport {
        ticks: 0,
        writes: 0,
        rebuilds: 1,
        final_timeline: None,
        retired_timelines: Vec::new(),
        stale_writes: 0,
    };
    let mut pending_resize = args.resize_at.zip(args.resize_to);
    let frames = (args.seconds * args.fps).floor() as u64;
    let mut sink: Vec<choreo::PropertyWrite> = Vec::new();
    let mut retired: Vec<choreo::TimelineId> = Vec::new();

    for f in 0..=frames {
        let now = f as f64 / args.fps;
        if let Some((at, (w, h))) = pending_resize {
            if now >= at {
                session
                    .stage_mut()
                    .set_viewport(choreo::Viewport::new(w, h)?);
                let before = session.live_id();
                if session.resize(now)? {
                    retired.extend(before);
                    report.rebuilds += 1;
                }
                pending_resize = None;
            }
        }
        sink.clear();
        report.writes += session.tick(now, &mut sink);
        report.stale_writes += sink
            .iter()
            .filter(|w| retired.contains(&w.timeline))
            .count();
        report.ticks += 1;
    }
    report.final_timeline = session.live_id().map(|id| id.0);
    report.retired_timelines = retired.iter().map(|id| id.0).collect();
    session.stop();

    let text = serde_json::to_string_pretty(&report).context("serialize report")?;
    emit(None, &text)
}
