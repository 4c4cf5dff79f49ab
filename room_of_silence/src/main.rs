//! room_of_silence: installation entry point.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chladni_field::{TrailStyle, DIAL_MAX, DIAL_MIN};
use clap::{Parser, ValueEnum};
use room_of_silence::app::{run, run_headless, run_headless_with_stdin, AppConfig};
use social_dials::WaveDirection;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "room_of_silence",
    version,
    about = "Chladni particle wall driven by equity, climate and surveillance dials"
)]
struct Cli {
    /// JSON config file; command-line flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Particles in the pool.
    #[arg(long)]
    particles: Option<usize>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Target frame rate of the window.
    #[arg(long)]
    fps: Option<u32>,

    /// Seed for a reproducible wall.
    #[arg(long)]
    seed: Option<u64>,

    /// Direction the surveillance dial runs across the y wave number.
    #[arg(long, value_enum)]
    wave_n: Option<WaveArg>,

    /// Also draw trails when surveillance drops below this level.
    #[arg(long)]
    trail_below: Option<f32>,

    /// Draw trails as points plus half-width segments.
    #[arg(long)]
    trail_points: bool,

    /// Read control lines (`equity 7.5`, `dial climate 200`, …) from stdin.
    #[arg(long)]
    stdin: bool,

    /// Run without a window.
    #[arg(long)]
    headless: bool,

    /// Frames to run in headless mode.
    #[arg(long, default_value_t = 900)]
    frames: u64,

    /// Hide the status bar.
    #[arg(long)]
    no_hud: bool,

    /// Prompt for the starting dial positions.
    #[arg(long)]
    interactive: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WaveArg {
    Ascending,
    Descending,
}

impl From<WaveArg> for WaveDirection {
    fn from(arg: WaveArg) -> Self {
        match arg {
            WaveArg::Ascending  => WaveDirection::Ascending,
            WaveArg::Descending => WaveDirection::Descending,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Room of Silence · Chladni particle wall             ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let mut cfg = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => AppConfig::default(),
    };
    apply_flags(&mut cfg, &cli);

    if cli.interactive {
        configure_interactively(&mut cfg);
    }

    info!(
        capacity = cfg.capacity,
        equity = cfg.equity,
        climate = cfg.climate,
        surveillance = cfg.surveillance,
        wave_n = ?cfg.wave_n,
        seed = ?cfg.seed,
        "starting wall"
    );

    if cli.headless {
        let summary = if cfg.stdin {
            run_headless_with_stdin(&cfg, cli.frames)
        } else {
            run_headless(&cfg, cli.frames, None)
        };
        info!(
            frames = summary.frames,
            recycled = summary.recycled,
            particles = summary.particles,
            "headless run finished"
        );
        return Ok(());
    }

    println!("  Opening wall window…");
    println!();
    run(cfg).context("wall window failed")?;
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn apply_flags(cfg: &mut AppConfig, cli: &Cli) {
    if let Some(n) = cli.particles { cfg.capacity = n; }
    if let Some(w) = cli.width     { cfg.width = w; }
    if let Some(h) = cli.height    { cfg.height = h; }
    if let Some(f) = cli.fps       { cfg.fps = f; }
    if let Some(s) = cli.seed      { cfg.seed = Some(s); }
    if let Some(d) = cli.wave_n    { cfg.wave_n = d.into(); }
    if let Some(t) = cli.trail_below { cfg.render.trail_below = Some(t); }
    if cli.trail_points { cfg.render.trail_style = TrailStyle::PointsWithHalfLines; }
    if cli.stdin  { cfg.stdin = true; }
    if cli.no_hud { cfg.hud = false; }
}

fn configure_interactively(cfg: &mut AppConfig) {
    println!("  Starting dial positions ({DIAL_MIN}–{DIAL_MAX}, Enter keeps the default):");
    cfg.equity       = pick_level("    Equity", cfg.equity);
    cfg.climate      = pick_level("    Climate", cfg.climate);
    cfg.surveillance = pick_level("    Surveillance", cfg.surveillance);

    let count = read_line(&format!("  Moving particles 0–{} (default {}): ", cfg.capacity, cfg.capacity));
    cfg.active = count.trim().parse::<usize>().ok().map(|n| n.min(cfg.capacity));
    println!();
}

fn pick_level(label: &str, default: f32) -> f32 {
    loop {
        let answer = read_line(&format!("{label} (default {default:.1}): "));
        let answer = answer.trim();
        if answer.is_empty() { return default; }
        match answer.parse::<f32>() {
            Ok(v) if (DIAL_MIN..=DIAL_MAX).contains(&v) => return v,
            _ => println!("    ⚠  {DIAL_MIN}–{DIAL_MAX} only."),
        }
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
