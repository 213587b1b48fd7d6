use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use gridpack_core::render::{AsciiStyle, to_ascii};
use gridpack_core::{GridPacker, Packer, PackerConfig, Placement};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "gridpack",
    about = "Place rectangles one at a time onto a fixed canvas",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack sizes in the given order and report each placement
    Pack(PackArgs),
    /// Pack random sizes until the first failure, repeatedly, and report average occupancy
    Trial(TrialArgs),
}

#[derive(Args, Debug, Clone)]
struct CanvasArgs {
    /// Canvas width
    #[arg(long, default_value_t = 64, help_heading = "Canvas")]
    width: u32,
    /// Canvas height
    #[arg(long, default_value_t = 64, help_heading = "Canvas")]
    height: u32,
    /// Allow rotation (90deg)
    #[arg(long, default_value_t = true, action = ArgAction::Set, help_heading = "Canvas")]
    allow_rotation: bool,
    /// Evaluate candidates in parallel (requires core feature `parallel`)
    #[arg(long, default_value_t = false, help_heading = "Canvas")]
    parallel: bool,
    /// YAML config file path (overrides canvas options)
    #[arg(long, help_heading = "Canvas")]
    config: Option<PathBuf>,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Canvas")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "yaml", value_parser = ["json", "yaml"], help_heading = "Canvas")]
    print_config_format: String,
}

#[derive(Args, Debug, Clone)]
struct PackArgs {
    #[command(flatten)]
    canvas: CanvasArgs,
    /// Sizes to pack as WxH, e.g. `4x4 6x4 10x6`
    #[arg(help_heading = "Input/Output")]
    sizes: Vec<Size>,
    /// Read more sizes from a file (one WxH per line, `#` starts a comment)
    #[arg(long, help_heading = "Input/Output")]
    input: Option<PathBuf>,
    /// Print the final canvas as text
    #[arg(long, default_value_t = false, help_heading = "Input/Output")]
    ascii: bool,
    /// Write requests, placements, grid and stats as JSON
    #[arg(long, help_heading = "Input/Output")]
    json: Option<PathBuf>,
    /// Write the final canvas as PNG
    #[arg(long, help_heading = "Input/Output")]
    png: Option<PathBuf>,
    /// Pixels per canvas unit for --png
    #[arg(long, default_value_t = 4, help_heading = "Input/Output")]
    scale: u32,
}

#[derive(Args, Debug, Clone)]
struct TrialArgs {
    #[command(flatten)]
    canvas: CanvasArgs,
    /// Number of independent runs
    #[arg(long, default_value_t = 10, help_heading = "Trial")]
    iterations: usize,
    /// Seed for the size generator
    #[arg(long, default_value_t = 844, help_heading = "Trial")]
    seed: u64,
    /// Print each run's final canvas as text
    #[arg(long, default_value_t = false, help_heading = "Trial")]
    ascii: bool,
    /// Write per-run results and averages as JSON
    #[arg(long, help_heading = "Trial")]
    json: Option<PathBuf>,
    /// Show a progress bar over runs (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action = ArgAction::Set, help_heading = "Logging/UX")]
    progress: bool,
}

/// A `WxH` request size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
struct Size {
    width: u32,
    height: u32,
}

impl FromStr for Size {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(|c: char| c == 'x' || c == 'X')
            .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
        let width: u32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
        let height: u32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
        if width == 0 || height == 0 {
            return Err(format!("size must be positive, got {width}x{height}"));
        }
        Ok(Self { width, height })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Pack(args) => run_pack(args),
        Commands::Trial(args) => run_trial(args, args.progress && !cli.quiet),
    }
}

#[derive(Serialize)]
struct PackResult {
    request: Size,
    placement: Option<Placement>,
}

fn run_pack(args: &PackArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.canvas)?;
    if args.canvas.print_config {
        return print_config(&cfg, &args.canvas.print_config_format);
    }

    let mut sizes = args.sizes.clone();
    if let Some(path) = &args.input {
        sizes.extend(read_sizes(path)?);
    }
    if sizes.is_empty() {
        anyhow::bail!("nothing to pack: pass sizes as WxH or use --input <file>");
    }

    let mut packer = GridPacker::new(cfg.clone())?;
    let start = Instant::now();
    let mut results = Vec::with_capacity(sizes.len());
    for size in &sizes {
        let placement = packer.try_pack(size.width, size.height);
        match placement {
            Some(p) => println!(
                "{}x{} -> ({}, {}){}",
                size.width,
                size.height,
                p.frame.x,
                p.frame.y,
                if p.rotated { " rotated" } else { "" }
            ),
            None => println!("{}x{} -> no fit", size.width, size.height),
        }
        results.push(PackResult {
            request: *size,
            placement,
        });
    }
    let dur = start.elapsed();
    let stats = packer.stats();
    info!(time = %fmt_dur(dur), "{}", stats.summary());

    if args.ascii {
        print!("{}", to_ascii(packer.grid(), &AsciiStyle::default()));
    }
    if let Some(path) = &args.json {
        let value = serde_json::json!({
            "config": cfg,
            "requests": results,
            "grid": packer.snapshot(),
            "stats": stats,
        });
        fs::write(path, serde_json::to_string_pretty(&value)?)
            .with_context(|| format!("write {}", path.display()))?;
        info!(?path, "layout written");
    }
    if let Some(path) = &args.png {
        let img = gridpack_core::render::to_rgba(packer.grid(), args.scale).ok_or_else(|| {
            anyhow::anyhow!(
                "--scale {} is too large for a {}x{} canvas",
                args.scale,
                cfg.max_width,
                cfg.max_height
            )
        })?;
        img.save(path)
            .with_context(|| format!("write {}", path.display()))?;
        info!(?path, "canvas image written");
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Serialize)]
struct TrialRun {
    packs: usize,
    occupancy: f64,
}

#[derive(Debug, Serialize)]
struct TrialSummary {
    runs: usize,
    average_packs: f64,
    average_occupancy: f64,
    min_occupancy: f64,
    max_occupancy: f64,
}

impl TrialSummary {
    fn from_runs(runs: &[TrialRun]) -> Self {
        let n = runs.len().max(1) as f64;
        Self {
            runs: runs.len(),
            average_packs: runs.iter().map(|r| r.packs as f64).sum::<f64>() / n,
            average_occupancy: runs.iter().map(|r| r.occupancy).sum::<f64>() / n,
            min_occupancy: runs.iter().map(|r| r.occupancy).fold(f64::INFINITY, f64::min),
            max_occupancy: runs.iter().map(|r| r.occupancy).fold(0.0, f64::max),
        }
    }
}

/// Packs random sizes in `[1, max_w] x [1, max_h]` until the first rejection.
fn fill_until_failure<P: Packer>(packer: &mut P, rng: &mut impl Rng, max_w: u32, max_h: u32) -> TrialRun {
    let mut packs = 0;
    loop {
        let w = rng.gen_range(1..=max_w);
        let h = rng.gen_range(1..=max_h);
        if packer.try_pack(w, h).is_none() {
            debug!(w, h, packs, "first rejection");
            break;
        }
        debug!(w, h, "packed");
        packs += 1;
    }
    TrialRun {
        packs,
        occupancy: packer.occupancy(),
    }
}

fn run_trial(args: &TrialArgs, show_progress: bool) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};

    let cfg = load_config(&args.canvas)?;
    if args.canvas.print_config {
        return print_config(&cfg, &args.canvas.print_config_format);
    }
    if args.iterations == 0 {
        anyhow::bail!("--iterations must be at least 1");
    }

    let max_w = (cfg.max_width / 2).max(1);
    let max_h = (cfg.max_height / 2).max(1);
    let mut rng = StdRng::seed_from_u64(args.seed);

    let bar = if show_progress {
        let b = ProgressBar::new(args.iterations as u64);
        b.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} trial {pos}/{len} [{elapsed_precise}] {wide_msg}",
            )
            .unwrap(),
        );
        Some(b)
    } else {
        None
    };

    let start = Instant::now();
    let mut runs = Vec::with_capacity(args.iterations);
    for i in 0..args.iterations {
        let mut packer = GridPacker::new(cfg.clone())?;
        let run = fill_until_failure(&mut packer, &mut rng, max_w, max_h);
        info!(run = i, packs = run.packs, occupancy = run.occupancy, "trial finished");
        if args.ascii {
            let text = format!(
                "Run {i}: packs={} occupancy={:.4}\n{}",
                run.packs,
                run.occupancy,
                to_ascii(packer.grid(), &AsciiStyle::default())
            );
            match &bar {
                Some(b) => b.suspend(|| println!("{text}")),
                None => println!("{text}"),
            }
        }
        if let Some(b) = &bar {
            b.set_message(format!("occupancy {:.2}%", run.occupancy * 100.0));
            b.inc(1);
        }
        runs.push(run);
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }

    let summary = TrialSummary::from_runs(&runs);
    println!("Average packs: {:.2}", summary.average_packs);
    println!(
        "Average occupancy: {:.4} (min {:.4}, max {:.4}) time={}",
        summary.average_occupancy,
        summary.min_occupancy,
        summary.max_occupancy,
        fmt_dur(start.elapsed())
    );

    if let Some(path) = &args.json {
        let value = serde_json::json!({
            "config": cfg,
            "seed": args.seed,
            "runs": runs,
            "summary": summary,
        });
        fs::write(path, serde_json::to_string_pretty(&value)?)
            .with_context(|| format!("write {}", path.display()))?;
        info!(?path, "trial results written");
    }
    Ok(())
}

fn load_config(c: &CanvasArgs) -> anyhow::Result<PackerConfig> {
    let base = PackerConfig {
        max_width: c.width,
        max_height: c.height,
        allow_rotation: c.allow_rotation,
        parallel: c.parallel,
    };
    let cfg = if let Some(path) = &c.config {
        let file =
            fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)
            .with_context(|| format!("parse config {}", path.display()))?;
        y.into_packer_config(base)
    } else {
        base
    };
    if cfg.parallel && !cfg!(feature = "parallel") {
        warn!("parallel evaluation requested but the `parallel` feature is disabled; running sequentially");
    }
    cfg.validate()?;
    Ok(cfg)
}

fn print_config(cfg: &PackerConfig, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(cfg)?),
        _ => print!("{}", serde_yaml::to_string(cfg)?),
    }
    Ok(())
}

fn read_sizes(path: &Path) -> anyhow::Result<Vec<Size>> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let mut sizes = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let size = line
            .parse::<Size>()
            .map_err(|e| anyhow::anyhow!("{}:{}: {e}", path.display(), i + 1))?;
        sizes.push(size);
    }
    Ok(sizes)
}

fn fmt_dur(d: Duration) -> String {
    let ms = d.as_secs_f64() * 1000.0;
    if ms >= 1.0 {
        format!("{:.1}ms", ms)
    } else {
        format!("{}us", d.as_micros())
    }
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    max_width: Option<u32>,
    max_height: Option<u32>,
    allow_rotation: Option<bool>,
    parallel: Option<bool>,
}

impl YamlConfig {
    fn into_packer_config(self, mut cfg: PackerConfig) -> PackerConfig {
        if let Some(v) = self.max_width {
            cfg.max_width = v;
        }
        if let Some(v) = self.max_height {
            cfg.max_height = v;
        }
        if let Some(v) = self.allow_rotation {
            cfg.allow_rotation = v;
        }
        if let Some(v) = self.parallel {
            cfg.parallel = v;
        }
        cfg
    }
}
