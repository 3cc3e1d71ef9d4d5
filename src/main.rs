//! Trajectory Sim - command line front end

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use trajectory_sim::math::Vector2;
use trajectory_sim::sim::{
    Particle, ParticleBurst, SimConfig, SimStatus, Simulator, StatusSnapshot,
};
use trajectory_sim::telemetry::ChannelSink;

/// Particles spawned at the impact point on a hit
const IMPACT_PARTICLES: usize = 100;
/// Frame step for settling the impact burst (60 Hz)
const BURST_DT: f64 = 1.0 / 60.0;

/// Projectile flight simulator
#[derive(Parser)]
#[command(name = "trajectory-sim")]
#[command(about = "Simulate a projectile launch against a ground target")]
#[command(version)]
struct Cli {
    /// JSON config file; missing fields use the defaults
    config: Option<PathBuf>,

    /// Set elevation and azimuth interactively before launch
    #[arg(short, long)]
    prompt: bool,

    /// Stop after this many steps even if the run is still going
    #[arg(long, default_value_t = 1_000_000)]
    max_steps: u64,

    /// Seed for the impact particle burst
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

/// Interactive launch setup: `x` sets elevation, `y` sets azimuth, `s`
/// starts. Unparseable numbers keep the previous value.
///
/// Returns false if input ended before `s`.
fn prompt_loop<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    config: &mut SimConfig,
) -> io::Result<bool> {
    loop {
        writeln!(
            out,
            "Elevation {:.1} deg, azimuth {:.1} deg. [x] elevation  [y] azimuth  [s] start",
            config.elevation_deg, config.azimuth_deg
        )?;
        out.flush()?;

        let Some(choice) = read_trimmed(input)? else {
            return Ok(false);
        };
        match choice.as_str() {
            "x" => {
                write!(out, "Elevation (deg): ")?;
                out.flush()?;
                if let Some(value) = read_number(input)? {
                    config.elevation_deg = value;
                }
            }
            "y" => {
                write!(out, "Azimuth (deg): ")?;
                out.flush()?;
                if let Some(value) = read_number(input)? {
                    config.azimuth_deg = value;
                }
            }
            "s" => return Ok(true),
            other => writeln!(out, "Unknown option '{other}'")?,
        }
    }
}

fn read_trimmed<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn read_number<R: BufRead>(input: &mut R) -> io::Result<Option<f64>> {
    Ok(read_trimmed(input)?
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite()))
}

/// Impact effect data for a hit: the burst as spawned and how long it took
/// to burn out
#[derive(Debug, Serialize)]
struct ImpactBurst {
    seed: u64,
    settle_secs: f64,
    particles: Vec<Particle>,
}

/// Final JSON line on stdout
#[derive(Debug, Serialize)]
struct RunReport {
    #[serde(flatten)]
    snapshot: StatusSnapshot,
    impact: Option<ImpactBurst>,
}

/// Burst particles at the impact point and run them until they expire
fn settle_impact_burst(sim: &Simulator, seed: u64) -> ImpactBurst {
    let p = sim.projectile().position();
    let speed = sim.projectile().velocity().magnitude();
    let mut burst = ParticleBurst::new(seed);
    burst.spawn(IMPACT_PARTICLES, Vector2::new(p.x, p.y), speed, 0.0);
    let particles = burst.particles().to_vec();

    let mut settle_secs = 0.0;
    while !burst.is_empty() {
        burst.update(BURST_DT, sim.config().gravity);
        settle_secs += BURST_DT;
    }
    ImpactBurst {
        seed,
        settle_secs,
        particles,
    }
}

/// Snapshot plus the impact burst when the run ended in a hit
fn build_report(sim: &Simulator, seed: u64) -> RunReport {
    let impact = match sim.status() {
        SimStatus::Hit => {
            let burst = settle_impact_burst(sim, seed);
            log::info!(
                "Impact burst of {} particles settled after {:.2}s",
                burst.particles.len(),
                burst.settle_secs
            );
            Some(burst)
        }
        SimStatus::Running => {
            log::warn!("Stopped after {} steps without a result", sim.steps());
            None
        }
        SimStatus::Miss | SimStatus::TimedOut => None,
    };
    RunReport {
        snapshot: sim.snapshot(),
        impact,
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SimConfig::default(),
    };

    if cli.prompt {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut stdout = io::stdout();
        let started = prompt_loop(&mut input, &mut stdout, &mut config)
            .context("Failed to read launch parameters")?;
        if !started {
            log::info!("Input closed before start, launching with current values");
        }
    }

    let mut sim = Simulator::new(config).context("Invalid simulation config")?;
    log::info!("Trajectory Sim starting...");

    // Status lines go to a transport thread; the simulator never waits on it
    let (mut sink, rx) = ChannelSink::channel();
    let transport = thread::spawn(move || {
        let mut sent = 0u64;
        for line in rx {
            log::debug!(target: "transport", "{line}");
            sent += 1;
        }
        sent
    });

    let status = sim.run(cli.max_steps, &mut sink);
    drop(sink);
    let sent = transport
        .join()
        .map_err(|_| anyhow::anyhow!("Transport thread panicked"))?;
    log::debug!("Transport forwarded {sent} status lines");

    let report = build_report(&sim, cli.seed);
    println!("{}", sim.status_line());
    println!("Result: {status}");
    let json = serde_json::to_string(&report).context("Failed to serialize run report")?;
    println!("{json}");
    Ok(())
}
