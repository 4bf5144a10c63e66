//! Goal alignment simulation driver
//!
//! Thin scheduler around the core engine: builds a population, runs a
//! fixed number of rounds, and reports each agent's goal values after
//! that agent's step. The core never prints or logs; all output happens
//! here.
//!
//! Defaults reproduce the reference scenario: 3 agents, 5 rounds,
//! alpha 0.1, beta 0.05, random-uniform initial values.

use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use goal_alignment_core::{Orchestrator, RoundMode, SimulationConfig, Tier};

/// Multi-agent hierarchical goal alignment simulator
#[derive(Parser)]
#[command(name = "goal-alignment-cli")]
#[command(version)]
#[command(about = "Simulates goal convergence across a three-tier goal hierarchy")]
struct Cli {
    /// Number of agents in the population
    #[arg(long, default_value_t = 3)]
    agents: usize,

    /// Number of rounds to simulate
    #[arg(long, default_value_t = 5)]
    rounds: usize,

    /// RNG seed for initial goal values
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Same-tier alignment rate
    #[arg(long, default_value_t = 0.1)]
    alpha: f64,

    /// Cross-tier leak rate
    #[arg(long, default_value_t = 0.05)]
    beta: f64,

    /// Peer visibility within a round
    #[arg(long, value_enum, default_value_t = RoundModeArg::Sequential)]
    round_mode: RoundModeArg,

    /// Print final agent snapshots as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoundModeArg {
    /// Later agents see earlier agents' already-updated state
    Sequential,
    /// All peer reads go against round-start state
    Snapshot,
}

impl From<RoundModeArg> for RoundMode {
    fn from(arg: RoundModeArg) -> Self {
        match arg {
            RoundModeArg::Sequential => RoundMode::Sequential,
            RoundModeArg::Snapshot => RoundMode::Snapshot,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Structured logging to stderr; stdout is reserved for --json output
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = SimulationConfig::default_population(cli.agents, cli.seed);
    config.alpha = cli.alpha;
    config.beta = cli.beta;
    config.round_mode = cli.round_mode.into();

    let mut orchestrator = Orchestrator::new(config)?;
    info!(
        agents = cli.agents,
        rounds = cli.rounds,
        seed = cli.seed,
        alpha = cli.alpha,
        beta = cli.beta,
        mode = ?orchestrator.round_mode(),
        "population initialized"
    );

    for _ in 0..cli.rounds {
        let result = orchestrator.round();

        for snapshot in &result.agent_snapshots {
            info!(
                round = result.round,
                agent = %snapshot.id,
                high = ?snapshot.high,
                mid = ?snapshot.mid,
                low = ?snapshot.low,
                "post-step goal values"
            );
        }

        debug!(
            round = result.round,
            pairings = result.num_pairings,
            updates = result.stats.total(),
            high_dispersion = orchestrator.state().dispersion(Tier::High),
            mid_dispersion = orchestrator.state().dispersion(Tier::Mid),
            low_dispersion = orchestrator.state().dispersion(Tier::Low),
            "round complete"
        );
    }

    if cli.json {
        let snapshots = orchestrator.state().agent_snapshots();
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
    }

    Ok(())
}
