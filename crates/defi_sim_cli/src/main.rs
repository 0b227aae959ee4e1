//! defi-sim CLI: serve, simulate, pools.

use clap::{Parser, Subcommand};
use defi_sim::{PoolsConfig, SimulationRequest, Simulator};
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::info;

mod serve;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => run_serve(args),
        Command::Simulate(args) => run_simulate(args),
        Command::Pools(args) => run_pools(args),
    }
}

#[derive(Parser)]
#[command(name = "defi-sim")]
#[command(author = "gorusys <goru.connector@outlook.com>")]
#[command(about = "DeFi simulator engine: projected staking yield over a fixed APY")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the simulation HTTP API.
    Serve(ServeArgs),
    /// Run one staking simulation and print the result as JSON.
    Simulate(SimulateArgs),
    /// Print the configured staking pools as JSON.
    Pools(PoolsArgs),
}

#[derive(Parser)]
struct ServeArgs {
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,
    #[arg(long, default_value_t = 8000)]
    port: u16,
    /// Pool file (JSON). Defaults to DEFI_SIM_POOLS_PATH, ./config/pools.json, ./pools.json, then the built-in ETH pool.
    #[arg(long)]
    pools: Option<PathBuf>,
}

#[derive(Parser)]
struct SimulateArgs {
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pool_id: i64,
    #[arg(long, allow_negative_numbers = true)]
    amount: f64,
    #[arg(long, allow_negative_numbers = true)]
    days: i64,
    #[arg(long)]
    pools: Option<PathBuf>,
}

#[derive(Parser)]
struct PoolsArgs {
    #[arg(long)]
    pools: Option<PathBuf>,
}

fn load_simulator(
    pools: Option<&std::path::Path>,
) -> Result<Simulator, Box<dyn std::error::Error>> {
    let config = match pools {
        Some(path) => PoolsConfig::load_from_path(path)?,
        None => PoolsConfig::load()?,
    };
    Ok(config.into_simulator()?)
}

fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let simulator = load_simulator(args.pools.as_deref())?;
    info!(
        pools = simulator.registry().len(),
        fallback = ?simulator.registry().fallback_pool_id(),
        strict = simulator.strict_validation(),
        "pool registry ready"
    );
    serve::run((args.host, args.port).into(), simulator)
}

fn run_simulate(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let simulator = load_simulator(args.pools.as_deref())?;
    let request = SimulationRequest {
        pool_id: args.pool_id,
        amount_staked: args.amount,
        duration_days: args.days,
    };
    let result = simulator.handle_simulate_staking(&request)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run_pools(args: PoolsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let simulator = load_simulator(args.pools.as_deref())?;
    let pools: Vec<_> = simulator.registry().pools().collect();
    println!("{}", serde_json::to_string_pretty(&pools)?);
    Ok(())
}
