//! Burgflow - headless runner
//!
//! Generates a map, settles a few districts next to resource nodes and runs
//! the economy for a number of hours, then prints where everything ended up.

use std::path::PathBuf;

use burgflow::core::config::SimulationConfig;
use burgflow::core::error::Result;
use burgflow::core::types::Vertex;
use burgflow::simulation::{Simulation, SimulationEvent};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Run a headless settlement simulation
#[derive(Parser, Debug)]
#[command(name = "burgflow")]
#[command(about = "Grow districts and run the flux economy without a UI")]
struct Args {
    /// Random seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Hours to simulate
    #[arg(long, default_value_t = 240)]
    ticks: u64,

    /// Districts to place next to resource nodes
    #[arg(long, default_value_t = 3)]
    districts: usize,

    /// TOML file with config overrides
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Offsets tried around a resource node, in meters
const SETTLE_OFFSETS: [(f64, f64); 4] = [
    (3000.0, 0.0),
    (-3000.0, 0.0),
    (0.0, 3000.0),
    (0.0, -3000.0),
];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("burgflow=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load_from_toml(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut sim = Simulation::new(config)?;
    sim.scene_ready();

    let anchors: Vec<Vertex> = sim
        .places()
        .resource_nodes()
        .map(|node| node.position)
        .take(args.districts)
        .collect();

    let mut placed = 0;
    for anchor in anchors {
        for (dx, dy) in SETTLE_OFFSETS {
            let events = sim.place_district(anchor.x + dx, anchor.y + dy);
            if events
                .iter()
                .any(|e| matches!(e, SimulationEvent::DistrictNew { .. }))
            {
                placed += 1;
                break;
            }
        }
    }
    tracing::info!("Placed {} of {} districts", placed, args.districts);

    for _ in 0..args.ticks {
        sim.tick();
    }

    print_summary(&sim);
    Ok(())
}

fn print_summary(sim: &Simulation) {
    let time = sim.time();
    println!("\n=== BURGFLOW ===");
    println!(
        "Year {}, day {}, hour {} ({} hours)",
        time.year, time.day, time.hour, time.total_hours
    );
    println!();

    let fed = sim
        .places()
        .districts()
        .filter(|district| district.needs.values().all(|need| need.is_satisfied()))
        .count();
    println!("Districts ({} with every need met):", fed);
    for district in sim.places().districts() {
        let food = district
            .needs
            .values()
            .map(|need| {
                format!(
                    "{}/{} ({:.0}%)",
                    need.supply,
                    need.demand,
                    need.fulfillment() * 100.0
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "  {:<12} area {:>6.0}k m2  density {:>3}  pop {:>6}  jobs {}/{}  food {}  vertices {}",
            district.id,
            district.area / 1000.0,
            district.density,
            district.population.total.current,
            district.jobs.workers.supply,
            district.jobs.workers.demand,
            food,
            district.geometry.len()
        );
    }
    println!();

    println!("Resource nodes:");
    for node in sim.places().resource_nodes() {
        if node.worker_needs.supply == 0 {
            continue;
        }
        println!(
            "  {:<18} workers {}/{}  output {}",
            node.id, node.worker_needs.supply, node.worker_needs.demand, node.output
        );
    }
    println!();

    let fluxes = sim.flux_engine().fluxes();
    let in_flight: u32 = fluxes.iter().map(|flux| flux.content()).sum();
    println!("Fluxes: {} ({} units in flight)", fluxes.len(), in_flight);
}
