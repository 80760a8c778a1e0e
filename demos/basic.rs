//! Basic example of using the asset VNS library.
//!
//! Runs the search on a synthetic Euclidean instance, or on a JSON instance
//! file, and writes the result as JSON.

use asset_vns::config::{Config, Variant};
use asset_vns::objective::Objective;
use asset_vns::problem::{Location, Problem, ProblemData};
use asset_vns::utils::format_duration;
use asset_vns::{run_batch, VnsAlgorithm};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(about = "Assign monitored assets to bases and teams with VNS")]
struct Args {
    /// JSON instance file ({n_assets, n_bases, n_teams, eta, distances})
    #[arg(long)]
    instance: Option<PathBuf>,

    /// Number of assets of the synthetic instance
    #[arg(long, default_value_t = 60)]
    assets: usize,

    /// Number of bases of the synthetic instance
    #[arg(long, default_value_t = 10)]
    bases: usize,

    /// Number of teams of the synthetic instance
    #[arg(long, default_value_t = 5)]
    teams: usize,

    /// Minimum coverage fraction of the synthetic instance
    #[arg(long, default_value_t = 0.2)]
    eta: f64,

    /// Objective: f1, f2 or f2-count
    #[arg(long, default_value = "f1")]
    objective: Objective,

    /// Variant: vns or gvns
    #[arg(long, default_value = "gvns")]
    variant: Variant,

    #[arg(long, default_value_t = 200)]
    max_iter: usize,

    #[arg(long, default_value_t = 20)]
    max_no_improve: usize,

    #[arg(long)]
    seed: Option<u64>,

    /// Wall-clock limit in seconds
    #[arg(long)]
    time_limit: Option<u64>,

    /// Number of independent runs
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Where to write the JSON result
    #[arg(long)]
    output: Option<PathBuf>,
}

fn synthetic_problem(args: &Args) -> Result<Problem, Box<dyn std::error::Error>> {
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed.unwrap_or(7));
    let mut random_location = || Location::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));

    let assets: Vec<Location> = (0..args.assets).map(|_| random_location()).collect();
    let bases: Vec<Location> = (0..args.bases).map(|_| random_location()).collect();

    Ok(Problem::from_locations(&assets, &bases, args.teams, args.eta)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let problem = match &args.instance {
        Some(path) => {
            println!("Loading problem from: {}", path.display());
            let data: ProblemData = serde_json::from_reader(BufReader::new(File::open(path)?))?;
            Problem::try_from(data)?
        }
        None => synthetic_problem(&args)?,
    };
    println!(
        "Problem: {} assets, {} bases, {} teams, eta {}",
        problem.n_assets(),
        problem.n_bases(),
        problem.n_teams(),
        problem.eta()
    );

    let mut config = Config::new()
        .with_objective(args.objective)
        .with_variant(args.variant)
        .with_max_iterations(args.max_iter)
        .with_max_no_improve(args.max_no_improve);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(seconds) = args.time_limit {
        config = config.with_time_limit(Duration::from_secs(seconds));
    }

    let start_time = Instant::now();

    if args.runs > 1 {
        let batch = run_batch(&problem, &config, args.runs)?;
        println!("Completed {} runs in {}", args.runs, format_duration(start_time.elapsed()));
        println!("{}", batch.statistics);

        if let Some(path) = &args.output {
            serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), &batch)?;
        }
        return Ok(());
    }

    let mut algorithm = VnsAlgorithm::new(&problem, config);
    let result = algorithm.run()?;

    println!("Search completed in {}", format_duration(start_time.elapsed()));
    println!("Objective {}: {:.2}", result.objective, result.objective_value);
    println!("Feasible: {}", result.feasible);
    println!("Terminated by: {:?}", result.termination);
    println!("Team loads: {:?}", result.team_loads());

    if let Some(path) = &args.output {
        println!("Saving result to: {}", path.display());
        serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), &result)?;
    }

    Ok(())
}
