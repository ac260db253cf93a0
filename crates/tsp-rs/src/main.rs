mod cli;
mod error;
mod initial_tour;
mod io;
mod random;

use std::process::ExitCode;

use clap::Parser;
use log::info;

use tsp_core::instance::Instance;
use tsp_core::tolerances::{SearchParams, Tolerances};
use tsp_lp::DenseSimplex;
use tsp_solvers::{CoreLp, Pricer, SolveOutcome, Solver};

use crate::cli::Cli;
use crate::error::CliError;

const INSIDE_NEIGHBORHOOD: usize = 50;

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprint!("error: {err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                eprint!(": {cause}");
                source = cause.source();
            }
            eprintln!();
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<(), CliError> {
    let cli = Cli::try_parse()?;
    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Info })
        .init();
    run(cli)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let (instance, coords) = load_instance(&cli)?;

    let initial_tour = match &cli.tour_file {
        Some(path) => io::read_tour_nodes(path)?,
        None => initial_tour::nearest_neighbor_tour(&instance),
    };

    let params = SearchParams {
        node_selection: cli.node_selection.into(),
        cut_preset: cli.cut_preset.into(),
        initial_edge_set: cli.initial_edge_set.into(),
        sparse: cli.sparse,
        pure_primal: cli.pure_primal,
        lower_bound_target: cli.lower_bound_target,
        ..SearchParams::default()
    };

    let pricer = Pricer::new(&instance, INSIDE_NEIGHBORHOOD);
    let corelp = CoreLp::new(
        instance.clone(),
        initial_tour,
        DenseSimplex::new(),
        Tolerances::default(),
        params.pool_capacity,
    )?;

    let mut solver = Solver::new(corelp, pricer, params, instance);
    if cli.gif_mode {
        let mut frame = 0usize;
        solver = solver.with_tour_callback(move |tour, _length| {
            frame += 1;
            let path = std::path::PathBuf::from(format!("tour_{frame:04}.txt"));
            if let Err(err) = io::write_tour_nodes(&path, tour) {
                log::warn!("failed to write GIF-mode frame {frame}: {err}");
            }
        });
    }

    let outcome = solver.run()?;
    report(&outcome);

    if cli.dump_coords {
        io::write_xy_coords(std::path::Path::new("instance.xy"), &coords)?;
    }
    if cli.dump_edges {
        io::write_tour_edges(std::path::Path::new("tour.edges"), &outcome.tour)?;
    }

    Ok(())
}

fn load_instance(cli: &Cli) -> Result<(Instance, Vec<(f64, f64)>), CliError> {
    if cli.random {
        let generated = random::generate(cli.node_count, cli.grid_side, cli.seed);
        Ok((generated.instance, generated.coords))
    } else {
        let path = cli
            .input
            .as_ref()
            .ok_or_else(|| CliError::Args("an input file or -R is required".to_string()))?;
        let instance = tsp_parser::parse_tsp_instance(path)?;
        Ok((instance, Vec::new()))
    }
}

fn report(outcome: &SolveOutcome) {
    info!(
        "nodes explored: {}, tour length: {}, lower bound: {:.2}",
        outcome.nodes_explored, outcome.length.0, outcome.lower_bound
    );
    if outcome.optimal {
        println!("tour length: {}", outcome.length.0);
        println!("optimality gap: 0");
    } else {
        println!("tour length: {}", outcome.length.0);
        println!(
            "optimality gap: {:.4}",
            (f64::from(outcome.length.0) - outcome.lower_bound) / f64::from(outcome.length.0)
        );
    }
}
