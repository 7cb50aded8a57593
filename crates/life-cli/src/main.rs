//! Command line driver for the Game of Life.

mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use life_core::{LifeConfig, RenderConfig};
use life_store::GridFormat;
use life_world::{Grid, Simulation, SimulationResult};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "life")]
#[command(version)]
#[command(about = "Conway's Game of Life on a bounded grid")]
struct Cli {
    /// Grid file to start from (text, or a `.bin` snapshot)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Number of generations to run
    #[arg(short, long)]
    generations: Option<u64>,

    /// Where to save the final grid (`.bin` writes a snapshot)
    #[arg(short, long)]
    output: Option<String>,

    /// Print the grid after every generation
    #[arg(short, long)]
    print: bool,

    /// Configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Random seed for a generated starting grid
    #[arg(long)]
    seed: Option<u64>,

    /// Width of a generated starting grid
    #[arg(long)]
    width: Option<usize>,

    /// Height of a generated starting grid
    #[arg(long)]
    height: Option<usize>,

    /// Fraction of cells alive in a generated starting grid
    #[arg(long)]
    density: Option<f64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(exit_code(&e));
        }
    };

    if let Err(e) = telemetry::init_telemetry(config.log_json) {
        eprintln!("error: failed to initialize logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    info!("Starting life");

    let stdout = io::stdout();
    match run(&cli, &config, &mut stdout.lock()) {
        Ok(result) => {
            info!(
                generations = result.generations,
                population = result.final_population,
                "Done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Read the config file if one was given, then apply command line overrides
fn load_config(cli: &Cli) -> Result<LifeConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            LifeConfig::from_json(&json)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => LifeConfig::default(),
    };

    if let Some(generations) = cli.generations {
        config.run.generations = generations;
    }
    if cli.print {
        config.run.print_each_generation = true;
    }
    if let Some(seed) = cli.seed {
        config.world.seed = seed;
    }
    if let Some(width) = cli.width {
        config.world.width = width;
    }
    if let Some(height) = cli.height {
        config.world.height = height;
    }
    if let Some(density) = cli.density {
        config.world.density = density;
    }

    config.validate()?;
    Ok(config)
}

fn run<W: Write>(cli: &Cli, config: &LifeConfig, out: &mut W) -> Result<SimulationResult> {
    let grid = match &cli.input {
        Some(path) => life_store::load_grid(path)
            .and_then(|data| data.into_grid())
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => {
            info!(
                height = config.world.height,
                width = config.world.width,
                seed = config.world.seed,
                "Generating random grid"
            );
            Grid::from_config(&config.world)?
        }
    };

    let print = config.run.print_each_generation;
    if print {
        print_generation(&mut *out, 0, &grid, &config.render)?;
    }

    let mut simulation =
        Simulation::new(grid).with_progress_interval(config.run.progress_interval);
    let result = simulation.run(config.run.generations, |generation, grid| {
        if print {
            print_generation(&mut *out, generation, grid, &config.render)?;
        }
        Ok(())
    })?;

    match &cli.output {
        Some(destination) => save(destination, &simulation)?,
        None if !print => {
            print_generation(&mut *out, simulation.generation(), simulation.grid(), &config.render)?;
        }
        None => {}
    }

    Ok(result)
}

fn save(destination: &str, simulation: &Simulation) -> Result<()> {
    let path = life_store::sanitize_destination(destination)?;
    let grid = simulation.grid();

    let written = match GridFormat::for_path(&path) {
        GridFormat::Binary => {
            life_store::save_snapshot(destination, grid, simulation.generation())
        }
        GridFormat::Text => {
            life_store::save_grid(destination, grid.width(), grid.height(), grid.cells())
        }
    }
    .with_context(|| format!("failed to save {}", path.display()))?;

    info!(bytes = written, "Saved generation {}", simulation.generation());
    Ok(())
}

fn print_generation<W: Write>(
    out: &mut W,
    generation: u64,
    grid: &Grid,
    render: &RenderConfig,
) -> life_core::Result<()> {
    writeln!(out, "Generation {}:", generation)?;
    write!(out, "{}", grid.render_with(render.alive_marker, render.dead_marker))?;
    writeln!(out)?;
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    let code = err
        .downcast_ref::<life_core::Error>()
        .map(life_core::Error::exit_code)
        .unwrap_or(1);
    u8::try_from(code).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use uuid::Uuid;

    fn temp_path(ext: &str) -> PathBuf {
        std::env::temp_dir().join(format!("life-cli-{}.{}", Uuid::new_v4(), ext))
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("life").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = parse(&["-g", "5", "--seed", "9", "--width", "7", "-p"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.run.generations, 5);
        assert_eq!(config.world.seed, 9);
        assert_eq!(config.world.width, 7);
        assert_eq!(config.world.height, 20);
        assert!(config.run.print_each_generation);
    }

    #[test]
    fn test_config_file_then_flags() {
        let path = temp_path("json");
        fs::write(&path, r#"{"run": {"generations": 4}, "world": {"seed": 1}}"#).unwrap();

        let cli = parse(&["-c", path.to_str().unwrap(), "--seed", "2"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.run.generations, 4);
        assert_eq!(config.world.seed, 2);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_invalid_density_flag() {
        let cli = parse(&["--density", "2.0"]);
        let err = load_config(&cli).unwrap_err();
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_run_blinker_from_file() {
        let input = temp_path("txt");
        let output = temp_path("txt");
        fs::write(&input, "3 3\n000\n111\n000\n").unwrap();

        let cli = parse(&[
            "-i",
            input.to_str().unwrap(),
            "-g",
            "1",
            "-o",
            output.to_str().unwrap(),
        ]);
        let config = load_config(&cli).unwrap();
        let mut out = Vec::new();
        let result = run(&cli, &config, &mut out).unwrap();

        assert_eq!(result.generations, 1);
        assert_eq!(result.final_population, 3);
        assert!(out.is_empty());
        assert_eq!(fs::read_to_string(&output).unwrap(), "3 3\n010\n010\n010\n");

        fs::remove_file(&input).unwrap();
        fs::remove_file(&output).unwrap();
    }

    #[test]
    fn test_run_prints_each_generation() {
        let input = temp_path("txt");
        fs::write(&input, "1 1\n1\n").unwrap();

        let cli = parse(&["-i", input.to_str().unwrap(), "-g", "1", "-p"]);
        let config = load_config(&cli).unwrap();
        let mut out = Vec::new();
        run(&cli, &config, &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed, "Generation 0:\n0\n\nGeneration 1:\n.\n\n");

        fs::remove_file(&input).unwrap();
    }

    #[test]
    fn test_run_writes_snapshot_with_generation() {
        let output = temp_path("bin");
        let cli = parse(&["-g", "3", "--seed", "5", "-o", output.to_str().unwrap()]);
        let config = load_config(&cli).unwrap();
        run(&cli, &config, &mut Vec::new()).unwrap();

        let snapshot = life_store::load_snapshot(&output).unwrap();
        assert_eq!(snapshot.generation, 3);
        assert_eq!(snapshot.width, 20);
        assert_eq!(snapshot.cells.len(), 400);

        fs::remove_file(&output).unwrap();
    }

    #[test]
    fn test_missing_input_is_error() {
        let cli = parse(&["-i", temp_path("txt").to_str().unwrap()]);
        let config = load_config(&cli).unwrap();
        let err = run(&cli, &config, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("failed to load"));
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_allocation_failure_exit_code() {
        let cli = parse(&["--width", &usize::MAX.to_string(), "--height", "2"]);
        let config = load_config(&cli).unwrap();
        let err = run(&cli, &config, &mut Vec::new()).unwrap_err();
        assert_eq!(exit_code(&err), 12);
    }
}
