use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;

use empire_mapgen::audit::audit_map;
use empire_mapgen::emit::{self, GenerationReport};
use empire_mapgen::loader;
use empire_mapgen::{generate_world, MapConfig};

#[derive(Parser, Debug)]
#[command(name = "empire_mapgen")]
#[command(about = "Generate a new EmpireMUD world map, or shift an existing one")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long, global = true)]
    seed: Option<u32>,

    /// Directory the map files are read from and written to
    #[arg(short, long, default_value = ".", global = true)]
    output_dir: PathBuf,

    /// Width of the map in tiles
    #[arg(short = 'W', long, global = true)]
    width: Option<usize>,

    /// Height of the map in tiles
    #[arg(short = 'H', long, global = true)]
    height: Option<usize>,

    /// How many tiles of land to generate
    #[arg(long)]
    target_land: Option<usize>,

    /// Also render the map to a PNG (specify output path)
    #[arg(long)]
    png: Option<PathBuf>,

    /// Write a JSON report of the run (specify output path)
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reload the existing map and move it east (negative: west)
    Shift {
        #[arg(allow_negative_numbers = true)]
        distance: i32,
    },
}

impl Args {
    fn config(&self) -> MapConfig {
        let defaults = MapConfig::default();
        MapConfig {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            target_land: self.target_land.unwrap_or(defaults.target_land),
            ..defaults
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = args.config();

    match args.command {
        Some(Command::Shift { distance }) => shift(&config, &args, distance),
        None => generate(config, &args),
    }
}

fn generate(config: MapConfig, args: &Args) -> anyhow::Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    println!("Generating map with seed: {}", seed);
    println!("Map size: {}x{}", config.width, config.height);

    let world = generate_world(config, seed as u64)?;
    emit::write_all(&world, &args.output_dir)
        .with_context(|| format!("writing map to {}", args.output_dir.display()))?;

    if let Some(path) = &args.png {
        emit::export_png(&world.grid, path)?;
        info!("Saved PNG preview to {}", path.display());
    }

    let warnings = audit_map(&world.grid);
    if let Some(path) = &args.report {
        GenerationReport::new(&world, warnings).write(path)?;
        info!("Saved report to {}", path.display());
    }

    print!("{}", emit::format_stats(&world.grid));
    Ok(())
}

fn shift(config: &MapConfig, args: &Args, distance: i32) -> anyhow::Result<()> {
    let Some(grid) = loader::run_shift(config, &args.output_dir, distance)
        .with_context(|| format!("shifting map in {}", args.output_dir.display()))?
    else {
        println!("Shift by distance 0: no work to do.");
        return Ok(());
    };

    if let Some(path) = &args.png {
        emit::export_png(&grid, path)?;
    }
    println!("Map shifted {} on X-axis.", distance);
    print!("{}", emit::format_stats(&grid));
    Ok(())
}
