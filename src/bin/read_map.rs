//! Inspect an emitted map: print one tile's record by vnum or by x/y, or
//! the terrain statistics when no tile is given.

use std::path::PathBuf;

use anyhow::bail;
use clap::Parser;

use empire_mapgen::emit::format_stats;
use empire_mapgen::loader::load_map;
use empire_mapgen::MapConfig;

#[derive(Parser, Debug)]
#[command(name = "read_map")]
#[command(about = "Read one room of an emitted world map")]
struct Args {
    /// A vnum, or an x and a y coordinate
    #[arg(num_args = 0..=2)]
    tile: Vec<usize>,

    /// Directory holding the index and world files
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Width of the map in tiles
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the map in tiles
    #[arg(short = 'H', long)]
    height: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let defaults = MapConfig::default();
    let config = MapConfig {
        width: args.width.unwrap_or(defaults.width),
        height: args.height.unwrap_or(defaults.height),
        ..defaults
    };
    let grid = load_map(&config, &args.dir)?;

    let vnum = match args.tile[..] {
        [] => {
            print!("{}", format_stats(&grid));
            return Ok(());
        }
        [vnum] => {
            println!("Data for map tile vnum {}:", vnum);
            vnum
        }
        [x, y] => {
            if x >= grid.width || y >= grid.height {
                bail!("({}, {}) is outside the {}x{} map", x, y, grid.width, grid.height);
            }
            println!("Data for map tile ({}, {}):", x, y);
            grid.index(x, y)
        }
        _ => bail!("expected a vnum or an x and a y coordinate"),
    };
    if vnum >= grid.size() {
        bail!("vnum {} is outside the {}x{} map", vnum, grid.width, grid.height);
    }

    let tile = grid.tile(vnum);
    println!("coords: {} {}", grid.x_coord(vnum), grid.y_coord(vnum));
    println!("terrain: {}", tile.terrain.display_name());
    println!("sector_type: {}", tile.terrain.sector_vnum());
    println!("island_id: {}", tile.island_id.0);
    Ok(())
}
