//! Generation pipeline
//!
//! Runs every stage in order on one grid and bundles the result. The order
//! is load-bearing: each stage relies on terrain produced by the ones before
//! it.

use log::info;

use crate::classify;
use crate::config::MapConfig;
use crate::connectivity;
use crate::error::MapResult;
use crate::features;
use crate::finalize;
use crate::grid::WorldGrid;
use crate::islands::{self, Island, IslandEntry};
use crate::rng::MapRng;
use crate::wrap;

/// Everything a generator run produces.
#[derive(Clone, Debug)]
pub struct GeneratedWorld {
    pub config: MapConfig,
    /// Seed the run was started from (allows recreation)
    pub seed: u64,
    pub grid: WorldGrid,
    /// Island seeds, in placement order; locations follow any centering shift
    pub islands: Vec<Island>,
    pub registry: Vec<IslandEntry>,
    /// Tiles turned into lake while numbering islands
    pub lakes_filled: usize,
    /// Distance the map was panned to center it, if it was
    pub centering_shift: Option<i32>,
}

/// Generate a complete world from `seed`.
pub fn generate_world(config: MapConfig, seed: u64) -> MapResult<GeneratedWorld> {
    config.validate()?;
    let mut rng = MapRng::new(seed);
    let mut grid = WorldGrid::from_config(&config);

    info!("Generating islands with {} total land target...", config.target_land);
    let mut islands = islands::create_islands(&mut grid, &mut rng, &config);

    info!("Adding shallow seas...");
    classify::add_shallow_sea(&mut grid, &config);

    info!("Adding mountains and rivers...");
    for isle in &islands {
        features::carve_island(&mut grid, &mut rng, &config, isle);
    }

    info!("Numbering islands and fixing lakes...");
    let lakes_filled = connectivity::number_islands_and_fix_lakes(&mut grid);
    connectivity::finish_islands(&mut grid);

    classify::classify_terrain(&mut grid, &mut rng, &config);

    let mut centering_shift = None;
    if config.wrap_x && !config.wrap_y {
        info!("Centering map horizontally...");
        centering_shift = wrap::center_map(&mut grid, &mut islands)?;
    }

    info!("Finishing map...");
    finalize::complete_map(&mut grid, &mut rng);
    finalize::add_start_points(&mut grid, &mut rng, &islands, config.start_points);
    grid.clear_pass();

    let registry = islands::build_registry(&grid, &islands);
    info!(
        "Generated {} islands, {} land tiles of {}",
        registry.len(),
        grid.land_tiles(),
        grid.size()
    );

    Ok(GeneratedWorld {
        config,
        seed,
        grid,
        islands,
        registry,
        lakes_filled,
        centering_shift,
    })
}
