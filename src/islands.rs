//! Island and continent placement
//!
//! Seeds are dropped in clusters: the first seed of a cluster lands anywhere
//! inside its definition's region, and each following seed hops a random
//! distance in a random direction from the previous one. Every seed grows
//! an organic blob of plains immediately.
//!
//! The island registry written at the end of a run is also derived here,
//! from the numbered grid plus the seed records.

use log::{debug, info, warn};

use crate::config::{IslandDefinition, MapConfig};
use crate::grid::{Direction, IslandId, WorldGrid};
use crate::rng::MapRng;
use crate::terrain::Terrain;

/// Give up on a cluster seed after this many off-map hops.
const MAX_PLACEMENT_ATTEMPTS: usize = 50;

/// Arms keep growing past their radius while the blob is taller than this.
const TAPER_EXTENT: i32 = 8;

/// Registry flag: the island holds a start location.
pub const ISLE_NEWBIE: u32 = 1 << 0;
/// Registry flag: the island is (part of) a continent.
pub const ISLE_CONTINENT: u32 = 1 << 3;

/// Half-widths of a land mass in each cardinal direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Radii {
    pub east: i32,
    pub west: i32,
    pub north: i32,
    pub south: i32,
}

/// Island nucleus placed during generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Island {
    /// Location of the seed in the grid
    pub loc: usize,
    pub radii: Radii,
    pub continent: bool,
}

/// One entry of the emitted island registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IslandEntry {
    pub id: i32,
    pub name: String,
    pub flags: u32,
}

impl IslandEntry {
    pub fn is_continent(&self) -> bool {
        self.flags & ISLE_CONTINENT != 0
    }
}

/// Build all of the islands: continents first, then generic clusters until
/// the land target is met.
pub fn create_islands(grid: &mut WorldGrid, rng: &mut MapRng, config: &MapConfig) -> Vec<Island> {
    let mut islands = Vec::new();

    let continent_target = config.continent_land_target();
    for def in &config.continents {
        if grid.land_tiles() >= continent_target {
            break;
        }
        place_cluster(grid, rng, def, true, &mut islands);
    }
    let continents = islands.len();
    info!(
        "Placed {} continent seeds ({} land tiles)",
        continents,
        grid.land_tiles()
    );

    if config.islands.is_empty() {
        return islands;
    }

    while grid.land_tiles() < config.target_land {
        let before = grid.land_tiles();
        for def in &config.islands {
            if grid.land_tiles() >= config.target_land {
                break;
            }
            place_cluster(grid, rng, def, false, &mut islands);
        }
        if grid.land_tiles() == before {
            warn!(
                "Island placement stalled at {} land tiles (target {})",
                before, config.target_land
            );
            break;
        }
    }
    info!(
        "Placed {} island seeds ({} land tiles)",
        islands.len() - continents,
        grid.land_tiles()
    );

    islands
}

/// Place one cluster for a definition. Returns the number of seeds placed.
pub fn place_cluster(
    grid: &mut WorldGrid,
    rng: &mut MapRng,
    def: &IslandDefinition,
    continent: bool,
    islands: &mut Vec<Island>,
) -> usize {
    let mut last_loc: Option<usize> = None;
    let mut placed = 0;

    for _ in 0..def.cluster_size {
        let loc = match last_loc {
            None => random_point_in(grid, rng, def),
            Some(prev) => match hop_from(grid, rng, prev, def.cluster_dist) {
                Some(loc) => loc,
                None => {
                    debug!("Abandoning cluster after {} seeds: no room to hop", placed);
                    break;
                }
            },
        };

        last_loc = Some(loc);
        islands.push(land_mass(grid, rng, loc, def.min_radius, def.max_radius, continent));
        placed += 1;
    }

    placed
}

fn random_point_in(grid: &WorldGrid, rng: &mut MapRng, def: &IslandDefinition) -> usize {
    let (x_min, x_max, y_min, y_max) = def.region.tile_bounds(grid.width, grid.height);
    let x = rng.number(x_min, x_max) as usize;
    let y = rng.number(y_min, y_max) as usize;
    grid.index(x, y)
}

fn hop_from(grid: &WorldGrid, rng: &mut MapRng, prev: usize, dist: i32) -> Option<usize> {
    let dir = Direction::ALL[rng.number(0, 7) as usize];
    let (dx, dy) = dir.offset();

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let hop_x = rng.number(dist / 2, dist);
        let hop_y = rng.number(dist / 2, dist);
        if let Some(loc) = grid.shift(prev, dx * hop_x, dy * hop_y) {
            return Some(loc);
        }
    }
    None
}

/// Grow an organic blob of plains around `loc`.
///
/// East and west radii are random in `[min_radius, max_radius]`; north and
/// south are capped by the narrower of the two so shapes stay roughly
/// elliptical.
pub fn land_mass(
    grid: &mut WorldGrid,
    rng: &mut MapRng,
    loc: usize,
    min_radius: i32,
    max_radius: i32,
    continent: bool,
) -> Island {
    let radii = random_radii(rng, min_radius, max_radius);
    grow_blob(grid, rng, loc, radii, |grid, to| grid.change(to, Terrain::Plains));
    Island {
        loc,
        radii,
        continent,
    }
}

pub fn random_radii(rng: &mut MapRng, min_radius: i32, max_radius: i32) -> Radii {
    let east = rng.number(min_radius, max_radius);
    let west = rng.number(min_radius, max_radius);
    let narrow = east.min(west);
    let north = rng.number(min_radius, narrow);
    let south = rng.number(min_radius, narrow);
    Radii {
        east,
        west,
        north,
        south,
    }
}

/// Paint a blob shape: the east arm, then the west arm, each a run of
/// columns through `loc` whose heights drift toward the arm's radius. An arm
/// keeps tapering past its radius while the column is still tall, so large
/// blobs do not end in a straight cliff.
pub fn grow_blob<F>(grid: &mut WorldGrid, rng: &mut MapRng, loc: usize, radii: Radii, mut paint: F)
where
    F: FnMut(&mut WorldGrid, usize),
{
    paint(grid, loc);
    grow_arm(grid, rng, loc, 1, radii.east, radii.north, radii.south, &mut paint);
    grow_arm(grid, rng, loc, -1, radii.west, radii.north, radii.south, &mut paint);
}

fn grow_arm<F>(
    grid: &mut WorldGrid,
    rng: &mut MapRng,
    loc: usize,
    sign: i32,
    radius: i32,
    north: i32,
    south: i32,
    paint: &mut F,
) where
    F: FnMut(&mut WorldGrid, usize),
{
    let (mut last_n, mut last_s) = (north, south);
    let max_reach = grid.width as i32;

    let mut j = 0;
    while j <= max_reach {
        if j > radius && last_n <= TAPER_EXTENT && last_s <= TAPER_EXTENT {
            break;
        }

        for i in 0..=last_n {
            if let Some(to) = grid.shift(loc, sign * j, i) {
                paint(grid, to);
            }
        }
        for i in 0..=last_s {
            if let Some(to) = grid.shift(loc, sign * j, -i) {
                paint(grid, to);
            }
        }

        last_n = drift_extent(rng, last_n, radius - j);
        last_s = drift_extent(rng, last_s, radius - j);
        j += 1;
    }
}

/// Next column height: shrink once the remaining arm is shorter than the
/// column, otherwise wander by up to two tiles. Never below the seed row.
fn drift_extent(rng: &mut MapRng, extent: i32, remaining: i32) -> i32 {
    let low = if extent <= 0 { 0 } else { -2 };
    let high = if remaining < extent { -2 } else { 2 };
    (extent + rng.number(low, high)).max(0)
}

/// Derive the registry from the numbered grid: one entry per island id,
/// continents and islands numbered separately in their display names.
pub fn build_registry(grid: &WorldGrid, islands: &[Island]) -> Vec<IslandEntry> {
    let mut ids: Vec<i32> = grid
        .iter()
        .map(|(_, tile)| tile.island_id)
        .filter(IslandId::is_island)
        .map(|id| id.0)
        .collect();
    ids.sort_unstable();
    ids.dedup();

    let mut continent_ids: Vec<i32> = islands
        .iter()
        .filter(|isle| isle.continent)
        .map(|isle| grid.island_id(isle.loc).0)
        .collect();
    continent_ids.sort_unstable();

    let mut newbie_ids: Vec<i32> = grid
        .iter()
        .filter(|(_, tile)| tile.terrain == Terrain::StartLocation)
        .map(|(_, tile)| tile.island_id.0)
        .collect();
    newbie_ids.sort_unstable();

    let mut continent_count = 0;
    let mut island_count = 0;
    ids.into_iter()
        .map(|id| {
            let mut flags = 0;
            let name = if continent_ids.binary_search(&id).is_ok() {
                flags |= ISLE_CONTINENT;
                continent_count += 1;
                format!("Continent {}", continent_count)
            } else {
                island_count += 1;
                format!("Island {}", island_count)
            };
            if newbie_ids.binary_search(&id).is_ok() {
                flags |= ISLE_NEWBIE;
            }
            IslandEntry { id, name, flags }
        })
        .collect()
}
