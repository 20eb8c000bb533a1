//! Latitude and proximity classification
//!
//! Turns the generic plains left by the grower into climate terrain, then
//! refines tiles by what lies next to them. The passes run in a fixed order:
//! later ones match on terrain produced by earlier ones.

use log::info;

use crate::config::MapConfig;
use crate::grid::{IslandId, WorldGrid};
use crate::rng::MapRng;
use crate::terrain::Terrain;

/// Straight (non-diagonal) neighbor offsets.
const STRAIGHT_OFFSETS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Share of the map height at each pole where mountains carry snow.
const SNOW_LINE_PCT: f64 = 10.0;

/// Convert every `from` tile within Euclidean distance `dist` of a tile
/// matching `near`. Returns the number of tiles converted.
pub fn replace_near_any<P>(
    grid: &mut WorldGrid,
    from: Terrain,
    to: Terrain,
    near: P,
    dist: i32,
) -> usize
where
    P: Fn(Terrain) -> bool,
{
    let hits: Vec<usize> = (0..grid.size())
        .filter(|&at| grid.terrain(at) == from)
        .filter(|&at| {
            (-dist..=dist).any(|hor| {
                (-dist..=dist).any(|ver| {
                    hor * hor + ver * ver <= dist * dist
                        && grid.shift(at, hor, ver).is_some_and(|loc| near(grid.terrain(loc)))
                })
            })
        })
        .collect();

    for &at in &hits {
        grid.change(at, to);
    }
    hits.len()
}

/// Convert `from` to `to` within `dist` of `near`.
pub fn replace_near(
    grid: &mut WorldGrid,
    from: Terrain,
    to: Terrain,
    near: Terrain,
    dist: i32,
) -> usize {
    replace_near_any(grid, from, to, |t| t == near, dist)
}

/// Convert `from` to `to` where a straight neighbor is one of `near`.
pub fn replace_very_near(
    grid: &mut WorldGrid,
    from: Terrain,
    to: Terrain,
    near: &[Terrain],
) -> usize {
    let hits: Vec<usize> = (0..grid.size())
        .filter(|&at| grid.terrain(at) == from)
        .filter(|&at| {
            STRAIGHT_OFFSETS.iter().any(|&(dx, dy)| {
                grid.shift(at, dx, dy)
                    .is_some_and(|loc| near.contains(&grid.terrain(loc)))
            })
        })
        .collect();

    for &at in &hits {
        grid.change(at, to);
    }
    hits.len()
}

/// Ocean close to land becomes shallow sea.
pub fn add_shallow_sea(grid: &mut WorldGrid, config: &MapConfig) -> usize {
    let added = replace_near_any(
        grid,
        Terrain::Ocean,
        Terrain::ShallowSea,
        Terrain::is_land,
        config.shallow_sea_radius,
    );
    info!("Added {} tiles of shallow sea", added);
    added
}

/// Changes plains to `terrain` roughly between two percentages of the map
/// height. Each tile's row is jittered by one so band edges are ragged.
pub fn add_latitude_terrain(
    grid: &mut WorldGrid,
    rng: &mut MapRng,
    config: &MapConfig,
    terrain: Terrain,
    start_pct: f64,
    end_pct: f64,
) -> usize {
    let mut changed = 0;
    for loc in 0..grid.size() {
        if grid.terrain(loc) != Terrain::Plains {
            continue;
        }
        let y = (grid.y_coord(loc) as i32 + rng.number(-1, 1)).max(0) as usize;
        if config.in_y_percent_range(y, start_pct, end_pct) {
            grid.change(loc, terrain);
            changed += 1;
        }
    }
    changed
}

/// Overwrites the top and bottom rows of the map with tundra. Tundra does
/// not connect islands, so the converted tiles join the open ocean's id.
pub fn add_tundra(grid: &mut WorldGrid, rng: &mut MapRng, config: &MapConfig) -> usize {
    let rows = config.tundra_height;
    let mut changed = 0;
    for loc in 0..grid.size() {
        let y = grid.y_coord(loc);
        let south = y < rows + usize::from(rng.one_in(3));
        let north = !south && y + rows + usize::from(rng.one_in(3)) >= grid.height;
        if south || north {
            grid.change(loc, Terrain::Tundra);
            grid.set_island_id(loc, IslandId::OCEAN);
            changed += 1;
        }
    }
    changed
}

/// Mountains near either pole become snowy.
pub fn add_snow_caps(grid: &mut WorldGrid) -> usize {
    let band = (SNOW_LINE_PCT / 100.0 * grid.height as f64).round() as usize;
    let hits: Vec<usize> = grid
        .iter()
        .filter(|(loc, tile)| {
            let y = grid.y_coord(*loc);
            tile.terrain == Terrain::Mountain && (y < band || y + band >= grid.height)
        })
        .map(|(loc, _)| loc)
        .collect();
    for &loc in &hits {
        grid.change(loc, Terrain::SnowyMountain);
    }
    hits.len()
}

/// Run every classification pass in order.
pub fn classify_terrain(grid: &mut WorldGrid, rng: &mut MapRng, config: &MapConfig) {
    info!("Adding desert...");
    add_latitude_terrain(
        grid,
        rng,
        config,
        Terrain::Desert,
        config.desert_start_pct,
        config.desert_end_pct,
    );
    info!("Adding jungle...");
    add_latitude_terrain(
        grid,
        rng,
        config,
        Terrain::Jungle,
        config.jungle_start_pct,
        config.jungle_end_pct,
    );

    // an oasis fed by a river is just part of the lake system
    replace_very_near(grid, Terrain::Oasis, Terrain::Lake, &[Terrain::River]);

    info!("Irrigating from rivers...");
    replace_near(grid, Terrain::Desert, Terrain::Plains, Terrain::River, 2);
    replace_near(grid, Terrain::Desert, Terrain::Plains, Terrain::Lake, 2);
    replace_near(grid, Terrain::Jungle, Terrain::Swamp, Terrain::River, 2);
    replace_near(grid, Terrain::Jungle, Terrain::Swamp, Terrain::Lake, 2);

    info!("Adding coastlines...");
    replace_very_near(
        grid,
        Terrain::River,
        Terrain::Estuary,
        &[Terrain::ShallowSea, Terrain::Ocean],
    );
    replace_very_near(grid, Terrain::Plains, Terrain::Beach, &[Terrain::ShallowSea]);
    replace_very_near(grid, Terrain::Desert, Terrain::Beach, &[Terrain::ShallowSea]);
    replace_very_near(grid, Terrain::Jungle, Terrain::Mangrove, &[Terrain::ShallowSea]);
    replace_very_near(grid, Terrain::Plains, Terrain::Riverbank, &[Terrain::River]);

    if !config.wrap_y && config.tundra_height >= 1 {
        info!("Adding tundra...");
        add_tundra(grid, rng, config);
        add_snow_caps(grid);
    }
}
