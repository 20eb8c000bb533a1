//! Final touches: sub-biomes and start locations.

use log::{info, warn};

use crate::grid::WorldGrid;
use crate::islands::Island;
use crate::rng::MapRng;
use crate::terrain::Terrain;

/// Rounds of start-location sampling before one is forced.
const START_POINT_ROUNDS: usize = 100;

/// Turns all remaining plains, and some desert and jungle, into the terrain
/// players actually see.
pub fn complete_map(grid: &mut WorldGrid, rng: &mut MapRng) {
    for loc in 0..grid.size() {
        match grid.terrain(loc) {
            // nothing stays plains
            Terrain::Plains => {
                if rng.one_in(4) {
                    grid.change(loc, Terrain::TemperateCrop);
                } else {
                    grid.change(loc, Terrain::Forest);
                }
            }
            // most desert stays desert
            Terrain::Desert => {
                if rng.one_in(75) {
                    grid.change(loc, Terrain::Oasis);
                } else if rng.one_in(25) {
                    grid.change(loc, Terrain::DesertCrop);
                } else if rng.one_in(4) {
                    grid.change(loc, Terrain::Grove);
                }
            }
            Terrain::Jungle => {
                if rng.number(1, 100) <= 5 {
                    grid.change(loc, Terrain::JungleCrop);
                }
            }
            _ => {}
        }
    }
}

fn can_start_on(terrain: Terrain) -> bool {
    matches!(terrain, Terrain::Plains | Terrain::Forest | Terrain::Desert)
}

/// Place up to `wanted` start locations on island seeds. If sampling never
/// succeeds, one is forced onto a random island seed, preferring seeds that
/// are still land. Returns the locations placed.
pub fn add_start_points(
    grid: &mut WorldGrid,
    rng: &mut MapRng,
    islands: &[Island],
    wanted: usize,
) -> Vec<usize> {
    let mut placed = Vec::new();
    if islands.is_empty() || wanted == 0 {
        warn!("No start locations placed");
        return placed;
    }

    for _ in 0..START_POINT_ROUNDS {
        for isle in islands {
            if placed.len() >= wanted {
                break;
            }
            if rng.one_in(3) && can_start_on(grid.terrain(isle.loc)) {
                grid.change(isle.loc, Terrain::StartLocation);
                placed.push(isle.loc);
            }
        }
        if !placed.is_empty() {
            break;
        }
    }

    if placed.is_empty() {
        let on_land: Vec<usize> = islands
            .iter()
            .map(|isle| isle.loc)
            .filter(|&loc| grid.terrain(loc).is_land())
            .collect();
        let candidates = if on_land.is_empty() {
            islands.iter().map(|isle| isle.loc).collect()
        } else {
            on_land
        };
        let loc = candidates[rng.number(0, candidates.len() as i32 - 1) as usize];
        warn!("Forcing a start location onto island seed {}", loc);
        grid.change(loc, Terrain::StartLocation);
        placed.push(loc);
    }

    info!("Placed {} start location(s)", placed.len());
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::islands::Radii;

    fn isle(loc: usize) -> Island {
        Island {
            loc,
            radii: Radii::default(),
            continent: false,
        }
    }

    #[test]
    fn test_no_plains_survive() {
        let mut grid = WorldGrid::new(30, 30, false, false);
        for loc in 0..300 {
            grid.change(loc, Terrain::Plains);
        }
        for loc in 300..600 {
            grid.change(loc, Terrain::Desert);
        }
        let mut rng = MapRng::new(12);
        complete_map(&mut grid, &mut rng);

        assert_eq!(grid.count(Terrain::Plains), 0);
        assert_eq!(grid.count(Terrain::Forest) + grid.count(Terrain::TemperateCrop), 300);
        // desert mostly survives
        assert!(grid.count(Terrain::Desert) > 150);
        assert_eq!(grid.ocean_tiles(), 300);
    }

    #[test]
    fn test_start_point_on_qualifying_seed() {
        let mut grid = WorldGrid::new(10, 10, false, false);
        for loc in [11, 55, 88] {
            grid.change(loc, Terrain::Forest);
        }
        let islands = vec![isle(11), isle(55), isle(88)];
        let mut rng = MapRng::new(3);
        let placed = add_start_points(&mut grid, &mut rng, &islands, 1);

        assert_eq!(placed.len(), 1);
        assert_eq!(grid.terrain(placed[0]), Terrain::StartLocation);
        assert_eq!(grid.count(Terrain::StartLocation), 1);
    }

    #[test]
    fn test_start_point_forced_when_nothing_qualifies() {
        let mut grid = WorldGrid::new(10, 10, false, false);
        grid.change(44, Terrain::Mountain);
        let islands = vec![isle(44)];
        let mut rng = MapRng::new(3);
        let placed = add_start_points(&mut grid, &mut rng, &islands, 1);

        assert_eq!(placed, vec![44]);
        assert_eq!(grid.terrain(44), Terrain::StartLocation);
    }
}
