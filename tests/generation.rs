mod common;

use empire_mapgen::islands::{ISLE_CONTINENT, ISLE_NEWBIE};
use empire_mapgen::{generate_world, IslandId, Terrain, WorldGrid};

use common::small_config;

const SEEDS: [u64; 3] = [1, 4242, 90210];

fn assert_ids_follow_connectivity(grid: &WorldGrid) {
    for loc in 0..grid.size() {
        let id = grid.island_id(loc);
        assert!(!id.is_unset(), "tile {} has no island id", loc);
        let class = grid.terrain(loc).connects_island();
        for n in grid.neighbors_8(loc) {
            if grid.terrain(n).connects_island() == class {
                assert_eq!(grid.island_id(n), id, "neighbors {} and {} disagree", loc, n);
            }
        }
    }
}

#[test]
fn land_meets_target() {
    for seed in SEEDS {
        let world = generate_world(small_config(), seed).unwrap();
        assert!(
            world.grid.land_tiles() >= world.config.target_land,
            "seed {}: {} land tiles",
            seed,
            world.grid.land_tiles()
        );
        assert_eq!(world.grid.ocean_tiles(), world.grid.count(Terrain::Ocean));
    }
}

#[test]
fn island_ids_match_connectivity() {
    for seed in SEEDS {
        let world = generate_world(small_config(), seed).unwrap();
        assert_ids_follow_connectivity(&world.grid);
    }
}

#[test]
fn all_ocean_reaches_open_water() {
    for seed in SEEDS {
        let world = generate_world(small_config(), seed).unwrap();
        let grid = &world.grid;

        // flood the non-connecting class out from any ocean-id tile
        let mut reached = vec![false; grid.size()];
        let ocean_id = (0..grid.size()).find(|&loc| grid.island_id(loc) == IslandId::OCEAN);
        let Some(start) = ocean_id else {
            continue;
        };
        let mut stack = vec![start];
        reached[start] = true;
        while let Some(loc) = stack.pop() {
            for n in grid.neighbors_8(loc) {
                if !reached[n] && !grid.terrain(n).connects_island() {
                    reached[n] = true;
                    stack.push(n);
                }
            }
        }

        for (loc, tile) in grid.iter() {
            if tile.terrain == Terrain::Ocean {
                assert!(reached[loc], "seed {}: trapped ocean at {}", seed, loc);
                assert!(tile.island_id.is_ocean());
            }
        }
    }
}

#[test]
fn map_is_fully_classified() {
    let world = generate_world(small_config(), 31337).unwrap();
    let grid = &world.grid;

    assert_eq!(grid.count(Terrain::Plains), 0);
    assert!(grid.count(Terrain::ShallowSea) > 0);
    assert!(grid.count(Terrain::Mountain) + grid.count(Terrain::SnowyMountain) > 0);
    assert!(grid.count(Terrain::Lake) + grid.count(Terrain::Oasis) > 0);

    // both poles are tundra on a map without vertical wrap
    for x in 0..grid.width {
        assert_eq!(grid.terrain(grid.index(x, 0)), Terrain::Tundra);
        assert_eq!(grid.terrain(grid.index(x, grid.height - 1)), Terrain::Tundra);
    }
}

#[test]
fn registry_lists_every_island() {
    let world = generate_world(small_config(), 7).unwrap();
    let grid = &world.grid;

    let mut ids: Vec<i32> = grid
        .iter()
        .map(|(_, t)| t.island_id)
        .filter(IslandId::is_island)
        .map(|id| id.0)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    let registered: Vec<i32> = world.registry.iter().map(|e| e.id).collect();
    assert_eq!(registered, ids);

    assert!(world.registry.iter().any(|e| e.flags & ISLE_CONTINENT != 0));

    let start = grid
        .iter()
        .find(|(_, t)| t.terrain == Terrain::StartLocation)
        .map(|(_, t)| t.island_id)
        .expect("a start location");
    let newbie = world.registry.iter().find(|e| e.id == start.0).expect("start island registered");
    assert_ne!(newbie.flags & ISLE_NEWBIE, 0);
}

#[test]
fn different_seeds_differ() {
    let a = generate_world(small_config(), 1).unwrap();
    let b = generate_world(small_config(), 2).unwrap();
    assert_ne!(a.grid, b.grid);
}
