//! Island numbering
//!
//! Every maximal 8-connected group of tiles sharing the same
//! `connects_island` class gets one island id. The open ocean gets the
//! reserved ocean id; water that cannot reach it is filled in as lake and the
//! numbering is redone until nothing is left over.

use log::{debug, info};

use crate::grid::{IslandId, WorldGrid};
use crate::terrain::Terrain;

/// Flood the `connects_island` class of `start` with `id`. Returns the
/// tiles labeled.
fn flood(grid: &mut WorldGrid, start: usize, id: IslandId) -> Vec<usize> {
    let class = grid.terrain(start).connects_island();
    let mut stack = vec![start];
    grid.set_island_id(start, id);
    let mut labeled = Vec::new();

    while let Some(loc) = stack.pop() {
        labeled.push(loc);
        // collect first: the iterator borrows the grid
        let next: Vec<usize> = grid
            .neighbors_8(loc)
            .filter(|&n| grid.island_id(n).is_unset() && grid.terrain(n).connects_island() == class)
            .collect();
        for n in next {
            grid.set_island_id(n, id);
            stack.push(n);
        }
    }
    labeled
}

/// Where the open ocean starts: the first ocean tile on the southern or
/// northern edge, else the first water tile anywhere.
fn ocean_seed(grid: &WorldGrid) -> Option<usize> {
    let last_row = grid.size().saturating_sub(grid.width);
    (0..grid.width)
        .chain(last_row..grid.size())
        .find(|&loc| grid.terrain(loc) == Terrain::Ocean)
        .or_else(|| (0..grid.size()).find(|&loc| !grid.terrain(loc).connects_island()))
}

/// One numbering pass. Land tiles originate islands; water tiles that are
/// not reached from the open ocean are left unset. Returns the next free id.
pub fn number_islands(grid: &mut WorldGrid) -> i32 {
    grid.reset_island_ids(IslandId::UNSET);

    if let Some(seed) = ocean_seed(grid) {
        flood(grid, seed, IslandId::OCEAN);
    }

    let mut next_id = 1;
    for loc in 0..grid.size() {
        if grid.island_id(loc).is_unset() && grid.terrain(loc).is_land() {
            flood(grid, loc, IslandId(next_id));
            next_id += 1;
        }
    }
    next_id
}

/// Number the islands, turning trapped water into lake until every water
/// tile that remains reaches the open ocean. Returns how many tiles became
/// lake.
pub fn number_islands_and_fix_lakes(grid: &mut WorldGrid) -> usize {
    let mut converted = 0;
    loop {
        let next_id = number_islands(grid);

        let trapped: Vec<usize> = grid
            .iter()
            .filter(|(_, tile)| tile.island_id.is_unset() && !tile.terrain.connects_island())
            .map(|(loc, _)| loc)
            .collect();
        if trapped.is_empty() {
            info!("Numbered {} islands ({} tiles became lake)", next_id - 1, converted);
            return converted;
        }

        debug!("Filling {} trapped water tiles with lake", trapped.len());
        converted += trapped.len();
        for loc in trapped {
            grid.change(loc, Terrain::Lake);
        }
    }
}

/// Give an id to every tile the numbering pass could not originate from
/// (shallow sea out of reach of any land). Each such group takes the id of a
/// numbered neighbor of its own class, or a fresh id if it has none.
pub fn finish_islands(grid: &mut WorldGrid) {
    let mut next_id = grid
        .iter()
        .map(|(_, tile)| tile.island_id.0)
        .max()
        .unwrap_or(0)
        .max(0)
        + 1;

    for start in 0..grid.size() {
        if !grid.island_id(start).is_unset() {
            continue;
        }

        // gather the group under a scratch id, then relabel it
        let scratch = IslandId(i32::MIN);
        let members = flood(grid, start, scratch);

        let class = grid.terrain(start).connects_island();
        let neighbor_id = members
            .iter()
            .flat_map(|&loc| grid.neighbors_8(loc))
            .filter(|&n| grid.terrain(n).connects_island() == class)
            .map(|n| grid.island_id(n))
            .find(|&id| id != scratch && !id.is_unset());
        let id = neighbor_id.unwrap_or_else(|| {
            next_id += 1;
            IslandId(next_id - 1)
        });
        for loc in members {
            grid.set_island_id(loc, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_rows(rows: &[&str]) -> WorldGrid {
        // rows listed north to south; '#' plains, 'l' shallow sea, '.' ocean
        let height = rows.len();
        let width = rows[0].len();
        let mut grid = WorldGrid::new(width, height, false, false);
        for (r, row) in rows.iter().enumerate() {
            let y = height - 1 - r;
            for (x, c) in row.chars().enumerate() {
                let terrain = match c {
                    '#' => Terrain::Plains,
                    'l' => Terrain::ShallowSea,
                    _ => Terrain::Ocean,
                };
                grid.change(grid.index(x, y), terrain);
            }
        }
        grid
    }

    fn assert_components_share_ids(grid: &WorldGrid) {
        for loc in 0..grid.size() {
            let id = grid.island_id(loc);
            assert!(!id.is_unset(), "tile {} left unset", loc);
            for n in grid.neighbors_8(loc) {
                if grid.terrain(n).connects_island() == grid.terrain(loc).connects_island() {
                    assert_eq!(grid.island_id(n), id, "tiles {} and {} differ", loc, n);
                }
            }
        }
    }

    #[test]
    fn test_separate_islands_get_separate_ids() {
        let mut grid = from_rows(&[
            "........",
            ".##...#.",
            ".#....#.",
            "........",
        ]);
        assert_eq!(number_islands_and_fix_lakes(&mut grid), 0);
        finish_islands(&mut grid);

        let a = grid.island_id(grid.index(1, 2));
        let b = grid.island_id(grid.index(6, 2));
        assert!(a.is_island() && b.is_island());
        assert_ne!(a, b);
        assert!(grid.island_id(0).is_ocean());
        assert_components_share_ids(&grid);
    }

    #[test]
    fn test_diagonal_land_connects() {
        let mut grid = from_rows(&[
            ".....",
            ".#...",
            "..#..",
            ".....",
        ]);
        number_islands_and_fix_lakes(&mut grid);
        assert_eq!(grid.island_id(grid.index(1, 2)), grid.island_id(grid.index(2, 1)));
    }

    #[test]
    fn test_enclosed_water_becomes_lake() {
        let mut grid = from_rows(&[
            ".......",
            ".#####.",
            ".#...#.",
            ".#####.",
            ".......",
        ]);
        let converted = number_islands_and_fix_lakes(&mut grid);
        assert_eq!(converted, 3);
        assert_eq!(grid.count(Terrain::Lake), 3);
        assert_eq!(grid.terrain(grid.index(3, 2)), Terrain::Lake);
        // the lake joins the ring around it
        assert_eq!(grid.island_id(grid.index(3, 2)), grid.island_id(grid.index(1, 2)));
        assert_eq!(grid.ocean_tiles(), grid.count(Terrain::Ocean));
        assert_components_share_ids(&grid);
    }

    #[test]
    fn test_shallow_sea_takes_land_id() {
        let mut grid = from_rows(&[
            "......",
            ".l#l..",
            "......",
            "....l.",
        ]);
        number_islands_and_fix_lakes(&mut grid);
        finish_islands(&mut grid);

        let land = grid.island_id(grid.index(2, 2));
        assert_eq!(grid.island_id(grid.index(1, 2)), land);
        assert_eq!(grid.island_id(grid.index(3, 2)), land);
        // a fringe tile out of reach of land still gets an id
        let fringe = grid.island_id(grid.index(4, 0));
        assert!(fringe.is_island());
        assert_ne!(fringe, land);
        assert_components_share_ids(&grid);
    }

    #[test]
    fn test_all_land_map() {
        let mut grid = WorldGrid::new(4, 4, true, false);
        for loc in 0..grid.size() {
            grid.change(loc, Terrain::Forest);
        }
        assert_eq!(number_islands_and_fix_lakes(&mut grid), 0);
        finish_islands(&mut grid);
        assert!(grid.iter().all(|(_, t)| t.island_id == IslandId(1)));
    }

    #[test]
    fn test_lone_shallow_sea_gets_fresh_id() {
        let mut grid = WorldGrid::new(3, 3, false, false);
        for loc in 0..grid.size() {
            grid.change(loc, Terrain::ShallowSea);
        }
        number_islands_and_fix_lakes(&mut grid);
        finish_islands(&mut grid);
        assert!(grid.iter().all(|(_, t)| t.island_id == IslandId(1)));
    }

    #[test]
    fn test_shallow_sea_in_open_ocean_is_not_ocean() {
        let mut grid = WorldGrid::new(5, 5, false, false);
        grid.change(grid.index(2, 2), Terrain::ShallowSea);
        number_islands_and_fix_lakes(&mut grid);
        finish_islands(&mut grid);

        assert!(grid.island_id(grid.index(2, 2)).is_island());
        assert!(grid.island_id(0).is_ocean());
        assert_components_share_ids(&grid);
    }
}
