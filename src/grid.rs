//! The world grid: one tile per map room, optionally wrapping east-west
//! and/or north-south.
//!
//! Tiles are stored row-major (`loc = y * width + x`, `y = 0` at the southern
//! edge). All terrain changes go through [`WorldGrid::change`], which keeps
//! the running ocean count exact without rescanning the map.

use crate::config::MapConfig;
use crate::error::{MapError, MapResult};
use crate::terrain::Terrain;

/// Island number of a tile (`0` = not yet numbered, `-1` = open ocean).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IslandId(pub i32);

impl IslandId {
    pub const UNSET: IslandId = IslandId(0);
    /// Matches the game's "no value" marker.
    pub const OCEAN: IslandId = IslandId(-1);

    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }

    pub fn is_ocean(&self) -> bool {
        self.0 == -1
    }

    pub fn is_island(&self) -> bool {
        self.0 > 0
    }
}

/// One map room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub terrain: Terrain,
    /// Fresh-paint marker for the operation in progress; 0 = untouched
    pub pass: u32,
    pub island_id: IslandId,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            terrain: Terrain::Ocean,
            pass: 0,
            island_id: IslandId::UNSET,
        }
    }
}

/// 8-neighbor offsets, (dx, dy).
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Compass directions; north is `+y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// How much to shift x/y to move one step this way.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
            Direction::NorthEast => (1, 1),
            Direction::SouthWest => (-1, -1),
            Direction::SouthEast => (1, -1),
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::SouthEast => Direction::NorthWest,
        }
    }

    /// Winding table: permitted next headings `[left, straight, right]`.
    pub fn winding(self) -> [Direction; 3] {
        match self {
            Direction::North => [Direction::NorthWest, Direction::North, Direction::NorthEast],
            Direction::NorthEast => [Direction::North, Direction::NorthEast, Direction::East],
            Direction::East => [Direction::NorthEast, Direction::East, Direction::SouthEast],
            Direction::SouthEast => [Direction::East, Direction::SouthEast, Direction::South],
            Direction::South => [Direction::SouthEast, Direction::South, Direction::SouthWest],
            Direction::SouthWest => [Direction::South, Direction::SouthWest, Direction::West],
            Direction::West => [Direction::SouthWest, Direction::West, Direction::NorthWest],
            Direction::NorthWest => [Direction::West, Direction::NorthWest, Direction::North],
        }
    }
}

/// The master grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldGrid {
    pub width: usize,
    pub height: usize,
    pub wrap_x: bool,
    pub wrap_y: bool,
    tiles: Vec<Tile>,
    ocean_tiles: usize,
}

impl WorldGrid {
    /// Set the whole world to one giant ocean.
    pub fn new(width: usize, height: usize, wrap_x: bool, wrap_y: bool) -> Self {
        Self {
            width,
            height,
            wrap_x,
            wrap_y,
            tiles: vec![Tile::default(); width * height],
            ocean_tiles: width * height,
        }
    }

    pub fn from_config(config: &MapConfig) -> Self {
        Self::new(config.width, config.height, config.wrap_x, config.wrap_y)
    }

    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn x_coord(&self, loc: usize) -> usize {
        loc % self.width
    }

    pub fn y_coord(&self, loc: usize) -> usize {
        loc / self.width
    }

    pub fn tile(&self, loc: usize) -> &Tile {
        &self.tiles[loc]
    }

    pub fn terrain(&self, loc: usize) -> Terrain {
        self.tiles[loc].terrain
    }

    pub fn island_id(&self, loc: usize) -> IslandId {
        self.tiles[loc].island_id
    }

    pub fn set_island_id(&mut self, loc: usize, id: IslandId) {
        self.tiles[loc].island_id = id;
    }

    pub fn pass(&self, loc: usize) -> u32 {
        self.tiles[loc].pass
    }

    pub fn set_pass(&mut self, loc: usize, pass: u32) {
        self.tiles[loc].pass = pass;
    }

    /// Clears all pass data before a new feature is painted.
    pub fn clear_pass(&mut self) {
        for tile in &mut self.tiles {
            tile.pass = 0;
        }
    }

    pub fn reset_island_ids(&mut self, id: IslandId) {
        for tile in &mut self.tiles {
            tile.island_id = id;
        }
    }

    /// Change a tile's terrain. This is the only way terrain changes.
    pub fn change(&mut self, loc: usize, terrain: Terrain) {
        let Some(tile) = self.tiles.get_mut(loc) else {
            return;
        };
        if tile.terrain == Terrain::Ocean {
            self.ocean_tiles -= 1;
        }
        tile.terrain = terrain;
        if terrain == Terrain::Ocean {
            self.ocean_tiles += 1;
        }
    }

    pub fn ocean_tiles(&self) -> usize {
        self.ocean_tiles
    }

    /// Every tile that is not open ocean counts toward the land target.
    pub fn land_tiles(&self) -> usize {
        self.size() - self.ocean_tiles
    }

    /// Count tiles of one kind (full scan; not for hot paths).
    pub fn count(&self, terrain: Terrain) -> usize {
        self.tiles.iter().filter(|t| t.terrain == terrain).count()
    }

    /// Translate `origin` by (`dx`, `dy`), wrapping where the map wraps.
    /// Returns `None` when the result falls off a non-wrapping edge.
    pub fn shift(&self, origin: usize, dx: i32, dy: i32) -> Option<usize> {
        if origin >= self.size() {
            return None;
        }
        let w = self.width as i64;
        let h = self.height as i64;
        let mut x = self.x_coord(origin) as i64 + dx as i64;
        let mut y = self.y_coord(origin) as i64 + dy as i64;

        if x < 0 || x >= w {
            if !self.wrap_x {
                return None;
            }
            x = x.rem_euclid(w);
        }
        if y < 0 || y >= h {
            if !self.wrap_y {
                return None;
            }
            y = y.rem_euclid(h);
        }
        Some((y * w + x) as usize)
    }

    /// Valid 8-connected neighbors of `loc`.
    pub fn neighbors_8(&self, loc: usize) -> impl Iterator<Item = usize> + '_ {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| self.shift(loc, dx, dy))
    }

    /// Pans the whole map east (positive) or west, carrying every tile's
    /// terrain and island number with it.
    pub fn shift_map_x(&mut self, amount: i32) -> MapResult<()> {
        if amount == 0 {
            return Ok(());
        }
        if !self.wrap_x {
            return Err(MapError::ShiftWithoutWrap { amount });
        }
        let w = self.width as i64;
        let mut shifted = vec![Tile::default(); self.size()];
        for (loc, tile) in self.tiles.iter().enumerate() {
            let x = (self.x_coord(loc) as i64 + amount as i64).rem_euclid(w) as usize;
            shifted[self.index(x, self.y_coord(loc))] = *tile;
        }
        self.tiles = shifted;
        Ok(())
    }

    /// Iterate over all tiles with their locations.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Tile)> {
        self.tiles.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_all_ocean() {
        let grid = WorldGrid::new(10, 5, true, false);
        assert_eq!(grid.size(), 50);
        assert_eq!(grid.ocean_tiles(), 50);
        assert_eq!(grid.land_tiles(), 0);
        assert_eq!(grid.count(Terrain::Ocean), 50);
    }

    #[test]
    fn test_change_keeps_ocean_count() {
        let mut grid = WorldGrid::new(10, 10, false, false);
        grid.change(5, Terrain::Plains);
        grid.change(5, Terrain::Mountain);
        grid.change(6, Terrain::ShallowSea);
        assert_eq!(grid.ocean_tiles(), 98);
        grid.change(5, Terrain::Ocean);
        assert_eq!(grid.ocean_tiles(), 99);
        assert_eq!(grid.ocean_tiles(), grid.count(Terrain::Ocean));
        // out of range is ignored
        grid.change(1000, Terrain::Plains);
        assert_eq!(grid.ocean_tiles(), 99);
    }

    #[test]
    fn test_shift_wraps_x_only() {
        let grid = WorldGrid::new(10, 10, true, false);
        let origin = grid.index(0, 5);
        assert_eq!(grid.shift(origin, -1, 0), Some(grid.index(9, 5)));
        assert_eq!(grid.shift(origin, -23, 0), Some(grid.index(7, 5)));
        assert_eq!(grid.shift(grid.index(9, 5), 1, 0), Some(grid.index(0, 5)));
        assert_eq!(grid.shift(origin, 0, 5), None);
        assert_eq!(grid.shift(origin, 0, -6), None);
        assert_eq!(grid.shift(origin, 3, 4), Some(grid.index(3, 9)));
    }

    #[test]
    fn test_shift_without_wrap_rejects_edges() {
        let grid = WorldGrid::new(10, 10, false, false);
        assert_eq!(grid.shift(grid.index(0, 0), -1, 0), None);
        assert_eq!(grid.shift(grid.index(9, 9), 0, 1), None);
        assert_eq!(grid.shift(100, 0, 0), None);
    }

    #[test]
    fn test_shift_wraps_y_when_enabled() {
        let grid = WorldGrid::new(10, 10, false, true);
        assert_eq!(grid.shift(grid.index(4, 0), 0, -1), Some(grid.index(4, 9)));
    }

    #[test]
    fn test_corner_neighbors() {
        let grid = WorldGrid::new(10, 10, false, false);
        assert_eq!(grid.neighbors_8(0).count(), 3);
        let wrapped = WorldGrid::new(10, 10, true, false);
        assert_eq!(wrapped.neighbors_8(0).count(), 5);
    }

    #[test]
    fn test_shift_map_round_trip() {
        let mut grid = WorldGrid::new(8, 4, true, false);
        grid.change(grid.index(1, 1), Terrain::Forest);
        grid.set_island_id(grid.index(1, 1), IslandId(3));
        let original = grid.clone();

        grid.shift_map_x(3).unwrap();
        assert_eq!(grid.terrain(grid.index(4, 1)), Terrain::Forest);
        assert_eq!(grid.island_id(grid.index(4, 1)), IslandId(3));
        grid.shift_map_x(-3).unwrap();
        assert_eq!(grid, original);
    }

    #[test]
    fn test_winding_turns_at_most_45_degrees() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            let [left, straight, right] = dir.winding();
            assert_eq!(straight, dir);
            for turn in [left, right] {
                let (tx, ty) = turn.offset();
                assert!((tx - dx).abs() <= 1 && (ty - dy).abs() <= 1);
                assert_ne!(turn, dir);
            }
            assert_eq!(dir.reverse().reverse(), dir);
        }
    }

    #[test]
    fn test_shift_map_requires_wrap() {
        let mut grid = WorldGrid::new(8, 4, false, false);
        assert!(grid.shift_map_x(0).is_ok());
        assert!(matches!(grid.shift_map_x(2), Err(MapError::ShiftWithoutWrap { amount: 2 })));
    }
}
