//! Generator configuration
//!
//! Map constants shared with the game server (dimensions, wrap), the land
//! target, climate bands, and the compiled-in continent and island
//! definitions that drive placement.

use crate::error::{MapError, MapResult};

/// Rectangle expressed in percent of map width/height (y measured from the
/// southern edge).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionBox {
    pub x_min_pct: f64,
    pub x_max_pct: f64,
    pub y_min_pct: f64,
    pub y_max_pct: f64,
}

impl RegionBox {
    pub const WHOLE_MAP: RegionBox = RegionBox::new(0.0, 100.0, 0.0, 100.0);

    pub const fn new(x_min_pct: f64, x_max_pct: f64, y_min_pct: f64, y_max_pct: f64) -> Self {
        Self {
            x_min_pct,
            x_max_pct,
            y_min_pct,
            y_max_pct,
        }
    }

    /// Inclusive tile bounds `(x_min, x_max, y_min, y_max)`, clamped to the map.
    pub fn tile_bounds(&self, width: usize, height: usize) -> (i32, i32, i32, i32) {
        let to_tiles = |pct: f64, size: usize| -> i32 {
            let tile = (pct / 100.0 * size as f64).round() as i32;
            tile.clamp(0, size as i32 - 1)
        };
        (
            to_tiles(self.x_min_pct, width),
            to_tiles(self.x_max_pct, width),
            to_tiles(self.y_min_pct, height),
            to_tiles(self.y_max_pct, height),
        )
    }
}

/// How to build one cluster of islands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IslandDefinition {
    pub min_radius: i32,
    pub max_radius: i32,
    /// Maximum hop between consecutive seeds; the minimum is half of it
    pub cluster_dist: i32,
    pub cluster_size: i32,
    /// Where the first seed of the cluster may land
    pub region: RegionBox,
}

impl IslandDefinition {
    pub const fn new(
        min_radius: i32,
        max_radius: i32,
        cluster_dist: i32,
        cluster_size: i32,
        region: RegionBox,
    ) -> Self {
        Self {
            min_radius,
            max_radius,
            cluster_dist,
            cluster_size,
            region,
        }
    }
}

/// Continents, placed first and in this order.
pub const CONTINENT_DEFINITIONS: &[IslandDefinition] = &[
    IslandDefinition::new(30, 60, 45, 16, RegionBox::new(8.0, 38.0, 58.0, 82.0)),
    IslandDefinition::new(30, 60, 45, 16, RegionBox::new(58.0, 88.0, 18.0, 42.0)),
    IslandDefinition::new(30, 60, 45, 14, RegionBox::new(55.0, 85.0, 60.0, 85.0)),
    IslandDefinition::new(30, 60, 45, 14, RegionBox::new(10.0, 40.0, 15.0, 40.0)),
    IslandDefinition::new(25, 50, 40, 10, RegionBox::new(35.0, 65.0, 40.0, 60.0)),
];

/// Generic islands, cycled until the land target is met.
pub const ISLAND_DEFINITIONS: &[IslandDefinition] = &[
    IslandDefinition::new(10, 60, 45, 4, RegionBox::WHOLE_MAP), // medium size, cluster of 4
    IslandDefinition::new(10, 30, 20, 8, RegionBox::WHOLE_MAP), // small size, cluster of 8
    IslandDefinition::new(10, 30, 10, 8, RegionBox::WHOLE_MAP), // small, tightly packed
    IslandDefinition::new(10, 30, 15, 3, RegionBox::WHOLE_MAP), // tiny cluster
    IslandDefinition::new(10, 30, 15, 3, RegionBox::WHOLE_MAP), // tiny cluster
];

/// Full configuration for one generator run.
#[derive(Clone, Debug)]
pub struct MapConfig {
    pub width: usize,
    pub height: usize,
    pub wrap_x: bool,
    pub wrap_y: bool,
    /// How much ocean to convert to land
    pub target_land: usize,
    pub start_points: usize,
    /// Rows of tundra at the top and bottom (only without y-wrap)
    pub tundra_height: usize,
    /// Jungle band, % up from the bottom of the map
    pub jungle_start_pct: f64,
    pub jungle_end_pct: f64,
    /// Desert band; overrides jungle
    pub desert_start_pct: f64,
    pub desert_end_pct: f64,
    /// Continents stop once land reaches this share of the target
    pub continent_land_percent: usize,
    /// Rows per world file block
    pub block_rows: usize,
    /// Distance from land within which ocean becomes shallow sea
    pub shallow_sea_radius: i32,
    pub continents: Vec<IslandDefinition>,
    pub islands: Vec<IslandDefinition>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 1800,
            height: 1000,
            wrap_x: true,
            wrap_y: false,
            target_land: 333_000,
            start_points: 1,
            tundra_height: 1,
            jungle_start_pct: 30.0,
            jungle_end_pct: 70.0,
            desert_start_pct: 36.6,
            desert_end_pct: 63.3,
            continent_land_percent: 70,
            block_rows: 5,
            shallow_sea_radius: 2,
            continents: CONTINENT_DEFINITIONS.to_vec(),
            islands: ISLAND_DEFINITIONS.to_vec(),
        }
    }
}

impl MapConfig {
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    /// Tiles per world file block.
    pub fn block_size(&self) -> usize {
        self.width * self.block_rows
    }

    pub fn num_blocks(&self) -> usize {
        self.size() / self.block_size()
    }

    /// Land total at which continent placement hands over to islands.
    pub fn continent_land_target(&self) -> usize {
        self.target_land * self.continent_land_percent / 100
    }

    /// Whether row `y` lies in a band given as percent up from the bottom.
    pub fn in_y_percent_range(&self, y: usize, start_pct: f64, end_pct: f64) -> bool {
        let y = y as f64;
        y >= (start_pct / 100.0 * self.height as f64).round()
            && y <= (end_pct / 100.0 * self.height as f64).round()
    }

    pub fn validate(&self) -> MapResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MapError::InvalidConfig(format!(
                "map dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.block_rows == 0 || self.height % self.block_rows != 0 {
            return Err(MapError::InvalidConfig(format!(
                "map height {} is not a multiple of {} block rows",
                self.height, self.block_rows
            )));
        }
        if self.target_land > self.size() {
            return Err(MapError::InvalidConfig(format!(
                "land target {} exceeds the {} tiles on the map",
                self.target_land,
                self.size()
            )));
        }
        for def in self.continents.iter().chain(self.islands.iter()) {
            if def.min_radius < 0 || def.max_radius < def.min_radius || def.cluster_size < 0 {
                return Err(MapError::InvalidConfig(format!("bad island definition {:?}", def)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MapConfig::default();
        config.validate().unwrap();
        assert_eq!(config.block_size(), 9000);
        assert_eq!(config.num_blocks(), 200);
    }

    #[test]
    fn test_y_percent_range_rounds_band_edges() {
        let config = MapConfig {
            height: 1000,
            ..MapConfig::default()
        };
        assert!(config.in_y_percent_range(366, 36.6, 63.3));
        assert!(!config.in_y_percent_range(365, 36.6, 63.3));
        assert!(config.in_y_percent_range(633, 36.6, 63.3));
        assert!(!config.in_y_percent_range(634, 36.6, 63.3));
    }

    #[test]
    fn test_region_box_bounds_clamped() {
        let bounds = RegionBox::WHOLE_MAP.tile_bounds(100, 50);
        assert_eq!(bounds, (0, 99, 0, 49));
    }

    #[test]
    fn test_rejects_uneven_blocks() {
        let config = MapConfig {
            height: 33,
            ..MapConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
