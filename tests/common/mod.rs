use empire_mapgen::config::{IslandDefinition, RegionBox};
use empire_mapgen::MapConfig;

/// A map small enough to generate in a test but with every stage active.
pub fn small_config() -> MapConfig {
    MapConfig {
        width: 160,
        height: 80,
        target_land: 3000,
        continents: vec![
            IslandDefinition::new(8, 14, 20, 2, RegionBox::new(15.0, 45.0, 55.0, 80.0)),
            IslandDefinition::new(8, 14, 20, 2, RegionBox::new(55.0, 85.0, 20.0, 45.0)),
        ],
        islands: vec![
            IslandDefinition::new(3, 8, 15, 3, RegionBox::WHOLE_MAP),
            IslandDefinition::new(2, 5, 10, 4, RegionBox::WHOLE_MAP),
        ],
        ..MapConfig::default()
    }
}
