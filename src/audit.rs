//! Post-generation coverage checks
//!
//! A finished map should have a minimum amount of each climate where players
//! expect to find it. A shortfall is reported, never fatal: the map is still
//! valid, it is just thin on some content.

use std::collections::BTreeMap;

use log::warn;
use serde::Serialize;

use crate::config::RegionBox;
use crate::grid::WorldGrid;
use crate::terrain::Terrain;

/// Fewest tiles a region may hold before it is flagged.
pub const MIN_REGION_TILES: usize = 25;

/// Terrain expected inside part of the map.
#[derive(Clone, Copy, Debug)]
pub struct AuditRegion {
    pub name: &'static str,
    pub terrain: &'static [Terrain],
    pub region: RegionBox,
}

const FOREST: &[Terrain] = &[Terrain::Forest, Terrain::TemperateCrop];

pub const AUDIT_REGIONS: &[AuditRegion] = &[
    AuditRegion {
        name: "southern tundra",
        terrain: &[Terrain::Tundra],
        region: RegionBox::new(0.0, 100.0, 0.0, 5.0),
    },
    AuditRegion {
        name: "northern tundra",
        terrain: &[Terrain::Tundra],
        region: RegionBox::new(0.0, 100.0, 95.0, 100.0),
    },
    AuditRegion {
        name: "desert belt",
        terrain: &[Terrain::Desert, Terrain::DesertCrop, Terrain::Oasis, Terrain::Grove],
        region: RegionBox::new(0.0, 100.0, 36.6, 63.3),
    },
    AuditRegion {
        name: "jungle belt",
        terrain: &[Terrain::Jungle, Terrain::JungleCrop, Terrain::Swamp, Terrain::Mangrove],
        region: RegionBox::new(0.0, 100.0, 30.0, 70.0),
    },
    AuditRegion {
        name: "northern forest",
        terrain: FOREST,
        region: RegionBox::new(0.0, 100.0, 70.0, 95.0),
    },
    AuditRegion {
        name: "southern forest",
        terrain: FOREST,
        region: RegionBox::new(0.0, 100.0, 5.0, 30.0),
    },
    AuditRegion {
        name: "mountains",
        terrain: &[Terrain::Mountain, Terrain::SnowyMountain],
        region: RegionBox::WHOLE_MAP,
    },
    AuditRegion {
        name: "rivers",
        terrain: &[Terrain::River, Terrain::Estuary],
        region: RegionBox::WHOLE_MAP,
    },
    AuditRegion {
        name: "lakes",
        terrain: &[Terrain::Lake],
        region: RegionBox::WHOLE_MAP,
    },
    AuditRegion {
        name: "coastal beaches",
        terrain: &[Terrain::Beach],
        region: RegionBox::WHOLE_MAP,
    },
];

/// A region that came up short.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuditWarning {
    pub region: String,
    pub found: usize,
    pub minimum: usize,
}

/// Count the tiles of a region's terrain inside its box.
pub fn count_region(grid: &WorldGrid, region: &AuditRegion) -> usize {
    let (x_min, x_max, y_min, y_max) = region.region.tile_bounds(grid.width, grid.height);
    grid.iter()
        .filter(|(loc, tile)| {
            let x = grid.x_coord(*loc) as i32;
            let y = grid.y_coord(*loc) as i32;
            (x_min..=x_max).contains(&x)
                && (y_min..=y_max).contains(&y)
                && region.terrain.contains(&tile.terrain)
        })
        .count()
}

/// Check every region against `minimum`. Shortfalls are logged and
/// returned.
pub fn audit_regions(
    grid: &WorldGrid,
    regions: &[AuditRegion],
    minimum: usize,
) -> Vec<AuditWarning> {
    regions
        .iter()
        .filter_map(|region| {
            let found = count_region(grid, region);
            if found >= minimum {
                return None;
            }
            warn!("Audit: {} has only {} tiles (want at least {})", region.name, found, minimum);
            Some(AuditWarning {
                region: region.name.to_string(),
                found,
                minimum,
            })
        })
        .collect()
}

/// Audit a finished map with the standard regions.
pub fn audit_map(grid: &WorldGrid) -> Vec<AuditWarning> {
    audit_regions(grid, AUDIT_REGIONS, MIN_REGION_TILES)
}

/// Tiles of each terrain kind present on the map.
pub fn terrain_counts(grid: &WorldGrid) -> BTreeMap<Terrain, usize> {
    let mut counts = BTreeMap::new();
    for (_, tile) in grid.iter() {
        *counts.entry(tile.terrain).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_map_flags_every_region() {
        let grid = WorldGrid::new(20, 20, true, false);
        let warnings = audit_map(&grid);
        assert_eq!(warnings.len(), AUDIT_REGIONS.len());
        assert!(warnings.iter().all(|w| w.found == 0 && w.minimum == MIN_REGION_TILES));
    }

    #[test]
    fn test_region_counts_only_inside_box() {
        let mut grid = WorldGrid::new(10, 100, true, false);
        // tundra on the south pole row and in the middle of the map
        for x in 0..10 {
            grid.change(grid.index(x, 0), Terrain::Tundra);
            grid.change(grid.index(x, 50), Terrain::Tundra);
        }
        assert_eq!(count_region(&grid, &AUDIT_REGIONS[0]), 10);
        assert_eq!(count_region(&grid, &AUDIT_REGIONS[1]), 0);

        let warnings = audit_regions(&grid, &AUDIT_REGIONS[..1], 10);
        assert!(warnings.is_empty());
        let warnings = audit_regions(&grid, &AUDIT_REGIONS[..1], 11);
        assert_eq!(
            warnings,
            vec![AuditWarning {
                region: "southern tundra".to_string(),
                found: 10,
                minimum: 11,
            }]
        );
    }

    #[test]
    fn test_terrain_counts() {
        let mut grid = WorldGrid::new(5, 5, false, false);
        grid.change(3, Terrain::Lake);
        let counts = terrain_counts(&grid);
        assert_eq!(counts[&Terrain::Ocean], 24);
        assert_eq!(counts[&Terrain::Lake], 1);
        assert!(!counts.contains_key(&Terrain::Forest));
    }
}
