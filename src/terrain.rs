//! Terrain kinds and their descriptor table
//!
//! The descriptor table is the contract with the game server: the sector id
//! written for each kind must match the live sector definitions, and the
//! loader decodes files through the same table in reverse.

use serde::{Deserialize, Serialize};

use crate::error::{MapError, MapResult};

/// Every terrain kind the generator can place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Terrain {
    Plains,
    Forest,
    River,
    Ocean,
    Mountain,
    TemperateCrop,
    Desert,
    StartLocation,
    Jungle,
    Oasis,
    Grove,
    Swamp,
    Tundra,
    Lake,
    DesertCrop,
    JungleCrop,
    ShallowSea,
    Estuary,
    Beach,
    Riverbank,
    Mangrove,
    SnowyMountain,
}

/// Static properties of a terrain kind.
#[derive(Clone, Copy, Debug)]
pub struct TerrainDescriptor {
    /// One-character icon for the ASCII preview
    pub icon: char,
    /// Name used in statistics output
    pub name: &'static str,
    /// Sector id written to the world files
    pub sector_vnum: i32,
    /// Part of an island body (ground or inland fresh water)
    pub is_land: bool,
    /// Joins neighbors of the same class during island numbering
    pub connects_island: bool,
}

const fn desc(
    icon: char,
    name: &'static str,
    sector_vnum: i32,
    is_land: bool,
    connects_island: bool,
) -> TerrainDescriptor {
    TerrainDescriptor {
        icon,
        name,
        sector_vnum,
        is_land,
        connects_island,
    }
}

/// Indexed by `Terrain as usize`; order must match the enum.
static DESCRIPTORS: [TerrainDescriptor; Terrain::COUNT] = [
    desc('b', "Plains", 0, true, true),
    desc('f', "Forest", 4, true, true),
    desc('i', "River", 5, true, true),
    desc('k', "Ocean", 6, false, false),
    desc('q', "Mountain", 8, true, true),
    desc('b', "Tmp. Crop", 7, true, true),
    desc('m', "Desert", 20, true, true),
    desc('*', "Tower", 18, true, true),
    desc('d', "Jungle", 28, true, true),
    desc('j', "Oasis", 21, true, true),
    desc('b', "Grove", 26, true, true),
    desc('e', "Swamp", 29, true, true),
    desc('h', "Tundra", 30, false, false),
    desc('i', "Lake", 32, true, true),
    desc('o', "Des. Crop", 12, true, true),
    desc('3', "Jung. Crop", 16, true, true),
    desc('l', "Shallow Sea", 40, false, true),
    desc('n', "Estuary", 41, true, true),
    desc('g', "Beach", 42, true, true),
    desc('a', "Riverbank", 43, true, true),
    desc('p', "Mangrove", 44, true, true),
    desc('s', "Snowy Mtn.", 45, true, true),
];

impl Terrain {
    pub const COUNT: usize = 22;

    /// All terrain kinds in table order.
    pub fn all() -> &'static [Terrain] {
        &[
            Terrain::Plains,
            Terrain::Forest,
            Terrain::River,
            Terrain::Ocean,
            Terrain::Mountain,
            Terrain::TemperateCrop,
            Terrain::Desert,
            Terrain::StartLocation,
            Terrain::Jungle,
            Terrain::Oasis,
            Terrain::Grove,
            Terrain::Swamp,
            Terrain::Tundra,
            Terrain::Lake,
            Terrain::DesertCrop,
            Terrain::JungleCrop,
            Terrain::ShallowSea,
            Terrain::Estuary,
            Terrain::Beach,
            Terrain::Riverbank,
            Terrain::Mangrove,
            Terrain::SnowyMountain,
        ]
    }

    pub fn descriptor(self) -> &'static TerrainDescriptor {
        &DESCRIPTORS[self as usize]
    }

    pub fn icon(self) -> char {
        self.descriptor().icon
    }

    pub fn display_name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn sector_vnum(self) -> i32 {
        self.descriptor().sector_vnum
    }

    pub fn is_land(self) -> bool {
        self.descriptor().is_land
    }

    pub fn connects_island(self) -> bool {
        self.descriptor().connects_island
    }

    /// Fresh water a river may drain into.
    pub fn is_fresh_water(self) -> bool {
        matches!(self, Terrain::River | Terrain::Lake | Terrain::Oasis)
    }

    /// Reverse lookup used when reading world files back in.
    pub fn from_sector(sector_vnum: i32) -> MapResult<Terrain> {
        Terrain::all()
            .iter()
            .copied()
            .find(|t| t.sector_vnum() == sector_vnum)
            .ok_or(MapError::UnknownSector(sector_vnum))
    }
}
