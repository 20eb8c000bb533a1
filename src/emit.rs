//! Output files
//!
//! Everything the game server and the map viewer load: the ASCII preview,
//! the sharded world files with their index, the flat summary and the island
//! registry. A PNG preview, a JSON run report and the console statistics
//! table live here as well.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use image::{ImageBuffer, Rgb, RgbImage};
use log::info;
use serde::Serialize;

use crate::audit::{terrain_counts, AuditWarning};
use crate::error::{MapError, MapResult};
use crate::grid::{IslandId, WorldGrid};
use crate::islands::IslandEntry;
use crate::terrain::Terrain;
use crate::world::GeneratedWorld;

pub const PREVIEW_FILE: &str = "map.txt";
pub const INDEX_FILE: &str = "index";
pub const BASE_MAP_FILE: &str = "base_map";
pub const ISLANDS_FILE: &str = "islands.isl";

/// The runtime's "no value" marker, written as the last summary column.
pub const NOTHING: i32 = -1;

/// Create `path` and hand a buffered writer to `body`, attaching the path to
/// any I/O failure.
fn write_file<F>(path: &Path, body: F) -> MapResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let file = File::create(path).map_err(|e| MapError::io(path, e))?;
    let mut out = BufWriter::new(file);
    body(&mut out)
        .and_then(|_| out.flush())
        .map_err(|e| MapError::io(path, e))
}

/// File name of world block `n`.
pub fn block_file_name(n: usize) -> String {
    format!("{}.wld", n)
}

/// Render the ASCII preview: a `<width>x<height>` header, then one icon per
/// tile in location order.
pub fn render_preview(grid: &WorldGrid) -> String {
    let mut result = String::with_capacity((grid.width + 1) * grid.height + 16);
    result.push_str(&format!("{}x{}\n", grid.width, grid.height));
    for (loc, tile) in grid.iter() {
        result.push(tile.terrain.icon());
        if (loc + 1) % grid.width == 0 {
            result.push('\n');
        }
    }
    result
}

pub fn write_preview(grid: &WorldGrid, dir: &Path) -> MapResult<PathBuf> {
    let path = dir.join(PREVIEW_FILE);
    let preview = render_preview(grid);
    write_file(&path, |out| out.write_all(preview.as_bytes()))?;
    Ok(path)
}

/// Write the sharded world: `block_rows` map rows per `<n>.wld` file plus the
/// `index` listing them. Returns the number of blocks written.
pub fn write_world_files(grid: &WorldGrid, block_rows: usize, dir: &Path) -> MapResult<usize> {
    let block_size = grid.width * block_rows;
    if block_size == 0 || grid.size() % block_size != 0 {
        return Err(MapError::InvalidConfig(format!(
            "{} tiles do not split into blocks of {}",
            grid.size(),
            block_size
        )));
    }
    let blocks = grid.size() / block_size;

    for n in 0..blocks {
        let path = dir.join(block_file_name(n));
        write_file(&path, |out| {
            for pos in n * block_size..(n + 1) * block_size {
                let tile = grid.tile(pos);
                // every block starts with a record so no file is empty
                if tile.terrain == Terrain::Ocean && pos != n * block_size {
                    continue;
                }
                let sector = tile.terrain.sector_vnum();
                writeln!(out, "#{}", pos)?;
                writeln!(out, "{} {} {}", tile.island_id.0, sector, sector)?;
                writeln!(out, "S")?;
            }
            writeln!(out, "$~")
        })?;
    }

    let index = dir.join(INDEX_FILE);
    write_file(&index, |out| {
        for n in 0..blocks {
            writeln!(out, "{}", block_file_name(n))?;
        }
        writeln!(out, "$")
    })?;

    Ok(blocks)
}

/// Flat summary: one line per non-ocean tile.
pub fn write_base_map(grid: &WorldGrid, dir: &Path) -> MapResult<PathBuf> {
    let path = dir.join(BASE_MAP_FILE);
    write_file(&path, |out| {
        for (loc, tile) in grid.iter() {
            if tile.terrain == Terrain::Ocean {
                continue;
            }
            let sector = tile.terrain.sector_vnum();
            writeln!(
                out,
                "{} {} {} {} {} {} {}",
                grid.x_coord(loc),
                grid.y_coord(loc),
                tile.island_id.0,
                sector,
                sector,
                sector,
                NOTHING
            )?;
        }
        Ok(())
    })?;
    Ok(path)
}

pub fn write_island_registry(registry: &[IslandEntry], dir: &Path) -> MapResult<PathBuf> {
    let path = dir.join(ISLANDS_FILE);
    write_file(&path, |out| {
        for entry in registry {
            writeln!(out, "#{}", entry.id)?;
            writeln!(out, "{}~", entry.name)?;
            writeln!(out, "{}", entry.flags)?;
            writeln!(out, "S")?;
        }
        writeln!(out, "$")
    })?;
    Ok(path)
}

/// Preview, world files and flat summary: everything a shift rewrites.
pub fn write_map_files(grid: &WorldGrid, block_rows: usize, dir: &Path) -> MapResult<()> {
    write_preview(grid, dir)?;
    let blocks = write_world_files(grid, block_rows, dir)?;
    write_base_map(grid, dir)?;
    info!("Wrote preview, {} world blocks and summary to {}", blocks, dir.display());
    Ok(())
}

/// Every file of a freshly generated world.
pub fn write_all(world: &GeneratedWorld, dir: &Path) -> MapResult<()> {
    write_map_files(&world.grid, world.config.block_rows, dir)?;
    write_island_registry(&world.registry, dir)?;
    Ok(())
}

/// PNG color for a terrain kind.
pub fn terrain_color(terrain: Terrain) -> [u8; 3] {
    match terrain {
        Terrain::Plains => [170, 200, 110],
        Terrain::Forest => [40, 110, 40],
        Terrain::River => [60, 120, 220],
        Terrain::Ocean => [20, 40, 110],
        Terrain::Mountain => [130, 110, 90],
        Terrain::TemperateCrop => [210, 200, 90],
        Terrain::Desert => [230, 210, 140],
        Terrain::StartLocation => [255, 0, 0],
        Terrain::Jungle => [20, 130, 70],
        Terrain::Oasis => [80, 190, 190],
        Terrain::Grove => [150, 170, 60],
        Terrain::Swamp => [80, 100, 60],
        Terrain::Tundra => [220, 230, 235],
        Terrain::Lake => [50, 100, 200],
        Terrain::DesertCrop => [220, 180, 80],
        Terrain::JungleCrop => [120, 170, 50],
        Terrain::ShallowSea => [40, 90, 170],
        Terrain::Estuary => [70, 150, 190],
        Terrain::Beach => [240, 225, 170],
        Terrain::Riverbank => [120, 170, 110],
        Terrain::Mangrove => [50, 110, 90],
        Terrain::SnowyMountain => [245, 245, 250],
    }
}

/// Render the map as a PNG, one pixel per tile, north at the top.
pub fn export_png(grid: &WorldGrid, path: &Path) -> MapResult<()> {
    let mut img: RgbImage = ImageBuffer::new(grid.width as u32, grid.height as u32);

    for (loc, tile) in grid.iter() {
        let x = grid.x_coord(loc) as u32;
        let y = (grid.height - 1 - grid.y_coord(loc)) as u32;
        img.put_pixel(x, y, Rgb(terrain_color(tile.terrain)));
    }

    img.save(path).map_err(|source| MapError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Terrain statistics: name, count and percent for every kind, three to a
/// row, then the number of islands.
pub fn format_stats(grid: &WorldGrid) -> String {
    let counts = terrain_counts(grid);
    let size = grid.size().max(1) as f64;
    let mut result = String::new();

    for (i, &terrain) in Terrain::all().iter().enumerate() {
        let count = counts.get(&terrain).copied().unwrap_or(0);
        result.push_str(&format!(
            "{:<10.10}: {:>7} {:>5.2}%",
            terrain.display_name(),
            count,
            count as f64 * 100.0 / size
        ));
        result.push(if (i + 1) % 3 == 0 { '\n' } else { ' ' });
    }
    if Terrain::COUNT % 3 != 0 {
        result.push('\n');
    }

    let islands = grid
        .iter()
        .map(|(_, tile)| tile.island_id)
        .filter(IslandId::is_island)
        .max()
        .map_or(0, |id| id.0);
    result.push_str(&format!("Number of islands: {}\n", islands));
    result
}

/// Machine-readable summary of one generator run.
#[derive(Debug, Serialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub target_land: usize,
    pub land_tiles: usize,
    pub islands: usize,
    pub continents: usize,
    pub start_locations: usize,
    pub terrain_counts: BTreeMap<Terrain, usize>,
    pub warnings: Vec<AuditWarning>,
    pub generated_at: String,
}

impl GenerationReport {
    pub fn new(world: &GeneratedWorld, warnings: Vec<AuditWarning>) -> Self {
        Self {
            seed: world.seed,
            width: world.grid.width,
            height: world.grid.height,
            target_land: world.config.target_land,
            land_tiles: world.grid.land_tiles(),
            islands: world.registry.len(),
            continents: world.registry.iter().filter(|e| e.is_continent()).count(),
            start_locations: world.grid.count(Terrain::StartLocation),
            terrain_counts: terrain_counts(&world.grid),
            warnings,
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }

    pub fn write(&self, path: &Path) -> MapResult<()> {
        let json = serde_json::to_string_pretty(self).map_err(|source| MapError::Report {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|e| MapError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_grid() -> WorldGrid {
        // 4x2, blocks of one row
        let mut grid = WorldGrid::new(4, 2, true, false);
        grid.reset_island_ids(IslandId::OCEAN);
        grid.change(1, Terrain::Forest);
        grid.set_island_id(1, IslandId(1));
        grid.change(6, Terrain::Mountain);
        grid.set_island_id(6, IslandId(2));
        grid
    }

    #[test]
    fn test_preview_layout() {
        let grid = sample_grid();
        assert_eq!(render_preview(&grid), "4x2\nkfkk\nkkqk\n");
    }

    #[test]
    fn test_world_files_force_block_stub() {
        let dir = tempfile::tempdir().unwrap();
        let grid = sample_grid();
        assert_eq!(write_world_files(&grid, 1, dir.path()).unwrap(), 2);

        let index = fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap();
        assert_eq!(index, "0.wld\n1.wld\n$\n");

        let block0 = fs::read_to_string(dir.path().join("0.wld")).unwrap();
        assert_eq!(block0, "#0\n-1 6 6\nS\n#1\n1 4 4\nS\n$~\n");
        let block1 = fs::read_to_string(dir.path().join("1.wld")).unwrap();
        assert_eq!(block1, "#4\n-1 6 6\nS\n#6\n2 8 8\nS\n$~\n");
    }

    #[test]
    fn test_world_files_reject_uneven_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let grid = sample_grid();
        assert!(matches!(
            write_world_files(&grid, 3, dir.path()),
            Err(MapError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_base_map_skips_ocean() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_base_map(&sample_grid(), dir.path()).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert_eq!(text, "1 0 1 4 4 4 -1\n2 1 2 8 8 8 -1\n");
    }

    #[test]
    fn test_island_registry_format() {
        let dir = tempfile::tempdir().unwrap();
        let registry = vec![
            IslandEntry {
                id: 1,
                name: "Continent 1".to_string(),
                flags: 8,
            },
            IslandEntry {
                id: 2,
                name: "Island 1".to_string(),
                flags: 1,
            },
        ];
        let path = write_island_registry(&registry, dir.path()).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert_eq!(text, "#1\nContinent 1~\n8\nS\n#2\nIsland 1~\n1\nS\n$\n");
    }

    #[test]
    fn test_png_has_one_pixel_per_tile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.png");
        export_png(&sample_grid(), &path).unwrap();
        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (4, 2));
        // south row is drawn at the bottom
        assert_eq!(img.get_pixel(1, 1).0, terrain_color(Terrain::Forest));
        assert_eq!(img.get_pixel(2, 0).0, terrain_color(Terrain::Mountain));
    }

    #[test]
    fn test_stats_table() {
        let stats = format_stats(&sample_grid());
        assert!(stats.starts_with("Plains    :       0  0.00% Forest    :       1 12.50%"));
        assert!(stats.ends_with("Number of islands: 2\n"));
        // 22 kinds, three per row
        assert_eq!(stats.lines().count(), 9);
    }
}
