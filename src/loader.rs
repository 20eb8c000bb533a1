//! Reading emitted world files back in, and shift mode.
//!
//! The loader rebuilds terrain and island ids purely from the `index` and
//! `<n>.wld` files, decoding sector ids through the same descriptor table the
//! emitter encodes with.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::MapConfig;
use crate::emit::{self, INDEX_FILE};
use crate::error::{MapError, MapResult};
use crate::grid::{IslandId, WorldGrid};
use crate::terrain::Terrain;

/// Meaningful lines of a world file with their 1-based line numbers.
/// Blank lines and `*` comments are skipped.
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('*'))
}

fn read_text(path: &Path) -> MapResult<String> {
    fs::read_to_string(path).map_err(|e| MapError::io(path, e))
}

/// Block files listed in the index, in order.
pub fn read_index(dir: &Path) -> MapResult<Vec<PathBuf>> {
    let text = read_text(&dir.join(INDEX_FILE))?;
    let mut blocks = Vec::new();
    for (_, line) in content_lines(&text) {
        if line.starts_with('$') {
            break;
        }
        blocks.push(dir.join(line));
    }
    Ok(blocks)
}

/// Apply every room record of one block file to `grid`.
pub fn read_block(grid: &mut WorldGrid, path: &Path) -> MapResult<usize> {
    let text = read_text(path)?;
    let mut lines = content_lines(&text);
    let mut records = 0;

    let malformed = |line_no: usize, line: &str| MapError::MalformedLine {
        file: path.to_path_buf(),
        line_no,
        line: line.to_string(),
    };

    while let Some((line_no, line)) = lines.next() {
        if line.starts_with('$') {
            break;
        }
        let Some(vnum) = line.strip_prefix('#') else {
            return Err(malformed(line_no, line));
        };
        let vnum: usize = vnum.trim().parse().map_err(|_| malformed(line_no, line))?;
        if vnum >= grid.size() {
            return Err(MapError::OutOfBounds {
                file: path.to_path_buf(),
                vnum,
            });
        }

        let missing = || MapError::MissingRecordBody {
            file: path.to_path_buf(),
            vnum,
        };
        let (body_no, body) = lines.next().ok_or_else(missing)?;
        let fields = body
            .split_whitespace()
            .map(str::parse::<i32>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| malformed(body_no, body))?;
        let &[island, sector, _] = fields.as_slice() else {
            return Err(malformed(body_no, body));
        };

        grid.change(vnum, Terrain::from_sector(sector)?);
        grid.set_island_id(vnum, IslandId(island));
        records += 1;

        // trailing 'S' line
        lines.next().ok_or_else(missing)?;
    }

    Ok(records)
}

/// Rebuild a map from the world files in `dir`. Tiles without a record are
/// open ocean.
pub fn load_map(config: &MapConfig, dir: &Path) -> MapResult<WorldGrid> {
    let mut grid = WorldGrid::from_config(config);
    grid.reset_island_ids(IslandId::OCEAN);

    for block in read_index(dir)? {
        let records = read_block(&mut grid, &block)?;
        debug!("Loaded {} rooms from {}", records, block.display());
    }
    info!("Loaded existing map from {}", dir.display());
    Ok(grid)
}

/// Reload the map in `dir`, pan it `distance` tiles east (negative = west)
/// and rewrite the preview, world files and summary. The island registry is
/// left as is. Returns the shifted grid, or `None` for a zero distance.
pub fn run_shift(config: &MapConfig, dir: &Path, distance: i32) -> MapResult<Option<WorldGrid>> {
    if distance == 0 {
        info!("Shift by distance 0: no work to do");
        return Ok(None);
    }
    if !config.wrap_x {
        return Err(MapError::ShiftWithoutWrap { amount: distance });
    }

    let mut grid = load_map(config, dir)?;
    grid.shift_map_x(distance)?;
    emit::write_map_files(&grid, config.block_rows, dir)?;
    info!("Map shifted {} on X-axis", distance);
    Ok(Some(grid))
}
