//! Wrap centering
//!
//! On a map that wraps east-west only, pan the map so the emptiest stretch of
//! columns sits on the seam instead of cutting through a continent.

use log::info;

use crate::error::MapResult;
use crate::grid::WorldGrid;
use crate::islands::Island;

/// Number of island-connecting tiles in each column.
pub fn column_density(grid: &WorldGrid) -> Vec<usize> {
    let mut density = vec![0; grid.width];
    for (loc, tile) in grid.iter() {
        if tile.terrain.connects_island() {
            density[grid.x_coord(loc)] += 1;
        }
    }
    density
}

/// Column to move onto the seam: the middle of the longest run of
/// minimum-density columns. `None` when that run already touches the seam
/// (counting the wrap-around) or there is no run at all.
pub fn find_seam(density: &[usize]) -> Option<usize> {
    let min = *density.iter().min()?;

    let first_gap = density.iter().take_while(|&&d| d == min).count();
    let mut largest: Option<(usize, usize)> = None; // (start, len)
    let mut run: Option<(usize, usize)> = None;

    for (x, &d) in density.iter().enumerate() {
        if d == min {
            run = Some(match run {
                Some((start, len)) => (start, len + 1),
                None => (x, 1),
            });
        } else if let Some(done) = run.take() {
            if largest.map_or(true, |(_, len)| done.1 > len) {
                largest = Some(done);
            }
        }
    }
    // a run still open at the east edge
    let last_gap = run.map_or(0, |(_, len)| len);
    if let Some(done) = run {
        if largest.map_or(true, |(_, len)| done.1 > len) {
            largest = Some(done);
        }
    }

    let (start, len) = largest?;
    if last_gap + first_gap > len {
        return None;
    }
    Some((start + len / 2) % density.len())
}

/// Shift the map west so the best seam lands on the map edge, moving the
/// island seeds along with it. Returns the distance shifted (negative = west).
pub fn center_map(grid: &mut WorldGrid, islands: &mut [Island]) -> MapResult<Option<i32>> {
    let density = column_density(grid);
    let Some(seam) = find_seam(&density) else {
        info!("Not centering: largest gap is on the edge");
        return Ok(None);
    };
    if seam == 0 {
        return Ok(None);
    }

    let amount = -(seam as i32);
    info!("Shifting map west by {}", seam);
    grid.shift_map_x(amount)?;

    let width = grid.width as i64;
    for isle in islands.iter_mut() {
        let x = (grid.x_coord(isle.loc) as i64 + amount as i64).rem_euclid(width) as usize;
        isle.loc = grid.index(x, grid.y_coord(isle.loc));
    }
    Ok(Some(amount))
}
