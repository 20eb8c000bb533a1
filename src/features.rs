//! Mountain ranges and rivers
//!
//! Both features are directed random walks across an island. The heading
//! changes now and then through the winding table, so a walk bends instead of
//! jittering. Tiles painted by the walk in progress carry a pass marker, which
//! is how a walk tells its own fresh paint from features that were already
//! there.

use log::trace;

use crate::config::MapConfig;
use crate::grid::{Direction, WorldGrid};
use crate::islands::{grow_blob, Island, Radii};
use crate::rng::MapRng;
use crate::terrain::Terrain;

/// Pass marker for the pool a river springs from.
const SOURCE_PASS: u32 = 1;
/// First pass marker used by river steps.
const FIRST_RIVER_PASS: u32 = 2;

/// Why a walk ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Stepped off the island (or off the map)
    LeftLand,
    /// Ran into a feature of the same kind that was already on the map
    JoinedFeature,
    /// A river curled back onto its own earlier course
    SelfContact,
    /// Hit the step limit
    Exhausted,
}

/// Result of stamping one river step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarveStep {
    Continue,
    Stop(StopReason),
}

fn random_direction(rng: &mut MapRng) -> Direction {
    Direction::ALL[rng.number(0, 7) as usize]
}

/// Longest walk either carver will take.
fn max_steps(grid: &WorldGrid) -> usize {
    grid.width + grid.height
}

/// Next heading for a walk. Continents only ever swing to one side of their
/// original heading and back, which keeps their ranges long and straight;
/// islands may wind anywhere.
fn wander(rng: &mut MapRng, dir: Direction, original: Direction, continent: bool) -> Direction {
    if continent {
        if dir == original {
            original.winding()[if rng.one_in(2) { 0 } else { 2 }]
        } else {
            original
        }
    } else {
        dir.winding()[rng.number(0, 2) as usize]
    }
}

/// Returns the last land tile on the way from `loc` toward `dir`.
pub fn find_border(grid: &WorldGrid, loc: usize, dir: Direction) -> Option<usize> {
    if !grid.terrain(loc).is_land() {
        return None;
    }
    let (dx, dy) = dir.offset();
    let limit = grid.width.max(grid.height) as i32;

    let mut i = 0;
    while i < limit {
        match grid.shift(loc, dx * (i + 1), dy * (i + 1)) {
            Some(next) if grid.terrain(next).is_land() => i += 1,
            _ => break,
        }
    }
    grid.shift(loc, dx * i, dy * i)
}

/// Add a mountain range across an island.
///
/// The range starts at the island's edge and walks back through the seed,
/// stamping a rounded brush of mountains over plains. Returns why it stopped.
pub fn add_mountains(grid: &mut WorldGrid, rng: &mut MapRng, isle: &Island) -> StopReason {
    grid.clear_pass();

    let heading = random_direction(rng);
    let Some(mut room) = find_border(grid, isle.loc, heading.reverse()) else {
        return StopReason::LeftLand;
    };
    let radius = if isle.continent { rng.number(3, 4) } else { 2 };
    let (mut dx, mut dy) = heading.offset();
    let mut dir = heading;

    for _ in 0..max_steps(grid) {
        let here = grid.terrain(room);
        if !here.is_land() {
            return StopReason::LeftLand;
        }
        if here == Terrain::Mountain && grid.pass(room) == 0 {
            return StopReason::JoinedFeature;
        }
        if here == Terrain::Plains {
            grid.change(room, Terrain::Mountain);
        }
        grid.set_pass(room, 1);

        let mut collided = false;
        for hor in -radius..=radius {
            for ver in -radius..=radius {
                // skip the corners to make a rounded brush
                if hor.abs() == radius && ver.abs() == radius {
                    continue;
                }
                let Some(to) = grid.shift(room, hor, ver) else {
                    continue;
                };
                match grid.terrain(to) {
                    Terrain::Mountain if grid.pass(to) == 0 => collided = true,
                    Terrain::Plains if !rng.one_in(11) => {
                        grid.change(to, Terrain::Mountain);
                        grid.set_pass(to, 1);
                    }
                    _ => {}
                }
            }
        }
        if collided {
            return StopReason::JoinedFeature;
        }

        // alter course
        if rng.one_in(5) {
            dir = wander(rng, dir, heading, isle.continent);
            (dx, dy) = dir.offset();
        }

        room = match grid.shift(room, dx, dy) {
            Some(next) => next,
            None => return StopReason::LeftLand,
        };
    }

    StopReason::Exhausted
}

/// Paints one river, step by step, and decides when it has to stop.
pub struct RiverCarve {
    continent: bool,
    /// Outer ring of the brush
    radius: i32,
    /// Own paint older than this many steps counts as a different stretch
    /// of river
    self_contact_steps: u32,
    pass: u32,
    /// Last step whose center sat in the source pool
    last_source_pass: u32,
}

impl RiverCarve {
    pub fn new(continent: bool) -> Self {
        let radius = if continent { 2 } else { 1 };
        Self {
            continent,
            radius,
            self_contact_steps: 4 * radius as u32 + 1,
            pass: SOURCE_PASS,
            last_source_pass: FIRST_RIVER_PASS,
        }
    }

    /// Step number of the most recent stamp.
    pub fn steps(&self) -> u32 {
        self.pass - SOURCE_PASS
    }

    /// Whether `loc` is fresh water this river must not cross.
    fn contact(&self, grid: &WorldGrid, loc: usize) -> Option<StopReason> {
        if !grid.terrain(loc).is_fresh_water() {
            return None;
        }
        let painted = match grid.pass(loc) {
            0 => return Some(StopReason::JoinedFeature),
            SOURCE_PASS => self.last_source_pass,
            pass => pass,
        };
        if self.pass - painted > self.self_contact_steps {
            Some(StopReason::SelfContact)
        } else {
            None
        }
    }

    /// Stamp the river at `center`.
    pub fn stamp(&mut self, grid: &mut WorldGrid, rng: &mut MapRng, center: usize) -> CarveStep {
        self.pass += 1;

        if !grid.terrain(center).is_land() {
            return CarveStep::Stop(StopReason::LeftLand);
        }
        if grid.pass(center) == SOURCE_PASS {
            self.last_source_pass = self.pass;
        } else if let Some(reason) = self.contact(grid, center) {
            // already water: the river ends here
            return CarveStep::Stop(reason);
        } else if !grid.terrain(center).is_fresh_water() {
            grid.change(center, Terrain::River);
            grid.set_pass(center, self.pass);
        }

        let mut stop = None;
        let (start_hor, end) = if self.continent {
            (-self.radius, self.radius)
        } else {
            (rng.number(-1, 0), 1)
        };
        for hor in start_hor..=end {
            let start_ver = if self.continent { -self.radius } else { rng.number(-1, 0) };
            for ver in start_ver..=end {
                if hor == 0 && ver == 0 {
                    continue;
                }
                if self.continent && hor.abs() == self.radius && ver.abs() == self.radius {
                    continue;
                }
                let Some(to) = grid.shift(center, hor, ver) else {
                    continue;
                };
                if let Some(reason) = self.contact(grid, to) {
                    // keep the first reason; a river joining water stops AFTER this step
                    if stop.is_none() {
                        stop = Some(reason);
                    }
                    continue;
                }

                let terrain = grid.terrain(to);
                if !terrain.is_land() || terrain.is_fresh_water() {
                    continue;
                }
                // narrow through mountains
                let outer = hor.abs().max(ver.abs()) == self.radius;
                if outer && terrain == Terrain::Mountain {
                    continue;
                }
                grid.change(to, Terrain::River);
                grid.set_pass(to, self.pass);
            }
        }

        match stop {
            Some(reason) => CarveStep::Stop(reason),
            None => CarveStep::Continue,
        }
    }
}

/// Stamp the small pool a river springs from.
fn stamp_source(grid: &mut WorldGrid, rng: &mut MapRng, loc: usize, pool: Terrain) {
    let east = rng.number(1, 3);
    let west = rng.number(1, 3);
    let radii = Radii {
        east,
        west,
        north: rng.number(1, east.min(west)),
        south: rng.number(1, east.min(west)),
    };
    grow_blob(grid, rng, loc, radii, |grid, to| {
        if grid.terrain(to).is_land() && grid.pass(to) == 0 && !grid.terrain(to).is_fresh_water() {
            grid.change(to, pool);
            grid.set_pass(to, SOURCE_PASS);
        }
    });
}

/// Add a river to an island: a pool at the seed, then a river winding out
/// until it reaches the coast or runs into other fresh water.
pub fn add_river(
    grid: &mut WorldGrid,
    rng: &mut MapRng,
    isle: &Island,
    pool: Terrain,
) -> StopReason {
    grid.clear_pass();
    if !grid.terrain(isle.loc).is_land() {
        return StopReason::LeftLand;
    }

    stamp_source(grid, rng, isle.loc, pool);

    let heading = random_direction(rng);
    let mut dir = heading;
    let mut carve = RiverCarve::new(isle.continent);
    let mut room = isle.loc;

    for _ in 0..max_steps(grid) {
        if let CarveStep::Stop(reason) = carve.stamp(grid, rng, room) {
            trace!("River from {} stopped after {} steps: {:?}", isle.loc, carve.steps(), reason);
            return reason;
        }

        // alter course
        if rng.one_in(3) {
            dir = wander(rng, dir, heading, isle.continent);
        }
        let (dx, dy) = dir.offset();
        room = match grid.shift(room, dx, dy) {
            Some(next) => next,
            None => return StopReason::LeftLand,
        };
    }

    StopReason::Exhausted
}

/// Mountains and rivers for one island, chosen by the latitude of its seed
/// (the bands are not painted yet, so this goes by the configured percents).
pub fn carve_island(grid: &mut WorldGrid, rng: &mut MapRng, config: &MapConfig, isle: &Island) {
    let y = grid.y_coord(isle.loc);

    if config.in_y_percent_range(y, config.desert_start_pct, config.desert_end_pct) {
        add_mountains(grid, rng, isle);
        // rare chance of river
        if rng.one_in(3) {
            add_river(grid, rng, isle, Terrain::Oasis);
        }
    } else if config.in_y_percent_range(y, config.jungle_start_pct, config.jungle_end_pct) {
        if rng.one_in(2) {
            add_mountains(grid, rng, isle);
        }
        // always get extra river
        add_river(grid, rng, isle, Terrain::Lake);
        add_river(grid, rng, isle, Terrain::Lake);
    } else {
        add_mountains(grid, rng, isle);
        add_river(grid, rng, isle, Terrain::Lake);
        if rng.one_in(3) {
            add_river(grid, rng, isle, Terrain::Lake);
        }
    }

    if isle.continent {
        add_mountains(grid, rng, isle);
    }
}
