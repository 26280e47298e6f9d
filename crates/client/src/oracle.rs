//! Reference visibility oracle: ray casting over Bresenham lines.

use umbra_core::{Coordinate, OracleError, RangeShape, VisibilityOracle, VisibleSet, WorldGrid};

/// Lights every cell inside the range shape whose line from the origin only
/// passes through transparent cells. Opaque cells can be lit themselves, so
/// walls bounding a room are drawn.
///
/// With `symmetric` set, a cell is lit only when the line back to the origin
/// is clear as well, so two actors always see each other or neither does.
#[derive(Clone, Copy, Debug, Default)]
pub struct RayCastOracle;

impl VisibilityOracle for RayCastOracle {
    fn compute_visible(
        &self,
        grid: &WorldGrid,
        origin: Coordinate,
        range: u32,
        symmetric: bool,
        shape: RangeShape,
    ) -> Result<VisibleSet, OracleError> {
        if !grid.contains(origin) {
            return Err(OracleError::OriginOutsideGrid(origin));
        }

        let (ox, oy) = (origin.x(), origin.y());
        let r = i32::try_from(range).unwrap_or(i32::MAX);
        let mut visible = VisibleSet::new();
        visible.insert(ox, oy);

        for y in oy.saturating_sub(r).max(0)..=oy.saturating_add(r).min(grid.height() - 1) {
            for x in ox.saturating_sub(r).max(0)..=ox.saturating_add(r).min(grid.width() - 1) {
                if !shape.within(x - ox, y - oy, range) {
                    continue;
                }
                let lit = clear_line(grid, (ox, oy), (x, y))
                    && (!symmetric || clear_line(grid, (x, y), (ox, oy)));
                if lit {
                    visible.insert(x, y);
                }
            }
        }

        Ok(visible)
    }
}

/// Whether every cell strictly between `from` and `to` is transparent.
fn clear_line(grid: &WorldGrid, from: (i32, i32), to: (i32, i32)) -> bool {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if (x, y) == to {
            return true;
        }
        if (x, y) != from && !grid.is_transparent(x, y) {
            return false;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umbra_core::{Terrain, TerrainFlags, TerrainHandle};

    fn room() -> WorldGrid {
        let terrains = vec![
            Terrain::new("floor", '.', TerrainFlags::PASSABLE | TerrainFlags::TRANSPARENT),
            Terrain::new("wall", '#', TerrainFlags::empty()),
        ];
        let mut grid = WorldGrid::new(0, 9, 5, terrains, TerrainHandle(0)).unwrap();
        for y in 0..5 {
            grid.set_terrain(Coordinate::planar(4, y).unwrap(), TerrainHandle(1))
                .unwrap();
        }
        grid
    }

    #[test]
    fn wall_is_lit_but_hides_what_is_behind_it() {
        let grid = room();
        let origin = Coordinate::planar(1, 2).unwrap();

        let visible = RayCastOracle
            .compute_visible(&grid, origin, 10, true, RangeShape::Square)
            .unwrap();

        assert!(visible.contains(1, 2));
        assert!(visible.contains(3, 2));
        assert!(visible.contains(4, 2));
        assert!(!visible.contains(5, 2));
    }

    #[test]
    fn range_shape_limits_the_result() {
        let grid = room();
        let origin = Coordinate::planar(0, 0).unwrap();

        let visible = RayCastOracle
            .compute_visible(&grid, origin, 2, false, RangeShape::Diamond)
            .unwrap();

        assert!(visible.contains(2, 0));
        assert!(visible.contains(1, 1));
        assert!(!visible.contains(2, 1));
    }

    #[test]
    fn origin_outside_grid_is_an_error() {
        let grid = room();
        let origin = Coordinate::planar(20, 20).unwrap();

        let err = RayCastOracle
            .compute_visible(&grid, origin, 5, true, RangeShape::Circle)
            .unwrap_err();
        assert!(matches!(err, OracleError::OriginOutsideGrid(_)));
    }
}
