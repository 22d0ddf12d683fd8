use crate::core::units::LocalFrame;
use crate::region::Bounds;
use geo_types::Coord;

/// Regular lon/lat raster anchored at the south-west corner of a region.
///
/// Rows step north by `lat_step`, columns step east by `lng_step`. Points
/// are produced row-major from index arithmetic, never by accumulating
/// steps, so two passes over the same lattice see identical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Lattice {
    west: f64,
    south: f64,
    lng_step: f64,
    lat_step: f64,
    rows: usize,
    cols: usize,
}

impl Lattice {
    /// One lattice point per raster cell: `⌈extent / step⌉` per axis.
    pub(crate) fn cells(bounds: &Bounds, frame: &LocalFrame, step_m: f64) -> Self {
        let lat_step = frame.lat_step(step_m);
        let lng_step = frame.lng_step(step_m);
        let rows = ceil_steps(bounds.north - bounds.south, lat_step);
        let cols = ceil_steps(bounds.east - bounds.west, lng_step);

        Self {
            west: bounds.west,
            south: bounds.south,
            lng_step,
            lat_step,
            rows,
            cols,
        }
    }

    /// Lattice reaching half a step past the north and east edges, so every
    /// position inside the bounds is within half a step of a lattice line.
    pub(crate) fn extended(bounds: &Bounds, frame: &LocalFrame, step_m: f64) -> Self {
        let lat_step = frame.lat_step(step_m);
        let lng_step = frame.lng_step(step_m);
        let rows = half_step_count(bounds.north - bounds.south, lat_step);
        let cols = half_step_count(bounds.east - bounds.west, lng_step);

        Self {
            west: bounds.west,
            south: bounds.south,
            lng_step,
            lat_step,
            rows,
            cols,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn cols(&self) -> usize {
        self.cols
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        (0..self.rows).flat_map(move |r| {
            let lat = self.south + r as f64 * self.lat_step;
            (0..self.cols).map(move |c| Coord {
                x: self.west + c as f64 * self.lng_step,
                y: lat,
            })
        })
    }
}

fn ceil_steps(extent: f64, step: f64) -> usize {
    ((extent / step).ceil() as usize).max(1)
}

fn half_step_count(extent: f64, step: f64) -> usize {
    (extent / step + 0.5).floor() as usize + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_at_equator() -> LocalFrame {
        LocalFrame::new(0.0)
    }

    #[test]
    fn test_cells_uses_ceiling_division() {
        // 1° tall = 111 320 m; 30 000 m steps → 3.71 → 4 rows
        let bounds = Bounds::new(1.0, 0.0, 0.5, 0.0);
        let lattice = Lattice::cells(&bounds, &frame_at_equator(), 30_000.0);
        assert_eq!(lattice.rows(), 4);
        assert_eq!(lattice.cols(), 2);
        assert_eq!(lattice.iter().count(), 8);
    }

    #[test]
    fn test_cells_never_empty() {
        let bounds = Bounds::new(0.0001, 0.0, 0.0001, 0.0);
        let lattice = Lattice::cells(&bounds, &frame_at_equator(), 10_000.0);
        assert_eq!(lattice.len(), 1);
    }

    #[test]
    fn test_extended_reaches_past_edges() {
        let bounds = Bounds::new(1.0, 0.0, 1.0, 0.0);
        let frame = frame_at_equator();
        let lattice = Lattice::extended(&bounds, &frame, 30_000.0);
        let step = frame.lat_step(30_000.0);

        let top = lattice.iter().map(|c| c.y).fold(f64::MIN, f64::max);
        assert!(top >= bounds.north - step / 2.0);
        assert!(top <= bounds.north + step / 2.0);
    }

    #[test]
    fn test_iteration_is_row_major_from_south_west() {
        let bounds = Bounds::new(1.0, 0.0, 1.0, 0.0);
        let lattice = Lattice::cells(&bounds, &frame_at_equator(), 60_000.0);
        let coords: Vec<_> = lattice.iter().collect();

        assert_eq!(coords[0], Coord { x: 0.0, y: 0.0 });
        assert_eq!(coords[1].y, 0.0);
        assert!(coords[1].x > 0.0);
        assert!(coords[lattice.cols()].y > 0.0);
    }
}
