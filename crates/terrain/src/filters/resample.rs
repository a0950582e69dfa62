//! Bilinear resampling between grid regions.

use tracing::debug;

use crate::config::Rect;
use crate::error::Result;
use crate::grid::HeightGrid;

/// Stretches a source rectangle over a destination rectangle.
///
/// Destination point `(xd, yd)` maps to the fractional source coordinate
///
/// ```text
/// sx = src.x1 + (xd - dst.x1) * src.width / dst.width
/// ```
///
/// (likewise for y) and takes the bilinear blend of the four surrounding
/// source points. Ceiling indices are clamped to the last source row and
/// column, so a source rectangle may extend to the grid's edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resampler {
    source: Rect,
    destination: Rect,
}

impl Resampler {
    pub fn new(source: Rect, destination: Rect) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Stretches `source` over the whole of `destination`.
    pub fn to_full(source: Rect, destination: &HeightGrid) -> Self {
        Self::new(
            source,
            Rect::covering(destination.columns(), destination.rows()),
        )
    }

    /// Writes every destination point inside the destination rectangle.
    /// Points outside it are left as they are.
    pub fn apply(&self, source: &HeightGrid, destination: &mut HeightGrid) -> Result<()> {
        self.source.validate_within(source.columns(), source.rows())?;
        self.destination
            .validate_within(destination.columns(), destination.rows())?;

        let src = self.source;
        let dst = self.destination;
        let last_column = source.columns() - 1;
        let last_row = source.rows() - 1;

        for yd in dst.y1..dst.y2 {
            let sy = map_coordinate(yd, dst.y1, dst.height(), src.y1, src.height());
            let y0 = sy.floor() as usize;
            let y1 = (sy.ceil() as usize).min(last_row);
            let fy = (sy - y0 as f64) as f32;

            for xd in dst.x1..dst.x2 {
                let sx = map_coordinate(xd, dst.x1, dst.width(), src.x1, src.width());
                let x0 = sx.floor() as usize;
                let x1 = (sx.ceil() as usize).min(last_column);
                let fx = (sx - x0 as f64) as f32;

                let value = source.get(x0, y0) * (1.0 - fx) * (1.0 - fy)
                    + source.get(x1, y0) * fx * (1.0 - fy)
                    + source.get(x0, y1) * (1.0 - fx) * fy
                    + source.get(x1, y1) * fx * fy;
                destination.set(xd, yd, value);
            }
        }

        debug!("Resampled {} into {}", src, dst);
        Ok(())
    }
}

/// Proportional position of `d` within the destination span, carried into
/// the source span. Multiplies before dividing so equal spans map exactly.
#[inline]
fn map_coordinate(
    d: usize,
    dst_start: usize,
    dst_len: usize,
    src_start: usize,
    src_len: usize,
) -> f64 {
    src_start as f64 + ((d - dst_start) * src_len) as f64 / dst_len as f64
}
