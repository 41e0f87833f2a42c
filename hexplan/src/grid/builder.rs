//! Hexagonal grid construction.
//!
//! Tiles a bounding box with flat-top regular hexagons. Column spacing is
//! `1.5 * edge`, row spacing is `sqrt(3) * edge`, and alternating columns
//! are offset by half a row so the cells interlock with no gaps. The first
//! column and row start one step outside the box so its edges are fully
//! covered.

use crate::coord::{BoundingBox, Crs};
use crate::grid::{Grid, GridError, HexCell};
use geo::{coord, Coord, LineString, Polygon};
use tracing::info;

/// Derive the hexagon edge length that yields the requested cell area.
///
/// For a regular hexagon, `area = (3 * sqrt(3) / 2) * edge^2`; this is the
/// inverse. See DESIGN.md for the formula provenance.
pub fn hex_edge_from_area(cell_area: f64) -> f64 {
    (cell_area / (3.0 * 3.0_f64.sqrt() / 2.0)).sqrt()
}

/// Deterministically tile `bbox` with regular hexagons of `cell_area`.
///
/// Cells are emitted column by column (ascending x), bottom to top within
/// each column (ascending y), with PUIDs assigned 1..N in that order.
/// Identical inputs always produce identical geometry and PUID assignment.
///
/// # Errors
///
/// Returns [`GridError::InvalidCellArea`] when `cell_area` is not a
/// positive finite number, and [`GridError::DegenerateBounds`] when the box
/// has zero width or height.
pub fn build_grid(bbox: &BoundingBox, cell_area: f64, crs: Crs) -> Result<Grid, GridError> {
    if !cell_area.is_finite() || cell_area <= 0.0 {
        return Err(GridError::InvalidCellArea(cell_area));
    }
    if bbox.is_degenerate() {
        return Err(GridError::DegenerateBounds(*bbox));
    }

    let edge = hex_edge_from_area(cell_area);
    let cells: Vec<HexCell> = hex_centers(bbox, edge)
        .into_iter()
        .enumerate()
        .map(|(i, center)| HexCell::new(i as u64 + 1, hexagon(edge, center)))
        .collect();

    info!(
        cells = cells.len(),
        edge,
        %crs,
        "built planning unit grid over {}",
        bbox
    );

    Ok(Grid::new(cells, crs, edge))
}

/// Emit hexagon centers covering the box, in column-major order.
///
/// The start column is one `h_step` below the smallest multiple of `h_step`
/// at or above `xmin` (so the west edge is always covered); rows are handled
/// symmetrically. The two candidate row starts differ by half a `v_step`
/// and the start-column parity picks which one the first column uses; the
/// choice then toggles every column, producing the staggered packing.
fn hex_centers(bbox: &BoundingBox, edge: f64) -> Vec<Coord<f64>> {
    let v_step = 3.0_f64.sqrt() * edge;
    let h_step = 1.5 * edge;

    let h_skip = (bbox.xmin() / h_step).ceil() - 1.0;
    let h_start = h_skip * h_step;
    let v_skip = (bbox.ymin() / v_step).ceil() - 1.0;
    let v_start = v_skip * v_step;

    let h_end = bbox.xmax() + h_step;
    let v_end = bbox.ymax() + v_step;

    let v_starts = if v_start - v_step / 2.0 < bbox.ymin() {
        [v_start + v_step / 2.0, v_start]
    } else {
        [v_start - v_step / 2.0, v_start]
    };

    let mut offset_idx = (h_skip.abs() as u64 % 2) as usize;

    let mut centers = Vec::new();
    let mut cx = h_start;
    let mut cy = v_starts[offset_idx];
    offset_idx = (offset_idx + 1) % 2;
    while cx < h_end {
        while cy < v_end {
            centers.push(coord! { x: cx, y: cy });
            cy += v_step;
        }
        cx += h_step;
        cy = v_starts[offset_idx];
        offset_idx = (offset_idx + 1) % 2;
    }

    centers
}

/// Build one hexagon polygon: six vertices at 60-degree increments around
/// the center at radius `edge`, starting at 0 degrees.
fn hexagon(edge: f64, center: Coord<f64>) -> Polygon<f64> {
    let ring: Vec<Coord<f64>> = (0..6)
        .map(|i| {
            let angle = f64::from(i * 60).to_radians();
            coord! {
                x: center.x + angle.cos() * edge,
                y: center.y + angle.sin() * edge,
            }
        })
        .collect();
    Polygon::new(LineString::from(ring), vec![])
}
